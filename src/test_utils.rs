use crate::auth::password::hash_password_with_rounds;
use crate::auth::token::issue_token;
use crate::auth::JwtConfig;
use crate::config::OrderSettings;
use crate::db::{establish_connection_pool, run_db_migrations, DbConnection, DbPool, RepositoryError};
use crate::models::meal::NewMeal;
use crate::models::menu::{NewMenu, NewMenuMeal};
use crate::models::user::{NewUser, Role};
use crate::AppState;
use actix_web::http::header;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::PgConnection;
use std::time::Duration;

// Fixture strategy:
// - Every test gets its own database, so ids start at 1 but are read from fixtures.
// - All seeded accounts share TEST_PASSWORD, hashed with a low work factor.
pub const TEST_PASSWORD: &str = "password123";
const FIXTURE_HASH_ROUNDS: u32 = 1_000;
const TEST_JWT_SECRET: &str = "test-jwt-secret";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
        issuer: "book-a-meal".to_string(),
        audience: "book-a-meal-api".to_string(),
        expiry_secs: 60 * 60,
    }
}

pub fn build_test_pool(database_url: &str) -> DbPool {
    let pool = establish_connection_pool(database_url, 8, Duration::from_secs(10))
        .expect("Unable to build test pool");
    run_db_migrations(pool.clone()).expect("Unable to run migrations");
    pool
}

pub fn test_state(pool: DbPool) -> AppState {
    AppState::from_pool(pool, test_jwt_config(), OrderSettings::default())
}

pub fn token_for(user_id: i32) -> String {
    issue_token(user_id, &test_jwt_config()).expect("issue test token")
}

pub fn bearer(user_id: i32) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token_for(user_id)))
}

pub struct TestFixtures {
    pub customer_id: i32,
    pub caterer_id: i32,
    pub other_caterer_id: i32,
    pub super_admin_id: i32,
    /// Owned by `caterer_id`.
    pub meal_ids: Vec<i32>,
    /// Owned by `other_caterer_id`.
    pub other_meal_id: i32,
}

pub fn seed_basic_fixtures(pool: &DbPool) -> Result<TestFixtures, RepositoryError> {
    let mut conn = DbConnection::new(pool)?;
    let conn = conn.connection();

    let customer_id = insert_user(conn, "Ada Customer", "customer@example.com", Role::Customer)?;
    let caterer_id = insert_user(conn, "Bola Caterer", "caterer@example.com", Role::Caterer)?;
    let other_caterer_id = insert_user(conn, "Chidi Caterer", "other@example.com", Role::Caterer)?;
    let super_admin_id = insert_user(conn, "Root", "root@example.com", Role::SuperAdmin)?;

    let rice = seed_meal(conn, caterer_id, "Jollof rice", 1500.0)?;
    let beans = seed_meal(conn, caterer_id, "Beans and plantain", 800.0)?;
    let other_meal_id = seed_meal(conn, other_caterer_id, "Egusi soup", 2000.0)?;

    Ok(TestFixtures {
        customer_id,
        caterer_id,
        other_caterer_id,
        super_admin_id,
        meal_ids: vec![rice, beans],
        other_meal_id,
    })
}

pub fn insert_user(
    conn: &mut PgConnection,
    name_val: &str,
    email_val: &str,
    role_val: Role,
) -> Result<i32, RepositoryError> {
    use crate::db::schema::users::dsl::*;

    diesel::insert_into(users)
        .values(&NewUser {
            name: name_val.to_string(),
            email: email_val.to_string(),
            password_hash: hash_password_with_rounds(TEST_PASSWORD, FIXTURE_HASH_ROUNDS)
                .map_err(|e| RepositoryError::PasswordHash(e.to_string()))?,
            role: role_val.as_str().to_string(),
        })
        .returning(user_id)
        .get_result(conn)
        .map_err(RepositoryError::DatabaseError)
}

pub fn seed_meal(
    conn: &mut PgConnection,
    owner: i32,
    name_val: &str,
    price_val: f64,
) -> Result<i32, RepositoryError> {
    use crate::db::schema::meals::dsl::*;

    diesel::insert_into(meals)
        .values(&NewMeal {
            owner_id: owner,
            name: name_val.to_string(),
            description: format!("{} of the day", name_val),
            image_url: "https://images.example.com/meal.png".to_string(),
            price: price_val,
        })
        .returning(meal_id)
        .get_result(conn)
        .map_err(RepositoryError::DatabaseError)
}

/// Inserts a menu row directly, bypassing the upsert path.
pub fn seed_menu(
    conn: &mut PgConnection,
    date: NaiveDate,
    creator: i32,
    meal_list: &[i32],
) -> Result<i32, RepositoryError> {
    use crate::db::schema::{menu_meals, menus};

    let id = diesel::insert_into(menus::table)
        .values(&NewMenu {
            menu_date: date,
            name: format!("Menu for {}", date),
            created_by: creator,
        })
        .returning(menus::menu_id)
        .get_result::<i32>(conn)
        .map_err(RepositoryError::DatabaseError)?;

    let rows: Vec<NewMenuMeal> = meal_list
        .iter()
        .map(|&meal| NewMenuMeal {
            menu_id: id,
            meal_id: meal,
        })
        .collect();
    diesel::insert_into(menu_meals::table)
        .values(&rows)
        .execute(conn)
        .map_err(RepositoryError::DatabaseError)?;
    Ok(id)
}
