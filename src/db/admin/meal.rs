use crate::auth::policy::can_modify_meal;
use crate::auth::Principal;
use crate::db::errors::RepositoryError;
use crate::db::schema::meals::dsl::*;
use crate::db::{DbConnection, DbPool};
use crate::models::meal::{Meal, MealChanges, NewMeal};
use chrono::Utc;
use diesel::prelude::*;
use log::error;

pub const MEAL_NOT_FOUND: &str = "Meal not found";

#[derive(Clone)]
pub struct MealOperations {
    pool: DbPool,
}

impl MealOperations {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn add_meal(&self, new_meal: NewMeal) -> Result<Meal, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("add_meal: failed to acquire DB connection: {}", e);
            e
        })?;

        diesel::insert_into(meals)
            .values(&new_meal)
            .returning(Meal::as_returning())
            .get_result(conn.connection())
            .map_err(|e| {
                error!("add_meal: error inserting meal '{}': {}", new_meal.name, e);
                RepositoryError::from_write(e, "Meal owner does not exist")
            })
    }

    pub fn get_all_meals(&self) -> Result<Vec<Meal>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("get_all_meals: failed to acquire DB connection: {}", e);
            e
        })?;

        meals
            .order_by(meal_id.asc())
            .select(Meal::as_select())
            .load(conn.connection())
            .map_err(|e| {
                error!("get_all_meals: error fetching meals: {}", e);
                RepositoryError::DatabaseError(e)
            })
    }

    pub fn get_meal(&self, id: i32) -> Result<Meal, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("get_meal: failed to acquire DB connection for id {}: {}", id, e);
            e
        })?;

        meals
            .find(id)
            .select(Meal::as_select())
            .first(conn.connection())
            .map_err(|e| RepositoryError::from_lookup(e, MEAL_NOT_FOUND))
    }

    /// Applies `changes` after checking, under a row lock, that `caller` may modify the meal.
    pub fn update_meal(
        &self,
        id: i32,
        changes: MealChanges,
        caller: &Principal,
    ) -> Result<Meal, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("update_meal: failed to acquire DB connection for id {}: {}", id, e);
            e
        })?;

        conn.connection().transaction(|conn| -> Result<Meal, RepositoryError> {
            let current = lock_meal(conn, id)?;
            if !can_modify_meal(caller, &current) {
                return Err(RepositoryError::Forbidden(format!(
                    "user {} cannot modify meal {}",
                    caller.user_id, id
                )));
            }
            if changes.is_empty() {
                return Ok(current);
            }

            diesel::update(meals.find(id))
                .set((&changes, updated_at.eq(Utc::now())))
                .returning(Meal::as_returning())
                .get_result(conn)
                .map_err(|e| {
                    error!("update_meal: error updating meal with id {}: {}", id, e);
                    RepositoryError::from_lookup(e, MEAL_NOT_FOUND)
                })
        })
    }

    pub fn remove_meal(&self, id: i32, caller: &Principal) -> Result<Meal, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("remove_meal: failed to acquire DB connection for id {}: {}", id, e);
            e
        })?;

        conn.connection().transaction(|conn| -> Result<Meal, RepositoryError> {
            let current = lock_meal(conn, id)?;
            if !can_modify_meal(caller, &current) {
                return Err(RepositoryError::Forbidden(format!(
                    "user {} cannot delete meal {}",
                    caller.user_id, id
                )));
            }

            diesel::delete(meals.find(id))
                .returning(Meal::as_returning())
                .get_result(conn)
                .map_err(|e| {
                    error!("remove_meal: error deleting meal with id {}: {}", id, e);
                    RepositoryError::from_write(e, "Meal has existing orders and cannot be deleted")
                })
        })
    }
}

fn lock_meal(conn: &mut PgConnection, id: i32) -> Result<Meal, RepositoryError> {
    meals
        .find(id)
        .select(Meal::as_select())
        .for_update()
        .get_result(conn)
        .map_err(|e| RepositoryError::from_lookup(e, MEAL_NOT_FOUND))
}
