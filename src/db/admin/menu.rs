use crate::db::errors::RepositoryError;
use crate::db::schema::{meals, menu_meals, menus};
use crate::db::{DbConnection, DbPool};
use crate::models::meal::Meal;
use crate::models::menu::{Menu, MenuWithMeals, NewMenu, NewMenuMeal};
use chrono::{NaiveDate, Utc};
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Bool;
use diesel::upsert::excluded;
use log::error;
use std::collections::BTreeSet;

/// Result of setting up the menu of a day.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuSetupOutcome {
    Created(MenuWithMeals),
    /// A menu already existed for the date; its name and meals were replaced.
    Replaced(MenuWithMeals),
}

impl MenuSetupOutcome {
    pub fn menu(&self) -> &MenuWithMeals {
        match self {
            MenuSetupOutcome::Created(m) | MenuSetupOutcome::Replaced(m) => m,
        }
    }
}

#[derive(Clone)]
pub struct MenuOperations {
    pool: DbPool,
}

impl MenuOperations {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Sets the menu for `date`, replacing any existing one.
    ///
    /// The `menu_date` unique constraint plus `ON CONFLICT DO UPDATE` keeps a
    /// single row per date even when two setups race.
    pub fn setup_menu(
        &self,
        date: NaiveDate,
        menu_name: String,
        meal_ids: Vec<i32>,
        caller_id: i32,
    ) -> Result<MenuSetupOutcome, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("setup_menu: failed to acquire DB connection: {}", e);
            e
        })?;

        let wanted: BTreeSet<i32> = meal_ids.into_iter().collect();

        conn.connection().transaction(|conn| -> Result<MenuSetupOutcome, RepositoryError> {
            let found: BTreeSet<i32> = meals::table
                .filter(meals::meal_id.eq_any(wanted.iter().copied().collect::<Vec<_>>()))
                .select(meals::meal_id)
                .load::<i32>(conn)?
                .into_iter()
                .collect();
            let missing: Vec<String> = wanted
                .difference(&found)
                .map(|id| id.to_string())
                .collect();
            if !missing.is_empty() {
                return Err(RepositoryError::InvalidReference {
                    field: "meals",
                    message: format!("Meals do not exist: {}", missing.join(", ")),
                });
            }

            // `xmax = 0` holds only for a row this statement inserted.
            let (menu, inserted) = diesel::insert_into(menus::table)
                .values(&NewMenu {
                    menu_date: date,
                    name: menu_name.clone(),
                    created_by: caller_id,
                })
                .on_conflict(menus::menu_date)
                .do_update()
                .set((
                    menus::name.eq(excluded(menus::name)),
                    menus::updated_at.eq(Utc::now()),
                ))
                .returning((Menu::as_returning(), sql::<Bool>("xmax = 0")))
                .get_result::<(Menu, bool)>(conn)
                .map_err(|e| {
                    error!("setup_menu: error upserting menu for {}: {}", date, e);
                    RepositoryError::DatabaseError(e)
                })?;

            diesel::delete(menu_meals::table.filter(menu_meals::menu_id.eq(menu.menu_id)))
                .execute(conn)?;

            let rows: Vec<NewMenuMeal> = wanted
                .iter()
                .map(|&meal| NewMenuMeal {
                    menu_id: menu.menu_id,
                    meal_id: meal,
                })
                .collect();
            diesel::insert_into(menu_meals::table)
                .values(&rows)
                .execute(conn)
                .map_err(|e| RepositoryError::from_write(e, "Meal was removed while setting up menu"))?;

            let meal_list = load_menu_meals(conn, menu.menu_id)?;
            let with_meals = MenuWithMeals {
                menu,
                meals: meal_list,
            };
            if inserted {
                Ok(MenuSetupOutcome::Created(with_meals))
            } else {
                Ok(MenuSetupOutcome::Replaced(with_meals))
            }
        })
    }

    pub fn get_menu_for_date(&self, date: NaiveDate) -> Result<Option<MenuWithMeals>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("get_menu_for_date: failed to acquire DB connection: {}", e);
            e
        })?;

        let menu = menus::table
            .filter(menus::menu_date.eq(date))
            .select(Menu::as_select())
            .first::<Menu>(conn.connection())
            .optional()
            .map_err(|e| {
                error!("get_menu_for_date: error fetching menu for {}: {}", date, e);
                RepositoryError::DatabaseError(e)
            })?;

        match menu {
            Some(menu) => {
                let meals = load_menu_meals(conn.connection(), menu.menu_id)?;
                Ok(Some(MenuWithMeals { menu, meals }))
            }
            None => Ok(None),
        }
    }
}

fn load_menu_meals(conn: &mut PgConnection, menu: i32) -> Result<Vec<Meal>, RepositoryError> {
    menu_meals::table
        .inner_join(meals::table)
        .filter(menu_meals::menu_id.eq(menu))
        .order_by(meals::meal_id.asc())
        .select(Meal::as_select())
        .load::<Meal>(conn)
        .map_err(|e| {
            error!("load_menu_meals: error fetching meals of menu {}: {}", menu, e);
            RepositoryError::DatabaseError(e)
        })
}
