use crate::models::meal::Meal;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::{Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::db::schema::menus)]
#[diesel(primary_key(menu_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    #[serde(rename = "id")]
    pub menu_id: i32,
    #[serde(rename = "date")]
    pub menu_date: NaiveDate,
    pub name: String,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::db::schema::menus)]
pub struct NewMenu {
    pub menu_date: NaiveDate,
    pub name: String,
    pub created_by: i32,
}

#[derive(Insertable, Debug, Clone, Copy)]
#[diesel(table_name = crate::db::schema::menu_meals)]
pub struct NewMenuMeal {
    pub menu_id: i32,
    pub meal_id: i32,
}

/// A day's menu together with the meals currently on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MenuWithMeals {
    #[serde(flatten)]
    pub menu: Menu,
    pub meals: Vec<Meal>,
}
