use chrono::{DateTime, Utc};
use diesel::{AsChangeset, Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::db::schema::meals)]
#[diesel(primary_key(meal_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    #[serde(rename = "id")]
    pub meal_id: i32,
    pub owner_id: i32,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::db::schema::meals)]
pub struct NewMeal {
    pub owner_id: i32,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub price: f64,
}

/// Fields a caller asked to change; `None` leaves the column untouched.
#[derive(AsChangeset, Debug, Clone, Default, PartialEq)]
#[diesel(table_name = crate::db::schema::meals)]
pub struct MealChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<f64>,
}

impl MealChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.image_url.is_none()
            && self.price.is_none()
    }
}
