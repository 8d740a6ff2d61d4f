use chrono::{DateTime, Utc};
use diesel::{AsChangeset, Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const STATUS_CREATED: &str = "created";
pub const TERMINAL_STATUSES: [&str; 2] = ["fulfilled", "cancelled"];

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::db::schema::orders)]
#[diesel(primary_key(order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "id")]
    pub order_id: i32,
    pub user_id: i32,
    pub meal_id: i32,
    pub menu_id: i32,
    pub quantity: i32,
    pub amount: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn is_terminal(&self) -> bool {
        TERMINAL_STATUSES.contains(&self.status.as_str())
    }
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::db::schema::orders)]
pub struct NewOrder {
    pub user_id: i32,
    pub meal_id: i32,
    pub menu_id: i32,
    pub quantity: i32,
    pub amount: f64,
    pub status: String,
}

#[derive(AsChangeset, Debug, Clone, Default, PartialEq)]
#[diesel(table_name = crate::db::schema::orders)]
pub struct OrderChanges {
    pub meal_id: Option<i32>,
    pub quantity: Option<i32>,
    pub amount: Option<f64>,
    pub status: Option<String>,
}
