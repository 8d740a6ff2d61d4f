use crate::enums::STATUS_SUCCESS;
use crate::models::meal::Meal;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct MealResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub meal: Meal,
}

impl MealResponse {
    pub fn new(meal: Meal, message: Option<&str>) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            message: message.map(str::to_string),
            meal,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct MealListResponse {
    pub status: String,
    pub meals: Vec<Meal>,
}
