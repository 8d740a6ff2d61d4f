use crate::enums::STATUS_SUCCESS;
use crate::models::menu::MenuWithMeals;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct MenuResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub menu: MenuWithMeals,
}

impl MenuResponse {
    pub fn new(menu: MenuWithMeals, message: Option<&str>) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            message: message.map(str::to_string),
            menu,
        }
    }
}
