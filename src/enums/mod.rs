pub mod meals;
pub mod menus;
pub mod orders;
pub mod users;

use serde::Serialize;
use utoipa::ToSchema;

pub const STATUS_SUCCESS: &str = "success";

#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub status: String,
    pub message: String,
}

impl MessageResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            message: message.into(),
        }
    }
}
