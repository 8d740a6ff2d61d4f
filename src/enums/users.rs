use crate::enums::STATUS_SUCCESS;
use crate::models::user::UserProfile;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct AuthResponse {
    pub status: String,
    pub message: String,
    pub token: String,
    pub user: UserProfile,
}

impl AuthResponse {
    pub fn new(message: &str, token: String, user: UserProfile) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            message: message.to_string(),
            token,
            user,
        }
    }
}
