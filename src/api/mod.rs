pub mod auth;
pub mod docs;
pub mod errors;
pub mod meals;
pub mod menu;
pub mod orders;

use crate::api::errors::ApiError;
use crate::enums::MessageResponse;
use crate::services::in_flight::{InFlightGuard, InFlightRequests, OPERATION_ID_HEADER};
use crate::AppState;
use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
pub(crate) use errors::json_error_handler;

pub const API_PREFIX: &str = "/api/v1";
const WELCOME: &str = "Welcome to Book-A-Meal api";
const DUPLICATE_REQUEST: &str = "Request already in progress";

#[get("/")]
async fn root_endpoint() -> impl Responder {
    HttpResponse::Ok().body("Server up!")
}

#[utoipa::path(
    get,
    tag = "Meta",
    path = "/api/v1",
    responses(
        (status = 200, description = "API welcome message", body = MessageResponse)
    ),
    summary = "Welcome"
)]
#[get("")]
pub async fn welcome() -> impl Responder {
    HttpResponse::Ok().json(MessageResponse::success(WELCOME))
}

/// Claims the caller's `X-Operation-Id`, if one was sent, for the lifetime of the guard.
pub(crate) fn claim_operation(
    req: &HttpRequest,
    in_flight: &InFlightRequests,
    user_id: i32,
) -> Result<Option<InFlightGuard>, ApiError> {
    let Some(operation_id) = req
        .headers()
        .get(OPERATION_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    else {
        return Ok(None);
    };
    in_flight
        .begin(user_id, operation_id)
        .map(Some)
        .ok_or_else(|| ApiError::Conflict(DUPLICATE_REQUEST.to_string()))
}

pub fn configure(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.service(root_endpoint).service(
        web::scope(API_PREFIX)
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::Data::new(state.user_ops.clone()))
            .app_data(web::Data::new(state.meal_ops.clone()))
            .app_data(web::Data::new(state.menu_ops.clone()))
            .app_data(web::Data::new(state.order_ops.clone()))
            .app_data(web::Data::new(state.jwt.clone()))
            .app_data(web::Data::new(state.orders.clone()))
            .app_data(web::Data::new(state.in_flight.clone()))
            .service(welcome)
            .configure(auth::config)
            .configure(meals::config)
            .configure(menu::config)
            .configure(orders::config)
            .configure(docs::config),
    );
}
