use crate::api::claim_operation;
use crate::api::errors::{ApiError, ErrorResponse};
use crate::auth::{AdminPrincipal, AuthUser};
use crate::config::OrderSettings;
use crate::db::{MenuOperations, MenuSetupOutcome, MENU_NOT_SET};
use crate::enums::menus::MenuResponse;
use crate::services::in_flight::InFlightRequests;
use crate::validators::menu::{validate_menu, MenuPayload};
use actix_web::{get, post, web, HttpRequest, HttpResponse};

const MENU_SET: &str = "Menu for today has been set";
const MENU_UPDATED: &str = "Menu for today has been updated";

#[utoipa::path(
    post,
    tag = "Menu",
    path = "/api/v1/menu",
    request_body = MenuPayload,
    params(
        ("X-Operation-Id" = Option<String>, Header, description = "Client operation id for duplicate-submit protection"),
    ),
    responses(
        (status = 201, description = "Menu for today created", body = MenuResponse),
        (status = 200, description = "Menu for today replaced", body = MenuResponse),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 403, description = "Caller is not a caterer", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    summary = "Set up today's menu"
)]
#[post("")]
pub async fn setup_menu(
    req: HttpRequest,
    admin: AdminPrincipal,
    payload: web::Json<MenuPayload>,
    menu_ops: web::Data<MenuOperations>,
    settings: web::Data<OrderSettings>,
    in_flight: web::Data<InFlightRequests>,
) -> Result<HttpResponse, ApiError> {
    let AdminPrincipal(caller) = admin;
    let setup = validate_menu(&payload)?;
    let _guard = claim_operation(&req, &in_flight, caller.user_id)?;

    let today = settings.today();
    let ops = menu_ops.clone();
    let outcome = web::block(move || {
        ops.setup_menu(today, setup.name, setup.meal_ids, caller.user_id)
    })
    .await??;

    let resp = match outcome {
        MenuSetupOutcome::Created(menu) => {
            info!("MENU: setup_menu(): menu {} set for {}", menu.menu.menu_id, today);
            HttpResponse::Created().json(MenuResponse::new(menu, Some(MENU_SET)))
        }
        MenuSetupOutcome::Replaced(menu) => {
            warn!(
                "MENU: setup_menu(): menu {} for {} replaced by user {}",
                menu.menu.menu_id, today, caller.user_id
            );
            HttpResponse::Ok().json(MenuResponse::new(menu, Some(MENU_UPDATED)))
        }
    };
    Ok(resp)
}

#[utoipa::path(
    get,
    tag = "Menu",
    path = "/api/v1/menu",
    responses(
        (status = 200, description = "Today's menu", body = MenuResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Menu for today have not been set", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    summary = "Get today's menu"
)]
#[get("")]
pub async fn get_menu(
    _user: AuthUser,
    menu_ops: web::Data<MenuOperations>,
    settings: web::Data<OrderSettings>,
) -> Result<HttpResponse, ApiError> {
    let today = settings.today();
    let ops = menu_ops.clone();
    let menu = web::block(move || ops.get_menu_for_date(today))
        .await??
        .ok_or_else(|| ApiError::NotFound(MENU_NOT_SET.to_string()))?;
    Ok(HttpResponse::Ok().json(MenuResponse::new(menu, None)))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/menu").service(setup_menu).service(get_menu));
}
