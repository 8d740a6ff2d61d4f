use crate::api::claim_operation;
use crate::api::errors::{ApiError, ErrorResponse};
use crate::auth::policy::can_view_history;
use crate::auth::{AdminPrincipal, AuthUser};
use crate::config::OrderSettings;
use crate::db::OrderOperations;
use crate::enums::orders::{OrderListResponse, OrderResponse, OrderTotalResponse};
use crate::enums::STATUS_SUCCESS;
use crate::services::in_flight::InFlightRequests;
use crate::validators::order::{
    validate_new_order, validate_order_update, validate_total_window, OrderPayload, TotalQuery,
    ORDER_ID_MESSAGE, USER_ID_MESSAGE,
};
use crate::validators::parse_id;
use actix_web::{get, post, put, web, HttpRequest, HttpResponse};

fn order_list(orders: Vec<crate::models::order::Order>) -> HttpResponse {
    HttpResponse::Ok().json(OrderListResponse {
        status: STATUS_SUCCESS.to_string(),
        orders,
    })
}

#[utoipa::path(
    get,
    tag = "Orders",
    path = "/api/v1/orders",
    responses(
        (status = 200, description = "All orders for admins, own orders otherwise", body = OrderListResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    summary = "List orders"
)]
#[get("")]
pub async fn list_orders(
    user: AuthUser,
    order_ops: web::Data<OrderOperations>,
) -> Result<HttpResponse, ApiError> {
    let AuthUser(caller) = user;
    let ops = order_ops.clone();
    let orders = web::block(move || {
        if caller.is_admin() {
            ops.get_all_orders()
        } else {
            ops.get_orders_by_user(caller.user_id)
        }
    })
    .await??;
    Ok(order_list(orders))
}

#[utoipa::path(
    post,
    tag = "Orders",
    path = "/api/v1/orders",
    request_body = OrderPayload,
    params(
        ("X-Operation-Id" = Option<String>, Header, description = "Client operation id for duplicate-submit protection"),
    ),
    responses(
        (status = 201, description = "Order placed", body = OrderResponse),
        (status = 400, description = "Invalid request data or meal not on today's menu", body = ErrorResponse),
        (status = 404, description = "Menu for today have not been set", body = ErrorResponse),
        (status = 409, description = "Request already in progress", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    summary = "Order a meal from today's menu"
)]
#[post("")]
pub async fn create_order(
    req: HttpRequest,
    user: AuthUser,
    payload: web::Json<OrderPayload>,
    order_ops: web::Data<OrderOperations>,
    settings: web::Data<OrderSettings>,
    in_flight: web::Data<InFlightRequests>,
) -> Result<HttpResponse, ApiError> {
    let AuthUser(caller) = user;
    let request = validate_new_order(&payload)?;
    let _guard = claim_operation(&req, &in_flight, caller.user_id)?;

    let today = settings.today();
    let ops = order_ops.clone();
    let order = web::block(move || ops.create_order(caller.user_id, today, request)).await??;

    debug!(
        "ORDER: create_order(): order {} for user {}, amount {}",
        order.order_id, order.user_id, order.amount
    );
    Ok(HttpResponse::Created().json(OrderResponse::new(order, Some("Order placed successfully"))))
}

#[utoipa::path(
    put,
    tag = "Orders",
    path = "/api/v1/orders/{orderId}",
    request_body = OrderPayload,
    params(
        ("orderId" = String, Path, description = "Numeric id of the order"),
    ),
    responses(
        (status = 200, description = "Order updated", body = OrderResponse),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 403, description = "Caller does not own the order", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 409, description = "Order can no longer be modified", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    summary = "Update an order"
)]
#[put("/{orderId}")]
pub async fn update_order(
    user: AuthUser,
    path: web::Path<String>,
    payload: web::Json<OrderPayload>,
    order_ops: web::Data<OrderOperations>,
    settings: web::Data<OrderSettings>,
) -> Result<HttpResponse, ApiError> {
    let AuthUser(caller) = user;
    let id = parse_id(&path.into_inner(), ORDER_ID_MESSAGE)?;
    let update = validate_order_update(&payload)?;

    let today = settings.today();
    let edit_window = settings.edit_window;
    let ops = order_ops.clone();
    let order =
        web::block(move || ops.update_order(id, update, &caller, today, edit_window)).await??;

    info!("ORDER: update_order(): order {} now '{}'", order.order_id, order.status);
    Ok(HttpResponse::Ok().json(OrderResponse::new(order, Some("Order updated successfully"))))
}

#[utoipa::path(
    get,
    tag = "Orders",
    path = "/api/v1/orders/total",
    params(
        ("window" = Option<String>, Query, description = "today or all; defaults to ORDER_TOTAL_WINDOW"),
    ),
    responses(
        (status = 200, description = "Sum of order amounts", body = OrderTotalResponse),
        (status = 400, description = "Invalid window", body = ErrorResponse),
        (status = 403, description = "Caller is not a caterer", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    summary = "Total amount made"
)]
#[get("/total")]
pub async fn total_amount(
    _admin: AdminPrincipal,
    query: web::Query<TotalQuery>,
    order_ops: web::Data<OrderOperations>,
    settings: web::Data<OrderSettings>,
) -> Result<HttpResponse, ApiError> {
    let window = validate_total_window(&query)?.unwrap_or(settings.total_window);
    let today = settings.today();
    let ops = order_ops.clone();
    let total = web::block(move || ops.total_amount(window, today)).await??;
    Ok(HttpResponse::Ok().json(OrderTotalResponse {
        status: STATUS_SUCCESS.to_string(),
        window,
        total_amount: total,
    }))
}

#[utoipa::path(
    get,
    tag = "Orders",
    path = "/api/v1/orders/users",
    responses(
        (status = 200, description = "The caller's orders", body = OrderListResponse)
    ),
    security(("bearer" = [])),
    summary = "Own order history"
)]
#[get("/users")]
pub async fn own_history(
    user: AuthUser,
    order_ops: web::Data<OrderOperations>,
) -> Result<HttpResponse, ApiError> {
    let AuthUser(caller) = user;
    let ops = order_ops.clone();
    let orders = web::block(move || ops.get_orders_by_user(caller.user_id)).await??;
    Ok(order_list(orders))
}

#[utoipa::path(
    get,
    tag = "Orders",
    path = "/api/v1/orders/users/{userId}",
    params(
        ("userId" = String, Path, description = "Numeric id of the user"),
    ),
    responses(
        (status = 200, description = "The user's orders", body = OrderListResponse),
        (status = 400, description = "Invalid user id", body = ErrorResponse),
        (status = 403, description = "Caller may not view this history", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    summary = "Order history of a user"
)]
#[get("/users/{userId}")]
pub async fn user_history(
    user: AuthUser,
    path: web::Path<String>,
    order_ops: web::Data<OrderOperations>,
) -> Result<HttpResponse, ApiError> {
    let AuthUser(caller) = user;
    let user_id = parse_id(&path.into_inner(), USER_ID_MESSAGE)?;
    if !can_view_history(&caller, user_id) {
        debug!(
            "ORDER: user_history(): user {} refused history of {}",
            caller.user_id, user_id
        );
        return Err(ApiError::Forbidden);
    }
    let ops = order_ops.clone();
    let orders = web::block(move || ops.get_orders_by_user(user_id)).await??;
    Ok(order_list(orders))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/orders")
            .service(list_orders)
            .service(create_order)
            .service(total_amount)
            .service(own_history)
            .service(user_history)
            .service(update_order),
    );
}
