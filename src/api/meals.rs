use crate::api::claim_operation;
use crate::api::errors::{ApiError, ErrorResponse};
use crate::auth::AdminPrincipal;
use crate::db::MealOperations;
use crate::enums::meals::{MealListResponse, MealResponse};
use crate::enums::{MessageResponse, STATUS_SUCCESS};
use crate::models::meal::NewMeal;
use crate::services::in_flight::InFlightRequests;
use crate::validators::meal::{validate_meal_update, validate_new_meal, MealPayload, MEAL_ID_MESSAGE};
use crate::validators::parse_id;
use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};

#[utoipa::path(
    get,
    tag = "Meals",
    path = "/api/v1/meals",
    responses(
        (status = 200, description = "All meals ordered by id", body = MealListResponse)
    ),
    summary = "List meals"
)]
#[get("")]
pub async fn list_meals(meal_ops: web::Data<MealOperations>) -> Result<HttpResponse, ApiError> {
    let ops = meal_ops.clone();
    let meals = web::block(move || ops.get_all_meals()).await??;
    Ok(HttpResponse::Ok().json(MealListResponse {
        status: STATUS_SUCCESS.to_string(),
        meals,
    }))
}

#[utoipa::path(
    get,
    tag = "Meals",
    path = "/api/v1/meals/{mealId}",
    params(
        ("mealId" = String, Path, description = "Numeric id of the meal"),
    ),
    responses(
        (status = 200, description = "Meal found", body = MealResponse),
        (status = 400, description = "Invalid meal id", body = ErrorResponse),
        (status = 404, description = "Meal not found", body = ErrorResponse)
    ),
    summary = "Get a meal"
)]
#[get("/{mealId}")]
pub async fn get_meal(
    meal_ops: web::Data<MealOperations>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path.into_inner(), MEAL_ID_MESSAGE)?;
    let ops = meal_ops.clone();
    let meal = web::block(move || ops.get_meal(id)).await??;
    Ok(HttpResponse::Ok().json(MealResponse::new(meal, None)))
}

#[utoipa::path(
    post,
    tag = "Meals",
    path = "/api/v1/meals",
    request_body = MealPayload,
    params(
        ("X-Operation-Id" = Option<String>, Header, description = "Client operation id for duplicate-submit protection"),
    ),
    responses(
        (status = 201, description = "Meal created", body = MealResponse),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Caller is not a caterer", body = ErrorResponse),
        (status = 409, description = "Request already in progress", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    summary = "Add a meal"
)]
#[post("")]
pub async fn add_meal(
    req: HttpRequest,
    admin: AdminPrincipal,
    payload: web::Json<MealPayload>,
    meal_ops: web::Data<MealOperations>,
    in_flight: web::Data<InFlightRequests>,
) -> Result<HttpResponse, ApiError> {
    let AdminPrincipal(caller) = admin;
    let meal = validate_new_meal(&payload)?;
    let _guard = claim_operation(&req, &in_flight, caller.user_id)?;

    let ops = meal_ops.clone();
    let created = web::block(move || {
        ops.add_meal(NewMeal {
            owner_id: caller.user_id,
            name: meal.name,
            description: meal.description,
            image_url: meal.image_url,
            price: meal.price,
        })
    })
    .await??;

    info!(
        "MEAL: add_meal(): meal {} '{}' added by user {}",
        created.meal_id, created.name, created.owner_id
    );
    Ok(HttpResponse::Created().json(MealResponse::new(created, Some("Meal added successfully"))))
}

#[utoipa::path(
    put,
    tag = "Meals",
    path = "/api/v1/meals/{mealId}",
    request_body = MealPayload,
    params(
        ("mealId" = String, Path, description = "Numeric id of the meal"),
    ),
    responses(
        (status = 200, description = "Meal updated", body = MealResponse),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 403, description = "Caller may not modify this meal", body = ErrorResponse),
        (status = 404, description = "Meal not found", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    summary = "Update a meal"
)]
#[put("/{mealId}")]
pub async fn update_meal(
    admin: AdminPrincipal,
    path: web::Path<String>,
    payload: web::Json<MealPayload>,
    meal_ops: web::Data<MealOperations>,
) -> Result<HttpResponse, ApiError> {
    let AdminPrincipal(caller) = admin;
    let id = parse_id(&path.into_inner(), MEAL_ID_MESSAGE)?;
    let changes = validate_meal_update(&payload)?;

    let ops = meal_ops.clone();
    let updated = web::block(move || ops.update_meal(id, changes, &caller)).await??;
    info!("MEAL: update_meal(): meal {} updated", updated.meal_id);
    Ok(HttpResponse::Ok().json(MealResponse::new(updated, Some("Meal updated successfully"))))
}

#[utoipa::path(
    delete,
    tag = "Meals",
    path = "/api/v1/meals/{mealId}",
    params(
        ("mealId" = String, Path, description = "Numeric id of the meal"),
    ),
    responses(
        (status = 200, description = "Meal deleted", body = MessageResponse),
        (status = 403, description = "Caller may not modify this meal", body = ErrorResponse),
        (status = 404, description = "Meal not found", body = ErrorResponse),
        (status = 409, description = "Meal has orders", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    summary = "Delete a meal"
)]
#[delete("/{mealId}")]
pub async fn delete_meal(
    admin: AdminPrincipal,
    path: web::Path<String>,
    meal_ops: web::Data<MealOperations>,
) -> Result<HttpResponse, ApiError> {
    let AdminPrincipal(caller) = admin;
    let id = parse_id(&path.into_inner(), MEAL_ID_MESSAGE)?;

    let ops = meal_ops.clone();
    let removed = web::block(move || ops.remove_meal(id, &caller)).await??;
    info!("MEAL: delete_meal(): meal {} '{}' deleted", removed.meal_id, removed.name);
    Ok(HttpResponse::Ok().json(MessageResponse::success("Meal deleted successfully")))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/meals")
            .service(list_meals)
            .service(add_meal)
            .service(get_meal)
            .service(update_meal)
            .service(delete_meal),
    );
}
