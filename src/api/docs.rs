use crate::api::errors::ErrorResponse;
use crate::api::{auth, meals, menu, orders};
use crate::db::OrderTotalWindow;
use crate::enums::meals::{MealListResponse, MealResponse};
use crate::enums::menus::MenuResponse;
use crate::enums::orders::{OrderListResponse, OrderResponse, OrderTotalResponse};
use crate::enums::users::AuthResponse;
use crate::enums::MessageResponse;
use crate::models::meal::Meal;
use crate::models::menu::{Menu, MenuWithMeals};
use crate::models::order::Order;
use crate::models::user::{Role, UserProfile};
use crate::validators::meal::MealPayload;
use crate::validators::menu::{MealRef, MenuPayload};
use crate::validators::order::OrderPayload;
use crate::validators::user::{SigninPayload, SignupPayload};
use crate::validators::Numeric;
use actix_web::{get, web, HttpResponse, Responder};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Book-A-Meal API", description = "Daily menus and meal orders"),
    paths(
        crate::api::welcome,
        auth::customer_signup,
        auth::caterer_signup,
        auth::signin,
        meals::list_meals,
        meals::get_meal,
        meals::add_meal,
        meals::update_meal,
        meals::delete_meal,
        menu::setup_menu,
        menu::get_menu,
        orders::list_orders,
        orders::create_order,
        orders::update_order,
        orders::total_amount,
        orders::own_history,
        orders::user_history,
    ),
    components(schemas(
        ErrorResponse,
        MessageResponse,
        AuthResponse,
        MealResponse,
        MealListResponse,
        MenuResponse,
        OrderResponse,
        OrderListResponse,
        OrderTotalResponse,
        OrderTotalWindow,
        Meal,
        Menu,
        MenuWithMeals,
        Order,
        Role,
        UserProfile,
        MealPayload,
        MenuPayload,
        MealRef,
        Numeric,
        OrderPayload,
        SignupPayload,
        SigninPayload,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "Auth", description = "Sign up and sign in"),
        (name = "Meals", description = "Meal catalogue"),
        (name = "Menu", description = "Daily menu"),
        (name = "Orders", description = "Meal orders")
    )
)]
pub struct ApiDoc;

#[get("/openapi.json")]
async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/docs").service(openapi_json));
}
