use crate::api::errors::ApiError;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::issue_token;
use crate::auth::JwtConfig;
use crate::db::{RepositoryError, UserOperations};
use crate::enums::users::AuthResponse;
use crate::models::user::{NewUser, Role};
use crate::validators::user::{validate_signin, validate_signup, SigninPayload, SignupPayload};
use actix_web::{post, web, HttpResponse};

const SIGNUP_OK: &str = "User created successfully";
const SIGNIN_OK: &str = "Signed in successfully";

async fn signup_with_role(
    user_ops: web::Data<UserOperations>,
    jwt_cfg: web::Data<JwtConfig>,
    payload: SignupPayload,
    role: Role,
) -> Result<HttpResponse, ApiError> {
    let signup = validate_signup(&payload)?;
    let email = signup.email.clone();

    let ops = user_ops.clone();
    let user = web::block(move || {
        // Hashing is CPU bound.
        let password_hash = hash_password(&signup.password)
            .map_err(|e| RepositoryError::PasswordHash(e.to_string()))?;
        ops.create_user(NewUser {
            name: signup.name,
            email: signup.email,
            password_hash,
            role: role.as_str().to_string(),
        })
    })
    .await??;

    let token = issue_token(user.user_id, &jwt_cfg).map_err(|e| {
        error!("AUTH: signup(): unable to issue token: {}", e);
        ApiError::Internal(e.to_string())
    })?;
    info!("AUTH: signup(): new {} account {}", role, email);
    Ok(HttpResponse::Created().json(AuthResponse::new(SIGNUP_OK, token, user.profile())))
}

#[utoipa::path(
    post,
    tag = "Auth",
    path = "/api/v1/auth/signup",
    request_body = SignupPayload,
    responses(
        (status = 201, description = "Customer account created", body = AuthResponse),
        (status = 400, description = "Invalid request data", body = crate::api::errors::ErrorResponse),
        (status = 409, description = "Email already in use", body = crate::api::errors::ErrorResponse)
    ),
    summary = "Create a customer account"
)]
#[post("/signup")]
pub async fn customer_signup(
    user_ops: web::Data<UserOperations>,
    jwt_cfg: web::Data<JwtConfig>,
    payload: web::Json<SignupPayload>,
) -> Result<HttpResponse, ApiError> {
    signup_with_role(user_ops, jwt_cfg, payload.into_inner(), Role::Customer).await
}

#[utoipa::path(
    post,
    tag = "Auth",
    path = "/api/v1/caterer/auth/signup",
    request_body = SignupPayload,
    responses(
        (status = 201, description = "Caterer account created", body = AuthResponse),
        (status = 400, description = "Invalid request data", body = crate::api::errors::ErrorResponse),
        (status = 409, description = "Email already in use", body = crate::api::errors::ErrorResponse)
    ),
    summary = "Create a caterer account"
)]
#[post("/signup")]
pub async fn caterer_signup(
    user_ops: web::Data<UserOperations>,
    jwt_cfg: web::Data<JwtConfig>,
    payload: web::Json<SignupPayload>,
) -> Result<HttpResponse, ApiError> {
    signup_with_role(user_ops, jwt_cfg, payload.into_inner(), Role::Caterer).await
}

#[utoipa::path(
    post,
    tag = "Auth",
    path = "/api/v1/auth/signin",
    request_body = SigninPayload,
    responses(
        (status = 200, description = "Token issued", body = AuthResponse),
        (status = 401, description = "Invalid email or password", body = crate::api::errors::ErrorResponse)
    ),
    summary = "Sign in (also served at /api/v1/caterer/auth/signin)"
)]
#[post("/signin")]
pub async fn signin(
    user_ops: web::Data<UserOperations>,
    jwt_cfg: web::Data<JwtConfig>,
    payload: web::Json<SigninPayload>,
) -> Result<HttpResponse, ApiError> {
    let credentials = validate_signin(&payload)?;

    let ops = user_ops.clone();
    let user = web::block(move || {
        let user = match ops.get_user_by_email(&credentials.email) {
            Ok(user) => user,
            Err(RepositoryError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e),
        };
        Ok(verify_password(&credentials.password, &user.password_hash).then_some(user))
    })
    .await??;

    let Some(user) = user else {
        debug!("AUTH: signin(): rejected credentials");
        return Err(ApiError::InvalidCredentials);
    };

    let token = issue_token(user.user_id, &jwt_cfg).map_err(|e| {
        error!("AUTH: signin(): unable to issue token: {}", e);
        ApiError::Internal(e.to_string())
    })?;
    Ok(HttpResponse::Ok().json(AuthResponse::new(SIGNIN_OK, token, user.profile())))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/auth").service(customer_signup).service(signin))
        .service(
            web::scope("/caterer/auth")
                .service(caterer_signup)
                .service(signin),
        );
}
