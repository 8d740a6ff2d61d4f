use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::{header, Method};
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures::future::LocalBoxFuture;
use serde::Deserialize;

use crate::api::errors::ApiError;
use crate::auth::config::JwtConfig;
use crate::auth::token::{verify_token, TokenError};
use crate::auth::Principal;
use crate::db::{RepositoryError, UserOperations};

const API_PREFIX: &str = "/api/v1";

#[derive(Clone)]
pub struct AuthLayer {
    jwt_cfg: JwtConfig,
    user_ops: UserOperations,
}

impl AuthLayer {
    pub fn new(jwt_cfg: JwtConfig, user_ops: UserOperations) -> Self {
        Self { jwt_cfg, user_ops }
    }
}

/// Routes that are served without a token.
pub fn is_public_route(method: &Method, path: &str) -> bool {
    let path = path.trim_end_matches('/');
    if path.is_empty() || path == API_PREFIX {
        return true;
    }
    let Some(rest) = path.strip_prefix(API_PREFIX) else {
        return false;
    };
    if rest.starts_with("/auth/") || rest.starts_with("/caterer/auth/") {
        return true;
    }
    if *method == Method::GET {
        return rest == "/meals" || rest.starts_with("/meals/") || rest.starts_with("/docs/");
    }
    false
}

#[derive(Deserialize)]
struct BodyToken {
    token: Option<String>,
}

fn header_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Reads `token` from a JSON body and puts the bytes back for the handler.
async fn body_token(req: &mut ServiceRequest) -> Option<String> {
    if req.content_type() != "application/json" {
        return None;
    }
    let bytes = match req.extract::<web::Bytes>().await {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!("AUTH: body_token(): unable to read body: {}", e);
            return None;
        }
    };
    let token = serde_json::from_slice::<BodyToken>(&bytes)
        .ok()
        .and_then(|b| b.token)
        .filter(|t| !t.trim().is_empty());

    let (_, mut payload) = actix_http::h1::Payload::create(true);
    payload.unread_data(bytes);
    req.set_payload(payload.into());
    token
}

impl<S, B> Transform<S, ServiceRequest> for AuthLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddleware {
            service: Rc::new(service),
            inner: self.clone(),
        }))
    }
}

pub struct AuthMiddleware<S> {
    service: Rc<S>,
    inner: AuthLayer,
}

impl<S, B> Service<ServiceRequest> for AuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        if is_public_route(req.method(), req.path()) {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) });
        }

        let inner = self.inner.clone();
        let srv = self.service.clone();
        Box::pin(async move {
            let token = match header_token(&req) {
                Some(token) => Some(token),
                None => body_token(&mut req).await,
            };
            let Some(token) = token else {
                return Ok(reject(req, ApiError::MissingToken));
            };

            let user_id = match verify_token(&token, &inner.jwt_cfg) {
                Ok(id) => id,
                Err(TokenError::Expired) => return Ok(reject(req, ApiError::TokenExpired)),
                Err(e) => {
                    debug!("AUTH: call(): rejected token on {}: {}", req.path(), e);
                    return Ok(reject(req, ApiError::Unauthenticated));
                }
            };

            let user_ops = inner.user_ops.clone();
            let user = match web::block(move || user_ops.get_user(user_id)).await {
                Ok(Ok(user)) => user,
                Ok(Err(RepositoryError::NotFound(_))) => {
                    warn!("AUTH: call(): token for missing user {}", user_id);
                    return Ok(reject(req, ApiError::Unauthenticated));
                }
                Ok(Err(e)) => return Ok(reject(req, ApiError::from(e))),
                Err(e) => return Ok(reject(req, ApiError::from(e))),
            };

            req.extensions_mut().insert(Principal {
                user_id: user.user_id,
                role: user.role(),
            });
            srv.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}

fn reject<B>(req: ServiceRequest, err: ApiError) -> ServiceResponse<EitherBody<B>> {
    req.into_response(err.error_response()).map_into_right_body()
}
