use crate::api::errors::ApiError;
use crate::auth::principal::Principal;
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures::future::{ready, Ready};

/// Any authenticated caller.
pub struct AuthUser(pub Principal);

impl FromRequest for AuthUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        if let Some(p) = req.extensions().get::<Principal>() {
            return ready(Ok(AuthUser(p.clone())));
        }
        ready(Err(ApiError::Unauthenticated))
    }
}

/// A caterer or super admin. Place it before body extractors so role failures win.
pub struct AdminPrincipal(pub Principal);

impl FromRequest for AdminPrincipal {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        if let Some(p) = req.extensions().get::<Principal>() {
            if p.is_admin() {
                return ready(Ok(AdminPrincipal(p.clone())));
            }
            debug!(
                "AUTH: admin_principal(): user {} with role {} refused",
                p.user_id, p.role
            );
            return ready(Err(ApiError::Forbidden));
        }
        ready(Err(ApiError::Unauthenticated))
    }
}
