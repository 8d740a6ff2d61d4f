use crate::auth::config::JwtConfig;
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,
    #[error("verification error: {0}")]
    Invalid(String),
    #[error("signing error: {0}")]
    Sign(String),
}

#[derive(Serialize, Deserialize)]
struct Claims {
    iss: String,
    aud: String,
    sub: String, // user_id
    iat: u64,
    exp: u64,
}

pub fn issue_token(user_id: i32, cfg: &JwtConfig) -> Result<String, TokenError> {
    let now = Utc::now().timestamp().max(0) as u64;
    let claims = Claims {
        iss: cfg.issuer.clone(),
        aud: cfg.audience.clone(),
        sub: user_id.to_string(),
        iat: now,
        exp: now.saturating_add(cfg.expiry_secs),
    };
    let header = Header::new(Algorithm::HS256);
    encode(
        &header,
        &claims,
        &EncodingKey::from_secret(cfg.secret.as_bytes()),
    )
    .map_err(|e| TokenError::Sign(e.to_string()))
}

/// Verifies signature, issuer, audience and expiry, returning the user id in `sub`.
pub fn verify_token(token: &str, cfg: &JwtConfig) -> Result<i32, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[cfg.issuer.as_str()]);
    validation.set_audience(&[cfg.audience.as_str()]);
    validation.leeway = 0;
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(cfg.secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid(e.to_string()),
    })?;
    data.claims
        .sub
        .parse()
        .map_err(|e| TokenError::Invalid(format!("invalid sub: {e}")))
}
