use crate::config::{env_or, ConfigError};
use dotenvy::var;

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub expiry_secs: u64,
}

impl JwtConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
        if secret.trim().is_empty() {
            return Err(ConfigError::Invalid("JWT_SECRET", "must not be empty".to_string()));
        }
        let issuer = var("JWT_ISSUER").unwrap_or_else(|_| "book-a-meal".to_string());
        let audience = var("JWT_AUDIENCE").unwrap_or_else(|_| "book-a-meal-api".to_string());
        // One day by default
        let expiry_secs = env_or("JWT_EXPIRY_SECS", 24 * 60 * 60)?;
        Ok(Self {
            secret,
            issuer,
            audience,
            expiry_secs,
        })
    }
}
