use crate::auth::JwtConfig;
use crate::db::OrderTotalWindow;
use crate::services::calendar::parse_tz_offset;
use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use dotenvy::var;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

/// Reads and parses `key`, falling back to `default` when unset.
pub fn env_or<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::Invalid(key, format!("'{}': {}", raw, e))),
        Err(_) => Ok(default),
    }
}

/// Like [`env_or`], but zero is rejected.
pub fn positive_env_or<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + Default + PartialEq,
    T::Err: Display,
{
    let value = env_or(key, default)?;
    if value == T::default() {
        return Err(ConfigError::Invalid(key, "must be positive".into()));
    }
    Ok(value)
}

/// Business rules for orders that depend on deployment.
#[derive(Clone, Debug)]
pub struct OrderSettings {
    pub tz: FixedOffset,
    pub total_window: OrderTotalWindow,
    pub edit_window: Option<chrono::Duration>,
}

impl OrderSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_tz = var("SERVICE_TZ_OFFSET").unwrap_or_else(|_| "+00:00".to_string());
        let tz = parse_tz_offset(&raw_tz)
            .ok_or_else(|| ConfigError::Invalid("SERVICE_TZ_OFFSET", raw_tz.clone()))?;

        let total_window = match var("ORDER_TOTAL_WINDOW") {
            Ok(raw) => OrderTotalWindow::get_enum_from_str(raw.trim())
                .ok_or(ConfigError::Invalid("ORDER_TOTAL_WINDOW", raw))?,
            Err(_) => OrderTotalWindow::Today,
        };

        let edit_window = match var("ORDER_EDIT_WINDOW_SECS") {
            Ok(raw) if !raw.trim().is_empty() => {
                let secs: i64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::Invalid("ORDER_EDIT_WINDOW_SECS", raw.clone()))?;
                if secs <= 0 {
                    return Err(ConfigError::Invalid("ORDER_EDIT_WINDOW_SECS", raw));
                }
                Some(chrono::Duration::seconds(secs))
            }
            _ => None,
        };

        Ok(Self {
            tz,
            total_window,
            edit_window,
        })
    }

    pub fn today(&self) -> NaiveDate {
        crate::services::calendar::today(self.tz)
    }
}

impl Default for OrderSettings {
    fn default() -> Self {
        Self {
            tz: Utc.fix(),
            total_window: OrderTotalWindow::Today,
            edit_window: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SuperAdminConfig {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SuperAdminConfig {
    /// Present only when both email and password are set.
    pub fn from_env() -> Option<Self> {
        let email = var("SUPER_ADMIN_EMAIL").ok().filter(|v| !v.trim().is_empty())?;
        let password = var("SUPER_ADMIN_PASSWORD").ok().filter(|v| !v.is_empty())?;
        let name = var("SUPER_ADMIN_NAME").unwrap_or_else(|_| "Super Admin".to_string());
        Some(Self {
            name,
            email: email.trim().to_lowercase(),
            password,
        })
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub pool_size: u32,
    pub db_timeout: Duration,
    pub jwt: JwtConfig,
    pub orders: OrderSettings,
    pub super_admin: Option<SuperAdminConfig>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
        let host = var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env_or("PORT", 8080u16)?;
        let pool_size = positive_env_or("DB_POOL_SIZE", 20u32)?;
        // r2d2 panics on a zero checkout timeout
        let db_timeout = Duration::from_secs(positive_env_or("DB_TIMEOUT_SECS", 5u64)?);

        Ok(Self {
            database_url,
            host,
            port,
            pool_size,
            db_timeout,
            jwt: JwtConfig::from_env()?,
            orders: OrderSettings::from_env()?,
            super_admin: SuperAdminConfig::from_env(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_not_positive() {
        std::env::set_var("BAM_TEST_ZERO_SECS", "0");
        assert_eq!(
            positive_env_or("BAM_TEST_ZERO_SECS", 5u64),
            Err(ConfigError::Invalid("BAM_TEST_ZERO_SECS", "must be positive".into()))
        );

        std::env::set_var("BAM_TEST_SOME_SECS", " 30 ");
        assert_eq!(positive_env_or("BAM_TEST_SOME_SECS", 5u64), Ok(30));
        assert_eq!(positive_env_or("BAM_TEST_UNSET_SECS", 5u64), Ok(5));
    }
}
