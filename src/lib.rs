#[macro_use]
extern crate log;

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod enums;
pub mod models;
pub mod services;
pub mod test_utils;
pub mod validators;

use crate::auth::password::hash_password;
use crate::auth::{AuthLayer, JwtConfig};
use crate::config::{AppConfig, OrderSettings, SuperAdminConfig};
use crate::db::{
    establish_connection_pool, run_db_migrations, DbPool, MealOperations, MenuOperations,
    OrderOperations, RepositoryError, UserOperations,
};
use crate::models::user::{NewUser, Role};
use crate::services::in_flight::InFlightRequests;

pub use api::configure;

#[derive(Clone)]
pub struct AppState {
    pub user_ops: UserOperations,
    pub meal_ops: MealOperations,
    pub menu_ops: MenuOperations,
    pub order_ops: OrderOperations,
    pub jwt: JwtConfig,
    pub orders: OrderSettings,
    pub in_flight: InFlightRequests,
}

impl AppState {
    /// Builds the pool, applies migrations and creates the super admin account if configured.
    pub fn new(cfg: &AppConfig) -> Result<Self, RepositoryError> {
        let pool = establish_connection_pool(&cfg.database_url, cfg.pool_size, cfg.db_timeout)?;
        run_db_migrations(pool.clone())?;
        let state = Self::from_pool(pool, cfg.jwt.clone(), cfg.orders.clone());
        if let Some(admin) = &cfg.super_admin {
            state.bootstrap_super_admin(admin)?;
        }
        Ok(state)
    }

    pub fn from_pool(pool: DbPool, jwt: JwtConfig, orders: OrderSettings) -> Self {
        AppState {
            user_ops: UserOperations::new(pool.clone()),
            meal_ops: MealOperations::new(pool.clone()),
            menu_ops: MenuOperations::new(pool.clone()),
            order_ops: OrderOperations::new(pool),
            jwt,
            orders,
            in_flight: InFlightRequests::new(),
        }
    }

    pub fn auth_layer(&self) -> AuthLayer {
        AuthLayer::new(self.jwt.clone(), self.user_ops.clone())
    }

    fn bootstrap_super_admin(&self, admin: &SuperAdminConfig) -> Result<(), RepositoryError> {
        let created = self.user_ops.ensure_user(NewUser {
            name: admin.name.clone(),
            email: admin.email.clone(),
            password_hash: hash_password(&admin.password)
                .map_err(|e| RepositoryError::PasswordHash(e.to_string()))?,
            role: Role::SuperAdmin.as_str().to_string(),
        })?;
        if created {
            info!("Created super admin account {}", admin.email);
        } else {
            debug!("Super admin account {} already present", admin.email);
        }
        Ok(())
    }
}
