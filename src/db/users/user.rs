use crate::db::errors::RepositoryError;
use crate::db::schema::users::dsl::*;
use crate::db::{DbConnection, DbPool};
use crate::models::user::{NewUser, User};
use diesel::prelude::*;
use log::error;

pub const EMAIL_TAKEN: &str = "Email already in use";

#[derive(Clone)]
pub struct UserOperations {
    pool: DbPool,
}

impl UserOperations {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn create_user(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("create_user: failed to acquire DB connection: {}", e);
            e
        })?;

        diesel::insert_into(users)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(conn.connection())
            .map_err(|e| {
                error!(
                    "create_user: error inserting new user with email '{}': {}",
                    new_user.email, e
                );
                RepositoryError::from_write(e, EMAIL_TAKEN)
            })
    }

    pub fn get_user(&self, id: i32) -> Result<User, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("get_user: failed to acquire DB connection for id {}: {}", id, e);
            e
        })?;

        users
            .find(id)
            .select(User::as_select())
            .first(conn.connection())
            .map_err(|e| RepositoryError::from_lookup(e, "User not found"))
    }

    pub fn get_user_by_email(&self, email_addr: &str) -> Result<User, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool)?;

        users
            .filter(email.eq(email_addr))
            .select(User::as_select())
            .first(conn.connection())
            .map_err(|e| {
                if !matches!(e, diesel::result::Error::NotFound) {
                    error!(
                        "get_user_by_email: error fetching user with email '{}': {}",
                        email_addr, e
                    );
                }
                RepositoryError::from_lookup(e, "User not found")
            })
    }

    /// Inserts the account unless the email is already registered. Returns whether a row was added.
    pub fn ensure_user(&self, new_user: NewUser) -> Result<bool, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("ensure_user: failed to acquire DB connection: {}", e);
            e
        })?;

        diesel::insert_into(users)
            .values(&new_user)
            .on_conflict(email)
            .do_nothing()
            .execute(conn.connection())
            .map(|inserted| inserted > 0)
            .map_err(|e| {
                error!("ensure_user: error inserting '{}': {}", new_user.email, e);
                RepositoryError::DatabaseError(e)
            })
    }
}
