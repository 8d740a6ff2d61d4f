use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::{r2d2, PgConnection, RunQueryDsl};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::time::Duration;

mod admin;
mod common;
mod errors;
pub mod schema;
mod users;

pub use admin::meal::MealOperations;
pub use admin::menu::{MenuOperations, MenuSetupOutcome};
pub use common::orders::{OrderOperations, OrderTotalWindow, MENU_NOT_SET};
pub use errors::RepositoryError;
pub use users::user::UserOperations;

pub type DbPool = Pool<ConnectionManager<PgConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Applies `statement_timeout` to every connection handed out by the pool.
#[derive(Debug, Clone, Copy)]
struct StatementTimeout {
    millis: u64,
}

impl CustomizeConnection<PgConnection, r2d2::Error> for StatementTimeout {
    fn on_acquire(&self, conn: &mut PgConnection) -> Result<(), r2d2::Error> {
        diesel::sql_query(format!("SET statement_timeout = {}", self.millis))
            .execute(conn)
            .map(|_| ())
            .map_err(r2d2::Error::QueryError)
    }
}

pub fn establish_connection_pool(
    database_url: &str,
    max_size: u32,
    timeout: Duration,
) -> Result<DbPool, RepositoryError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);

    Pool::builder()
        .max_size(max_size)
        .connection_timeout(timeout)
        .connection_customizer(Box::new(StatementTimeout {
            millis: timeout.as_millis() as u64,
        }))
        .build(manager)
        .map_err(RepositoryError::ConnectionPoolError)
}

pub fn run_db_migrations(pool: DbPool) -> Result<(), RepositoryError> {
    let mut conn = DbConnection::new(&pool)?;
    let applied = conn
        .connection()
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| RepositoryError::Migration(e.to_string()))?;
    if !applied.is_empty() {
        info!("Applied {} database migrations", applied.len());
    }
    Ok(())
}

// Connection Guard - Manages pool
pub struct DbConnection<'a> {
    conn: r2d2::PooledConnection<ConnectionManager<PgConnection>>,
    _lifetime: std::marker::PhantomData<&'a ()>,
}

impl DbConnection<'_> {
    pub fn new(pool: &DbPool) -> Result<Self, RepositoryError> {
        Ok(Self {
            conn: pool.get().map_err(RepositoryError::ConnectionPoolError)?,
            _lifetime: std::marker::PhantomData,
        })
    }

    pub fn connection(&mut self) -> &mut PgConnection {
        &mut self.conn
    }
}
