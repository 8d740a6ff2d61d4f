pub mod config;
pub mod extractors;
pub mod middleware;
pub mod password;
pub mod policy;
pub mod principal;
pub mod token;

pub use config::JwtConfig;
pub use extractors::{AdminPrincipal, AuthUser};
pub use middleware::AuthLayer;
pub use principal::Principal;
