#[macro_use]
extern crate log;
extern crate pretty_env_logger;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer};
use book_a_meal::config::AppConfig;
use book_a_meal::{configure, AppState};
use dotenvy::dotenv;
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = dotenv() {
        eprintln!("Failed to load .env file: {}", e);
    }

    // Setup logging
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    let cfg = AppConfig::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;

    info!("Initializing database connection pool...");
    let state = AppState::new(&cfg).map_err(|e| {
        error!("Unable to initialise database: {}", e);
        io::Error::new(io::ErrorKind::Other, e.to_string())
    })?;

    info!("Starting server at http://{}:{}", cfg.host, cfg.port);

    HttpServer::new(move || {
        App::new()
            .wrap(state.auth_layer())
            .wrap(Logger::default())
            .configure(|c| configure(c, &state))
    })
    .bind((cfg.host.as_str(), cfg.port))?
    .run()
    .await
}
