//! # Evolance Portal API Server
//!
//! HTTP surface of the research portal: configuration, application state,
//! middleware and the route table. The binary in `main.rs` wires these
//! together; integration tests mount the same routes against in-memory
//! state.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod state;
pub mod telemetry;

use actix_cors::Cors;

use config::CorsOrigins;

/// CORS layer for the configured origins.
pub fn cors(origins: &CorsOrigins) -> Cors {
    match origins {
        CorsOrigins::Any => Cors::permissive(),
        CorsOrigins::List(list) => list
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allow_any_method()
            .allow_any_header()
            .supports_credentials()
            .max_age(3600),
    }
}
