//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: handler + document store wiring
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request/response DTOs and mapping to commands
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router.
///
/// `shutdown` is the process-wide token; each request gets a child of it, so
/// cancelling it aborts in-flight commits.
pub fn build_app(services: Arc<AppServices>, shutdown: CancellationToken) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(Extension(services))
                .layer(Extension(shutdown)),
        )
}
