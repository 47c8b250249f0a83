//! HTTP API application wiring (Axum router + service wiring).
//!
//! This folder is structured like:
//! - `services.rs`: record store wiring (in-memory or Postgres) + lookup helpers
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: request DTOs, self links and JSON rendering
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use kennywood_infra::StoreResult;

use crate::config::ApiConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(config: &ApiConfig) -> StoreResult<Router> {
    let services = services::build_services(config).await?;
    Ok(router(config, services))
}

/// Assemble the router around already-built services.
pub fn router(config: &ApiConfig, services: services::AppServices) -> Router {
    let jwt = Arc::new(kennywood_auth::Hs256JwtValidator::new(config.jwt_secret.as_bytes()));
    let auth_state = middleware::AuthState { jwt };

    // Protected routes: require a valid bearer token.
    let protected = routes::router()
        .layer(Extension(Arc::new(services)))
        .layer(Extension(dto::PublicUrl(config.public_url.clone())))
        .route_layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(protected)
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::request_log)))
}
