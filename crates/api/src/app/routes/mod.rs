use axum::{routing::get, Router};

pub mod areas;
pub mod attractions;
pub mod itineraries;
pub mod system;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/areas", areas::router())
        .nest("/attractions", attractions::router())
        .nest("/itineraries", itineraries::router())
}

/// Handlers short-circuit with a ready error response.
pub type HandlerResult = Result<axum::response::Response, axum::response::Response>;

/// Parse a path segment into a typed id (400 on garbage).
pub fn parse_id<T>(raw: &str) -> Result<T, axum::response::Response>
where
    T: core::str::FromStr<Err = kennywood_core::DomainError>,
{
    raw.parse().map_err(super::errors::domain_error_to_response)
}

/// Unwrap an extracted JSON body (400 on missing fields or bad JSON).
pub fn read_body<T>(
    body: Result<axum::Json<T>, axum::extract::rejection::JsonRejection>,
) -> Result<T, axum::response::Response> {
    body.map(|axum::Json(v)| v)
        .map_err(super::errors::body_rejection_to_response)
}

/// Unwrap extracted query parameters (400 on duplicates or wrong shape).
pub fn read_query<T>(
    query: Result<axum::extract::Query<T>, axum::extract::rejection::QueryRejection>,
) -> Result<T, axum::response::Response> {
    query
        .map(|axum::extract::Query(v)| v)
        .map_err(super::errors::query_rejection_to_response)
}
