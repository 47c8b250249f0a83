use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use kennywood_core::DomainError;
use kennywood_infra::StoreError;

pub fn store_error_to_response(err: StoreError) -> Response {
    match err {
        StoreError::NotFound { .. } => json_error(StatusCode::NOT_FOUND, "not_found", err.to_string()),
        StoreError::InvalidReference(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        StoreError::Storage(msg) => {
            tracing::error!(error = %msg, "record store failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", msg)
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::Forbidden(msg) => json_error(StatusCode::FORBIDDEN, "forbidden", msg),
    }
}

/// Missing fields, wrong types or a non-JSON body.
pub fn body_rejection_to_response(rejection: JsonRejection) -> Response {
    json_error(StatusCode::BAD_REQUEST, "invalid_body", rejection.body_text())
}

pub fn query_rejection_to_response(rejection: QueryRejection) -> Response {
    json_error(StatusCode::BAD_REQUEST, "invalid_query", rejection.body_text())
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_onto_the_status_taxonomy() {
        let cases = [
            (StoreError::NotFound { kind: "attraction", id: 1 }, StatusCode::NOT_FOUND),
            (StoreError::InvalidReference("area 3".into()), StatusCode::BAD_REQUEST),
            (StoreError::Storage("disk".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(store_error_to_response(err).status(), status);
        }
    }

    #[test]
    fn domain_errors_map_onto_the_status_taxonomy() {
        let cases = [
            (DomainError::validation("x"), StatusCode::BAD_REQUEST),
            (DomainError::invalid_id("x"), StatusCode::BAD_REQUEST),
            (DomainError::forbidden("x"), StatusCode::FORBIDDEN),
        ];
        for (err, status) in cases {
            assert_eq!(domain_error_to_response(err).status(), status);
        }
    }
}
