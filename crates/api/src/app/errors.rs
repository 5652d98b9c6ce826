use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use catalog_infra::CreateProductError;
use catalog_infra::document_store::PersistenceError;

pub fn create_product_error_to_response(err: CreateProductError) -> axum::response::Response {
    match err {
        CreateProductError::Validation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        CreateProductError::Persistence(PersistenceError::Cancelled) => json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "cancelled",
            "request cancelled before commit",
        ),
        CreateProductError::Persistence(PersistenceError::Conflict(msg)) => {
            json_error(StatusCode::CONFLICT, "conflict", msg)
        }
        CreateProductError::Persistence(e) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "persistence_error",
            e.to_string(),
        ),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
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
    fn maps_error_kinds_to_status() {
        let cases = [
            (CreateProductError::Validation("Name is required".into()), StatusCode::BAD_REQUEST),
            (PersistenceError::Cancelled.into(), StatusCode::SERVICE_UNAVAILABLE),
            (PersistenceError::Conflict("dup".into()).into(), StatusCode::CONFLICT),
            (PersistenceError::Storage("down".into()).into(), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(create_product_error_to_response(err).status(), status);
        }
    }
}
