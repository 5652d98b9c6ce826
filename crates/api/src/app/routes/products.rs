use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use tokio_util::sync::CancellationToken;

use catalog_products::CreateProductCommand;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/", post(create_product))
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(shutdown): Extension<CancellationToken>,
    Json(body): Json<dto::CreateProductRequest>,
) -> axum::response::Response {
    let cancel = shutdown.child_token();

    match services
        .create_product(CreateProductCommand::from(body), &cancel)
        .await
    {
        Ok(result) => (
            StatusCode::CREATED,
            Json(dto::CreateProductResponse::from(result)),
        )
            .into_response(),
        Err(e) => errors::create_product_error_to_response(e),
    }
}
