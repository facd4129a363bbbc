//! Catalog reads.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};

use super::AppState;
use crate::domain::aggregates::Product;
use crate::{Result, StorefrontError};

pub async fn list_products(State(s): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE is_active = true ORDER BY id")
        .fetch_all(&s.db)
        .await
        .map_err(|source| StorefrontError::Storage { context: "Failed to fetch products", source })?;
    Ok(Json(products))
}

/// A non-numeric id cannot name a product, so it is reported as not found.
pub async fn get_product(State(s): State<AppState>, id: std::result::Result<Path<i32>, PathRejection>) -> Result<Json<Product>> {
    let Ok(Path(id)) = id else { return Err(StorefrontError::ProductNotFound) };
    sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1 AND is_active = true")
        .bind(id)
        .fetch_optional(&s.db)
        .await
        .map_err(|source| StorefrontError::Storage { context: "Failed to fetch product", source })?
        .map(Json)
        .ok_or(StorefrontError::ProductNotFound)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;

    use crate::api::test_support::{app, send};
    use crate::testing::{FakeNotifier, FakeRecorder};

    #[tokio::test]
    async fn test_catalog_unavailable_is_500() {
        let app = app(Arc::new(FakeRecorder::default()), Arc::new(FakeNotifier::default()));
        let (status, body) = send(app, "GET", "/api/products", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to fetch products");
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_not_found() {
        let app = app(Arc::new(FakeRecorder::default()), Arc::new(FakeNotifier::default()));
        let (status, body) = send(app, "GET", "/api/products/abc", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Product not found");
    }
}
