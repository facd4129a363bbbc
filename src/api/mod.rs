//! HTTP surface.

use axum::{routing::{get, post}, Json, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::services::OrderPipeline;

pub mod contact;
pub mod error;
pub mod orders;
pub mod products;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub pipeline: OrderPipeline,
    pub sheet_id: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "vintage-storefront"})) }))
        .route("/api/products", get(products::list_products))
        .route("/api/products/:id", get(products::get_product))
        .route("/api/submit-order", post(orders::submit_order))
        .route("/api/contact-message", post(contact::contact_message))
        .route("/api/test-google-sheets", get(orders::test_google_sheets))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use serde_json::Value;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::{router, AppState};
    use crate::services::OrderPipeline;
    use crate::testing::{FakeNotifier, FakeRecorder};

    /// Router over fakes; the pool points at a closed port and fails fast.
    pub fn app(recorder: Arc<FakeRecorder>, notifier: Arc<FakeNotifier>) -> Router {
        let db = PgPoolOptions::new()
            .acquire_timeout(Duration::from_secs(2))
            .connect_lazy("postgres://shop@127.0.0.1:9/shop")
            .unwrap();
        router(AppState { db, pipeline: OrderPipeline::new(recorder, notifier), sheet_id: "sheet-test".into() })
    }

    pub async fn send(app: Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
        (status, json)
    }
}
