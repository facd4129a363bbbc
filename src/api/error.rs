//! JSON error envelopes.
//!
//! Every failure leaves the server as `{ "error": ..., "details"?: ..., "results"?: ... }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::domain::aggregates::OrderItemResult;
use crate::StorefrontError;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<OrderItemResult>>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self { Self { error: error.into(), details: None, results: None } }

    pub fn details(mut self, details: impl Into<Value>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl IntoResponse for StorefrontError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::InvalidInput { message, issues } => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new(message).details(serde_json::to_value(issues).unwrap_or_default()),
            ),
            Self::RecorderUnavailable => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new("Google Sheets connection failed").details("Please check your Google Sheets configuration"),
            ),
            Self::PartialFailure(results) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody { results: Some(results), ..ErrorBody::new("Some orders failed to process") },
            ),
            Self::ProductNotFound => (StatusCode::NOT_FOUND, ErrorBody::new("Product not found")),
            Self::NotificationFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new("Failed to send message").details("Email notification could not be sent"),
            ),
            Self::Storage { context, source } => {
                // Don't expose database details to clients
                tracing::error!(error = %source, "{context}");
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::new(context))
            }
        };
        (status, Json(body)).into_response()
    }
}
