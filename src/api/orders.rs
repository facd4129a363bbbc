//! Order submission and the spreadsheet connectivity probe.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use super::AppState;
use crate::domain::aggregates::OrderSubmissionRequest;
use crate::domain::validation::FieldIssue;
use crate::services::SubmissionError;
use crate::{Result, StorefrontError};

/// Turn a body that never reached validation into the same 400 envelope.
pub(super) fn invalid_body(message: &'static str, rejection: &JsonRejection) -> StorefrontError {
    StorefrontError::InvalidInput { message, issues: vec![FieldIssue::new("", "invalid_json", rejection.body_text())] }
}

pub async fn submit_order(
    State(s): State<AppState>,
    body: std::result::Result<Json<OrderSubmissionRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let Json(request) = body.map_err(|r| invalid_body("Invalid order data", &r))?;

    let report = s.pipeline.submit(&request).await.map_err(|e| match e {
        SubmissionError::Invalid(issues) => StorefrontError::InvalidInput { message: "Invalid order data", issues },
        SubmissionError::RecorderUnavailable => StorefrontError::RecorderUnavailable,
    })?;

    if !report.all_recorded() {
        return Err(StorefrontError::PartialFailure(report.results));
    }
    Ok(Json(json!({
        "success": true,
        "message": "Order submitted successfully",
        "results": report.results,
    })))
}

pub async fn test_google_sheets(State(s): State<AppState>) -> (StatusCode, Json<Value>) {
    if s.pipeline.recorder().test_connection().await {
        (StatusCode::OK, Json(json!({"success": true, "message": "Google Sheets connection successful", "sheetId": s.sheet_id})))
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "Google Sheets connection failed", "sheetId": s.sheet_id})))
    }
}
