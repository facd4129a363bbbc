//! Contact form relay.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::{json, Value};

use super::{orders::invalid_body, AppState};
use crate::domain::aggregates::ContactMessage;
use crate::{Result, StorefrontError};

pub async fn contact_message(
    State(s): State<AppState>,
    body: std::result::Result<Json<ContactMessage>, JsonRejection>,
) -> Result<Json<Value>> {
    let Json(message) = body.map_err(|r| invalid_body("Invalid contact message data", &r))?;
    message
        .check()
        .map_err(|issues| StorefrontError::InvalidInput { message: "Invalid contact message data", issues })?;

    if !s.pipeline.notifier().send_contact_message(&message).await {
        return Err(StorefrontError::NotificationFailed);
    }
    Ok(Json(json!({"success": true, "message": "Message sent successfully"})))
}
