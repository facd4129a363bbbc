//! Contact form message

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::validation::{flatten, FieldIssue};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ContactMessage {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(custom = "blank_or_email")]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
    #[serde(skip_deserializing, default = "Utc::now")]
    pub received_at: DateTime<Utc>,
}

impl ContactMessage {
    pub fn check(&self) -> Result<(), Vec<FieldIssue>> {
        self.validate().map_err(|e| flatten(&e))
    }
}

/// An empty email is accepted; anything else has to look like an address.
fn blank_or_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() || validator::validate_email(email) {
        return Ok(());
    }
    let mut err = ValidationError::new("email");
    err.message = Some("Valid email is required".into());
    Err(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ContactMessage { serde_json::from_str(json).unwrap() }

    #[test]
    fn test_email_optional_or_blank() {
        assert!(parse(r#"{"name":"Sofia","message":"Hello"}"#).check().is_ok());
        assert!(parse(r#"{"name":"Sofia","email":"","message":"Hello"}"#).check().is_ok());
        assert!(parse(r#"{"name":"Sofia","email":"sofia@example.com","message":"Hello"}"#).check().is_ok());
    }

    #[test]
    fn test_bad_email_and_missing_message() {
        let issues = parse(r#"{"name":"Sofia","email":"nope","message":""}"#).check().unwrap_err();
        assert!(issues.iter().any(|i| i.message == "Valid email is required"));
        assert!(issues.iter().any(|i| i.message == "Message is required"));
    }
}
