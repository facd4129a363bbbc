//! Vintage Storefront
//!
//! Backend for a small clothing storefront whose orders land in a Google
//! Sheet and the owner's inbox.
//!
//! ## Features
//! - Read-only product catalog (PostgreSQL)
//! - Session-side cart with pluggable persistence
//! - Checkout controller with local validation
//! - Order pipeline: one spreadsheet row and one email per order line
//! - Contact form relayed by email

use thiserror::Error;

pub mod adapters;
pub mod api;
pub mod client;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{router, AppState};
pub use config::StorefrontConfig;

use crate::domain::aggregates::OrderItemResult;
use crate::domain::validation::FieldIssue;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum StorefrontError {
    /// Request body failed schema validation; nothing was sent anywhere.
    #[error("{message}")]
    InvalidInput { message: &'static str, issues: Vec<FieldIssue> },

    #[error("Google Sheets connection failed")]
    RecorderUnavailable,

    /// At least one line was not recorded. Carries every line's result.
    #[error("Some orders failed to process")]
    PartialFailure(Vec<OrderItemResult>),

    #[error("Product not found")]
    ProductNotFound,

    #[error("Failed to send message")]
    NotificationFailed,

    #[error("{context}: {source}")]
    Storage { context: &'static str, #[source] source: sqlx::Error },
}

pub type Result<T> = std::result::Result<T, StorefrontError>;
