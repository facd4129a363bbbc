//! Ports: what the order pipeline, the cart and checkout need from the outside world.
//!
//! Adapters implement these in `crate::adapters` (server side) and
//! `crate::client` (session side). Tests substitute in-memory fakes.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::aggregates::{ContactMessage, OrderItemResult, OrderRecord, OrderSubmissionRequest};

#[derive(Debug, Error)]
pub enum RecorderError {
    #[error("spreadsheet request failed: {0}")]
    Transport(String),

    #[error("spreadsheet rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Durable tabular store receiving one row per order line.
#[async_trait]
pub trait SpreadsheetRecorder: Send + Sync {
    /// Cheap reachability check run once per submission before any append.
    async fn test_connection(&self) -> bool;

    /// Append one row. `Err` means the row was not durably stored.
    async fn append_record(&self, record: &OrderRecord) -> Result<(), RecorderError>;
}

/// Best-effort human notification. Implementations log their own failures and
/// report only whether something was dispatched.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    async fn notify_order(&self, record: &OrderRecord) -> bool;

    async fn send_contact_message(&self, message: &ContactMessage) -> bool;
}

#[derive(Debug, Error)]
pub enum CartStorageError {
    #[error("cart storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cart storage unavailable: {0}")]
    Unavailable(String),
}

/// Session-local persistence for the serialized cart.
pub trait CartStorage {
    fn load(&self) -> Result<Option<String>, CartStorageError>;
    fn save(&self, payload: &str) -> Result<(), CartStorageError>;
}

#[derive(Debug, Error)]
pub enum GatewayError {
    /// The order service answered with an error envelope.
    #[error("{error}")]
    Rejected { status: u16, error: String, results: Vec<OrderItemResult> },

    #[error("could not reach the order service: {0}")]
    Transport(String),
}

impl GatewayError {
    /// Product names of the lines the service reported as not recorded.
    pub fn failed_products(&self) -> Vec<&str> {
        match self {
            Self::Rejected { results, .. } => results.iter().filter(|r| !r.success).map(|r| r.product_name.as_str()).collect(),
            Self::Transport(_) => vec![],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SubmissionReceipt {
    pub message: String,
    #[serde(default)]
    pub results: Vec<OrderItemResult>,
}

/// Checkout's view of the order submission endpoint.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn submit_order(&self, request: &OrderSubmissionRequest) -> Result<SubmissionReceipt, GatewayError>;
}
