//! HTTP client for `POST /api/submit-order`.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::aggregates::{OrderItemResult, OrderSubmissionRequest};
use crate::ports::{GatewayError, OrderGateway, SubmissionReceipt};

const SUBMIT_PATH: &str = "/api/submit-order";

/// Error envelope the order service returns on 4xx/5xx.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    results: Vec<OrderItemResult>,
}

#[derive(Clone)]
pub struct HttpOrderGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpOrderGateway {
    /// `base_url` is the storefront origin, e.g. `https://shop.example.dz`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        Ok(Self { client, endpoint: format!("{}{SUBMIT_PATH}", base_url.trim_end_matches('/')) })
    }

    pub fn endpoint(&self) -> &str { &self.endpoint }
}

#[async_trait]
impl OrderGateway for HttpOrderGateway {
    async fn submit_order(&self, request: &OrderSubmissionRequest) -> Result<SubmissionReceipt, GatewayError> {
        let response = self.client.post(&self.endpoint).json(request).send().await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| GatewayError::Transport(e.to_string()))?;

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|e| GatewayError::Transport(format!("unreadable response: {e}")));
        }

        let rejected = serde_json::from_str::<ErrorBody>(&body).unwrap_or_else(|_| ErrorBody {
            error: format!("Order service returned {status}"),
            results: vec![],
        });
        Err(GatewayError::Rejected { status: status.as_u16(), error: rejected.error, results: rejected.results })
    }
}
