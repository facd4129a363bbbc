//! Google Sheets spreadsheet recorder.
//!
//! Talks to the Sheets v4 REST API with a bearer token. Every append first
//! makes sure the 13-column header row is in place; nothing is cached between
//! calls, so a sheet cleared by hand is repaired on the next order.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::json;

use crate::config::SheetsConfig;
use crate::domain::aggregates::OrderRecord;
use crate::ports::{RecorderError, SpreadsheetRecorder};

pub const SHEET_HEADERS: [&str; 13] = [
    "Order Date",
    "Customer Name",
    "Wilaya",
    "City",
    "Street Address",
    "Phone",
    "Email",
    "Product Name",
    "Size",
    "Color",
    "Price",
    "Quantity",
    "Order Notes",
];

const HEADER_RANGE: &str = "A1:M1";
const APPEND_RANGE: &str = "A:M";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Default, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

#[derive(Clone)]
pub struct GoogleSheetsRecorder {
    client: reqwest::Client,
    api_base: String,
    sheet_id: String,
}

impl GoogleSheetsRecorder {
    /// # Errors
    ///
    /// Returns error if the access token is not a valid header value or the
    /// HTTP client fails to build.
    pub fn new(config: &SheetsConfig) -> Result<Self, RecorderError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.access_token.expose_secret()))
            .map_err(|e| RecorderError::Transport(format!("invalid access token: {e}")))?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| RecorderError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            sheet_id: config.sheet_id.clone(),
        })
    }

    fn spreadsheet_url(&self) -> String { format!("{}/v4/spreadsheets/{}", self.api_base, self.sheet_id) }

    fn values_url(&self, range: &str) -> String { format!("{}/values/{range}", self.spreadsheet_url()) }

    /// Write the header row unless row 1 already has all 13 columns.
    async fn ensure_header_row(&self) -> Result<(), RecorderError> {
        let response = self.client.get(self.values_url(HEADER_RANGE)).send().await.map_err(transport)?;
        let current: ValueRange = ok_or_rejected(response).await?.json().await.map_err(transport)?;

        if current.values.first().map_or(0, Vec::len) == SHEET_HEADERS.len() {
            return Ok(());
        }

        tracing::info!(sheet_id = %self.sheet_id, "Writing order sheet header row");
        let response = self.client
            .put(self.values_url(HEADER_RANGE))
            .query(&[("valueInputOption", "RAW")])
            .json(&json!({ "values": [SHEET_HEADERS] }))
            .send()
            .await
            .map_err(transport)?;
        ok_or_rejected(response).await?;
        Ok(())
    }
}

/// Cells in header order; everything is written as RAW text.
pub fn sheet_row(record: &OrderRecord) -> [String; 13] {
    [
        record.order_date_iso(),
        record.customer_name.clone(),
        record.region.clone(),
        record.city.clone(),
        record.street_address.clone(),
        record.phone.clone(),
        record.email.clone(),
        record.product_name.clone(),
        record.size.clone(),
        record.color.clone(),
        record.price.to_string(),
        record.quantity.to_string(),
        record.order_notes.clone(),
    ]
}

#[async_trait]
impl SpreadsheetRecorder for GoogleSheetsRecorder {
    async fn test_connection(&self) -> bool {
        let result = self.client
            .get(self.spreadsheet_url())
            .query(&[("fields", "spreadsheetId")])
            .send()
            .await;
        match result {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                tracing::error!(sheet_id = %self.sheet_id, status = %response.status(), "Google Sheets connection test failed");
                false
            }
            Err(e) => {
                tracing::error!(sheet_id = %self.sheet_id, error = %e, "Google Sheets connection test failed");
                false
            }
        }
    }

    async fn append_record(&self, record: &OrderRecord) -> Result<(), RecorderError> {
        self.ensure_header_row().await?;

        let response = self.client
            .post(self.values_url(&format!("{APPEND_RANGE}:append")))
            .query(&[("valueInputOption", "RAW"), ("insertDataOption", "INSERT_ROWS")])
            .json(&json!({ "values": [sheet_row(record)] }))
            .send()
            .await
            .map_err(transport)?;
        ok_or_rejected(response).await?;

        tracing::info!(product = %record.product_name, "Order added to Google Sheets");
        Ok(())
    }
}

fn transport(e: reqwest::Error) -> RecorderError { RecorderError::Transport(e.to_string()) }

async fn ok_or_rejected(response: reqwest::Response) -> Result<reqwest::Response, RecorderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(RecorderError::Rejected { status: status.as_u16(), message })
}
