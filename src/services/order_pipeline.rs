//! Order submission pipeline
//!
//! Validates a request, checks the spreadsheet is reachable, then records and
//! notifies each line in request order. Lines are independent: a failed line
//! does not stop the rest and recorded lines are never rolled back.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use crate::domain::aggregates::{OrderItemResult, OrderRecord, OrderSubmissionRequest};
use crate::domain::validation::FieldIssue;
use crate::ports::{NotificationSender, SpreadsheetRecorder};

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("invalid order data")]
    Invalid(Vec<FieldIssue>),

    #[error("spreadsheet is unreachable")]
    RecorderUnavailable,
}

/// Per-line outcomes, in request order.
#[derive(Clone, Debug, PartialEq)]
pub struct SubmissionReport {
    pub results: Vec<OrderItemResult>,
}

impl SubmissionReport {
    pub fn all_recorded(&self) -> bool { self.results.iter().all(|r| r.success) }
    pub fn failed_count(&self) -> usize { self.results.iter().filter(|r| !r.success).count() }
}

#[derive(Clone)]
pub struct OrderPipeline {
    recorder: Arc<dyn SpreadsheetRecorder>,
    notifier: Arc<dyn NotificationSender>,
}

impl OrderPipeline {
    pub fn new(recorder: Arc<dyn SpreadsheetRecorder>, notifier: Arc<dyn NotificationSender>) -> Self {
        Self { recorder, notifier }
    }

    pub fn recorder(&self) -> &Arc<dyn SpreadsheetRecorder> { &self.recorder }
    pub fn notifier(&self) -> &Arc<dyn NotificationSender> { &self.notifier }

    pub async fn submit(&self, request: &OrderSubmissionRequest) -> Result<SubmissionReport, SubmissionError> {
        request.check().map_err(SubmissionError::Invalid)?;

        if !self.recorder.test_connection().await {
            tracing::error!(lines = request.items.len(), "Spreadsheet unreachable, order not processed");
            return Err(SubmissionError::RecorderUnavailable);
        }

        let mut results = Vec::with_capacity(request.items.len());
        for line in &request.items {
            let record = OrderRecord::from_line(&request.billing_details, line, Utc::now());
            results.push(self.process(&record).await);
        }

        let report = SubmissionReport { results };
        if report.all_recorded() {
            tracing::info!(lines = report.results.len(), customer = %request.billing_details.name, "Order submitted");
        } else {
            tracing::warn!(failed = report.failed_count(), lines = report.results.len(), "Order partially recorded");
        }
        Ok(report)
    }

    async fn process(&self, record: &OrderRecord) -> OrderItemResult {
        if let Err(e) = self.recorder.append_record(record).await {
            tracing::error!(product = %record.product_name, error = %e, "Error processing order line");
            return OrderItemResult::failed(record.product_name.clone(), e.to_string());
        }
        let email_sent = self.notifier.notify_order(record).await;
        if !email_sent {
            tracing::warn!(product = %record.product_name, "Order recorded without email notification");
        }
        OrderItemResult::recorded(record.product_name.clone(), email_sent)
    }
}
