//! In-memory collaborators shared by the pipeline and router tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::aggregates::{BillingDetails, ContactMessage, OrderLine, OrderRecord, OrderSubmissionRequest, ProductSnapshot};
use crate::ports::{NotificationSender, RecorderError, SpreadsheetRecorder};

pub fn billing() -> BillingDetails {
    BillingDetails {
        name: "Samir H".into(), region: "Constantine".into(), city: "Constantine".into(),
        street_address: "14 Rue Larbi Ben M'hidi".into(), phone: "0770123456".into(),
        email: "samir@example.com".into(), order_notes: None,
    }
}

pub fn order_request(products: &[&str]) -> OrderSubmissionRequest {
    let items = products
        .iter()
        .zip(1..)
        .map(|(name, id)| OrderLine {
            product: ProductSnapshot { id, name: (*name).to_string(), price: Decimal::new(1500, 0), category: None, description: None },
            selected_size: "M".into(),
            selected_color: "Black".into(),
            quantity: 1,
        })
        .collect();
    OrderSubmissionRequest { billing_details: billing(), items }
}

#[derive(Default)]
pub struct FakeRecorder {
    unreachable: bool,
    failing: HashSet<String>,
    checks: AtomicUsize,
    appended: Mutex<Vec<OrderRecord>>,
}

impl FakeRecorder {
    pub fn unreachable() -> Self { Self { unreachable: true, ..Self::default() } }

    pub fn failing_on(products: &[&str]) -> Self {
        Self { failing: products.iter().map(|p| (*p).to_string()).collect(), ..Self::default() }
    }

    pub fn connection_checks(&self) -> usize { self.checks.load(Ordering::SeqCst) }

    pub fn product_names(&self) -> Vec<String> {
        self.appended.lock().unwrap().iter().map(|r| r.product_name.clone()).collect()
    }
}

#[async_trait]
impl SpreadsheetRecorder for FakeRecorder {
    async fn test_connection(&self) -> bool {
        self.checks.fetch_add(1, Ordering::SeqCst);
        !self.unreachable
    }

    async fn append_record(&self, record: &OrderRecord) -> Result<(), RecorderError> {
        if self.failing.contains(&record.product_name) {
            return Err(RecorderError::Rejected { status: 429, message: "quota exceeded".into() });
        }
        self.appended.lock().unwrap().push(record.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeNotifier {
    undeliverable: bool,
    orders: AtomicUsize,
    contacts: Mutex<Vec<ContactMessage>>,
}

impl FakeNotifier {
    pub fn undeliverable() -> Self { Self { undeliverable: true, ..Self::default() } }
    pub fn order_count(&self) -> usize { self.orders.load(Ordering::SeqCst) }
    pub fn contacts(&self) -> Vec<ContactMessage> { self.contacts.lock().unwrap().clone() }
}

#[async_trait]
impl NotificationSender for FakeNotifier {
    async fn notify_order(&self, _record: &OrderRecord) -> bool {
        self.orders.fetch_add(1, Ordering::SeqCst);
        !self.undeliverable
    }

    async fn send_contact_message(&self, message: &ContactMessage) -> bool {
        self.contacts.lock().unwrap().push(message.clone());
        !self.undeliverable
    }
}
