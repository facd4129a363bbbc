//! Order Aggregate
//!
//! An [`OrderSubmissionRequest`] is what checkout sends; the endpoint fans it
//! out into one [`OrderRecord`] per line, each recorded and notified on its own.

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::aggregates::cart::CartItem;
use crate::domain::aggregates::product::ProductSnapshot;
use crate::domain::validation::{flatten, FieldIssue};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BillingDetails {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(alias = "wilaya")]
    #[validate(length(min = 1, message = "Wilaya is required"))]
    pub region: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "Street address is required"))]
    pub street_address: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
    #[validate(email(message = "Valid email is required"))]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product: ProductSnapshot,
    #[validate(length(min = 1, message = "Size is required"))]
    pub selected_size: String,
    #[validate(length(min = 1, message = "Color is required"))]
    pub selected_color: String,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i64,
}

impl From<&CartItem> for OrderLine {
    fn from(item: &CartItem) -> Self {
        Self {
            product: item.product.clone(),
            selected_size: item.selected_size.clone(),
            selected_color: item.selected_color.clone(),
            quantity: i64::from(item.quantity),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderSubmissionRequest {
    #[validate]
    pub billing_details: BillingDetails,
    #[validate]
    pub items: Vec<OrderLine>,
}

impl OrderSubmissionRequest {
    pub fn new(billing_details: BillingDetails, items: &[CartItem]) -> Self {
        Self { billing_details, items: items.iter().map(OrderLine::from).collect() }
    }

    /// Full schema check, run before any collaborator is contacted.
    pub fn check(&self) -> Result<(), Vec<FieldIssue>> {
        let mut issues = match self.validate() {
            Ok(()) => vec![],
            Err(errors) => flatten(&errors),
        };
        if self.items.is_empty() {
            issues.push(FieldIssue::new("items", "length", "At least one item is required"));
        }
        // a recorded row carries the quantity as u32
        for (index, line) in self.items.iter().enumerate() {
            if line.quantity > i64::from(u32::MAX) {
                issues.push(FieldIssue::new(format!("items.{index}.quantity"), "range", "Quantity is too large"));
            }
        }
        if issues.is_empty() { Ok(()) } else { Err(issues) }
    }
}

/// One spreadsheet row: a single product line of an order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub order_date: DateTime<Utc>,
    pub customer_name: String,
    pub region: String,
    pub city: String,
    pub street_address: String,
    pub phone: String,
    pub email: String,
    pub product_name: String,
    pub size: String,
    pub color: String,
    pub price: Decimal,
    pub quantity: u32,
    pub order_notes: String,
}

impl OrderRecord {
    pub fn from_line(billing: &BillingDetails, line: &OrderLine, order_date: DateTime<Utc>) -> Self {
        Self {
            order_date,
            customer_name: billing.name.clone(),
            region: billing.region.clone(),
            city: billing.city.clone(),
            street_address: billing.street_address.clone(),
            phone: billing.phone.clone(),
            email: billing.email.clone(),
            product_name: line.product.name.clone(),
            size: line.selected_size.clone(),
            color: line.selected_color.clone(),
            price: line.product.price,
            // `check` keeps quantity within 1..=u32::MAX
            quantity: u32::try_from(line.quantity).unwrap_or_default(),
            order_notes: billing.order_notes.clone().unwrap_or_default(),
        }
    }

    /// `orderDate` in the same millisecond ISO-8601 form browsers produce.
    pub fn order_date_iso(&self) -> String { self.order_date.to_rfc3339_opts(SecondsFormat::Millis, true) }
}

/// Outcome of one order line, reported back in request order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResult {
    pub success: bool,
    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_sent: Option<bool>,
}

impl OrderItemResult {
    pub fn recorded(product_name: impl Into<String>, email_sent: bool) -> Self {
        Self {
            success: true, product_name: product_name.into(),
            message: Some("Order added to Google Sheets successfully".into()),
            error: None, email_sent: Some(email_sent),
        }
    }

    pub fn failed(product_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self { success: false, product_name: product_name.into(), message: None, error: Some(error.into()), email_sent: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn billing() -> BillingDetails {
        BillingDetails {
            name: "Amina B".into(), region: "Algiers".into(), city: "Bab Ezzouar".into(),
            street_address: "12 Rue des Oliviers".into(), phone: "0555123456".into(),
            email: "amina@example.com".into(), order_notes: None,
        }
    }

    fn line(qty: i64) -> OrderLine {
        OrderLine {
            product: ProductSnapshot { id: 1, name: "Denim Jacket".into(), price: Decimal::new(4500, 0), category: None, description: None },
            selected_size: "M".into(), selected_color: "Blue".into(), quantity: qty,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        let req = OrderSubmissionRequest { billing_details: billing(), items: vec![line(2)] };
        assert!(req.check().is_ok());
    }

    #[test]
    fn test_invalid_email_rejected() {
        let mut b = billing();
        b.email = "not-an-email".into();
        let issues = OrderSubmissionRequest { billing_details: b, items: vec![line(1)] }.check().unwrap_err();
        assert!(issues.iter().any(|i| i.code == "email" && i.message == "Valid email is required"));
    }

    #[test]
    fn test_empty_items_and_bad_lines_rejected() {
        let issues = OrderSubmissionRequest { billing_details: billing(), items: vec![] }.check().unwrap_err();
        assert!(issues.iter().any(|i| i.path == "items"));

        let mut bad = line(0);
        bad.selected_size.clear();
        let issues = OrderSubmissionRequest { billing_details: billing(), items: vec![bad] }.check().unwrap_err();
        assert!(issues.iter().any(|i| i.message == "Quantity must be at least 1"));
        assert!(issues.iter().any(|i| i.message == "Size is required"));
    }

    #[test]
    fn test_quantity_beyond_u32_rejected() {
        let issues = OrderSubmissionRequest { billing_details: billing(), items: vec![line(5_000_000_000)] }.check().unwrap_err();
        assert!(issues.iter().any(|i| i.code == "range" && i.message == "Quantity is too large"));
        assert!(OrderSubmissionRequest { billing_details: billing(), items: vec![line(i64::from(u32::MAX))] }.check().is_ok());
    }

    #[test]
    fn test_wilaya_alias_accepted() {
        let json = r#"{"name":"A","wilaya":"Oran","city":"Oran","streetAddress":"1 Rue","phone":"05","email":"a@b.dz"}"#;
        let b: BillingDetails = serde_json::from_str(json).unwrap();
        assert_eq!(b.region, "Oran");
        assert!(b.order_notes.is_none());
    }

    #[test]
    fn test_record_from_line() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        let mut b = billing();
        b.order_notes = Some("Call before delivery".into());
        let rec = OrderRecord::from_line(&b, &line(3), at);
        assert_eq!(rec.product_name, "Denim Jacket");
        assert_eq!(rec.quantity, 3);
        assert_eq!(rec.order_notes, "Call before delivery");
        assert_eq!(rec.order_date_iso(), "2024-03-09T14:05:00.000Z");
    }

    #[test]
    fn test_result_wire_shape() {
        let ok = serde_json::to_value(OrderItemResult::recorded("Cap", false)).unwrap();
        assert_eq!(ok["success"], true);
        assert_eq!(ok["emailSent"], false);
        assert!(ok.get("error").is_none());
        let failed = serde_json::to_value(OrderItemResult::failed("Cap", "quota exceeded")).unwrap();
        assert_eq!(failed["error"], "quota exceeded");
        assert!(failed.get("emailSent").is_none());
    }
}
