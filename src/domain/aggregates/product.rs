//! Product Aggregate
//!
//! `Product` is the catalog row served by `/api/products`; `ProductSnapshot` is
//! the slice of it a cart line and an order request carry around.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Money;

#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub image: String,
    pub rating: Decimal,
    pub reviews: i32,
    pub category: String,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub description: String,
    pub quantity: i32,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    pub fn snapshot(&self) -> ProductSnapshot { ProductSnapshot::from(self) }
}

/// Product reference held by a cart line and sent with an order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProductSnapshot {
    pub fn unit_price(&self) -> Money { Money::store(self.price) }
}

impl From<&Product> for ProductSnapshot {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id, name: p.name.clone(), price: p.price,
            category: Some(p.category.clone()), description: Some(p.description.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tee() -> Product {
        Product {
            id: 7, name: "Vintage Tee".into(), price: Decimal::new(2500, 0), image: "/img/tee.jpg".into(),
            rating: Decimal::new(45, 1), reviews: 12, category: "Shirts".into(),
            sizes: vec!["S".into(), "M".into()], colors: vec!["Red".into()], description: "Washed cotton".into(),
            quantity: 3, is_active: true, created_at: None, updated_at: None,
        }
    }

    #[test]
    fn test_snapshot_carries_reference_fields() {
        let snap = tee().snapshot();
        assert_eq!(snap.id, 7);
        assert_eq!(snap.category.as_deref(), Some("Shirts"));
        assert_eq!(snap.unit_price().amount(), Decimal::new(2500, 0));
    }

    #[test]
    fn test_snapshot_accepts_string_or_number_price() {
        let a: ProductSnapshot = serde_json::from_str(r#"{"id":1,"name":"Cap","price":"19.50"}"#).unwrap();
        let b: ProductSnapshot = serde_json::from_str(r#"{"id":1,"name":"Cap","price":19.5}"#).unwrap();
        assert_eq!(a.price, b.price);
        assert!(a.category.is_none());
    }
}
