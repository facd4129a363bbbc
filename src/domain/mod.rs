//! Storefront domain: catalog, cart and order types.

pub mod aggregates;
pub mod validation;
pub mod value_objects;
