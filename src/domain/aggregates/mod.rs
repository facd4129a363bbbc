//! Aggregates module
pub mod product;
pub mod order;
pub mod cart;
pub mod contact;

pub use product::{Product, ProductSnapshot};
pub use order::{BillingDetails, OrderItemResult, OrderLine, OrderRecord, OrderSubmissionRequest};
pub use cart::{CartItem, CartStore, CART_STORAGE_KEY};
pub use contact::ContactMessage;
