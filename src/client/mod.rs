//! Session-side half of the pipeline: cart persistence, the checkout
//! controller and the HTTP gateway it submits through.

pub mod checkout;
pub mod gateway;
pub mod storage;

pub use checkout::{CheckoutController, CheckoutError, Notice, NoticeVariant, OrderPlaced};
pub use gateway::HttpOrderGateway;
pub use storage::{FileCartStorage, MemoryCartStorage};
