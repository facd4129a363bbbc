//! Checkout form controller
//!
//! Checks the billing form and the cart locally, then hands the order to an
//! [`OrderGateway`]. The cart is cleared only once the service confirms every
//! line; on any failure it is left untouched so the shopper can resubmit.

use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;

use crate::domain::aggregates::{BillingDetails, CartStore, OrderItemResult, OrderSubmissionRequest};
use crate::ports::{CartStorage, GatewayError, OrderGateway};

/// Where the shopper lands after a placed order.
pub const AFTER_ORDER_REDIRECT: &str = "/";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeVariant { Success, Destructive }

/// Toast shown to the shopper.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    fn success(title: &str, description: &str) -> Self {
        Self { title: title.into(), description: description.into(), variant: NoticeVariant::Success }
    }
    fn destructive(title: &str, description: impl Into<String>) -> Self {
        Self { title: title.into(), description: description.into(), variant: NoticeVariant::Destructive }
    }
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("cart is empty")]
    EmptyCart,

    #[error("an order is already being submitted")]
    AlreadyProcessing,

    #[error(transparent)]
    Submission(#[from] GatewayError),
}

impl CheckoutError {
    /// True when the service was never contacted.
    pub fn is_local(&self) -> bool { !matches!(self, Self::Submission(_)) }

    pub fn notice(&self) -> Notice {
        match self {
            Self::MissingFields(_) => Notice::destructive("Please fill in all required fields", "All fields marked with * are required."),
            Self::EmptyCart => Notice::destructive("Your cart is empty", "Add a product to your cart before checking out."),
            Self::AlreadyProcessing => Notice::destructive("Order in progress", "Please wait for your order to finish processing."),
            Self::Submission(err @ GatewayError::Rejected { .. }) => {
                let failed = err.failed_products();
                let description = if failed.is_empty() { err.to_string() } else { format!("{err}: {}", failed.join(", ")) };
                Notice::destructive("Order failed", description)
            }
            Self::Submission(GatewayError::Transport(reason)) => {
                Notice::destructive("Order failed", format!("{reason}. Please try again later."))
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrderPlaced {
    pub notice: Notice,
    pub redirect: &'static str,
    pub results: Vec<OrderItemResult>,
}

pub struct CheckoutController<G: OrderGateway> {
    gateway: G,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag however the submission ends.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) { self.0.store(false, Ordering::Release); }
}

impl<G: OrderGateway> CheckoutController<G> {
    pub fn new(gateway: G) -> Self { Self { gateway, in_flight: AtomicBool::new(false) } }

    pub fn is_processing(&self) -> bool { self.in_flight.load(Ordering::Acquire) }

    pub async fn submit<S: CartStorage>(&self, form: &BillingDetails, cart: &mut CartStore<S>) -> Result<OrderPlaced, CheckoutError> {
        let missing = missing_fields(form);
        if !missing.is_empty() {
            return Err(CheckoutError::MissingFields(missing));
        }
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        if self.in_flight.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire).is_err() {
            return Err(CheckoutError::AlreadyProcessing);
        }
        let _guard = InFlight(&self.in_flight);

        let mut billing = form.clone();
        billing.order_notes = billing.order_notes.filter(|n| !n.trim().is_empty());
        let request = OrderSubmissionRequest::new(billing, cart.items());

        match self.gateway.submit_order(&request).await {
            Ok(receipt) => {
                tracing::info!(lines = request.items.len(), message = %receipt.message, "Order placed");
                cart.clear();
                Ok(OrderPlaced {
                    notice: Notice::success("Order completed successfully!", "Your order has been placed and will be delivered soon."),
                    redirect: AFTER_ORDER_REDIRECT,
                    results: receipt.results,
                })
            }
            Err(e) => {
                tracing::warn!(error = %e, "Order submission failed, cart kept for retry");
                Err(e.into())
            }
        }
    }
}

fn missing_fields(form: &BillingDetails) -> Vec<&'static str> {
    [
        ("name", &form.name),
        ("region", &form.region),
        ("city", &form.city),
        ("streetAddress", &form.street_address),
        ("phone", &form.phone),
        ("email", &form.email),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| field)
    .collect()
}
