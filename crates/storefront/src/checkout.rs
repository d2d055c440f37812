//! Simulated checkout.
//!
//! No payment is taken. Confirming an order produces a receipt with a random
//! order number; the caller is expected to validate the contact form (via
//! [`ContactDetails::parse`]) before confirming.

use chrono::{DateTime, Utc};
use istore_core::{ContactDetails, Price};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::cart::Cart;

/// Upper bound (exclusive) for generated order numbers.
pub const ORDER_NUMBER_LIMIT: u32 = 100_000;

/// Errors that can occur when confirming an order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("Cannot check out an empty cart")]
    EmptyCart,
}

/// Receipt for a confirmed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_number: u32,
    pub customer_name: String,
    pub email: String,
    pub shipping_address: String,
    pub item_count: u64,
    pub total: Price,
    pub placed_at: DateTime<Utc>,
}

/// Build the confirmation for `cart`. Does not modify the cart.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` if the cart has no items.
pub fn confirm(cart: &Cart, contact: &ContactDetails) -> Result<OrderConfirmation, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let confirmation = OrderConfirmation {
        order_number: rand::rng().random_range(0..ORDER_NUMBER_LIMIT),
        customer_name: contact.name().to_owned(),
        email: contact.email().to_owned(),
        shipping_address: contact.address().to_owned(),
        item_count: cart.item_count(),
        total: cart.total(),
        placed_at: Utc::now(),
    };

    info!(
        order_number = confirmation.order_number,
        items = confirmation.item_count,
        total = %confirmation.total,
        "Order confirmed"
    );
    Ok(confirmation)
}
