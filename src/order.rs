//! Order submission

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::{cart::Cart, checkout::CheckoutDetails, payment::PaymentMethod};

/// Errors related to order assembly.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Assembly was attempted over a cart with no lines.
    #[error("Cannot assemble an order from an empty cart")]
    EmptyCart,
}

/// One line of an order submission, reduced to what the backend keys on.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    product_id: String,
    quantity: u32,
    color: Option<String>,
}

impl OrderLine {
    /// Returns the product identifier.
    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    /// Returns the ordered quantity.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the color selection, if any.
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }
}

/// The finalized payload sent to create a backend order record.
///
/// Assembled once per checkout attempt from the cart snapshot and the
/// validated checkout details; a failed attempt is not retried with a
/// cached payload, the caller resubmits instead.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSubmission {
    payment_method: PaymentMethod,
    recipient_name: String,
    phone_number: String,
    email: String,
    street: String,
    city: String,
    country: String,
    items: Vec<OrderLine>,
    #[serde(with = "rust_decimal::serde::float")]
    total_amount: Decimal,
}

impl OrderSubmission {
    /// Assemble a submission from a cart snapshot and checkout details.
    ///
    /// Recipient fields are trimmed of surrounding whitespace, lines are
    /// reduced to product, quantity and color, and the total is carried
    /// from the cart.
    ///
    /// # Errors
    ///
    /// Returns an `OrderError::EmptyCart` if the cart has no lines.
    pub fn assemble(cart: &Cart, details: &CheckoutDetails) -> Result<Self, OrderError> {
        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let items = cart
            .iter()
            .map(|line| OrderLine {
                product_id: line.product_id().to_owned(),
                quantity: line.quantity(),
                color: line.color().map(str::to_owned),
            })
            .collect();

        Ok(OrderSubmission {
            payment_method: details.payment,
            recipient_name: details.full_name.trim().to_owned(),
            phone_number: details.phone.trim().to_owned(),
            email: details.email.trim().to_owned(),
            street: details.street.trim().to_owned(),
            city: details.city.trim().to_owned(),
            country: details.country.trim().to_owned(),
            items,
            total_amount: cart.total(),
        })
    }

    /// Returns the chosen payment route.
    #[must_use]
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// Returns the submission lines.
    pub fn items(&self) -> &[OrderLine] {
        &self.items
    }

    /// Returns the total carried from the cart.
    #[must_use]
    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }
}

/// The backend's record of a created order.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedOrder {
    /// Backend order identifier.
    pub order_id: String,

    /// Total the backend recorded for the order.
    pub total_amount: Decimal,
}
