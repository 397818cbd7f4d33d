//! Checkout flow errors.

use thiserror::Error;
use vitrine::{checkout::ValidationErrors, order::OrderError};

use crate::api::ApiError;

/// Errors surfaced by the checkout flow.
///
/// `EmptyCart` and `CartUnavailable` instruct the caller to leave the
/// checkout view and return to the cart; the rest keep the user on the
/// form so they can resubmit.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout was opened over a cart with no lines.
    #[error("your cart is empty")]
    EmptyCart,

    /// The authoritative cart could not be fetched.
    #[error("could not load your cart")]
    CartUnavailable(#[source] ApiError),

    /// A submission is already in flight; this one was not started.
    #[error("a submission is already in progress")]
    AlreadyProcessing,

    /// The checkout details failed schema validation.
    #[error("checkout details failed validation")]
    InvalidDetails(#[from] ValidationErrors),

    /// The submission could not be assembled.
    #[error(transparent)]
    Assembly(#[from] OrderError),

    /// The backend refused or failed the order creation.
    #[error("order could not be created")]
    OrderCreation(#[source] ApiError),

    /// The order exists but the payment intent could not be created.
    #[error("payment could not be started for order {order_id}")]
    PaymentIntent {
        /// The order awaiting a payment route.
        order_id: String,

        /// The backend failure.
        #[source]
        source: ApiError,
    },
}
