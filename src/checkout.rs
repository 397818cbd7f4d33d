//! Checkout details

pub use validator::{Validate, ValidationErrors};

use crate::payment::PaymentMethod;

/// Shipping, contact and payment-method fields collected at checkout.
///
/// Validation is schema-driven: submission is blocked until every
/// constraint passes, and the per-field messages are surfaced inline by
/// the form. A validated value is handed verbatim to the checkout flow;
/// this type never talks to the backend itself.
#[derive(Clone, Debug, PartialEq, Validate)]
pub struct CheckoutDetails {
    /// Recipient full name.
    #[validate(length(min = 2, message = "Full name must be at least 2 characters"))]
    pub full_name: String,

    /// Contact email address.
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,

    /// Contact phone number.
    #[validate(length(min = 8, message = "Phone number must be at least 8 digits"))]
    pub phone: String,

    /// Shipping country.
    #[validate(length(min = 2, message = "Country must be at least 2 characters"))]
    pub country: String,

    /// Shipping city.
    #[validate(length(min = 2, message = "City must be at least 2 characters"))]
    pub city: String,

    /// Shipping street address.
    #[validate(length(min = 2, message = "Street must be at least 2 characters"))]
    pub street: String,

    /// Payment route chosen in the form.
    pub payment: PaymentMethod,
}
