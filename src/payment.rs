//! Payment routing

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Errors related to payment method selection.
#[derive(Debug, Error)]
pub enum PaymentMethodError {
    /// The submitted selection is not one of the accepted form values.
    #[error("Unknown payment method selection {0:?}")]
    UnknownSelection(String),
}

/// The two payment routes the storefront offers.
///
/// The variant is decided once, at form-submit time, so an unmapped string
/// can never reach an order-creation call. [`PaymentMethod::backend_name`]
/// is the single point of truth for the backend vocabulary.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PaymentMethod {
    /// Pay the courier on delivery; the order completes immediately.
    CashOnDelivery,

    /// Pay by card via a payment intent and the provider's confirmation page.
    CreditCard,
}

/// Form value for the cash-on-delivery selector.
const COD_SELECTION: &str = "cod";

/// Form value for the card selector.
const CARD_SELECTION: &str = "CreditCard";

impl PaymentMethod {
    /// Returns the backend's name for this payment method.
    #[must_use]
    pub fn backend_name(self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "Cash",
            PaymentMethod::CreditCard => "CreditCard",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = PaymentMethodError;

    fn from_str(selection: &str) -> Result<Self, Self::Err> {
        match selection {
            COD_SELECTION => Ok(PaymentMethod::CashOnDelivery),
            CARD_SELECTION => Ok(PaymentMethod::CreditCard),
            other => Err(PaymentMethodError::UnknownSelection(other.to_owned())),
        }
    }
}

impl Serialize for PaymentMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.backend_name())
    }
}

/// A backend-issued token for an authorized-but-unconfirmed card charge.
///
/// Created only for card payments and consumed by the downstream payment
/// provider integration.
#[derive(Clone, Debug, PartialEq)]
pub struct PaymentIntent {
    /// Intent identifier, when the backend returns one.
    pub intent_id: Option<String>,

    /// Client secret handed to the provider's confirmation page.
    pub client_secret: String,

    /// Amount the intent authorizes.
    pub amount: Decimal,

    /// The order the intent pays for.
    pub order_id: String,
}
