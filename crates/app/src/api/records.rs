//! Wire records for the commerce backend.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Response shape of the cart endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRecord {
    /// Cart lines in backend order.
    pub items: Vec<CartLineRecord>,

    /// Total as reported by the backend; the client recomputes its own.
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// One cart line as the backend names it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineRecord {
    /// Opaque line identifier, unique per cart.
    pub cart_item_id: String,

    /// Product identifier.
    pub product_id: String,

    /// Display title.
    pub title: String,

    /// Quantity in the cart.
    pub quantity: u32,

    /// Unit price.
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,

    /// Image reference.
    #[serde(default)]
    pub image_url: Option<String>,

    /// Color selection.
    #[serde(default)]
    pub color: Option<String>,

    /// Size selection.
    #[serde(default)]
    pub size: Option<String>,
}

/// Response of `POST /Orders`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    /// Backend order identifier.
    pub order_id: String,

    /// Total the backend recorded.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
}

/// Request body of `POST /Payments/create-payment-intent`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentRequest {
    /// Amount to authorize, from the created order.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,

    /// The order the intent pays for.
    pub order_id: String,
}

/// Response of `POST /Payments/create-payment-intent`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentRecord {
    /// Client secret consumed by the provider's confirmation page.
    pub client_secret: String,

    /// Intent identifier, when the backend returns one.
    #[serde(default)]
    pub payment_intent_id: Option<String>,
}

/// Response of `GET /payments/status/{paymentIntentId}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusRecord {
    /// Provider-reported status.
    pub status: String,
}
