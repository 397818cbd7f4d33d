//! Commerce backend client.

use reqwest::{Client, Response};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use thiserror::Error;
use uuid::Uuid;

use vitrine::order::OrderSubmission;

pub mod records;

use records::{
    CartRecord, OrderRecord, PaymentIntentRecord, PaymentIntentRequest, PaymentStatusRecord,
};

/// Configuration for connecting to the commerce backend.
#[derive(Debug, Clone)]
pub struct CommerceApiConfig {
    /// Backend base URL, e.g. `"https://api.example-eyewear.com"`.
    pub base_url: String,

    /// Bearer token for authenticated endpoints, when a session has one.
    pub bearer_token: Option<String>,
}

/// HTTP client for the commerce backend's cart, order and payment endpoints.
#[derive(Debug, Clone)]
pub struct CommerceApi {
    config: CommerceApiConfig,
    http: Client,
}

impl CommerceApi {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: CommerceApiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Fetch the authoritative cart for the current session.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or an unexpected response body.
    pub async fn fetch_cart(&self) -> Result<CartRecord, ApiError> {
        let url = format!("{}/Carts", self.config.base_url);

        let response = self.authorized(self.http.get(&url)).send().await?;

        read_json("cart fetch", response).await
    }

    /// Remove a single cart line.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or a non-success status.
    pub async fn remove_cart_item(&self, cart_item_id: &str) -> Result<(), ApiError> {
        let url = format!("{}/Carts/items/{cart_item_id}", self.config.base_url);

        let response = self.authorized(self.http.delete(&url)).send().await?;

        ensure_success("cart item removal", response).await?;

        Ok(())
    }

    /// Create an order from a finalized submission.
    ///
    /// The idempotency key makes a double-submit safe: the backend treats a
    /// repeated key as the same attempt, not a second order.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or an unexpected response body.
    pub async fn create_order(
        &self,
        submission: &OrderSubmission,
        idempotency_key: Uuid,
    ) -> Result<OrderRecord, ApiError> {
        let url = format!("{}/Orders", self.config.base_url);

        let response = self
            .authorized(self.http.post(&url))
            .header("Idempotency-Key", idempotency_key.to_string())
            .json(submission)
            .send()
            .await?;

        read_json("order creation", response).await
    }

    /// Request a payment intent for a created order.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or an unexpected response body.
    pub async fn create_payment_intent(
        &self,
        amount: Decimal,
        order_id: &str,
    ) -> Result<PaymentIntentRecord, ApiError> {
        let url = format!("{}/Payments/create-payment-intent", self.config.base_url);

        let body = PaymentIntentRequest {
            amount,
            order_id: order_id.to_owned(),
        };

        let response = self
            .authorized(self.http.post(&url))
            .json(&body)
            .send()
            .await?;

        read_json("payment intent creation", response).await
    }

    /// Confirm a payment with a provider-specific payload.
    ///
    /// The payload and result belong to the payment-provider integration;
    /// this client only carries them.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or an unexpected response body.
    pub async fn confirm_payment(
        &self,
        payload: &serde_json::Value,
    ) -> Result<serde_json::Value, ApiError> {
        let url = format!("{}/payments/confirm", self.config.base_url);

        let response = self
            .authorized(self.http.post(&url))
            .json(payload)
            .send()
            .await?;

        read_json("payment confirmation", response).await
    }

    /// Read the status of a payment intent.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or an unexpected response body.
    pub async fn payment_status(
        &self,
        payment_intent_id: &str,
    ) -> Result<PaymentStatusRecord, ApiError> {
        let url = format!("{}/payments/status/{payment_intent_id}", self.config.base_url);

        let response = self.authorized(self.http.get(&url)).send().await?;

        read_json("payment status", response).await
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

async fn ensure_success(operation: &'static str, response: Response) -> Result<Response, ApiError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    Err(ApiError::UnexpectedResponse(format!(
        "{operation} failed with status {status}: {text}"
    )))
}

async fn read_json<T: DeserializeOwned>(
    operation: &'static str,
    response: Response,
) -> Result<T, ApiError> {
    let response = ensure_success(operation, response).await?;

    Ok(response.json().await?)
}

/// Errors that can occur when communicating with the commerce backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend returned a non-2xx response or unexpected body.
    #[error("unexpected response from commerce backend: {0}")]
    UnexpectedResponse(String),
}
