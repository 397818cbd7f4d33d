//! Order and payment gateways.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use uuid::Uuid;

use vitrine::{
    order::{OrderSubmission, PlacedOrder},
    payment::PaymentIntent,
};

use crate::api::{ApiError, CommerceApi};

/// Backend collaborator for order creation.
#[automock]
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Create an order from a finalized submission.
    ///
    /// The idempotency key is fresh per attempt; the backend must treat a
    /// repeated key as the same attempt.
    async fn create_order(
        &self,
        submission: &OrderSubmission,
        idempotency_key: Uuid,
    ) -> Result<PlacedOrder, ApiError>;
}

/// Backend collaborator for payment-intent creation.
#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Request an intent for the given order amount.
    async fn create_intent(
        &self,
        amount: Decimal,
        order_id: &str,
    ) -> Result<PaymentIntent, ApiError>;
}

/// [`OrderGateway`] backed by the commerce HTTP API.
#[derive(Debug, Clone)]
pub struct HttpOrderGateway {
    api: Arc<CommerceApi>,
}

impl HttpOrderGateway {
    #[must_use]
    pub fn new(api: Arc<CommerceApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl OrderGateway for HttpOrderGateway {
    async fn create_order(
        &self,
        submission: &OrderSubmission,
        idempotency_key: Uuid,
    ) -> Result<PlacedOrder, ApiError> {
        let record = self.api.create_order(submission, idempotency_key).await?;

        Ok(PlacedOrder {
            order_id: record.order_id,
            total_amount: record.total_amount,
        })
    }
}

/// [`PaymentGateway`] backed by the commerce HTTP API.
#[derive(Debug, Clone)]
pub struct HttpPaymentGateway {
    api: Arc<CommerceApi>,
}

impl HttpPaymentGateway {
    #[must_use]
    pub fn new(api: Arc<CommerceApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn create_intent(
        &self,
        amount: Decimal,
        order_id: &str,
    ) -> Result<PaymentIntent, ApiError> {
        let record = self.api.create_payment_intent(amount, order_id).await?;

        Ok(PaymentIntent {
            intent_id: record.payment_intent_id,
            client_secret: record.client_secret,
            amount,
            order_id: order_id.to_owned(),
        })
    }
}
