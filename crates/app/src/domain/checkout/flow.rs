//! Checkout orchestration.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use rust_decimal::Decimal;
use tracing::{Span, info};
use uuid::Uuid;

use vitrine::{
    cart::Cart,
    checkout::{CheckoutDetails, Validate},
    order::OrderSubmission,
    payment::PaymentMethod,
};

use crate::domain::{
    cart::service::CartGateway,
    checkout::{
        CheckoutError,
        service::{OrderGateway, PaymentGateway},
    },
};

/// Where the flow hands control after a successful submission.
#[derive(Clone, Debug)]
pub enum CheckoutOutcome {
    /// Cash on delivery: the order is complete; navigate to confirmation.
    CashComplete {
        /// The created order.
        order_id: String,
    },

    /// Card: an intent exists; hand off to the payment-confirmation view.
    AwaitingCardPayment {
        /// The created order.
        order_id: String,

        /// Client secret for the provider's confirmation page.
        client_secret: String,

        /// Amount the payment view charges.
        total: Decimal,

        /// The form data the payment view re-displays.
        details: CheckoutDetails,
    },
}

/// The fetch-validate-submit-route sequence behind the checkout page.
///
/// An order is either fully created or not created at all from this
/// component's view; there is no partial-order state. Order creation
/// strictly precedes payment-intent creation.
pub struct CheckoutFlow {
    carts: Arc<dyn CartGateway>,
    orders: Arc<dyn OrderGateway>,
    payments: Arc<dyn PaymentGateway>,
    processing: AtomicBool,
}

impl CheckoutFlow {
    /// Create a flow over the given gateways.
    #[must_use]
    pub fn new(
        carts: Arc<dyn CartGateway>,
        orders: Arc<dyn OrderGateway>,
        payments: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            carts,
            orders,
            payments,
            processing: AtomicBool::new(false),
        }
    }

    /// Whether a submission is currently in flight.
    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.processing.load(Ordering::SeqCst)
    }

    /// Fetch the authoritative cart and gate entry to the checkout view.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` for a cart with no lines and
    /// `CheckoutError::CartUnavailable` when the fetch fails; both mean
    /// "leave checkout and go back to the cart view".
    #[tracing::instrument(name = "checkout.flow.begin", skip(self), err)]
    pub async fn begin(&self) -> Result<Cart, CheckoutError> {
        let cart = self
            .carts
            .fetch_cart()
            .await
            .map_err(CheckoutError::CartUnavailable)?;

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        info!(lines = cart.len(), total = %cart.total(), "checkout ready");

        Ok(cart)
    }

    /// Submit validated details over a cart snapshot and route the payment.
    ///
    /// The processing flag is held by a drop guard, so every exit path,
    /// success or failure, leaves the flow resubmittable. A second call
    /// while one is in flight is rejected before any backend work, and
    /// each attempt carries a fresh idempotency key.
    ///
    /// # Errors
    ///
    /// Returns a `CheckoutError` naming the step that failed; on
    /// `OrderCreation` the user may simply resubmit the form.
    #[tracing::instrument(
        name = "checkout.flow.submit",
        skip(self, cart, details),
        fields(
            payment_method = details.payment.backend_name(),
            idempotency_key = tracing::field::Empty,
            order_id = tracing::field::Empty
        ),
        err
    )]
    pub async fn submit(
        &self,
        cart: &Cart,
        details: &CheckoutDetails,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        if self.processing.swap(true, Ordering::SeqCst) {
            // Not ours to clear: the in-flight submission owns the flag.
            return Err(CheckoutError::AlreadyProcessing);
        }

        let _processing = ProcessingGuard(&self.processing);

        details.validate()?;

        let submission = OrderSubmission::assemble(cart, details)?;
        let idempotency_key = Uuid::now_v7();

        let span = Span::current();
        span.record("idempotency_key", tracing::field::display(idempotency_key));

        let placed = self
            .orders
            .create_order(&submission, idempotency_key)
            .await
            .map_err(CheckoutError::OrderCreation)?;

        span.record("order_id", tracing::field::display(&placed.order_id));

        info!(order_id = %placed.order_id, total = %placed.total_amount, "order created");

        match details.payment {
            PaymentMethod::CashOnDelivery => Ok(CheckoutOutcome::CashComplete {
                order_id: placed.order_id,
            }),
            PaymentMethod::CreditCard => {
                let intent = self
                    .payments
                    .create_intent(placed.total_amount, &placed.order_id)
                    .await
                    .map_err(|source| CheckoutError::PaymentIntent {
                        order_id: placed.order_id.clone(),
                        source,
                    })?;

                info!(order_id = %placed.order_id, "payment intent created");

                Ok(CheckoutOutcome::AwaitingCardPayment {
                    order_id: placed.order_id,
                    client_secret: intent.client_secret,
                    total: placed.total_amount,
                    details: details.clone(),
                })
            }
        }
    }
}

impl std::fmt::Debug for CheckoutFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutFlow")
            .field("processing", &self.is_processing())
            .finish()
    }
}

/// Clears the processing flag when the submission leaves scope.
struct ProcessingGuard<'a>(&'a AtomicBool);

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use testresult::TestResult;
    use tokio::sync::Notify;
    use vitrine::{
        cart::CartItem,
        order::PlacedOrder,
        payment::PaymentIntent,
    };

    use crate::api::ApiError;
    use crate::domain::cart::service::MockCartGateway;
    use crate::domain::checkout::service::{MockOrderGateway, MockPaymentGateway};

    use super::*;

    fn test_cart() -> Cart {
        Cart::from_items([
            CartItem::new("line-1", "frame-aviator", "Aviator", Decimal::new(50_00, 2), 2)
                .with_color("gold"),
            CartItem::new("line-2", "frame-round", "Round", Decimal::new(35_50, 2), 1),
        ])
        .expect("test cart should be valid")
    }

    fn details(payment: PaymentMethod) -> CheckoutDetails {
        CheckoutDetails {
            full_name: "Amina Benali".to_owned(),
            email: "amina@example.com".to_owned(),
            phone: "01001234567".to_owned(),
            country: "Egypt".to_owned(),
            city: "Cairo".to_owned(),
            street: "12 Qasr El Nil".to_owned(),
            payment,
        }
    }

    fn backend_error() -> ApiError {
        ApiError::UnexpectedResponse("boom".to_owned())
    }

    fn placed_order() -> PlacedOrder {
        PlacedOrder {
            order_id: "ord-1".to_owned(),
            total_amount: Decimal::new(135_50, 2),
        }
    }

    fn flow(
        carts: MockCartGateway,
        orders: MockOrderGateway,
        payments: MockPaymentGateway,
    ) -> CheckoutFlow {
        CheckoutFlow::new(Arc::new(carts), Arc::new(orders), Arc::new(payments))
    }

    #[tokio::test]
    async fn begin_returns_the_cart_when_it_has_lines() -> TestResult {
        let mut carts = MockCartGateway::new();
        carts.expect_fetch_cart().times(1).returning(|| Ok(test_cart()));

        let flow = flow(carts, MockOrderGateway::new(), MockPaymentGateway::new());

        let cart = flow.begin().await?;

        assert_eq!(cart.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn begin_redirects_on_an_empty_cart() {
        let mut carts = MockCartGateway::new();
        carts.expect_fetch_cart().times(1).returning(|| Ok(Cart::empty()));

        let flow = flow(carts, MockOrderGateway::new(), MockPaymentGateway::new());

        let result = flow.begin().await;

        assert!(
            matches!(result, Err(CheckoutError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );
    }

    #[tokio::test]
    async fn begin_redirects_when_the_fetch_fails() {
        let mut carts = MockCartGateway::new();
        carts
            .expect_fetch_cart()
            .times(1)
            .returning(|| Err(backend_error()));

        let flow = flow(carts, MockOrderGateway::new(), MockPaymentGateway::new());

        let result = flow.begin().await;

        assert!(
            matches!(result, Err(CheckoutError::CartUnavailable(_))),
            "expected CartUnavailable, got {result:?}"
        );
    }

    #[tokio::test]
    async fn cash_order_completes_without_a_payment_intent() -> TestResult {
        let mut orders = MockOrderGateway::new();
        orders
            .expect_create_order()
            .withf(|submission, _| submission.total_amount() == Decimal::new(135_50, 2))
            .times(1)
            .returning(|_, _| Ok(placed_order()));

        let mut payments = MockPaymentGateway::new();
        payments.expect_create_intent().times(0);

        let flow = flow(MockCartGateway::new(), orders, payments);

        let outcome = flow
            .submit(&test_cart(), &details(PaymentMethod::CashOnDelivery))
            .await?;

        assert!(
            matches!(outcome, CheckoutOutcome::CashComplete { ref order_id } if order_id == "ord-1"),
            "expected CashComplete, got {outcome:?}"
        );
        assert!(!flow.is_processing(), "flag must clear on success");

        Ok(())
    }

    #[tokio::test]
    async fn card_order_requests_an_intent_for_the_returned_total() -> TestResult {
        let mut orders = MockOrderGateway::new();
        orders.expect_create_order().times(1).returning(|_, _| {
            // The backend may settle on its own total; the intent must use it.
            Ok(PlacedOrder {
                order_id: "ord-1".to_owned(),
                total_amount: Decimal::new(140_00, 2),
            })
        });

        let mut payments = MockPaymentGateway::new();
        payments
            .expect_create_intent()
            .withf(|amount, order_id| {
                *amount == Decimal::new(140_00, 2) && order_id == "ord-1"
            })
            .times(1)
            .returning(|amount, order_id| {
                Ok(PaymentIntent {
                    intent_id: Some("pi-1".to_owned()),
                    client_secret: "secret-1".to_owned(),
                    amount,
                    order_id: order_id.to_owned(),
                })
            });

        let flow = flow(MockCartGateway::new(), orders, payments);

        let outcome = flow
            .submit(&test_cart(), &details(PaymentMethod::CreditCard))
            .await?;

        match outcome {
            CheckoutOutcome::AwaitingCardPayment {
                order_id,
                client_secret,
                total,
                details,
            } => {
                assert_eq!(order_id, "ord-1");
                assert_eq!(client_secret, "secret-1");
                assert_eq!(total, Decimal::new(140_00, 2));
                assert_eq!(details.payment, PaymentMethod::CreditCard);
            }
            other => panic!("expected AwaitingCardPayment, got {other:?}"),
        }

        assert!(!flow.is_processing(), "flag must clear on success");

        Ok(())
    }

    #[tokio::test]
    async fn order_creation_failure_returns_the_flow_to_ready() {
        let mut orders = MockOrderGateway::new();
        orders
            .expect_create_order()
            .times(1)
            .returning(|_, _| Err(backend_error()));

        let mut payments = MockPaymentGateway::new();
        payments.expect_create_intent().times(0);

        let flow = flow(MockCartGateway::new(), orders, payments);

        let result = flow
            .submit(&test_cart(), &details(PaymentMethod::CashOnDelivery))
            .await;

        assert!(
            matches!(result, Err(CheckoutError::OrderCreation(_))),
            "expected OrderCreation, got {result:?}"
        );
        assert!(!flow.is_processing(), "flag must clear on failure");
    }

    #[tokio::test]
    async fn intent_failure_surfaces_the_order_id_and_clears_the_flag() {
        let mut orders = MockOrderGateway::new();
        orders
            .expect_create_order()
            .times(1)
            .returning(|_, _| Ok(placed_order()));

        let mut payments = MockPaymentGateway::new();
        payments
            .expect_create_intent()
            .times(1)
            .returning(|_, _| Err(backend_error()));

        let flow = flow(MockCartGateway::new(), orders, payments);

        let result = flow
            .submit(&test_cart(), &details(PaymentMethod::CreditCard))
            .await;

        assert!(
            matches!(result, Err(CheckoutError::PaymentIntent { ref order_id, .. }) if order_id == "ord-1"),
            "expected PaymentIntent, got {result:?}"
        );
        assert!(!flow.is_processing(), "flag must clear on failure");
    }

    #[tokio::test]
    async fn invalid_details_never_reach_the_order_gateway() {
        let mut orders = MockOrderGateway::new();
        orders.expect_create_order().times(0);

        let flow = flow(MockCartGateway::new(), orders, MockPaymentGateway::new());

        let bad = CheckoutDetails {
            phone: "123".to_owned(),
            ..details(PaymentMethod::CashOnDelivery)
        };

        let result = flow.submit(&test_cart(), &bad).await;

        assert!(
            matches!(result, Err(CheckoutError::InvalidDetails(_))),
            "expected InvalidDetails, got {result:?}"
        );
        assert!(!flow.is_processing(), "flag must clear on rejection");
    }

    #[tokio::test]
    async fn submitting_an_empty_cart_fails_assembly() {
        let mut orders = MockOrderGateway::new();
        orders.expect_create_order().times(0);

        let flow = flow(MockCartGateway::new(), orders, MockPaymentGateway::new());

        let result = flow
            .submit(&Cart::empty(), &details(PaymentMethod::CashOnDelivery))
            .await;

        assert!(
            matches!(result, Err(CheckoutError::Assembly(_))),
            "expected Assembly, got {result:?}"
        );
        assert!(!flow.is_processing(), "flag must clear on rejection");
    }

    #[tokio::test]
    async fn every_attempt_carries_a_fresh_idempotency_key() {
        let seen = Arc::new(Mutex::new(Vec::new()));

        let mut orders = MockOrderGateway::new();
        let keys = Arc::clone(&seen);
        orders.expect_create_order().times(2).returning(move |_, key| {
            keys.lock().expect("keys lock should not be poisoned").push(key);
            Err(backend_error())
        });

        let flow = flow(MockCartGateway::new(), orders, MockPaymentGateway::new());

        let cart = test_cart();
        let form = details(PaymentMethod::CashOnDelivery);

        for _ in 0..2 {
            let result = flow.submit(&cart, &form).await;
            assert!(result.is_err(), "attempt should fail at order creation");
        }

        let keys = seen.lock().expect("keys lock should not be poisoned");
        assert_eq!(keys.len(), 2, "both attempts must reach the gateway");
        assert_ne!(keys[0], keys[1], "each attempt needs its own key");
    }

    /// Order gateway that parks inside `create_order` until released, so a
    /// test can observe the flow mid-submission.
    struct BlockingOrderGateway {
        entered: Arc<Notify>,
        release: Arc<Notify>,
    }

    #[async_trait]
    impl OrderGateway for BlockingOrderGateway {
        async fn create_order(
            &self,
            _submission: &OrderSubmission,
            _idempotency_key: Uuid,
        ) -> Result<PlacedOrder, ApiError> {
            self.entered.notify_one();
            self.release.notified().await;

            Ok(placed_order())
        }
    }

    #[tokio::test]
    async fn a_second_submit_while_one_is_in_flight_is_rejected() -> TestResult {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());

        let orders = BlockingOrderGateway {
            entered: Arc::clone(&entered),
            release: Arc::clone(&release),
        };

        let flow = Arc::new(CheckoutFlow::new(
            Arc::new(MockCartGateway::new()),
            Arc::new(orders),
            Arc::new(MockPaymentGateway::new()),
        ));

        let first = {
            let flow = Arc::clone(&flow);
            tokio::spawn(async move {
                flow.submit(&test_cart(), &details(PaymentMethod::CashOnDelivery))
                    .await
            })
        };

        entered.notified().await;
        assert!(flow.is_processing(), "first submission should be in flight");

        let second = flow
            .submit(&test_cart(), &details(PaymentMethod::CashOnDelivery))
            .await;

        assert!(
            matches!(second, Err(CheckoutError::AlreadyProcessing)),
            "expected AlreadyProcessing, got {second:?}"
        );
        assert!(
            flow.is_processing(),
            "the rejected call must not clear the in-flight flag"
        );

        release.notify_one();

        let outcome = first.await??;

        assert!(
            matches!(outcome, CheckoutOutcome::CashComplete { .. }),
            "expected CashComplete, got {outcome:?}"
        );
        assert!(!flow.is_processing(), "flag must clear once the first finishes");

        Ok(())
    }
}
