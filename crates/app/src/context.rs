//! App Context

use std::sync::Arc;

use vitrine::session::SessionContext;

use crate::{
    api::{CommerceApi, CommerceApiConfig},
    domain::{
        cart::{CartStore, HttpCartGateway, service::CartGateway},
        checkout::{CheckoutFlow, HttpOrderGateway, HttpPaymentGateway, OrderGateway, PaymentGateway},
    },
};

/// Wires the HTTP gateways and session for the storefront components.
#[derive(Clone)]
pub struct AppContext {
    /// Cart reads and removals.
    pub carts: Arc<dyn CartGateway>,

    /// Order creation.
    pub orders: Arc<dyn OrderGateway>,

    /// Payment-intent creation.
    pub payments: Arc<dyn PaymentGateway>,

    /// Identity and auth for the current visitor.
    pub session: SessionContext,
}

impl AppContext {
    /// Build application context for a backend base URL and session.
    ///
    /// The session's token, when present, authenticates every backend call.
    #[must_use]
    pub fn new(base_url: impl Into<String>, session: SessionContext) -> Self {
        let config = CommerceApiConfig {
            base_url: base_url.into(),
            bearer_token: session.token().map(str::to_owned),
        };

        let api = Arc::new(CommerceApi::new(config));

        Self {
            carts: Arc::new(HttpCartGateway::new(Arc::clone(&api))),
            orders: Arc::new(HttpOrderGateway::new(Arc::clone(&api))),
            payments: Arc::new(HttpPaymentGateway::new(api)),
            session,
        }
    }

    /// A cart state holder over this context's gateways.
    #[must_use]
    pub fn cart_store(&self) -> CartStore {
        CartStore::new(Arc::clone(&self.carts))
    }

    /// A checkout flow over this context's gateways.
    #[must_use]
    pub fn checkout_flow(&self) -> CheckoutFlow {
        CheckoutFlow::new(
            Arc::clone(&self.carts),
            Arc::clone(&self.orders),
            Arc::clone(&self.payments),
        )
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("session", &self.session)
            .finish()
    }
}
