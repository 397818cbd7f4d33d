//! Cart state holder.

use std::sync::Arc;

use tracing::info;
use vitrine::cart::Cart;

use crate::domain::cart::{CartStoreError, service::CartGateway};

/// The local view of the cart used for rendering and order assembly.
///
/// Local state is the single source of truth between backend calls: loads
/// replace it wholesale, quantity changes mutate it directly, and removals
/// are backend-confirmed before the line disappears locally.
pub struct CartStore {
    gateway: Arc<dyn CartGateway>,
    cart: Cart,
}

impl CartStore {
    /// Create a store with an empty cart.
    #[must_use]
    pub fn new(gateway: Arc<dyn CartGateway>) -> Self {
        Self {
            gateway,
            cart: Cart::empty(),
        }
    }

    /// Returns the current local cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Fetch the cart from the backend and replace local state.
    ///
    /// # Errors
    ///
    /// Returns a `CartStoreError::Load` on backend failure; the previous
    /// local state (or the empty cart, if none was loaded yet) is kept.
    /// There is no automatic retry.
    #[tracing::instrument(name = "cart.store.load", skip(self), err)]
    pub async fn load(&mut self) -> Result<&Cart, CartStoreError> {
        let cart = self
            .gateway
            .fetch_cart()
            .await
            .map_err(CartStoreError::Load)?;

        self.cart = cart;

        info!(lines = self.cart.len(), total = %self.cart.total(), "loaded cart");

        Ok(&self.cart)
    }

    /// Change a line's quantity in local state and recompute the total.
    ///
    /// A quantity of zero is a silent no-op. This mutation is local-only;
    /// the final quantities travel with the order submission.
    ///
    /// # Errors
    ///
    /// Returns a `CartStoreError::Cart` if the line is not present.
    pub fn change_quantity(&mut self, line_id: &str, quantity: u32) -> Result<(), CartStoreError> {
        self.cart.change_quantity(line_id, quantity)?;

        Ok(())
    }

    /// Remove a line, backend first.
    ///
    /// Local state changes only after the backend confirms; on failure the
    /// cart is byte-identical to before the call.
    ///
    /// # Errors
    ///
    /// Returns a `CartStoreError::Cart` if the line is not present locally,
    /// or a `CartStoreError::Remove` if the backend refuses.
    #[tracing::instrument(name = "cart.store.remove_item", skip(self), err)]
    pub async fn remove_item(&mut self, line_id: &str) -> Result<(), CartStoreError> {
        self.cart.line(line_id)?;

        self.gateway
            .remove_line(line_id)
            .await
            .map_err(|source| CartStoreError::Remove {
                line_id: line_id.to_owned(),
                source,
            })?;

        self.cart.remove_line(line_id)?;

        info!(line_id, total = %self.cart.total(), "removed cart line");

        Ok(())
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore").field("cart", &self.cart).finish()
    }
}
