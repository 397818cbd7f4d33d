//! Cart gateway.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use vitrine::cart::{Cart, CartItem};

use crate::api::{ApiError, CommerceApi, records::CartRecord};

/// Backend collaborator for cart reads and line removals.
///
/// Quantity changes deliberately have no gateway operation: they stay local
/// and travel with the order submission.
#[automock]
#[async_trait]
pub trait CartGateway: Send + Sync {
    /// Fetch the authoritative cart, normalized into the domain model.
    async fn fetch_cart(&self) -> Result<Cart, ApiError>;

    /// Remove a single cart line on the backend.
    async fn remove_line(&self, line_id: &str) -> Result<(), ApiError>;
}

/// [`CartGateway`] backed by the commerce HTTP API.
#[derive(Debug, Clone)]
pub struct HttpCartGateway {
    api: Arc<CommerceApi>,
}

impl HttpCartGateway {
    #[must_use]
    pub fn new(api: Arc<CommerceApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CartGateway for HttpCartGateway {
    async fn fetch_cart(&self) -> Result<Cart, ApiError> {
        let record = self.api.fetch_cart().await?;

        cart_from_record(record)
    }

    async fn remove_line(&self, line_id: &str) -> Result<(), ApiError> {
        self.api.remove_cart_item(line_id).await
    }
}

/// Map backend field names onto the domain cart.
///
/// A response that violates the cart rules (zero quantity, negative price)
/// counts as an unexpected response, the same class as a bad status code.
fn cart_from_record(record: CartRecord) -> Result<Cart, ApiError> {
    let items: Vec<CartItem> = record
        .items
        .into_iter()
        .map(|line| {
            let mut item = CartItem::new(
                line.cart_item_id,
                line.product_id,
                line.title,
                line.unit_price,
                line.quantity,
            );

            if let Some(image_url) = line.image_url {
                item = item.with_image_url(image_url);
            }

            if let Some(color) = line.color {
                item = item.with_color(color);
            }

            if let Some(size) = line.size {
                item = item.with_size(size);
            }

            item
        })
        .collect();

    Cart::from_items(items)
        .map_err(|error| ApiError::UnexpectedResponse(format!("malformed cart response: {error}")))
}
