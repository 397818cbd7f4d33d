//! Cart

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors related to cart construction or mutation.
#[derive(Debug, Error)]
pub enum CartError {
    /// A line arrived with a quantity of zero (line id).
    #[error("Cart line {0} has a quantity of zero")]
    ZeroQuantity(String),

    /// A line arrived with a negative unit price (line id).
    #[error("Cart line {0} has a negative unit price")]
    NegativeUnitPrice(String),

    /// A line was not found in the cart.
    #[error("Cart line {0} not found")]
    LineNotFound(String),
}

/// One orderable line in a cart.
///
/// Lines are distinct per product and variant selection, so the same frame
/// in two colors yields two lines with different line ids.
#[derive(Clone, Debug, PartialEq)]
pub struct CartItem {
    line_id: String,
    product_id: String,
    name: String,
    unit_price: Decimal,
    quantity: u32,
    image_url: String,
    color: Option<String>,
    size: Option<String>,
}

impl CartItem {
    /// Creates a new line with no image or variant selection.
    #[must_use]
    pub fn new(
        line_id: impl Into<String>,
        product_id: impl Into<String>,
        name: impl Into<String>,
        unit_price: Decimal,
        quantity: u32,
    ) -> Self {
        Self {
            line_id: line_id.into(),
            product_id: product_id.into(),
            name: name.into(),
            unit_price,
            quantity,
            image_url: String::new(),
            color: None,
            size: None,
        }
    }

    /// Sets the image reference for the line.
    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    /// Sets the color selection for the line.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets the size selection for the line.
    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Returns the opaque line identifier, unique per cart.
    pub fn line_id(&self) -> &str {
        &self.line_id
    }

    /// Returns the product identifier.
    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unit price.
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Returns the quantity.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the image reference.
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// Returns the color selection, if any.
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Returns the size selection, if any.
    pub fn size(&self) -> Option<&str> {
        self.size.as_deref()
    }

    /// Returns the line total (unit price times quantity).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// An ordered cart with a total derived from its lines.
///
/// The total is recomputed from the lines on every mutation; it is never a
/// cached value carried across a change.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
    total: Decimal,
}

impl Cart {
    /// Create a new cart with no lines.
    #[must_use]
    pub fn empty() -> Self {
        Cart {
            items: Vec::new(),
            total: Decimal::ZERO,
        }
    }

    /// Create a new cart with the given lines, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if any line has a quantity of zero or a
    /// negative unit price.
    pub fn from_items(items: impl Into<Vec<CartItem>>) -> Result<Self, CartError> {
        let items = items.into();

        items.iter().try_for_each(|item| {
            if item.quantity == 0 {
                return Err(CartError::ZeroQuantity(item.line_id.clone()));
            }

            if item.unit_price.is_sign_negative() {
                return Err(CartError::NegativeUnitPrice(item.line_id.clone()));
            }

            Ok(())
        })?;

        let total = total_of(&items);

        Ok(Cart { items, total })
    }

    /// Get a line from the cart by its line id.
    ///
    /// # Errors
    ///
    /// Returns a `CartError::LineNotFound` if the line is not present.
    pub fn line(&self, line_id: &str) -> Result<&CartItem, CartError> {
        self.items
            .iter()
            .find(|item| item.line_id == line_id)
            .ok_or_else(|| CartError::LineNotFound(line_id.to_owned()))
    }

    /// Change the quantity of a line and recompute the total.
    ///
    /// A quantity of zero is a silent no-op: the line keeps its current
    /// quantity and the total is untouched. Decrementing below one is the
    /// caller's mistake, not a cart mutation.
    ///
    /// # Errors
    ///
    /// Returns a `CartError::LineNotFound` if the line is not present.
    pub fn change_quantity(&mut self, line_id: &str, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Ok(());
        }

        let item = self
            .items
            .iter_mut()
            .find(|item| item.line_id == line_id)
            .ok_or_else(|| CartError::LineNotFound(line_id.to_owned()))?;

        item.quantity = quantity;
        self.total = total_of(&self.items);

        Ok(())
    }

    /// Remove a line and recompute the total from the remaining lines.
    ///
    /// # Errors
    ///
    /// Returns a `CartError::LineNotFound` if the line is not present.
    pub fn remove_line(&mut self, line_id: &str) -> Result<CartItem, CartError> {
        let position = self
            .items
            .iter()
            .position(|item| item.line_id == line_id)
            .ok_or_else(|| CartError::LineNotFound(line_id.to_owned()))?;

        let removed = self.items.remove(position);
        self.total = total_of(&self.items);

        Ok(removed)
    }

    /// Iterate over the lines in the cart.
    pub fn iter(&self) -> impl Iterator<Item = &CartItem> {
        self.items.iter()
    }

    /// Returns the lines in backend response order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Returns the cart total.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Get the number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn total_of(items: &[CartItem]) -> Decimal {
    items.iter().map(CartItem::line_total).sum()
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn test_items() -> [CartItem; 3] {
        [
            CartItem::new("line-1", "frame-aviator", "Aviator", Decimal::new(50_00, 2), 2),
            CartItem::new("line-2", "frame-round", "Round", Decimal::new(35_50, 2), 1),
            CartItem::new("line-3", "frame-round", "Round", Decimal::new(35_50, 2), 1)
                .with_color("tortoise"),
        ]
    }

    #[test]
    fn empty_cart_has_zero_total() {
        let cart = Cart::empty();

        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn from_items_computes_total() -> TestResult {
        let cart = Cart::from_items(test_items())?;

        assert_eq!(cart.len(), 3);
        assert_eq!(cart.total(), Decimal::new(171_00, 2));

        Ok(())
    }

    #[test]
    fn from_items_rejects_zero_quantity() {
        let items = [CartItem::new(
            "line-1",
            "frame-aviator",
            "Aviator",
            Decimal::new(50_00, 2),
            0,
        )];

        let result = Cart::from_items(items);

        match result {
            Err(CartError::ZeroQuantity(line)) => assert_eq!(line, "line-1"),
            other => panic!("expected ZeroQuantity error, got {other:?}"),
        }
    }

    #[test]
    fn from_items_rejects_negative_unit_price() {
        let items = [CartItem::new(
            "line-1",
            "frame-aviator",
            "Aviator",
            Decimal::new(-1, 2),
            1,
        )];

        let result = Cart::from_items(items);

        match result {
            Err(CartError::NegativeUnitPrice(line)) => assert_eq!(line, "line-1"),
            other => panic!("expected NegativeUnitPrice error, got {other:?}"),
        }
    }

    #[test]
    fn same_product_in_two_colors_is_two_lines() -> TestResult {
        let cart = Cart::from_items(test_items())?;

        let plain = cart.line("line-2")?;
        let tortoise = cart.line("line-3")?;

        assert_eq!(plain.product_id(), tortoise.product_id());
        assert_ne!(plain.line_id(), tortoise.line_id());
        assert_eq!(tortoise.color(), Some("tortoise"));

        Ok(())
    }

    #[test]
    fn change_quantity_recomputes_total() -> TestResult {
        let mut cart = Cart::from_items(test_items())?;

        cart.change_quantity("line-2", 3)?;

        assert_eq!(cart.line("line-2")?.quantity(), 3);
        assert_eq!(cart.total(), Decimal::new(242_00, 2));

        Ok(())
    }

    #[test]
    fn change_quantity_to_zero_is_a_no_op() -> TestResult {
        let mut cart = Cart::from_items(test_items())?;
        let before = cart.clone();

        cart.change_quantity("line-1", 0)?;

        assert_eq!(cart, before);

        Ok(())
    }

    #[test]
    fn change_quantity_unknown_line_errors() -> TestResult {
        let mut cart = Cart::from_items(test_items())?;

        let err = cart.change_quantity("line-9", 2).err();

        assert!(
            matches!(err, Some(CartError::LineNotFound(ref line)) if line == "line-9"),
            "expected LineNotFound, got {err:?}"
        );

        Ok(())
    }

    #[test]
    fn remove_line_recomputes_total() -> TestResult {
        let mut cart = Cart::from_items(test_items())?;

        let removed = cart.remove_line("line-1")?;

        assert_eq!(removed.line_id(), "line-1");
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total(), Decimal::new(71_00, 2));

        Ok(())
    }

    #[test]
    fn remove_unknown_line_errors() -> TestResult {
        let mut cart = Cart::from_items(test_items())?;

        let err = cart.remove_line("line-9").err();

        assert!(
            matches!(err, Some(CartError::LineNotFound(_))),
            "expected LineNotFound, got {err:?}"
        );

        Ok(())
    }

    #[test]
    fn total_matches_sum_after_any_sequence() -> TestResult {
        let mut cart = Cart::from_items(test_items())?;

        cart.change_quantity("line-1", 5)?;
        cart.remove_line("line-2")?;
        cart.change_quantity("line-3", 0)?;
        cart.change_quantity("line-3", 4)?;

        let expected: Decimal = cart.iter().map(CartItem::line_total).sum();

        assert_eq!(cart.total(), expected);

        Ok(())
    }

    #[test]
    fn iter_preserves_backend_order() -> TestResult {
        let cart = Cart::from_items(test_items())?;

        let lines: Vec<&str> = cart.iter().map(CartItem::line_id).collect();

        assert_eq!(lines, vec!["line-1", "line-2", "line-3"]);

        Ok(())
    }
}
