/// Shopping cart held in server-side session state
///
/// A [`Cart`] is an ordered list of [`LineItem`]s. Items have no identity of
/// their own; they are addressed by their position in the list, so an index
/// taken from one view of the cart is only meaningful until the next mutation.
///
/// The cart is a plain value. Loading it from and storing it back into the
/// session is the caller's job (see `bakery_api::session`).
///
/// # Example
///
/// ```
/// use bakery_shared::cart::{Cart, LineItem};
///
/// let mut cart = Cart::default();
/// cart.add(LineItem::new("Chocolate Cake", 600, 1)).unwrap();
/// cart.add(LineItem::new("Cup Cakes", 40, 2)).unwrap();
/// assert_eq!(cart.total(), 680);
/// ```

use serde::{Deserialize, Serialize};

/// Highest unit price a line item may carry
pub const MAX_PRICE: i64 = 10_000_000;

/// Highest quantity a line item may carry
pub const MAX_QUANTITY: u32 = 10_000;

/// Error type for cart operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    /// Index does not address an item in the cart
    #[error("Invalid item index")]
    InvalidIndex(usize),

    /// Item failed validation before being added
    #[error("Invalid item: {0}")]
    InvalidItem(String),

    /// Adding the item would push the cart total out of range
    #[error("Cart total is too large")]
    TotalOverflow,
}

/// A single cart entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Display name of the product
    pub name: String,

    /// Unit price in whole currency units
    pub price: i64,

    /// Number of units, never below 1
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl LineItem {
    pub fn new(name: impl Into<String>, price: i64, quantity: u32) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
        }
    }

    /// Price of this line (unit price times quantity)
    ///
    /// Saturates at `i64::MAX`; validated items stay far below it.
    pub fn subtotal(&self) -> i64 {
        self.price.saturating_mul(i64::from(self.quantity))
    }

    fn validate(&self) -> Result<(), CartError> {
        if self.name.trim().is_empty() {
            return Err(CartError::InvalidItem("name must not be empty".to_string()));
        }
        if self.price < 0 {
            return Err(CartError::InvalidItem("price must not be negative".to_string()));
        }
        if self.price > MAX_PRICE {
            return Err(CartError::InvalidItem(format!(
                "price must be at most {}",
                MAX_PRICE
            )));
        }
        if self.quantity == 0 {
            return Err(CartError::InvalidItem("quantity must be at least 1".to_string()));
        }
        if self.quantity > MAX_QUANTITY {
            return Err(CartError::InvalidItem(format!(
                "quantity must be at most {}",
                MAX_QUANTITY
            )));
        }
        Ok(())
    }
}

/// Ordered list of line items
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends an item to the end of the cart
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidItem` for an empty name, a price outside
    /// `0..=MAX_PRICE` or a quantity outside `1..=MAX_QUANTITY`, and
    /// `CartError::TotalOverflow` when the new total is not representable.
    /// The cart is left unchanged.
    pub fn add(&mut self, item: LineItem) -> Result<(), CartError> {
        item.validate()?;
        self.checked_total()
            .and_then(|total| total.checked_add(item.subtotal()))
            .ok_or(CartError::TotalOverflow)?;
        self.items.push(item);
        Ok(())
    }

    /// Adjusts the quantity of the item at `index` by `delta`
    ///
    /// The result is clamped to `1..=MAX_QUANTITY`. Returns the new quantity.
    pub fn update_quantity(&mut self, index: usize, delta: i64) -> Result<u32, CartError> {
        let item = self
            .items
            .get_mut(index)
            .ok_or(CartError::InvalidIndex(index))?;

        let updated = i64::from(item.quantity)
            .saturating_add(delta)
            .clamp(1, i64::from(MAX_QUANTITY));
        item.quantity = u32::try_from(updated).unwrap_or(MAX_QUANTITY);
        Ok(item.quantity)
    }

    /// Removes and returns the item at `index`
    pub fn remove(&mut self, index: usize) -> Result<LineItem, CartError> {
        if index >= self.items.len() {
            return Err(CartError::InvalidIndex(index));
        }
        Ok(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of price × quantity over all items, saturating at `i64::MAX`
    pub fn total(&self) -> i64 {
        self.checked_total().unwrap_or(i64::MAX)
    }

    /// Sum of price × quantity, or `None` on overflow
    pub fn checked_total(&self) -> Option<i64> {
        self.items.iter().try_fold(0i64, |total, item| {
            item.price
                .checked_mul(i64::from(item.quantity))
                .and_then(|subtotal| total.checked_add(subtotal))
        })
    }
}
