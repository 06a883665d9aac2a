//! Cart

use std::num::NonZeroU32;

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::debug;

use crate::pricing::STORE_CURRENCY;

pub mod summary;

/// Errors related to cart aggregation or totals.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// An item's currency differs from the cart currency (item name, item currency, cart currency).
    #[error("Item {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(String, &'static str, &'static str),

    /// Merging quantities overflowed (item name).
    #[error("Quantity overflow for item {0}")]
    QuantityOverflow(String),

    /// A line or cart total does not fit in minor units (item name).
    #[error("Price overflow for item {0}")]
    PriceOverflow(String),
}

/// One aggregated product entry in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    name: String,
    quantity: NonZeroU32,
    unit_price: Money<'static, Currency>,
}

impl CartLine {
    /// Creates a new line with the given quantity and unit price
    pub fn new(
        name: impl Into<String>,
        quantity: NonZeroU32,
        unit_price: Money<'static, Currency>,
    ) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit_price,
        }
    }

    /// Creates a line holding a single unit
    pub fn single(name: impl Into<String>, unit_price: Money<'static, Currency>) -> Self {
        Self::new(name, NonZeroU32::MIN, unit_price)
    }

    /// Product name, used as the merge key
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of units on this line
    pub fn quantity(&self) -> NonZeroU32 {
        self.quantity
    }

    /// Price of one unit, fixed when the line was first created
    pub fn unit_price(&self) -> &Money<'static, Currency> {
        &self.unit_price
    }

    /// Calculate `quantity * unit_price` for this line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::PriceOverflow`] if the product does not fit in minor units.
    pub fn line_total(&self) -> Result<Money<'static, Currency>, CartError> {
        let minor_units = self
            .unit_price
            .to_minor_units()
            .checked_mul(i64::from(self.quantity.get()))
            .ok_or_else(|| CartError::PriceOverflow(self.name.clone()))?;

        Ok(Money::from_minor(minor_units, self.unit_price.currency()))
    }

    fn merged_with(&self, added: &CartLine) -> Result<Self, CartError> {
        let quantity = self
            .quantity
            .checked_add(added.quantity.get())
            .ok_or_else(|| CartError::QuantityOverflow(self.name.clone()))?;

        Ok(Self {
            name: self.name.clone(),
            quantity,
            unit_price: self.unit_price,
        })
    }
}

/// Externally observable cart states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartState {
    /// No lines have been added.
    Empty,

    /// At least one line exists.
    NonEmpty,
}

/// Cart
///
/// Lines are kept in insertion order, which is also display order. Adding an
/// item never mutates an existing cart: [`Cart::add_item`] returns a new cart
/// with the merged line substituted at its original position.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
    currency: &'static Currency,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(STORE_CURRENCY)
    }
}

impl Cart {
    /// Create a new, empty cart in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: Vec::new(),
            currency,
        }
    }

    /// Return a cart with `item` merged in.
    ///
    /// If a line with the same name exists, its quantity is increased by the
    /// item's quantity and the line keeps its original unit price. Otherwise
    /// the item is appended as a new line.
    ///
    /// # Errors
    ///
    /// - [`CartError::CurrencyMismatch`]: the item is priced in another currency.
    /// - [`CartError::QuantityOverflow`]: the merged quantity does not fit.
    pub fn add_item(&self, item: CartLine) -> Result<Cart, CartError> {
        let item_currency = item.unit_price.currency();

        if item_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                item.name,
                item_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        let lines = match self.lines.iter().position(|line| line.name == item.name) {
            Some(idx) => self
                .lines
                .iter()
                .enumerate()
                .map(|(i, line)| {
                    if i == idx {
                        line.merged_with(&item)
                    } else {
                        Ok(line.clone())
                    }
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => {
                let mut lines = Vec::with_capacity(self.lines.len() + 1);
                lines.extend(self.lines.iter().cloned());
                lines.push(item);
                lines
            }
        };

        debug!(lines = lines.len(), "item added to cart");

        Ok(Cart {
            lines,
            currency: self.currency,
        })
    }

    /// Calculate the total of the cart.
    ///
    /// An empty cart totals zero in the cart currency.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::PriceOverflow`] if a line total or the running sum
    /// does not fit in minor units.
    pub fn total(&self) -> Result<Money<'static, Currency>, CartError> {
        let minor_units = self.lines.iter().try_fold(0_i64, |acc, line| {
            acc.checked_add(line.line_total()?.to_minor_units())
                .ok_or_else(|| CartError::PriceOverflow(line.name.clone()))
        })?;

        Ok(Money::from_minor(minor_units, self.currency))
    }

    /// Get a line by its product name.
    pub fn line(&self, name: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.name == name)
    }

    /// Iterate over the lines in display order.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// Get the number of distinct lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the observable state of the cart.
    #[must_use]
    pub fn state(&self) -> CartState {
        if self.is_empty() {
            CartState::Empty
        } else {
            CartState::NonEmpty
        }
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
