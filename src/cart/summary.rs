//! Cart summary
//!
//! Renders a cart as a table of lines followed by the formatted total.

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::{Cart, CartError, CartState},
    pricing::format_price,
};

/// Message shown instead of a total when the cart has no lines.
pub const EMPTY_CART_MESSAGE: &str = "El carrito está vacío.";

/// Errors that can occur when rendering a cart summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Error calculating line or cart totals.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Printable view of a cart.
#[derive(Debug, Clone, Copy)]
pub struct CartSummary<'a> {
    cart: &'a Cart,
}

impl<'a> CartSummary<'a> {
    /// Create a summary for the given cart.
    pub fn new(cart: &'a Cart) -> Self {
        Self { cart }
    }

    /// Write the summary to `out`.
    ///
    /// An empty cart renders [`EMPTY_CART_MESSAGE`] and no total.
    ///
    /// # Errors
    ///
    /// Returns a [`SummaryError`] if a total cannot be calculated or writing fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), SummaryError> {
        if self.cart.state() == CartState::Empty {
            writeln!(out, "{EMPTY_CART_MESSAGE}")?;

            return Ok(());
        }

        let mut builder = Builder::default();

        builder.push_record(["Producto", "Cantidad", "Precio"]);

        for line in self.cart.iter() {
            builder.push_record([
                line.name().to_string(),
                line.quantity().to_string(),
                format_price(&line.line_total()?),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::rounded());
        table.modify(Rows::first(), Alignment::center());
        table.modify(Columns::new(1..), Alignment::right());

        writeln!(out, "{table}")?;
        writeln!(out, "Total: {}", format_price(&self.cart.total()?))?;

        Ok(())
    }

    /// Render the summary into a string.
    ///
    /// # Errors
    ///
    /// Returns a [`SummaryError`] if a total cannot be calculated.
    pub fn render(&self) -> Result<String, SummaryError> {
        let mut buf = Vec::new();

        self.write_to(&mut buf)?;

        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
