//! `FarmApp` prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        Cart, CartError, CartLine, CartState,
        summary::{CartSummary, EMPTY_CART_MESSAGE, SummaryError},
    },
    catalog::{Catalog, CatalogError, CategoryFilter},
    pricing::{PriceError, STORE_CURRENCY, format_price, format_price_text, parse_price},
    products::{Category, Product, ProductKey, UnknownCategory},
};
