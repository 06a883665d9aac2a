//! Products

use std::{fmt, str::FromStr};

use serde::Deserialize;
use slotmap::new_key_type;
use thiserror::Error;

use crate::{
    cart::CartLine,
    pricing::{PriceError, format_price_text, parse_price},
};

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Error returned when a category name is not recognised.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

/// Store category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Category {
    /// Farmacia
    #[serde(rename = "Farmacia")]
    Pharmacy,

    /// Maternidad y Bebés
    #[serde(rename = "Maternidad y Bebés")]
    MotherAndBaby,

    /// Dermocosmética
    #[serde(rename = "Dermocosmética")]
    Dermocosmetics,

    /// Belleza
    #[serde(rename = "Belleza")]
    Beauty,

    /// Cuidado Personal
    #[serde(rename = "Cuidado Personal")]
    PersonalCare,

    /// Naturales
    #[serde(rename = "Naturales")]
    Natural,

    /// Alimentos
    #[serde(rename = "Alimentos")]
    Food,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 7] = [
        Category::Pharmacy,
        Category::MotherAndBaby,
        Category::Dermocosmetics,
        Category::Beauty,
        Category::PersonalCare,
        Category::Natural,
        Category::Food,
    ];

    /// Display label of the category.
    pub fn label(self) -> &'static str {
        match self {
            Category::Pharmacy => "Farmacia",
            Category::MotherAndBaby => "Maternidad y Bebés",
            Category::Dermocosmetics => "Dermocosmética",
            Category::Beauty => "Belleza",
            Category::PersonalCare => "Cuidado Personal",
            Category::Natural => "Naturales",
            Category::Food => "Alimentos",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        Category::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Product
///
/// Prices and stock are kept as the text the store was given; they are only
/// interpreted when a product is displayed or added to a cart.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Product {
    /// Product name
    pub name: String,

    /// Product description
    #[serde(default)]
    pub description: String,

    /// Product price (e.g. "1200" or "1200.50")
    pub price: String,

    /// Units in stock
    #[serde(default)]
    pub stock: String,

    /// Store category, if assigned
    #[serde(default)]
    pub category: Option<Category>,

    /// Image URL
    #[serde(default)]
    pub image_url: String,
}

impl Product {
    /// Price formatted for display, or the raw price text if it is not a number.
    pub fn display_price(&self) -> String {
        format_price_text(&self.price)
    }

    /// Build a single-unit cart line for this product.
    ///
    /// # Errors
    ///
    /// Returns a [`PriceError`] if the product price is not a valid amount.
    pub fn to_cart_line(&self) -> Result<CartLine, PriceError> {
        Ok(CartLine::single(self.name.clone(), parse_price(&self.price)?))
    }
}
