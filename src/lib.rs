//! `FarmApp`
//!
//! Storefront core for a pharmacy shop: a product catalog with search and
//! category filtering, a shopping cart that aggregates lines by product name,
//! and Colombian peso price formatting.

pub mod cart;
pub mod catalog;
pub mod prelude;
pub mod pricing;
pub mod products;
