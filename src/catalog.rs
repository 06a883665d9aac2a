//! Catalog
//!
//! In-memory product store with the storefront's search and category filter.

use std::{fs, path::Path};

use rustc_hash::FxHashMap;
use serde::Deserialize;
use slotmap::SlotMap;
use thiserror::Error;
use tracing::{debug, info};

use crate::products::{Category, Product, ProductKey};

/// Errors raised while loading or editing a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading a catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Product not found
    #[error("Product not found: {0:?}")]
    ProductNotFound(ProductKey),
}

/// Wrapper for products in a YAML catalog file
#[derive(Debug, Deserialize)]
struct CatalogFile {
    products: Vec<Product>,
}

/// Currently selected category on the storefront.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    selected: Option<Category>,
}

impl CategoryFilter {
    /// Select `category`, or clear the selection if it is already selected.
    pub fn toggle(&mut self, category: Category) {
        self.selected = if self.selected == Some(category) {
            None
        } else {
            Some(category)
        };
    }

    /// Currently selected category, if any.
    pub fn selected(&self) -> Option<Category> {
        self.selected
    }
}

/// Product catalog
#[derive(Debug, Default)]
pub struct Catalog {
    products: SlotMap<ProductKey, Product>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Yaml`] if the document is not a valid catalog.
    pub fn from_yaml(contents: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_norway::from_str(contents)?;

        let mut catalog = Self::new();

        for product in file.products {
            catalog.insert(product);
        }

        Ok(catalog)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let catalog = Self::from_yaml(&contents)?;

        info!(path = %path.display(), products = catalog.len(), "catalog loaded");

        Ok(catalog)
    }

    /// Add a product, returning its key.
    pub fn insert(&mut self, product: Product) -> ProductKey {
        debug!(name = %product.name, "product added");

        self.products.insert(product)
    }

    /// Get a product by key.
    pub fn get(&self, key: ProductKey) -> Option<&Product> {
        self.products.get(key)
    }

    /// Replace the product stored under `key`, returning the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ProductNotFound`] if no product has this key.
    pub fn update(&mut self, key: ProductKey, product: Product) -> Result<Product, CatalogError> {
        let slot = self
            .products
            .get_mut(key)
            .ok_or(CatalogError::ProductNotFound(key))?;

        debug!(name = %product.name, "product updated");

        Ok(std::mem::replace(slot, product))
    }

    /// Remove a product, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ProductNotFound`] if no product has this key.
    pub fn remove(&mut self, key: ProductKey) -> Result<Product, CatalogError> {
        let product = self
            .products
            .remove(key)
            .ok_or(CatalogError::ProductNotFound(key))?;

        debug!(name = %product.name, "product removed");

        Ok(product)
    }

    /// Find the first product whose name matches exactly.
    pub fn find_by_name(&self, name: &str) -> Option<(ProductKey, &Product)> {
        self.products
            .iter()
            .find(|(_key, product)| product.name == name)
    }

    /// Products whose name contains `search` (ignoring case) and, when a
    /// category is given, belong to it. An empty search matches every name.
    pub fn filter<'a>(
        &'a self,
        search: &'a str,
        category: Option<Category>,
    ) -> impl Iterator<Item = (ProductKey, &'a Product)> + 'a {
        let needle = search.to_lowercase();

        self.products.iter().filter(move |(_key, product)| {
            product.name.to_lowercase().contains(&needle)
                && category.is_none_or(|category| product.category == Some(category))
        })
    }

    /// Number of products in each category. Uncategorised products are not counted.
    pub fn category_counts(&self) -> FxHashMap<Category, usize> {
        let mut counts = FxHashMap::default();

        for category in self.products.values().filter_map(|product| product.category) {
            *counts.entry(category).or_insert(0) += 1;
        }

        counts
    }

    /// Iterate over all products.
    pub fn iter(&self) -> impl Iterator<Item = (ProductKey, &Product)> {
        self.products.iter()
    }

    /// Get the number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
