//! `FarmApp` command-line storefront

use std::io::{self, Write};

use anyhow::Result;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use tracing::{info, warn};

use farmapp::prelude::*;

use crate::config::{AppConfig, Command};

mod config;
mod logging;

/// `FarmApp` entry point
pub fn main() -> Result<()> {
    let config = AppConfig::load().unwrap_or_else(|e| e.exit());

    logging::init_subscriber(&config.logging)?;

    let catalog = Catalog::from_path(&config.catalog)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match config.command {
        Command::Products { search, category } => {
            write_products(&mut out, &catalog, &search, category)?;
        }
        Command::Categories => write_categories(&mut out, &catalog)?,
        Command::Cart { names } => {
            let cart = build_cart(&catalog, &names)?;

            CartSummary::new(&cart).write_to(&mut out)?;
        }
    }

    Ok(())
}

fn build_cart(catalog: &Catalog, names: &[String]) -> Result<Cart> {
    let mut cart = Cart::default();

    for name in names {
        let Some((_key, product)) = catalog.find_by_name(name) else {
            warn!(%name, "product not found, skipping");
            continue;
        };

        cart = cart.add_item(product.to_cart_line()?)?;

        info!(%name, lines = cart.len(), "product added to cart");
    }

    Ok(cart)
}

fn write_products(
    out: &mut impl Write,
    catalog: &Catalog,
    search: &str,
    category: Option<Category>,
) -> Result<()> {
    let mut builder = Builder::default();
    let mut found = 0_usize;

    builder.push_record(["Producto", "Categoría", "Precio"]);

    for (_key, product) in catalog.filter(search, category) {
        builder.push_record([
            product.name.clone(),
            product
                .category
                .map(Category::label)
                .unwrap_or_default()
                .to_string(),
            product.display_price(),
        ]);

        found += 1;
    }

    if found == 0 {
        writeln!(out, "No se encontraron productos.")?;

        return Ok(());
    }

    let mut table = builder.build();

    table.with(Style::rounded());
    table.modify(Columns::last(), Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}

fn write_categories(out: &mut impl Write, catalog: &Catalog) -> Result<()> {
    let counts = catalog.category_counts();
    let mut builder = Builder::default();

    builder.push_record(["Categoría", "Productos"]);

    for category in Category::ALL {
        builder.push_record([
            category.to_string(),
            counts.get(&category).copied().unwrap_or(0).to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::rounded());
    table.modify(Columns::last(), Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}
