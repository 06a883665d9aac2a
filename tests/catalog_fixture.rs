//! Integration tests for loading the bundled catalog and shopping from it.

use std::{io::Write, path::PathBuf};

use tempfile::NamedTempFile;
use testresult::TestResult;

use farmapp::prelude::*;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("catalog.yml")
}

#[test]
fn bundled_catalog_covers_every_category() -> TestResult {
    let catalog = Catalog::from_path(fixture_path())?;

    let counts = catalog.category_counts();

    for category in Category::ALL {
        assert!(
            counts.get(&category).copied().unwrap_or(0) > 0,
            "no products in {category}"
        );
    }

    Ok(())
}

#[test]
fn shopping_from_filtered_products() -> TestResult {
    let catalog = Catalog::from_path(fixture_path())?;

    let mut filter = CategoryFilter::default();
    filter.toggle(Category::Pharmacy);

    let mut cart = Cart::default();

    for (_key, product) in catalog.filter("", filter.selected()) {
        cart = cart.add_item(product.to_cart_line()?)?;
    }

    let (_key, vitamin) = catalog
        .find_by_name("Vitamina C 1000mg")
        .ok_or("missing product")?;

    cart = cart.add_item(vitamin.to_cart_line()?)?;

    assert_eq!(cart.len(), 2);
    assert_eq!(
        cart.line("Vitamina C 1000mg").map(|line| line.quantity().get()),
        Some(2)
    );
    assert_eq!(format_price(&cart.total()?), "$\u{a0}44.300,00");

    Ok(())
}

#[test]
fn unpriced_product_displays_raw_text_but_cannot_be_added() -> TestResult {
    let catalog = Catalog::from_path(fixture_path())?;

    let (_key, kit) = catalog
        .find_by_name("Kit Botiquín")
        .ok_or("missing product")?;

    assert_eq!(kit.display_price(), "Consultar en tienda");
    assert!(matches!(kit.to_cart_line(), Err(PriceError::Invalid(_))));

    Ok(())
}

#[test]
fn from_path_reads_temp_file() -> TestResult {
    let mut file = NamedTempFile::new()?;

    writeln!(
        file,
        "products:\n  - name: Alcohol Antiséptico\n    price: \"7300\"\n    category: Farmacia"
    )?;

    let catalog = Catalog::from_path(file.path())?;

    assert_eq!(catalog.len(), 1);
    assert_eq!(
        catalog
            .find_by_name("Alcohol Antiséptico")
            .map(|(_key, product)| product.display_price()),
        Some("$\u{a0}7.300,00".to_string())
    );

    Ok(())
}

#[test]
fn from_path_missing_file_is_io_error() {
    let result = Catalog::from_path(fixture_path().with_file_name("missing.yml"));

    assert!(matches!(result, Err(CatalogError::Io(_))));
}
