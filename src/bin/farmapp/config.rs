//! Command-line configuration

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use farmapp::products::Category;

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub(crate) log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub(crate) log_format: LogFormat,
}

/// `FarmApp` storefront configuration
#[derive(Debug, Parser)]
#[command(name = "farmapp", about = "FarmApp pharmacy storefront", long_about = None)]
pub(crate) struct AppConfig {
    /// Path to the YAML product catalog
    #[arg(
        short,
        long,
        env = "FARMAPP_CATALOG",
        default_value = "fixtures/catalog.yml",
        global = true
    )]
    pub(crate) catalog: PathBuf,

    /// Logging output settings.
    #[command(flatten)]
    pub(crate) logging: LoggingConfig,

    /// Storefront action to run.
    #[command(subcommand)]
    pub(crate) command: Command,
}

/// Storefront actions
#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// List products, optionally filtered by name and category
    Products {
        /// Case-insensitive text the product name must contain
        #[arg(short, long, default_value = "")]
        search: String,

        /// Only show products in this category (e.g. "Farmacia")
        #[arg(short = 'k', long)]
        category: Option<Category>,
    },

    /// List categories with their product counts
    Categories,

    /// Add products to a cart by name and print the cart
    Cart {
        /// Product names, one per unit added
        names: Vec<String>,
    },
}

impl AppConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_cart_command_with_names() -> TestResult {
        let config = AppConfig::try_parse_from([
            "farmapp",
            "--catalog",
            "catalog.yml",
            "cart",
            "Paracetamol",
            "Vitamina C",
        ])?;

        assert_eq!(config.catalog, PathBuf::from("catalog.yml"));
        assert!(matches!(
            config.command,
            Command::Cart { names } if names == ["Paracetamol", "Vitamina C"]
        ));

        Ok(())
    }

    #[test]
    fn parses_category_filter() -> TestResult {
        let config =
            AppConfig::try_parse_from(["farmapp", "products", "-s", "vita", "-k", "farmacia"])?;

        assert!(matches!(
            config.command,
            Command::Products { search, category: Some(Category::Pharmacy) } if search == "vita"
        ));

        Ok(())
    }

    #[test]
    fn rejects_unknown_category() {
        let result = AppConfig::try_parse_from(["farmapp", "products", "-k", "Ferretería"]);

        assert!(result.is_err());
    }
}
