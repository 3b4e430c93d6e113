//! Pantry CLI - browse the catalog, manage the cart and check out.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog
//! pantry products
//!
//! # Add two units of a product and show the cart
//! pantry add --qty 2 p1
//!
//! # IDs starting with `-` go after `--`
//! pantry set-qty -- -NqbVXa0kl1KXc8Z 5
//!
//! # Empty the cart without the confirmation prompt
//! pantry clear --yes
//!
//! # Place an order
//! pantry checkout -e me@example.com -n "王小明" -t 0912345678 -a "臺北市信義區"
//! ```
//!
//! # Configuration
//!
//! - `STOREFRONT_API_BASE_URL` - API host, e.g. `https://vue3-course-api.hexschool.io`
//! - `STOREFRONT_API_PATH` - shop path segment
//! - `SENTRY_DSN`, `SENTRY_ENVIRONMENT` - optional error tracking
//! - `RUST_LOG` - log filter, logs go to stderr

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use pantry_core::{CartEntryId, ProductId, Quantity};
use pantry_storefront::{ConfigError, StoreError, StorefrontConfig};
use sentry::integrations::tracing as sentry_tracing;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod console;

#[derive(Parser)]
#[command(name = "pantry")]
#[command(author, version, about = "Pantry storefront in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the product catalog
    Products,
    /// Show one product in detail
    Product {
        /// Product ID
        id: ProductId,
    },
    /// Show the cart
    Cart,
    /// Add a product to the cart
    Add {
        /// Product ID
        product_id: ProductId,

        /// Units to add (1-10)
        #[arg(short, long, default_value = "1")]
        qty: Quantity,
    },
    /// Change the quantity of a cart entry
    SetQty {
        /// Cart entry ID (see `pantry cart`)
        entry_id: CartEntryId,

        /// New quantity (1-10)
        qty: Quantity,
    },
    /// Remove one cart entry
    Remove {
        /// Cart entry ID (see `pantry cart`)
        entry_id: CartEntryId,
    },
    /// Empty the cart
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Place an order for the current cart
    Checkout {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        name: String,

        /// Landline (0[2-8] + 7 digits) or mobile (09 + 8 digits)
        #[arg(short, long)]
        tel: String,

        #[arg(short, long)]
        address: String,

        /// Note to the shop
        #[arg(short, long, default_value = "")]
        message: String,
    },
}

/// Errors that end the process with a non-zero status.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Cart entry not found: {0}")]
    EntryNotFound(CartEntryId),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = StorefrontConfig::from_env();

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pantry_storefront=info,pantry_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result = match config {
        Ok(config) => run(cli, &config).await,
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(()) => {}
        Err(CliError::Store(StoreError::Cancelled)) => {
            tracing::info!("Nothing changed");
        }
        Err(e) => {
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli, config: &StorefrontConfig) -> Result<(), CliError> {
    let store = commands::connect(config);

    match cli.command {
        Commands::Products => commands::catalog::list(&store).await?,
        Commands::Product { id } => commands::catalog::show(&store, &id).await?,
        Commands::Cart => commands::cart::show(&store).await?,
        Commands::Add { product_id, qty } => {
            commands::cart::add(&store, &product_id, qty).await?;
        }
        Commands::SetQty { entry_id, qty } => {
            commands::cart::set_quantity(&store, &entry_id, qty).await?;
        }
        Commands::Remove { entry_id } => commands::cart::remove(&store, &entry_id).await?,
        Commands::Clear { yes } => commands::cart::clear(&store, yes).await?,
        Commands::Checkout {
            email,
            name,
            tel,
            address,
            message,
        } => {
            let mut form = pantry_storefront::OrderForm {
                email,
                name,
                tel,
                address,
                message,
            };
            commands::checkout::place_order(&store, &mut form).await?;
        }
    }
    Ok(())
}
