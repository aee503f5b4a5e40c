//! Puntaditas CLI - Browse the catalog and manage the cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List products
//! puntaditas products
//!
//! # Add two Capibaras and show the cart
//! puntaditas add 1 -q 2
//! puntaditas show
//!
//! # Change or remove a line
//! puntaditas update 1 3
//! puntaditas remove 1
//!
//! # Check out (asks for confirmation unless --yes)
//! puntaditas checkout
//! ```
//!
//! # Commands
//!
//! - `products` - List the catalog
//! - `show` - Show the order summary
//! - `add`, `remove`, `update`, `clear` - Change the cart
//! - `checkout` - Buy everything in the cart

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;

use clap::{Parser, Subcommand};
use puntaditas_core::{Price, ProductId};
use puntaditas_storefront::cart::CartEngine;
use puntaditas_storefront::catalog::CatalogLoader;
use puntaditas_storefront::config::StorefrontConfig;
use puntaditas_storefront::error::AppError;
use puntaditas_storefront::store::FileStore;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "puntaditas")]
#[command(author, version, about = "Puntaditas storefront cart")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the product catalog
    Products,
    /// Show the cart and its total
    Show,
    /// Add a product to the cart
    Add {
        /// Product id
        id: ProductId,

        /// Number of units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        id: ProductId,
    },
    /// Set the quantity of a product already in the cart (0 or less removes it)
    Update {
        /// Product id
        id: ProductId,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
    /// Buy everything in the cart
    Checkout {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
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

    tracing::info!("Sentry initialized");
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

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            let _ = writeln!(std::io::stderr(), "Failed to load configuration: {e}");
            std::process::exit(2);
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let sentry_guard = init_sentry(&config);

    // Logs go to stderr so they never mix with command output
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "puntaditas=info,puntaditas_storefront=warn".into());

    let json_layer = cli.log_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!cli.log_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    if let Err(e) = run(cli, &config).await {
        e.report();
        // Flush pending Sentry events before exiting
        drop(sentry_guard);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &StorefrontConfig) -> Result<(), AppError> {
    let products = CatalogLoader::new(config.catalog.clone())
        .load_products()
        .await;

    let mut cart = CartEngine::hydrate(FileStore::new(&config.data_dir));
    cart.set_catalog(products);
    cart.subscribe(render::notify);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Products => commands::cart::products(&cart, &mut out)?,
        Commands::Show => commands::cart::show(&cart, &mut out)?,
        Commands::Add { id, quantity } => {
            commands::cart::add(&mut cart, id, quantity, &mut out)?;
        }
        Commands::Remove { id } => commands::cart::remove(&mut cart, id, &mut out)?,
        Commands::Update { id, quantity } => {
            commands::cart::update(&mut cart, id, quantity, &mut out)?;
        }
        Commands::Clear => commands::cart::clear(&mut cart, &mut out)?,
        Commands::Checkout { yes } => {
            let stdin = std::io::stdin();
            if yes {
                let mut confirm = |_: Price, _: u64| true;
                commands::checkout::run(&mut cart, &mut confirm, config, &mut out)?;
            } else {
                let mut prompt =
                    commands::checkout::TerminalPrompt::new(stdin.lock(), std::io::stdout());
                commands::checkout::run(&mut cart, &mut prompt, config, &mut out)?;
            }
        }
    }

    Ok(())
}
