//! Cartsim - Shopping-cart simulator.
//!
//! # Usage
//!
//! ```bash
//! # List products
//! cartsim catalog
//!
//! # Add product 1 to the cart
//! cartsim add 1
//!
//! # Price the order shipped to postal code 2000
//! cartsim quote --ship --postal-code 2000
//!
//! # Remove a product / clear the cart (asks first unless --yes)
//! cartsim remove 1
//! cartsim clear --yes
//!
//! # Interactive session
//! cartsim shell
//! ```
//!
//! The catalog location and state directory come from `CARTSIM_CATALOG` and
//! `CARTSIM_STATE_DIR` (or `.env`), overridden by `--catalog`/`--state-dir`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::{self, Write};
use std::path::PathBuf;

use cartsim_cli::commands::{cart, shell};
use cartsim_cli::confirm::{AssumeYes, Confirm, ReadConfirm};
use cartsim_cli::{CliError, SimulatorConfig, app};
use cartsim_core::{ProductId, ShippingRequest};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cartsim")]
#[command(author, version, about = "Shopping-cart simulator")]
struct Cli {
    /// Catalog file path or http(s) URL
    #[arg(long, global = true)]
    catalog: Option<String>,

    /// Directory holding the persisted cart
    #[arg(long, global = true)]
    state_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products in the catalog
    Catalog,
    /// Show the cart and its totals
    Show,
    /// Add one unit of a product
    Add {
        /// Product id
        id: ProductId,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        id: ProductId,

        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Empty the cart and delete its saved data
    Clear {
        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Calculate subtotal, shipping, tax and total
    Quote {
        /// Calculate shipping
        #[arg(long)]
        ship: bool,

        /// Destination postal code (required with --ship)
        #[arg(long, default_value = "")]
        postal_code: String,

        /// Print totals as JSON
        #[arg(long)]
        json: bool,
    },
    /// Interactive session
    Shell,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cartsim_cli=info,cartsim_core=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        if !matches!(e, CliError::CatalogLoad(_)) {
            let _ = report(&mut io::stdout().lock(), &e);
        }
        std::process::exit(1);
    }
}

/// Show a command failure to the user. Catalog failures were already
/// reported during startup.
fn report<W: Write>(out: &mut W, err: &CliError) -> io::Result<()> {
    match err.notice() {
        Some(notice) => cartsim_cli::notify::notify_all(out, &[notice]),
        None => writeln!(out, "[error] {err}"),
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = SimulatorConfig::from_env()?
        .with_overrides(cli.catalog.as_deref(), cli.state_dir)?;

    let mut stdout = io::stdout().lock();
    let mut session = app::start(&config, &mut stdout).await?;

    match cli.command {
        Commands::Catalog => cart::catalog(&session, &mut stdout),
        Commands::Show => cart::show(&session, &mut stdout),
        Commands::Add { id } => cart::add(&mut session, &mut stdout, id),
        Commands::Remove { id, yes } => {
            let mut confirm = confirmer(yes);
            cart::remove(&mut session, &mut stdout, confirm.as_mut(), id)
        }
        Commands::Clear { yes } => {
            let mut confirm = confirmer(yes);
            cart::clear(&mut session, &mut stdout, confirm.as_mut())
        }
        Commands::Quote {
            ship,
            postal_code,
            json,
        } => {
            let request = ShippingRequest {
                requested: ship,
                postal_code,
            };
            cart::quote(&mut session, &mut stdout, request, json)
        }
        Commands::Shell => shell::run(&mut session, io::stdin().lock(), &mut stdout),
    }
}

fn confirmer(assume_yes: bool) -> Box<dyn Confirm> {
    if assume_yes {
        Box::new(AssumeYes)
    } else {
        Box::new(ReadConfirm(io::stdin().lock()))
    }
}
