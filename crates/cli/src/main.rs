//! Marketplace cart CLI - inspect and edit a file-backed cart.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart with item count and total
//! mp-cart show
//!
//! # Add two units of product 7 in red, size M
//! mp-cart add --id 7 --name "Linen shirt" --regular-price 20 --quantity 2 --color red --size M
//!
//! # Set the quantity of a line (0 removes it)
//! mp-cart update --id 7 --quantity 1 --color red --size M
//!
//! # Remove a line, or empty the cart
//! mp-cart remove --id 7 --color red --size M
//! mp-cart clear
//! ```
//!
//! Storage location comes from `CART_STORAGE_DIR` / `CART_STORAGE_KEY`
//! (see `marketplace_cart::config`) and can be overridden with `--dir` / `--key`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use marketplace_cart::{CartConfig, CartStore, JsonFileStore};
use marketplace_core::ProductId;

mod commands;

#[derive(Parser)]
#[command(name = "mp-cart")]
#[command(author, version, about = "Marketplace cart tools")]
struct Cli {
    /// Storage directory (overrides `CART_STORAGE_DIR`)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Storage key (overrides `CART_STORAGE_KEY`)
    #[arg(long, global = true)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show cart lines, item count and total
    Show,
    /// Add units of a product to the cart
    Add {
        /// Product ID
        #[arg(long)]
        id: ProductId,

        /// Product name
        #[arg(long)]
        name: Option<String>,

        /// Regular unit price (decimal string)
        #[arg(long)]
        regular_price: Option<String>,

        /// Sale unit price (decimal string)
        #[arg(long)]
        sale_price: Option<String>,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        /// Color variant
        #[arg(long)]
        color: Option<String>,

        /// Size variant
        #[arg(long)]
        size: Option<String>,
    },
    /// Remove a cart line
    Remove {
        /// Product ID
        #[arg(long)]
        id: ProductId,

        /// Color variant
        #[arg(long)]
        color: Option<String>,

        /// Size variant
        #[arg(long)]
        size: Option<String>,
    },
    /// Set the quantity of a cart line (0 removes it)
    Update {
        /// Product ID
        #[arg(long)]
        id: ProductId,

        /// New quantity
        #[arg(short, long)]
        quantity: u32,

        /// Color variant
        #[arg(long)]
        color: Option<String>,

        /// Size variant
        #[arg(long)]
        size: Option<String>,
    },
    /// Remove every line from the cart
    Clear,
}

fn main() {
    // Logs go to stderr so `show` output stays clean
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "marketplace_cart=info,mp_cart=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CartConfig::from_env()?;
    if let Some(dir) = cli.dir {
        config.storage_dir = dir;
    }
    if let Some(key) = cli.key {
        config.storage_key = key;
    }

    let storage = JsonFileStore::open(&config.storage_dir)?;
    // Surface a bad --key here instead of as silently skipped writes
    storage.path_for(&config.storage_key)?;
    tracing::debug!(dir = %storage.dir().display(), key = %config.storage_key, "Using cart storage");

    let mut cart = CartStore::from_config(storage, &config);
    cart.initialize();

    match cli.command {
        Commands::Show => commands::cart::show(&cart),
        Commands::Add {
            id,
            name,
            regular_price,
            sale_price,
            quantity,
            color,
            size,
        } => {
            let product = commands::cart::snapshot(id, name, regular_price, sale_price);
            commands::cart::add(&mut cart, product, quantity, color.as_deref(), size.as_deref())?;
        }
        Commands::Remove { id, color, size } => {
            commands::cart::remove(&mut cart, id, color.as_deref(), size.as_deref());
        }
        Commands::Update {
            id,
            quantity,
            color,
            size,
        } => {
            commands::cart::update(&mut cart, id, quantity, color.as_deref(), size.as_deref());
        }
        Commands::Clear => commands::cart::clear(&mut cart),
    }
    Ok(())
}
