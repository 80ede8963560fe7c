//! SuperMart CLI - terminal client for the storefront.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! supermart products --category electronics --sort price-asc
//!
//! # Manage the cart (persisted between invocations)
//! supermart cart add 3 --quantity 2
//! supermart cart show
//!
//! # Check out and get the WhatsApp order link
//! supermart checkout --name "Budi Santoso" --email budi@example.com \
//!     --whatsapp 6281234567890 --city Jakarta --address "Jl. Thamrin No. 10"
//!
//! # Find the nearest store
//! supermart locate bandung
//! ```
//!
//! Configuration comes from `SUPERMART_*` environment variables (or a
//! `.env` file); cart and recent searches persist to a JSON file between
//! runs.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout, clippy::print_stderr)]

use clap::{Parser, Subcommand};
use supermart_core::ProductId;
use supermart_storefront::catalog::SortKey;

mod commands;

#[derive(Parser)]
#[command(name = "supermart")]
#[command(author, version, about = "SuperMart terminal storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Products {
        /// Only show products in this category
        #[arg(long)]
        category: Option<String>,

        /// Case-insensitive title search
        #[arg(long)]
        search: Option<String>,

        /// Sort order (`default`, `price-asc`, `price-desc`, `name`, `rating`)
        #[arg(long, default_value = "default")]
        sort: SortKey,
    },
    /// List the catalog categories
    Categories,
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Check out the cart and print the WhatsApp order link
    Checkout {
        /// Full name of the recipient
        #[arg(long)]
        name: String,

        /// Contact email
        #[arg(long)]
        email: String,

        /// WhatsApp number in international format, e.g. 6281234567890
        #[arg(long)]
        whatsapp: String,

        /// Delivery city
        #[arg(long)]
        city: String,

        /// Full delivery address
        #[arg(long)]
        address: String,

        /// Optional order notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// Ask about stock and pricing for the cart without ordering
    Inquiry,
    /// Find a city and the nearest SuperMart outlet
    Locate {
        /// City name, e.g. "bandung"
        city: String,
    },
    /// Show recent city searches
    Recent,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show line items and totals
    Show,
    /// Add a catalog product
    Add {
        /// Product id
        id: i64,

        /// How many to add
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,
    },
    /// Change a line item quantity by a signed delta
    Update {
        /// Product id
        id: i64,

        /// Signed quantity change, e.g. -1
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
    /// Remove a line item
    Remove {
        /// Product id
        id: i64,
    },
    /// Empty the cart
    Clear,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "supermart_storefront=info,supermart_cli=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        eprintln!("{}", e.notification());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> supermart_storefront::error::Result<()> {
    match cli.command {
        Commands::Products {
            category,
            search,
            sort,
        } => commands::catalog::products(category, search, sort).await?,
        Commands::Categories => commands::catalog::categories().await?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show()?,
            CartAction::Add { id, quantity } => {
                commands::cart::add(ProductId::new(id), quantity).await?;
            }
            CartAction::Update { id, delta } => {
                commands::cart::update(ProductId::new(id), delta)?;
            }
            CartAction::Remove { id } => commands::cart::remove(ProductId::new(id))?,
            CartAction::Clear => commands::cart::clear()?,
        },
        Commands::Checkout {
            name,
            email,
            whatsapp,
            city,
            address,
            notes,
        } => commands::order::checkout(name, email, whatsapp, city, address, notes)?,
        Commands::Inquiry => commands::order::inquiry()?,
        Commands::Locate { city } => commands::locate::city(&city).await?,
        Commands::Recent => commands::locate::recent()?,
    }
    Ok(())
}
