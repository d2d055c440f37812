//! iStore CLI - browse the demo catalog, manage the cart and check out.
//!
//! # Usage
//!
//! ```bash
//! # List products under $800 with 256 GB, cheapest first
//! istore catalog --storage 256 --max-price 800 --sort price-asc
//!
//! # Price a configuration
//! istore price iphone-15-pro 1TB
//!
//! # Add to the cart (storage and color default to the first options)
//! istore cart add iphone-15 --storage 256 --color blue
//! istore cart qty iphone-15 256 blue 3
//! istore cart show
//!
//! # Place the order
//! istore checkout --name "Ada Lovelace" --email ada@example.com --address "1 Main St"
//!
//! # Theme preference
//! istore theme toggle
//!
//! # Color palette
//! istore colors
//! ```
//!
//! # Commands
//!
//! - `catalog` - Search, filter and sort the catalog
//! - `price` - Price a product with a storage tier
//! - `colors` - List the color palette
//! - `cart` - Show and edit the persisted cart
//! - `checkout` - Confirm the order and empty the cart
//! - `theme` - Show or change the light/dark preference
//!
//! State lives in `ISTORE_DATA_DIR` (default `.istore`), or the directory
//! given with `--data-dir`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use istore_core::{Color, StorageTier, Theme};
use istore_storefront::{SortOrder, Storefront, StorefrontConfig};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "istore")]
#[command(author, version, about = "iStore demo storefront")]
struct Cli {
    /// Directory holding the persisted cart and theme
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search, filter and sort the catalog
    Catalog(CatalogArgs),
    /// Price a product configured with a storage tier
    Price {
        /// Product id
        product: String,

        /// Storage tier, e.g. `256`, `256GB` or `1TB`
        storage: StorageTier,
    },
    /// List the color palette with swatch values
    Colors,
    /// Show and edit the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Confirm the order and empty the cart
    Checkout {
        /// Customer name
        #[arg(short, long)]
        name: String,

        /// Contact email address
        #[arg(short, long)]
        email: String,

        /// Shipping address
        #[arg(short, long)]
        address: String,
    },
    /// Show or change the theme preference
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
}

#[derive(Args)]
struct CatalogArgs {
    /// Case-insensitive text to find in name, tagline or description
    #[arg(short, long, default_value = "")]
    search: String,

    /// Keep products offered in this color (repeatable)
    #[arg(short, long = "color", value_delimiter = ',')]
    colors: Vec<Color>,

    /// Keep products offering this storage tier (repeatable)
    #[arg(long = "storage", value_delimiter = ',')]
    storages: Vec<String>,

    /// Drop products whose starting price is above this
    #[arg(short, long)]
    max_price: Option<u64>,

    /// `catalog-order`, `price-asc` or `price-desc`
    #[arg(long, default_value = "catalog-order")]
    sort: SortOrder,

    /// Print the listing as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum CartAction {
    /// List the cart contents and totals
    Show {
        /// Print the line items as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add one unit of a product
    Add {
        /// Product id
        product: String,

        /// Storage tier (defaults to the smallest offered)
        #[arg(short, long)]
        storage: Option<StorageTier>,

        /// Color (defaults to the first offered)
        #[arg(short, long)]
        color: Option<Color>,
    },
    /// Set the quantity of a line (values below 1 become 1)
    Qty {
        product: String,
        storage: StorageTier,
        color: Color,
        #[arg(allow_negative_numbers = true)]
        qty: i64,
    },
    /// Remove a line
    Remove {
        product: String,
        storage: StorageTier,
        color: Color,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Print the current theme
    Show,
    /// Switch between dark and light
    Toggle,
    /// Use the given theme
    Set {
        /// `dark` or `light`
        theme: Theme,
    },
}

fn main() {
    init_tracing();

    let cli = Cli::parse();

    let mut stdout = io::stdout().lock();
    let result = run(cli, &mut stdout);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "istore_storefront=info,istore_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(cli: Cli, out: &mut dyn Write) -> Result<(), CliError> {
    let mut config = StorefrontConfig::from_env()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    let mut shop = Storefront::open(config);
    dispatch(&mut shop, cli.command, out)
}

fn dispatch(shop: &mut Storefront, command: Commands, out: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Commands::Catalog(args) => {
            let mut query = shop.default_query();
            query.search = args.search;
            query.colors.extend(args.colors);
            query.extend_storages_from_text(&args.storages);
            if let Some(max_price) = args.max_price {
                query.max_price = max_price.into();
            }
            query.sort = args.sort;
            commands::catalog::list(shop, &query, args.json, out)?;
        }
        Commands::Price { product, storage } => {
            commands::catalog::price(shop, &product, storage, out)?;
        }
        Commands::Colors => commands::catalog::palette(out)?,
        Commands::Cart { action } => match action {
            CartAction::Show { json } => commands::cart::show(shop, json, out)?,
            CartAction::Add {
                product,
                storage,
                color,
            } => commands::cart::add(shop, &product, storage, color, out)?,
            CartAction::Qty {
                product,
                storage,
                color,
                qty,
            } => commands::cart::set_qty(shop, &product, storage, color, qty, out)?,
            CartAction::Remove {
                product,
                storage,
                color,
            } => commands::cart::remove(shop, &product, storage, color, out)?,
            CartAction::Clear => commands::cart::clear(shop, out)?,
        },
        Commands::Checkout {
            name,
            email,
            address,
        } => commands::checkout::place_order(shop, &name, &email, &address, out)?,
        Commands::Theme { action } => match action.unwrap_or(ThemeAction::Show) {
            ThemeAction::Show => commands::theme::show(shop, out)?,
            ThemeAction::Toggle => commands::theme::toggle(shop, out)?,
            ThemeAction::Set { theme } => commands::theme::set(shop, theme, out)?,
        },
    }
    Ok(())
}
