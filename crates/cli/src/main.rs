//! Liquid Luxury CLI - Terminal front-end for the storefront client.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (persisted in the state file)
//! lux auth login -e jo@example.com -p secret
//!
//! # Browse the catalog
//! lux products list --category Coffee --sort price-asc --page 2
//!
//! # Cart and checkout
//! lux cart add 665a1 --quantity 2
//! lux cart checkout --name Jo --location "12 Vine St" --phone 555-0100 --payment cod
//!
//! # Wishlist and orders
//! lux wishlist add 665a1
//! lux orders list --expand
//! ```
//!
//! # Environment Variables
//!
//! - `LIQUID_LUXURY_API_URL` - Backend base URL (required)
//! - `LIQUID_LUXURY_STORAGE_PATH` - State file (default: `~/.liquid-luxury/session.json`)

#![cfg_attr(not(test), forbid(unsafe_code))]
// Command output goes to stdout; logs go through tracing
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

mod commands;

use commands::Context;

#[derive(Parser)]
#[command(name = "lux")]
#[command(author, version, about = "Liquid Luxury storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in, sign up, sign out
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Browse the catalog
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage the cart and check out
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Order history
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Sign in with email and password
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Create an account (signs you in on success)
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Sign out and clear local state
    Logout,
    /// Show the signed-in user
    Whoami,
}

#[derive(Subcommand)]
enum ProductAction {
    /// List products with the storefront's filters
    List {
        /// Search by product name (case-insensitive substring)
        #[arg(short, long)]
        query: Option<String>,

        /// Category name, or "all"
        #[arg(short, long)]
        category: Option<String>,

        /// Sort: featured, price-asc, price-desc, name
        #[arg(short, long)]
        sort: Option<String>,

        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Products per page (default 8)
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// Show one product in full
    Show { id: String },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and totals
    Show,
    /// Add a product
    Add {
        product_id: String,
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set a line's quantity (floors at 1)
    SetQuantity { item_id: String, quantity: u32 },
    /// Remove a line
    Remove {
        item_id: String,
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Place an order from the current cart
    Checkout {
        #[arg(long)]
        name: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        phone: String,
        /// Payment method (e.g. cod, card)
        #[arg(long)]
        payment: String,
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Show the wishlist
    Show {
        /// Sort: added, price-asc, price-desc, name
        #[arg(short, long)]
        sort: Option<String>,
    },
    /// Add a product
    Add { product_id: String },
    /// Remove an item
    Remove {
        item_id: String,
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Move an item into the cart
    MoveToCart { item_id: String },
}

#[derive(Subcommand)]
enum OrderAction {
    /// List your orders
    List {
        /// Show each order's line items
        #[arg(short, long)]
        expand: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let ctx = match Context::from_env() {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!("Startup failed: {e}");
            std::process::exit(1);
        }
    };

    run(cli, &ctx).await;
}

async fn run(cli: Cli, ctx: &Context) {
    match cli.command {
        Commands::Auth { action } => match action {
            AuthAction::Login { email, password } => {
                commands::auth::login(ctx, &email, &password).await;
            }
            AuthAction::Register {
                username,
                email,
                password,
            } => commands::auth::register(ctx, &username, &email, &password).await,
            AuthAction::Logout => commands::auth::logout(ctx),
            AuthAction::Whoami => commands::auth::whoami(ctx),
        },
        Commands::Products { action } => match action {
            ProductAction::List {
                query,
                category,
                sort,
                page,
                page_size,
            } => {
                commands::catalog::list(
                    ctx,
                    commands::catalog::ListOptions {
                        query,
                        category,
                        sort,
                        page,
                        page_size,
                    },
                )
                .await;
            }
            ProductAction::Show { id } => commands::catalog::show(ctx, &id).await,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(ctx).await,
            CartAction::Add {
                product_id,
                quantity,
            } => commands::cart::add(ctx, &product_id, quantity).await,
            CartAction::SetQuantity { item_id, quantity } => {
                commands::cart::set_quantity(ctx, &item_id, quantity).await;
            }
            CartAction::Remove { item_id, yes } => {
                commands::cart::remove(ctx, &item_id, yes).await;
            }
            CartAction::Checkout {
                name,
                location,
                phone,
                payment,
                yes,
            } => {
                commands::cart::checkout(
                    ctx,
                    commands::cart::CheckoutDetails {
                        name,
                        location,
                        phone,
                        payment_method: payment,
                    },
                    yes,
                )
                .await;
            }
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Show { sort } => {
                commands::wishlist::show(ctx, sort.as_deref()).await;
            }
            WishlistAction::Add { product_id } => {
                commands::wishlist::add(ctx, &product_id).await;
            }
            WishlistAction::Remove { item_id, yes } => {
                commands::wishlist::remove(ctx, &item_id, yes).await;
            }
            WishlistAction::MoveToCart { item_id } => {
                commands::wishlist::move_to_cart(ctx, &item_id).await;
            }
        },
        Commands::Orders { action } => match action {
            OrderAction::List { expand } => commands::orders::list(ctx, expand).await,
        },
    }
}
