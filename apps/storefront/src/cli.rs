//! # Command Line
//!
//! `storefront <subcommand>` parses into [`Cli`], runs the matching command
//! and prints its response as JSON on stdout.
//!
//! ```text
//! storefront products --search jacket --sort price --direction desc
//! storefront cart add 3 --quantity 2
//! storefront wishlist move 5
//! storefront checkout --first-name Ada ... --payment paypal
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;

use crate::commands::{cart, checkout, config, product, wishlist};
use crate::error::ApiError;
use crate::state::AppState;
use storefront_core::{Money, PaymentMethod, ProductId, ShippingAddress, SortDirection, SortKey};

/// Storefront catalog, cart, and checkout
#[derive(Debug, Parser)]
#[command(name = "storefront", version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file, overriding the config
    #[arg(long, global = true)]
    pub db_path: Option<PathBuf>,

    /// Signed-in user id; orders are recorded against it
    #[arg(long, global = true, env = "STOREFRONT_USER")]
    pub user: Option<String>,

    /// Don't contact the catalog API; serve from the cache only
    #[arg(long, global = true)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List products with search, filters, sorting, and pagination
    Products(ProductsArgs),

    /// Show one product
    Product {
        id: ProductId,
    },

    /// List categories, or the products in one
    Categories {
        /// Show this category's products instead
        #[arg(long)]
        products_in: Option<String>,
    },

    /// Show or change the cart
    #[command(subcommand)]
    Cart(CartCommand),

    /// Show or change the wishlist
    #[command(subcommand)]
    Wishlist(WishlistCommand),

    /// Place an order for the current cart
    Checkout(CheckoutArgs),

    /// List placed orders, newest first
    Orders {
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Show the effective configuration
    Config,

    /// Drop the catalog cache and fetch it again
    Refresh,
}

#[derive(Debug, Args)]
pub struct ProductsArgs {
    /// Case-insensitive text matched against title and description
    #[arg(short, long)]
    pub search: Option<String>,

    #[arg(short, long)]
    pub category: Option<String>,

    #[arg(long)]
    pub min_price: Option<Money>,

    #[arg(long)]
    pub max_price: Option<Money>,

    /// none, price, name, or rating
    #[arg(long, default_value = "none")]
    pub sort: SortKey,

    /// asc or desc
    #[arg(long, default_value = "asc")]
    pub direction: SortDirection,

    /// 1-based page number
    #[arg(short, long)]
    pub page: Option<u32>,

    #[arg(long)]
    pub page_size: Option<u32>,
}

#[derive(Debug, Subcommand)]
pub enum CartCommand {
    Show,
    Add {
        id: ProductId,
        #[arg(short, long)]
        quantity: Option<u32>,
    },
    /// Set a line's quantity; 0 or less removes it
    Update {
        id: ProductId,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    Remove {
        id: ProductId,
    },
    Clear,
}

#[derive(Debug, Subcommand)]
pub enum WishlistCommand {
    Show,
    Add {
        id: ProductId,
    },
    Remove {
        id: ProductId,
    },
    Clear,
    /// Move a saved product into the cart
    Move {
        id: ProductId,
        #[arg(short, long)]
        quantity: Option<u32>,
    },
}

#[derive(Debug, Args)]
pub struct CheckoutArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub street: String,
    #[arg(long)]
    pub apartment: Option<String>,
    #[arg(long)]
    pub city: String,
    #[arg(long)]
    pub state: String,
    #[arg(long)]
    pub zip: String,
    #[arg(long)]
    pub country: String,
    #[arg(long)]
    pub phone: String,
    /// credit_card, paypal, or stripe
    #[arg(long, default_value = "credit_card")]
    pub payment: PaymentMethod,
}

impl From<CheckoutArgs> for ShippingAddress {
    fn from(args: CheckoutArgs) -> Self {
        ShippingAddress {
            first_name: args.first_name,
            last_name: args.last_name,
            street_address: args.street,
            apartment: args.apartment,
            city: args.city,
            state: args.state,
            zip_code: args.zip,
            country: args.country,
            phone: args.phone,
        }
    }
}

impl From<ProductsArgs> for product::ProductListRequest {
    fn from(args: ProductsArgs) -> Self {
        product::ProductListRequest {
            search: args.search,
            category: args.category,
            min_price: args.min_price,
            max_price: args.max_price,
            sort: args.sort,
            direction: args.direction,
            page: args.page,
            page_size: args.page_size,
        }
    }
}

fn to_json<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value)
        .map_err(|e| ApiError::internal(format!("Failed to serialize response: {}", e)))
}

/// Runs one parsed command against `state`.
pub async fn dispatch(state: &AppState, command: Command) -> Result<Value, ApiError> {
    match command {
        Command::Products(args) => to_json(product::list_products(state, args.into()).await?),
        Command::Product { id } => to_json(product::get_product(state, id).await?),
        Command::Categories { products_in: None } => {
            to_json(product::list_categories(state).await?)
        }
        Command::Categories {
            products_in: Some(category),
        } => to_json(product::products_by_category(state, &category).await?),
        Command::Cart(cmd) => match cmd {
            CartCommand::Show => to_json(cart::get_cart(state).await),
            CartCommand::Add { id, quantity } => {
                to_json(cart::add_to_cart(state, id, quantity).await?)
            }
            CartCommand::Update { id, quantity } => {
                to_json(cart::update_cart_item(state, id, quantity).await?)
            }
            CartCommand::Remove { id } => to_json(cart::remove_from_cart(state, id).await),
            CartCommand::Clear => to_json(cart::clear_cart(state).await),
        },
        Command::Wishlist(cmd) => match cmd {
            WishlistCommand::Show => to_json(wishlist::get_wishlist(state).await),
            WishlistCommand::Add { id } => to_json(wishlist::add_to_wishlist(state, id).await?),
            WishlistCommand::Remove { id } => {
                to_json(wishlist::remove_from_wishlist(state, id).await)
            }
            WishlistCommand::Clear => to_json(wishlist::clear_wishlist(state).await),
            WishlistCommand::Move { id, quantity } => {
                to_json(wishlist::move_to_cart(state, id, quantity).await?)
            }
        },
        Command::Checkout(args) => {
            let payment = args.payment;
            to_json(checkout::place_order(state, args.into(), payment).await?)
        }
        Command::Orders { limit } => to_json(checkout::list_orders(state, limit).await?),
        Command::Config => to_json(config::get_config(state)),
        Command::Refresh => to_json(product::refresh_catalog(state).await?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::StaticCatalog;
    use crate::commands::test_support::{sample_products, state_with};
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_products_args() {
        let cli = Cli::try_parse_from([
            "storefront",
            "products",
            "--search",
            "ring",
            "--sort",
            "price",
            "--direction",
            "desc",
            "--min-price",
            "10.50",
        ])
        .unwrap();

        let Command::Products(args) = cli.command else {
            panic!("expected products");
        };
        assert_eq!(args.sort, SortKey::Price);
        assert_eq!(args.direction, SortDirection::Desc);
        assert_eq!(args.min_price, Some(Money::from_cents(1050)));
    }

    #[test]
    fn test_parse_negative_quantity_and_globals() {
        let cli = Cli::try_parse_from([
            "storefront",
            "cart",
            "update",
            "4",
            "-1",
            "--offline",
            "--user",
            "u1",
        ])
        .unwrap();

        assert!(cli.offline);
        assert_eq!(cli.user.as_deref(), Some("u1"));
        assert!(matches!(
            cli.command,
            Command::Cart(CartCommand::Update { id: 4, quantity: -1 })
        ));
    }

    #[test]
    fn test_bad_sort_key_is_a_parse_error() {
        let result = Cli::try_parse_from(["storefront", "products", "--sort", "color"]);

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_dispatch_outputs_json() {
        let state = state_with(StaticCatalog::new(sample_products())).await;

        let value = dispatch(
            &state,
            Command::Cart(CartCommand::Add {
                id: 1,
                quantity: Some(1),
            }),
        )
        .await
        .unwrap();

        assert_eq!(value["cart"]["totalItems"], 1);
        assert_eq!(value["display"]["total"], "$120.95");
    }
}
