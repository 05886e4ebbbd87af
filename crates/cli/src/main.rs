//! Orchard CLI - storefront and admin console over the Orchard API.
//!
//! # Usage
//!
//! ```bash
//! # Browse without logging in
//! orchard products --search mug
//! orchard categories
//!
//! # Log in, fill a cart, check out
//! orchard login -u farida
//! orchard cart add <product-id> --quantity 2
//! orchard cart show
//! orchard checkout --name "Farida K" --address "12 Canal Road" \
//!     --city Lahore --postal-code 54000 --country PK --mobile 03001234567
//!
//! # Admin console
//! orchard admin orders --status pending
//! orchard admin order-status <order-id> shipped
//! ```
//!
//! # Environment Variables
//!
//! - `ORCHARD_API_URL` - API base URL (default `http://localhost:5000/api`)
//! - `ORCHARD_STATE_FILE` - token/wishlist store (default `~/.orchard/state.json`)

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout, clippy::print_stderr)]

use clap::{Args, Parser, Subcommand};

use orchard_core::OrderStatus;

mod commands;

use commands::CommandError;

#[derive(Parser)]
#[command(name = "orchard")]
#[command(author, version, about = "Orchard storefront and admin console")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session token
    Login {
        #[arg(short, long)]
        username: String,
        /// Read from the `ORCHARD_PASSWORD` env var when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Create an account and log in as it
    Signup {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: Option<String>,
    },
    /// End the session and discard the stored token
    Logout,
    /// Show the current identity
    Whoami,
    /// List products
    Products {
        /// Filter by category name
        #[arg(short, long)]
        category: Option<String>,
        /// Only featured products
        #[arg(short, long)]
        featured: bool,
        /// Search in name and description
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show one product
    Product { id: String },
    /// List categories with product counts
    Categories,
    /// Cart operations
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order from the current cart
    Checkout(CheckoutArgs),
    /// Order history
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Locally stored wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Support chat
    Chat {
        #[command(subcommand)]
        action: ChatAction,
    },
    /// Admin console
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart with totals and shipping
    Show,
    /// Add a product
    Add {
        product_id: String,
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set a line's quantity
    Update { product_id: String, quantity: u32 },
    /// Remove a line
    Remove { product_id: String },
    /// Empty the cart
    Clear,
}

#[derive(Args)]
struct CheckoutArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    address: String,
    #[arg(long)]
    city: String,
    #[arg(long)]
    postal_code: String,
    #[arg(long)]
    country: String,
    #[arg(long)]
    mobile: String,
    /// e.g. `cod`
    #[arg(long)]
    payment_method: Option<String>,
}

#[derive(Subcommand)]
enum OrderAction {
    /// List your orders
    List,
    /// Show one order
    Show { id: String },
    /// Cancel a pending order
    Cancel { id: String },
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Show wishlisted products
    List,
    /// Add a product (requires login)
    Add { product_id: String },
    /// Remove a product
    Remove { product_id: String },
}

#[derive(Subcommand)]
enum ChatAction {
    /// Send a message as a guest
    Guest {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        text: String,
    },
    /// Show a guest conversation by email
    History {
        #[arg(long)]
        email: String,
    },
    /// Send a message as the logged-in user
    Send { text: String },
}

#[derive(Subcommand)]
enum AdminAction {
    /// List orders, optionally filtered and paginated
    Orders {
        #[arg(short, long)]
        status: Option<OrderStatus>,
        #[arg(short, long)]
        page: Option<u32>,
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Move an order to a new status
    OrderStatus { id: String, status: OrderStatus },
    /// Cancel any unfinished order
    Cancel { id: String },
    /// Dashboard aggregates
    Stats,
    /// Purge old finished orders
    Cleanup,
    /// List user accounts
    Users,
    /// Delete a user account
    DeleteUser { id: String },
    /// Category management
    Categories {
        #[command(subcommand)]
        action: CategoryAction,
    },
    /// Slider management
    Sliders {
        #[command(subcommand)]
        action: SliderAction,
    },
    /// Support-chat inbox
    Chat {
        #[command(subcommand)]
        action: InboxAction,
    },
}

#[derive(Subcommand)]
enum CategoryAction {
    List,
    Add {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    Update {
        id: String,
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
enum SliderAction {
    List,
    Add {
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "Shop Now")]
        button_text: String,
        #[arg(long, default_value = "/products")]
        button_link: String,
        #[arg(long, default_value_t = 0)]
        order: u32,
    },
    Delete {
        id: String,
    },
    /// Move a slider to a new display position
    Order {
        id: String,
        order: u32,
    },
}

#[derive(Subcommand)]
enum InboxAction {
    /// List conversations
    List,
    /// Show one conversation's messages
    Messages { id: String },
    /// Reply to a conversation
    Reply { id: String, text: String },
    /// Delete a conversation
    Delete { id: String },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CommandError> {
    let ctx = commands::Context::from_env().await?;

    match cli.command {
        Commands::Login { username, password } => {
            commands::account::login(&ctx, &username, password).await
        }
        Commands::Signup {
            username,
            email,
            password,
        } => commands::account::signup(&ctx, &username, &email, password).await,
        Commands::Logout => commands::account::logout(&ctx).await,
        Commands::Whoami => commands::account::whoami(&ctx),
        Commands::Products {
            category,
            featured,
            search,
        } => commands::shop::products(&ctx, category, featured, search).await,
        Commands::Product { id } => commands::shop::product(&ctx, &id).await,
        Commands::Categories => commands::shop::categories(&ctx).await,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::shop::cart_show(&ctx).await,
            CartAction::Add {
                product_id,
                quantity,
            } => commands::shop::cart_add(&ctx, &product_id, quantity).await,
            CartAction::Update {
                product_id,
                quantity,
            } => commands::shop::cart_update(&ctx, &product_id, quantity).await,
            CartAction::Remove { product_id } => {
                commands::shop::cart_remove(&ctx, &product_id).await
            }
            CartAction::Clear => commands::shop::cart_clear(&ctx).await,
        },
        Commands::Checkout(args) => {
            let CheckoutArgs {
                name,
                address,
                city,
                postal_code,
                country,
                mobile,
                payment_method,
            } = args;
            let shipping = orchard_core::ShippingAddress {
                full_name: name,
                address,
                city,
                postal_code,
                country,
                mobile,
            };
            commands::shop::checkout(&ctx, shipping, payment_method).await
        }
        Commands::Orders { action } => match action {
            OrderAction::List => commands::shop::orders_list(&ctx).await,
            OrderAction::Show { id } => commands::shop::order_show(&ctx, &id).await,
            OrderAction::Cancel { id } => commands::shop::order_cancel(&ctx, &id).await,
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::List => commands::account::wishlist_list(&ctx).await,
            WishlistAction::Add { product_id } => {
                commands::account::wishlist_add(&ctx, &product_id).await
            }
            WishlistAction::Remove { product_id } => {
                commands::account::wishlist_remove(&ctx, &product_id)
            }
        },
        Commands::Chat { action } => match action {
            ChatAction::Guest { name, email, text } => {
                commands::shop::chat_guest(&ctx, &name, &email, &text).await
            }
            ChatAction::History { email } => commands::shop::chat_history(&ctx, &email).await,
            ChatAction::Send { text } => commands::shop::chat_send(&ctx, &text).await,
        },
        Commands::Admin { action } => match action {
            AdminAction::Orders {
                status,
                page,
                limit,
            } => commands::admin::orders(&ctx, status, page, limit).await,
            AdminAction::OrderStatus { id, status } => {
                commands::admin::order_status(&ctx, &id, status).await
            }
            AdminAction::Cancel { id } => commands::admin::cancel(&ctx, &id).await,
            AdminAction::Stats => commands::admin::stats(&ctx).await,
            AdminAction::Cleanup => commands::admin::cleanup(&ctx).await,
            AdminAction::Users => commands::admin::users(&ctx).await,
            AdminAction::DeleteUser { id } => commands::admin::delete_user(&ctx, &id).await,
            AdminAction::Categories { action } => match action {
                CategoryAction::List => commands::admin::categories(&ctx).await,
                CategoryAction::Add { name, description } => {
                    commands::admin::category_add(&ctx, &name, &description).await
                }
                CategoryAction::Update {
                    id,
                    name,
                    description,
                } => commands::admin::category_update(&ctx, &id, &name, &description).await,
                CategoryAction::Delete { id } => commands::admin::category_delete(&ctx, &id).await,
            },
            AdminAction::Sliders { action } => match action {
                SliderAction::List => commands::admin::sliders(&ctx).await,
                SliderAction::Add {
                    title,
                    description,
                    button_text,
                    button_link,
                    order,
                } => {
                    commands::admin::slider_add(&ctx, title, description, button_text, button_link, order)
                        .await
                }
                SliderAction::Delete { id } => commands::admin::slider_delete(&ctx, &id).await,
                SliderAction::Order { id, order } => {
                    commands::admin::slider_order(&ctx, &id, order).await
                }
            },
            AdminAction::Chat { action } => match action {
                InboxAction::List => commands::admin::conversations(&ctx).await,
                InboxAction::Messages { id } => commands::admin::messages(&ctx, &id).await,
                InboxAction::Reply { id, text } => commands::admin::reply(&ctx, &id, &text).await,
                InboxAction::Delete { id } => {
                    commands::admin::delete_conversation(&ctx, &id).await
                }
            },
        },
    }
}
