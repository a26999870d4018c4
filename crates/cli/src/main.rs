//! `FurnishMe` CLI - The storefront in a terminal.
//!
//! Each invocation loads state from a JSON file, applies one event and
//! prints the result. State carries over between invocations through the
//! file, so a session started by `login` is still there for `cart add`.
//!
//! # Usage
//!
//! ```bash
//! furnishme products --category chair
//! furnishme login -e demo@furnishme.com -p password123
//! furnishme cart add 2
//! furnishme cart show
//! furnishme checkout
//! furnishme logout
//! ```
//!
//! # Commands
//!
//! - `products` - List the catalog, optionally filtered
//! - `login`, `register`, `logout`, `forgot-password`, `whoami` - Account
//! - `cart` - Show or change the cart
//! - `checkout` - Buy the cart and print a receipt
//! - `contact`, `subscribe` - Page forms
//! - `carousel` - Step the hero carousel

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use secrecy::SecretString;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use furnishme_core::ProductId;
use furnishme_storefront::catalog::CategoryFilter;
use furnishme_storefront::config::{ConfigError, LogFormat};
use furnishme_storefront::handlers::{ContactForm, LoginForm, Modal, ModalAction};
use furnishme_storefront::services::Registration;
use furnishme_storefront::storage::{FileStorage, StorageError};
use furnishme_storefront::{AppState, Event, Reply, StorefrontConfig, dispatch};

mod render;

/// Default tracing directive when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "furnishme=info";

#[derive(Parser)]
#[command(name = "furnishme")]
#[command(author, version, about = "FurnishMe storefront CLI")]
struct Cli {
    /// State file (overrides `FURNISHME_STORAGE_PATH`)
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products {
        /// Only show this category (`all` for everything)
        #[arg(short, long)]
        category: Option<CategoryFilter>,

        /// Show the home page selection instead of the shop
        #[arg(long, conflicts_with = "category")]
        featured: bool,
    },
    /// Log in
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Create an account and log in
    Register {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,

        #[arg(short, long)]
        confirm_password: String,
    },
    /// Log out and empty the cart
    Logout,
    /// Request a password reset link
    ForgotPassword {
        #[arg(short, long)]
        email: String,
    },
    /// Show or change the cart
    Cart {
        #[command(subcommand)]
        action: CartCommand,
    },
    /// Check out the cart
    Checkout,
    /// Show who is logged in
    Whoami,
    /// Send a message to the store
    Contact {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        message: String,
    },
    /// Subscribe to the newsletter
    Subscribe {
        #[arg(short, long)]
        email: String,
    },
    /// Step the hero carousel
    Carousel {
        #[command(subcommand)]
        action: CarouselCommand,
    },
}

#[derive(Subcommand)]
enum CartCommand {
    /// Show the cart
    Show,
    /// Add one unit of a product
    Add { product_id: ProductId },
    /// Remove a product's line
    Remove { product_id: ProductId },
    /// Increase a line's quantity by one
    Inc { product_id: ProductId },
    /// Decrease a line's quantity by one, removing it at zero
    Dec { product_id: ProductId },
}

#[derive(Subcommand)]
enum CarouselCommand {
    /// Show the next slide
    Next,
    /// Jump to a slide (zero-based)
    Goto { index: usize },
}

/// Errors that end a CLI run.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("render error: {0}")]
    Render(#[from] askama::Error),
}

fn main() {
    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::default());
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(2);
        }
    };
    init_tracing(config.log_format);

    let cli = Cli::parse();

    if let Err(e) = run(cli, &config) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Install the global tracing subscriber. Logs go to stderr.
fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

#[allow(clippy::print_stdout)]
fn run(cli: Cli, config: &StorefrontConfig) -> Result<(), CliError> {
    let path = cli.storage.unwrap_or_else(|| config.storage_path.clone());
    let storage = FileStorage::open(&path)?;
    let mut state = AppState::load(storage, config)?;

    state.cart_store_mut().subscribe(|cart| {
        tracing::debug!(items = cart.item_count(), "Cart badge updated");
    });
    state.session_store_mut().subscribe(|session| {
        tracing::debug!(status = %session.status(), "Session changed");
    });

    let output = match cli.command {
        Commands::Products { category, featured } => {
            if let Some(filter) = category {
                dispatch(&mut state, Event::SelectCategory(filter));
            }
            if featured {
                render::featured(&state)?
            } else {
                render::shop(&state)?
            }
        }
        Commands::Whoami => render::header(&state)?,
        command => match event_for(command) {
            Some(event) => {
                let reply = dispatch(&mut state, event);
                respond(&state, &reply)?
            }
            None => String::new(),
        },
    };

    print!("{output}");
    Ok(())
}

/// The event a command stands for. Read-only commands have none.
fn event_for(command: Commands) -> Option<Event> {
    let event = match command {
        Commands::Login { email, password } => Event::Login(LoginForm {
            email,
            password: SecretString::from(password),
        }),
        Commands::Register {
            name,
            email,
            password,
            confirm_password,
        } => Event::Register(Registration {
            name,
            email,
            password: SecretString::from(password),
            confirm_password: SecretString::from(confirm_password),
        }),
        Commands::Logout => Event::Logout,
        Commands::ForgotPassword { email } => Event::ForgotPassword { email },
        Commands::Cart { action } => match action {
            CartCommand::Show => Event::OpenCart,
            CartCommand::Add { product_id } => Event::AddToCart(product_id),
            CartCommand::Remove { product_id } => Event::RemoveFromCart(product_id),
            CartCommand::Inc { product_id } => Event::ChangeQuantity {
                product_id,
                delta: 1,
            },
            CartCommand::Dec { product_id } => Event::ChangeQuantity {
                product_id,
                delta: -1,
            },
        },
        Commands::Checkout => Event::Checkout,
        Commands::Contact {
            name,
            email,
            message,
        } => Event::Contact(ContactForm {
            name,
            email,
            message,
        }),
        Commands::Subscribe { email } => Event::Subscribe { email },
        Commands::Carousel { action } => match action {
            CarouselCommand::Next => Event::NextSlide,
            CarouselCommand::Goto { index } => Event::GoToSlide(index),
        },
        Commands::Products { .. } | Commands::Whoami => return None,
    };
    Some(event)
}

/// Render a reply: notifications first, then whatever it opened or changed.
fn respond(state: &AppState<FileStorage>, reply: &Reply) -> Result<String, askama::Error> {
    let mut output = render::notifications(&reply.notifications)?;

    if let Some(receipt) = &reply.receipt {
        output.push_str(&render::receipt(receipt)?);
    }
    if reply.modal == Some(ModalAction::Open(Modal::Cart)) || reply.rerender.cart {
        output.push_str(&render::cart(state)?);
    }
    if reply.rerender.header {
        output.push_str(&render::header(state)?);
    }
    if reply.rerender.carousel {
        output.push_str(&render::carousel(state)?);
    }
    if let Some(ModalAction::Open(modal)) = reply.modal
        && modal != Modal::Cart
        && modal != Modal::Receipt
    {
        output.push_str(&render::prompt(modal));
    }

    Ok(output)
}
