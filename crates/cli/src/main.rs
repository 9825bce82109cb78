//! Bookverse CLI - browse the catalog, manage the cart, and check out.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! bookverse books genres
//! bookverse books list --genre Fantasy --search dragons
//! bookverse books show 42
//!
//! # Manage the cart
//! bookverse cart add 42
//! bookverse cart inc 42
//! bookverse cart adjust 42 -- -3
//! bookverse cart show
//!
//! # Pay, then complete the order
//! bookverse checkout
//! bookverse order complete
//! ```
//!
//! The cart is saved under `BOOKVERSE_DATA_DIR` and survives between runs.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use bookverse_storefront::config::StorefrontConfig;
use bookverse_storefront::error::AppError;
use bookverse_storefront::state::AppState;
use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "bookverse")]
#[command(author, version, about = "Bookverse storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog
    Books {
        #[command(subcommand)]
        action: BooksAction,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Create a payment intent for the cart
    Checkout {
        /// Print the payment intent's client secret
        #[arg(long)]
        show_secret: bool,
    },
    /// Finish an order
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
}

#[derive(Subcommand)]
enum BooksAction {
    /// List one page of books
    List {
        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Books per page (defaults to `BOOKVERSE_PAGE_SIZE`)
        #[arg(long)]
        size: Option<u32>,

        /// Only books in this genre, e.g. `Fantasy` or `Science Fiction`
        /// (see `books genres`; `All` for every genre)
        #[arg(short, long, value_name = "GENRE")]
        genre: Option<String>,

        /// Search term
        #[arg(short, long)]
        search: Option<String>,
    },
    /// List the genres the catalog can be filtered by
    Genres,
    /// Show a single book
    Show {
        /// Book ID or ISBN
        id: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart
    Show,
    /// Add one copy of a book
    Add {
        /// Book ID or ISBN
        id: String,
    },
    /// Increase a book's quantity by one
    Inc { id: String },
    /// Decrease a book's quantity by one, removing it at zero
    Dec { id: String },
    /// Change a book's quantity by a signed amount
    Adjust {
        id: String,
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
    /// Remove a book entirely
    Remove { id: String },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum OrderAction {
    /// Mark the order paid and empty the cart
    Complete,
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

fn init_tracing() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bookverse_storefront=info,bookverse_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Configuration is needed for Sentry, which must start before tracing
    let config = StorefrontConfig::from_env();
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);
    init_tracing();

    let result = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(AppError::from(e)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            e.report();
            commands::print_error(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: StorefrontConfig) -> Result<(), AppError> {
    let state = AppState::new(config)?;

    match cli.command {
        Commands::Books { action } => match action {
            BooksAction::List {
                page,
                size,
                genre,
                search,
            } => commands::books::list(&state, page, size, genre, search).await?,
            BooksAction::Genres => commands::books::genres()?,
            BooksAction::Show { id } => commands::books::show(&state, &id).await?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&state)?,
            CartAction::Add { id } => commands::cart::add(&state, &id).await?,
            CartAction::Inc { id } => commands::cart::adjust(&state, &id, 1)?,
            CartAction::Dec { id } => commands::cart::adjust(&state, &id, -1)?,
            CartAction::Adjust { id, delta } => commands::cart::adjust(&state, &id, delta)?,
            CartAction::Remove { id } => commands::cart::remove(&state, &id)?,
            CartAction::Clear => commands::cart::clear(&state)?,
        },
        Commands::Checkout { show_secret } => {
            commands::checkout::begin(&state, show_secret).await?;
        }
        Commands::Order { action } => match action {
            OrderAction::Complete => commands::checkout::complete(&state)?,
        },
    }
    Ok(())
}
