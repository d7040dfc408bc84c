//! # munchies
//!
//! Command line client for the Munchies food ordering service.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Startup Sequence                                 │
//! │                                                                         │
//! │  1. init_tracing()        RUST_LOG or "info,munchies=debug", to stderr  │
//! │  2. ClientConfig::load    defaults → client.toml → MUNCHIES_* env       │
//! │  3. Session storage       <cache>/sessions/<session id>/                │
//! │  4. Backend               RpcBackend, or InMemoryBackend with --demo    │
//! │  5. Run the command       the cart persists after every change          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Examples
//! ```text
//! munchies menu --category 2
//! munchies cart add 4 --quantity 2
//! munchies profile set "Sam"
//! munchies checkout
//! munchies admin advance 12 in-progress
//! munchies --session work session end
//! ```

mod commands;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use munchies_client::{Backend, ClientConfig, InMemoryBackend, QueryClient, RpcBackend};
use munchies_core::CategoryId;
use munchies_store::FileSessionStorage;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::commands::admin::AdminCommand;
use crate::commands::cart::CartCommand;
use crate::commands::profile::ProfileCommand;
use crate::commands::session::SessionCommand;

/// Session used when none is configured.
const DEFAULT_SESSION: &str = "default";

/// Caller of the in-process demo backend.
const DEMO_CALLER: &str = "demo-admin";

#[derive(Debug, Parser)]
#[command(name = "munchies", version, about = "Order food from the Munchies menu")]
struct Cli {
    /// Config file (default: platform config dir / client.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Browsing session whose cart to use
    #[arg(long, global = true)]
    session: Option<String>,

    /// Use a built-in menu instead of the backend (orders are not kept)
    #[arg(long, global = true)]
    demo: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List what can be ordered
    Menu {
        /// Only show this category
        #[arg(long)]
        category: Option<CategoryId>,
    },

    /// Inspect or change the cart
    #[command(subcommand)]
    Cart(CartCommand),

    /// Place an order for everything in the cart
    Checkout,

    /// Your past orders
    Orders,

    /// Your display name
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// Menu and order management (admins only)
    #[command(subcommand)]
    Admin(AdminCommand),

    /// Browsing session control
    #[command(subcommand)]
    Session(SessionCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let mut config = ClientConfig::load(cli.config.clone()).context("loading configuration")?;
    if let Some(session) = &cli.session {
        config.session.id = Some(session.clone());
    }

    let storage = open_session(&config)?;
    debug!(session_id = storage.session_id(), "Session storage ready");

    if cli.demo {
        info!("Using the built-in demo menu");
        let client = QueryClient::new(InMemoryBackend::demo(DEMO_CALLER));
        run(cli.command, &client, storage).await
    } else {
        let backend = RpcBackend::new(&config).context("creating backend client")?;
        debug!(url = %backend.base_url(), "Backend configured");
        let client = QueryClient::new(backend);
        run(cli.command, &client, storage).await
    }
}

async fn run<B: Backend>(
    command: Command,
    client: &QueryClient<B>,
    storage: FileSessionStorage,
) -> anyhow::Result<()> {
    match command {
        Command::Menu { category } => commands::menu::show(client, category).await,
        Command::Cart(cmd) => commands::cart::run(cmd, client, storage).await,
        Command::Checkout => commands::order::checkout(client, storage).await,
        Command::Orders => commands::order::history(client).await,
        Command::Profile(cmd) => commands::profile::run(cmd, client).await,
        Command::Admin(cmd) => commands::admin::run(cmd, client).await,
        Command::Session(cmd) => commands::session::run(cmd, storage),
    }
}

/// Opens the configured session's storage.
fn open_session(config: &ClientConfig) -> anyhow::Result<FileSessionStorage> {
    let root = match &config.session.storage_dir {
        Some(dir) => dir.clone(),
        None => FileSessionStorage::default_root()?,
    };
    let session_id = config.session.id.as_deref().unwrap_or(DEFAULT_SESSION);

    FileSessionStorage::open(&root, session_id)
        .with_context(|| format!("opening session '{}' under {}", session_id, root.display()))
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=munchies=trace` - Show trace for munchies crates only
/// - Default: INFO, DEBUG for munchies crates
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,munchies=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
