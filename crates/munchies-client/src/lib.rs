//! # munchies-client: Remote Data Access for the Munchies Client
//!
//! Everything that talks to the backend: the typed call surface, its HTTP
//! transport, a read cache, and the checkout and admin flows built on them.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   CartStore (munchies-store)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │   checkout::place_order ───────┐        AdminConsole                    │
//! │                                ▼             │                          │
//! │                     ┌──────────────────┐     │                          │
//! │                     │   QueryClient    │◄────┘                          │
//! │                     │ cache + invalid. │                                │
//! │                     └────────┬─────────┘                                │
//! │                              ▼                                          │
//! │                     ┌──────────────────┐                                │
//! │                     │  impl Backend    │  RpcBackend | InMemoryBackend  │
//! │                     └──────────────────┘                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use munchies_client::{checkout, InMemoryBackend, QueryClient};
//! use munchies_store::{CartStore, MemoryStorage};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let backend = InMemoryBackend::demo("admin").as_caller("alice");
//! let client = QueryClient::new(backend);
//!
//! let items = client.items().await.unwrap();
//! let mut cart = CartStore::load(MemoryStorage::new());
//! cart.add_item(&items[0], 2);
//!
//! let receipt = checkout::place_order(&client, &mut cart).await.unwrap();
//! assert_eq!(receipt.total.cents(), 2 * items[0].price_cents);
//! assert!(cart.is_empty());
//! # });
//! ```

pub mod admin;
pub mod backend;
pub mod cache;
pub mod checkout;
pub mod config;
pub mod error;
pub mod memory;
pub mod rpc;

pub use admin::{AdminConsole, ORDER_TABS};
pub use backend::Backend;
pub use cache::{QueryClient, QueryKey};
pub use checkout::{describe_order, summarize, CheckoutSummary, OrderLineView, OrderReceipt};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use memory::InMemoryBackend;
pub use rpc::{RetryPolicy, RpcBackend};
