//! # munchies-store: Session Cart Persistence
//!
//! Keeps the customer's cart across reloads within one browsing session.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         munchies-store                                  │
//! │                                                                         │
//! │  ┌───────────────────────────────────────────────────────────────────┐ │
//! │  │                    CartStore<S: SessionStorage>                   │ │
//! │  │   Cart reducer (munchies-core) + write-through on every action    │ │
//! │  └──────────────────────────────┬────────────────────────────────────┘ │
//! │                                 │                                      │
//! │               ┌─────────────────┴─────────────────┐                    │
//! │               ▼                                   ▼                    │
//! │  ┌────────────────────────┐         ┌────────────────────────────────┐ │
//! │  │     MemoryStorage      │         │      FileSessionStorage        │ │
//! │  │  HashMap, shared by    │         │  <cache>/sessions/<id>/<key>   │ │
//! │  │  clones (tests, embed) │         │  (CLI sessions)                │ │
//! │  └────────────────────────┘         └────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use munchies_core::MenuItem;
//! use munchies_store::{CartStore, MemoryStorage};
//!
//! let session = MemoryStorage::new();
//!
//! let mut store = CartStore::load(session.clone());
//! store.add_item(&MenuItem::new(1, 1, "Burger", 500), 2);
//!
//! // Page reload
//! let store = CartStore::load(session);
//! assert_eq!(store.total().cents(), 1000);
//! ```

pub mod cart_store;
pub mod error;
pub mod file;
pub mod memory;
pub mod storage;

pub use cart_store::CartStore;
pub use error::{StoreError, StoreResult};
pub use file::FileSessionStorage;
pub use memory::MemoryStorage;
pub use storage::{SessionStorage, CART_STORAGE_KEY};
