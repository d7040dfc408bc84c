//! # Session Storage
//!
//! The key/value scope the cart is persisted into.
//!
//! ## Scope
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Session A (tab / CLI session)         Session B                        │
//! │  ┌──────────────────────────────┐      ┌──────────────────────────────┐ │
//! │  │ "munchies-cart" → [lines…]   │      │ "munchies-cart" → [lines…]   │ │
//! │  └──────────────────────────────┘      └──────────────────────────────┘ │
//! │                                                                         │
//! │  • Survives reloads within a session                                    │
//! │  • Never shared between sessions                                        │
//! │  • Gone when the session ends                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::StoreResult;

/// Fixed key the cart lines are stored under.
pub const CART_STORAGE_KEY: &str = "munchies-cart";

/// A string key/value store scoped to one browsing session.
///
/// Methods take `&self`; implementations use interior mutability so that a
/// storage handle can be shared between a store and whatever simulates a
/// reload.
pub trait SessionStorage {
    /// Reads the value under `key`, `None` if nothing is stored.
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Deletes the value under `key`; missing keys are not an error.
    fn remove_item(&self, key: &str) -> StoreResult<()>;
}

impl<S: SessionStorage + ?Sized> SessionStorage for &S {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        (**self).remove_item(key)
    }
}

impl<S: SessionStorage + ?Sized> SessionStorage for Box<S> {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        (**self).remove_item(key)
    }
}
