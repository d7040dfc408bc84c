//! # Cart Store
//!
//! The session cart: a [`Cart`] reducer plus write-through persistence.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Store Lifecycle                             │
//! │                                                                         │
//! │  Session start                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartStore::load(storage) ── read "munchies-cart" ──┐                   │
//! │       │                                             │                   │
//! │       │        missing / unreadable / corrupt ──────┴──► empty cart     │
//! │       ▼                                                  (warn! only)   │
//! │  add_item / remove_item / update_quantity / clear                       │
//! │       │                                                                 │
//! │       ├──► Cart::apply(action)   (in-memory state is the truth)         │
//! │       │                                                                 │
//! │       └──► persist()             (write failure: warn!, state kept)     │
//! │                                                                         │
//! │  Order placed ──► clear()                                               │
//! │  Session end  ──► storage dropped, nothing survives                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! The store is a plain owned value. Callers that share it across tasks wrap
//! it in `Arc<Mutex<_>>`, which keeps each action atomic with respect to the
//! in-memory state.

use munchies_core::{Cart, CartAction, CartLine, ItemId, MenuItem, Money};
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::storage::{SessionStorage, CART_STORAGE_KEY};

/// A cart that survives reloads within one session.
#[derive(Debug)]
pub struct CartStore<S: SessionStorage> {
    cart: Cart,
    storage: S,
    key: String,
}

impl<S: SessionStorage> CartStore<S> {
    /// Rehydrates the cart stored under [`CART_STORAGE_KEY`].
    ///
    /// Never fails: anything that prevents reading the previous cart results
    /// in an empty one.
    pub fn load(storage: S) -> Self {
        Self::with_key(storage, CART_STORAGE_KEY)
    }

    /// Rehydrates the cart stored under a custom key.
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();

        let cart = match read_cart(&storage, &key) {
            Ok(Some(cart)) => {
                debug!(key = %key, lines = cart.line_count(), "Restored cart from session storage");
                cart
            }
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to load cart from storage, starting empty");
                Cart::new()
            }
        };

        CartStore { cart, storage, key }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds `quantity` of `item`, merging into an existing line.
    ///
    /// Returns false when the cart was left as it was (non-positive or
    /// overflowing quantity).
    pub fn add_item(&mut self, item: &MenuItem, quantity: i64) -> bool {
        self.dispatch(CartAction::AddItem {
            item: item.clone(),
            quantity,
        })
    }

    /// Removes the line for `item_id`.
    pub fn remove_item(&mut self, item_id: ItemId) -> bool {
        self.dispatch(CartAction::RemoveItem { item_id })
    }

    /// Sets the quantity for `item_id`; ≤ 0 removes the line.
    pub fn update_quantity(&mut self, item_id: ItemId, quantity: i64) -> bool {
        self.dispatch(CartAction::UpdateQuantity { item_id, quantity })
    }

    /// Empties the cart.
    pub fn clear(&mut self) -> bool {
        self.dispatch(CartAction::Clear)
    }

    /// Applies an action and writes the resulting state.
    ///
    /// The write happens after every action, changed or not, so storage always
    /// mirrors the in-memory cart.
    ///
    /// ## Returns
    /// `true` when the lines changed.
    pub fn dispatch(&mut self, action: CartAction) -> bool {
        let changed = self.cart.apply(action);
        debug!(changed, lines = self.cart.line_count(), "Cart action applied");
        self.persist();
        changed
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Sum of snapshot price × quantity.
    pub fn total(&self) -> Money {
        self.cart.total()
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> i64 {
        self.cart.item_count()
    }

    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// The underlying cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The storage the cart is persisted into.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consumes the store, returning its storage.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist(&self) {
        if let Err(e) = write_cart(&self.storage, &self.key, &self.cart) {
            warn!(key = %self.key, error = %e, "Failed to persist cart, keeping in-memory state");
        }
    }
}

fn read_cart<S: SessionStorage>(storage: &S, key: &str) -> StoreResult<Option<Cart>> {
    let Some(raw) = storage.get_item(key)? else {
        return Ok(None);
    };

    let lines: Vec<CartLine> =
        serde_json::from_str(&raw).map_err(|e| StoreError::corrupt(key, e))?;
    let cart = Cart::from_lines(lines).map_err(|e| StoreError::corrupt(key, e))?;
    Ok(Some(cart))
}

fn write_cart<S: SessionStorage>(storage: &S, key: &str, cart: &Cart) -> StoreResult<()> {
    let raw = serde_json::to_string(cart)?;
    storage.set_item(key, &raw)
}
