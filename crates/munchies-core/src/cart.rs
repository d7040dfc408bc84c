//! # Cart
//!
//! The customer's shopping cart as a pure reducer.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Reducer                                         │
//! │                                                                         │
//! │  View Action              CartAction                 Lines Change       │
//! │  ───────────              ──────────                 ────────────       │
//! │                                                                         │
//! │  "Add to cart" ─────────► AddItem { item, qty } ───► qty += n or push   │
//! │                                                                         │
//! │  Quantity stepper ──────► UpdateQuantity ──────────► qty = n (≤0 drops) │
//! │                                                                         │
//! │  Trash icon ────────────► RemoveItem ──────────────► line removed       │
//! │                                                                         │
//! │  Order placed ──────────► Clear ───────────────────► lines emptied      │
//! │                                                                         │
//! │  Startup rehydrate ─────► Load(lines) ─────────────► lines replaced     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per item id (adding an item again increases quantity)
//! - Every line has quantity ≥ 1
//! - Item count and total fit in an `i64`
//! - Lines keep insertion order (first added, first listed)
//!
//! Invalid inputs (unknown ids, non-positive add quantities, quantities that
//! would overflow) are no-ops, never errors.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{ItemId, MenuItem, OrderLine};

// =============================================================================
// Cart Line
// =============================================================================

/// An item in the cart.
///
/// `item` is a snapshot taken when the line was first added. Totals computed
/// from the cart use this snapshot price; call [`Cart::repriced`] to join
/// against freshly fetched items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    pub item: MenuItem,
    pub quantity: i64,
}

impl CartLine {
    /// Line subtotal (snapshot price × quantity).
    pub fn subtotal(&self) -> Money {
        self.item.price().multiply_quantity(self.quantity)
    }

    /// Identifier of the item on this line.
    #[inline]
    pub fn item_id(&self) -> ItemId {
        self.item.id
    }
}

// =============================================================================
// Cart Action
// =============================================================================

/// A state transition of the cart reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    AddItem { item: MenuItem, quantity: i64 },
    RemoveItem { item_id: ItemId },
    UpdateQuantity { item_id: ItemId, quantity: i64 },
    Clear,
    /// Replaces the lines with previously persisted state.
    Load(Vec<CartLine>),
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// Serializes as a plain JSON array of lines, which is the persisted form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Builds a cart from lines of unknown provenance.
    ///
    /// Lines for the same item are merged into the first occurrence and lines
    /// with a non-positive quantity are dropped, so the result always holds
    /// the cart invariants.
    ///
    /// ## Errors
    /// [`CoreError::QuantityTooLarge`] when merged quantities, the item count
    /// or the total do not fit in an `i64`.
    pub fn from_lines(lines: Vec<CartLine>) -> CoreResult<Self> {
        let mut cart = Cart::new();
        for line in lines {
            if line.quantity <= 0 {
                continue;
            }
            cart.try_add_item(&line.item, line.quantity)?;
        }
        Ok(cart)
    }

    /// Applies one reducer action.
    ///
    /// ## Returns
    /// `true` when the lines changed.
    pub fn apply(&mut self, action: CartAction) -> bool {
        let before = self.lines.clone();

        match action {
            CartAction::AddItem { item, quantity } => self.add_item(&item, quantity),
            CartAction::RemoveItem { item_id } => self.remove_item(item_id),
            CartAction::UpdateQuantity { item_id, quantity } => {
                self.update_quantity(item_id, quantity)
            }
            CartAction::Clear => self.clear(),
            CartAction::Load(lines) => *self = Cart::from_lines(lines).unwrap_or_default(),
        }

        self.lines != before
    }

    /// Adds an item or increases its quantity if already present.
    ///
    /// ## Behavior
    /// - Item already in cart: quantity increases by `quantity`
    /// - Item not in cart: appended as a new line with a snapshot of `item`
    /// - `quantity` ≤ 0: ignored
    /// - Resulting quantity, item count or total would overflow: ignored
    pub fn add_item(&mut self, item: &MenuItem, quantity: i64) {
        if quantity <= 0 {
            return;
        }
        let _ = self.try_add_item(item, quantity);
    }

    fn try_add_item(&mut self, item: &MenuItem, quantity: i64) -> CoreResult<()> {
        let index = self.position(item.id);
        let (price, merged) = match index {
            Some(i) => {
                let line = &self.lines[i];
                (line.item.price(), line.quantity.checked_add(quantity))
            }
            None => (item.price(), Some(quantity)),
        };

        let merged = merged
            .filter(|q| self.fits(index, price, *q))
            .ok_or(CoreError::QuantityTooLarge(item.id))?;

        match index {
            Some(i) => self.lines[i].quantity = merged,
            None => self.lines.push(CartLine {
                item: item.clone(),
                quantity: merged,
            }),
        }
        Ok(())
    }

    /// Removes the line for `item_id`, if present.
    pub fn remove_item(&mut self, item_id: ItemId) {
        self.lines.retain(|l| l.item.id != item_id);
    }

    /// Sets the quantity of the line for `item_id`.
    ///
    /// ## Behavior
    /// - Quantity ≤ 0: removes the line
    /// - Item not in cart: no-op
    /// - Item count or total would overflow: no-op
    pub fn update_quantity(&mut self, item_id: ItemId, quantity: i64) {
        let Some(index) = self.position(item_id) else {
            return;
        };

        if quantity <= 0 {
            self.lines.remove(index);
        } else if self.fits(Some(index), self.lines[index].item.price(), quantity) {
            self.lines[index].quantity = quantity;
        }
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn position(&self, item_id: ItemId) -> Option<usize> {
        self.lines.iter().position(|l| l.item.id == item_id)
    }

    /// Whether item count and total stay within `i64` with the line at
    /// `index` (or a new line when `None`) holding `quantity` at `price`.
    fn fits(&self, index: Option<usize>, price: Money, quantity: i64) -> bool {
        let others = self
            .lines
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != index)
            .map(|(_, l)| l);

        let mut count = Some(quantity);
        let mut total = price.checked_multiply_quantity(quantity);
        for line in others {
            count = count.and_then(|c| c.checked_add(line.quantity));
            total = total.and_then(|t| {
                line.item
                    .price()
                    .checked_multiply_quantity(line.quantity)
                    .and_then(|s| t.checked_add(s))
            });
        }
        count.is_some() && total.is_some()
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Returns the line for `item_id`.
    pub fn line(&self, item_id: ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.item.id == item_id)
    }

    /// Total of snapshot price × quantity over all lines.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Sum of all quantities (not the number of distinct lines).
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines joined against current item data.
    ///
    /// Each line takes the live item with the same id when one exists and
    /// keeps its snapshot otherwise (the item was deleted since it was added).
    pub fn repriced(&self, live_items: &[MenuItem]) -> Vec<CartLine> {
        self.lines
            .iter()
            .map(|line| {
                let item = live_items
                    .iter()
                    .find(|i| i.id == line.item.id)
                    .unwrap_or(&line.item);
                CartLine {
                    item: item.clone(),
                    quantity: line.quantity,
                }
            })
            .collect()
    }

    /// The `(item id, quantity)` pairs submitted when placing an order.
    pub fn order_lines(&self) -> Vec<OrderLine> {
        self.lines
            .iter()
            .map(|l| OrderLine {
                item_id: l.item.id,
                quantity: l.quantity,
            })
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
