//! # Domain Types
//!
//! Core domain types shared by the cart, the backend client and the views.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    MenuItem     │   │      Order      │   │    Category     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (u64)       │   │  id (u64)       │   │  id (u64)       │       │
//! │  │  category_id    │   │  status         │   │  name           │       │
//! │  │  name           │   │  total_cents    │   │  description    │       │
//! │  │  available      │   │  items[]        │   └─────────────────┘       │
//! │  │  price_cents    │   └─────────────────┘                              │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   OrderStatus   │   │    UserRole     │   │   OrderLine     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Pending        │   │  Admin          │   │  item_id        │       │
//! │  │  InProgress     │   │  User           │   │  quantity       │       │
//! │  │  Completed      │   │  Guest          │   └─────────────────┘       │
//! │  │  Cancelled      │   └─────────────────┘                              │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! Every entity here is owned by the backend. The client keeps read-only
//! copies; the only client-side mutation on an order is an admin status change.
//! Wire field names are camelCase to match the backend interface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// Backend identifier of a menu item.
pub type ItemId = u64;

/// Backend identifier of a category.
pub type CategoryId = u64;

/// Backend identifier of an order.
pub type OrderId = u64;

// =============================================================================
// Menu
// =============================================================================

/// A dish on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MenuItem {
    /// Unique identifier assigned by the backend.
    pub id: ItemId,

    /// Category this item is listed under.
    pub category_id: CategoryId,

    /// Display name.
    pub name: String,

    pub description: String,

    /// Whether the kitchen currently offers this item.
    pub available: bool,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,
}

impl MenuItem {
    /// Creates an available item with an empty description.
    pub fn new(id: ItemId, category_id: CategoryId, name: impl Into<String>, price_cents: i64) -> Self {
        MenuItem {
            id,
            category_id,
            name: name.into(),
            description: String::new(),
            available: true,
            price_cents,
        }
    }

    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// A menu section such as "Burgers" or "Drinks".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
}

/// Fields an admin submits when creating or editing a menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ItemDraft {
    pub name: String,
    pub category_id: CategoryId,
    pub description: String,
    pub price_cents: i64,
    pub available: bool,
}

impl ItemDraft {
    /// Builds a draft pre-filled from an existing item (edit dialog).
    pub fn from_item(item: &MenuItem) -> Self {
        ItemDraft {
            name: item.name.clone(),
            category_id: item.category_id,
            description: item.description.clone(),
            price_cents: item.price_cents,
            available: item.available,
        }
    }

    /// Materializes the draft as an item with the given id.
    pub fn into_item(self, id: ItemId) -> MenuItem {
        MenuItem {
            id,
            category_id: self.category_id,
            name: self.name,
            description: self.description,
            available: self.available,
            price_cents: self.price_cents,
        }
    }
}

/// Fields an admin submits when creating or editing a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CategoryDraft {
    pub name: String,
    pub description: String,
}

// =============================================================================
// Order Status
// =============================================================================

/// Lifecycle status of an order.
///
/// See [`crate::order_status`] for the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum OrderStatus {
    /// Placed, not yet picked up by the kitchen.
    Pending,
    /// Being prepared.
    InProgress,
    /// Handed to the customer. Terminal.
    Completed,
    /// Abandoned. Terminal.
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

// =============================================================================
// Order
// =============================================================================

/// One `(item, quantity)` entry of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderLine {
    pub item_id: ItemId,
    pub quantity: i64,
}

/// A placed order as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
    /// Total in cents, computed by the backend at placement time.
    pub total_cents: i64,
    /// Principal of the customer who placed the order.
    pub customer: String,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
    pub items: Vec<OrderLine>,
}

impl Order {
    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Total number of units across all lines.
    pub fn unit_count(&self) -> i64 {
        self.items.iter().map(|line| line.quantity).sum()
    }
}

// =============================================================================
// Users
// =============================================================================

/// Profile the caller saves on first login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserProfile {
    pub name: String,
}

/// Privilege level the backend assigns to a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum UserRole {
    Admin,
    User,
    Guest,
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Guest
    }
}

impl UserRole {
    /// Returns true for operators allowed into the admin console.
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_wire_names() {
        let json = serde_json::to_string(&OrderStatus::InProgress).unwrap();
        assert_eq!(json, "\"inProgress\"");

        let parsed: OrderStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(parsed, OrderStatus::Cancelled);
    }

    #[test]
    fn test_menu_item_wire_format() {
        let item = MenuItem::new(3, 1, "Fries", 250);
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["categoryId"], 1);
        assert_eq!(value["priceCents"], 250);
        assert_eq!(value["available"], true);
    }

    #[test]
    fn test_item_draft_round_trip() {
        let mut item = MenuItem::new(9, 2, "Shake", 450);
        item.description = "Vanilla".to_string();

        let draft = ItemDraft::from_item(&item);
        assert_eq!(draft.into_item(9), item);
    }

    #[test]
    fn test_order_unit_count() {
        let order = Order {
            id: 1,
            status: OrderStatus::default(),
            total_cents: 1300,
            customer: "aaaaa-aa".to_string(),
            timestamp: Utc::now(),
            items: vec![
                OrderLine { item_id: 1, quantity: 2 },
                OrderLine { item_id: 2, quantity: 1 },
            ],
        };
        assert_eq!(order.unit_count(), 3);
        assert_eq!(order.total().cents(), 1300);
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn test_user_role() {
        assert!(UserRole::Admin.is_admin());
        assert!(!UserRole::User.is_admin());
        assert_eq!(UserRole::default(), UserRole::Guest);
    }
}
