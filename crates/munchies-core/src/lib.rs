//! # munchies-core: Pure Domain Logic for the Munchies Client
//!
//! This crate holds the client-side domain behavior of the food-ordering
//! application as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Munchies Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Views (web front end / munchies CLI)            │   │
//! │  │    Menu ──► Cart ──► Checkout ──► Confirmation │ Admin console  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │   munchies-store (session cart)  │  munchies-client (backend)   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ munchies-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌─────────────┐  ┌──────────┐  │   │
//! │  │   │   types   │  │   money   │  │    cart     │  │  order_  │  │   │
//! │  │   │ MenuItem  │  │   Money   │  │   Cart      │  │  status  │  │   │
//! │  │   │  Order    │  │  format   │  │ CartAction  │  │  policy  │  │   │
//! │  │   └───────────┘  └───────────┘  └─────────────┘  └──────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (MenuItem, Category, Order, OrderStatus, ...)
//! - [`money`] - Money type with integer arithmetic and price formatting
//! - [`cart`] - Cart reducer (add / remove / update / clear)
//! - [`order_status`] - Order lifecycle transition table
//! - [`menu`] - Catalog queries used by the menu and order views
//! - [`validation`] - Admin form validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use munchies_core::{Cart, MenuItem, OrderStatus};
//!
//! let burger = MenuItem::new(1, 10, "Burger", 500);
//!
//! let mut cart = Cart::new();
//! cart.add_item(&burger, 2);
//! assert_eq!(cart.total().cents(), 1000);
//!
//! assert_eq!(
//!     OrderStatus::Pending.next_valid_statuses(),
//!     &[OrderStatus::InProgress, OrderStatus::Cancelled]
//! );
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod menu;
pub mod money;
pub mod order_status;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartAction, CartLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{format_price, Money};
pub use order_status::next_valid_statuses;
pub use types::*;
