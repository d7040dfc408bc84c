//! # CLI Commands
//!
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── menu.rs     ◄─── Browsing the menu
//! ├── cart.rs     ◄─── Session cart manipulation
//! ├── order.rs    ◄─── Checkout and order history
//! ├── admin.rs    ◄─── Order board and menu management
//! ├── profile.rs  ◄─── First-login profile setup
//! └── session.rs  ◄─── Browsing session control
//! ```
//!
//! Every command borrows a `QueryClient` and prints plain text to stdout.
//! Logs go to stderr.

pub mod admin;
pub mod cart;
pub mod menu;
pub mod order;
pub mod profile;
pub mod session;
