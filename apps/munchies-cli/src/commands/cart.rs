//! # Cart Commands
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  cart add 4 ──► cart set 4 3 ──► cart show ──► checkout ──► (empty)     │
//! │                      │                                                  │
//! │                 cart set 4 0 / cart remove 4 ──► line gone              │
//! │                                                                         │
//! │  Every change is written to the session before the command exits.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use clap::Subcommand;
use munchies_client::{summarize, Backend, QueryClient};
use munchies_core::menu::find_item;
use munchies_core::ItemId;
use munchies_store::{CartStore, FileSessionStorage};
use tracing::warn;

#[derive(Debug, Subcommand)]
pub enum CartCommand {
    /// Show the cart with current prices
    Show,

    /// Add an item
    Add {
        item_id: ItemId,
        #[arg(long, short, default_value_t = 1)]
        quantity: i64,
    },

    /// Remove an item
    Remove { item_id: ItemId },

    /// Set an item's quantity (0 or less removes it)
    Set {
        item_id: ItemId,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Empty the cart
    Clear,
}

pub async fn run<B: Backend>(
    cmd: CartCommand,
    client: &QueryClient<B>,
    storage: FileSessionStorage,
) -> anyhow::Result<()> {
    let mut store = CartStore::load(storage);

    match cmd {
        CartCommand::Show => {}
        CartCommand::Add { item_id, quantity } => {
            if quantity <= 0 {
                anyhow::bail!("Quantity must be at least 1");
            }

            let items = client.items().await?;
            let item = find_item(&items, item_id)
                .ok_or_else(|| anyhow::anyhow!("Menu item {} not found", item_id))?;
            if !item.available {
                anyhow::bail!("{} is not available right now", item.name);
            }

            if !store.add_item(item, quantity) {
                anyhow::bail!("Quantity {} is too large", quantity);
            }
            println!("Added {} × {}", quantity, item.name);
        }
        CartCommand::Remove { item_id } => {
            store.remove_item(item_id);
        }
        CartCommand::Set { item_id, quantity } => {
            store.update_quantity(item_id, quantity);
            if let Some(line) = store.cart().line(item_id) {
                if line.quantity != quantity {
                    anyhow::bail!("Quantity {} is too large", quantity);
                }
            }
        }
        CartCommand::Clear => {
            store.clear();
        }
    }

    print_cart(client, &store).await;
    Ok(())
}

/// Prints the cart repriced against the current menu.
pub async fn print_cart<B: Backend>(client: &QueryClient<B>, store: &CartStore<FileSessionStorage>) {
    if store.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    let live_items = client.items().await.unwrap_or_else(|e| {
        warn!(error = %e, "Could not refresh menu, showing cart prices");
        Vec::new()
    });
    let summary = summarize(store.cart(), &live_items);

    for line in &summary.lines {
        println!(
            "  #{:<4} {:<28} x{:<3} {:>10}",
            line.item.id,
            line.item.name,
            line.quantity,
            line.subtotal().to_string()
        );
    }
    println!("  {} item(s), total {}", summary.item_count, summary.total);
}
