//! # Order Commands
//!
//! Checkout and the customer's order history.

use munchies_client::checkout::place_order;
use munchies_client::{describe_order, Backend, OrderLineView, QueryClient};
use munchies_core::Order;
use munchies_store::{CartStore, FileSessionStorage};

use super::cart::print_cart;

/// Places the order. On failure the cart is left as it was.
pub async fn checkout<B: Backend>(
    client: &QueryClient<B>,
    storage: FileSessionStorage,
) -> anyhow::Result<()> {
    let mut store = CartStore::load(storage);
    print_cart(client, &store).await;

    let receipt = place_order(client, &mut store).await?;
    println!();
    println!("Order #{} placed. Total {}.", receipt.order_id, receipt.total);
    Ok(())
}

/// Lists the caller's orders, newest first.
pub async fn history<B: Backend>(client: &QueryClient<B>) -> anyhow::Result<()> {
    let mut orders = client.customer_orders().await?;
    if orders.is_empty() {
        println!("No orders yet.");
        return Ok(());
    }
    orders.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let items = client.items().await?;
    for order in &orders {
        print_order(order);
        for line in describe_order(order, &items) {
            print_line(&line);
        }
    }
    Ok(())
}

pub(crate) fn print_order(order: &Order) {
    println!(
        "Order #{:<5} {:<12} {:>10}  {}",
        order.id,
        order.status.label(),
        order.total().to_string(),
        order.timestamp.format("%Y-%m-%d %H:%M")
    );
}

/// Items that no longer exist print without a price.
pub(crate) fn print_line(line: &OrderLineView) {
    let subtotal = line.subtotal.map_or_else(|| "-".to_string(), |m| m.to_string());
    println!("    {:<28} x{:<3} {:>10}", line.name, line.quantity, subtotal);
}
