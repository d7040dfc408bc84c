//! # Checkout
//!
//! Turns the session cart into a placed order.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Checkout Flow                                   │
//! │                                                                         │
//! │  CartStore ──► empty? ──yes──► CoreError::EmptyCart (nothing sent)      │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  summarize(cart, live items)   refetched; snapshot if item is gone      │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  placeOrder([(item id, qty)])  sent once, never retried                 │
//! │      │                                                                  │
//! │      ├── Err ──► returned, cart untouched (user can retry)              │
//! │      │                                                                  │
//! │      └── Ok(id) ──► cart cleared ──► OrderReceipt { id, total }         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use munchies_core::menu::{item_name_or_unknown, line_subtotal};
use munchies_core::{Cart, CartLine, CoreError, MenuItem, Money, Order, OrderId, OrderLine};
use munchies_store::{CartStore, SessionStorage};
use tracing::{info, warn};

use crate::backend::Backend;
use crate::cache::{QueryClient, QueryKey};
use crate::error::{ClientError, ClientResult};

/// What the checkout screen shows before the order is placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSummary {
    /// Cart lines joined against current menu data.
    pub lines: Vec<CartLine>,
    pub total: Money,
    pub item_count: i64,
}

/// Result of a successful checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderReceipt {
    pub order_id: OrderId,

    /// Total shown at checkout. The backend's own total on the order is
    /// authoritative.
    pub total: Money,
}

/// Joins the cart against freshly fetched items.
pub fn summarize(cart: &Cart, live_items: &[MenuItem]) -> CheckoutSummary {
    let lines = cart.repriced(live_items);
    let total = lines.iter().map(CartLine::subtotal).sum();
    let item_count = lines.iter().map(|l| l.quantity).sum();

    CheckoutSummary {
        lines,
        total,
        item_count,
    }
}

/// Places an order for everything in the cart.
///
/// The cart is cleared only once the backend has returned an order id.
pub async fn place_order<B, S>(
    client: &QueryClient<B>,
    store: &mut CartStore<S>,
) -> ClientResult<OrderReceipt>
where
    B: Backend,
    S: SessionStorage,
{
    if store.is_empty() {
        return Err(ClientError::Core(CoreError::EmptyCart));
    }

    client.invalidate(QueryKey::Items).await;
    let live_items = match client.items().await {
        Ok(items) => items,
        Err(e) => {
            warn!(error = %e, "Could not refresh menu, using prices from the cart");
            Vec::new()
        }
    };
    let summary = summarize(store.cart(), &live_items);

    let order_id = client
        .place_order(store.cart().order_lines())
        .await
        .map_err(|e| {
            warn!(error = %e, lines = summary.lines.len(), "Order placement failed, cart kept");
            e
        })?;

    store.clear();
    info!(order_id, total = %summary.total, "Order placed");

    Ok(OrderReceipt {
        order_id,
        total: summary.total,
    })
}

// =============================================================================
// Order Details
// =============================================================================

/// One line of a placed order, as the confirmation and admin views show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLineView {
    pub item_id: u64,
    /// Current item name, or "Unknown" if the item was deleted.
    pub name: String,
    pub quantity: i64,
    /// `None` when the item no longer exists.
    pub subtotal: Option<Money>,
}

/// Resolves an order's lines against the current menu.
pub fn describe_order(order: &Order, items: &[MenuItem]) -> Vec<OrderLineView> {
    order
        .items
        .iter()
        .map(|line: &OrderLine| OrderLineView {
            item_id: line.item_id,
            name: item_name_or_unknown(items, line.item_id).to_string(),
            quantity: line.quantity,
            subtotal: line_subtotal(items, line),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{InMemoryBackend, ANONYMOUS};
    use munchies_core::menu::UNKNOWN_ITEM_NAME;
    use munchies_store::MemoryStorage;

    async fn menu(backend: &InMemoryBackend) -> Vec<MenuItem> {
        backend.get_all_items().await.unwrap()
    }

    #[tokio::test]
    async fn test_successful_checkout_clears_cart() {
        let admin = InMemoryBackend::demo("admin");
        let items = menu(&admin).await;
        let client = QueryClient::new(admin.as_caller("alice"));

        let session = MemoryStorage::new();
        let mut store = CartStore::load(session.clone());
        store.add_item(&items[0], 2); // Classic Burger 8.99
        store.add_item(&items[3], 1); // Fries 3.99

        let receipt = place_order(&client, &mut store).await.unwrap();
        assert_eq!(receipt.total.cents(), 2 * 899 + 399);
        assert!(store.is_empty());
        assert!(CartStore::load(session).is_empty());

        let orders = client.customer_orders().await.unwrap();
        assert_eq!(orders[0].id, receipt.order_id);
        assert_eq!(orders[0].total_cents, receipt.total.cents());
    }

    #[tokio::test]
    async fn test_receipt_uses_prices_changed_after_browsing() {
        let admin = InMemoryBackend::demo("admin");
        let client = QueryClient::new(admin.as_caller("alice"));

        // Menu browsed earlier warms the cache
        let items = client.items().await.unwrap();
        let mut store = CartStore::load(MemoryStorage::new());
        store.add_item(&items[0], 1);

        admin.set_price(items[0].id, 1500).await.unwrap();

        let receipt = place_order(&client, &mut store).await.unwrap();
        let orders = client.customer_orders().await.unwrap();
        assert_eq!(receipt.total.cents(), 1500);
        assert_eq!(orders[0].total_cents, receipt.total.cents());
        assert_eq!(client.items().await.unwrap()[0].price_cents, 1500);
    }

    #[tokio::test]
    async fn test_failed_checkout_keeps_cart() {
        let admin = InMemoryBackend::demo("admin");
        let items = menu(&admin).await;
        let client = QueryClient::new(admin.as_caller(ANONYMOUS));

        let session = MemoryStorage::new();
        let mut store = CartStore::load(session.clone());
        store.add_item(&items[0], 1);

        let result = place_order(&client, &mut store).await;
        assert!(matches!(result, Err(ClientError::Unauthorized(_))));
        assert_eq!(store.item_count(), 1);
        assert_eq!(CartStore::load(session).item_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_cart_is_refused() {
        let client = QueryClient::new(InMemoryBackend::demo("admin"));
        let mut store = CartStore::load(MemoryStorage::new());

        let result = place_order(&client, &mut store).await;
        assert!(matches!(result, Err(ClientError::Core(CoreError::EmptyCart))));
        assert!(client.customer_orders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_summary_uses_live_prices() {
        let admin = InMemoryBackend::demo("admin");
        let items = menu(&admin).await;

        let mut cart = Cart::new();
        cart.add_item(&items[0], 2);
        cart.add_item(&items[3], 1);

        admin.set_price(items[0].id, 1000).await.unwrap();
        admin.delete_item(items[3].id).await.unwrap();

        let summary = summarize(&cart, &menu(&admin).await);
        // Burger repriced, Fries falls back to its snapshot
        assert_eq!(summary.total.cents(), 2 * 1000 + 399);
        assert_eq!(summary.item_count, 3);
        assert_eq!(cart.total().cents(), 2 * 899 + 399);
    }

    #[tokio::test]
    async fn test_describe_order_marks_deleted_items() {
        let admin = InMemoryBackend::demo("admin");
        let id = admin
            .place_order(vec![
                OrderLine { item_id: 1, quantity: 2 },
                OrderLine { item_id: 4, quantity: 1 },
            ])
            .await
            .unwrap();
        admin.delete_item(4).await.unwrap();

        let orders = admin.get_all_orders().await.unwrap();
        let order = orders.iter().find(|o| o.id == id).unwrap();
        let lines = describe_order(order, &menu(&admin).await);

        assert_eq!(lines[0].name, "Classic Burger");
        assert_eq!(lines[0].subtotal, Some(Money::from_cents(1798)));
        assert_eq!(lines[1].name, UNKNOWN_ITEM_NAME);
        assert_eq!(lines[1].subtotal, None);
    }
}
