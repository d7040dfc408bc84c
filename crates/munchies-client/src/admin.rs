//! # Admin Console
//!
//! Services behind the admin screens: the order board and menu management.
//!
//! ## Order Board
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Tabs: [ All ] [ Pending ] [ In Progress ] [ Completed ]                │
//! │                                                                         │
//! │  #12  Pending      $21.97   actions: In Progress, Cancelled             │
//! │  #11  In Progress  $ 8.99   actions: Completed, Cancelled               │
//! │  #10  Completed    $ 3.99   actions: (none)                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The console only offers transitions from the lifecycle table and refuses
//! anything else before calling the backend. The backend checks again and has
//! the final word.

use munchies_core::order_status::filter_by_status;
use munchies_core::validation::{parse_item_form, validate_category_draft, ItemForm};
use munchies_core::{CategoryDraft, CategoryId, CoreError, ItemId, Order, OrderId, OrderStatus};
use tracing::info;

use crate::backend::Backend;
use crate::cache::{QueryClient, QueryKey};
use crate::checkout::{describe_order, OrderLineView};
use crate::error::{ClientError, ClientResult};

/// Status filters offered as tabs. `None` is "All".
pub const ORDER_TABS: [Option<OrderStatus>; 4] = [
    None,
    Some(OrderStatus::Pending),
    Some(OrderStatus::InProgress),
    Some(OrderStatus::Completed),
];

/// Admin view over a [`QueryClient`].
#[derive(Debug)]
pub struct AdminConsole<'a, B: Backend> {
    client: &'a QueryClient<B>,
}

impl<'a, B: Backend> AdminConsole<'a, B> {
    /// Opens the console if the caller is an admin.
    pub async fn open(client: &'a QueryClient<B>) -> ClientResult<Self> {
        if !client.is_admin().await? {
            return Err(ClientError::Unauthorized("Admin access required".into()));
        }
        Ok(AdminConsole { client })
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// All orders, optionally restricted to one status.
    pub async fn orders(&self, filter: Option<OrderStatus>) -> ClientResult<Vec<Order>> {
        let orders = self.client.orders().await?;
        Ok(filter_by_status(&orders, filter).into_iter().cloned().collect())
    }

    /// Status changes to offer for `order`.
    pub fn actions_for(order: &Order) -> &'static [OrderStatus] {
        order.status.next_valid_statuses()
    }

    /// Moves an order to `target` if the lifecycle allows it.
    ///
    /// The order list is refetched first so the check sees changes made by
    /// other operators.
    pub async fn advance_order(&self, order_id: OrderId, target: OrderStatus) -> ClientResult<()> {
        self.client.invalidate(QueryKey::Orders).await;
        let orders = self.client.orders().await?;
        let order = orders
            .iter()
            .find(|o| o.id == order_id)
            .ok_or(CoreError::OrderNotFound(order_id))?;

        if !order.status.can_transition_to(target) {
            return Err(CoreError::InvalidStatusTransition {
                from: order.status,
                to: target,
            }
            .into());
        }

        self.client.update_order_status(order_id, target).await?;
        info!(order_id, from = %order.status, to = %target, "Order status updated");
        Ok(())
    }

    /// An order's lines with current item names.
    pub async fn order_details(&self, order: &Order) -> ClientResult<Vec<OrderLineView>> {
        let items = self.client.items().await?;
        Ok(describe_order(order, &items))
    }

    // =========================================================================
    // Menu
    // =========================================================================

    /// Validates the item dialog and creates or updates the item.
    pub async fn save_item(&self, existing: Option<ItemId>, form: &ItemForm<'_>) -> ClientResult<ItemId> {
        let draft = parse_item_form(form)?;

        match existing {
            Some(id) => {
                self.client.update_item(id, draft).await?;
                info!(item_id = id, "Menu item updated");
                Ok(id)
            }
            None => {
                let id = self.client.create_item(draft).await?;
                info!(item_id = id, "Menu item created");
                Ok(id)
            }
        }
    }

    pub async fn delete_item(&self, id: ItemId) -> ClientResult<()> {
        self.client.delete_item(id).await?;
        info!(item_id = id, "Menu item deleted");
        Ok(())
    }

    /// Validates the category dialog and creates or updates the category.
    pub async fn save_category(
        &self,
        existing: Option<CategoryId>,
        draft: &CategoryDraft,
    ) -> ClientResult<CategoryId> {
        let draft = validate_category_draft(draft)?;

        match existing {
            Some(id) => {
                self.client.update_category(id, draft).await?;
                Ok(id)
            }
            None => self.client.create_category(draft).await,
        }
    }

    pub async fn delete_category(&self, id: CategoryId) -> ClientResult<()> {
        self.client.delete_category(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryBackend;
    use munchies_core::{OrderLine, UserRole, ValidationError};

    async fn board() -> (InMemoryBackend, Vec<OrderId>) {
        let admin = InMemoryBackend::demo("admin");
        let customer = admin.as_caller("alice");
        let mut ids = Vec::new();
        for item_id in [1, 4, 6] {
            ids.push(
                customer
                    .place_order(vec![OrderLine { item_id, quantity: 1 }])
                    .await
                    .unwrap(),
            );
        }
        (admin, ids)
    }

    #[tokio::test]
    async fn test_open_requires_admin() {
        let client = QueryClient::new(InMemoryBackend::demo("admin").as_caller("bob"));
        assert!(matches!(
            AdminConsole::open(&client).await,
            Err(ClientError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_status_tabs() {
        let (admin, ids) = board().await;
        let client = QueryClient::new(admin);
        let console = AdminConsole::open(&client).await.unwrap();

        console.advance_order(ids[0], OrderStatus::InProgress).await.unwrap();
        console.advance_order(ids[1], OrderStatus::Cancelled).await.unwrap();

        assert_eq!(console.orders(None).await.unwrap().len(), 3);
        assert_eq!(console.orders(Some(OrderStatus::Pending)).await.unwrap().len(), 1);
        assert_eq!(console.orders(Some(OrderStatus::InProgress)).await.unwrap()[0].id, ids[0]);
        assert!(console.orders(Some(OrderStatus::Completed)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_advance_refuses_transitions_not_offered() {
        let (admin, ids) = board().await;
        let client = QueryClient::new(admin);
        let console = AdminConsole::open(&client).await.unwrap();

        let result = console.advance_order(ids[0], OrderStatus::Completed).await;
        assert!(matches!(
            result,
            Err(ClientError::Core(CoreError::InvalidStatusTransition {
                from: OrderStatus::Pending,
                to: OrderStatus::Completed,
            }))
        ));

        assert!(matches!(
            console.advance_order(999, OrderStatus::Cancelled).await,
            Err(ClientError::Core(CoreError::OrderNotFound(999)))
        ));
    }

    #[tokio::test]
    async fn test_advance_sees_other_operators_changes() {
        let (admin, ids) = board().await;
        admin
            .assign_caller_user_role("second", UserRole::Admin)
            .await
            .unwrap();

        let ours = QueryClient::new(admin.clone());
        let theirs = QueryClient::new(admin.as_caller("second"));
        let console = AdminConsole::open(&ours).await.unwrap();
        let other = AdminConsole::open(&theirs).await.unwrap();

        // Warm our cache while everything is still Pending
        assert!(console
            .orders(None)
            .await
            .unwrap()
            .iter()
            .all(|o| o.status == OrderStatus::Pending));

        other.advance_order(ids[0], OrderStatus::InProgress).await.unwrap();
        other.advance_order(ids[1], OrderStatus::Cancelled).await.unwrap();

        // Legal from the current status even though the cache said Pending
        console.advance_order(ids[0], OrderStatus::Completed).await.unwrap();

        // Refused locally from the current status, not from the stale one
        assert!(matches!(
            console.advance_order(ids[1], OrderStatus::InProgress).await,
            Err(ClientError::Core(CoreError::InvalidStatusTransition {
                from: OrderStatus::Cancelled,
                to: OrderStatus::InProgress,
            }))
        ));
    }

    #[tokio::test]
    async fn test_actions_follow_lifecycle() {
        let (admin, ids) = board().await;
        let client = QueryClient::new(admin);
        let console = AdminConsole::open(&client).await.unwrap();

        let orders = console.orders(None).await.unwrap();
        assert_eq!(
            AdminConsole::<InMemoryBackend>::actions_for(&orders[0]),
            &[OrderStatus::InProgress, OrderStatus::Cancelled]
        );

        console.advance_order(ids[0], OrderStatus::InProgress).await.unwrap();
        console.advance_order(ids[0], OrderStatus::Completed).await.unwrap();

        let orders = console.orders(Some(OrderStatus::Completed)).await.unwrap();
        assert!(AdminConsole::<InMemoryBackend>::actions_for(&orders[0]).is_empty());
    }

    #[tokio::test]
    async fn test_save_item_creates_then_updates() {
        let client = QueryClient::new(InMemoryBackend::demo("admin"));
        let console = AdminConsole::open(&client).await.unwrap();

        let mut form = ItemForm {
            name: "Milkshake",
            category_id: Some(3),
            description: "Vanilla",
            price: "4.5",
            available: true,
        };
        let id = console.save_item(None, &form).await.unwrap();

        form.price = "5.25";
        assert_eq!(console.save_item(Some(id), &form).await.unwrap(), id);

        let items = client.items().await.unwrap();
        let shake = items.iter().find(|i| i.id == id).unwrap();
        assert_eq!(shake.price_cents, 525);
        assert_eq!(shake.category_id, 3);
    }

    #[tokio::test]
    async fn test_save_item_validates_before_sending() {
        let client = QueryClient::new(InMemoryBackend::demo("admin"));
        let console = AdminConsole::open(&client).await.unwrap();
        let before = client.items().await.unwrap().len();

        let form = ItemForm {
            name: "Mystery",
            category_id: None,
            description: "",
            price: "1.00",
            available: true,
        };
        let result = console.save_item(None, &form).await;
        assert!(matches!(
            result,
            Err(ClientError::Core(CoreError::Validation(ValidationError::Required { .. })))
        ));
        assert_eq!(client.items().await.unwrap().len(), before);
    }

    #[tokio::test]
    async fn test_category_lifecycle() {
        let client = QueryClient::new(InMemoryBackend::demo("admin"));
        let console = AdminConsole::open(&client).await.unwrap();

        let draft = CategoryDraft {
            name: "Desserts".into(),
            description: String::new(),
        };
        let id = console.save_category(None, &draft).await.unwrap();

        let renamed = CategoryDraft {
            name: "Sweets".into(),
            description: "After dinner".into(),
        };
        console.save_category(Some(id), &renamed).await.unwrap();
        assert!(client
            .categories()
            .await
            .unwrap()
            .iter()
            .any(|c| c.id == id && c.name == "Sweets"));

        console.delete_category(id).await.unwrap();
        assert!(client.categories().await.unwrap().iter().all(|c| c.id != id));
    }

    #[tokio::test]
    async fn test_order_details_after_item_deleted() {
        let (admin, ids) = board().await;
        let client = QueryClient::new(admin);
        let console = AdminConsole::open(&client).await.unwrap();

        console.delete_item(4).await.unwrap();

        let orders = console.orders(None).await.unwrap();
        let order = orders.iter().find(|o| o.id == ids[1]).unwrap();
        let lines = console.order_details(order).await.unwrap();
        assert_eq!(lines[0].name, "Unknown");
    }
}
