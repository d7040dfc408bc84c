//! # In-Memory Backend
//!
//! A [`Backend`] that keeps everything in process. Used by tests, by the
//! CLI's `--demo` mode, and anywhere a real backend is not reachable.
//!
//! ## Behavior
//! - Ids are assigned sequentially from 1, per entity kind
//! - Order totals are computed from item prices at placement time
//! - Menu and order-status mutations require the admin role
//! - Status changes follow the order lifecycle table
//! - Unknown or unavailable items are rejected when an order is placed
//!
//! Handles made with [`InMemoryBackend::as_caller`] share state, so one test
//! can act as both the customer and the admin.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use munchies_core::validation::{validate_category_draft, validate_item_draft};
use munchies_core::{
    Category, CategoryDraft, CategoryId, CoreError, ItemDraft, ItemId, MenuItem, Order, OrderId,
    OrderLine, OrderStatus, UserProfile, UserRole,
};
use tokio::sync::RwLock;
use tracing::debug;

use crate::backend::Backend;
use crate::error::{ClientError, ClientResult};

/// Principal of a caller that has not signed in.
pub const ANONYMOUS: &str = "anonymous";

#[derive(Debug)]
struct State {
    items: Vec<MenuItem>,
    categories: Vec<Category>,
    orders: Vec<Order>,
    profiles: HashMap<String, UserProfile>,
    roles: HashMap<String, UserRole>,
    next_item_id: ItemId,
    next_category_id: CategoryId,
    next_order_id: OrderId,
}

impl Default for State {
    fn default() -> Self {
        State {
            items: Vec::new(),
            categories: Vec::new(),
            orders: Vec::new(),
            profiles: HashMap::new(),
            roles: HashMap::new(),
            next_item_id: 1,
            next_category_id: 1,
            next_order_id: 1,
        }
    }
}

impl State {
    /// Signed-in callers without an explicit role are regular users.
    fn role_of(&self, caller: &str) -> UserRole {
        match self.roles.get(caller) {
            Some(role) => *role,
            None if caller == ANONYMOUS => UserRole::Guest,
            None => UserRole::User,
        }
    }

    fn require_admin(&self, caller: &str) -> ClientResult<()> {
        if self.role_of(caller).is_admin() {
            Ok(())
        } else {
            Err(ClientError::Unauthorized(format!("{} is not an admin", caller)))
        }
    }

    fn require_user(&self, caller: &str) -> ClientResult<()> {
        if self.role_of(caller) == UserRole::Guest {
            Err(ClientError::Unauthorized("Sign in first".into()))
        } else {
            Ok(())
        }
    }

    fn require_category(&self, id: CategoryId) -> ClientResult<()> {
        if self.categories.iter().any(|c| c.id == id) {
            Ok(())
        } else {
            Err(ClientError::NotFound { entity: "Category", id })
        }
    }

    fn insert_category(&mut self, draft: CategoryDraft) -> CategoryId {
        let id = self.next_category_id;
        self.next_category_id += 1;
        self.categories.push(Category {
            id,
            name: draft.name,
            description: draft.description,
        });
        id
    }

    fn insert_item(&mut self, draft: ItemDraft) -> ItemId {
        let id = self.next_item_id;
        self.next_item_id += 1;
        self.items.push(draft.into_item(id));
        id
    }
}

/// Process-local backend.
#[derive(Debug, Clone)]
pub struct InMemoryBackend {
    state: Arc<RwLock<State>>,
    caller: String,
}

impl InMemoryBackend {
    /// Empty backend called by `caller`.
    pub fn new(caller: impl Into<String>) -> Self {
        InMemoryBackend {
            state: Arc::new(RwLock::new(State::default())),
            caller: caller.into(),
        }
    }

    /// Empty backend called by `admin`, who holds the admin role.
    pub fn with_admin(admin: impl Into<String>) -> Self {
        let admin = admin.into();
        let mut state = State::default();
        state.roles.insert(admin.clone(), UserRole::Admin);

        InMemoryBackend {
            state: Arc::new(RwLock::new(state)),
            caller: admin,
        }
    }

    /// Backend with a small menu, called by `admin`.
    pub fn demo(admin: impl Into<String>) -> Self {
        let admin = admin.into();
        let mut state = State::default();
        state.roles.insert(admin.clone(), UserRole::Admin);

        let menu: [(&str, &[(&str, &str, i64, bool)]); 3] = [
            (
                "Burgers",
                &[
                    ("Classic Burger", "Beef patty, lettuce, tomato", 899, true),
                    ("Cheeseburger", "Double cheddar", 999, true),
                    ("Veggie Burger", "Black bean patty", 949, false),
                ],
            ),
            (
                "Sides",
                &[
                    ("Fries", "Hand cut", 399, true),
                    ("Onion Rings", "Beer battered", 449, true),
                ],
            ),
            (
                "Drinks",
                &[("Lemonade", "Fresh squeezed", 299, true), ("Cola", "", 199, true)],
            ),
        ];

        for (category, items) in menu {
            let category_id = state.insert_category(CategoryDraft {
                name: category.to_string(),
                description: String::new(),
            });
            for (name, description, price_cents, available) in items {
                state.insert_item(ItemDraft {
                    name: name.to_string(),
                    category_id,
                    description: description.to_string(),
                    price_cents: *price_cents,
                    available: *available,
                });
            }
        }

        InMemoryBackend {
            state: Arc::new(RwLock::new(state)),
            caller: admin,
        }
    }

    /// Handle on the same data, acting as another caller.
    pub fn as_caller(&self, caller: impl Into<String>) -> Self {
        InMemoryBackend {
            state: Arc::clone(&self.state),
            caller: caller.into(),
        }
    }

    /// Principal this handle calls as.
    pub fn caller(&self) -> &str {
        &self.caller
    }

    /// Changes an item's price without any permission check.
    ///
    /// Stands in for another admin editing the menu while a cart is open.
    pub async fn set_price(&self, id: ItemId, price_cents: i64) -> ClientResult<()> {
        let mut state = self.state.write().await;
        let item = state
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(ClientError::NotFound { entity: "Item", id })?;
        item.price_cents = price_cents;
        Ok(())
    }
}

impl Backend for InMemoryBackend {
    async fn get_all_items(&self) -> ClientResult<Vec<MenuItem>> {
        Ok(self.state.read().await.items.clone())
    }

    async fn get_all_categories(&self) -> ClientResult<Vec<Category>> {
        Ok(self.state.read().await.categories.clone())
    }

    async fn create_item(&self, draft: ItemDraft) -> ClientResult<ItemId> {
        let mut state = self.state.write().await;
        state.require_admin(&self.caller)?;

        let draft = validate_item_draft(&draft)?;
        state.require_category(draft.category_id)?;

        let id = state.insert_item(draft);
        debug!(item_id = id, "Item created");
        Ok(id)
    }

    async fn update_item(&self, id: ItemId, draft: ItemDraft) -> ClientResult<()> {
        let mut state = self.state.write().await;
        state.require_admin(&self.caller)?;

        let draft = validate_item_draft(&draft)?;
        state.require_category(draft.category_id)?;

        let item = state
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(ClientError::NotFound { entity: "Item", id })?;
        *item = draft.into_item(id);
        Ok(())
    }

    async fn delete_item(&self, id: ItemId) -> ClientResult<()> {
        let mut state = self.state.write().await;
        state.require_admin(&self.caller)?;

        let before = state.items.len();
        state.items.retain(|i| i.id != id);
        if state.items.len() == before {
            return Err(ClientError::NotFound { entity: "Item", id });
        }
        Ok(())
    }

    async fn create_category(&self, draft: CategoryDraft) -> ClientResult<CategoryId> {
        let mut state = self.state.write().await;
        state.require_admin(&self.caller)?;

        let draft = validate_category_draft(&draft)?;
        Ok(state.insert_category(draft))
    }

    async fn update_category(&self, id: CategoryId, draft: CategoryDraft) -> ClientResult<()> {
        let mut state = self.state.write().await;
        state.require_admin(&self.caller)?;

        let draft = validate_category_draft(&draft)?;
        let category = state
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(ClientError::NotFound { entity: "Category", id })?;
        category.name = draft.name;
        category.description = draft.description;
        Ok(())
    }

    async fn delete_category(&self, id: CategoryId) -> ClientResult<()> {
        let mut state = self.state.write().await;
        state.require_admin(&self.caller)?;
        state.require_category(id)?;

        if state.items.iter().any(|i| i.category_id == id) {
            return Err(ClientError::Rejected(
                "Category still has items; move or delete them first".into(),
            ));
        }

        state.categories.retain(|c| c.id != id);
        Ok(())
    }

    async fn get_all_orders(&self) -> ClientResult<Vec<Order>> {
        let state = self.state.read().await;
        state.require_admin(&self.caller)?;
        Ok(state.orders.clone())
    }

    async fn get_customer_orders(&self) -> ClientResult<Vec<Order>> {
        let state = self.state.read().await;
        Ok(state
            .orders
            .iter()
            .filter(|o| o.customer == self.caller)
            .cloned()
            .collect())
    }

    async fn place_order(&self, lines: Vec<OrderLine>) -> ClientResult<OrderId> {
        let mut state = self.state.write().await;
        state.require_user(&self.caller)?;

        if lines.is_empty() {
            return Err(ClientError::Core(CoreError::EmptyCart));
        }

        let mut total_cents = 0i64;
        for line in &lines {
            if line.quantity <= 0 {
                return Err(ClientError::Rejected(format!(
                    "Invalid quantity {} for item {}",
                    line.quantity, line.item_id
                )));
            }

            let item = state
                .items
                .iter()
                .find(|i| i.id == line.item_id)
                .ok_or(ClientError::NotFound {
                    entity: "Item",
                    id: line.item_id,
                })?;

            if !item.available {
                return Err(ClientError::Rejected(format!("{} is not available", item.name)));
            }

            total_cents = item
                .price_cents
                .checked_mul(line.quantity)
                .and_then(|subtotal| total_cents.checked_add(subtotal))
                .ok_or_else(|| ClientError::Rejected("Order total is too large".into()))?;
        }

        let id = state.next_order_id;
        state.next_order_id += 1;
        state.orders.push(Order {
            id,
            status: OrderStatus::Pending,
            total_cents,
            customer: self.caller.clone(),
            timestamp: Utc::now(),
            items: lines,
        });

        debug!(order_id = id, total_cents, customer = %self.caller, "Order placed");
        Ok(id)
    }

    async fn update_order_status(&self, id: OrderId, status: OrderStatus) -> ClientResult<()> {
        let mut state = self.state.write().await;
        state.require_admin(&self.caller)?;

        let order = state
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(ClientError::NotFound { entity: "Order", id })?;

        if !order.status.can_transition_to(status) {
            let err = CoreError::InvalidStatusTransition {
                from: order.status,
                to: status,
            };
            return Err(ClientError::Rejected(err.to_string()));
        }

        order.status = status;
        Ok(())
    }

    async fn get_caller_user_profile(&self) -> ClientResult<Option<UserProfile>> {
        Ok(self.state.read().await.profiles.get(&self.caller).cloned())
    }

    async fn get_user_profile(&self, user: &str) -> ClientResult<Option<UserProfile>> {
        let state = self.state.read().await;
        if user != self.caller {
            state.require_admin(&self.caller)?;
        }
        Ok(state.profiles.get(user).cloned())
    }

    async fn save_caller_user_profile(&self, profile: UserProfile) -> ClientResult<()> {
        let mut state = self.state.write().await;
        state.require_user(&self.caller)?;
        state.profiles.insert(self.caller.clone(), profile);
        Ok(())
    }

    async fn get_caller_user_role(&self) -> ClientResult<UserRole> {
        Ok(self.state.read().await.role_of(&self.caller))
    }

    async fn is_caller_admin(&self) -> ClientResult<bool> {
        Ok(self.state.read().await.role_of(&self.caller).is_admin())
    }

    async fn assign_caller_user_role(&self, user: &str, role: UserRole) -> ClientResult<()> {
        let mut state = self.state.write().await;
        state.require_admin(&self.caller)?;
        state.roles.insert(user.to_string(), role);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, category_id: CategoryId, price_cents: i64) -> ItemDraft {
        ItemDraft {
            name: name.to_string(),
            category_id,
            description: String::new(),
            price_cents,
            available: true,
        }
    }

    fn category(name: &str) -> CategoryDraft {
        CategoryDraft {
            name: name.to_string(),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn test_sequential_ids_and_computed_total() {
        let admin = InMemoryBackend::with_admin("admin");
        let cat = admin.create_category(category("Mains")).await.unwrap();
        let a = admin.create_item(draft("Burger", cat, 500)).await.unwrap();
        let b = admin.create_item(draft("Fries", cat, 300)).await.unwrap();
        assert_eq!((cat, a, b), (1, 1, 2));

        let alice = admin.as_caller("alice");
        let order_id = alice
            .place_order(vec![
                OrderLine { item_id: a, quantity: 2 },
                OrderLine { item_id: b, quantity: 1 },
            ])
            .await
            .unwrap();

        let orders = alice.get_customer_orders().await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id, order_id);
        assert_eq!(orders[0].total_cents, 1300);
        assert_eq!(orders[0].status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_menu_mutations_require_admin() {
        let admin = InMemoryBackend::with_admin("admin");
        let bob = admin.as_caller("bob");

        assert!(matches!(
            bob.create_category(category("Sneaky")).await,
            Err(ClientError::Unauthorized(_))
        ));
        assert!(matches!(bob.get_all_orders().await, Err(ClientError::Unauthorized(_))));
        assert!(!bob.is_caller_admin().await.unwrap());
        assert!(admin.is_caller_admin().await.unwrap());
    }

    #[tokio::test]
    async fn test_item_requires_existing_category() {
        let admin = InMemoryBackend::with_admin("admin");
        assert!(matches!(
            admin.create_item(draft("Ghost", 99, 100)).await,
            Err(ClientError::NotFound { entity: "Category", id: 99 })
        ));
    }

    #[tokio::test]
    async fn test_order_rejects_unknown_and_unavailable_items() {
        let admin = InMemoryBackend::demo("admin");
        let carol = admin.as_caller("carol");

        // Veggie Burger (id 3) is unavailable in the demo menu
        assert!(matches!(
            carol.place_order(vec![OrderLine { item_id: 3, quantity: 1 }]).await,
            Err(ClientError::Rejected(_))
        ));
        assert!(matches!(
            carol.place_order(vec![OrderLine { item_id: 404, quantity: 1 }]).await,
            Err(ClientError::NotFound { entity: "Item", id: 404 })
        ));
        assert!(carol.get_customer_orders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_order_total_overflow_is_rejected() {
        let admin = InMemoryBackend::demo("admin");
        let ivan = admin.as_caller("ivan");

        assert!(matches!(
            ivan.place_order(vec![OrderLine { item_id: 1, quantity: i64::MAX }]).await,
            Err(ClientError::Rejected(_))
        ));
        assert!(ivan.get_customer_orders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_guests_cannot_order() {
        let admin = InMemoryBackend::demo("admin");
        let guest = admin.as_caller(ANONYMOUS);

        assert_eq!(guest.get_caller_user_role().await.unwrap(), UserRole::Guest);
        assert!(matches!(
            guest.place_order(vec![OrderLine { item_id: 1, quantity: 1 }]).await,
            Err(ClientError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_status_changes_follow_lifecycle() {
        let admin = InMemoryBackend::demo("admin");
        let id = admin
            .as_caller("dave")
            .place_order(vec![OrderLine { item_id: 1, quantity: 1 }])
            .await
            .unwrap();

        // Pending cannot jump to Completed
        assert!(matches!(
            admin.update_order_status(id, OrderStatus::Completed).await,
            Err(ClientError::Rejected(_))
        ));

        admin.update_order_status(id, OrderStatus::InProgress).await.unwrap();
        admin.update_order_status(id, OrderStatus::Completed).await.unwrap();

        // Terminal
        assert!(admin.update_order_status(id, OrderStatus::Cancelled).await.is_err());
        assert_eq!(
            admin.get_all_orders().await.unwrap()[0].status,
            OrderStatus::Completed
        );
    }

    #[tokio::test]
    async fn test_category_with_items_cannot_be_deleted() {
        let admin = InMemoryBackend::demo("admin");
        assert!(matches!(
            admin.delete_category(1).await,
            Err(ClientError::Rejected(_))
        ));

        let empty = admin.create_category(category("Desserts")).await.unwrap();
        admin.delete_category(empty).await.unwrap();
        assert_eq!(admin.get_all_categories().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_profiles_are_per_caller() {
        let admin = InMemoryBackend::with_admin("admin");
        let erin = admin.as_caller("erin");

        erin.save_caller_user_profile(UserProfile { name: "Erin".into() })
            .await
            .unwrap();
        assert_eq!(
            erin.get_caller_user_profile().await.unwrap().map(|p| p.name),
            Some("Erin".to_string())
        );
        assert!(admin.get_caller_user_profile().await.unwrap().is_none());

        // Only admins read other callers' profiles
        assert!(admin.get_user_profile("erin").await.unwrap().is_some());
        assert!(admin.as_caller("frank").get_user_profile("erin").await.is_err());
    }

    #[tokio::test]
    async fn test_assign_role() {
        let admin = InMemoryBackend::with_admin("admin");
        admin.assign_caller_user_role("grace", UserRole::Admin).await.unwrap();
        assert!(admin.as_caller("grace").is_caller_admin().await.unwrap());

        let henry = admin.as_caller("henry");
        assert!(henry.assign_caller_user_role("henry", UserRole::Admin).await.is_err());
    }
}
