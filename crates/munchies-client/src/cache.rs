//! # Query Cache
//!
//! Memoized backend reads, invalidated after the mutations that affect them.
//!
//! ## Invalidation Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Mutation                     Invalidates                               │
//! │  ────────                     ───────────                               │
//! │  place_order                  Orders, CustomerOrders                    │
//! │  update_order_status          Orders                                    │
//! │  create/update/delete item    Items                                     │
//! │  create/update/delete cat.    Categories                                │
//! │  save_caller_user_profile     CurrentUserProfile                        │
//! │  assign_caller_user_role      IsAdmin                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed mutation invalidates nothing. Reads that fail are not cached.

use std::fmt;

use munchies_core::{
    Category, CategoryDraft, CategoryId, ItemDraft, ItemId, MenuItem, Order, OrderId, OrderLine,
    OrderStatus, UserProfile, UserRole,
};
use tokio::sync::RwLock;
use tracing::debug;

use crate::backend::Backend;
use crate::error::ClientResult;

/// Cached read identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Items,
    Categories,
    Orders,
    CustomerOrders,
    CurrentUserProfile,
    IsAdmin,
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QueryKey::Items => "items",
            QueryKey::Categories => "categories",
            QueryKey::Orders => "orders",
            QueryKey::CustomerOrders => "customerOrders",
            QueryKey::CurrentUserProfile => "currentUserProfile",
            QueryKey::IsAdmin => "isAdmin",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Default)]
struct Cache {
    items: Option<Vec<MenuItem>>,
    categories: Option<Vec<Category>>,
    orders: Option<Vec<Order>>,
    customer_orders: Option<Vec<Order>>,
    current_user_profile: Option<Option<UserProfile>>,
    is_admin: Option<bool>,
}

impl Cache {
    fn clear(&mut self, key: QueryKey) {
        match key {
            QueryKey::Items => self.items = None,
            QueryKey::Categories => self.categories = None,
            QueryKey::Orders => self.orders = None,
            QueryKey::CustomerOrders => self.customer_orders = None,
            QueryKey::CurrentUserProfile => self.current_user_profile = None,
            QueryKey::IsAdmin => self.is_admin = None,
        }
    }

    fn contains(&self, key: QueryKey) -> bool {
        match key {
            QueryKey::Items => self.items.is_some(),
            QueryKey::Categories => self.categories.is_some(),
            QueryKey::Orders => self.orders.is_some(),
            QueryKey::CustomerOrders => self.customer_orders.is_some(),
            QueryKey::CurrentUserProfile => self.current_user_profile.is_some(),
            QueryKey::IsAdmin => self.is_admin.is_some(),
        }
    }
}

/// Reads a cache slot, or fetches and stores it.
macro_rules! cached {
    ($self:ident, $slot:ident, $key:expr, $fetch:expr) => {{
        if let Some(value) = &$self.cache.read().await.$slot {
            return Ok(value.clone());
        }
        debug!(key = %$key, "Cache miss, fetching");
        let value = $fetch.await?;
        $self.cache.write().await.$slot = Some(value.clone());
        Ok(value)
    }};
}

/// A backend handle with a read cache in front of it.
#[derive(Debug)]
pub struct QueryClient<B: Backend> {
    backend: B,
    cache: RwLock<Cache>,
}

impl<B: Backend> QueryClient<B> {
    pub fn new(backend: B) -> Self {
        QueryClient {
            backend,
            cache: RwLock::new(Cache::default()),
        }
    }

    /// The uncached backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Drops one cached read.
    pub async fn invalidate(&self, key: QueryKey) {
        self.invalidate_all(&[key]).await;
    }

    async fn invalidate_all(&self, keys: &[QueryKey]) {
        let mut cache = self.cache.write().await;
        for key in keys {
            debug!(key = %key, "Invalidating query");
            cache.clear(*key);
        }
    }

    /// Whether a read is currently cached.
    pub async fn is_cached(&self, key: QueryKey) -> bool {
        self.cache.read().await.contains(key)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub async fn items(&self) -> ClientResult<Vec<MenuItem>> {
        cached!(self, items, QueryKey::Items, self.backend.get_all_items())
    }

    pub async fn categories(&self) -> ClientResult<Vec<Category>> {
        cached!(self, categories, QueryKey::Categories, self.backend.get_all_categories())
    }

    /// All orders (admin).
    pub async fn orders(&self) -> ClientResult<Vec<Order>> {
        cached!(self, orders, QueryKey::Orders, self.backend.get_all_orders())
    }

    /// The caller's own orders.
    pub async fn customer_orders(&self) -> ClientResult<Vec<Order>> {
        cached!(
            self,
            customer_orders,
            QueryKey::CustomerOrders,
            self.backend.get_customer_orders()
        )
    }

    pub async fn current_user_profile(&self) -> ClientResult<Option<UserProfile>> {
        cached!(
            self,
            current_user_profile,
            QueryKey::CurrentUserProfile,
            self.backend.get_caller_user_profile()
        )
    }

    pub async fn is_admin(&self) -> ClientResult<bool> {
        cached!(self, is_admin, QueryKey::IsAdmin, self.backend.is_caller_admin())
    }

    /// Uncached; the role is only read once per screen.
    pub async fn caller_role(&self) -> ClientResult<UserRole> {
        self.backend.get_caller_user_role().await
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub async fn place_order(&self, lines: Vec<OrderLine>) -> ClientResult<OrderId> {
        let id = self.backend.place_order(lines).await?;
        self.invalidate_all(&[QueryKey::Orders, QueryKey::CustomerOrders])
            .await;
        Ok(id)
    }

    pub async fn update_order_status(&self, id: OrderId, status: OrderStatus) -> ClientResult<()> {
        self.backend.update_order_status(id, status).await?;
        self.invalidate(QueryKey::Orders).await;
        Ok(())
    }

    pub async fn create_item(&self, draft: ItemDraft) -> ClientResult<ItemId> {
        let id = self.backend.create_item(draft).await?;
        self.invalidate(QueryKey::Items).await;
        Ok(id)
    }

    pub async fn update_item(&self, id: ItemId, draft: ItemDraft) -> ClientResult<()> {
        self.backend.update_item(id, draft).await?;
        self.invalidate(QueryKey::Items).await;
        Ok(())
    }

    pub async fn delete_item(&self, id: ItemId) -> ClientResult<()> {
        self.backend.delete_item(id).await?;
        self.invalidate(QueryKey::Items).await;
        Ok(())
    }

    pub async fn create_category(&self, draft: CategoryDraft) -> ClientResult<CategoryId> {
        let id = self.backend.create_category(draft).await?;
        self.invalidate(QueryKey::Categories).await;
        Ok(id)
    }

    pub async fn update_category(&self, id: CategoryId, draft: CategoryDraft) -> ClientResult<()> {
        self.backend.update_category(id, draft).await?;
        self.invalidate(QueryKey::Categories).await;
        Ok(())
    }

    pub async fn delete_category(&self, id: CategoryId) -> ClientResult<()> {
        self.backend.delete_category(id).await?;
        self.invalidate(QueryKey::Categories).await;
        Ok(())
    }

    pub async fn save_caller_user_profile(&self, profile: UserProfile) -> ClientResult<()> {
        self.backend.save_caller_user_profile(profile).await?;
        self.invalidate(QueryKey::CurrentUserProfile).await;
        Ok(())
    }

    pub async fn assign_caller_user_role(&self, user: &str, role: UserRole) -> ClientResult<()> {
        self.backend.assign_caller_user_role(user, role).await?;
        self.invalidate(QueryKey::IsAdmin).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::memory::InMemoryBackend;

    #[tokio::test]
    async fn test_reads_are_cached_until_invalidated() {
        let backend = InMemoryBackend::demo("admin");
        let client = QueryClient::new(backend.clone());

        let before = client.items().await.unwrap();
        assert!(client.is_cached(QueryKey::Items).await);

        // A change made behind the cache is not visible yet
        backend.set_price(1, 1).await.unwrap();
        assert_eq!(client.items().await.unwrap(), before);

        client.invalidate(QueryKey::Items).await;
        assert_eq!(client.items().await.unwrap()[0].price_cents, 1);
    }

    #[tokio::test]
    async fn test_place_order_invalidates_order_lists() {
        let admin = InMemoryBackend::demo("admin");
        let client = QueryClient::new(admin.as_caller("alice"));

        assert!(client.customer_orders().await.unwrap().is_empty());
        client.items().await.unwrap();

        client
            .place_order(vec![OrderLine { item_id: 1, quantity: 1 }])
            .await
            .unwrap();

        assert!(!client.is_cached(QueryKey::CustomerOrders).await);
        assert!(client.is_cached(QueryKey::Items).await);
        assert_eq!(client.customer_orders().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_item_mutation_invalidates_items_only() {
        let client = QueryClient::new(InMemoryBackend::demo("admin"));
        client.items().await.unwrap();
        client.categories().await.unwrap();

        client.delete_item(1).await.unwrap();

        assert!(!client.is_cached(QueryKey::Items).await);
        assert!(client.is_cached(QueryKey::Categories).await);
    }

    #[tokio::test]
    async fn test_failed_mutation_keeps_cache() {
        let client = QueryClient::new(InMemoryBackend::demo("admin").as_caller("bob"));
        client.items().await.unwrap();

        let result = client.delete_item(1).await;
        assert!(matches!(result, Err(ClientError::Unauthorized(_))));
        assert!(client.is_cached(QueryKey::Items).await);
    }

    #[tokio::test]
    async fn test_failed_read_is_not_cached() {
        let client = QueryClient::new(InMemoryBackend::demo("admin").as_caller("bob"));
        assert!(client.orders().await.is_err());
        assert!(!client.is_cached(QueryKey::Orders).await);
    }

    #[tokio::test]
    async fn test_profile_round_trip() {
        let client = QueryClient::new(InMemoryBackend::new("carol"));
        assert_eq!(client.current_user_profile().await.unwrap(), None);

        client
            .save_caller_user_profile(UserProfile { name: "Carol".into() })
            .await
            .unwrap();
        assert_eq!(
            client.current_user_profile().await.unwrap(),
            Some(UserProfile { name: "Carol".into() })
        );
    }
}
