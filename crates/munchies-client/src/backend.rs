//! # Backend Interface
//!
//! The remote data service, as seen from the client.
//!
//! ## Call Surface
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Backend Calls                                  │
//! │                                                                         │
//! │  READS (idempotent, safe to retry)     MUTATIONS (sent exactly once)    │
//! │  ─────────────────────────────────     ──────────────────────────────   │
//! │  getAllItems                           placeOrder(lines) → order id     │
//! │  getAllCategories                      updateOrderStatus(id, status)    │
//! │  getAllOrders        (admin)           createItem / updateItem          │
//! │  getCustomerOrders   (caller's own)    deleteItem                       │
//! │  getCallerUserProfile                  createCategory / updateCategory  │
//! │  getUserProfile(user)                  deleteCategory                   │
//! │  getCallerUserRole                     saveCallerUserProfile            │
//! │  isCallerAdmin                         assignCallerUserRole (admin)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The backend owns totals, permissions and the authoritative check of order
//! status transitions. Implementations map its refusals to
//! [`ClientError::Unauthorized`](crate::ClientError::Unauthorized),
//! [`ClientError::NotFound`](crate::ClientError::NotFound) or
//! [`ClientError::Rejected`](crate::ClientError::Rejected).

use munchies_core::{
    Category, CategoryDraft, CategoryId, ItemDraft, ItemId, MenuItem, Order, OrderId, OrderLine,
    OrderStatus, UserProfile, UserRole,
};

use crate::error::ClientResult;

/// Wire names of the backend methods.
pub mod methods {
    pub const GET_ALL_ITEMS: &str = "getAllItems";
    pub const GET_ALL_CATEGORIES: &str = "getAllCategories";
    pub const GET_ALL_ORDERS: &str = "getAllOrders";
    pub const GET_CUSTOMER_ORDERS: &str = "getCustomerOrders";
    pub const GET_CALLER_USER_PROFILE: &str = "getCallerUserProfile";
    pub const GET_USER_PROFILE: &str = "getUserProfile";
    pub const GET_CALLER_USER_ROLE: &str = "getCallerUserRole";
    pub const IS_CALLER_ADMIN: &str = "isCallerAdmin";
    pub const SAVE_CALLER_USER_PROFILE: &str = "saveCallerUserProfile";
    pub const ASSIGN_CALLER_USER_ROLE: &str = "assignCallerUserRole";
    pub const PLACE_ORDER: &str = "placeOrder";
    pub const UPDATE_ORDER_STATUS: &str = "updateOrderStatus";
    pub const CREATE_ITEM: &str = "createItem";
    pub const UPDATE_ITEM: &str = "updateItem";
    pub const DELETE_ITEM: &str = "deleteItem";
    pub const CREATE_CATEGORY: &str = "createCategory";
    pub const UPDATE_CATEGORY: &str = "updateCategory";
    pub const DELETE_CATEGORY: &str = "deleteCategory";
}

/// Typed access to the remote data service.
///
/// All calls are asynchronous. The caller identity is part of the backend
/// handle, not of each call.
#[allow(async_fn_in_trait)]
pub trait Backend {
    // =========================================================================
    // Menu
    // =========================================================================

    /// Every menu item, available or not, in backend order.
    async fn get_all_items(&self) -> ClientResult<Vec<MenuItem>>;

    /// Every category, in backend order.
    async fn get_all_categories(&self) -> ClientResult<Vec<Category>>;

    /// Creates an item and returns its id. Admin only.
    async fn create_item(&self, draft: ItemDraft) -> ClientResult<ItemId>;

    /// Replaces every field of an item. Admin only.
    async fn update_item(&self, id: ItemId, draft: ItemDraft) -> ClientResult<()>;

    /// Admin only.
    async fn delete_item(&self, id: ItemId) -> ClientResult<()>;

    /// Creates a category and returns its id. Admin only.
    async fn create_category(&self, draft: CategoryDraft) -> ClientResult<CategoryId>;

    /// Admin only.
    async fn update_category(&self, id: CategoryId, draft: CategoryDraft) -> ClientResult<()>;

    /// Admin only.
    async fn delete_category(&self, id: CategoryId) -> ClientResult<()>;

    // =========================================================================
    // Orders
    // =========================================================================

    /// Every order of every customer. Admin only.
    async fn get_all_orders(&self) -> ClientResult<Vec<Order>>;

    /// The caller's own orders.
    async fn get_customer_orders(&self) -> ClientResult<Vec<Order>>;

    /// Places an order for `(item id, quantity)` lines and returns its id.
    ///
    /// The backend computes the total from its current prices.
    async fn place_order(&self, lines: Vec<OrderLine>) -> ClientResult<OrderId>;

    /// Moves an order to `status`. Admin only; the backend rejects illegal
    /// transitions.
    async fn update_order_status(&self, id: OrderId, status: OrderStatus) -> ClientResult<()>;

    // =========================================================================
    // Users
    // =========================================================================

    async fn get_caller_user_profile(&self) -> ClientResult<Option<UserProfile>>;

    async fn get_user_profile(&self, user: &str) -> ClientResult<Option<UserProfile>>;

    async fn save_caller_user_profile(&self, profile: UserProfile) -> ClientResult<()>;

    async fn get_caller_user_role(&self) -> ClientResult<UserRole>;

    async fn is_caller_admin(&self) -> ClientResult<bool>;

    /// Grants `role` to `user`. Admin only.
    async fn assign_caller_user_role(&self, user: &str, role: UserRole) -> ClientResult<()>;
}
