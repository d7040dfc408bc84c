//! # RPC Backend
//!
//! [`Backend`] over HTTP: one JSON POST per call.
//!
//! ## Wire Format
//! ```text
//! POST {base_url}/rpc/{method}
//! Authorization: Bearer <api_token>        (omitted for anonymous callers)
//! Content-Type: application/json
//!
//! { "orderId": 7, "status": "inProgress" } named, camelCase arguments
//!
//! 200 → JSON result (null for unit results)
//! 401/403 → Unauthorized    404 → NotFound-style rejection
//! 400/409/422 → Rejected    other → Http { status, message }
//! ```
//!
//! ## Retry Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Reads:      attempt ─► retryable error? ─► sleep(backoff) ─► attempt   │
//! │              (up to max_retries extra attempts, 250ms → 5s, ×2)         │
//! │                                                                         │
//! │  Mutations:  attempt ─► result returned to the view as-is               │
//! │              (a placed order is never sent twice)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::future::Future;
use std::time::Duration;

use backoff::backoff::Backoff;
use backoff::ExponentialBackoff;
use munchies_core::{
    Category, CategoryDraft, CategoryId, ItemDraft, ItemId, MenuItem, Order, OrderId, OrderLine,
    OrderStatus, UserProfile, UserRole,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, warn};
use url::Url;

use crate::backend::{methods, Backend};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

// =============================================================================
// Retry Policy
// =============================================================================

/// Backoff settings for idempotent reads.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Extra attempts after the first (0 = no retries).
    pub max_retries: u32,

    pub initial_backoff: Duration,

    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_retries: 3,
            initial_backoff: Duration::from_millis(250),
            max_backoff: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn none() -> Self {
        RetryPolicy {
            max_retries: 0,
            ..Default::default()
        }
    }

    fn create_backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            initial_interval: self.initial_backoff,
            max_interval: self.max_backoff,
            multiplier: 2.0,
            max_elapsed_time: None, // Bounded by max_retries instead
            ..Default::default()
        }
    }
}

/// Runs `op` until it succeeds, fails permanently, or the policy gives up.
pub(crate) async fn with_retries<T, F, Fut>(
    policy: &RetryPolicy,
    method: &str,
    mut op: F,
) -> ClientResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ClientResult<T>>,
{
    let mut backoff = policy.create_backoff();
    let mut attempt = 0u32;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt < policy.max_retries => {
                attempt += 1;
                let Some(delay) = backoff.next_backoff() else {
                    return Err(e);
                };
                warn!(method, attempt, ?delay, error = %e, "Backend read failed, retrying");
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

// =============================================================================
// Status Mapping
// =============================================================================

/// Maps a non-success HTTP status to the client error the view sees.
pub(crate) fn error_for_status(status: u16, message: String) -> ClientError {
    match status {
        401 | 403 => ClientError::Unauthorized(message),
        400 | 404 | 409 | 422 => ClientError::Rejected(message),
        _ => ClientError::Http { status, message },
    }
}

// =============================================================================
// RPC Backend
// =============================================================================

/// HTTP JSON client for the backend.
#[derive(Debug, Clone)]
pub struct RpcBackend {
    http: reqwest::Client,
    base_url: Url,
    api_token: Option<String>,
    request_timeout_secs: u64,
    retry: RetryPolicy,
}

impl RpcBackend {
    /// Builds a client from the `[backend]` settings.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let settings = &config.backend;

        let http = reqwest::Client::builder()
            .timeout(settings.request_timeout())
            .connect_timeout(settings.connect_timeout())
            .build()
            .map_err(|e| ClientError::InvalidConfig(e.to_string()))?;

        Ok(RpcBackend {
            http,
            base_url: config.backend_url()?,
            api_token: settings.api_token.clone(),
            request_timeout_secs: settings.request_timeout_secs,
            retry: RetryPolicy {
                max_retries: settings.max_retries,
                initial_backoff: settings.initial_backoff(),
                max_backoff: settings.max_backoff(),
            },
        })
    }

    /// Base URL calls are joined under.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Endpoint of one backend method.
    pub fn endpoint(&self, method: &str) -> ClientResult<Url> {
        Ok(self.base_url.join(&format!("rpc/{}", method))?)
    }

    /// Sends one call, without retries.
    async fn call<A, R>(&self, method: &str, args: &A) -> ClientResult<R>
    where
        A: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(method)?;
        debug!(method, %url, "Backend call");

        let mut request = self.http.post(url).json(args);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(error_for_status(status.as_u16(), body));
        }

        let body = if body.trim().is_empty() { "null" } else { body.as_str() };
        serde_json::from_str(body)
            .map_err(|e| ClientError::DeserializationFailed(format!("{}: {}", method, e)))
    }

    /// Idempotent call, retried on transient failures.
    async fn query<A, R>(&self, method: &str, args: &A) -> ClientResult<R>
    where
        A: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        with_retries(&self.retry, method, || self.call(method, args)).await
    }

    /// State-changing call, sent exactly once.
    async fn mutate<A, R>(&self, method: &str, args: &A) -> ClientResult<R>
    where
        A: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.call(method, args).await.map_err(|e| {
            warn!(method, error = %e, "Backend mutation failed");
            e
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout(self.request_timeout_secs)
        } else {
            err.into()
        }
    }
}

fn no_args() -> Value {
    json!({})
}

fn item_args(draft: &ItemDraft) -> Value {
    json!({
        "name": draft.name,
        "categoryId": draft.category_id,
        "description": draft.description,
        "price": draft.price_cents,
        "available": draft.available,
    })
}

fn category_args(draft: &CategoryDraft) -> Value {
    json!({
        "name": draft.name,
        "description": draft.description,
    })
}

impl Backend for RpcBackend {
    async fn get_all_items(&self) -> ClientResult<Vec<MenuItem>> {
        self.query(methods::GET_ALL_ITEMS, &no_args()).await
    }

    async fn get_all_categories(&self) -> ClientResult<Vec<Category>> {
        self.query(methods::GET_ALL_CATEGORIES, &no_args()).await
    }

    async fn create_item(&self, draft: ItemDraft) -> ClientResult<ItemId> {
        self.mutate(methods::CREATE_ITEM, &item_args(&draft)).await
    }

    async fn update_item(&self, id: ItemId, draft: ItemDraft) -> ClientResult<()> {
        let mut args = item_args(&draft);
        args["id"] = json!(id);
        self.mutate(methods::UPDATE_ITEM, &args).await
    }

    async fn delete_item(&self, id: ItemId) -> ClientResult<()> {
        self.mutate(methods::DELETE_ITEM, &json!({ "id": id })).await
    }

    async fn create_category(&self, draft: CategoryDraft) -> ClientResult<CategoryId> {
        self.mutate(methods::CREATE_CATEGORY, &category_args(&draft)).await
    }

    async fn update_category(&self, id: CategoryId, draft: CategoryDraft) -> ClientResult<()> {
        let mut args = category_args(&draft);
        args["id"] = json!(id);
        self.mutate(methods::UPDATE_CATEGORY, &args).await
    }

    async fn delete_category(&self, id: CategoryId) -> ClientResult<()> {
        self.mutate(methods::DELETE_CATEGORY, &json!({ "id": id })).await
    }

    async fn get_all_orders(&self) -> ClientResult<Vec<Order>> {
        self.query(methods::GET_ALL_ORDERS, &no_args()).await
    }

    async fn get_customer_orders(&self) -> ClientResult<Vec<Order>> {
        self.query(methods::GET_CUSTOMER_ORDERS, &no_args()).await
    }

    async fn place_order(&self, lines: Vec<OrderLine>) -> ClientResult<OrderId> {
        self.mutate(methods::PLACE_ORDER, &json!({ "items": lines })).await
    }

    async fn update_order_status(&self, id: OrderId, status: OrderStatus) -> ClientResult<()> {
        self.mutate(
            methods::UPDATE_ORDER_STATUS,
            &json!({ "orderId": id, "status": status }),
        )
        .await
    }

    async fn get_caller_user_profile(&self) -> ClientResult<Option<UserProfile>> {
        self.query(methods::GET_CALLER_USER_PROFILE, &no_args()).await
    }

    async fn get_user_profile(&self, user: &str) -> ClientResult<Option<UserProfile>> {
        self.query(methods::GET_USER_PROFILE, &json!({ "user": user })).await
    }

    async fn save_caller_user_profile(&self, profile: UserProfile) -> ClientResult<()> {
        self.mutate(methods::SAVE_CALLER_USER_PROFILE, &json!({ "profile": profile }))
            .await
    }

    async fn get_caller_user_role(&self) -> ClientResult<UserRole> {
        self.query(methods::GET_CALLER_USER_ROLE, &no_args()).await
    }

    async fn is_caller_admin(&self) -> ClientResult<bool> {
        self.query(methods::IS_CALLER_ADMIN, &no_args()).await
    }

    async fn assign_caller_user_role(&self, user: &str, role: UserRole) -> ClientResult<()> {
        self.mutate(
            methods::ASSIGN_CALLER_USER_ROLE,
            &json!({ "user": user, "role": role }),
        )
        .await
    }
}
