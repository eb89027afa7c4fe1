//! Read cache with explicit invalidation.
//!
//! The web storefront fetched every resource on every mount with no cache;
//! this layer keeps that observable behavior (a mount after a mutation sees
//! post-mutation truth) while eliminating the redundant round trips: GETs
//! are cached per resource key via `moka`, and every mutation invalidates
//! the keys it touches.

use std::time::Duration;

use moka::future::Cache;
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use crate::gateway::{ApiClient, ApiResponse, RequestBody};

/// Cache key, one per backend read resource.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum ResourceKey {
    Products,
    PreviewProducts,
    Cart,
    Wishlist,
    Orders,
    AdminOrders,
    RecentOrders,
    Users,
    AdminReviews,
    PublicReviews,
    UserReviews,
    Profile,
    DashboardStats,
}

/// Cached reads over an [`ApiClient`].
#[derive(Clone)]
pub struct ResourceCache {
    client: ApiClient,
    cache: Cache<ResourceKey, Value>,
}

impl ResourceCache {
    /// Default freshness window. Mutations invalidate eagerly, so the TTL
    /// only bounds staleness from other writers (another tab, another admin).
    const TTL: Duration = Duration::from_secs(60);

    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        let cache = Cache::builder()
            .max_capacity(64)
            .time_to_live(Self::TTL)
            .build();
        Self { client, cache }
    }

    /// The underlying gateway client, for mutations.
    #[must_use]
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Authenticated cached GET.
    ///
    /// Only successful responses are cached; failures always pass through so
    /// a user-initiated retry actually retries.
    pub async fn get(&self, key: ResourceKey, path: &str) -> ApiResponse {
        if let Some(data) = self.cache.get(&key).await {
            debug!(?key, "Cache hit");
            return ApiResponse { status: 200, data };
        }

        let response = self.client.authed(Method::GET, path, RequestBody::Empty).await;
        if response.is_success() {
            self.cache.insert(key, response.data.clone()).await;
        }
        response
    }

    /// Unauthenticated cached GET (public endpoints).
    pub async fn get_public(&self, key: ResourceKey, path: &str) -> ApiResponse {
        if let Some(data) = self.cache.get(&key).await {
            debug!(?key, "Cache hit");
            return ApiResponse { status: 200, data };
        }

        let response = self
            .client
            .request(Method::GET, path, RequestBody::Empty)
            .await;
        if response.is_success() {
            self.cache.insert(key, response.data.clone()).await;
        }
        response
    }

    /// Drop cached entries after a mutation.
    pub async fn invalidate(&self, keys: &[ResourceKey]) {
        for key in keys {
            self.cache.invalidate(key).await;
        }
    }
}
