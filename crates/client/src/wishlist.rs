//! Wishlist, with its locally persisted "liked product" mirror.
//!
//! The heart icon on catalog and detail pages renders from a persisted set
//! of liked product IDs so no round trip is needed; this screen keeps that
//! mirror in step with the server-side wishlist. When removal empties the
//! wishlist the whole local set is dropped - an intentional simplification
//! kept from the web app.

use liquid_luxury_core::{ProductId, WishlistItem, WishlistItemId};
use reqwest::Method;
use serde_json::json;
use tracing::instrument;

use crate::cart::CartScreen;
use crate::gateway::RequestBody;
use crate::notice::{Notice, NoticeSink};
use crate::resource::{ResourceCache, ResourceKey};

/// Client-side sort for the wishlist view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WishlistSort {
    /// Most recently added first.
    #[default]
    AddedDate,
    PriceLowToHigh,
    PriceHighToLow,
    Name,
}

/// Wishlist screen state.
pub struct WishlistScreen {
    resources: ResourceCache,
    items: Vec<WishlistItem>,
    load_failed: bool,
    sort: WishlistSort,
    pub notices: NoticeSink,
}

impl WishlistScreen {
    #[must_use]
    pub fn new(resources: ResourceCache) -> Self {
        Self {
            resources,
            items: Vec::new(),
            load_failed: false,
            sort: WishlistSort::default(),
            notices: NoticeSink::default(),
        }
    }

    /// Current wishlist entries in the selected sort order.
    #[must_use]
    pub fn items(&self) -> Vec<&WishlistItem> {
        let mut items: Vec<&WishlistItem> = self.items.iter().collect();
        match self.sort {
            WishlistSort::AddedDate => {
                items.sort_by(|a, b| b.added_date.cmp(&a.added_date));
            }
            WishlistSort::PriceLowToHigh => items.sort_by_key(|i| i.product.price),
            WishlistSort::PriceHighToLow => {
                items.sort_by_key(|i| std::cmp::Reverse(i.product.price));
            }
            WishlistSort::Name => items.sort_by(|a, b| a.product.name.cmp(&b.product.name)),
        }
        items
    }

    pub fn set_sort(&mut self, sort: WishlistSort) {
        self.sort = sort;
    }

    /// Whether the last load failed and a retry affordance should render.
    #[must_use]
    pub const fn load_failed(&self) -> bool {
        self.load_failed
    }

    /// Fetch the wishlist.
    #[instrument(skip(self))]
    pub async fn load(&mut self) {
        let response = self.resources.get(ResourceKey::Wishlist, "/wishlist").await;
        if !response.is_success() {
            self.load_failed = true;
            self.notices.push(Notice::error(
                response.message_or("Failed to fetch wishlist items"),
            ));
            return;
        }
        match response.decode::<Vec<WishlistItem>>() {
            Ok(items) => {
                self.items = items;
                self.load_failed = false;
            }
            Err(e) => {
                tracing::error!(error = %e, "Wishlist did not decode");
                self.load_failed = true;
                self.notices
                    .push(Notice::error("Failed to fetch wishlist items"));
            }
        }
    }

    /// Re-run the failed fetch.
    pub async fn retry(&mut self) {
        self.load().await;
    }

    /// Add a product to the wishlist, mirroring into the liked set on success.
    #[instrument(skip(self))]
    pub async fn add(&mut self, product: &ProductId) -> bool {
        let response = self
            .resources
            .client()
            .authed(
                Method::POST,
                "/wishlist/add",
                RequestBody::Json(json!({ "productId": product })),
            )
            .await;

        if response.is_success() {
            self.resources.client().session().mark_liked(product);
            self.resources.invalidate(&[ResourceKey::Wishlist]).await;
            self.notices.push(Notice::success("Added to wishlist"));
            true
        } else {
            self.notices.push(Notice::error(
                response.message_or("Failed to add to wishlist"),
            ));
            false
        }
    }

    /// Remove an entry, then re-fetch and reconcile the liked set.
    ///
    /// An empty re-fetched wishlist clears the entire persisted liked set
    /// rather than removing just one ID.
    #[instrument(skip(self))]
    pub async fn remove(&mut self, item_id: &WishlistItemId) {
        let removed_product = self
            .items
            .iter()
            .find(|item| &item.id == item_id)
            .map(|item| item.product.id.clone());

        let response = self
            .resources
            .client()
            .authed(
                Method::DELETE,
                &format!("/wishlist/{item_id}"),
                RequestBody::Empty,
            )
            .await;

        if !response.is_success() {
            self.notices.push(Notice::error(
                response.message_or("Failed to remove item from wishlist"),
            ));
            return;
        }

        self.resources.invalidate(&[ResourceKey::Wishlist]).await;
        let refetched = self.resources.get(ResourceKey::Wishlist, "/wishlist").await;
        if refetched.is_success()
            && let Ok(items) = refetched.decode::<Vec<WishlistItem>>()
        {
            let session = self.resources.client().session();
            if items.is_empty() {
                session.clear_liked();
            } else if let Some(product) = removed_product {
                session.unmark_liked(&product);
            }
            self.items = items;
        }
        self.notices.push(Notice::success("Item removed from wishlist"));
    }

    /// Move an entry into the cart.
    ///
    /// The wishlist removal is strictly sequenced after a successful cart
    /// add; a failed add leaves the wishlist entry intact.
    #[instrument(skip(self, cart))]
    pub async fn move_to_cart(&mut self, item_id: &WishlistItemId, cart: &mut CartScreen) {
        let Some(product) = self
            .items
            .iter()
            .find(|item| &item.id == item_id)
            .map(|item| item.product.id.clone())
        else {
            return;
        };

        if cart.add(&product, 1).await {
            self.remove(item_id).await;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::gateway::ApiClient;
    use crate::session::Session;
    use crate::storage::MemoryStore;
    use liquid_luxury_core::{Category, Nutrition, Price, Product};
    use rust_decimal::Decimal;
    use std::sync::Arc;

    fn screen_with(items: Vec<WishlistItem>) -> WishlistScreen {
        let session = Session::new(Arc::new(MemoryStore::new()));
        let config = ClientConfig::for_api_url("http://127.0.0.1:9").unwrap();
        let mut screen =
            WishlistScreen::new(ResourceCache::new(ApiClient::new(&config, session).unwrap()));
        screen.items = items;
        screen
    }

    fn entry(id: &str, price: i64) -> WishlistItem {
        WishlistItem {
            id: WishlistItemId::new(id),
            product: Product {
                id: ProductId::new(format!("p-{id}")),
                name: id.to_owned(),
                price: Price::new(Decimal::from(price)).unwrap(),
                stock: 3,
                description: String::new(),
                category: Category::Tea,
                image: String::new(),
                nutrition: Nutrition {
                    calories: "0".to_owned(),
                    sugar: "0g".to_owned(),
                    caffeine: "30mg".to_owned(),
                    serving: "250ml".to_owned(),
                },
            },
            added_date: None,
        }
    }

    #[test]
    fn test_sorts() {
        let mut screen = screen_with(vec![entry("b", 5), entry("a", 2)]);

        screen.set_sort(WishlistSort::PriceLowToHigh);
        assert_eq!(screen.items()[0].product.name, "a");

        screen.set_sort(WishlistSort::PriceHighToLow);
        assert_eq!(screen.items()[0].product.name, "b");

        screen.set_sort(WishlistSort::Name);
        assert_eq!(screen.items()[0].product.name, "a");
    }

    #[tokio::test]
    async fn test_failed_add_leaves_liked_set_alone() {
        // No token: add fails with a synthetic 401 and no network call
        let mut screen = screen_with(Vec::new());
        let product = ProductId::new("p1");

        let added = screen.add(&product).await;
        assert!(!added);
        assert!(!screen.resources.client().session().is_liked(&product));
    }

    #[tokio::test]
    async fn test_move_to_cart_keeps_entry_on_cart_failure() {
        let session = Session::new(Arc::new(MemoryStore::new()));
        let config = ClientConfig::for_api_url("http://127.0.0.1:9").unwrap();
        let client = ApiClient::new(&config, session).unwrap();
        let mut cart = CartScreen::new(ResourceCache::new(client.clone()));
        let mut screen = screen_with(vec![entry("w1", 4)]);

        // Cart add fails (synthetic 401); the wishlist entry must survive
        screen
            .move_to_cart(&WishlistItemId::new("w1"), &mut cart)
            .await;
        assert_eq!(screen.items.len(), 1);
    }
}
