//! Cart and checkout.
//!
//! Quantity edits are the one optimistic flow in the app: the new quantity
//! shows immediately, the update request runs in the background, and a
//! failed update re-fetches the authoritative cart. Everything else is
//! plain request-then-refetch.

use liquid_luxury_core::{CartItem, CartItemId, CustomerDetails, Price, ProductId};
use reqwest::Method;
use serde_json::json;
use tracing::instrument;

use crate::gateway::RequestBody;
use crate::mutation::{self, MutationOutcome};
use crate::notice::{Notice, NoticeSink};
use crate::resource::{ResourceCache, ResourceKey};

/// Outcome of a checkout attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Order created; the cart has been cleared and the modal closed.
    Placed,
    /// Required fields missing; no request was issued.
    Invalid,
    /// The backend refused; the cart is untouched.
    Failed,
}

/// Cart screen state.
pub struct CartScreen {
    resources: ResourceCache,
    items: Vec<CartItem>,
    load_failed: bool,
    /// Checkout form state, bound to the modal fields.
    pub customer_details: CustomerDetails,
    checkout_open: bool,
    pub notices: NoticeSink,
}

impl CartScreen {
    #[must_use]
    pub fn new(resources: ResourceCache) -> Self {
        Self {
            resources,
            items: Vec::new(),
            load_failed: false,
            customer_details: CustomerDetails::default(),
            checkout_open: false,
            notices: NoticeSink::default(),
        }
    }

    /// Current cart lines.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the last load failed and a retry affordance should render.
    #[must_use]
    pub const fn load_failed(&self) -> bool {
        self.load_failed
    }

    /// Whether the checkout modal is open.
    #[must_use]
    pub const fn checkout_open(&self) -> bool {
        self.checkout_open
    }

    pub fn open_checkout(&mut self) {
        self.checkout_open = true;
    }

    pub fn close_checkout(&mut self) {
        self.checkout_open = false;
    }

    /// Sum of line subtotals, always computed client-side.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items
            .iter()
            .fold(Price::ZERO, |acc, item| acc.plus(item.subtotal()))
    }

    /// Order total. Delivery is free, so the total equals the subtotal.
    #[must_use]
    pub fn total(&self) -> Price {
        self.subtotal()
    }

    /// Fetch the cart.
    #[instrument(skip(self))]
    pub async fn load(&mut self) {
        let response = self.resources.get(ResourceKey::Cart, "/cart").await;
        if !response.is_success() {
            self.load_failed = true;
            self.notices
                .push(Notice::error(response.message_or("Failed to fetch cart items")));
            return;
        }
        match response.decode::<Vec<CartItem>>() {
            Ok(items) => {
                self.items = items;
                self.load_failed = false;
            }
            Err(e) => {
                tracing::error!(error = %e, "Cart did not decode");
                self.load_failed = true;
                self.notices.push(Notice::error("Failed to fetch cart items"));
            }
        }
    }

    /// Re-run the failed fetch.
    pub async fn retry(&mut self) {
        self.load().await;
    }

    /// Add a product to the cart.
    #[instrument(skip(self))]
    pub async fn add(&mut self, product: &ProductId, quantity: u32) -> bool {
        let body = json!({ "productId": product, "quantity": quantity.max(1) });
        let response = self
            .resources
            .client()
            .authed(Method::POST, "/cart/add", RequestBody::Json(body))
            .await;

        if response.is_success() {
            self.resources.invalidate(&[ResourceKey::Cart]).await;
            self.notices.push(Notice::success("Added to cart"));
            true
        } else {
            self.notices
                .push(Notice::error(response.message_or("Failed to add to cart")));
            false
        }
    }

    /// Change a line's quantity, optimistically.
    ///
    /// The quantity is clamped to 1 client-side before the request is even
    /// sent; a non-success response discards the optimistic state by
    /// re-fetching the authoritative cart.
    #[instrument(skip(self))]
    pub async fn set_quantity(&mut self, item_id: &CartItemId, quantity: u32) {
        let quantity = quantity.max(1);
        let Some(index) = self.items.iter().position(|item| &item.id == item_id) else {
            return;
        };

        let mut optimistic_items = self.items.clone();
        if let Some(item) = optimistic_items.get_mut(index) {
            item.quantity = quantity;
        }

        let resources = self.resources.clone();
        let path = format!("/cart/{item_id}");
        let send = async {
            resources
                .client()
                .authed(
                    Method::PUT,
                    &path,
                    RequestBody::Json(json!({ "quantity": quantity })),
                )
                .await
        };
        let refetch = async || refetch_cart(&resources).await;

        let (response, outcome) =
            mutation::optimistic(&mut self.items, optimistic_items, send, refetch).await;

        self.resources.invalidate(&[ResourceKey::Cart]).await;
        match outcome {
            MutationOutcome::Committed => {
                self.notices.push(Notice::success("Cart updated successfully"));
            }
            MutationOutcome::RolledBack | MutationOutcome::RollbackFailed => {
                self.notices
                    .push(Notice::error(response.message_or("Failed to update cart")));
            }
        }
    }

    /// Decrement helper; never goes below 1.
    pub async fn decrement(&mut self, item_id: &CartItemId) {
        let Some(current) = self
            .items
            .iter()
            .find(|item| &item.id == item_id)
            .map(|item| item.quantity)
        else {
            return;
        };
        self.set_quantity(item_id, current.saturating_sub(1).max(1)).await;
    }

    /// Remove a line: delete then unconditionally re-fetch (no optimism).
    #[instrument(skip(self))]
    pub async fn remove(&mut self, item_id: &CartItemId) {
        let response = self
            .resources
            .client()
            .authed(
                Method::DELETE,
                &format!("/cart/{item_id}"),
                RequestBody::Empty,
            )
            .await;

        if response.is_success() {
            if let Some(items) = refetch_cart(&self.resources).await {
                self.items = items;
            }
            self.notices.push(Notice::success("Item removed from cart"));
        } else {
            self.notices
                .push(Notice::error(response.message_or("Failed to remove item")));
        }
    }

    /// Place an order from the current cart.
    ///
    /// All four customer fields are validated non-empty before any request.
    /// Two identical valid submissions create two distinct orders; there is
    /// no client-side idempotency key.
    #[instrument(skip(self))]
    pub async fn checkout(&mut self) -> CheckoutOutcome {
        if !self.customer_details.is_complete() {
            self.notices
                .push(Notice::error("Please fill in all required fields"));
            return CheckoutOutcome::Invalid;
        }

        let response = self
            .resources
            .client()
            .authed(
                Method::POST,
                "/orders",
                RequestBody::Json(order_payload(&self.customer_details, &self.items)),
            )
            .await;

        if response.is_success() {
            self.items.clear();
            self.checkout_open = false;
            self.customer_details = CustomerDetails::default();
            self.resources
                .invalidate(&[ResourceKey::Cart, ResourceKey::Orders])
                .await;
            self.notices.push(Notice::success("Order placed successfully"));
            CheckoutOutcome::Placed
        } else {
            // Cart left untouched so the customer can try again
            self.notices
                .push(Notice::error(response.message_or("Failed to place order")));
            CheckoutOutcome::Failed
        }
    }
}

/// The order creation payload: `{customerDetails, items: [{product, quantity, price}]}`.
fn order_payload(details: &CustomerDetails, items: &[CartItem]) -> serde_json::Value {
    json!({
        "customerDetails": details,
        "items": items
            .iter()
            .map(|item| {
                json!({
                    "product": item.product.id,
                    "quantity": item.quantity,
                    "price": item.price,
                })
            })
            .collect::<Vec<_>>(),
    })
}

async fn refetch_cart(resources: &ResourceCache) -> Option<Vec<CartItem>> {
    resources.invalidate(&[ResourceKey::Cart]).await;
    let response = resources.get(ResourceKey::Cart, "/cart").await;
    if response.is_success() {
        response.decode().ok()
    } else {
        None
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
    use liquid_luxury_core::{Category, Nutrition, Product};
    use rust_decimal::Decimal;
    use std::sync::Arc;

    fn screen_with(items: Vec<CartItem>) -> CartScreen {
        let session = Session::new(Arc::new(MemoryStore::new()));
        let config = ClientConfig::for_api_url("http://127.0.0.1:9").unwrap();
        let mut screen =
            CartScreen::new(ResourceCache::new(ApiClient::new(&config, session).unwrap()));
        screen.items = items;
        screen
    }

    fn item(id: &str, price: i64, quantity: u32) -> CartItem {
        let price = Price::new(Decimal::from(price)).unwrap();
        CartItem {
            id: CartItemId::new(id),
            product: Product {
                id: ProductId::new(format!("p-{id}")),
                name: id.to_owned(),
                price,
                stock: 10,
                description: String::new(),
                category: Category::Water,
                image: String::new(),
                nutrition: Nutrition {
                    calories: "0".to_owned(),
                    sugar: "0g".to_owned(),
                    caffeine: "0mg".to_owned(),
                    serving: "500ml".to_owned(),
                },
            },
            quantity,
            price,
        }
    }

    fn complete_details() -> CustomerDetails {
        CustomerDetails {
            name: "Ada".to_owned(),
            location: "12 Mill Lane".to_owned(),
            phone_number: "0700123456".to_owned(),
            payment_method: "Credit Card".to_owned(),
        }
    }

    #[test]
    fn test_totals_are_price_times_quantity() {
        let screen = screen_with(vec![item("a", 10, 2)]);
        assert_eq!(screen.subtotal().to_string(), "20.00");
        // Free delivery: total equals subtotal
        assert_eq!(screen.total().to_string(), "20.00");
    }

    #[test]
    fn test_order_payload_shape() {
        let payload = order_payload(&complete_details(), &[item("a", 10, 2)]);
        assert_eq!(payload["customerDetails"]["name"], "Ada");
        assert_eq!(payload["customerDetails"]["paymentMethod"], "Credit Card");
        let line = &payload["items"][0];
        assert_eq!(line["product"], "p-a");
        assert_eq!(line["quantity"], 2);
        assert_eq!(line["price"], 10.0);
    }

    #[tokio::test]
    async fn test_checkout_with_missing_fields_sends_nothing() {
        // The base URL is unroutable; an issued request would come back as a
        // transport failure, not Invalid
        let mut screen = screen_with(vec![item("a", 10, 2)]);
        screen.customer_details = CustomerDetails {
            name: "Ada".to_owned(),
            ..CustomerDetails::default()
        };

        let outcome = screen.checkout().await;
        assert_eq!(outcome, CheckoutOutcome::Invalid);
        // Cart untouched
        assert_eq!(screen.items().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_checkout_leaves_cart_untouched() {
        let mut screen = screen_with(vec![item("a", 10, 2)]);
        screen.customer_details = complete_details();

        // No token stored: the gateway answers with a synthetic 401
        let outcome = screen.checkout().await;
        assert_eq!(outcome, CheckoutOutcome::Failed);
        assert_eq!(screen.items().len(), 1);
        assert_eq!(screen.customer_details, complete_details());
    }

    #[tokio::test]
    async fn test_quantity_never_drops_below_one() {
        let mut screen = screen_with(vec![item("a", 10, 1)]);

        // Repeated decrements clamp at 1; the request carries quantity=1
        screen.decrement(&CartItemId::new("a")).await;
        screen.decrement(&CartItemId::new("a")).await;

        // The synthetic-401 failure path re-fetches and fails too, leaving
        // the optimistic (clamped) value in place
        let quantity = screen.items()[0].quantity;
        assert_eq!(quantity, 1);
    }

    #[tokio::test]
    async fn test_set_quantity_applies_optimistically() {
        let mut screen = screen_with(vec![item("a", 10, 2)]);
        screen.set_quantity(&CartItemId::new("a"), 5).await;
        // Send and refetch both fail (no token, unroutable host): the
        // optimistic value remains and an error notice is queued
        assert_eq!(screen.items()[0].quantity, 5);
        let notices = screen.notices.take_notices();
        assert!(notices.iter().any(|n| n.level == crate::notice::NoticeLevel::Error));
    }
}
