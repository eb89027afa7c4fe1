//! Order history (customer) and order management (admin).

use liquid_luxury_core::{Order, OrderId, OrderStatus};
use reqwest::Method;
use serde_json::json;
use tracing::instrument;

use crate::gateway::RequestBody;
use crate::notice::{Notice, NoticeSink};
use crate::resource::{ResourceCache, ResourceKey};

/// Customer order history: read-only, one expandable row at a time.
pub struct OrderHistoryScreen {
    resources: ResourceCache,
    orders: Vec<Order>,
    expanded: Option<OrderId>,
    load_failed: bool,
    pub notices: NoticeSink,
}

impl OrderHistoryScreen {
    #[must_use]
    pub fn new(resources: ResourceCache) -> Self {
        Self {
            resources,
            orders: Vec::new(),
            expanded: None,
            load_failed: false,
            notices: NoticeSink::default(),
        }
    }

    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Whether a given row is expanded to show its line items.
    #[must_use]
    pub fn is_expanded(&self, order: &OrderId) -> bool {
        self.expanded.as_ref() == Some(order)
    }

    /// Expand a row, collapse it if already open.
    pub fn toggle_expanded(&mut self, order: &OrderId) {
        if self.is_expanded(order) {
            self.expanded = None;
        } else {
            self.expanded = Some(order.clone());
        }
    }

    /// Whether the last load failed and a retry affordance should render.
    #[must_use]
    pub const fn load_failed(&self) -> bool {
        self.load_failed
    }

    /// Fetch the customer's orders once.
    #[instrument(skip(self))]
    pub async fn load(&mut self) {
        let response = self.resources.get(ResourceKey::Orders, "/orders").await;
        if !response.is_success() {
            self.load_failed = true;
            self.notices
                .push(Notice::error(response.message_or("Failed to fetch orders")));
            return;
        }
        match response.decode::<Vec<Order>>() {
            Ok(orders) => {
                self.orders = orders;
                self.load_failed = false;
            }
            Err(e) => {
                tracing::error!(error = %e, "Order history did not decode");
                self.load_failed = true;
                self.notices.push(Notice::error("Failed to fetch orders"));
            }
        }
    }

    /// Re-run the failed fetch.
    pub async fn retry(&mut self) {
        self.load().await;
    }
}

/// Admin order management: the customer view plus a status dropdown per row.
pub struct OrderAdminScreen {
    resources: ResourceCache,
    orders: Vec<Order>,
    /// Recent-orders summary shared with the dashboard overview.
    recent_orders: Vec<Order>,
    load_failed: bool,
    pub notices: NoticeSink,
}

impl OrderAdminScreen {
    #[must_use]
    pub fn new(resources: ResourceCache) -> Self {
        Self {
            resources,
            orders: Vec::new(),
            recent_orders: Vec::new(),
            load_failed: false,
            notices: NoticeSink::default(),
        }
    }

    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    #[must_use]
    pub fn recent_orders(&self) -> &[Order] {
        &self.recent_orders
    }

    /// Whether the last load failed and a retry affordance should render.
    #[must_use]
    pub const fn load_failed(&self) -> bool {
        self.load_failed
    }

    /// Fetch all orders for the back-office table.
    #[instrument(skip(self))]
    pub async fn load(&mut self) {
        let response = self
            .resources
            .get(ResourceKey::AdminOrders, "/admin/orders")
            .await;
        if !response.is_success() {
            self.load_failed = true;
            self.notices
                .push(Notice::error(response.message_or("Failed to fetch orders")));
            return;
        }
        match response.decode::<Vec<Order>>() {
            Ok(orders) => {
                self.orders = orders;
                self.load_failed = false;
            }
            Err(e) => {
                tracing::error!(error = %e, "Admin order list did not decode");
                self.load_failed = true;
                self.notices.push(Notice::error("Failed to fetch orders"));
            }
        }
    }

    /// Re-run the failed fetch.
    pub async fn retry(&mut self) {
        self.load().await;
    }

    /// Fetch the recent-orders summary used by the dashboard overview.
    #[instrument(skip(self))]
    pub async fn load_recent(&mut self) {
        let response = self
            .resources
            .get(ResourceKey::RecentOrders, "/admin/analytics/recent-orders")
            .await;
        if response.is_success()
            && let Ok(orders) = response.decode::<Vec<Order>>()
        {
            self.recent_orders = orders;
        }
    }

    /// Change one order's status.
    ///
    /// Any transition is accepted - re-selecting the current status and
    /// moving backward both go through; there is deliberately no guard.
    /// On success only the affected row is patched locally, then the
    /// recent-orders summary is re-fetched to keep the dashboard in step.
    #[instrument(skip(self))]
    pub async fn set_status(&mut self, order_id: &OrderId, status: OrderStatus) {
        let response = self
            .resources
            .client()
            .authed(
                Method::PUT,
                &format!("/orders/{order_id}/status"),
                RequestBody::Json(json!({ "status": status })),
            )
            .await;

        if !response.is_success() {
            self.notices.push(Notice::error(
                response.message_or("Failed to update order status"),
            ));
            return;
        }

        // Patch the single affected row; no full list re-fetch
        if let Some(order) = self.orders.iter_mut().find(|o| &o.id == order_id) {
            order.status = status;
        }
        self.resources
            .invalidate(&[ResourceKey::AdminOrders, ResourceKey::RecentOrders])
            .await;
        self.load_recent().await;
        self.notices.push(Notice::success("Order status updated"));
    }
}
