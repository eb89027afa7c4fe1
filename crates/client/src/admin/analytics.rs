//! Read-only analytics dashboard with a background refresh poll.

use std::sync::Arc;
use std::time::Duration;

use liquid_luxury_core::{Order, Price};
use reqwest::Method;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::instrument;

use crate::gateway::RequestBody;
use crate::notice::{Notice, NoticeSink};
use crate::resource::{ResourceCache, ResourceKey};
use crate::poll::Poller;

/// How often the revenue and category charts refresh while the dashboard
/// is open.
pub const POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Headline counters across the top of the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub total_orders: u32,
    #[serde(default)]
    pub total_revenue: Price,
    #[serde(default)]
    pub total_products: u32,
    #[serde(default)]
    pub total_users: u32,
}

/// One bucket of the monthly revenue chart. The backend sends numeric
/// months; labelling is the client's job.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MonthlyRevenuePoint {
    #[serde(default)]
    pub month: u8,
    #[serde(default)]
    pub revenue: Price,
}

impl MonthlyRevenuePoint {
    /// Chart label for the 1-12 month number; empty for anything else.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self.month {
            1 => "Jan",
            2 => "Feb",
            3 => "Mar",
            4 => "Apr",
            5 => "May",
            6 => "Jun",
            7 => "Jul",
            8 => "Aug",
            9 => "Sep",
            10 => "Oct",
            11 => "Nov",
            12 => "Dec",
            _ => "",
        }
    }
}

/// One bucket of the products-by-category chart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CategorySales {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub count: u32,
}

/// The polled chart series. No client-side aggregation happens here; the
/// buckets are plotted exactly as the backend sends them.
#[derive(Debug, Clone, Default)]
pub struct ChartData {
    pub monthly_revenue: Vec<MonthlyRevenuePoint>,
    pub category_sales: Vec<CategorySales>,
}

/// Analytics dashboard state.
///
/// Dropping the screen drops the poller, which aborts the refresh task.
pub struct AnalyticsScreen {
    resources: ResourceCache,
    stats: DashboardStats,
    recent_orders: Vec<Order>,
    charts: Arc<Mutex<ChartData>>,
    poller: Option<Poller>,
    pub notices: NoticeSink,
}

impl AnalyticsScreen {
    #[must_use]
    pub fn new(resources: ResourceCache) -> Self {
        Self {
            resources,
            stats: DashboardStats::default(),
            recent_orders: Vec::new(),
            charts: Arc::new(Mutex::new(ChartData::default())),
            poller: None,
            notices: NoticeSink::default(),
        }
    }

    #[must_use]
    pub const fn stats(&self) -> &DashboardStats {
        &self.stats
    }

    #[must_use]
    pub fn recent_orders(&self) -> &[Order] {
        &self.recent_orders
    }

    /// A snapshot of the current chart series.
    pub async fn charts(&self) -> ChartData {
        self.charts.lock().await.clone()
    }

    /// Initial dashboard load: headline stats, recent orders, and the first
    /// chart refresh.
    #[instrument(skip(self))]
    pub async fn load(&mut self) {
        let stats = self
            .resources
            .get(ResourceKey::DashboardStats, "/admin/analytics/dashboard")
            .await;
        let recent = self
            .resources
            .get(ResourceKey::RecentOrders, "/admin/analytics/recent-orders")
            .await;

        if stats.is_success() {
            if let Ok(parsed) = stats.decode::<DashboardStats>() {
                self.stats = parsed;
            }
        } else {
            self.notices.push(Notice::error(
                stats.message_or("Failed to fetch dashboard stats"),
            ));
        }
        if recent.is_success()
            && let Ok(orders) = recent.decode::<Vec<Order>>()
        {
            self.recent_orders = orders;
        }

        refresh_charts(&self.resources, &self.charts).await;
    }

    pub async fn retry(&mut self) {
        self.load().await;
    }

    /// Start the background chart refresh. Idempotent; the poll stops when
    /// the screen is dropped.
    pub fn start_polling(&mut self) {
        if self.poller.is_some() {
            return;
        }
        let resources = self.resources.clone();
        let charts = Arc::clone(&self.charts);
        self.poller = Some(Poller::spawn(POLL_INTERVAL, move || {
            let resources = resources.clone();
            let charts = Arc::clone(&charts);
            async move {
                refresh_charts(&resources, &charts).await;
            }
        }));
    }
}

/// Fetch both chart series and swap them in. Poll failures are silent; the
/// previous series stays on screen until a refresh succeeds.
async fn refresh_charts(resources: &ResourceCache, charts: &Arc<Mutex<ChartData>>) {
    let revenue = resources
        .client()
        .authed(
            Method::GET,
            "/admin/analytics/monthly-revenue",
            RequestBody::Empty,
        )
        .await;
    let categories = resources
        .client()
        .authed(
            Method::GET,
            "/admin/analytics/products-by-category",
            RequestBody::Empty,
        )
        .await;

    let mut data = charts.lock().await;
    if revenue.is_success()
        && let Ok(points) = revenue.decode::<Vec<MonthlyRevenuePoint>>()
    {
        data.monthly_revenue = points;
    }
    if categories.is_success()
        && let Ok(buckets) = categories.decode::<Vec<CategorySales>>()
    {
        data.category_sales = buckets;
    }
}
