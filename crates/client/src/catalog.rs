//! Catalog browsing: search, category filter, sort, pagination.
//!
//! The product collection is fetched once per mount; every filter, sort, and
//! pagination control recomputes the visible page synchronously from the
//! already-fetched set - no additional round trips.

use liquid_luxury_core::{Category, Product, ProductId};
use reqwest::Method;
use tracing::instrument;

use crate::gateway::RequestBody;
use crate::notice::{Notice, NoticeSink};
use crate::resource::{ResourceCache, ResourceKey};

/// Category filter control state.
///
/// The sentinel `"all"` disables the filter; a known category matches
/// exactly; any other raw string matches nothing and yields an empty page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(Category),
    Unmatched(String),
}

impl CategoryFilter {
    /// Parse a raw dropdown/URL value.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw == "all" {
            return Self::All;
        }
        raw.parse::<Category>()
            .map_or_else(|_| Self::Unmatched(raw.to_owned()), Self::Category)
    }

    fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => product.category == *category,
            Self::Unmatched(_) => false,
        }
    }
}

/// Sort control state. `Featured` preserves the backend's order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    #[default]
    Featured,
    PriceLowToHigh,
    PriceHighToLow,
    Name,
}

/// Default page size; the page-size dropdown offers 8/12/16/20.
pub const DEFAULT_PAGE_SIZE: usize = 8;

/// Best-effort voice input capability.
///
/// The web app used platform speech recognition when available; a platform
/// without it degrades to a notice, never a crash.
pub trait SpeechInput {
    /// Capture one utterance, `None` if the platform cannot.
    fn capture(&self) -> Option<String>;
}

/// The always-unsupported fallback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSpeechSupport;

impl SpeechInput for NoSpeechSupport {
    fn capture(&self) -> Option<String> {
        None
    }
}

/// Catalog screen state.
pub struct CatalogScreen {
    resources: ResourceCache,
    products: Vec<Product>,
    load_failed: bool,
    query: String,
    category: CategoryFilter,
    sort: ProductSort,
    page_size: usize,
    page: usize,
    pub notices: NoticeSink,
}

impl CatalogScreen {
    #[must_use]
    pub fn new(resources: ResourceCache) -> Self {
        Self {
            resources,
            products: Vec::new(),
            load_failed: false,
            query: String::new(),
            category: CategoryFilter::All,
            sort: ProductSort::Featured,
            page_size: DEFAULT_PAGE_SIZE,
            page: 1,
            notices: NoticeSink::default(),
        }
    }

    /// Fetch the full product collection (authenticated catalog).
    #[instrument(skip(self))]
    pub async fn load(&mut self) {
        let response = self.resources.get(ResourceKey::Products, "/products").await;
        self.apply_load(&response);
    }

    /// Fetch the public preview collection (unauthenticated homepage strip).
    #[instrument(skip(self))]
    pub async fn load_preview(&mut self) {
        let response = self
            .resources
            .get_public(ResourceKey::PreviewProducts, "/preview-products")
            .await;
        self.apply_load(&response);
    }

    /// Re-run the failed fetch; the inline retry affordance.
    pub async fn retry(&mut self) {
        self.load().await;
    }

    fn apply_load(&mut self, response: &crate::gateway::ApiResponse) {
        if !response.is_success() {
            self.load_failed = true;
            self.notices.push(Notice::error(
                response.message_or("Failed to fetch products"),
            ));
            return;
        }
        match response.decode::<Vec<Product>>() {
            Ok(products) => {
                self.products = products;
                self.load_failed = false;
            }
            Err(e) => {
                tracing::error!(error = %e, "Product list did not decode");
                self.load_failed = true;
                self.notices.push(Notice::error("Failed to fetch products"));
            }
        }
    }

    /// Fetch one product for the detail page. Not cached; the detail view
    /// always shows fresh stock.
    pub async fn product_detail(&self, id: &ProductId) -> Option<Product> {
        let response = self
            .resources
            .client()
            .authed(Method::GET, &format!("/products/{id}"), RequestBody::Empty)
            .await;
        if !response.is_success() {
            return None;
        }
        response.decode().ok()
    }

    /// Whether the last load failed and a retry affordance should render.
    #[must_use]
    pub const fn load_failed(&self) -> bool {
        self.load_failed
    }

    // =========================================================================
    // Controls - every change resets to page 1
    // =========================================================================

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.category = category;
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: ProductSort) {
        self.sort = sort;
        self.page = 1;
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    /// Move to a page, clamped to the valid range.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages().max(1));
    }

    /// Feed the search field from voice input, best-effort.
    pub fn voice_search(&mut self, speech: &dyn SpeechInput) {
        match speech.capture() {
            Some(text) => self.set_query(text),
            None => self.notices.push(Notice::error(
                "Voice search is not supported on this device",
            )),
        }
    }

    // =========================================================================
    // Derived views - computed synchronously, no network
    // =========================================================================

    fn filtered(&self) -> Vec<&Product> {
        let needle = self.query.to_lowercase();
        let mut matches: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .filter(|p| self.category.matches(p))
            .collect();

        match self.sort {
            ProductSort::Featured => {}
            ProductSort::PriceLowToHigh => matches.sort_by_key(|p| p.price),
            ProductSort::PriceHighToLow => {
                matches.sort_by_key(|p| std::cmp::Reverse(p.price));
            }
            ProductSort::Name => matches.sort_by(|a, b| a.name.cmp(&b.name)),
        }
        matches
    }

    /// Number of pages for the current filter state.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.filtered().len().div_ceil(self.page_size)
    }

    /// Current page number (1-based).
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// The visible page slice after filter, sort, and pagination.
    #[must_use]
    pub fn visible_page(&self) -> Vec<&Product> {
        let filtered = self.filtered();
        filtered
            .into_iter()
            .skip((self.page - 1) * self.page_size)
            .take(self.page_size)
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::session::Session;
    use crate::storage::MemoryStore;
    use liquid_luxury_core::{Nutrition, Price};
    use rust_decimal::Decimal;
    use std::sync::Arc;

    fn screen_with(products: Vec<Product>) -> CatalogScreen {
        let session = Session::new(Arc::new(MemoryStore::new()));
        let config = ClientConfig::for_api_url("http://127.0.0.1:9").unwrap();
        let client = crate::gateway::ApiClient::new(&config, session).unwrap();
        let mut screen = CatalogScreen::new(ResourceCache::new(client));
        screen.products = products;
        screen
    }

    fn product(name: &str, price: i64, category: Category) -> Product {
        Product {
            id: ProductId::new(name),
            name: name.to_owned(),
            price: Price::new(Decimal::from(price)).unwrap(),
            stock: 10,
            description: String::new(),
            category,
            image: String::new(),
            nutrition: Nutrition {
                calories: "0".to_owned(),
                sugar: "0g".to_owned(),
                caffeine: "0mg".to_owned(),
                serving: "330ml".to_owned(),
            },
        }
    }

    fn sample() -> Vec<Product> {
        vec![
            product("Cola", 2, Category::SoftDrinks),
            product("Cold Brew", 5, Category::Coffee),
            product("Green Tea", 3, Category::Tea),
            product("Espresso", 4, Category::Coffee),
        ]
    }

    #[test]
    fn test_all_sentinel_disables_filter() {
        let mut screen = screen_with(sample());
        screen.set_category(CategoryFilter::parse("all"));
        assert_eq!(screen.visible_page().len(), 4);
    }

    #[test]
    fn test_unmatched_category_yields_empty() {
        let mut screen = screen_with(sample());
        screen.set_category(CategoryFilter::parse("Lemonade"));
        assert!(screen.visible_page().is_empty());
        assert_eq!(screen.total_pages(), 0);
    }

    #[test]
    fn test_known_category_matches_exactly() {
        let mut screen = screen_with(sample());
        screen.set_category(CategoryFilter::parse("Coffee"));
        let names: Vec<_> = screen.visible_page().iter().map(|p| p.name.clone()).collect();
        assert_eq!(names, vec!["Cold Brew", "Espresso"]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let mut screen = screen_with(sample());
        screen.set_query("cOl");
        let names: Vec<_> = screen.visible_page().iter().map(|p| p.name.clone()).collect();
        assert_eq!(names, vec!["Cola", "Cold Brew"]);
    }

    #[test]
    fn test_sort_orders() {
        let mut screen = screen_with(sample());

        screen.set_sort(ProductSort::PriceLowToHigh);
        let first = screen.visible_page()[0].name.clone();
        assert_eq!(first, "Cola");

        screen.set_sort(ProductSort::PriceHighToLow);
        let first = screen.visible_page()[0].name.clone();
        assert_eq!(first, "Cold Brew");

        screen.set_sort(ProductSort::Name);
        let first = screen.visible_page()[0].name.clone();
        assert_eq!(first, "Cola");

        // Featured preserves backend order
        screen.set_sort(ProductSort::Featured);
        let first = screen.visible_page()[0].name.clone();
        assert_eq!(first, "Cola");
    }

    #[test]
    fn test_pagination_slices_and_counts() {
        let mut screen = screen_with(sample());
        screen.set_page_size(3);
        assert_eq!(screen.total_pages(), 2);
        assert_eq!(screen.visible_page().len(), 3);

        screen.set_page(2);
        assert_eq!(screen.visible_page().len(), 1);

        // Out-of-range pages clamp instead of showing nothing
        screen.set_page(99);
        assert_eq!(screen.page(), 2);
    }

    #[test]
    fn test_filter_changes_reset_to_page_one() {
        let mut screen = screen_with(sample());
        screen.set_page_size(2);
        screen.set_page(2);
        assert_eq!(screen.page(), 2);

        screen.set_query("c");
        assert_eq!(screen.page(), 1);

        screen.set_page(2);
        screen.set_category(CategoryFilter::parse("Coffee"));
        assert_eq!(screen.page(), 1);

        screen.set_page_size(8);
        assert_eq!(screen.page(), 1);
    }

    #[test]
    fn test_voice_search_degrades_to_notice() {
        let mut screen = screen_with(sample());
        screen.voice_search(&NoSpeechSupport);
        let notices = screen.notices.take_notices();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].message.contains("not supported"));

        struct Canned;
        impl SpeechInput for Canned {
            fn capture(&self) -> Option<String> {
                Some("cold brew".to_owned())
            }
        }
        screen.voice_search(&Canned);
        assert_eq!(screen.visible_page().len(), 1);
    }

    #[tokio::test]
    async fn test_dropped_load_applies_nothing() {
        // A bound-but-silent listener keeps the fetch genuinely pending at
        // its first poll; a refused loopback connect would resolve
        // synchronously and never exercise the drop path
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let session = Session::new(Arc::new(MemoryStore::new()));
        let config = ClientConfig::for_api_url(&format!("http://{addr}")).unwrap();
        let client = crate::gateway::ApiClient::new(&config, session).unwrap();
        let mut screen = CatalogScreen::new(ResourceCache::new(client));

        // A zero-budget timeout polls the fetch once, then drops it at its
        // first await - the late response can never touch the screen
        let outcome =
            tokio::time::timeout(std::time::Duration::ZERO, screen.load_preview()).await;

        assert!(outcome.is_err());
        assert!(!screen.load_failed());
        assert!(screen.notices.take_notices().is_empty());
    }
}
