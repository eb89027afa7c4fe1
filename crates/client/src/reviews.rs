//! Review submission (customer) and review moderation (admin).

use liquid_luxury_core::{Review, ReviewId, ReviewKind, ReviewStatus};
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::gateway::RequestBody;
use crate::notice::{Notice, NoticeSink};
use crate::resource::{ResourceCache, ResourceKey};

/// A review as typed into the form, before validation.
#[derive(Debug, Clone, Default)]
pub struct ReviewDraft {
    pub kind: Option<ReviewKind>,
    /// 1-5 stars; the star widget reports 0 when untouched.
    pub rating: u8,
    pub comment: String,
}

impl ReviewDraft {
    /// Validate the draft client-side; no request is issued on failure.
    ///
    /// A rating is required (and must be 1-5) when the kind is feedback;
    /// questions go through without one.
    ///
    /// # Errors
    ///
    /// Returns the message to surface when the draft is incomplete.
    pub fn validate(&self) -> Result<(), String> {
        let Some(kind) = self.kind else {
            return Err("Please choose feedback or question".to_owned());
        };
        if self.comment.trim().is_empty() {
            return Err("Please enter a comment".to_owned());
        }
        if kind == ReviewKind::Feedback && !(1..=5).contains(&self.rating) {
            return Err("Please select a rating".to_owned());
        }
        Ok(())
    }

    fn payload(&self) -> serde_json::Value {
        let mut body = json!({
            "type": self.kind,
            "comment": self.comment,
        });
        if self.kind == Some(ReviewKind::Feedback) {
            body["rating"] = json!(self.rating);
        }
        body
    }
}

/// Which of the screen's two fetches ran last; `retry()` re-runs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ReviewFetch {
    #[default]
    Own,
    Carousel,
}

/// Customer-facing review state: submission, own reviews, and the public
/// homepage carousel source.
pub struct ReviewScreen {
    resources: ResourceCache,
    reviews: Vec<Review>,
    fetch: ReviewFetch,
    load_failed: bool,
    pub notices: NoticeSink,
}

impl ReviewScreen {
    #[must_use]
    pub fn new(resources: ResourceCache) -> Self {
        Self {
            resources,
            reviews: Vec::new(),
            fetch: ReviewFetch::default(),
            load_failed: false,
            notices: NoticeSink::default(),
        }
    }

    #[must_use]
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Whether the last load failed and a retry affordance should render.
    #[must_use]
    pub const fn load_failed(&self) -> bool {
        self.load_failed
    }

    /// Submit a draft. Validation failures surface immediately with no
    /// network round trip.
    #[instrument(skip(self))]
    pub async fn submit(&mut self, draft: &ReviewDraft) -> bool {
        if let Err(message) = draft.validate() {
            self.notices.push(Notice::error(message));
            return false;
        }

        let response = self
            .resources
            .client()
            .authed(Method::POST, "/reviews", RequestBody::Json(draft.payload()))
            .await;

        if response.is_success() {
            self.resources
                .invalidate(&[ResourceKey::UserReviews, ResourceKey::AdminReviews])
                .await;
            self.notices.push(Notice::success("Review submitted"));
            true
        } else {
            self.notices
                .push(Notice::error(response.message_or("Failed to submit review")));
            false
        }
    }

    /// Fetch the caller's own reviews.
    #[instrument(skip(self))]
    pub async fn load_own(&mut self) {
        self.fetch = ReviewFetch::Own;
        let response = self
            .resources
            .get(ResourceKey::UserReviews, "/reviews/user")
            .await;
        self.apply_load(&response, false);
    }

    /// Fetch everyone's reviews (public endpoint), keeping only the approved
    /// feedback that belongs on the homepage carousel.
    #[instrument(skip(self))]
    pub async fn load_carousel(&mut self) {
        self.fetch = ReviewFetch::Carousel;
        let response = self
            .resources
            .get_public(ResourceKey::PublicReviews, "/reviews/all")
            .await;
        self.apply_load(&response, true);
    }

    /// Re-run whichever fetch last ran.
    pub async fn retry(&mut self) {
        match self.fetch {
            ReviewFetch::Own => self.load_own().await,
            ReviewFetch::Carousel => self.load_carousel().await,
        }
    }

    fn apply_load(&mut self, response: &crate::gateway::ApiResponse, public_only: bool) {
        if !response.is_success() {
            self.load_failed = true;
            self.notices
                .push(Notice::error(response.message_or("Failed to fetch reviews")));
            return;
        }
        match response.decode::<Vec<Review>>() {
            Ok(reviews) => {
                self.reviews = if public_only {
                    reviews.into_iter().filter(Review::is_public).collect()
                } else {
                    reviews
                };
                self.load_failed = false;
            }
            Err(e) => {
                tracing::error!(error = %e, "Review list did not decode");
                self.load_failed = true;
                self.notices.push(Notice::error("Failed to fetch reviews"));
            }
        }
    }
}

/// Headline counters above the moderation table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub pending: u32,
    #[serde(default)]
    pub approved: u32,
    #[serde(default)]
    pub rejected: u32,
}

/// Kind filter for the moderation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewKindFilter {
    #[default]
    All,
    Kind(ReviewKind),
}

/// Default page size for the moderation table (independent of the catalog's).
pub const REVIEW_PAGE_SIZE: usize = 10;

/// Admin review moderation state.
pub struct ReviewAdminScreen {
    resources: ResourceCache,
    reviews: Vec<Review>,
    stats: ReviewStats,
    filter: ReviewKindFilter,
    page_size: usize,
    page: usize,
    load_failed: bool,
    pub notices: NoticeSink,
}

impl ReviewAdminScreen {
    #[must_use]
    pub fn new(resources: ResourceCache) -> Self {
        Self {
            resources,
            reviews: Vec::new(),
            stats: ReviewStats::default(),
            filter: ReviewKindFilter::All,
            page_size: REVIEW_PAGE_SIZE,
            page: 1,
            load_failed: false,
            notices: NoticeSink::default(),
        }
    }

    /// Whether the last load failed and a retry affordance should render.
    #[must_use]
    pub const fn load_failed(&self) -> bool {
        self.load_failed
    }

    /// Fetch every review for moderation.
    #[instrument(skip(self))]
    pub async fn load(&mut self) {
        let response = self
            .resources
            .get(ResourceKey::AdminReviews, "/admin/reviews")
            .await;
        if !response.is_success() {
            self.load_failed = true;
            self.notices
                .push(Notice::error(response.message_or("Failed to fetch all reviews")));
            return;
        }
        match response.decode::<Vec<Review>>() {
            Ok(reviews) => {
                self.reviews = reviews;
                self.load_failed = false;
            }
            Err(e) => {
                tracing::error!(error = %e, "Review list did not decode");
                self.load_failed = true;
                self.notices.push(Notice::error("Failed to fetch all reviews"));
            }
        }
    }

    /// Re-run the failed fetch.
    pub async fn retry(&mut self) {
        self.load().await;
    }

    #[must_use]
    pub const fn stats(&self) -> ReviewStats {
        self.stats
    }

    /// Fetch the headline counters. Failures here stay silent; the table
    /// itself is the load that warrants a toast.
    #[instrument(skip(self))]
    pub async fn load_stats(&mut self) {
        let response = self
            .resources
            .client()
            .authed(Method::GET, "/admin/reviews/stats", RequestBody::Empty)
            .await;
        if response.is_success()
            && let Ok(stats) = response.decode::<ReviewStats>()
        {
            self.stats = stats;
        }
    }

    pub fn set_filter(&mut self, filter: ReviewKindFilter) {
        self.filter = filter;
        self.page = 1;
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages().max(1));
    }

    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    fn filtered(&self) -> Vec<&Review> {
        self.reviews
            .iter()
            .filter(|review| match self.filter {
                ReviewKindFilter::All => true,
                ReviewKindFilter::Kind(kind) => review.kind == kind,
            })
            .collect()
    }

    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.filtered().len().div_ceil(self.page_size)
    }

    /// The visible moderation page.
    #[must_use]
    pub fn visible_page(&self) -> Vec<&Review> {
        self.filtered()
            .into_iter()
            .skip((self.page - 1) * self.page_size)
            .take(self.page_size)
            .collect()
    }

    /// Approve or reject a review. Unguarded, like order status.
    #[instrument(skip(self))]
    pub async fn set_status(&mut self, review_id: &ReviewId, status: ReviewStatus) {
        let response = self
            .resources
            .client()
            .authed(
                Method::PUT,
                &format!("/admin/reviews/{review_id}"),
                RequestBody::Json(json!({ "status": status })),
            )
            .await;

        if !response.is_success() {
            self.notices.push(Notice::error(
                response.message_or("Failed to update review status"),
            ));
            return;
        }

        if let Some(review) = self.reviews.iter_mut().find(|r| &r.id == review_id) {
            review.status = status;
        }
        self.resources
            .invalidate(&[ResourceKey::AdminReviews, ResourceKey::PublicReviews])
            .await;
        self.notices.push(Notice::success("Review status updated"));
    }

    /// Delete a review: confirm (caller's job), call, then re-fetch.
    #[instrument(skip(self))]
    pub async fn delete(&mut self, review_id: &ReviewId) {
        let response = self
            .resources
            .client()
            .authed(
                Method::DELETE,
                &format!("/reviews/{review_id}"),
                RequestBody::Empty,
            )
            .await;

        if response.is_success() {
            self.resources
                .invalidate(&[ResourceKey::AdminReviews, ResourceKey::PublicReviews])
                .await;
            self.load().await;
            self.notices.push(Notice::success("Review deleted"));
        } else {
            self.notices
                .push(Notice::error(response.message_or("Failed to delete review")));
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use liquid_luxury_core::UserId;

    fn draft(kind: ReviewKind, rating: u8) -> ReviewDraft {
        ReviewDraft {
            kind: Some(kind),
            rating,
            comment: "Lovely".to_owned(),
        }
    }

    #[test]
    fn test_question_without_rating_is_valid() {
        assert!(draft(ReviewKind::Question, 0).validate().is_ok());
    }

    #[test]
    fn test_feedback_with_zero_rating_is_rejected_locally() {
        assert!(draft(ReviewKind::Feedback, 0).validate().is_err());
        assert!(draft(ReviewKind::Feedback, 6).validate().is_err());
        assert!(draft(ReviewKind::Feedback, 5).validate().is_ok());
    }

    #[test]
    fn test_question_payload_omits_rating() {
        let payload = draft(ReviewKind::Question, 0).payload();
        assert!(payload.get("rating").is_none());
        assert_eq!(payload["type"], "question");

        let payload = draft(ReviewKind::Feedback, 4).payload();
        assert_eq!(payload["rating"], 4);
    }

    fn review(id: &str, kind: ReviewKind) -> Review {
        Review {
            id: ReviewId::new(id),
            kind,
            rating: Some(4),
            comment: String::new(),
            status: ReviewStatus::Pending,
            user_id: UserId::new("u1"),
            created_at: Utc::now(),
        }
    }

    fn test_resources() -> ResourceCache {
        use crate::config::ClientConfig;
        use crate::gateway::ApiClient;
        use crate::session::Session;
        use crate::storage::MemoryStore;
        use std::sync::Arc;

        let session = Session::new(Arc::new(MemoryStore::new()));
        let config = ClientConfig::for_api_url("http://127.0.0.1:9").unwrap();
        ResourceCache::new(ApiClient::new(&config, session).unwrap())
    }

    fn admin_screen(reviews: Vec<Review>) -> ReviewAdminScreen {
        let mut screen = ReviewAdminScreen::new(test_resources());
        screen.reviews = reviews;
        screen
    }

    #[tokio::test]
    async fn test_load_failure_sets_retry_state() {
        // No token: the own-reviews fetch fails with a synthetic 401
        let mut screen = ReviewScreen::new(test_resources());
        screen.load_own().await;
        assert!(screen.load_failed());
        assert!(screen.reviews().is_empty());

        // Retry re-runs the same fetch; still no token, still failed
        screen.retry().await;
        assert!(screen.load_failed());
    }

    #[tokio::test]
    async fn test_carousel_failure_is_retryable() {
        // Public endpoint, unroutable host: a transport failure, not a 401
        let mut screen = ReviewScreen::new(test_resources());
        screen.load_carousel().await;
        assert!(screen.load_failed());
        assert!(screen.reviews().is_empty());
    }

    #[test]
    fn test_kind_filter_and_pagination() {
        let mut reviews: Vec<Review> = (0..12)
            .map(|i| review(&format!("f{i}"), ReviewKind::Feedback))
            .collect();
        reviews.push(review("q1", ReviewKind::Question));
        let mut screen = admin_screen(reviews);

        assert_eq!(screen.total_pages(), 2);
        assert_eq!(screen.visible_page().len(), REVIEW_PAGE_SIZE);

        screen.set_page(2);
        assert_eq!(screen.visible_page().len(), 3);

        // Filtering resets to page 1 and narrows the set
        screen.set_filter(ReviewKindFilter::Kind(ReviewKind::Question));
        assert_eq!(screen.page(), 1);
        assert_eq!(screen.visible_page().len(), 1);
    }
}
