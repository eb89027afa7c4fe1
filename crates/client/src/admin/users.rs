//! Admin user management with lazily loaded purchase aggregates.

use std::collections::HashMap;

use liquid_luxury_core::{User, UserId, UserOrderSummary};
use reqwest::Method;
use tracing::instrument;

use crate::gateway::RequestBody;
use crate::notice::{Notice, NoticeSink};
use crate::resource::{ResourceCache, ResourceKey};

/// Admin user table state.
pub struct UserAdminScreen {
    resources: ResourceCache,
    users: Vec<User>,
    /// Purchase aggregates, filled one user at a time as detail views open.
    summaries: HashMap<UserId, UserOrderSummary>,
    load_failed: bool,
    pub notices: NoticeSink,
}

impl UserAdminScreen {
    #[must_use]
    pub fn new(resources: ResourceCache) -> Self {
        Self {
            resources,
            users: Vec::new(),
            summaries: HashMap::new(),
            load_failed: false,
            notices: NoticeSink::default(),
        }
    }

    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    #[must_use]
    pub const fn load_failed(&self) -> bool {
        self.load_failed
    }

    /// The aggregate for a user, if its detail view has been opened.
    #[must_use]
    pub fn summary(&self, user_id: &UserId) -> Option<&UserOrderSummary> {
        self.summaries.get(user_id)
    }

    /// Fetch the user list.
    #[instrument(skip(self))]
    pub async fn load(&mut self) {
        let response = self.resources.get(ResourceKey::Users, "/admin/users").await;
        if !response.is_success() {
            self.load_failed = true;
            self.notices
                .push(Notice::error(response.message_or("Failed to fetch users")));
            return;
        }
        if let Ok(users) = response.decode::<Vec<User>>() {
            self.users = users;
            self.load_failed = false;
        }
    }

    pub async fn retry(&mut self) {
        self.load().await;
    }

    /// Load the purchase aggregate for one user. Called when the detail view
    /// opens; the result is kept so re-opening costs nothing.
    #[instrument(skip(self))]
    pub async fn open_detail(&mut self, user_id: &UserId) {
        if self.summaries.contains_key(user_id) {
            return;
        }
        let response = self
            .resources
            .client()
            .authed(
                Method::GET,
                &format!("/admin/users/{user_id}/orders"),
                RequestBody::Empty,
            )
            .await;
        if !response.is_success() {
            self.notices.push(Notice::error(
                response.message_or("Failed to fetch user orders"),
            ));
            return;
        }
        if let Ok(summary) = response.decode::<UserOrderSummary>() {
            self.summaries.insert(user_id.clone(), summary);
        }
    }

    /// Delete a user (caller has already confirmed), then re-fetch the list.
    #[instrument(skip(self))]
    pub async fn delete(&mut self, user_id: &UserId) -> bool {
        let response = self
            .resources
            .client()
            .authed(
                Method::DELETE,
                &format!("/admin/users/{user_id}"),
                RequestBody::Empty,
            )
            .await;
        if response.is_success() {
            self.summaries.remove(user_id);
            self.resources.invalidate(&[ResourceKey::Users]).await;
            self.load().await;
            self.notices.push(Notice::success("User deleted successfully"));
            true
        } else {
            self.notices
                .push(Notice::error(response.message_or("Failed to delete user")));
            false
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
    use std::sync::Arc;

    fn screen() -> UserAdminScreen {
        let session = Session::new(Arc::new(MemoryStore::new()));
        let config = ClientConfig::for_api_url("http://127.0.0.1:9").unwrap();
        UserAdminScreen::new(ResourceCache::new(ApiClient::new(&config, session).unwrap()))
    }

    #[tokio::test]
    async fn test_detail_is_absent_until_opened() {
        let mut screen = screen();
        let id = UserId::new("u1");
        assert!(screen.summary(&id).is_none());

        // Without a token the fetch short-circuits; still no aggregate.
        screen.open_detail(&id).await;
        assert!(screen.summary(&id).is_none());
        let notices = screen.notices.take_notices();
        assert!(notices[0].message.contains("No token provided"));
    }

    #[tokio::test]
    async fn test_load_failure_sets_retry_state() {
        let mut screen = screen();
        screen.load().await;
        assert!(screen.load_failed());
        assert!(screen.users().is_empty());
    }
}
