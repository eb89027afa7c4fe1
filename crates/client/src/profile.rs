//! Profile view and update (multipart, with optional picture).

use liquid_luxury_core::{Email, User};
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::instrument;

use crate::gateway::RequestBody;
use crate::notice::{Notice, NoticeSink};
use crate::resource::{ResourceCache, ResourceKey};

/// Pending profile edits. The picture is optional; leaving it `None`
/// keeps whatever the server already has.
#[derive(Debug, Clone, Default)]
pub struct ProfileDraft {
    pub username: String,
    pub email: String,
    pub picture: Option<PictureUpload>,
}

/// In-memory image payload destined for the multipart form.
#[derive(Debug, Clone)]
pub struct PictureUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl PictureUpload {
    fn into_part(self) -> Part {
        Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.mime_type)
            .unwrap_or_else(|_| Part::bytes(Vec::new()))
    }
}

impl ProfileDraft {
    /// Pre-fill the form from the loaded profile.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.to_string(),
            picture: None,
        }
    }

    fn into_form(self) -> Form {
        let mut form = Form::new()
            .text("username", self.username)
            .text("email", self.email);
        if let Some(picture) = self.picture {
            form = form.part("profilePic", picture.into_part());
        }
        form
    }
}

/// Profile screen state.
pub struct ProfileScreen {
    resources: ResourceCache,
    user: Option<User>,
    pub notices: NoticeSink,
}

impl ProfileScreen {
    #[must_use]
    pub fn new(resources: ResourceCache) -> Self {
        Self {
            resources,
            user: None,
            notices: NoticeSink::default(),
        }
    }

    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Fetch the caller's profile.
    #[instrument(skip(self))]
    pub async fn load(&mut self) {
        let response = self.resources.get(ResourceKey::Profile, "/profile").await;
        if !response.is_success() {
            self.notices
                .push(Notice::error(response.message_or("Failed to fetch profile")));
            return;
        }
        if let Ok(user) = response.decode::<User>() {
            self.user = Some(user);
        }
    }

    /// Push edits to the server. On success the session's cached user is
    /// refreshed so the header/avatar pick up the change immediately.
    ///
    /// The backend may answer with the full user or just the fields it
    /// changed; partial answers are merged into the cached user.
    #[instrument(skip(self, draft))]
    pub async fn update(&mut self, draft: ProfileDraft) -> bool {
        let response = self
            .resources
            .client()
            .authed(
                Method::PUT,
                "/profile",
                RequestBody::Multipart(draft.into_form()),
            )
            .await;

        if !response.is_success() {
            self.notices
                .push(Notice::error(response.message_or("Failed to update profile")));
            return false;
        }

        let session = self.resources.client().session().clone();
        let current = self.user.clone().or_else(|| session.current_user());
        let updated = match (response.decode::<User>(), current) {
            (Ok(user), _) => Some(user),
            (Err(_), Some(user)) => response
                .decode::<ProfilePatch>()
                .ok()
                .map(|patch| patch.apply_to(user)),
            (Err(e), None) => {
                tracing::warn!(error = %e, "Profile update response did not decode");
                None
            }
        };
        if let Some(user) = updated {
            if let Some(token) = session.token() {
                session.establish(&token, &user);
            }
            self.user = Some(user);
        }
        self.resources.invalidate(&[ResourceKey::Profile]).await;
        self.notices.push(Notice::success("Profile updated successfully"));
        true
    }
}

/// A partial profile-update response; absent fields leave the cached user
/// untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfilePatch {
    username: Option<String>,
    email: Option<Email>,
    profile_pic: Option<String>,
}

impl ProfilePatch {
    fn apply_to(self, mut user: User) -> User {
        if let Some(username) = self.username {
            user.username = username;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(profile_pic) = self.profile_pic {
            user.profile_pic = profile_pic;
        }
        user
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

    fn screen() -> ProfileScreen {
        let session = Session::new(Arc::new(MemoryStore::new()));
        let config = ClientConfig::for_api_url("http://127.0.0.1:9").unwrap();
        ProfileScreen::new(ResourceCache::new(ApiClient::new(&config, session).unwrap()))
    }

    #[tokio::test]
    async fn test_load_without_token_reports_missing_token() {
        let mut screen = screen();
        screen.load().await;
        assert!(screen.user().is_none());
        let notices = screen.notices.take_notices();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].message.contains("No token provided"));
    }

    #[tokio::test]
    async fn test_update_without_token_fails_without_network() {
        let mut screen = screen();
        let changed = screen.update(ProfileDraft::default()).await;
        assert!(!changed);
    }

    #[test]
    fn test_partial_update_response_merges_into_cached_user() {
        let user: User = serde_json::from_str(
            r#"{"_id": "u1", "username": "ada", "email": "ada@example.com"}"#,
        )
        .unwrap();

        // The backend answered with only the field it changed
        let patch: ProfilePatch =
            serde_json::from_value(serde_json::json!({ "profilePic": "uploads/ada.png" }))
                .unwrap();
        let merged = patch.apply_to(user);

        assert_eq!(merged.username, "ada");
        assert_eq!(merged.email.as_str(), "ada@example.com");
        assert_eq!(merged.profile_pic, "uploads/ada.png");
    }

    #[test]
    fn test_draft_prefills_from_user() {
        let user: User = serde_json::from_str(
            r#"{"_id": "u1", "username": "ada", "email": "ada@example.com"}"#,
        )
        .unwrap();
        let draft = ProfileDraft::from_user(&user);
        assert_eq!(draft.username, "ada");
        assert!(draft.picture.is_none());
    }
}
