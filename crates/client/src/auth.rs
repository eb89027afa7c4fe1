//! Login and signup flows.

use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use liquid_luxury_core::User;

use crate::gateway::{ApiClient, ApiResponse, RequestBody};
use crate::session::PostLoginRoute;

/// Successful login payload.
#[derive(Debug, Deserialize)]
struct LoginPayload {
    token: String,
    user: User,
}

/// Outcome of a login or signup attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Session established; the app should navigate to the given route.
    SignedIn(PostLoginRoute),
    /// The backend refused, or the payload was unusable; message for a toast.
    Failed(String),
}

/// Auth flows over the gateway client.
#[derive(Clone)]
pub struct AuthFlow {
    client: ApiClient,
}

impl AuthFlow {
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// POST `/login`; on 200, establish the session and branch on role.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> AuthOutcome {
        let body = json!({ "email": email, "password": password });
        let response = self
            .client
            .request(Method::POST, "/login", RequestBody::Json(body))
            .await;

        self.establish_from(&response)
    }

    /// POST `/register`, then log straight in with the same credentials.
    #[instrument(skip(self, password))]
    pub async fn register(&self, username: &str, email: &str, password: &str) -> AuthOutcome {
        let body = json!({ "username": username, "email": email, "password": password });
        let response = self
            .client
            .request(Method::POST, "/register", RequestBody::Json(body))
            .await;

        if !response.is_success() {
            return AuthOutcome::Failed(response.message_or("Registration failed").to_owned());
        }

        // Signup is chained into login so the user lands authenticated
        self.login(email, password).await
    }

    /// Explicit logout: session teardown only, no backend call.
    pub fn logout(&self) {
        self.client.session().clear();
    }

    fn establish_from(&self, response: &ApiResponse) -> AuthOutcome {
        if !response.is_success() {
            return AuthOutcome::Failed(response.message_or("Login failed").to_owned());
        }
        match response.decode::<LoginPayload>() {
            Ok(payload) => {
                self.client.session().establish(&payload.token, &payload.user);
                AuthOutcome::SignedIn(PostLoginRoute::for_role(payload.user.role))
            }
            Err(e) => {
                tracing::error!(error = %e, "Login response did not decode");
                AuthOutcome::Failed("Login failed".to_owned())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::session::{AuthState, Session};
    use crate::storage::MemoryStore;
    use liquid_luxury_core::Role;
    use std::sync::Arc;

    fn flow() -> AuthFlow {
        let session = Session::new(Arc::new(MemoryStore::new()));
        let config = ClientConfig::for_api_url("http://127.0.0.1:9").unwrap();
        AuthFlow::new(ApiClient::new(&config, session).unwrap())
    }

    fn admin_login_response() -> ApiResponse {
        ApiResponse {
            status: 200,
            data: serde_json::json!({
                "token": "tok",
                "user": {
                    "_id": "u1",
                    "username": "ada",
                    "email": "ada@example.com",
                    "role": "admin"
                }
            }),
        }
    }

    #[test]
    fn test_admin_login_routes_to_dashboard() {
        let flow = flow();
        let outcome = flow.establish_from(&admin_login_response());
        assert_eq!(outcome, AuthOutcome::SignedIn(PostLoginRoute::AdminDashboard));
        assert_eq!(
            flow.client.session().auth_state(),
            AuthState::Authenticated { role: Role::Admin }
        );
    }

    #[test]
    fn test_failed_login_surfaces_backend_message() {
        let flow = flow();
        let response = ApiResponse::synthetic(401, "Invalid credentials");
        let outcome = flow.establish_from(&response);
        assert_eq!(outcome, AuthOutcome::Failed("Invalid credentials".to_owned()));
        assert_eq!(flow.client.session().auth_state(), AuthState::Anonymous);
    }

    #[test]
    fn test_logout_clears_session() {
        let flow = flow();
        flow.establish_from(&admin_login_response());
        flow.logout();
        assert_eq!(flow.client.session().auth_state(), AuthState::Anonymous);
    }
}
