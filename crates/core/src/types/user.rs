//! User entity and the admin-side order aggregate.

use serde::{Deserialize, Serialize};

use crate::types::email::Email;
use crate::types::id::UserId;
use crate::types::price::Price;
use crate::types::status::Role;

/// A store user, as cached in the session and listed in the admin back-office.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub username: String,
    pub email: Email,
    #[serde(default)]
    pub role: Role,
    /// Opaque reference to the profile picture, empty if never set.
    #[serde(default)]
    pub profile_pic: String,
}

impl User {
    /// Whether the cached role gates this user into the admin UI.
    ///
    /// The role is client-trusted and never re-verified per navigation;
    /// the backend still enforces authorization on every admin endpoint.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Per-user purchase aggregate, loaded lazily when an admin opens the
/// user detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserOrderSummary {
    #[serde(default)]
    pub total_purchase_amount: Price,
    #[serde(default)]
    pub order_count: u32,
    /// Distinct delivery locations across the user's orders.
    #[serde(default)]
    pub locations: Vec<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_wire_shape() {
        let json = r#"{
            "_id": "u1",
            "username": "ada",
            "email": "ada@example.com",
            "role": "admin",
            "profilePic": "uploads/ada.png"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(user.is_admin());
        assert_eq!(user.email.as_str(), "ada@example.com");
    }

    #[test]
    fn test_role_defaults_to_customer() {
        let json = r#"{"_id": "u2", "username": "bob", "email": "bob@example.com"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(!user.is_admin());
    }

    #[test]
    fn test_order_summary_defaults() {
        let summary: UserOrderSummary = serde_json::from_str("{}").unwrap();
        assert_eq!(summary.order_count, 0);
        assert!(summary.locations.is_empty());
    }
}
