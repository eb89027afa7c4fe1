//! Injectable session store.
//!
//! The web storefront scattered token/user/theme reads across components;
//! here they live behind one store with a defined lifecycle: initialized at
//! startup from persisted storage, torn down explicitly on logout (or when
//! the backend answers 401).
//!
//! The role is read from the locally cached user object and never re-verified
//! per navigation. That trust boundary is preserved from the original UI; the
//! backend still authorizes every admin endpoint on its own.

use std::sync::Arc;

use liquid_luxury_core::{ProductId, Role, ThemeMode, User};

use crate::storage::{StorageBackend, keys};

/// Authentication state derived from persisted storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// A token and cached user are present.
    Authenticated {
        /// Role read once from the cached user object.
        role: Role,
    },
    Anonymous,
}

/// Where the app routes after a successful login, branched on role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostLoginRoute {
    AdminDashboard,
    Home,
}

impl PostLoginRoute {
    /// Pick the landing route for a role.
    #[must_use]
    pub const fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => Self::AdminDashboard,
            Role::Customer => Self::Home,
        }
    }

    /// The route path, matching the web app's router.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::AdminDashboard => "/admin",
            Self::Home => "/",
        }
    }
}

/// Outcome of visiting a route through the auth gate.
///
/// Protected routes visited anonymously render a not-found fallback rather
/// than redirecting to login - a deliberate quirk preserved from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Granted,
    NotFound,
}

/// Shared session store backed by persisted storage.
///
/// Cloning is cheap; all clones observe the same storage.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn StorageBackend>,
}

impl Session {
    /// Initialize the session from persisted storage.
    pub fn new(store: Arc<dyn StorageBackend>) -> Self {
        Self { store }
    }

    /// Current auth state, read synchronously from storage.
    #[must_use]
    pub fn auth_state(&self) -> AuthState {
        if self.token().is_none() {
            return AuthState::Anonymous;
        }
        let role = self.current_user().map_or(Role::Customer, |user| user.role);
        AuthState::Authenticated { role }
    }

    /// The persisted bearer token, if any.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.store.get(keys::TOKEN)
    }

    /// The cached user object, if present and decodable.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        let raw = self.store.get(keys::USER)?;
        serde_json::from_str(&raw).ok()
    }

    /// Establish an authenticated session after a successful login or signup.
    pub fn establish(&self, token: &str, user: &User) {
        self.store.set(keys::TOKEN, token);
        if let Ok(raw) = serde_json::to_string(user) {
            self.store.set(keys::USER, &raw);
        }
        tracing::info!(user = %user.username, "Session established");
    }

    /// Tear the session down: logout, or a 401 from the backend.
    ///
    /// Theme survives teardown; the liked-product mirror does not.
    pub fn clear(&self) {
        self.store.remove(keys::TOKEN);
        self.store.remove(keys::USER);
        self.store.remove(keys::LIKED_PRODUCTS);
        tracing::info!("Session cleared");
    }

    /// Gate a route: protected routes need a token, admin routes the cached
    /// admin role on top.
    #[must_use]
    pub fn gate(&self, protected: bool, admin_only: bool) -> RouteAccess {
        if !protected {
            return RouteAccess::Granted;
        }
        match self.auth_state() {
            AuthState::Anonymous => RouteAccess::NotFound,
            AuthState::Authenticated { role } => {
                if admin_only && role != Role::Admin {
                    RouteAccess::NotFound
                } else {
                    RouteAccess::Granted
                }
            }
        }
    }

    // =========================================================================
    // Theme
    // =========================================================================

    /// Persisted theme preference, defaulting to light.
    #[must_use]
    pub fn theme(&self) -> ThemeMode {
        self.store
            .get(keys::THEME_MODE)
            .and_then(|raw| serde_json::from_value(serde_json::Value::String(raw)).ok())
            .unwrap_or_default()
    }

    /// Persist a theme preference.
    pub fn set_theme(&self, theme: ThemeMode) {
        let raw = match theme {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        };
        self.store.set(keys::THEME_MODE, raw);
    }

    // =========================================================================
    // Liked products (heart-icon mirror of the wishlist)
    // =========================================================================

    /// The locally persisted liked-product ID set.
    #[must_use]
    pub fn liked_products(&self) -> Vec<ProductId> {
        self.store
            .get(keys::LIKED_PRODUCTS)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    /// Whether a product should render with a filled heart.
    #[must_use]
    pub fn is_liked(&self, product: &ProductId) -> bool {
        self.liked_products().contains(product)
    }

    /// Add a product ID to the liked set.
    pub fn mark_liked(&self, product: &ProductId) {
        let mut liked = self.liked_products();
        if !liked.contains(product) {
            liked.push(product.clone());
            self.write_liked(&liked);
        }
    }

    /// Remove a single product ID from the liked set.
    pub fn unmark_liked(&self, product: &ProductId) {
        let liked: Vec<ProductId> = self
            .liked_products()
            .into_iter()
            .filter(|id| id != product)
            .collect();
        if liked.is_empty() {
            self.clear_liked();
        } else {
            self.write_liked(&liked);
        }
    }

    /// Drop the entire liked set (used when the wishlist empties out).
    pub fn clear_liked(&self) {
        self.store.remove(keys::LIKED_PRODUCTS);
    }

    fn write_liked(&self, liked: &[ProductId]) {
        if let Ok(raw) = serde_json::to_string(liked) {
            self.store.set(keys::LIKED_PRODUCTS, &raw);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use liquid_luxury_core::Email;
    use liquid_luxury_core::UserId;

    fn session() -> Session {
        Session::new(Arc::new(MemoryStore::new()))
    }

    fn user(role: Role) -> User {
        User {
            id: UserId::new("u1"),
            username: "ada".to_owned(),
            email: Email::parse("ada@example.com").unwrap(),
            role,
            profile_pic: String::new(),
        }
    }

    #[test]
    fn test_starts_anonymous() {
        let session = session();
        assert_eq!(session.auth_state(), AuthState::Anonymous);
        assert_eq!(session.gate(true, false), RouteAccess::NotFound);
        assert_eq!(session.gate(false, false), RouteAccess::Granted);
    }

    #[test]
    fn test_establish_and_clear() {
        let session = session();
        session.establish("tok123", &user(Role::Customer));

        assert_eq!(
            session.auth_state(),
            AuthState::Authenticated {
                role: Role::Customer
            }
        );
        assert_eq!(session.token().as_deref(), Some("tok123"));
        assert_eq!(session.gate(true, false), RouteAccess::Granted);
        assert_eq!(session.gate(true, true), RouteAccess::NotFound);

        session.clear();
        assert_eq!(session.auth_state(), AuthState::Anonymous);
        assert!(session.current_user().is_none());
    }

    #[test]
    fn test_admin_routes_by_cached_role() {
        let session = session();
        session.establish("tok", &user(Role::Admin));

        assert_eq!(session.gate(true, true), RouteAccess::Granted);
        assert_eq!(
            PostLoginRoute::for_role(Role::Admin),
            PostLoginRoute::AdminDashboard
        );
        assert_eq!(PostLoginRoute::AdminDashboard.path(), "/admin");
    }

    #[test]
    fn test_theme_survives_teardown() {
        let session = session();
        session.establish("tok", &user(Role::Customer));
        session.set_theme(ThemeMode::Dark);

        session.clear();
        assert_eq!(session.theme(), ThemeMode::Dark);
    }

    #[test]
    fn test_liked_set_add_remove() {
        let session = session();
        let p1 = ProductId::new("p1");
        let p2 = ProductId::new("p2");

        session.mark_liked(&p1);
        session.mark_liked(&p2);
        session.mark_liked(&p1); // no duplicates
        assert_eq!(session.liked_products().len(), 2);
        assert!(session.is_liked(&p1));

        session.unmark_liked(&p1);
        assert!(!session.is_liked(&p1));
        assert!(session.is_liked(&p2));

        // Removing the last ID drops the whole persisted entry
        session.unmark_liked(&p2);
        assert!(session.liked_products().is_empty());
    }
}
