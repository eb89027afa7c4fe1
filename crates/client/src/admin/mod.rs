//! Back-office screens: product management, user management, and the
//! analytics dashboard. Review moderation lives in [`crate::reviews`].

pub mod analytics;
pub mod products;
pub mod users;
