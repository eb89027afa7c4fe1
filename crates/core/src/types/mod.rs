//! Shared type definitions.

pub mod cart;
pub mod category;
pub mod email;
pub mod id;
pub mod order;
pub mod price;
pub mod product;
pub mod review;
pub mod status;
pub mod user;

pub use cart::{CartItem, WishlistItem};
pub use category::Category;
pub use email::{Email, EmailError};
pub use id::{CartItemId, OrderId, ProductId, ReviewId, UserId, WishlistItemId};
pub use order::{CustomerDetails, Order, OrderLine};
pub use price::{Price, PriceError};
pub use product::{Nutrition, Product};
pub use review::Review;
pub use status::{OrderStatus, ReviewKind, ReviewStatus, Role, ThemeMode};
pub use user::{User, UserOrderSummary};
