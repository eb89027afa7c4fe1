//! Cart and wishlist entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::id::{CartItemId, WishlistItemId};
use crate::types::price::Price;
use crate::types::product::Product;

/// A line in the authenticated customer's cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(rename = "_id")]
    pub id: CartItemId,
    pub product: Product,
    /// Always at least 1; the client clamps before any update is sent.
    pub quantity: u32,
    /// Unit price snapshot taken when the item was added.
    pub price: Price,
}

impl CartItem {
    /// Line subtotal, always computed client-side as price x quantity.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// An entry in the customer's wishlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    #[serde(rename = "_id")]
    pub id: WishlistItemId,
    pub product: Product,
    /// When the item was wished for; drives the default sort.
    #[serde(default)]
    pub added_date: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{Category, Nutrition, ProductId};
    use rust_decimal::Decimal;

    fn product(price: Price) -> Product {
        Product {
            id: ProductId::new("p1"),
            name: "Sparkling Water".to_owned(),
            price,
            stock: 5,
            description: String::new(),
            category: Category::Water,
            image: String::new(),
            nutrition: Nutrition {
                calories: "0".to_owned(),
                sugar: "0g".to_owned(),
                caffeine: "0mg".to_owned(),
                serving: "500ml".to_owned(),
            },
        }
    }

    #[test]
    fn test_subtotal_uses_price_snapshot() {
        let snapshot = Price::new(Decimal::from(10)).unwrap();
        // Catalog price has since changed; subtotal must use the snapshot
        let current = Price::new(Decimal::from(12)).unwrap();
        let item = CartItem {
            id: CartItemId::new("c1"),
            product: product(current),
            quantity: 2,
            price: snapshot,
        };
        assert_eq!(item.subtotal().to_string(), "20.00");
    }
}
