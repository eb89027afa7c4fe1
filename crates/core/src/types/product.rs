//! Product entity as served by the backend catalog.

use serde::{Deserialize, Serialize};

use crate::types::category::Category;
use crate::types::id::ProductId;
use crate::types::price::Price;

/// Per-serving nutrition facts shown on the product detail page.
///
/// The admin form captures these as free-form strings ("120 kcal", "330ml"),
/// so the client does not re-parse them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: String,
    pub sugar: String,
    pub caffeine: String,
    pub serving: String,
}

/// A product in the catalog.
///
/// Created and edited only through the admin back-office; read everywhere else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    /// Rendered with fixed two-decimal formatting (see [`Price`]).
    pub price: Price,
    /// Units in stock; always rendered as an integer.
    pub stock: u32,
    pub description: String,
    pub category: Category,
    /// Opaque image reference resolved against the backend's media host.
    pub image: String,
    pub nutrition: Nutrition,
}

impl Product {
    /// Whether the product can currently be added to a cart.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_wire_shape() {
        let json = r#"{
            "_id": "665a1",
            "name": "Cold Brew",
            "price": 4.5,
            "stock": 12,
            "description": "Slow-steeped",
            "category": "Coffee",
            "image": "uploads/cold-brew.png",
            "nutrition": {
                "calories": "15 kcal",
                "sugar": "0g",
                "caffeine": "200mg",
                "serving": "330ml"
            }
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_str(), "665a1");
        assert_eq!(product.category, Category::Coffee);
        assert_eq!(product.price.to_string(), "4.50");
        assert!(product.in_stock());
    }
}
