//! Product category enum.

use serde::{Deserialize, Serialize};

/// The nine fixed beverage categories the store sells.
///
/// The serialized form matches the display strings the backend stores
/// (e.g. `"Soft Drinks"`), so `serde` and `Display`/`FromStr` agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Soft Drinks")]
    SoftDrinks,
    #[serde(rename = "Energy Drinks")]
    EnergyDrinks,
    Coffee,
    Tea,
    Smoothies,
    Mocktails,
    Water,
    #[serde(rename = "Sports Drinks")]
    SportsDrinks,
    Wine,
}

impl Category {
    /// All categories, in the order the store lists them.
    pub const ALL: [Self; 9] = [
        Self::SoftDrinks,
        Self::EnergyDrinks,
        Self::Coffee,
        Self::Tea,
        Self::Smoothies,
        Self::Mocktails,
        Self::Water,
        Self::SportsDrinks,
        Self::Wine,
    ];

    /// The backend's display string for this category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SoftDrinks => "Soft Drinks",
            Self::EnergyDrinks => "Energy Drinks",
            Self::Coffee => "Coffee",
            Self::Tea => "Tea",
            Self::Smoothies => "Smoothies",
            Self::Mocktails => "Mocktails",
            Self::Water => "Water",
            Self::SportsDrinks => "Sports Drinks",
            Self::Wine => "Wine",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_nine_categories() {
        assert_eq!(Category::ALL.len(), 9);
    }

    #[test]
    fn test_display_from_str_agree() {
        for category in Category::ALL {
            let parsed: Category = category.as_str().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn test_serde_uses_display_strings() {
        let json = serde_json::to_string(&Category::SportsDrinks).unwrap();
        assert_eq!(json, "\"Sports Drinks\"");

        let parsed: Category = serde_json::from_str("\"Soft Drinks\"").unwrap();
        assert_eq!(parsed, Category::SoftDrinks);
    }

    #[test]
    fn test_unknown_string_rejected() {
        assert!("Lemonade".parse::<Category>().is_err());
    }
}
