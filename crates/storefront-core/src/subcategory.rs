//! # Subcategories
//!
//! The catalog API only knows top-level categories. Subcategories are a
//! storefront-side refinement: a fetched page is narrowed to products whose
//! title or description mentions one of the subcategory's keywords.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::Product;

/// A keyword-matched product subcategory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subcategory {
    Caps,
    Tshirts,
    Shorts,
    Headphones,
    Controllers,
}

impl Subcategory {
    pub const ALL: [Subcategory; 5] = [
        Subcategory::Caps,
        Subcategory::Tshirts,
        Subcategory::Shorts,
        Subcategory::Headphones,
        Subcategory::Controllers,
    ];

    /// Lowercase keywords a product must mention to belong here.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Subcategory::Caps => &["cap", "hat"],
            Subcategory::Tshirts => &["t-shirt", "tee"],
            Subcategory::Shorts => &["shorts", "chino"],
            Subcategory::Headphones => &["headphone", "earbud"],
            Subcategory::Controllers => &["controller", "gaming"],
        }
    }

    /// Case-insensitive keyword match on title and description.
    pub fn matches(&self, product: &Product) -> bool {
        let title = product.title.to_lowercase();
        let description = product.description.to_lowercase();

        self.keywords()
            .iter()
            .any(|k| title.contains(k) || description.contains(k))
    }

    /// Keeps only the products in this subcategory, preserving order.
    pub fn filter(&self, products: Vec<Product>) -> Vec<Product> {
        products.into_iter().filter(|p| self.matches(p)).collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Subcategory::Caps => "caps",
            Subcategory::Tshirts => "tshirts",
            Subcategory::Shorts => "shorts",
            Subcategory::Headphones => "headphones",
            Subcategory::Controllers => "controllers",
        }
    }
}

impl fmt::Display for Subcategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Subcategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Subcategory::ALL
            .into_iter()
            .find(|sub| sub.as_str() == wanted)
            .ok_or_else(|| ValidationError::Unknown {
                field: "subcategory".to_string(),
                value: s.to_string(),
            })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn product(title: &str, description: &str) -> Product {
        Product {
            id: 1,
            title: title.to_string(),
            price: 1.0,
            description: description.to_string(),
            category: Category {
                id: 1,
                name: "Clothes".to_string(),
                image: String::new(),
                creation_at: None,
                updated_at: None,
            },
            images: vec![],
            creation_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("caps".parse::<Subcategory>().unwrap(), Subcategory::Caps);
        assert_eq!(" TShirts ".parse::<Subcategory>().unwrap(), Subcategory::Tshirts);
        assert!("socks".parse::<Subcategory>().is_err());
    }

    #[test]
    fn test_matches_title_or_description() {
        assert!(Subcategory::Caps.matches(&product("Classic Red Baseball Cap", "")));
        assert!(Subcategory::Caps.matches(&product("Sun Protector", "A wide HAT for summer")));
        assert!(!Subcategory::Caps.matches(&product("Wooden Chair", "Sturdy")));
    }

    #[test]
    fn test_filter_preserves_order() {
        let products = vec![
            product("Gaming Controller", ""),
            product("Mug", ""),
            product("Wireless Controller", ""),
        ];

        let filtered = Subcategory::Controllers.filter(products);
        let titles: Vec<_> = filtered.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Gaming Controller", "Wireless Controller"]);
    }
}
