//! Product records served by the catalog API.

use serde::{Deserialize, Serialize};

use crate::ids::ProductId;
use crate::money::Money;

/// Description shown when the catalog supplies none.
pub const DEFAULT_DESCRIPTION: &str = "Freshly cut and hygienically packed.";

/// A product as returned by `GET /api/products`.
///
/// Identity is the `_id` field only; `sku` is carried for display and
/// never consulted when matching cart lines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Canonical product identifier.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Stock keeping unit, if the catalog has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Product title.
    pub title: String,
    /// Optional marketing description.
    #[serde(default)]
    pub description: Option<String>,
    /// Unit price. Accepts a JSON number or a numeric string.
    #[serde(with = "price")]
    pub price: Money,
    /// Image URL. Missing or `null` reads as empty.
    #[serde(default, deserialize_with = "crate::listing::null_as_default")]
    pub image_url: String,
    /// Category name as stored by the catalog.
    #[serde(default)]
    pub category: Option<String>,
}

impl Product {
    /// Description to display, falling back to the house blurb.
    pub fn display_description(&self) -> &str {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(DEFAULT_DESCRIPTION)
    }
}

mod price {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::money::{Currency, Money};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPrice {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.to_major())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let amount = match RawPrice::deserialize(deserializer)? {
            RawPrice::Number(n) => n,
            RawPrice::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| D::Error::custom(format!("invalid price {:?}", s)))?,
        };
        Money::from_price(amount, Currency::INR).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_record() {
        let product: Product = serde_json::from_str(
            r#"{
                "_id": "64f0c2",
                "sku": "HC-CHK-001",
                "title": "Chicken Curry Cut",
                "description": "Bone-in pieces",
                "price": 249.5,
                "image_url": "https://cdn.example.com/curry.jpg",
                "category": "Chicken"
            }"#,
        )
        .unwrap();

        assert_eq!(product.id, ProductId::new("64f0c2"));
        assert_eq!(product.sku.as_deref(), Some("HC-CHK-001"));
        assert_eq!(product.price.amount_minor, 24950);
        assert_eq!(product.category.as_deref(), Some("Chicken"));
        assert_eq!(product.display_description(), "Bone-in pieces");
    }

    #[test]
    fn test_price_as_string() {
        let product: Product =
            serde_json::from_str(r#"{"_id": "a", "title": "Eggs", "price": " 89.00 "}"#).unwrap();
        assert_eq!(product.price.amount_minor, 8900);
        assert_eq!(product.image_url, "");
    }

    #[test]
    fn test_rejects_bad_price() {
        assert!(serde_json::from_str::<Product>(r#"{"_id": "a", "title": "x", "price": "abc"}"#).is_err());
        assert!(serde_json::from_str::<Product>(r#"{"_id": "a", "title": "x", "price": -3}"#).is_err());
    }

    #[test]
    fn test_null_image_url() {
        let product: Product = serde_json::from_str(
            r#"{"_id": "a", "title": "Drumsticks", "price": 199, "image_url": null}"#,
        )
        .unwrap();
        assert_eq!(product.image_url, "");
    }

    #[test]
    fn test_identity_requires_underscore_id() {
        // `sku` alone is not an identity.
        let result = serde_json::from_str::<Product>(r#"{"sku": "S1", "title": "x", "price": 1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_description_fallback() {
        let product: Product = serde_json::from_str(
            r#"{"_id": "a", "title": "Mutton", "price": 1, "description": "  "}"#,
        )
        .unwrap();
        assert_eq!(product.display_description(), DEFAULT_DESCRIPTION);
    }
}
