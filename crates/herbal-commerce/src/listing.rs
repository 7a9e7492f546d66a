//! Record lists that survive individual bad records.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// A record that could not be read, by position in the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    pub index: usize,
    pub reason: String,
}

/// A JSON array decoded record by record.
///
/// The body must still be an array. Elements that fail to decode are
/// dropped into [`Listing::rejected`] and the rest are kept in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    items: Vec<T>,
    rejected: Vec<Rejected>,
}

impl<T> Listing<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn rejected(&self) -> &[Rejected] {
        &self.rejected
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

impl<T> From<Vec<T>> for Listing<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items,
            rejected: Vec::new(),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Listing<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<serde_json::Value>::deserialize(deserializer)?;
        let mut listing = Self::default();

        for (index, value) in raw.into_iter().enumerate() {
            match serde_json::from_value(value) {
                Ok(item) => listing.items.push(item),
                Err(e) => listing.rejected.push(Rejected {
                    index,
                    reason: e.to_string(),
                }),
            }
        }

        Ok(listing)
    }
}

/// Read `null` or a missing field as the type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::content::Offer;

    #[test]
    fn test_bad_records_are_skipped() {
        let listing: Listing<Product> = serde_json::from_str(
            r#"[
                {"_id": "a", "title": "Curry Cut", "price": 249},
                {"_id": "b", "title": "No price", "price": null},
                {"_id": "c", "title": "Refund", "price": -1},
                {"title": "No id", "price": 10},
                {"_id": "d", "title": "Eggs", "price": "89", "image_url": null}
            ]"#,
        )
        .unwrap();

        let ids: Vec<&str> = listing.items().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["a", "d"]);
        assert_eq!(listing.len(), 2);

        let positions: Vec<usize> = listing.rejected().iter().map(|r| r.index).collect();
        assert_eq!(positions, [1, 2, 3]);
        assert!(listing.rejected()[2].reason.contains("_id"));
    }

    #[test]
    fn test_non_array_body_fails() {
        assert!(serde_json::from_str::<Listing<Offer>>(r#"{"title": "x"}"#).is_err());
        assert!(serde_json::from_str::<Listing<Offer>>("{not json").is_err());
    }

    #[test]
    fn test_empty_array() {
        let listing: Listing<Offer> = serde_json::from_str("[]").unwrap();
        assert!(listing.is_empty());
        assert!(listing.rejected().is_empty());
    }
}
