//! Promotional content records.

use serde::{Deserialize, Serialize};

/// A banner image from `GET /api/banners`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Banner {
    #[serde(default)]
    pub title: Option<String>,
    pub image_url: String,
}

impl Banner {
    /// Alt text for the banner image.
    pub fn alt_text(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or("Banner")
    }
}

/// A text offer from `GET /api/offers`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Offer {
    #[serde(default, deserialize_with = "crate::listing::null_as_default")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}
