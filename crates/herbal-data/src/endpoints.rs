//! The read-only REST endpoints consumed by the storefront.

use crate::dependency::DependencyTag;

/// A storefront API read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// `GET /api/banners`
    Banners,
    /// `GET /api/offers`
    Offers,
    /// `GET /api/products?category=<name>`
    Products { category: String },
}

impl Endpoint {
    /// Product listing for a category.
    pub fn products(category: impl Into<String>) -> Self {
        Self::Products {
            category: category.into(),
        }
    }

    /// Request path including the query string.
    ///
    /// The path doubles as the fetch hook's dependency key.
    pub fn path(&self) -> String {
        match self {
            Self::Banners => "/api/banners".to_string(),
            Self::Offers => "/api/offers".to_string(),
            Self::Products { category } => {
                format!("/api/products?category={}", urlencoding::encode(category))
            }
        }
    }

    /// Dependency tag for logging and metrics.
    pub fn tag(&self) -> DependencyTag {
        match self {
            Self::Banners => DependencyTag::Banners,
            Self::Offers => DependencyTag::Offers,
            Self::Products { .. } => DependencyTag::Catalog,
        }
    }
}
