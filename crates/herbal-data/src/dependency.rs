//! Dependency tagging for the storefront's upstream data.

/// Upstream data categories, one per section data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyTag {
    /// Promotional banner images.
    Banners,
    /// Text offers.
    Offers,
    /// Product catalog.
    Catalog,
}

impl DependencyTag {
    /// Get the name of this dependency.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Banners => "banners",
            Self::Offers => "offers",
            Self::Catalog => "catalog",
        }
    }
}

impl std::fmt::Display for DependencyTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
