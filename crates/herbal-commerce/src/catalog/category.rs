//! Storefront categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CommerceError;

/// One of the fixed storefront categories.
///
/// The set is closed, so selecting a category needs no validation beyond
/// parsing its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    #[default]
    Chicken,
    Mutton,
    Fish,
    Eggs,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 4] = [
        Category::Chicken,
        Category::Mutton,
        Category::Fish,
        Category::Eggs,
    ];

    /// Display name, also used as the `category` query value.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Chicken => "Chicken",
            Category::Mutton => "Mutton",
            Category::Fish => "Fish",
            Category::Eggs => "Eggs",
        }
    }
}

impl FromStr for Category {
    type Err = CommerceError;

    /// Parse a category name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| CommerceError::UnknownCategory(name.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
