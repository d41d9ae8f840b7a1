use std::{fmt, str::FromStr};

use anyhow::{bail, Result};
use serde_with::SerializeDisplay;

/// A search category alias, e.g. `restaurants` or `health`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, SerializeDisplay)]
pub struct Category(String);

impl Category {
    pub fn defaults() -> Vec<Self> {
        ["restaurants", "food", "health", "transport"]
            .into_iter()
            .map(|x| Self(x.to_string()))
            .collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Restaurants are the only category restricted to the cheaper price tiers.
    pub fn is_restaurants(&self) -> bool {
        self.0 == "restaurants"
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            bail!("Empty category");
        }
        if let Some(c) = s
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-'))
        {
            bail!("Invalid character {c:?} in category: {s}");
        }

        Ok(Self(s.to_string()))
    }
}
