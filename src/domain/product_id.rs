//! Type-safe product identifier.
//!
//! [`ProductId`] is a newtype wrapper around the integer identifier assigned
//! by the upstream product authority. The service never generates ids; it
//! only carries the ones it receives.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a product.
///
/// Assigned externally and immutable thereafter. Used as the primary key of
/// the `products` table, the path segment of upstream lookups, and the match
/// key when scanning the catalog snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Wraps a raw integer identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw integer identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<ProductId> for i64 {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn display_is_plain_integer() {
        assert_eq!(ProductId::new(42).to_string(), "42");
    }

    #[test]
    fn serializes_as_bare_number() {
        let Ok(json) = serde_json::to_string(&ProductId::new(7)) else {
            panic!("serialization failed");
        };
        assert_eq!(json, "7");

        let Ok(id) = serde_json::from_str::<ProductId>("7") else {
            panic!("deserialization failed");
        };
        assert_eq!(id.get(), 7);
    }

    #[test]
    fn works_as_map_key() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(ProductId::from(1), "first");
        assert_eq!(map.get(&ProductId::new(1)), Some(&"first"));
    }
}
