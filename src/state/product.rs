//! # Catalog entities.
//!
//! [`Product`] is owned by the catalog collaborator; the control only stores and
//! displays it. [`ProductId`] is the selection key tracked by the feedback actuator.
//!
//! ## Selection sentinel
//! "No selection" is always `Option::<ProductId>::None`. Every `u32`, including `0`,
//! is a regular id.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of a catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(u32);

impl ProductId {
    /// Wraps a raw id.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw id.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for ProductId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ProductId {
    type Err = ParseIntError;

    /// Parses a decimal id, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u32>().map(Self)
    }
}

/// One catalog item as delivered by the [`CatalogProvider`](crate::CatalogProvider).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
}

impl Product {
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(" 7 ".parse::<ProductId>(), Ok(ProductId::new(7)));
    }

    #[test]
    fn test_zero_is_a_regular_id() {
        assert_eq!("0".parse::<ProductId>(), Ok(ProductId::new(0)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("abc".parse::<ProductId>().is_err());
        assert!("-1".parse::<ProductId>().is_err());
        assert!("".parse::<ProductId>().is_err());
    }
}
