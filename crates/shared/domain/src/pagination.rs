//! Limit/offset window for listings.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Optional limit and offset. Zero or absent means "no bound".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitOffset {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl LimitOffset {
    /// Window that returns everything
    pub const UNBOUNDED: LimitOffset = LimitOffset {
        limit: None,
        offset: None,
    };

    pub fn new(limit: Option<u64>, offset: Option<u64>) -> Self {
        Self { limit, offset }
    }

    /// Parse raw query values. Empty strings count as absent.
    pub fn parse(limit: Option<&str>, offset: Option<&str>) -> DomainResult<Self> {
        Ok(Self {
            limit: parse_bound("limit", limit)?,
            offset: parse_bound("offset", offset)?,
        })
    }

    /// Effective limit, `None` when unbounded
    pub fn limit(&self) -> Option<u64> {
        self.limit.filter(|l| *l > 0)
    }

    /// Effective offset, `None` when starting from the beginning
    pub fn offset(&self) -> Option<u64> {
        self.offset.filter(|o| *o > 0)
    }

    /// Apply the window to an already ordered collection.
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        let skip = self.offset().unwrap_or(0) as usize;
        let iter = items.into_iter().skip(skip);
        match self.limit() {
            Some(limit) => iter.take(limit as usize).collect(),
            None => iter.collect(),
        }
    }
}

fn parse_bound(field: &'static str, raw: Option<&str>) -> DomainResult<Option<u64>> {
    match raw {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| DomainError::InvalidPagination {
                field,
                value: value.to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_means_unbounded() {
        let window = LimitOffset::new(Some(0), Some(0));
        assert_eq!(window.limit(), None);
        assert_eq!(window.offset(), None);
        assert_eq!(window.slice(vec![1, 2, 3]), vec![1, 2, 3]);
    }

    #[test]
    fn test_slice_applies_offset_then_limit() {
        let window = LimitOffset::new(Some(2), Some(1));
        assert_eq!(window.slice(vec![1, 2, 3, 4]), vec![2, 3]);
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            LimitOffset::parse(Some("5"), None),
            Ok(LimitOffset::new(Some(5), None))
        );
        assert_eq!(LimitOffset::parse(Some(""), Some("")), Ok(LimitOffset::UNBOUNDED));
        assert!(LimitOffset::parse(Some("-1"), None).is_err());
        assert!(LimitOffset::parse(None, Some("ten")).is_err());
    }
}
