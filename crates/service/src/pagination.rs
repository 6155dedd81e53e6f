//! Pagination utilities for service layer
//!
//! `skip`/`limit` as sent by clients; `limit` must stay within 1..=100.

use serde::Deserialize;

use crate::errors::ServiceError;

pub const MAX_LIMIT: u64 = 100;

/// Pagination parameters
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Pagination {
    /// rows to skip
    #[serde(default)]
    pub skip: u64,
    /// max rows returned
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 { MAX_LIMIT }

impl Pagination {
    /// Reject out-of-range limits and return `(offset, limit)`.
    pub fn normalize(self) -> Result<(u64, u64), ServiceError> {
        if !(1..=MAX_LIMIT).contains(&self.limit) {
            return Err(ServiceError::Validation(format!("limit must be between 1 and {MAX_LIMIT}")));
        }
        Ok((self.skip, self.limit))
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { skip: 0, limit: MAX_LIMIT } }
}

#[cfg(test)]
mod tests {
    use super::Pagination;

    #[test]
    fn normalize_rejects_zero_limit() {
        assert!(Pagination { skip: 0, limit: 0 }.normalize().is_err());
    }

    #[test]
    fn normalize_rejects_upper_bound() {
        assert!(Pagination { skip: 5, limit: 1000 }.normalize().is_err());
        assert_eq!(Pagination { skip: 5, limit: 100 }.normalize().unwrap(), (5, 100));
    }

    #[test]
    fn default_values_are_sane() {
        let d = Pagination::default();
        assert_eq!(d.skip, 0);
        assert_eq!(d.limit, 100);
    }

    #[test]
    fn missing_query_fields_use_defaults() {
        let p: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!((p.skip, p.limit), (0, 100));
    }
}
