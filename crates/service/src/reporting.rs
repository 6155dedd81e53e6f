//! Shared pieces of the reporting endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// Inclusive date range query parameters.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct Period {
    pub data_inicio: NaiveDate,
    pub data_fim: NaiveDate,
}

impl Period {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.data_inicio > self.data_fim {
            return Err(ServiceError::Validation("data_inicio must not be after data_fim".into()));
        }
        Ok(())
    }
}

/// Two-decimal rounding; negative zero comes back as `0.0`.
pub fn round2(v: f64) -> f64 {
    let r = (v * 100.0).round() / 100.0;
    if r == 0.0 { 0.0 } else { r }
}

/// Arithmetic mean rounded to two decimals; 0 for an empty input.
pub fn mean2<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let (sum, n) = values.into_iter().fold((0.0, 0u32), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        return 0.0;
    }
    round2(sum / f64::from(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_cents() {
        assert_eq!(round2(10.005_1), 10.01);
        assert_eq!(round2(0.1 + 0.2), 0.3);
        assert!(round2(-0.0).is_sign_positive());
        assert!(round2(-0.001).is_sign_positive());
    }

    #[test]
    fn mean_of_nothing_is_zero() {
        assert_eq!(mean2(Vec::<f64>::new()), 0.0);
        assert_eq!(mean2([1.0, 2.0, 2.0]), 1.67);
    }

    #[test]
    fn inverted_period_is_rejected() {
        let d = |day| NaiveDate::from_ymd_opt(2025, 1, day).unwrap();
        assert!(Period { data_inicio: d(2), data_fim: d(1) }.validate().is_err());
        assert!(Period { data_inicio: d(1), data_fim: d(1) }.validate().is_ok());
    }
}
