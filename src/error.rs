use num_traits::Float;

/// Errors raised by the streaming estimators
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum StatsError {
    /// A value fell outside the half-open range `[lower, upper)` of a binned estimator
    #[error("value {value} is outside of [{lower}, {upper})")]
    OutOfRange {
        /// Rejected value
        value: f64,
        /// Inclusive lower bound
        lower: f64,
        /// Exclusive upper bound
        upper: f64,
    },
    /// Bin range is empty, inverted or not finite
    #[error("invalid bin range [{lower}, {upper})")]
    InvalidRange {
        /// Requested lower bound
        lower: f64,
        /// Requested upper bound
        upper: f64,
    },
    /// A binned estimator was configured with no bins
    #[error("bin count must be positive")]
    ZeroBins,
    /// A window was configured with no capacity
    #[error("window capacity must be positive")]
    ZeroCapacity,
    /// Requested bin count can not be represented or allocated
    #[error("{requested} bins can not be represented or allocated")]
    TooManyBins {
        /// Number of bins requested
        requested: u128,
    },
    /// An exact integer estimator was given a value with a fractional part
    #[error("value {value} is not an integer")]
    NotIntegral {
        /// Rejected value
        value: f64,
    },
}

/// Result alias used throughout the crate
pub type Result<T> = core::result::Result<T, StatsError>;

impl StatsError {
    pub(crate) fn out_of_range<T: Float>(value: T, lower: T, upper: T) -> Self {
        Self::OutOfRange {
            value: as_f64(value),
            lower: as_f64(lower),
            upper: as_f64(upper),
        }
    }

    pub(crate) fn not_integral<T: Float>(value: T) -> Self {
        Self::NotIntegral {
            value: as_f64(value),
        }
    }

    pub(crate) fn invalid_range<T: Float>(lower: T, upper: T) -> Self {
        Self::InvalidRange {
            lower: as_f64(lower),
            upper: as_f64(upper),
        }
    }
}

#[inline]
fn as_f64<T: Float>(v: T) -> f64 {
    v.to_f64().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn out_of_range_message() {
        let err = StatsError::out_of_range(10.0_f32, 5.0, 10.0);
        assert_eq!(err.to_string(), "value 10 is outside of [5, 10)");
    }

    #[test]
    fn invalid_range_keeps_bounds() {
        let err = StatsError::invalid_range(3.0, 1.0);
        assert_eq!(
            err,
            StatsError::InvalidRange {
                lower: 3.0,
                upper: 1.0
            }
        );
    }
}
