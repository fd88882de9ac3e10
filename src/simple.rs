//! Batch statistics over an in-memory sample.
//!
//! These walk the whole sample and are O(n) in time and memory. They exist as a
//! ground truth to check the streaming estimators against.

use alloc::vec::Vec;

use num_traits::Float;
use ordered_float::{OrderedFloat, PrimitiveFloat};

use crate::helper::median_from_sorted_slice;

/// Returns the arithmetic mean of `sample`, or `None` if it is empty
pub fn mean<T: Float>(sample: &[T]) -> Option<T> {
    if sample.is_empty() {
        return None;
    }
    let sum = sample.iter().fold(T::zero(), |acc, &x| acc + x);
    Some(sum / T::from(sample.len())?)
}

/// Returns the sample and population variance of `sample`
///
/// Sums squared deviations from the mean, so the sample is walked twice.
///
/// # Returns
///
/// * `Option<(T, T)>` - `(sample variance, population variance)`, or `None` with
///   fewer than two values
pub fn variance<T: Float>(sample: &[T]) -> Option<(T, T)> {
    if sample.len() < 2 {
        return None;
    }
    let avg = mean(sample)?;
    let sum_sq = sample.iter().fold(T::zero(), |acc, &x| {
        let delta = x - avg;
        acc + delta * delta
    });
    let n = T::from(sample.len())?;
    Some((sum_sq / (n - T::one()), sum_sq / n))
}

/// Returns the median of `sample`, averaging the two middle values on even length
pub fn median<T: Float + PrimitiveFloat>(sample: &[T]) -> Option<T> {
    let mut sorted: Vec<T> = sample.to_vec();
    sorted.sort_unstable_by_key(|&x| OrderedFloat(x));
    median_from_sorted_slice(&sorted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sample() {
        let empty: [f64; 0] = [];
        assert_eq!(mean(&empty), None);
        assert_eq!(variance(&empty), None);
        assert_eq!(median(&empty), None);
        assert_eq!(variance(&[1.0]), None);
    }

    #[test]
    fn mean_and_variance() {
        let sample = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&sample), Some(5.0));
        assert_eq!(variance(&sample), Some((32.0 / 7.0, 4.0)));
    }

    #[test]
    fn median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[7.5_f32]), Some(7.5));
    }
}
