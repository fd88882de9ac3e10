use core::cmp::Ordering;

use num_traits::Float;

use crate::{BinnedData, Result, StatsError};

/// How a bin index is turned back into a reported value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinValue {
    /// Midpoint of the bin's value range
    Midpoint,
    /// Start of the bin, exact when every bin holds a single integer
    Start,
}

/// Streaming median over a binned histogram.
///
/// Keeps a pointer to the element currently believed to be the median: its bin,
/// its offset among the elements counted in that bin, and how many elements rank
/// strictly before and after it. Every add moves the pointer by at most one
/// element, so an update is O(1) apart from skipping empty bins when the pointer
/// leaves its bin.
///
/// Values sharing the median's bin are indistinguishable. They are alternately
/// placed before and after the pointer, starting with before.
///
/// With many bins the reported median is the midpoint of the median bin. With
/// [`BinnedMedian::exact`] every integer gets its own bin and the median is exact.
///
/// # Examples
///
/// ```
/// # use stream_stats::BinnedMedian;
/// let mut bm = BinnedMedian::exact(0, 9)?;
/// for d in [3.0, 1.0, 4.0, 1.0, 5.0] {
///     bm.add(d)?;
/// }
/// assert_eq!(bm.median(), Some(3.0));
/// # Ok::<(), stream_stats::StatsError>(())
/// ```
#[derive(Debug, Clone)]
pub struct BinnedMedian<T> {
    /// Histogram of all values seen
    data: BinnedData<T>,
    /// Reported median
    median: Option<T>,
    /// Bin holding the median element
    bin: usize,
    /// Position of the median element among the elements of its bin
    offset: usize,
    /// Elements ranked strictly before the median element
    before: usize,
    /// Elements ranked strictly after the median element
    after: usize,
    /// Whether the next tie goes after the median element
    tie_after: bool,
    /// Bin to value conversion
    repr: BinValue,
}

impl<T: Float> BinnedMedian<T> {
    /// Creates an approximate median over `nbins` bins spanning `[lower, upper)`
    ///
    /// # Arguments
    ///
    /// * `lower` - Inclusive lower bound of accepted values
    /// * `upper` - Exclusive upper bound of accepted values
    /// * `nbins` - Number of bins; more bins give a finer estimate
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The estimator, or the [`BinnedData`] configuration error
    pub fn new(lower: T, upper: T, nbins: usize) -> Result<Self> {
        Ok(Self::from_data(
            BinnedData::new(lower, upper, nbins)?,
            BinValue::Midpoint,
        ))
    }

    /// Creates an exact median for integer values in `lower..=upper`
    ///
    /// One bin is allocated per integer, so memory grows with the width of the range.
    /// Values with a fractional part are rejected by [`BinnedMedian::add`].
    ///
    /// # Arguments
    ///
    /// * `lower` - Smallest accepted integer
    /// * `upper` - Largest accepted integer
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The estimator, or an error if the range is inverted or
    ///   can not be binned exactly in `T`
    pub fn exact(lower: i64, upper: i64) -> Result<Self> {
        if upper < lower {
            return Err(StatsError::InvalidRange {
                lower: lower as f64,
                upper: upper as f64,
            });
        }
        let width = (i128::from(upper) - i128::from(lower) + 1) as u128;
        let too_many = StatsError::TooManyBins { requested: width };

        let nbins = usize::try_from(width).map_err(|_| too_many)?;
        let lo = T::from(lower).ok_or(too_many)?;
        let hi = T::from(upper).ok_or(too_many)? + T::one();
        // Every integer must stay distinct once converted to `T`.
        if (hi - lo).to_usize() != Some(nbins) {
            return Err(too_many);
        }

        Ok(Self::from_data(BinnedData::new(lo, hi, nbins)?, BinValue::Start))
    }

    fn from_data(data: BinnedData<T>, repr: BinValue) -> Self {
        Self {
            data,
            median: None,
            bin: 0,
            offset: 0,
            before: 0,
            after: 0,
            tie_after: false,
            repr,
        }
    }

    /// Forgets every value, keeping the bin layout
    pub fn reset(&mut self) -> &mut Self {
        self.data.reset();
        self.median = None;
        self.bin = 0;
        self.offset = 0;
        self.before = 0;
        self.after = 0;
        self.tie_after = false;
        self
    }

    /// Adds a value and moves the median pointer
    ///
    /// # Arguments
    ///
    /// * `value` - The value to add, must lie in `[lower, upper)`
    ///
    /// # Returns
    ///
    /// * `Result<&mut Self>` - The estimator, or [`StatsError::OutOfRange`] (and
    ///   [`StatsError::NotIntegral`] for an exact median) with the estimator left
    ///   unchanged
    pub fn add(&mut self, value: T) -> Result<&mut Self> {
        if self.repr == BinValue::Start && value.is_finite() && value.fract() != T::zero() {
            let err = StatsError::not_integral(value);
            tracing::debug!(%err, "rejected value");
            return Err(err);
        }
        let bin = self.data.add(value)?;

        if self.median.is_none() {
            self.median = Some(value);
            self.bin = bin;
            self.offset = 0;
            self.before = 0;
            self.after = 0;
            return Ok(self);
        }

        match bin.cmp(&self.bin) {
            Ordering::Less => self.before += 1,
            Ordering::Greater => self.after += 1,
            Ordering::Equal => {
                if self.tie_after {
                    self.after += 1;
                } else {
                    self.before += 1;
                    self.offset += 1;
                }
                self.tie_after = !self.tie_after;
            }
        }

        if self.before == self.after + 2 {
            self.before -= 1;
            self.after += 1;
            self.step_down();
        } else if self.after == self.before + 2 {
            self.before += 1;
            self.after -= 1;
            self.step_up();
        }
        Ok(self)
    }

    /// Moves the median pointer one element toward lower values
    fn step_down(&mut self) {
        if self.offset > 0 {
            self.offset -= 1;
            return;
        }
        let counts = self.data.counts();
        if let Some(prev) = (0..self.bin).rev().find(|&i| counts[i] > 0) {
            self.offset = counts[prev] - 1;
            self.move_to(prev);
        }
    }

    /// Moves the median pointer one element toward higher values
    fn step_up(&mut self) {
        let counts = self.data.counts();
        if self.offset + 1 < counts[self.bin] {
            self.offset += 1;
            return;
        }
        if let Some(next) = (self.bin + 1..counts.len()).find(|&i| counts[i] > 0) {
            self.offset = 0;
            self.move_to(next);
        }
    }

    fn move_to(&mut self, bin: usize) {
        tracing::trace!(from = self.bin, to = bin, "median moved to another bin");
        self.bin = bin;
        self.median = Some(match self.repr {
            BinValue::Midpoint => self.data.unbin(bin),
            BinValue::Start => self.data.bin_start(bin),
        });
    }

    /// Returns the current median estimate
    ///
    /// Until the pointer first leaves the first value's bin this is that first
    /// value itself. With an even number of values it is one of the two middle
    /// elements.
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The median, or `None` if no value has been added
    #[inline]
    pub fn median(&self) -> Option<T> {
        self.median
    }

    /// Returns the bin holding the median element, or `None` if empty
    #[inline]
    pub fn median_bin(&self) -> Option<usize> {
        self.median.map(|_| self.bin)
    }

    /// Returns the number of values added
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if no value has been added
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the underlying histogram
    #[inline]
    pub fn data(&self) -> &BinnedData<T> {
        &self.data
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::simple;

    fn pi_digits() -> Vec<f64> {
        "3141592653589793238462643383279502884197169"
            .bytes()
            .map(|b| f64::from(b - b'0'))
            .collect()
    }

    #[test]
    fn empty_has_no_median() {
        let bm = BinnedMedian::<f64>::new(0.0, 1.0, 10).unwrap();
        assert!(bm.is_empty());
        assert_eq!(bm.median(), None);
        assert_eq!(bm.median_bin(), None);
    }

    #[test]
    fn first_value_is_the_median() {
        let mut bm = BinnedMedian::new(5.0, 10.0, 10).unwrap();
        bm.add(6.3).unwrap();
        assert_eq!(bm.median(), Some(6.3));
        assert_eq!(bm.median_bin(), Some(2));
    }

    #[test]
    fn exact_matches_pi_digits_median() {
        let digits = pi_digits();
        let mut bm = BinnedMedian::exact(0, 9).unwrap();
        for d in &digits {
            bm.add(*d).unwrap();
        }
        assert_eq!(bm.len(), 43);
        assert_eq!(bm.median(), simple::median(&digits));
    }

    #[test]
    fn exact_tracks_every_prefix() {
        let digits = pi_digits();
        let mut bm = BinnedMedian::exact(0, 9).unwrap();
        for (i, d) in digits.iter().enumerate() {
            bm.add(*d).unwrap();

            let mut prefix = digits[..=i].to_vec();
            prefix.sort_by(f64::total_cmp);
            let lower_mid = prefix[i / 2];
            let upper_mid = prefix[(i + 1) / 2];
            let median = bm.median().unwrap();
            assert!(
                median == lower_mid || median == upper_mid,
                "median {median} at prefix {i} is not a middle element"
            );
        }
    }

    #[test]
    fn ties_alternate_sides() {
        let mut bm = BinnedMedian::exact(0, 9).unwrap();
        for _ in 0..5 {
            bm.add(4.0).unwrap();
        }
        // Ties went before, after, before, after.
        assert_eq!(bm.before, 2);
        assert_eq!(bm.after, 2);
        assert_eq!(bm.offset, 2);
        assert_eq!(bm.median(), Some(4.0));
    }

    #[test]
    fn pointer_skips_empty_bins() {
        let mut bm = BinnedMedian::exact(0, 99).unwrap();
        bm.add(50.0).unwrap();
        bm.add(3.0).unwrap();
        bm.add(1.0).unwrap();
        assert_eq!(bm.median(), Some(3.0));
        bm.add(97.0).unwrap();
        bm.add(98.0).unwrap();
        assert_eq!(bm.median(), Some(50.0));
        bm.add(99.0).unwrap();
        bm.add(99.0).unwrap();
        assert_eq!(bm.median(), Some(97.0));
    }

    #[test]
    fn approximate_reports_bin_midpoint() {
        let mut bm = BinnedMedian::new(0.0, 10.0, 5).unwrap();
        bm.add(1.0).unwrap();
        bm.add(9.0).unwrap();
        bm.add(8.5).unwrap();
        // The pointer left the first bin and now reports the midpoint of [8, 10).
        assert_eq!(bm.median(), Some(9.0));
        assert_eq!(bm.median_bin(), Some(4));
    }

    #[test]
    fn out_of_range_leaves_state_untouched() {
        let mut bm = BinnedMedian::new(5.0, 10.0, 100).unwrap();
        bm.add(7.0).unwrap();
        assert!(matches!(
            bm.add(10.0),
            Err(StatsError::OutOfRange { value, .. }) if value == 10.0
        ));
        assert!(bm.add(4.999).is_err());
        assert_eq!(bm.len(), 1);
        assert_eq!(bm.median(), Some(7.0));
    }

    #[test]
    fn exact_rejects_bad_ranges() {
        assert!(matches!(
            BinnedMedian::<f64>::exact(9, 0),
            Err(StatsError::InvalidRange { .. })
        ));
        assert!(matches!(
            BinnedMedian::<f32>::exact(0, 1 << 30),
            Err(StatsError::TooManyBins { .. })
        ));
    }

    #[test]
    fn exact_rejects_fractional_values() {
        let mut bm = BinnedMedian::exact(0, 9).unwrap();
        assert!(matches!(
            bm.add(3.5),
            Err(StatsError::NotIntegral { value }) if value == 3.5
        ));
        assert!(bm.is_empty());
        assert_eq!(bm.median(), None);

        bm.add(3.0).unwrap();
        assert_eq!(bm.median(), Some(3.0));
        assert!(bm.add(-0.25).is_err());
        assert!(matches!(bm.add(10.0), Err(StatsError::OutOfRange { .. })));
        assert_eq!(bm.len(), 1);
    }

    #[test]
    fn approximate_accepts_fractional_values() {
        let mut bm = BinnedMedian::new(0.0, 10.0, 10).unwrap();
        bm.add(3.5).unwrap();
        assert_eq!(bm.median(), Some(3.5));
    }

    #[test]
    fn reset_starts_over() {
        let mut bm = BinnedMedian::exact(0, 9).unwrap();
        bm.add(1.0).unwrap().add(2.0).unwrap().add(3.0).unwrap();
        bm.reset();
        assert_eq!(bm.median(), None);
        bm.add(8.0).unwrap();
        assert_eq!(bm.median(), Some(8.0));
        assert_eq!(bm.data().len(), 1);
    }
}
