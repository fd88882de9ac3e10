use alloc::vec::Vec;

use num_traits::Float;

use crate::{Result, StatsError};

/// A histogram of equal-width bins over the half-open range `[lower, upper)`.
///
/// Only counts are kept, never the values themselves. A value `v` lands in bin
/// `floor((v - lower) / (upper - lower) * nbins)`.
#[derive(Debug, Clone)]
pub struct BinnedData<T> {
    /// Inclusive lower bound
    lower: T,
    /// Exclusive upper bound
    upper: T,
    /// Per-bin counts
    counts: Vec<usize>,
    /// Total number of values added
    size: usize,
}

impl<T: Float> BinnedData<T> {
    /// Creates an empty histogram with `nbins` bins over `[lower, upper)`
    ///
    /// # Arguments
    ///
    /// * `lower` - Inclusive lower bound
    /// * `upper` - Exclusive upper bound, must be greater than `lower`
    /// * `nbins` - Number of bins, must be positive
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The histogram, or an error for an unusable configuration
    pub fn new(lower: T, upper: T, nbins: usize) -> Result<Self> {
        if nbins == 0 {
            return Err(StatsError::ZeroBins);
        }
        if !(lower < upper && (upper - lower).is_finite()) {
            return Err(StatsError::invalid_range(lower, upper));
        }
        let too_many = StatsError::TooManyBins {
            requested: nbins as u128,
        };
        if T::from(nbins).is_none() {
            return Err(too_many);
        }
        let mut counts = Vec::new();
        counts.try_reserve_exact(nbins).map_err(|_| too_many)?;
        counts.resize(nbins, 0);
        Ok(Self {
            lower,
            upper,
            counts,
            size: 0,
        })
    }

    /// Forgets all counts, keeping the bin layout
    pub fn reset(&mut self) {
        self.counts.fill(0);
        self.size = 0;
    }

    /// Returns the inclusive lower bound
    #[inline]
    pub fn lower(&self) -> T {
        self.lower
    }

    /// Returns the exclusive upper bound
    #[inline]
    pub fn upper(&self) -> T {
        self.upper
    }

    /// Returns the number of bins
    #[inline]
    pub fn nbins(&self) -> usize {
        self.counts.len()
    }

    /// Returns the total number of values added
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if nothing has been added
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the count of bin `index`, or `None` past the last bin
    #[inline]
    pub fn count(&self, index: usize) -> Option<usize> {
        self.counts.get(index).copied()
    }

    /// Returns all bin counts, lowest bin first
    #[inline]
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    fn nbins_t(&self) -> T {
        // `new` checked that the bin count is representable.
        T::from(self.nbins()).unwrap_or_else(T::infinity)
    }

    /// Returns the width of the value range covered by each bin
    #[inline]
    pub fn bin_width(&self) -> T {
        (self.upper - self.lower) / self.nbins_t()
    }

    /// Returns the bin a value falls into
    ///
    /// # Arguments
    ///
    /// * `value` - The value to locate
    ///
    /// # Returns
    ///
    /// * `Result<usize>` - The bin index, or [`StatsError::OutOfRange`] when `value`
    ///   is not in `[lower, upper)`
    pub fn bin(&self, value: T) -> Result<usize> {
        if !(self.lower..self.upper).contains(&value) {
            return Err(StatsError::out_of_range(value, self.lower, self.upper));
        }
        let offset = value - self.lower;
        let range = self.upper - self.lower;
        // Scale before dividing so integer-width bins map exactly, unless that overflows.
        let mut scaled = offset * self.nbins_t() / range;
        if !scaled.is_finite() {
            scaled = offset / range * self.nbins_t();
        }
        let last = self.nbins() - 1;
        let index = scaled.floor().to_usize().unwrap_or(last);
        Ok(index.min(last))
    }

    /// Returns the lowest value mapped to bin `index`
    pub fn bin_start(&self, index: usize) -> T {
        let i = T::from(index).unwrap_or_else(T::zero);
        self.lower + i * self.bin_width()
    }

    /// Returns the midpoint of the value range mapped to bin `index`
    ///
    /// Assumes values are spread uniformly inside the bin, so this is an
    /// approximation of any value counted there.
    pub fn unbin(&self, index: usize) -> T {
        let half = T::from(0.5).unwrap_or_else(T::zero);
        let i = T::from(index).unwrap_or_else(T::zero);
        self.lower + (i + half) * self.bin_width()
    }

    /// Counts a value in its bin
    ///
    /// # Returns
    ///
    /// * `Result<usize>` - The bin the value was counted in, or
    ///   [`StatsError::OutOfRange`]
    pub fn add(&mut self, value: T) -> Result<usize> {
        let index = self.bin(value).inspect_err(|err| {
            tracing::debug!(%err, "rejected value");
        })?;
        self.counts[index] += 1;
        self.size += 1;
        Ok(index)
    }
}
