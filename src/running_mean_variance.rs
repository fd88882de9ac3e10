use num_traits::Float;

/// One-pass mean and variance over an append-only stream of values.
///
/// Uses Welford's update, which keeps the sum of squared deviations from the
/// running mean (`m2`) instead of the raw sum of squares.
///
/// `NaN` samples are ignored and not counted. Infinite samples are accepted and
/// propagate into every statistic.
///
/// # Examples
///
/// ```
/// # use stream_stats::RunningMeanVariance;
/// let mut mv = RunningMeanVariance::<f64>::new();
/// for x in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
///     mv.add(x);
/// }
/// assert!((mv.mean().unwrap_or_default() - 5.0).abs() < 1e-12);
/// assert!((mv.population_variance().unwrap_or_default() - 4.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct RunningMeanVariance<T> {
    /// Number of samples seen
    count: usize,
    /// Running mean
    mean: T,
    /// Sum of squared deviations from the running mean
    m2: T,
}

impl<T: Float> Default for RunningMeanVariance<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> RunningMeanVariance<T> {
    /// Creates an empty accumulator
    pub fn new() -> Self {
        Self {
            count: 0,
            mean: T::zero(),
            m2: T::zero(),
        }
    }

    /// Resets the accumulator to its empty state
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The accumulator
    pub fn reset(&mut self) -> &mut Self {
        self.count = 0;
        self.mean = T::zero();
        self.m2 = T::zero();
        self
    }

    /// Adds a sample to the stream
    ///
    /// # Arguments
    ///
    /// * `value` - The sample to add
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The accumulator
    pub fn add(&mut self, value: T) -> &mut Self {
        if value.is_nan() {
            tracing::trace!(count = self.count, "ignoring NaN sample");
            return self;
        }
        let Some(n) = T::from(self.count + 1) else {
            return self;
        };
        self.count += 1;

        // The second factor must use the updated mean.
        let delta = value - self.mean;
        self.mean = self.mean + delta / n;
        self.m2 = self.m2 + delta * (value - self.mean);
        self
    }

    /// Returns the number of samples seen
    #[inline]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Returns `true` when no sample has been added
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the arithmetic mean of all samples
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The mean, or `None` if no sample has been added
    #[inline]
    pub fn mean(&self) -> Option<T> {
        (self.count > 0).then_some(self.mean)
    }

    /// Returns the sample (Bessel corrected) variance, `m2 / (n - 1)`
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The sample variance, or `None` with fewer than two samples
    pub fn sample_variance(&self) -> Option<T> {
        if self.count < 2 {
            return None;
        }
        Some(self.m2 / T::from(self.count - 1)?)
    }

    /// Returns the population variance, `m2 / n`
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The population variance, or `None` if no sample has been added
    pub fn population_variance(&self) -> Option<T> {
        if self.count == 0 {
            return None;
        }
        Some(self.m2 / T::from(self.count)?)
    }

    /// Returns the sample standard deviation
    pub fn std_dev(&self) -> Option<T> {
        self.sample_variance().map(T::sqrt)
    }
}

impl<T: Float> Extend<T> for RunningMeanVariance<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<T: Float> FromIterator<T> for RunningMeanVariance<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut mv = Self::new();
        mv.extend(iter);
        mv
    }
}
