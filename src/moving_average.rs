use num_traits::Float;

use crate::{Kbn, Result, SlidingWindowBuffer};

/// What [`MovingAverage::mean`] reports before any sample has been added
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyWindow {
    /// Report a mean of zero
    #[default]
    Zero,
    /// Report no mean at all
    Undefined,
}

/// Mean of the last `n` samples of a stream.
///
/// Before `n` samples have arrived the mean covers only the samples received so
/// far, never padding with zeros. The window sum is kept with Kahan-Babuska-Neumaier
/// compensated summation, so repeatedly adding and subtracting samples does not
/// drift.
///
/// # Examples
///
/// ```
/// # use stream_stats::MovingAverage;
/// let mut ma = MovingAverage::new(2);
/// ma.add(1.0).add(2.0).add(4.0);
/// assert_eq!(ma.mean(), Some(3.0));
/// ```
#[derive(Debug, Clone)]
pub struct MovingAverage<T> {
    /// Window of the samples being averaged
    window: SlidingWindowBuffer<T>,
    /// Sum of the samples currently in the window
    sum: Kbn<T>,
    /// Answer for an empty window
    empty: EmptyWindow,
}

impl<T: Float + Default> MovingAverage<T> {
    /// Creates an `n`-sample moving average reporting zero while empty
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero, see [`MovingAverage::try_new`]
    pub fn new(n: usize) -> Self {
        Self::with_window(SlidingWindowBuffer::new(n), EmptyWindow::default())
    }

    /// Creates an `n`-sample moving average, rejecting a zero window
    pub fn try_new(n: usize) -> Result<Self> {
        Ok(Self::with_window(
            SlidingWindowBuffer::try_new(n)?,
            EmptyWindow::default(),
        ))
    }

    /// Creates an `n`-sample moving average with an explicit empty-window policy
    ///
    /// # Arguments
    ///
    /// * `n` - Number of samples to average
    /// * `empty` - What `mean` reports before the first sample
    pub fn with_policy(n: usize, empty: EmptyWindow) -> Result<Self> {
        Ok(Self::with_window(SlidingWindowBuffer::try_new(n)?, empty))
    }

    fn with_window(window: SlidingWindowBuffer<T>, empty: EmptyWindow) -> Self {
        Self {
            window,
            sum: Kbn::default(),
            empty,
        }
    }

    /// Returns the empty-window policy
    #[inline]
    pub const fn empty_policy(&self) -> EmptyWindow {
        self.empty
    }

    /// Sets the empty-window policy
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The moving average
    #[inline]
    pub const fn set_empty_policy(&mut self, empty: EmptyWindow) -> &mut Self {
        self.empty = empty;
        self
    }

    /// Resets the moving average, keeping its window size and policy
    pub fn reset(&mut self) -> &mut Self {
        self.window.reset();
        self.sum = Kbn::default();
        self
    }

    /// Feeds a sample into the window
    ///
    /// # Arguments
    ///
    /// * `value` - The new sample
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The moving average
    pub fn add(&mut self, value: T) -> &mut Self {
        if let Some(evicted) = self.window.add(value) {
            self.sum -= evicted;
        }
        self.sum += value;
        self
    }

    /// Returns the number of samples currently averaged
    #[inline]
    pub fn len(&self) -> usize {
        self.window.size()
    }

    /// Returns `true` before the first sample
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Returns the window size `n`
    #[inline]
    pub fn capacity(&self) -> usize {
        self.window.capacity()
    }

    /// Returns the sum of the samples in the window
    #[inline]
    pub fn sum(&self) -> T {
        self.sum.total()
    }

    /// Returns the mean of the samples in the window
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The mean; while empty, `Some(0)` under [`EmptyWindow::Zero`]
    ///   and `None` under [`EmptyWindow::Undefined`]
    pub fn mean(&self) -> Option<T> {
        match self.len() {
            0 => match self.empty {
                EmptyWindow::Zero => Some(T::zero()),
                EmptyWindow::Undefined => None,
            },
            n => Some(self.sum.total() / T::from(n)?),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    const PI_DIGITS: &str = "3141592653589793238462643383279502884197169";

    fn pi_digits() -> alloc::vec::Vec<f64> {
        PI_DIGITS
            .bytes()
            .map(|b| f64::from(b - b'0'))
            .collect()
    }

    #[test]
    fn pi_digits_average() {
        let digits = pi_digits();
        let mut ma = MovingAverage::new(5);

        digits[..3].iter().for_each(|d| {
            ma.add(*d);
        });
        assert_approx_eq!(ma.mean().unwrap(), (3.0 + 1.0 + 4.0) / 3.0);

        digits[3..].iter().for_each(|d| {
            ma.add(*d);
        });
        assert_eq!(ma.len(), 5);
        assert_approx_eq!(ma.mean().unwrap(), 6.4);
    }

    #[test]
    fn empty_window_reports_zero_by_default() {
        let ma = MovingAverage::<f64>::new(4);
        assert_eq!(ma.empty_policy(), EmptyWindow::Zero);
        assert_eq!(ma.mean(), Some(0.0));
    }

    #[test]
    fn empty_window_can_be_undefined() {
        let mut ma = MovingAverage::<f64>::with_policy(4, EmptyWindow::Undefined)
            .unwrap();
        assert_eq!(ma.mean(), None);

        ma.add(2.0);
        assert_eq!(ma.mean(), Some(2.0));

        ma.reset();
        assert_eq!(ma.mean(), None);
        ma.set_empty_policy(EmptyWindow::Zero);
        assert_eq!(ma.mean(), Some(0.0));
    }

    #[test]
    fn averages_last_n() {
        let mut ma = MovingAverage::new(3);
        let inputs = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mut results = vec![];

        inputs.iter().for_each(|i| {
            if let Some(v) = ma.add(*i).mean() {
                results.push(v)
            }
        });

        let expected = [1.0, 1.5, 2.0, 3.0, 4.0, 5.0];
        for (r, e) in results.iter().zip(expected) {
            assert_approx_eq!(*r, e);
        }
    }

    #[test]
    fn sum_does_not_drift() {
        let mut ma = MovingAverage::new(3);
        for _ in 0..10_000 {
            ma.add(1_000_000.1);
        }
        ma.add(0.1).add(0.2).add(0.3);
        assert_approx_eq!(ma.sum(), 0.6, 1e-9);
    }

    #[test]
    fn zero_window_is_rejected() {
        assert!(MovingAverage::<f64>::try_new(0).is_err());
        assert!(MovingAverage::<f64>::with_policy(0, EmptyWindow::Undefined).is_err());
    }
}
