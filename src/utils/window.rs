use alloc::boxed::Box;

use crate::{Result, StatsError};

/// A fixed-capacity circular buffer holding the most recent `capacity` samples.
///
/// Slots start out empty. Once every slot has been written the buffer is full, and
/// each further push overwrites and returns the oldest sample.
#[derive(Debug, Clone)]
pub struct SlidingWindowBuffer<T> {
    /// Sample slots, `None` until first written
    buf: Box<[Option<T>]>,
    /// Slot written by the next push
    pos: usize,
    /// Whether the buffer has hit full once
    full: bool,
}

impl<T: Copy> SlidingWindowBuffer<T> {
    /// Creates a new window with the specified capacity
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of samples held by the window
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero, see [`SlidingWindowBuffer::try_new`]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity can not be zero");
        Self::empty(capacity)
    }

    /// Creates a new window, rejecting a zero capacity
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The window, or [`StatsError::ZeroCapacity`]
    pub fn try_new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(StatsError::ZeroCapacity);
        }
        Ok(Self::empty(capacity))
    }

    fn empty(capacity: usize) -> Self {
        Self {
            buf: vec![None; capacity].into_boxed_slice(),
            pos: 0,
            full: false,
        }
    }

    /// Clears the buffer, resetting its state.
    pub fn reset(&mut self) {
        self.buf.fill(None);
        self.pos = 0;
        self.full = false;
    }

    /// Returns the fixed capacity of the window
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if the buffer has hit full once
    #[inline]
    pub const fn is_full(&self) -> bool {
        self.full
    }

    /// Returns the current number of samples in the window
    ///
    /// # Returns
    ///
    /// * `usize` - `min(total pushes, capacity)`
    #[inline]
    pub fn size(&self) -> usize {
        if self.full { self.capacity() } else { self.pos }
    }

    /// Returns `true` if nothing has been pushed yet
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Pushes a new sample into the window and returns the sample it evicted
    ///
    /// # Arguments
    ///
    /// * `value` - The sample to push into the window
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The evicted sample, `None` until the window has wrapped
    pub fn add(&mut self, value: T) -> Option<T> {
        let evicted = self.buf[self.pos].replace(value);

        self.pos = (self.pos + 1) % self.capacity();
        if self.pos == 0 {
            self.full = true;
        }
        evicted
    }

    /// Returns an iterator over the samples in logical (oldest to newest) order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let start = if self.full { self.pos } else { 0 };
        (0..self.size()).filter_map(move |i| self.buf[(start + i) % self.capacity()].as_ref())
    }
}
