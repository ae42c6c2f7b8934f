use std::collections::VecDeque;
use std::ops::Range;

use crate::data::sample::Sample;

/// Default number of samples retained in the rolling window.
pub const DEFAULT_CAPACITY: usize = 20_000;

/// Time extent of the buffered samples, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataBounds {
    pub min_t: f64,
    pub max_t: f64,
}

impl DataBounds {
    pub fn new(min_t: f64, max_t: f64) -> Self {
        Self { min_t, max_t }
    }

    /// Full data span, never below one millisecond.
    #[inline]
    pub fn total_span(&self) -> f64 {
        (self.max_t - self.min_t).max(1.0)
    }
}

/// Bounded, time-ordered rolling window of samples.
///
/// Chunks are appended at the back; once the buffer holds more than
/// `capacity` samples the oldest ones are dropped from the front. The buffer
/// never re-sorts: out-of-order chunks are stored as delivered.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl Default for SampleBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl SampleBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            capacity,
        }
    }

    /// Create a buffer pre-filled with an initial dataset (e.g. history loaded at mount).
    pub fn with_initial<I>(capacity: usize, initial: I) -> Self
    where
        I: IntoIterator<Item = Sample>,
    {
        let mut buf = Self::new(capacity);
        buf.append(initial);
        buf
    }

    /// Merge a chunk at the back and evict from the front down to `capacity`.
    ///
    /// Returns the number of evicted samples.
    pub fn append<I>(&mut self, chunk: I) -> usize
    where
        I: IntoIterator<Item = Sample>,
    {
        self.samples.extend(chunk);
        self.evict_excess()
    }

    fn evict_excess(&mut self) -> usize {
        let excess = self.samples.len().saturating_sub(self.capacity);
        if excess > 0 {
            self.samples.drain(..excess);
        }
        excess
    }

    /// Change the capacity, evicting the oldest samples if it shrinks.
    pub fn set_capacity(&mut self, capacity: usize) -> usize {
        self.capacity = capacity;
        self.evict_excess()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn first(&self) -> Option<&Sample> {
        self.samples.front()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.back()
    }

    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Sample> + '_ {
        self.samples.iter()
    }

    /// Iterate a contiguous index range (as returned by [`index_range`](Self::index_range)).
    pub fn range(&self, indices: Range<usize>) -> impl Iterator<Item = &Sample> + '_ {
        self.samples.range(indices)
    }

    /// Timestamps of the first and last sample, if any.
    pub fn bounds(&self) -> Option<DataBounds> {
        match (self.samples.front(), self.samples.back()) {
            (Some(first), Some(last)) => Some(DataBounds::new(first.t(), last.t())),
            _ => None,
        }
    }

    /// Bounds usable by pan/zoom gestures: requires at least two samples.
    pub fn interaction_bounds(&self) -> Option<DataBounds> {
        if self.samples.len() < 2 {
            return None;
        }
        self.bounds()
    }

    /// Indices of the samples whose timestamp lies in `[view_min, view_max]`.
    ///
    /// Binary search over the timestamp-ordered buffer; the result is empty
    /// when the window falls between two samples.
    pub fn index_range(&self, view_min: f64, view_max: f64) -> Range<usize> {
        let start = self.samples.partition_point(|s| s.t() < view_min);
        let end = self.samples.partition_point(|s| s.t() <= view_max);
        start..end.max(start)
    }
}
