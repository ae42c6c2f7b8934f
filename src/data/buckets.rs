//! Viewport-driven min/max downsampling.
//!
//! Reduction cost is proportional to the number of samples inside the view
//! window, not to the size of the buffer: the window edges are found by
//! binary search and only the selected slice is scanned.

use crate::data::buffer::{DataBounds, SampleBuffer};
use crate::data::sample::Sample;
use crate::data::viewport::Viewport;

/// Lower bound on the number of buckets, regardless of surface width.
pub const MIN_BUCKETS: usize = 200;
/// Upper bound on the number of buckets.
pub const MAX_BUCKETS: usize = 1200;

/// Aggregate of a contiguous run of samples, drawn as one display column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucket {
    /// Mean timestamp of the run.
    pub t: f64,
    pub min: f64,
    pub max: f64,
}

impl Bucket {
    #[inline]
    pub fn mid(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

/// Time range actually displayed, after clamping to the data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewWindow {
    pub min: f64,
    pub max: f64,
}

impl ViewWindow {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Number of buckets for a surface `width_px` logical pixels wide.
pub fn target_bucket_count(width_px: f32) -> usize {
    let w = width_px.floor();
    if !w.is_finite() || w <= 0.0 {
        return MIN_BUCKETS;
    }
    (w as usize).clamp(MIN_BUCKETS, MAX_BUCKETS)
}

/// Derive the displayed window from the viewport.
///
/// When the window overflows one side of the data it is shifted back inside
/// instead of clipped, so the span is kept whenever the data is long enough.
pub fn view_window(viewport: &Viewport, bounds: &DataBounds) -> ViewWindow {
    let span = viewport.span(bounds);
    let center = viewport.center_or_latest(bounds);
    let mut min = center - span / 2.0;
    let mut max = center + span / 2.0;
    if min < bounds.min_t {
        min = bounds.min_t;
        max = (bounds.min_t + span).min(bounds.max_t);
    }
    if max > bounds.max_t {
        max = bounds.max_t;
        min = (bounds.max_t - span).max(bounds.min_t);
    }
    ViewWindow { min, max }
}

#[derive(Default)]
struct Accumulator {
    count: usize,
    t_sum: f64,
    min: f64,
    max: f64,
}

impl Accumulator {
    fn push(&mut self, s: &Sample) {
        if self.count == 0 {
            self.min = s.value;
            self.max = s.value;
        } else {
            self.min = self.min.min(s.value);
            self.max = self.max.max(s.value);
        }
        self.t_sum += s.t();
        self.count += 1;
    }

    fn take(&mut self) -> Bucket {
        let b = Bucket {
            t: self.t_sum / self.count as f64,
            min: self.min,
            max: self.max,
        };
        *self = Self::default();
        b
    }
}

/// Reduce the visible slice of `buffer` to at most
/// [`target_bucket_count(width_px)`](target_bucket_count) buckets.
///
/// Returns an empty vector for an empty buffer. When the view window holds
/// no sample at all (zoomed in between two samples) a single flat bucket
/// with the latest value, placed at the viewport center, is returned instead.
pub fn reduce(buffer: &SampleBuffer, viewport: &Viewport, width_px: f32) -> Vec<Bucket> {
    let (Some(bounds), Some(last)) = (buffer.bounds(), buffer.last()) else {
        return Vec::new();
    };

    let window = view_window(viewport, &bounds);
    let range = buffer.index_range(window.min, window.max);
    if range.is_empty() {
        return vec![Bucket {
            t: viewport.center_or_latest(&bounds),
            min: last.value,
            max: last.value,
        }];
    }

    let selected = range.len();
    let target = target_bucket_count(width_px);
    let bucket_size = selected.div_ceil(target).max(1);

    let mut buckets = Vec::with_capacity(selected.div_ceil(bucket_size));
    let mut acc = Accumulator::default();
    for s in buffer.range(range) {
        acc.push(s);
        if acc.count == bucket_size {
            buckets.push(acc.take());
        }
    }
    if acc.count > 0 {
        buckets.push(acc.take());
    }
    buckets
}
