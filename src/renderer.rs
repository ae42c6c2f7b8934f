//! Per-frame conversion of buckets into screen geometry.
//!
//! One [`FrameRenderer::render_frame`] call is one cycle of the redraw loop:
//! size the backing store, clear, reduce, and draw the value envelope plus the
//! midline. Degenerate input (no data, flat or non-finite values) skips the
//! drawing but leaves the surface cleared, so the next cycle starts fresh.

use egui::{pos2, Color32, Pos2, Vec2};
use serde::{Deserialize, Serialize};

use crate::canvas::Canvas2d;
use crate::data::buckets::{reduce, Bucket};
use crate::data::buffer::SampleBuffer;
use crate::data::viewport::Viewport;

/// Colors and stroke width of the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    /// Area fill under the max envelope, unmultiplied RGBA.
    pub fill_rgba: [u8; 4],
    /// Midline stroke, unmultiplied RGBA.
    pub stroke_rgba: [u8; 4],
    pub line_width: f32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            fill_rgba: [30, 144, 255, 38],
            stroke_rgba: [30, 144, 255, 255],
            line_width: 1.2,
        }
    }
}

impl ChartStyle {
    pub fn fill_color(&self) -> Color32 {
        let [r, g, b, a] = self.fill_rgba;
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }

    pub fn stroke_color(&self) -> Color32 {
        let [r, g, b, a] = self.stroke_rgba;
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }
}

/// What happened during one render cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// No drawable surface (zero size or allocation failed).
    NoSurface,
    /// The reducer produced no bucket.
    Empty,
    /// The value range is flat or not finite.
    DegenerateRange,
    /// Geometry was drawn from this many buckets.
    Drawn { buckets: usize },
}

/// Screen-space shapes for one frame, in logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameGeometry {
    /// Closed polygon: the max curve followed by the bottom-right and bottom-left corners.
    pub area: Vec<Pos2>,
    /// Polyline through each bucket's `(min + max) / 2`.
    pub midline: Vec<Pos2>,
    pub v_min: f64,
    pub v_max: f64,
}

/// Global `[min, max]` over all buckets, `None` if flat or not finite.
pub fn value_range(buckets: &[Bucket]) -> Option<(f64, f64)> {
    let mut v_min = f64::INFINITY;
    let mut v_max = f64::NEG_INFINITY;
    for b in buckets {
        v_min = v_min.min(b.min);
        v_max = v_max.max(b.max);
    }
    if !v_min.is_finite() || !v_max.is_finite() || v_max - v_min <= 0.0 {
        return None;
    }
    Some((v_min, v_max))
}

/// Horizontal position of bucket `i` of `n`.
///
/// Buckets are spread evenly by index rather than by time; buckets covering
/// uneven time spans are drawn at equal spacing.
#[inline]
pub fn bucket_x(i: usize, n: usize, width: f32) -> f32 {
    if n < 2 {
        return 0.0;
    }
    i as f32 / (n - 1) as f32 * width
}

/// Build the area and midline shapes for `buckets` on a surface of `size`.
pub fn build_geometry(buckets: &[Bucket], size: Vec2) -> Option<FrameGeometry> {
    let (v_min, v_max) = value_range(buckets)?;
    let (w, h) = (size.x, size.y);
    let range = v_max - v_min;
    let to_y = |v: f64| h - ((v - v_min) / range) as f32 * h;
    let n = buckets.len();

    let mut area = Vec::with_capacity(n + 2);
    let mut midline = Vec::with_capacity(n);
    for (i, b) in buckets.iter().enumerate() {
        let x = bucket_x(i, n, w);
        area.push(pos2(x, to_y(b.max)));
        midline.push(pos2(x, to_y(b.mid())));
    }
    area.push(pos2(w, h));
    area.push(pos2(0.0, h));

    Some(FrameGeometry {
        area,
        midline,
        v_min,
        v_max,
    })
}

/// Physical backing-store size for a displayed size and pixel ratio.
pub fn backing_size_for(display: Vec2, device_pixel_ratio: f32) -> [u32; 2] {
    [
        (display.x * device_pixel_ratio).round().max(0.0) as u32,
        (display.y * device_pixel_ratio).round().max(0.0) as u32,
    ]
}

/// Draws one frame per call from the buffer and the current viewport.
#[derive(Debug, Clone, Default)]
pub struct FrameRenderer {
    style: ChartStyle,
    frames_drawn: u64,
    frames_skipped: u64,
    last_outcome: Option<FrameOutcome>,
}

impl FrameRenderer {
    pub fn new(style: ChartStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: ChartStyle) {
        self.style = style;
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn frames_skipped(&self) -> u64 {
        self.frames_skipped
    }

    pub fn last_outcome(&self) -> Option<FrameOutcome> {
        self.last_outcome
    }

    /// Make the backing store match `display * ratio`, reallocating on resize.
    ///
    /// A ratio change that lands on the same physical size still reallocates,
    /// so the drawing transform always carries the current ratio.
    /// Returns `false` if there is nothing to draw on.
    pub fn ensure_backing<C: Canvas2d + ?Sized>(&self, canvas: &mut C) -> bool {
        let display = canvas.display_size();
        if !(display.x > 0.0 && display.y > 0.0) {
            return false;
        }
        let dpr = canvas.device_pixel_ratio();
        let [w, h] = backing_size_for(display, dpr);
        if canvas.backing_size() == Some([w, h]) && canvas.backing_scale() == dpr {
            return true;
        }
        tracing::debug!(
            width = w,
            height = h,
            device_pixel_ratio = dpr,
            "resizing chart backing store"
        );
        canvas.resize_backing(w, h, dpr)
    }

    /// Run one render cycle.
    pub fn render_frame<C: Canvas2d + ?Sized>(
        &mut self,
        canvas: &mut C,
        buffer: &SampleBuffer,
        viewport: &Viewport,
    ) -> FrameOutcome {
        let outcome = self.draw(canvas, buffer, viewport);
        match outcome {
            FrameOutcome::Drawn { .. } => self.frames_drawn += 1,
            _ => self.frames_skipped += 1,
        }
        if self.last_outcome != Some(outcome) {
            tracing::trace!(?outcome, "chart frame outcome changed");
        }
        self.last_outcome = Some(outcome);
        outcome
    }

    fn draw<C: Canvas2d + ?Sized>(
        &self,
        canvas: &mut C,
        buffer: &SampleBuffer,
        viewport: &Viewport,
    ) -> FrameOutcome {
        if !self.ensure_backing(canvas) {
            return FrameOutcome::NoSurface;
        }
        canvas.clear();

        let size = canvas.display_size();
        let buckets = reduce(buffer, viewport, size.x);
        if buckets.is_empty() {
            return FrameOutcome::Empty;
        }
        let Some(geometry) = build_geometry(&buckets, size) else {
            return FrameOutcome::DegenerateRange;
        };

        canvas.fill_path(&geometry.area, self.style.fill_color());
        canvas.stroke_polyline(
            &geometry.midline,
            self.style.stroke_color(),
            self.style.line_width,
        );
        FrameOutcome::Drawn {
            buckets: buckets.len(),
        }
    }
}
