//! Time-domain viewport and the pan/zoom gesture state machine.
//!
//! The controller is a plain owned struct: gestures mutate it directly and the
//! frame loop reads it every cycle, so pointer-move and wheel ticks never
//! trigger anything beyond the next redraw.

use crate::data::buffer::DataBounds;

/// Most zoomed-out level (view spans 20x the data).
pub const MIN_ZOOM: f64 = 0.05;
/// Most zoomed-in level.
pub const MAX_ZOOM: f64 = 100.0;
/// Wheel delta to zoom exponent scale.
pub const WHEEL_ZOOM_SENSITIVITY: f64 = 0.0015;

/// Clamp `v` into `[lo, hi]`, letting `lo` win when the interval is inverted.
///
/// `f64::clamp` panics on `lo > hi`, which happens whenever the view span
/// exceeds the data span.
#[inline]
pub(crate) fn clamp_low_wins(v: f64, lo: f64, hi: f64) -> f64 {
    v.min(hi).max(lo)
}

/// The visible time window, defined by its center and a zoom factor.
///
/// `zoom == 1.0` shows the full data span; larger values zoom in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// `None` until the first data arrives.
    pub center_time: Option<f64>,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center_time: None,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    /// Zoom factor limited to `[MIN_ZOOM, MAX_ZOOM]`.
    #[inline]
    pub fn clamped_zoom(&self) -> f64 {
        self.zoom.clamp(MIN_ZOOM, MAX_ZOOM)
    }

    /// View span in milliseconds for the given data bounds.
    #[inline]
    pub fn span(&self, bounds: &DataBounds) -> f64 {
        bounds.total_span() / self.clamped_zoom()
    }

    /// Span used by drag panning and the snap-to-latest check.
    ///
    /// Zoom levels below 1 are treated as 1 here, so a zoomed-out view pans
    /// and re-centers in full-data steps.
    #[inline]
    pub(crate) fn pan_span(&self, bounds: &DataBounds) -> f64 {
        bounds.total_span() / self.zoom.max(1.0)
    }

    /// Center time, falling back to the latest timestamp.
    #[inline]
    pub fn center_or_latest(&self, bounds: &DataBounds) -> f64 {
        self.center_time.unwrap_or(bounds.max_t)
    }
}

/// Transient drag state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Panning {
        /// Pointer X (surface pixels) at pointer-down.
        origin_x: f32,
        /// Pointer X at the previous move event.
        last_x: f32,
    },
}

/// Owns the [`Viewport`] and applies pan, zoom and data-growth clamping to it.
#[derive(Debug, Clone, Default)]
pub struct ViewportController {
    viewport: Viewport,
    gesture: GestureState,
}

impl ViewportController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Replace the viewport (programmatic navigation). The zoom is clamped.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = Viewport {
            center_time: viewport.center_time,
            zoom: viewport.clamped_zoom(),
        };
    }

    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.gesture, GestureState::Panning { .. })
    }

    /// Re-validate the viewport after the buffer changed.
    ///
    /// The first non-empty buffer centers the view on the latest sample.
    /// Afterwards, a window that no longer lies inside the data (because the
    /// data grew past it or the oldest samples were evicted) snaps back to
    /// the latest timestamp.
    pub fn sync_to_data(&mut self, bounds: Option<DataBounds>) {
        let Some(bounds) = bounds else {
            return;
        };
        match self.viewport.center_time {
            None => {
                self.viewport.center_time = Some(bounds.max_t);
                self.viewport.zoom = 1.0;
            }
            Some(center) => {
                let span = self.viewport.pan_span(&bounds);
                let view_min = center - span / 2.0;
                let view_max = center + span / 2.0;
                if view_min < bounds.min_t || view_max > bounds.max_t {
                    self.viewport.center_time = Some(bounds.max_t);
                }
            }
        }
    }

    /// Back to the full data span, centered on the latest sample.
    pub fn reset(&mut self, bounds: Option<DataBounds>) {
        self.viewport.zoom = 1.0;
        self.viewport.center_time = bounds.map(|b| b.max_t);
        self.gesture = GestureState::Idle;
    }

    pub fn pointer_down(&mut self, x: f32) {
        self.gesture = GestureState::Panning {
            origin_x: x,
            last_x: x,
        };
    }

    /// Drag to pan. Returns the unclamped time delta that was applied.
    ///
    /// Dragging right (positive `dx`) moves the window towards earlier time.
    /// `bounds` must come from [`SampleBuffer::interaction_bounds`](crate::SampleBuffer::interaction_bounds);
    /// `None` makes this a no-op apart from tracking the pointer.
    pub fn pointer_move(
        &mut self,
        x: f32,
        width_px: f32,
        bounds: Option<DataBounds>,
    ) -> Option<f64> {
        let GestureState::Panning { origin_x, last_x } = self.gesture else {
            return None;
        };
        let dx = (x - last_x) as f64;
        self.gesture = GestureState::Panning {
            origin_x,
            last_x: x,
        };

        let bounds = bounds?;
        let w = if width_px > 0.0 { width_px as f64 } else { 1.0 };
        let span = self.viewport.pan_span(&bounds);
        let dt = -(dx / w) * span;
        let center = self.viewport.center_or_latest(&bounds) + dt;
        self.viewport.center_time = Some(clamp_low_wins(
            center,
            bounds.min_t + span / 2.0,
            bounds.max_t - span / 2.0,
        ));
        Some(dt)
    }

    /// Pointer released or capture lost.
    pub fn pointer_up(&mut self) {
        self.gesture = GestureState::Idle;
    }

    /// Wheel zoom anchored at the cursor. Returns the new zoom level.
    ///
    /// `delta_y > 0` (scrolling down) zooms out. The time under `cursor_x`
    /// stays under `cursor_x`, then the center is clamped to the data.
    pub fn wheel(
        &mut self,
        cursor_x: f32,
        width_px: f32,
        delta_y: f64,
        bounds: Option<DataBounds>,
    ) -> Option<f64> {
        let bounds = bounds?;
        let w = if width_px > 0.0 { width_px as f64 } else { 1.0 };
        let total = bounds.total_span();

        let cur_zoom = self.viewport.clamped_zoom();
        let cur_span = total / cur_zoom;
        let center = self.viewport.center_or_latest(&bounds);

        let ratio = (cursor_x as f64 / w).clamp(0.0, 1.0);
        let mouse_time = center - cur_span / 2.0 + ratio * cur_span;

        let factor = (-delta_y * WHEEL_ZOOM_SENSITIVITY).exp();
        let new_zoom = (cur_zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let new_span = total / new_zoom;

        let pre_offset = mouse_time - center;
        let post_offset = pre_offset * (new_span / cur_span);
        let unclamped = mouse_time - post_offset;

        self.viewport.center_time = Some(clamp_low_wins(
            unclamped,
            bounds.min_t + new_span / 2.0,
            bounds.max_t - new_span / 2.0,
        ));
        self.viewport.zoom = new_zoom;
        Some(new_zoom)
    }
}
