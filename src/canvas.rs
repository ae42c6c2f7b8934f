//! Immediate-mode 2D drawing surface used by the frame renderer.
//!
//! [`Canvas2d`] is the narrow surface contract the renderer draws through:
//! a logical (displayed) size, a device pixel ratio, a backing store that is
//! resized to `display * ratio`, and three primitives. [`PixmapCanvas`] is the
//! raster implementation backed by a `tiny_skia::Pixmap`; its pixels are
//! uploaded to an egui texture by the chart panel.

use egui::{Color32, Pos2, Vec2};
use tiny_skia::{FillRule, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

/// Drawing surface with a DPR-scaled backing store.
///
/// All coordinates passed to the drawing primitives are logical pixels; the
/// implementation applies the scale given to [`resize_backing`](Self::resize_backing).
pub trait Canvas2d {
    /// Displayed size in logical pixels.
    fn display_size(&self) -> Vec2;
    /// Physical pixels per logical pixel.
    fn device_pixel_ratio(&self) -> f32;
    /// Current backing-store size in physical pixels, `None` if not allocated.
    fn backing_size(&self) -> Option<[u32; 2]>;
    /// Scale the drawing transform was last prepared with.
    fn backing_scale(&self) -> f32;
    /// Reallocate the backing store and pre-scale the coordinate system.
    ///
    /// Returns `false` when no surface could be allocated.
    fn resize_backing(&mut self, width: u32, height: u32, scale: f32) -> bool;
    /// Clear the whole surface to transparent.
    fn clear(&mut self);
    /// Fill the closed polygon through `points`.
    fn fill_path(&mut self, points: &[Pos2], color: Color32);
    /// Stroke the open polyline through `points`.
    fn stroke_polyline(&mut self, points: &[Pos2], color: Color32, width: f32);
}

fn paint_for(color: Color32) -> Paint<'static> {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

fn build_path(points: &[Pos2], close: bool) -> Option<tiny_skia::Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x, first.y);
    for p in rest {
        pb.line_to(p.x, p.y);
    }
    if close {
        pb.close();
    }
    pb.finish()
}

/// Raster canvas backed by a `tiny_skia::Pixmap`.
pub struct PixmapCanvas {
    pixmap: Option<Pixmap>,
    display: Vec2,
    dpr: f32,
    scale: f32,
    transform: Transform,
}

impl Default for PixmapCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl PixmapCanvas {
    pub fn new() -> Self {
        Self {
            pixmap: None,
            display: Vec2::ZERO,
            dpr: 1.0,
            scale: 1.0,
            transform: Transform::identity(),
        }
    }

    /// Record the displayed size and pixel ratio read from the host layout.
    ///
    /// The backing store is not touched here; the renderer resizes it at the
    /// start of the next cycle.
    pub fn set_display(&mut self, size: Vec2, device_pixel_ratio: f32) {
        self.display = size;
        self.dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
    }

    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }

    /// Copy the backing store into an egui image for texture upload.
    pub fn to_color_image(&self) -> Option<egui::ColorImage> {
        let pixmap = self.pixmap.as_ref()?;
        Some(egui::ColorImage::from_rgba_premultiplied(
            [pixmap.width() as usize, pixmap.height() as usize],
            pixmap.data(),
        ))
    }
}

impl Canvas2d for PixmapCanvas {
    fn display_size(&self) -> Vec2 {
        self.display
    }

    fn device_pixel_ratio(&self) -> f32 {
        self.dpr
    }

    fn backing_size(&self) -> Option<[u32; 2]> {
        self.pixmap.as_ref().map(|p| [p.width(), p.height()])
    }

    fn backing_scale(&self) -> f32 {
        self.scale
    }

    fn resize_backing(&mut self, width: u32, height: u32, scale: f32) -> bool {
        // Pixmap::new returns None for zero-sized surfaces.
        self.pixmap = Pixmap::new(width, height);
        self.scale = scale;
        self.transform = Transform::from_scale(scale, scale);
        self.pixmap.is_some()
    }

    fn clear(&mut self) {
        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.fill(tiny_skia::Color::TRANSPARENT);
        }
    }

    fn fill_path(&mut self, points: &[Pos2], color: Color32) {
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        if let Some(path) = build_path(points, true) {
            pixmap.fill_path(
                &path,
                &paint_for(color),
                FillRule::Winding,
                self.transform,
                None,
            );
        }
    }

    fn stroke_polyline(&mut self, points: &[Pos2], color: Color32, width: f32) {
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        if let Some(path) = build_path(points, false) {
            let stroke = Stroke {
                width,
                line_join: LineJoin::Round,
                ..Stroke::default()
            };
            pixmap.stroke_path(&path, &paint_for(color), &stroke, self.transform, None);
        }
    }
}
