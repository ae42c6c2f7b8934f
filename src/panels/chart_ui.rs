//! Interactive chart widget: gesture routing, per-frame render, texture upload.

use chrono::TimeZone;
use eframe::egui;
use egui::{pos2, Color32, Rect, TextureHandle, TextureOptions, Ui};

use crate::canvas::PixmapCanvas;
use crate::data::buckets::view_window;
use crate::data::buffer::SampleBuffer;
use crate::data::viewport::ViewportController;
use crate::renderer::{ChartStyle, FrameOutcome, FrameRenderer};

/// The chart panel owns the viewport state, the renderer and its canvas.
///
/// Pointer drags pan, the wheel zooms around the cursor. Gestures only touch
/// the [`ViewportController`]; the buffer is read-only here.
pub struct ChartPanel {
    controller: ViewportController,
    renderer: FrameRenderer,
    canvas: PixmapCanvas,
    texture: Option<TextureHandle>,
    height: f32,
}

impl ChartPanel {
    pub fn new(style: ChartStyle, height: f32) -> Self {
        Self {
            controller: ViewportController::new(),
            renderer: FrameRenderer::new(style),
            canvas: PixmapCanvas::new(),
            texture: None,
            height,
        }
    }

    pub fn controller(&self) -> &ViewportController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ViewportController {
        &mut self.controller
    }

    pub fn renderer(&self) -> &FrameRenderer {
        &self.renderer
    }

    /// Re-clamp the viewport after the buffer changed.
    pub fn on_data_changed(&mut self, buffer: &SampleBuffer) {
        self.controller.sync_to_data(buffer.bounds());
    }

    pub fn reset_view(&mut self, buffer: &SampleBuffer) {
        self.controller.reset(buffer.bounds());
    }

    /// Draw the chart and process this frame's gestures.
    pub fn ui(&mut self, ui: &mut Ui, buffer: &SampleBuffer) {
        let width = ui.available_width().max(1.0);
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(width, self.height), egui::Sense::drag());

        self.handle_pointer(ui, &response, rect, buffer);
        self.paint(ui, rect, buffer);
        self.status_line(ui, buffer);

        // Keep the redraw loop alive even while no data is drawn.
        ui.ctx().request_repaint();
    }

    fn handle_pointer(
        &mut self,
        ui: &Ui,
        response: &egui::Response,
        rect: Rect,
        buffer: &SampleBuffer,
    ) {
        let bounds = buffer.interaction_bounds();
        let local_x = |p: egui::Pos2| p.x - rect.left();

        if response.drag_started() {
            if let Some(p) = response.interact_pointer_pos() {
                self.controller.pointer_down(local_x(p));
            }
        }
        if response.dragged() && self.controller.is_panning() {
            if let Some(p) = ui.input(|i| i.pointer.latest_pos()) {
                self.controller.pointer_move(local_x(p), rect.width(), bounds);
            }
        }
        // Drag ended, or the drag was taken away from us (capture lost).
        if response.drag_stopped() || (self.controller.is_panning() && !response.dragged()) {
            self.controller.pointer_up();
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta);
            if scroll.y != 0.0 {
                if let Some(p) = response.hover_pos() {
                    // egui reports scroll-up as positive, wheel deltaY is the opposite.
                    self.controller
                        .wheel(local_x(p), rect.width(), -(scroll.y as f64), bounds);
                }
            }
        }

        if self.controller.is_panning() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
        } else if response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
        }
    }

    fn paint(&mut self, ui: &Ui, rect: Rect, buffer: &SampleBuffer) {
        ui.painter()
            .rect_filled(rect, 4.0, ui.visuals().extreme_bg_color);

        self.canvas
            .set_display(rect.size(), ui.ctx().pixels_per_point());
        let outcome = self
            .renderer
            .render_frame(&mut self.canvas, buffer, self.controller.viewport());
        if outcome == FrameOutcome::NoSurface {
            return;
        }

        if let Some(image) = self.canvas.to_color_image() {
            match self.texture.as_mut() {
                Some(tex) => tex.set(image, TextureOptions::LINEAR),
                None => {
                    self.texture = Some(ui.ctx().load_texture(
                        "stream_chart_canvas",
                        image,
                        TextureOptions::LINEAR,
                    ));
                }
            }
        }
        if let Some(tex) = &self.texture {
            ui.painter().image(
                tex.id(),
                rect,
                Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }
    }

    fn status_line(&self, ui: &mut Ui, buffer: &SampleBuffer) {
        let Some(bounds) = buffer.bounds() else {
            ui.weak("Waiting for data…");
            return;
        };
        let viewport = self.controller.viewport();
        let window = view_window(viewport, &bounds);
        ui.horizontal(|ui| {
            ui.weak(format!("zoom ×{:.2}", viewport.clamped_zoom()));
            ui.separator();
            ui.weak(format!(
                "{} – {}",
                format_clock(window.min),
                format_clock(window.max)
            ));
            ui.separator();
            ui.weak(format!("{} samples", buffer.len()));
        });
    }
}

/// Local wall-clock time for a millisecond timestamp, `HH:MM:SS.mmm`.
pub fn format_clock(timestamp_ms: f64) -> String {
    chrono::Local
        .timestamp_millis_opt(timestamp_ms.round() as i64)
        .single()
        .map(|dt| dt.format("%H:%M:%S%.3f").to_string())
        .unwrap_or_else(|| "--:--:--".to_string())
}
