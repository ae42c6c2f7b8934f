use std::time::{Duration, Instant};

use eframe::egui;

/// Counts frames and publishes the count once per elapsed second.
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    frames: u32,
    window_start: Option<Instant>,
    fps: u32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame at `now`. Returns the new reading when a second has elapsed.
    pub fn tick(&mut self, now: Instant) -> Option<u32> {
        let start = *self.window_start.get_or_insert(now);
        self.frames += 1;
        if now.duration_since(start) >= Duration::from_secs(1) {
            self.fps = self.frames;
            self.frames = 0;
            self.window_start = Some(now);
            return Some(self.fps);
        }
        None
    }

    /// Last published reading.
    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// FPS readout. Heap usage is not observable from safe Rust, so memory is shown as n/a.
#[derive(Default)]
pub struct PerformancePanel {
    counter: FpsCounter,
}

impl PerformancePanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) {
        self.counter.tick(Instant::now());
        ui.horizontal(|ui| {
            ui.strong(format!("FPS: {}", self.counter.fps()));
            ui.label("Memory: n/a");
        });
    }
}
