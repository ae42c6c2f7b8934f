//! Example: plugging a custom producer into the dashboard
//!
//! What it demonstrates
//! - Implementing `SampleGenerator` for your own signal (a sawtooth with a step).
//! - Building a `DashboardApp` around an existing buffer and `StreamLink`.
//! - Embedding the app in your own `eframe::run_native` call.
//!
//! How to run
//! ```bash
//! cargo run --example sawtooth
//! ```

use std::time::Duration;

use eframe::egui;
use streamchart::{
    init_tracing, DashboardApp, Sample, SampleBuffer, SampleGenerator, StreamChartConfig,
    StreamLink,
};

/// 0..100 ramp every 500 samples, with a +20 step every 2000 samples.
struct Sawtooth {
    next_id: u64,
    last_ts: Option<i64>,
}

impl SampleGenerator for Sawtooth {
    fn next_chunk(&mut self, chunk_size: usize, now_ms: i64) -> Vec<Sample> {
        let start = self.last_ts.map_or(now_ms, |last| now_ms.max(last + 1));
        let chunk: Vec<Sample> = (0..chunk_size)
            .map(|i| {
                let id = self.next_id + i as u64;
                let ramp = (id % 500) as f64 / 5.0;
                let step = if (id / 2000) % 2 == 1 { 20.0 } else { 0.0 };
                Sample::with_id(start + i as i64, ramp + step, id)
            })
            .collect();
        self.next_id += chunk_size as u64;
        self.last_ts = chunk.last().map(|s| s.timestamp);
        chunk
    }
}

fn main() -> streamchart::Result<()> {
    init_tracing();

    let cfg = StreamChartConfig {
        title: "Sawtooth".to_string(),
        capacity: 5_000,
        rate_ms: 50,
        chunk_size: 25,
        show_table: false,
        ..StreamChartConfig::default()
    };

    let link = StreamLink::spawn(Sawtooth {
        next_id: 0,
        last_ts: None,
    })?;
    link.start(Duration::from_millis(cfg.rate_ms), cfg.chunk_size)?;
    let app = DashboardApp::with_link(cfg.clone(), SampleBuffer::new(cfg.capacity), link);

    eframe::run_native(
        &cfg.title,
        eframe::NativeOptions::default(),
        Box::new(|cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )?;
    Ok(())
}
