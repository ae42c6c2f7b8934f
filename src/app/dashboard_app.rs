//! Standalone dashboard: chart, toolbar, performance readout and sample table.
//!
//! [`DashboardApp`] implements [`eframe::App`]. Each frame it drains the
//! producer link into the rolling buffer, re-clamps the viewport if data
//! arrived, then draws every panel from the same buffer.

use std::time::Duration;

use eframe::egui;
use egui_phosphor::regular::{ARROWS_COUNTER_CLOCKWISE, PAUSE, PLAY};

use crate::config::StreamChartConfig;
use crate::data::buffer::SampleBuffer;
use crate::error::Result;
use crate::panels::{ChartPanel, PerformancePanel, TablePanel};
use crate::sink::{generate_initial_dataset, now_millis, SineNoiseGenerator, StreamLink};

pub struct DashboardApp {
    /// Rolling window shared (read-only) by the chart and the table.
    pub buffer: SampleBuffer,
    link: StreamLink,
    chart: ChartPanel,
    table: TablePanel,
    performance: PerformancePanel,
    cfg: StreamChartConfig,
    rate_ms: u64,
    streaming: bool,
}

impl DashboardApp {
    /// Build the initial dataset, spawn the producer and start streaming.
    pub fn new(cfg: StreamChartConfig) -> Result<Self> {
        let mut generator = SineNoiseGenerator::new();
        let initial = generate_initial_dataset(
            cfg.initial_samples,
            cfg.initial_step_ms,
            now_millis(),
            &mut generator,
        );
        let buffer = SampleBuffer::with_initial(cfg.capacity, initial);

        let link = StreamLink::spawn(generator)?;
        link.start(Duration::from_millis(cfg.rate_ms), cfg.chunk_size)?;
        tracing::info!(
            capacity = cfg.capacity,
            initial = buffer.len(),
            rate_ms = cfg.rate_ms,
            chunk_size = cfg.chunk_size,
            "stream started"
        );

        Ok(Self::with_link(cfg, buffer, link))
    }

    /// Assemble the app around an existing buffer and producer link.
    pub fn with_link(cfg: StreamChartConfig, buffer: SampleBuffer, link: StreamLink) -> Self {
        let mut chart = ChartPanel::new(cfg.style, cfg.chart_height);
        chart.on_data_changed(&buffer);
        Self {
            buffer,
            link,
            chart,
            table: TablePanel::new(),
            performance: PerformancePanel::new(),
            rate_ms: cfg.rate_ms,
            streaming: true,
            cfg,
        }
    }

    /// Merge pending chunks; returns the number of merged samples.
    pub fn ingest(&mut self) -> usize {
        let merged = self.link.drain_into(&mut self.buffer);
        if merged > 0 {
            self.chart.on_data_changed(&self.buffer);
        }
        merged
    }

    fn toggle_streaming(&mut self) {
        let res = if self.streaming {
            self.link.stop()
        } else {
            self.link
                .start(Duration::from_millis(self.rate_ms), self.cfg.chunk_size)
        };
        match res {
            Ok(()) => self.streaming = !self.streaming,
            Err(e) => tracing::warn!("failed to toggle stream: {e}"),
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let label = if self.streaming {
                format!("{PAUSE} Pause")
            } else {
                format!("{PLAY} Resume")
            };
            if ui.button(label).clicked() {
                self.toggle_streaming();
            }
            if ui
                .button(format!("{ARROWS_COUNTER_CLOCKWISE} Reset view"))
                .on_hover_text("Zoom 1x, centered on the latest sample")
                .clicked()
            {
                self.chart.reset_view(&self.buffer);
            }

            ui.separator();
            ui.label("Stream rate (ms):");
            let slider = egui::Slider::new(
                &mut self.rate_ms,
                self.cfg.min_rate_ms..=self.cfg.max_rate_ms,
            );
            if ui.add(slider).changed() {
                if let Err(e) = self.link.set_rate(Duration::from_millis(self.rate_ms)) {
                    tracing::warn!("failed to change stream rate: {e}");
                }
            }
        });
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ingest();

        if self.cfg.show_table {
            egui::SidePanel::right("sample_table_panel")
                .default_width(self.cfg.table_width)
                .show(ctx, |ui| {
                    ui.strong("Data Table (virtualized)");
                    ui.add_space(4.0);
                    self.table.ui(ui, &self.buffer);
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart.ui(ui, &self.buffer);
            ui.add_space(8.0);
            if self.cfg.show_performance {
                self.performance.ui(ui);
            }
            self.toolbar(ui);
        });
    }
}
