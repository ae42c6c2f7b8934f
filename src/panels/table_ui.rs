//! Virtualized sample table showing the same rolling window as the chart.

use chrono::TimeZone;
use eframe::egui;
use egui_table::{Column, HeaderRow, Table, TableDelegate};

use crate::data::buffer::SampleBuffer;

/// Fixed row height in logical pixels.
pub const ROW_HEIGHT: f32 = 28.0;

/// Local time of day for a millisecond timestamp.
pub fn format_time_of_day(timestamp_ms: i64) -> String {
    chrono::Local
        .timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_default()
}

pub fn format_value(value: f64) -> String {
    format!("{value:.3}")
}

struct SampleRows<'a> {
    buffer: &'a SampleBuffer,
}

impl TableDelegate for SampleRows<'_> {
    fn header_cell_ui(&mut self, ui: &mut egui::Ui, cell: &egui_table::HeaderCellInfo) {
        let text = match cell.col_range.start {
            0 => "ID",
            1 => "Timestamp",
            2 => "Value",
            _ => "",
        };
        ui.add_space(4.0);
        ui.strong(text);
    }

    fn cell_ui(&mut self, ui: &mut egui::Ui, cell: &egui_table::CellInfo) {
        let Some(s) = self.buffer.get(cell.row_nr as usize) else {
            return;
        };
        ui.add_space(4.0);
        match cell.col_nr {
            0 => {
                ui.label(s.id.map(|id| id.to_string()).unwrap_or_default());
            }
            1 => {
                ui.label(format_time_of_day(s.timestamp));
            }
            2 => {
                ui.monospace(format_value(s.value));
            }
            _ => {}
        }
    }

    fn default_row_height(&self) -> f32 {
        ROW_HEIGHT
    }
}

/// Table panel. Only the rows inside the scrolled viewport are laid out.
///
/// Nothing is formatted on the very first frame: a placeholder is drawn
/// until the panel has been shown once, so local-time formatting never runs
/// before the window is up.
#[derive(Default)]
pub struct TablePanel {
    mounted: bool,
}

impl TablePanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, buffer: &SampleBuffer) {
        if !self.mounted {
            let size = ui.available_size();
            let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
            ui.painter()
                .rect_filled(rect, 6.0, ui.visuals().extreme_bg_color);
            self.mounted = true;
            ui.ctx().request_repaint();
            return;
        }

        let mut delegate = SampleRows { buffer };
        // Fill the rest of the panel so the scroll area reaches the bottom.
        let (rect, _) = ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());
        let mut table_ui = ui.new_child(
            egui::UiBuilder::new()
                .max_rect(rect)
                .layout(egui::Layout::left_to_right(egui::Align::Min)),
        );
        Table::new()
            .id_salt("sample_table")
            .num_rows(buffer.len() as u64)
            .columns(vec![
                Column::new(90.0),
                Column::new(130.0),
                Column::new(120.0),
            ])
            .headers(vec![HeaderRow::new(24.0)])
            .show(&mut table_ui, &mut delegate);
    }
}
