pub mod chart_ui;
pub mod perf_ui;
pub mod table_ui;

pub use chart_ui::ChartPanel;
pub use perf_ui::{FpsCounter, PerformancePanel};
pub use table_ui::TablePanel;
