//! streamchart crate root: re-exports and module wiring.
//!
//! A live time-series chart over a continuously growing sample stream, built
//! on egui/eframe:
//! - `data`: samples, the rolling buffer, the viewport state machine and the
//!   min/max bucket reducer
//! - `canvas` / `renderer`: DPR-aware raster surface and the per-frame renderer
//! - `sink`: background producer thread and the channels feeding the UI
//! - `panels`: chart, table and FPS widgets
//! - `app`: the standalone dashboard window
//! - `config`: serde-loadable configuration

pub mod app;
pub mod canvas;
pub mod config;
pub mod data;
pub mod error;
pub mod panels;
pub mod renderer;
pub mod sink;

// Public re-exports for a compact external API
pub use app::{init_tracing, run_dashboard, DashboardApp};
pub use canvas::{Canvas2d, PixmapCanvas};
pub use config::StreamChartConfig;
pub use data::buckets::{reduce, target_bucket_count, view_window, Bucket, ViewWindow};
pub use data::buffer::{DataBounds, SampleBuffer, DEFAULT_CAPACITY};
pub use data::sample::Sample;
pub use data::viewport::{GestureState, Viewport, ViewportController, MAX_ZOOM, MIN_ZOOM};
pub use error::{Result, StreamChartError};
pub use renderer::{ChartStyle, FrameGeometry, FrameOutcome, FrameRenderer};
pub use sink::{
    generate_initial_dataset, ProducerCommand, ProducerEvent, SampleGenerator,
    SineNoiseGenerator, StreamLink, CHUNK_QUEUE_DEPTH, MIN_RATE,
};
