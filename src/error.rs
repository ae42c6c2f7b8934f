//! Error types for the streaming chart.
//!
//! The gesture, reduction and render core is infallible by construction;
//! only the outer surfaces (config loading, producer thread, native window)
//! report errors through [`StreamChartError`].

use std::path::PathBuf;

use thiserror::Error;

/// Result type for streamchart operations.
pub type Result<T> = std::result::Result<T, StreamChartError>;

/// Errors that can occur while configuring or running the chart.
#[derive(Error, Debug)]
pub enum StreamChartError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for [`StreamChartConfig`](crate::StreamChartConfig).
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The configuration file is not valid JSON for [`StreamChartConfig`](crate::StreamChartConfig).
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The producer thread could not be spawned.
    #[error("failed to spawn producer thread: {0}")]
    ProducerSpawn(#[source] std::io::Error),

    /// The producer thread has exited and no longer accepts commands.
    #[error("producer thread is no longer running")]
    ProducerDisconnected,

    /// The native window failed to start or crashed.
    #[error("UI error: {0}")]
    Ui(#[from] eframe::Error),
}
