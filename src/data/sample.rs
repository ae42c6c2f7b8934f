//! The sample type carried through the whole pipeline.

use serde::{Deserialize, Serialize};

/// A single point of the stream: wall-clock time in milliseconds and a value.
///
/// Samples are immutable once stored in a [`SampleBuffer`](super::buffer::SampleBuffer).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub value: f64,
    /// Producer-assigned sequence number, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
}

impl Sample {
    pub fn new(timestamp: i64, value: f64) -> Self {
        Self {
            timestamp,
            value,
            id: None,
        }
    }

    pub fn with_id(timestamp: i64, value: f64, id: u64) -> Self {
        Self {
            timestamp,
            value,
            id: Some(id),
        }
    }

    /// Timestamp as `f64`, the unit the viewport works in.
    #[inline]
    pub fn t(&self) -> f64 {
        self.timestamp as f64
    }
}
