//! eframe shell around the chart pipeline.
//!
//! | Sub-module        | Responsibility |
//! | ----------------- | -------------- |
//! | [`dashboard_app`] | Per-frame ingestion and panel layout ([`DashboardApp`]) |
//! | [`run`]           | [`run_dashboard()`] entry point, tracing setup, icon loading |

mod dashboard_app;
mod run;

pub use dashboard_app::DashboardApp;
pub use run::{init_tracing, run_dashboard};
