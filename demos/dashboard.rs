//! Example: the full streaming dashboard
//!
//! What it demonstrates
//! - A 10 000-sample initial history followed by a live producer thread.
//! - Drag to pan, mouse wheel to zoom around the cursor, rate slider.
//! - Optional config file (YAML or JSON) as the first argument.
//!
//! How to run
//! ```bash
//! cargo run --example dashboard
//! cargo run --example dashboard -- my_config.yaml
//! RUST_LOG=streamchart=debug cargo run --example dashboard
//! ```

use streamchart::{init_tracing, run_dashboard, StreamChartConfig};

fn main() -> streamchart::Result<()> {
    init_tracing();

    let cfg = match std::env::args().nth(1) {
        Some(path) => StreamChartConfig::from_path(path)?,
        None => StreamChartConfig::default(),
    };
    run_dashboard(cfg)
}
