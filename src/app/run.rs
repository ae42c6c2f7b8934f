//! Top-level entry point for running the dashboard as a native window.

use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::config::StreamChartConfig;
use crate::error::Result;

use super::dashboard_app::DashboardApp;

/// Install a `tracing` subscriber reading `RUST_LOG` (default `streamchart=info`).
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("streamchart=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Launch the dashboard in a native window.
///
/// Builds the initial dataset, starts the producer and blocks until the
/// window is closed. The producer thread is stopped when the app is dropped.
pub fn run_dashboard(cfg: StreamChartConfig) -> Result<()> {
    cfg.validate()?;
    let app = DashboardApp::new(cfg.clone())?;

    let mut viewport = egui::ViewportBuilder::default()
        .with_title(cfg.title.clone())
        .with_inner_size(egui::vec2(cfg.window_size[0], cfg.window_size[1]));
    if let Some(icon) = load_app_icon_svg() {
        viewport = viewport.with_icon(icon);
    }
    let opts = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &cfg.title,
        opts,
        Box::new(|cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )?;
    Ok(())
}

/// Render the crate's `icon.svg` into an [`egui::IconData`].
///
/// Returns `None` if the file does not exist or cannot be parsed/rendered.
fn load_app_icon_svg() -> Option<egui::IconData> {
    let svg_path = concat!(env!("CARGO_MANIFEST_DIR"), "/icon.svg");
    let data = std::fs::read(svg_path).ok()?;

    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_data(&data, &opt).ok()?;
    let size = tree.size().to_int_size();
    if size.width() == 0 || size.height() == 0 {
        return None;
    }
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
    Some(egui::IconData {
        rgba: pixmap.take(),
        width: size.width(),
        height: size.height(),
    })
}
