mod app;
mod data;
mod measure;
mod processing;
mod state;
mod ui;

use app::FastRoiApp;
use eframe::egui;

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("FastROI")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([800.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        "FastROI",
        options,
        Box::new(|cc| Ok(Box::new(FastRoiApp::new(cc)))),
    )
}
