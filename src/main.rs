use std::path::Path;

use eframe::egui;
use movement_lab::app::MovementLabApp;
use movement_lab::config::{DashboardConfig, CONFIG_FILE};
use movement_lab::state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE));
    let state = AppState::new(config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Movement Lab – Student Fitness Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(MovementLabApp::new(state)))),
    )
}
