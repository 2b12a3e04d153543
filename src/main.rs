mod analytics;
mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::PainelVendasApp;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::from_args(std::env::args());
    let title = config.title.clone();
    let data_path = config.data_path.clone();

    let mut state = AppState::new(config);
    state.load_path(&data_path);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&title)
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(PainelVendasApp::new(state)))),
    )
}
