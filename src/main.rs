mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::Path;

use anyhow::Context;
use app::DashboardApp;
use data::loader::DatasetCache;
use eframe::egui;
use state::AppState;

/// Dataset read at startup, relative to the working directory.
const DATA_PATH: &str = "startup_data.csv";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // The dashboard has nothing to show without data: fail before opening
    // a window.
    let mut cache = DatasetCache::new();
    let path = Path::new(DATA_PATH);
    let table = cache
        .get_or_load(path)
        .with_context(|| format!("cannot start without the startup dataset ({DATA_PATH})"))
        .inspect_err(|e| log::error!("{e:#}"))?;

    let state = AppState::new(cache, path.to_path_buf(), table);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(app::TITLE)
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        app::TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard window: {e}"))
}
