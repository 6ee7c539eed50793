mod app;
mod color;
mod config;
mod data;
mod export;
mod geo;
mod state;
mod ui;

use anyhow::Context;
use app::TradeDashboardApp;
use clap::Parser;
use config::Args;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let params = args.pipeline_params();

    if let Some(out) = &args.export {
        let table = data::loader::load_file(&args.data)?;
        let derived = data::pipeline::run(&table, &params, None)
            .context("computing dashboard views")?;
        return export::export_to_path(out, &params, &derived);
    }

    let mut state = AppState::new(params);
    if args.data.exists() {
        state.open(&args.data);
    } else {
        log::info!("{} not found, waiting for a file to be opened", args.data.display());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Imports & Exports Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(TradeDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard: {e}"))
}
