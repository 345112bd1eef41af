mod analysis;
mod app;
mod color;
mod data;
mod report;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::Result;
use app::HrPandaApp;
use clap::Parser;
use eframe::egui;
use state::AppState;

/// Employee statistics and charts from an HR export.
#[derive(Debug, Parser)]
#[command(name = "hr-panda", version, about)]
struct Cli {
    /// HR data file (.csv or .parquet).
    #[arg(default_value = "HR Analytics.csv")]
    path: PathBuf,

    /// Print the report and exit without opening the chart window.
    #[arg(long)]
    no_charts: bool,

    /// Print the aggregates as JSON instead of tables.
    #[arg(long)]
    json: bool,

    /// Number of rows in the data preview.
    #[arg(long, default_value_t = 5)]
    head: usize,
}

fn main() {
    env_logger::init();
    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let dataset = data::loader::load_file(&cli.path)?;
    if dataset.is_empty() {
        log::warn!("{} contains no employee records", cli.path.display());
    }

    let mut state = AppState::default();
    state.set_dataset(dataset);

    if let (Some(ds), Some(summary)) = (&state.dataset, &state.summary) {
        let text = if cli.json {
            report::render_json(summary)?
        } else {
            report::render_text(&ds.records, cli.head, summary)?
        };
        println!("{text}");
    }

    if cli.no_charts {
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "HR Panda – HR Analytics",
        options,
        Box::new(|_cc| Ok(Box::new(HrPandaApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("chart window failed: {e}"))
}
