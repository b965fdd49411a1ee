use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;

use salary_insights::app::SalaryInsightsApp;
use salary_insights::cli::Args;
use salary_insights::config::DashboardConfig;
use salary_insights::data::loader::load_csv;
use salary_insights::state::AppState;
use salary_insights::summary::{DashboardSummary, SummaryOptions};

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut config = DashboardConfig::load_or_default(args.config.as_deref())?;
    args.apply(&mut config);

    if args.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    // A missing or malformed input file ends the session here.
    let dataset = load_csv(&config.data_path)
        .with_context(|| format!("Failed to load {}", config.data_path.display()))?;

    if args.summary {
        let selection = args.selection(&dataset);
        let summary = DashboardSummary::compute(&dataset, &selection, &SummaryOptions::from(&config))?;
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let mut state = AppState::new(&config);
    state.set_dataset(dataset, Some(config.data_path.clone()));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Salary Insights Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(SalaryInsightsApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard window failed: {e}"))
}
