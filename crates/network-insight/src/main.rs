mod bootstrap;
mod render;

use anyhow::Result;
use network_core::settings::Settings;
use network_data::analysis::{analyze_file, summarize, AnalysisOptions};
use network_data::loader::load_connections;

fn main() -> Result<()> {
    let settings = Settings::load()?;

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("network-insight v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::debug!(
        "Input: {}, View: {}, Format: {}",
        settings.csv.display(),
        settings.view,
        settings.format
    );

    if settings.is_full_view() {
        let options = AnalysisOptions {
            today: settings.reference_date(),
            pivot_companies: settings.pivot_companies,
            latest: settings.latest,
        };
        let report = analyze_file(&settings.csv, settings.skip_rows, &options)?;

        if settings.is_json() {
            println!("{}", report.to_json_pretty()?);
        } else {
            print!("{}", render::render_full(&report, settings.top));
        }
    } else {
        let table = load_connections(&settings.csv, settings.skip_rows)?;
        let summary = summarize(&table, settings.top);

        if settings.is_json() {
            println!("{}", summary.to_json_pretty()?);
        } else {
            print!("{}", render::render_summary(&summary));
        }
    }

    Ok(())
}
