mod bootstrap;

use anyhow::{Context, Result};
use sales_core::settings::Settings;
use sales_data::analysis::{run_analysis, AnalysisOptions};
use sales_data::report::build_report;
use sales_ui::app::App;
use sales_ui::chart::LineChart;
use sales_ui::svg::save_svg;
use sales_ui::table_view::breakdowns;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Sales Analytics v{} starting", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&settings) {
        tracing::error!("{:#}", e);
        return Err(e);
    }
    Ok(())
}

fn run(settings: &Settings) -> Result<()> {
    let options = AnalysisOptions::from_settings(settings)?;
    let chart_kind = settings.chart_kind()?;
    tracing::info!(
        "Input: {}, Chart: {}, Missing values: {}",
        options.input.display(),
        chart_kind.as_str(),
        options.missing_values.as_str()
    );

    let result = run_analysis(&options)
        .with_context(|| format!("analysis of {} failed", options.input.display()))?;

    print!("{}", build_report(&result));

    let chart = LineChart::for_trend(chart_kind, &result.trends);

    match &settings.output {
        Some(path) => {
            save_svg(&chart, path)
                .with_context(|| format!("could not write chart to {}", path.display()))?;
        }
        None => {
            let app = App::new(&settings.theme, chart, breakdowns(&result.metrics));
            app.run()?;
        }
    }

    Ok(())
}
