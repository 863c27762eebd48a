use anyhow::Context;
use tracing::info;

use crate::analyzers::RentalAnalyzer;
use crate::cli::args::{ChartKind, Cli, Commands};
use crate::cli::charts::ChartRenderer;
use crate::config::Settings;
use crate::models::Dataset;
use crate::processors::filter;
use crate::readers::DatasetCache;
use crate::utils::progress::ProgressReporter;

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let mut settings = Settings::load(cli.config.as_deref()).context("failed to load settings")?;
    if let Some(input) = cli.input {
        settings.source = input;
    }

    let cache = DatasetCache::new().with_change_detection(settings.change_detection);
    let dataset = load_with_progress(&cache, &settings, cli.quiet)?;
    let analyzer = RentalAnalyzer::new();

    match cli.command {
        Commands::Options => {
            let years: Vec<String> = dataset.distinct_years().iter().map(|y| y.to_string()).collect();
            let seasons: Vec<String> = dataset.distinct_seasons().iter().map(|s| s.to_string()).collect();
            let weather: Vec<String> = dataset.distinct_weather().iter().map(|w| w.to_string()).collect();

            println!("Years:   {}", years.join(", "));
            println!("Seasons: {}", seasons.join(", "));
            println!("Weather: {}", weather.join(", "));
        }

        Commands::Summary { filters, json } => {
            let criteria = filters.to_criteria(&dataset);
            let view = filter(&dataset, &criteria);
            info!("{} of {} rows match the filters", view.len(), dataset.len());

            let report = analyzer.report(&view);
            if json {
                println!("{}", report.to_json()?);
            } else {
                println!("{}", report.detailed_summary());
            }
        }

        Commands::Chart {
            kind,
            filters,
            width,
            height,
        } => {
            let criteria = filters.to_criteria(&dataset);
            let view = filter(&dataset, &criteria);
            let renderer = ChartRenderer::new(
                width.unwrap_or(settings.chart_width),
                height.unwrap_or(settings.chart_height),
            );

            let chart = match kind {
                ChartKind::Hourly => renderer.hourly(&analyzer.mean_by_hour(&view)),
                ChartKind::Monthly => renderer.monthly(&analyzer.mean_by_year_month(&view)),
                ChartKind::WorkingDay => renderer.working_day(&analyzer.mean_by_working_day(&view)),
                ChartKind::Weather => renderer.weather(&analyzer.weather_effect(&view)),
            };
            println!("{}", analyzer.summarize(&view).summary());
            println!("\n{}", chart);
        }
    }

    Ok(())
}

fn load_with_progress(
    cache: &DatasetCache,
    settings: &Settings,
    quiet: bool,
) -> anyhow::Result<Dataset> {
    let progress = ProgressReporter::new_spinner("Loading rental data...", quiet);

    match cache.get_or_load(&settings.source) {
        Ok(dataset) => {
            progress.finish_with_message(&format!("Loaded {} rows", dataset.len()));
            Ok(dataset)
        }
        Err(e) => {
            progress.abandon();
            Err(e).with_context(|| format!("failed to load {}", settings.source.display()))
        }
    }
}
