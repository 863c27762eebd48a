use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::models::{Dataset, Season};
use crate::processors::{FilterCriteria, WorkingDayMode};

#[derive(Parser)]
#[command(name = "bikeshare-dashboard")]
#[command(about = "Explore the Washington D.C. hourly bike-rental dataset")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Input CSV file [default: settings `source`]")]
    pub input: Option<PathBuf>,

    #[arg(long, global = true, help = "Settings file [default: ./bikeshare.toml if present]")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Hide the loading spinner")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the years, seasons and weather codes available for filtering
    Options,

    /// Show headline numbers and grouped means for the filtered rows
    Summary {
        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long, help = "Print the report as JSON")]
        json: bool,
    },

    /// Draw a terminal chart of one grouped series
    Chart {
        #[arg(value_enum)]
        kind: ChartKind,

        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long, value_parser = clap::value_parser!(u32).range(32..=400))]
        width: Option<u32>,

        #[arg(long, value_parser = clap::value_parser!(u32).range(3..=200))]
        height: Option<u32>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartKind {
    Hourly,
    Monthly,
    WorkingDay,
    Weather,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum WorkingDayArg {
    #[default]
    All,
    Working,
    NonWorking,
}

impl From<WorkingDayArg> for WorkingDayMode {
    fn from(arg: WorkingDayArg) -> Self {
        match arg {
            WorkingDayArg::All => WorkingDayMode::All,
            WorkingDayArg::Working => WorkingDayMode::WorkingOnly,
            WorkingDayArg::NonWorking => WorkingDayMode::NonWorkingOnly,
        }
    }
}

/// Filter flags. An omitted list selects every observed value.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[arg(long = "year", value_name = "YEAR")]
    pub years: Vec<i32>,

    #[arg(long = "season", value_name = "SEASON")]
    pub seasons: Vec<Season>,

    #[arg(long = "weather", value_name = "CODE")]
    pub weather: Vec<i32>,

    #[arg(long, value_enum, default_value_t = WorkingDayArg::All)]
    pub working_day: WorkingDayArg,
}

impl FilterArgs {
    pub fn to_criteria(&self, dataset: &Dataset) -> FilterCriteria {
        let mut criteria =
            FilterCriteria::all(dataset).with_working_day(self.working_day.into());

        if !self.years.is_empty() {
            criteria = criteria.with_years(self.years.iter().copied());
        }
        if !self.seasons.is_empty() {
            criteria = criteria.with_seasons(self.seasons.iter().copied());
        }
        if !self.weather.is_empty() {
            criteria = criteria.with_weather(self.weather.iter().copied());
        }
        criteria
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_filters() {
        let cli = Cli::try_parse_from([
            "bikeshare-dashboard",
            "summary",
            "--year",
            "2012",
            "--season",
            "summer",
            "--season",
            "fall",
            "--working-day",
            "non-working",
        ])
        .unwrap();

        match cli.command {
            Commands::Summary { filters, json } => {
                assert!(!json);
                assert_eq!(filters.years, vec![2012]);
                assert_eq!(filters.seasons, vec![Season::Summer, Season::Fall]);
                assert!(filters.weather.is_empty());
                assert_eq!(filters.working_day, WorkingDayArg::NonWorking);
            }
            _ => panic!("expected summary command"),
        }
    }

    #[test]
    fn test_chart_width_bounds() {
        assert!(Cli::try_parse_from(["bikeshare-dashboard", "chart", "hourly", "--width", "10"]).is_err());
        assert!(Cli::try_parse_from(["bikeshare-dashboard", "chart", "working-day"]).is_ok());
    }

    #[test]
    fn test_rejects_unknown_season() {
        assert!(Cli::try_parse_from(["bikeshare-dashboard", "summary", "--season", "monsoon"]).is_err());
    }
}
