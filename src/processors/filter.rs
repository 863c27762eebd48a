use crate::models::{Dataset, RentalRecord, Season, View};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WorkingDayMode {
    #[default]
    All,
    WorkingOnly,
    NonWorkingOnly,
}

impl WorkingDayMode {
    pub fn admits(&self, is_working_day: bool) -> bool {
        match self {
            WorkingDayMode::All => true,
            WorkingDayMode::WorkingOnly => is_working_day,
            WorkingDayMode::NonWorkingOnly => !is_working_day,
        }
    }
}

/// Selected values per filterable column. A row must match every set.
///
/// An empty set admits nothing; use [`FilterCriteria::all`] to start from
/// "everything selected".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub years: BTreeSet<i32>,
    pub seasons: BTreeSet<Season>,
    pub weather: BTreeSet<i32>,
    pub working_day: WorkingDayMode,
}

impl FilterCriteria {
    /// Every observed year, season and weather code; working-day mode `All`.
    pub fn all(dataset: &Dataset) -> Self {
        Self {
            years: dataset.distinct_years().into_iter().collect(),
            seasons: dataset.distinct_seasons().into_iter().collect(),
            weather: dataset.distinct_weather().into_iter().collect(),
            working_day: WorkingDayMode::All,
        }
    }

    pub fn with_years(mut self, years: impl IntoIterator<Item = i32>) -> Self {
        self.years = years.into_iter().collect();
        self
    }

    pub fn with_seasons(mut self, seasons: impl IntoIterator<Item = Season>) -> Self {
        self.seasons = seasons.into_iter().collect();
        self
    }

    pub fn with_weather(mut self, weather: impl IntoIterator<Item = i32>) -> Self {
        self.weather = weather.into_iter().collect();
        self
    }

    pub fn with_working_day(mut self, mode: WorkingDayMode) -> Self {
        self.working_day = mode;
        self
    }

    pub fn matches(&self, record: &RentalRecord) -> bool {
        self.years.contains(&record.year)
            && self.seasons.contains(&record.season)
            && self.weather.contains(&record.weather_code)
            && self.working_day.admits(record.is_working_day)
    }
}

/// Rows of `dataset` that satisfy `criteria`, in source order.
pub fn filter(dataset: &Dataset, criteria: &FilterCriteria) -> View {
    dataset.view_all().filter(criteria)
}

impl View {
    /// Narrow this view further. Filtering a view by the criteria that
    /// produced it returns an equal view.
    pub fn filter(&self, criteria: &FilterCriteria) -> View {
        let records = self.dataset().records();
        let indices: Vec<usize> = self
            .indices()
            .iter()
            .copied()
            .filter(|&i| criteria.matches(&records[i]))
            .collect();

        debug!(
            "Filter kept {} of {} rows ({:?})",
            indices.len(),
            self.len(),
            criteria
        );

        View::from_indices(self.dataset().clone(), indices)
    }
}
