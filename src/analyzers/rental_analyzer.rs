use crate::analyzers::report::DashboardReport;
use crate::models::{DayPeriod, RentalRecord, View};
use crate::utils::stats::{ci95_half_width, sample_std, standard_error, Accumulator};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Headline numbers for a view. `None` means "no data".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub row_count: usize,
    pub mean_rentals: Option<f64>,
    pub total_rentals: u64,
    pub registered_share: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMean<K> {
    pub key: K,
    pub mean: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyMean {
    pub year: i32,
    pub month: u32,
    pub mean: f64,
    pub count: usize,
}

/// Mean rentals for one weather code with a 95% band.
///
/// `std` and `sem` are `None` when undefined (a single observation); `ci` is
/// then zero, so the band is always safe to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherEffect {
    pub weather_code: i32,
    pub mean: f64,
    pub n: usize,
    pub std: Option<f64>,
    pub sem: Option<f64>,
    pub ci: f64,
}

pub struct RentalAnalyzer;

impl RentalAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn summarize(&self, view: &View) -> Summary {
        let mut rentals = Accumulator::default();
        let mut registered: u64 = 0;

        for record in view.iter() {
            rentals.push(record.rental_count);
            registered += u64::from(record.registered_count);
        }

        let registered_share = if rentals.sum == 0 {
            None
        } else {
            Some(100.0 * registered as f64 / rentals.sum as f64)
        };

        Summary {
            row_count: view.len(),
            mean_rentals: rentals.mean(),
            total_rentals: rentals.sum,
            registered_share,
        }
    }

    pub fn mean_by_hour(&self, view: &View) -> Vec<GroupMean<u32>> {
        grouped_mean(view, |r| r.hour_of_day)
    }

    /// Non-working days first, then working days.
    pub fn mean_by_working_day(&self, view: &View) -> Vec<GroupMean<bool>> {
        grouped_mean(view, |r| r.is_working_day)
    }

    pub fn mean_by_day_period(&self, view: &View) -> Vec<GroupMean<DayPeriod>> {
        grouped_mean(view, |r| r.day_period)
    }

    /// Keyed by Monday-based day index.
    pub fn mean_by_weekday(&self, view: &View) -> Vec<GroupMean<u32>> {
        grouped_mean(view, |r| r.day_of_week)
    }

    /// Years in the order they first appear in the view, months ascending.
    pub fn mean_by_year_month(&self, view: &View) -> Vec<MonthlyMean> {
        let mut year_order: Vec<i32> = Vec::new();
        let mut by_year: HashMap<i32, BTreeMap<u32, Accumulator>> = HashMap::new();

        for record in view.iter() {
            let months = by_year.entry(record.year).or_insert_with(|| {
                year_order.push(record.year);
                BTreeMap::new()
            });
            months.entry(record.month).or_default().push(record.rental_count);
        }

        let mut result = Vec::new();
        for year in year_order {
            let Some(months) = by_year.remove(&year) else {
                continue;
            };
            for (month, acc) in months {
                if let Some(mean) = acc.mean() {
                    result.push(MonthlyMean {
                        year,
                        month,
                        mean,
                        count: acc.count,
                    });
                }
            }
        }
        result
    }

    /// Per weather code, ascending.
    pub fn weather_effect(&self, view: &View) -> Vec<WeatherEffect> {
        let mut groups: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
        for record in view.iter() {
            groups
                .entry(record.weather_code)
                .or_default()
                .push(f64::from(record.rental_count));
        }

        groups
            .into_iter()
            .map(|(weather_code, counts)| {
                let n = counts.len();
                let mean = counts.iter().sum::<f64>() / n as f64;
                let std = sample_std(&counts);
                let sem = standard_error(std, n);

                WeatherEffect {
                    weather_code,
                    mean,
                    n,
                    std,
                    sem,
                    ci: ci95_half_width(sem),
                }
            })
            .collect()
    }

    pub fn report(&self, view: &View) -> DashboardReport {
        DashboardReport {
            summary: self.summarize(view),
            hourly: self.mean_by_hour(view),
            monthly: self.mean_by_year_month(view),
            working_day: self.mean_by_working_day(view),
            day_period: self.mean_by_day_period(view),
            weekday: self.mean_by_weekday(view),
            weather: self.weather_effect(view),
        }
    }
}

impl Default for RentalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn grouped_mean<K: Ord>(
    view: &View,
    key: impl Fn(&RentalRecord) -> K,
) -> Vec<GroupMean<K>> {
    let mut groups: BTreeMap<K, Accumulator> = BTreeMap::new();
    for record in view.iter() {
        groups.entry(key(record)).or_default().push(record.rental_count);
    }

    groups
        .into_iter()
        .filter_map(|(key, acc)| {
            acc.mean().map(|mean| GroupMean {
                key,
                mean,
                count: acc.count,
            })
        })
        .collect()
}
