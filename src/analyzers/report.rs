use crate::analyzers::rental_analyzer::{GroupMean, MonthlyMean, Summary, WeatherEffect};
use crate::error::Result;
use crate::models::{weekday_name, DayPeriod};
use serde::Serialize;

const NO_DATA: &str = "no data";

/// Everything the dashboard shows for one filtered view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub summary: Summary,
    pub hourly: Vec<GroupMean<u32>>,
    pub monthly: Vec<MonthlyMean>,
    pub working_day: Vec<GroupMean<bool>>,
    pub day_period: Vec<GroupMean<DayPeriod>>,
    pub weekday: Vec<GroupMean<u32>>,
    pub weather: Vec<WeatherEffect>,
}

impl Summary {
    pub fn summary(&self) -> String {
        let mean = self
            .mean_rentals
            .map(|m| format!("{:.1}", m))
            .unwrap_or_else(|| NO_DATA.to_string());
        let share = self
            .registered_share
            .map(|s| format!("{:.1}%", s))
            .unwrap_or_else(|| NO_DATA.to_string());

        format!(
            "Rows: {}\n\
            Mean Rentals / Hour: {}\n\
            Total Rentals: {}\n\
            Registered: {}",
            self.row_count, mean, self.total_rentals, share
        )
    }
}

impl DashboardReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn summary(&self) -> String {
        self.summary.summary()
    }

    pub fn detailed_summary(&self) -> String {
        if self.summary.row_count == 0 {
            return format!("{}\n\nNo rows match the current filters.", self.summary());
        }

        let mut out = self.summary();

        out.push_str("\n\nMean Rentals by Hour:\n");
        for group in &self.hourly {
            out.push_str(&format!("  {:02}:00  {:>8.1}  (n={})\n", group.key, group.mean, group.count));
        }

        out.push_str("\nMonthly Trend by Year:\n");
        for month in &self.monthly {
            out.push_str(&format!(
                "  {}-{:02}  {:>8.1}  (n={})\n",
                month.year, month.month, month.mean, month.count
            ));
        }

        out.push_str("\nWorking vs Non-working:\n");
        for group in &self.working_day {
            let label = if group.key { "working" } else { "non-working" };
            out.push_str(&format!("  {:<12} {:>8.1}  (n={})\n", label, group.mean, group.count));
        }

        out.push_str("\nDay Period:\n");
        for group in &self.day_period {
            out.push_str(&format!("  {:<12} {:>8.1}  (n={})\n", group.key, group.mean, group.count));
        }

        out.push_str("\nDay of Week:\n");
        for group in &self.weekday {
            out.push_str(&format!(
                "  {:<12} {:>8.1}  (n={})\n",
                weekday_name(group.key),
                group.mean,
                group.count
            ));
        }

        out.push_str("\nWeather Effect (95% CI):\n");
        for effect in &self.weather {
            out.push_str(&format!(
                "  weather {}  {:>8.1} ± {:.1}  (n={})\n",
                effect.weather_code, effect.mean, effect.ci, effect.n
            ));
        }

        out
    }
}
