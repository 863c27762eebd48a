pub mod rental_analyzer;
pub mod report;

pub use rental_analyzer::{GroupMean, MonthlyMean, RentalAnalyzer, Summary, WeatherEffect};
pub use report::DashboardReport;
