pub mod calendar;
pub mod dataset;
pub mod rental;

pub use calendar::{weekday_name, DayPeriod, Season};
pub use dataset::{Dataset, View};
pub use rental::{parse_timestamp, RawRecord, RentalRecord};
