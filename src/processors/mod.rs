pub mod filter;

pub use filter::{filter, FilterCriteria, WorkingDayMode};
