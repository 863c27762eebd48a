pub mod analyzers;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod utils;

pub use analyzers::{DashboardReport, RentalAnalyzer};
pub use error::{ErrorKind, ProcessingError, Result};
pub use models::{Dataset, RentalRecord, View};
pub use processors::{filter, FilterCriteria, WorkingDayMode};
pub use readers::{load_dataset, DatasetCache};
