pub mod dataset_cache;
pub mod rental_reader;

pub use dataset_cache::DatasetCache;
pub use rental_reader::{load_dataset, RentalReader};
