use crate::error::{ProcessingError, Result};
use crate::models::{Dataset, RawRecord, RentalRecord};
use crate::utils::constants::{DEFAULT_BUFFER_SIZE, REQUIRED_COLUMNS};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, warn};

pub struct RentalReader {
    delimiter: u8,
}

impl RentalReader {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Read and derive the whole table. Any bad row aborts the load.
    pub fn read_dataset(&self, path: &Path) -> Result<Dataset> {
        info!("Loading rental data from {}", path.display());
        let file = File::open(path)?;
        let reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let records = self.read_records(reader)?;

        if records.is_empty() {
            warn!("{} contains no data rows", path.display());
        }
        info!("Loaded {} hourly records", records.len());

        Ok(Dataset::with_source(records, path))
    }

    /// Read and derive rows from any CSV byte stream.
    pub fn read_records<R: Read>(&self, input: R) -> Result<Vec<RentalRecord>> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(Trim::All)
            .from_reader(input);

        let headers = reader.headers()?.clone();
        check_required_columns(&headers)?;
        debug!("Source columns: {:?}", headers.iter().collect::<Vec<_>>());

        let mut records = Vec::new();
        for (index, row) in reader.deserialize::<RawRecord>().enumerate() {
            let row_number = index + 1;
            let raw = row.map_err(|e| ProcessingError::from(e).at_row(row_number))?;
            let record = RentalRecord::from_raw(raw).map_err(|e| e.at_row(row_number))?;
            records.push(record);
        }

        Ok(records)
    }
}

impl Default for RentalReader {
    fn default() -> Self {
        Self::new()
    }
}

fn check_required_columns(headers: &StringRecord) -> Result<()> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(ProcessingError::MissingColumn {
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

/// Load a dataset from `path` with default reader settings.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    RentalReader::new().read_dataset(path)
}
