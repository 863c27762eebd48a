use crate::error::Result;
use crate::models::Dataset;
use crate::readers::RentalReader;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::SystemTime;
use tracing::{debug, info};

/// Size and modification time of a source file, captured when it was loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SourceFingerprint {
    len: u64,
    modified: Option<SystemTime>,
}

impl SourceFingerprint {
    fn of(path: &Path) -> Result<Self> {
        let metadata = fs::metadata(path)?;
        Ok(Self {
            len: metadata.len(),
            modified: metadata.modified().ok(),
        })
    }
}

struct CachedDataset {
    dataset: Dataset,
    fingerprint: SourceFingerprint,
}

/// Load-once store of derived datasets, keyed by canonical source path.
///
/// Entries live until [`DatasetCache::invalidate`] or [`DatasetCache::clear`]
/// is called. With change detection enabled, a source whose size or
/// modification time differs from the cached fingerprint is reloaded.
pub struct DatasetCache {
    reader: RentalReader,
    change_detection: bool,
    entries: Mutex<HashMap<PathBuf, CachedDataset>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::with_reader(RentalReader::new())
    }

    pub fn with_reader(reader: RentalReader) -> Self {
        Self {
            reader,
            change_detection: false,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_change_detection(mut self, enabled: bool) -> Self {
        self.change_detection = enabled;
        self
    }

    pub fn get_or_load(&self, path: &Path) -> Result<Dataset> {
        let key = fs::canonicalize(path)?;
        let mut entries = self.lock();

        if let Some(cached) = entries.get(&key) {
            let stale = self.change_detection && SourceFingerprint::of(&key)? != cached.fingerprint;
            if !stale {
                debug!("Dataset cache hit for {}", key.display());
                return Ok(cached.dataset.clone());
            }
            info!("Source {} changed since it was loaded, reloading", key.display());
        }

        let fingerprint = SourceFingerprint::of(&key)?;
        let dataset = self.reader.read_dataset(&key)?;
        entries.insert(
            key,
            CachedDataset {
                dataset: dataset.clone(),
                fingerprint,
            },
        );

        Ok(dataset)
    }

    /// Drop the entry for `path`. Returns whether anything was cached.
    pub fn invalidate(&self, path: &Path) -> bool {
        let key = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let removed = self.lock().remove(&key).is_some();
        if removed {
            info!("Invalidated cached dataset for {}", key.display());
        }
        removed
    }

    pub fn clear(&self) {
        let mut entries = self.lock();
        info!("Clearing {} cached dataset(s)", entries.len());
        entries.clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PathBuf, CachedDataset>> {
        // Entries are only ever replaced whole, so a poisoned map is still consistent.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for DatasetCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_source(rows: &[&str]) -> Result<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "datetime,season,weather,workingday,count,registered")?;
        for row in rows {
            writeln!(file, "{}", row)?;
        }
        file.flush()?;
        Ok(file)
    }

    #[test]
    fn test_second_load_is_served_from_cache() -> Result<()> {
        let source = write_source(&["2011-01-01 00:00:00,1,1,0,16,13"])?;
        let cache = DatasetCache::new();

        let first = cache.get_or_load(source.path())?;
        let second = cache.get_or_load(source.path())?;

        assert!(first.ptr_eq(&second));
        assert_eq!(cache.len(), 1);
        Ok(())
    }

    #[test]
    fn test_invalidate_forces_reload() -> Result<()> {
        let source = write_source(&["2011-01-01 00:00:00,1,1,0,16,13"])?;
        let cache = DatasetCache::new();

        let first = cache.get_or_load(source.path())?;
        assert!(cache.invalidate(source.path()));
        assert!(!cache.invalidate(source.path()));

        let second = cache.get_or_load(source.path())?;
        assert!(!first.ptr_eq(&second));
        assert_eq!(first.records(), second.records());
        Ok(())
    }

    #[test]
    fn test_clear() -> Result<()> {
        let a = write_source(&["2011-01-01 00:00:00,1,1,0,16,13"])?;
        let b = write_source(&["2012-01-01 00:00:00,1,1,0,16,13"])?;
        let cache = DatasetCache::new();

        cache.get_or_load(a.path())?;
        cache.get_or_load(b.path())?;
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
        Ok(())
    }

    #[test]
    fn test_without_change_detection_stale_data_is_kept() -> Result<()> {
        let mut source = write_source(&["2011-01-01 00:00:00,1,1,0,16,13"])?;
        let cache = DatasetCache::new();
        cache.get_or_load(source.path())?;

        writeln!(source, "2011-01-01 01:00:00,1,1,0,40,32")?;
        source.flush()?;

        assert_eq!(cache.get_or_load(source.path())?.len(), 1);
        Ok(())
    }

    #[test]
    fn test_change_detection_reloads_grown_source() -> Result<()> {
        let mut source = write_source(&["2011-01-01 00:00:00,1,1,0,16,13"])?;
        let cache = DatasetCache::new().with_change_detection(true);
        assert_eq!(cache.get_or_load(source.path())?.len(), 1);

        writeln!(source, "2011-01-01 01:00:00,1,1,0,40,32")?;
        source.flush()?;

        assert_eq!(cache.get_or_load(source.path())?.len(), 2);
        Ok(())
    }

    #[test]
    fn test_failed_load_is_not_cached() -> Result<()> {
        let source = write_source(&["2011-01-01 00:00:00,9,1,0,16,13"])?;
        let cache = DatasetCache::new();

        assert!(cache.get_or_load(source.path()).is_err());
        assert!(cache.is_empty());
        Ok(())
    }
}
