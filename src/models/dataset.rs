use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::models::calendar::Season;
use crate::models::rental::RentalRecord;

/// Immutable, shareable handle to a loaded table. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Arc<Vec<RentalRecord>>,
    source: Option<PathBuf>,
}

impl Dataset {
    pub fn new(records: Vec<RentalRecord>) -> Self {
        Self {
            records: Arc::new(records),
            source: None,
        }
    }

    pub fn with_source(records: Vec<RentalRecord>, source: impl Into<PathBuf>) -> Self {
        Self {
            records: Arc::new(records),
            source: Some(source.into()),
        }
    }

    pub fn records(&self) -> &[RentalRecord] {
        &self.records
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when both handles point at the same loaded table.
    pub fn ptr_eq(&self, other: &Dataset) -> bool {
        Arc::ptr_eq(&self.records, &other.records)
    }

    pub fn distinct_years(&self) -> Vec<i32> {
        self.distinct(|r| r.year)
    }

    pub fn distinct_seasons(&self) -> Vec<Season> {
        self.distinct(|r| r.season)
    }

    pub fn distinct_weather(&self) -> Vec<i32> {
        self.distinct(|r| r.weather_code)
    }

    /// A view over every row, in source order.
    pub fn view_all(&self) -> View {
        View {
            dataset: self.clone(),
            indices: (0..self.len()).collect(),
        }
    }

    fn distinct<K: Ord>(&self, key: impl Fn(&RentalRecord) -> K) -> Vec<K> {
        self.records
            .iter()
            .map(key)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Read-only, order-preserving subset of a [`Dataset`].
#[derive(Debug, Clone)]
pub struct View {
    dataset: Dataset,
    indices: Vec<usize>,
}

impl View {
    pub(crate) fn from_indices(dataset: Dataset, indices: Vec<usize>) -> Self {
        Self { dataset, indices }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Positions of the selected rows in the base dataset, ascending.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RentalRecord> + '_ {
        let records = self.dataset.records();
        self.indices.iter().map(move |&i| &records[i])
    }
}

impl PartialEq for View {
    fn eq(&self, other: &Self) -> bool {
        self.dataset.ptr_eq(&other.dataset) && self.indices == other.indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(year: i32, season: i32, weather: i32) -> RentalRecord {
        let timestamp = NaiveDate::from_ymd_opt(year, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        RentalRecord::new(timestamp, season, weather, true, 10, 5).unwrap()
    }

    #[test]
    fn test_distinct_values_are_sorted() {
        let dataset = Dataset::new(vec![
            record(2012, 3, 2),
            record(2011, 1, 1),
            record(2012, 3, 3),
            record(2011, 2, 1),
        ]);

        assert_eq!(dataset.distinct_years(), vec![2011, 2012]);
        assert_eq!(
            dataset.distinct_seasons(),
            vec![Season::Spring, Season::Summer, Season::Fall]
        );
        assert_eq!(dataset.distinct_weather(), vec![1, 2, 3]);
    }

    #[test]
    fn test_view_all_preserves_order() {
        let dataset = Dataset::new(vec![record(2012, 1, 1), record(2011, 1, 1)]);
        let view = dataset.view_all();

        assert_eq!(view.len(), 2);
        let years: Vec<i32> = view.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2012, 2011]);
    }

    #[test]
    fn test_views_of_distinct_loads_differ() {
        let a = Dataset::new(vec![record(2011, 1, 1)]);
        let b = Dataset::new(vec![record(2011, 1, 1)]);
        assert_eq!(a.view_all(), a.clone().view_all());
        assert_ne!(a.view_all(), b.view_all());
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::new(Vec::new());
        assert!(dataset.is_empty());
        assert!(dataset.view_all().is_empty());
        assert!(dataset.distinct_years().is_empty());
    }
}
