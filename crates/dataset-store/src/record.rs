//! Segment Records and Datasets

use crate::error::DatasetError;
use feature_bank::FeatureVector;
use serde::{Deserialize, Serialize};

/// One segment's feature vector plus provenance metadata. The unit stored
/// to persistent output; immutable once assembled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentRecord {
    /// Segment identifier (file stem, with a chunk suffix when split)
    pub segment: String,
    /// File the segment came from
    pub source_file: String,
    /// Operating condition, from the source directory name
    pub condition: String,
    /// Binary label: 0 = normal, 1 = fault
    pub label: u8,
    /// Descriptor values, in dataset column order
    pub features: FeatureVector,
}

/// An ordered collection of segment records with uniform descriptor
/// columns. Built incrementally during a run, then read-only.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<String>,
    records: Vec<SegmentRecord>,
}

impl Dataset {
    /// Create an empty dataset with the given descriptor columns.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            records: Vec::new(),
        }
    }

    /// Append a record, enforcing the uniform-column invariant.
    pub fn push(&mut self, record: SegmentRecord) -> Result<(), DatasetError> {
        if record.features.len() != self.columns.len() {
            return Err(DatasetError::ColumnMismatch {
                expected: self.columns.len(),
                actual: record.features.len(),
            });
        }
        self.records.push(record);
        Ok(())
    }

    /// Descriptor column names, in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All records, in discovery order.
    pub fn records(&self) -> &[SegmentRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no records have been assembled.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Index of a descriptor column.
    pub fn column_index(&self, name: &str) -> Result<usize, DatasetError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| DatasetError::UnknownColumn(name.to_string()))
    }

    /// Unique conditions in first-seen order.
    pub fn conditions(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for record in &self.records {
            if !seen.contains(&record.condition.as_str()) {
                seen.push(record.condition.as_str());
            }
        }
        seen
    }

    /// Label column.
    pub fn labels(&self) -> Vec<u8> {
        self.records.iter().map(|r| r.label).collect()
    }

    /// One descriptor column's values across all records.
    pub fn column_values(&self, index: usize) -> Vec<f64> {
        self.records
            .iter()
            .map(|r| r.features.values[index])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(condition: &str, label: u8, values: Vec<f64>) -> SegmentRecord {
        SegmentRecord {
            segment: format!("{condition}_seg"),
            source_file: format!("{condition}.csv"),
            condition: condition.to_string(),
            label,
            features: FeatureVector { values },
        }
    }

    #[test]
    fn test_push_and_columns() {
        let mut dataset = Dataset::new(vec!["mean".into(), "rms".into()]);
        dataset.push(record("Normal", 0, vec![1.0, 2.0])).unwrap();
        dataset.push(record("Fault_A", 1, vec![3.0, 4.0])).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.labels(), vec![0, 1]);
        assert_eq!(dataset.column_values(1), vec![2.0, 4.0]);
    }

    #[test]
    fn test_column_mismatch_rejected() {
        let mut dataset = Dataset::new(vec!["mean".into(), "rms".into()]);
        let result = dataset.push(record("Normal", 0, vec![1.0]));
        assert!(matches!(
            result,
            Err(DatasetError::ColumnMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_conditions_first_seen_order() {
        let mut dataset = Dataset::new(vec!["mean".into()]);
        dataset.push(record("B", 1, vec![1.0])).unwrap();
        dataset.push(record("A", 0, vec![2.0])).unwrap();
        dataset.push(record("B", 1, vec![3.0])).unwrap();
        assert_eq!(dataset.conditions(), vec!["B", "A"]);
    }

    #[test]
    fn test_unknown_column() {
        let dataset = Dataset::new(vec!["mean".into()]);
        assert!(dataset.column_index("rms").is_err());
        assert_eq!(dataset.column_index("mean").unwrap(), 0);
    }
}
