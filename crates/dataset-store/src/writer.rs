//! Tabular Output Writer
//!
//! Persists the dataset table family under a results root: consolidated
//! features, descriptive summary, segment index, per-condition partitions,
//! per-segment files, rankings and the curated weighted export. Condition
//! subfolders are created on demand.

use crate::error::DatasetError;
use crate::record::{Dataset, SegmentRecord};
use feature_bank::{mean, percentile};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes dataset tables under a results root.
pub struct DatasetWriter {
    root: PathBuf,
}

impl DatasetWriter {
    /// Create a writer for the given results root. Directories are created
    /// lazily, per output step.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The results root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Consolidated full-feature table: one row per segment, all descriptor
    /// columns plus `segment`, `condition`, `label`.
    pub fn write_full(&self, dataset: &Dataset) -> Result<PathBuf, DatasetError> {
        self.write_consolidated(dataset, "features_full.csv")
    }

    /// Consolidated table for the selection-oriented battery.
    pub fn write_core(&self, dataset: &Dataset) -> Result<PathBuf, DatasetError> {
        self.write_consolidated(dataset, "features_core.csv")
    }

    fn write_consolidated(
        &self,
        dataset: &Dataset,
        file_name: &str,
    ) -> Result<PathBuf, DatasetError> {
        let path = self.root.join(file_name);
        self.write_feature_table(&path, dataset, dataset.records().iter())?;
        info!(path = %path.display(), rows = dataset.len(), "wrote consolidated features");
        Ok(path)
    }

    /// Descriptive statistics per descriptor: count, mean, std, min,
    /// quartiles, max. One column per descriptor, one row per statistic.
    pub fn write_summary(&self, dataset: &Dataset) -> Result<PathBuf, DatasetError> {
        fs::create_dir_all(&self.root)?;
        let path = self.root.join("features_summary.csv");
        let mut writer = csv::Writer::from_path(&path)?;

        let mut header = vec!["statistic".to_string()];
        header.extend(dataset.columns().iter().cloned());
        writer.write_record(&header)?;

        let stats: [(&str, fn(&[f64]) -> f64); 8] = [
            ("count", |v| v.len() as f64),
            ("mean", mean),
            ("std", sample_std),
            ("min", |v| v.iter().fold(f64::MAX, |a, &x| a.min(x))),
            ("25%", |v| percentile(v, 25.0)),
            ("50%", |v| percentile(v, 50.0)),
            ("75%", |v| percentile(v, 75.0)),
            ("max", |v| v.iter().fold(f64::MIN, |a, &x| a.max(x))),
        ];

        let columns: Vec<Vec<f64>> = (0..dataset.columns().len())
            .map(|i| dataset.column_values(i))
            .collect();

        for (name, stat) in stats {
            let mut row = vec![name.to_string()];
            row.extend(columns.iter().map(|c| stat(c).to_string()));
            writer.write_record(&row)?;
        }
        writer.flush()?;
        Ok(path)
    }

    /// Segment index table: `segment`, `condition`, `label`.
    pub fn write_index(&self, dataset: &Dataset) -> Result<PathBuf, DatasetError> {
        fs::create_dir_all(&self.root)?;
        let path = self.root.join("segments_index.csv");
        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(["segment", "condition", "label"])?;
        for record in dataset.records() {
            let label = record.label.to_string();
            writer.write_record([
                record.segment.as_str(),
                record.condition.as_str(),
                label.as_str(),
            ])?;
        }
        writer.flush()?;
        Ok(path)
    }

    /// Per-condition partitions under `by_condition/`, one file per
    /// condition holding every record whose condition matches.
    pub fn write_by_condition(&self, dataset: &Dataset) -> Result<Vec<PathBuf>, DatasetError> {
        let dir = self.root.join("by_condition");
        let mut paths = Vec::new();
        for condition in dataset.conditions() {
            let path = dir.join(format!("features_{}.csv", sanitize(condition)));
            let records = dataset
                .records()
                .iter()
                .filter(|r| r.condition == condition);
            self.write_feature_table(&path, dataset, records)?;
            paths.push(path);
        }
        info!(conditions = paths.len(), "wrote per-condition partitions");
        Ok(paths)
    }

    /// Per-segment single-row files under `by_segment/{condition}/`.
    pub fn write_per_segment(&self, dataset: &Dataset) -> Result<usize, DatasetError> {
        let dir = self.root.join("by_segment");
        let mut written = 0;
        for record in dataset.records() {
            let path = dir
                .join(&record.condition)
                .join(format!("features_{}.csv", sanitize(&record.segment)));
            self.write_feature_table(&path, dataset, std::iter::once(record))?;
            written += 1;
        }
        Ok(written)
    }

    /// Ranking table: `feature`, `score`, in descending score order.
    pub fn write_ranking(&self, ranking: &[(String, f64)]) -> Result<PathBuf, DatasetError> {
        fs::create_dir_all(&self.root)?;
        let path = self.root.join("ranking.csv");
        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(["feature", "score"])?;
        for (feature, score) in ranking {
            writer.write_record([feature.clone(), score.to_string()])?;
        }
        writer.flush()?;
        Ok(path)
    }

    /// Reduced table holding exactly the selected descriptor columns plus
    /// `segment`, `condition`, `label`.
    pub fn write_top_k(
        &self,
        dataset: &Dataset,
        selected: &[String],
    ) -> Result<PathBuf, DatasetError> {
        fs::create_dir_all(&self.root)?;
        let indices = selected
            .iter()
            .map(|name| dataset.column_index(name))
            .collect::<Result<Vec<_>, _>>()?;

        let path = self.root.join("features_top_k.csv");
        let mut writer = csv::Writer::from_path(&path)?;

        let mut header: Vec<String> = selected.to_vec();
        header.extend(metadata_columns());
        writer.write_record(&header)?;

        for record in dataset.records() {
            let mut row: Vec<String> = indices
                .iter()
                .map(|&i| record.features.values[i].to_string())
                .collect();
            push_metadata(&mut row, record);
            writer.write_record(&row)?;
        }
        writer.flush()?;
        info!(path = %path.display(), k = selected.len(), "wrote reduced dataset");
        Ok(path)
    }

    /// Curated weighted export under `curated/`: the fixed ranking with
    /// positions and weights, a consolidated table, and per-condition
    /// subfolders with condition and per-segment files. Each selected
    /// descriptor carries a `{descriptor}_peso` weight column.
    pub fn write_curated(
        &self,
        dataset: &Dataset,
        curated: &[(&str, f64)],
    ) -> Result<PathBuf, DatasetError> {
        let dir = self.root.join("curated");
        fs::create_dir_all(&dir)?;

        let ranking_path = dir.join("ranking_curated.csv");
        let mut writer = csv::Writer::from_path(&ranking_path)?;
        writer.write_record(["feature", "position", "weight"])?;
        for (position, (feature, weight)) in curated.iter().enumerate() {
            writer.write_record([
                feature.to_string(),
                (position + 1).to_string(),
                weight.to_string(),
            ])?;
        }
        writer.flush()?;

        let indices = curated
            .iter()
            .map(|(name, _)| dataset.column_index(name))
            .collect::<Result<Vec<_>, _>>()?;

        let mut header = Vec::new();
        for (feature, _) in curated {
            header.push(feature.to_string());
            header.push(format!("{feature}_peso"));
        }
        header.push("segment".to_string());
        header.push("source_file".to_string());
        header.push("condition".to_string());
        header.push("label".to_string());

        let curated_row = |record: &SegmentRecord| {
            let mut row = Vec::new();
            for (&index, (_, weight)) in indices.iter().zip(curated) {
                row.push(record.features.values[index].to_string());
                row.push(weight.to_string());
            }
            row.push(record.segment.clone());
            row.push(record.source_file.clone());
            row.push(record.condition.clone());
            row.push(record.label.to_string());
            row
        };

        for condition in dataset.conditions() {
            let condition_dir = dir.join(condition);
            fs::create_dir_all(&condition_dir)?;

            let path =
                condition_dir.join(format!("features_curated_{}.csv", sanitize(condition)));
            let mut writer = csv::Writer::from_path(&path)?;
            writer.write_record(&header)?;
            for record in dataset.records().iter().filter(|r| r.condition == condition) {
                writer.write_record(&curated_row(record))?;

                let segment_path = condition_dir
                    .join(format!("segment_{}_curated.csv", sanitize(&record.segment)));
                let mut segment_writer = csv::Writer::from_path(&segment_path)?;
                segment_writer.write_record(&header)?;
                segment_writer.write_record(&curated_row(record))?;
                segment_writer.flush()?;
            }
            writer.flush()?;
        }

        let all_path = dir.join("features_curated_all.csv");
        let mut writer = csv::Writer::from_path(&all_path)?;
        writer.write_record(&header)?;
        for record in dataset.records() {
            writer.write_record(&curated_row(record))?;
        }
        writer.flush()?;

        info!(path = %dir.display(), "wrote curated weighted export");
        Ok(dir)
    }

    /// Write one feature table (all descriptor columns + metadata) for the
    /// given records, creating parent directories on demand.
    fn write_feature_table<'a>(
        &self,
        path: &Path,
        dataset: &Dataset,
        records: impl Iterator<Item = &'a SegmentRecord>,
    ) -> Result<(), DatasetError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = csv::Writer::from_path(path)?;

        let mut header: Vec<String> = dataset.columns().to_vec();
        header.extend(metadata_columns());
        writer.write_record(&header)?;

        for record in records {
            let mut row: Vec<String> = record
                .features
                .values
                .iter()
                .map(|v| v.to_string())
                .collect();
            push_metadata(&mut row, record);
            writer.write_record(&row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn metadata_columns() -> [String; 3] {
    [
        "segment".to_string(),
        "condition".to_string(),
        "label".to_string(),
    ]
}

fn push_metadata(row: &mut Vec<String>, record: &SegmentRecord) {
    row.push(record.segment.clone());
    row.push(record.condition.clone());
    row.push(record.label.to_string());
}

/// Sample standard deviation (n - 1 denominator), as in summary tables.
fn sample_std(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(values);
    (values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (n - 1) as f64).sqrt()
}

/// File-name-safe rendition of a condition or segment name.
fn sanitize(name: &str) -> String {
    name.replace([' ', '-'], "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use feature_bank::FeatureVector;

    fn dataset() -> Dataset {
        let mut dataset = Dataset::new(vec!["mean".into(), "rms".into()]);
        for (condition, label, base) in [("Normal", 0u8, 1.0), ("Fault_A", 1u8, 10.0)] {
            for i in 0..3 {
                dataset
                    .push(SegmentRecord {
                        segment: format!("{condition}_{i}"),
                        source_file: format!("{condition}_{i}.csv"),
                        condition: condition.to_string(),
                        label,
                        features: FeatureVector {
                            values: vec![base + i as f64, base * 2.0],
                        },
                    })
                    .unwrap();
            }
        }
        dataset
    }

    fn read_lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_full_table_layout() {
        let dir = tempfile::tempdir().unwrap();
        let writer = DatasetWriter::new(dir.path());
        let path = writer.write_full(&dataset()).unwrap();

        let lines = read_lines(&path);
        assert_eq!(lines[0], "mean,rms,segment,condition,label");
        assert_eq!(lines.len(), 7);
        assert!(lines[1].ends_with("Normal_0,Normal,0"));
        assert!(lines[6].ends_with("Fault_A_2,Fault_A,1"));
    }

    #[test]
    fn test_by_condition_partitions() {
        let dir = tempfile::tempdir().unwrap();
        let writer = DatasetWriter::new(dir.path());
        let paths = writer.write_by_condition(&dataset()).unwrap();

        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("by_condition/features_Normal.csv"));
        // Header + 3 rows each
        assert_eq!(read_lines(&paths[0]).len(), 4);
        assert_eq!(read_lines(&paths[1]).len(), 4);
    }

    #[test]
    fn test_per_segment_files() {
        let dir = tempfile::tempdir().unwrap();
        let writer = DatasetWriter::new(dir.path());
        let written = writer.write_per_segment(&dataset()).unwrap();
        assert_eq!(written, 6);
        let one = dir
            .path()
            .join("by_segment/Normal/features_Normal_1.csv");
        assert_eq!(read_lines(&one).len(), 2);
    }

    #[test]
    fn test_summary_statistics() {
        let dir = tempfile::tempdir().unwrap();
        let writer = DatasetWriter::new(dir.path());
        let path = writer.write_summary(&dataset()).unwrap();

        let lines = read_lines(&path);
        assert_eq!(lines[0], "statistic,mean,rms");
        assert_eq!(lines.len(), 9);
        assert!(lines[1].starts_with("count,6,6"));
    }

    #[test]
    fn test_ranking_and_top_k() {
        let dir = tempfile::tempdir().unwrap();
        let writer = DatasetWriter::new(dir.path());
        let ranking = vec![("rms".to_string(), 0.9), ("mean".to_string(), 0.4)];
        let path = writer.write_ranking(&ranking).unwrap();
        assert_eq!(read_lines(&path)[1], "rms,0.9");

        let reduced = writer
            .write_top_k(&dataset(), &["rms".to_string()])
            .unwrap();
        let lines = read_lines(&reduced);
        assert_eq!(lines[0], "rms,segment,condition,label");
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn test_top_k_unknown_column() {
        let dir = tempfile::tempdir().unwrap();
        let writer = DatasetWriter::new(dir.path());
        let result = writer.write_top_k(&dataset(), &["nope".to_string()]);
        assert!(matches!(result, Err(DatasetError::UnknownColumn(_))));
    }

    #[test]
    fn test_curated_export_tree() {
        let dir = tempfile::tempdir().unwrap();
        let writer = DatasetWriter::new(dir.path());
        let curated = [("rms", 1.0), ("mean", 0.95)];
        let root = writer.write_curated(&dataset(), &curated).unwrap();

        let ranking = read_lines(&root.join("ranking_curated.csv"));
        assert_eq!(ranking[0], "feature,position,weight");
        assert_eq!(ranking[1], "rms,1,1");

        let all = read_lines(&root.join("features_curated_all.csv"));
        assert_eq!(
            all[0],
            "rms,rms_peso,mean,mean_peso,segment,source_file,condition,label"
        );
        assert_eq!(all.len(), 7);

        let per_condition = read_lines(&root.join("Normal/features_curated_Normal.csv"));
        assert_eq!(per_condition.len(), 4);
        assert!(root.join("Normal/segment_Normal_0_curated.csv").exists());
    }
}
