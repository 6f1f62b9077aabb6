//! Pipeline Requests and Configuration

use condition_label::LabelPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One pipeline invocation: an explicit immutable request object. The
/// interactive shell (or CLI) builds a request and hands it to the entry
/// points; the pipeline holds no global state.
#[derive(Debug, Clone)]
pub struct PipelineRequest {
    /// A single recording file or a directory tree of recordings
    pub input: PathBuf,
    /// Root directory for all persisted output
    pub results_root: PathBuf,
    /// Number of descriptors kept by selection
    pub top_k: usize,
    /// How the healthy-state name code is matched
    pub label_policy: LabelPolicy,
    /// Skip the primary ranker and use the univariate fallback directly
    pub fallback_only: bool,
}

impl PipelineRequest {
    /// Build a request with default selection settings.
    pub fn new(input: impl Into<PathBuf>, results_root: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            results_root: results_root.into(),
            top_k: feature_select::DEFAULT_TOP_K,
            label_policy: LabelPolicy::default(),
            fallback_only: false,
        }
    }
}

/// On-disk pipeline settings, all optional with defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Default results root
    pub results_root: PathBuf,
    /// Default selection size
    pub top_k: usize,
    /// Default labeling policy
    pub label_policy: LabelPolicy,
    /// Use the fallback ranker unconditionally
    pub fallback_only: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            results_root: PathBuf::from("results"),
            top_k: feature_select::DEFAULT_TOP_K,
            label_policy: LabelPolicy::default(),
            fallback_only: false,
        }
    }
}

impl PipelineConfig {
    /// Load settings from an optional file, falling back to defaults for
    /// anything unset.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }
        builder.build()?.try_deserialize()
    }

    /// Turn the settings into a request for the given input.
    pub fn request(&self, input: impl Into<PathBuf>) -> PipelineRequest {
        PipelineRequest {
            input: input.into(),
            results_root: self.results_root.clone(),
            top_k: self.top_k,
            label_policy: self.label_policy,
            fallback_only: self.fallback_only,
        }
    }
}

/// Counters reported after a run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Files that contributed at least one record
    pub files_processed: usize,
    /// Files skipped (unreadable, unsupported, or too few samples)
    pub files_skipped: usize,
    /// Records assembled (one per segment or chunk)
    pub records: usize,
    /// Distinct conditions seen
    pub conditions: usize,
    /// Whether selection used the univariate fallback (selection runs only)
    pub used_fallback: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.top_k, 10);
        assert_eq!(config.label_policy, LabelPolicy::Substring);
        assert!(!config.fallback_only);
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let config = PipelineConfig::load(None).unwrap();
        assert_eq!(config.results_root, PathBuf::from("results"));
    }

    #[test]
    fn test_request_carries_settings() {
        let mut config = PipelineConfig::default();
        config.top_k = 5;
        let request = config.request("data");
        assert_eq!(request.top_k, 5);
        assert_eq!(request.input, PathBuf::from("data"));
    }
}
