use std::path::{Path, PathBuf};

/// Immutable path configuration for one pipeline run.
///
/// Constructed once (defaults mirror the repository's `data/` layout) and
/// never modified afterwards.  Tests override the directories and keep the
/// default file names.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub processed_dir: PathBuf,
    pub cleaned_dir: PathBuf,

    pub input_cleaned_csv: String,
    pub input_feature_spec: String,

    pub output_dataset_parquet: String,
    pub output_dataset_csv: String,
    pub output_metadata_json: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            processed_dir: PathBuf::from("data/processed"),
            cleaned_dir: PathBuf::from("data/cleaned"),
            input_cleaned_csv: "diabetes_cleaned.csv".into(),
            input_feature_spec: "feature_spec.json".into(),
            output_dataset_parquet: "diabetes_model_ready.parquet".into(),
            output_dataset_csv: "diabetes_model_ready.csv".into(),
            output_metadata_json: "metadata.json".into(),
        }
    }
}

impl PipelineConfig {
    /// Defaults rooted under the given directories instead of `data/`.
    pub fn with_dirs(processed_dir: impl AsRef<Path>, cleaned_dir: impl AsRef<Path>) -> Self {
        PipelineConfig {
            processed_dir: processed_dir.as_ref().to_path_buf(),
            cleaned_dir: cleaned_dir.as_ref().to_path_buf(),
            ..PipelineConfig::default()
        }
    }

    pub fn input_csv_path(&self) -> PathBuf {
        self.processed_dir.join(&self.input_cleaned_csv)
    }

    pub fn feature_spec_path(&self) -> PathBuf {
        self.processed_dir.join(&self.input_feature_spec)
    }

    pub fn parquet_path(&self) -> PathBuf {
        self.cleaned_dir.join(&self.output_dataset_parquet)
    }

    pub fn csv_path(&self) -> PathBuf {
        self.cleaned_dir.join(&self.output_dataset_csv)
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.cleaned_dir.join(&self.output_metadata_json)
    }
}
