use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::config::PipelineConfig;
use crate::data::model::Dataset;
use crate::feature_spec::FeatureSpec;

/// Lineage record for one run: when it ran, what it read and wrote, and the
/// shape of the persisted dataset.  Built from the final dataset after
/// validation so the counts match the output files exactly.
#[derive(Debug, Clone, Serialize)]
pub struct RunMetadata {
    pub generated_at_utc: String,
    pub inputs: BTreeMap<String, String>,
    pub outputs: BTreeMap<String, String>,
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<String>,
    pub target: String,
    pub feature_spec_snapshot: FeatureSpec,
}

pub fn build_metadata(
    dataset: &Dataset,
    cfg: &PipelineConfig,
    spec: &FeatureSpec,
) -> RunMetadata {
    let inputs = BTreeMap::from([
        (
            "processed_csv".to_string(),
            cfg.input_csv_path().display().to_string(),
        ),
        (
            "feature_spec".to_string(),
            cfg.feature_spec_path().display().to_string(),
        ),
    ]);
    // The optional CSV path is always recorded, written or not.
    let outputs = BTreeMap::from([
        (
            "parquet".to_string(),
            cfg.parquet_path().display().to_string(),
        ),
        (
            "csv_optional".to_string(),
            cfg.csv_path().display().to_string(),
        ),
    ]);

    RunMetadata {
        generated_at_utc: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        inputs,
        outputs,
        row_count: dataset.row_count(),
        column_count: dataset.column_count(),
        columns: dataset.column_names(),
        target: spec.target.clone(),
        feature_spec_snapshot: spec.clone(),
    }
}

/// Write the metadata document as pretty-printed JSON (2-space indent).
pub fn write_metadata(metadata: &RunMetadata, path: &Path) -> Result<()> {
    let text = serde_json::to_string_pretty(metadata).context("serializing metadata")?;
    std::fs::write(path, text)
        .with_context(|| format!("writing metadata {}", path.display()))?;
    Ok(())
}
