use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::PipelineConfig;
use crate::data::{loader, writer};
use crate::features::apply_feature_engineering;
use crate::metadata::{build_metadata, write_metadata};
use crate::validate::{log_range_warning, validate_contract};

/// Paths written by a successful run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub dataset_path: PathBuf,
    pub metadata_path: PathBuf,
    /// Present only when the caller opted into the CSV export.
    pub csv_path: Option<PathBuf>,
    pub row_count: usize,
    pub column_count: usize,
}

/// One full pipeline run: load → engineer → validate → persist.
///
/// Strictly sequential; the first failure aborts the run and propagates.
/// Re-running overwrites the previous outputs, so no rollback is attempted
/// on a partial write.
pub fn run(cfg: &PipelineConfig, export_csv: bool) -> Result<RunSummary> {
    let dataset = loader::load_dataset_csv(&cfg.input_csv_path())?;
    let spec = loader::load_feature_spec(&cfg.feature_spec_path())?;
    log::info!(
        "loaded {} rows x {} columns from {}",
        dataset.row_count(),
        dataset.column_count(),
        cfg.input_csv_path().display()
    );

    let engineered = apply_feature_engineering(&dataset)?;
    validate_contract(&engineered, &spec, log_range_warning)?;

    // Metadata reflects the final, validated dataset.
    let metadata = build_metadata(&engineered, cfg, &spec);

    std::fs::create_dir_all(&cfg.cleaned_dir)
        .with_context(|| format!("creating output directory {}", cfg.cleaned_dir.display()))?;

    let dataset_path = cfg.parquet_path();
    writer::write_parquet(&engineered, &dataset_path)?;

    let csv_path = if export_csv {
        let path = cfg.csv_path();
        writer::write_csv(&engineered, &path)?;
        Some(path)
    } else {
        None
    };

    let metadata_path = cfg.metadata_path();
    write_metadata(&metadata, &metadata_path)?;

    log::info!(
        "run complete: {} rows x {} columns persisted",
        engineered.row_count(),
        engineered.column_count()
    );
    Ok(RunSummary {
        dataset_path,
        metadata_path,
        csv_path,
        row_count: engineered.row_count(),
        column_count: engineered.column_count(),
    })
}
