use thiserror::Error;

use crate::data::model::Dataset;
use crate::feature_spec::FeatureSpec;

// ---------------------------------------------------------------------------
// Hard checks – structural integrity, failure aborts the run
// ---------------------------------------------------------------------------

/// Structural violations of the upstream contract.  Any of these aborts the
/// run before persistence.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Columns required by the feature spec are absent; names are sorted.
    #[error("missing expected columns: {0:?}")]
    MissingColumns(Vec<String>),
    /// Null values found; column names in dataset order.
    #[error("nulls detected in columns: {0:?}")]
    NullColumns(Vec<String>),
}

// ---------------------------------------------------------------------------
// Soft checks – numeric plausibility, failure only warns
// ---------------------------------------------------------------------------

/// One soft range violation: `count` rows of `column` fell outside the
/// inclusive `[lo, hi]` bound.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeWarning {
    pub column: String,
    pub count: usize,
    pub lo: f64,
    pub hi: f64,
}

/// Plausibility bounds for the biomedical columns.  Real data legitimately
/// contains outliers, so these never abort.
pub const SOFT_RANGES: &[(&str, f64, f64)] = &[
    ("Glucose", 0.0, 300.0),
    ("BloodPressure", 30.0, 200.0),
    ("BMI", 10.0, 70.0),
    ("Age", 0.0, 120.0),
];

/// Default warning sink: route the payload through `log::warn!`.
pub fn log_range_warning(w: RangeWarning) {
    log::warn!(
        "range check for {}: {} rows outside {}-{} (allowed)",
        w.column,
        w.count,
        w.lo,
        w.hi
    );
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Validate the engineered dataset against the feature spec.
///
/// Hard checks run first: every spec-required column must be present and
/// every column (engineered ones included) must be fully non-null.  Soft
/// range checks then report violations through `warn` without affecting the
/// outcome; a range column absent from the dataset is skipped.
pub fn validate_contract(
    dataset: &Dataset,
    spec: &FeatureSpec,
    mut warn: impl FnMut(RangeWarning),
) -> Result<(), ValidationError> {
    let missing: Vec<String> = spec
        .expected_columns()
        .into_iter()
        .filter(|c| !dataset.has_column(c))
        .collect();
    if !missing.is_empty() {
        // BTreeSet iteration keeps the names sorted.
        return Err(ValidationError::MissingColumns(missing));
    }

    let null_columns: Vec<String> = dataset
        .iter()
        .filter(|(_, col)| col.has_nulls())
        .map(|(name, _)| name.to_string())
        .collect();
    if !null_columns.is_empty() {
        return Err(ValidationError::NullColumns(null_columns));
    }

    for &(name, lo, hi) in SOFT_RANGES {
        let Some(col) = dataset.column(name) else {
            continue;
        };
        let count = (0..col.len())
            .filter_map(|row| col.f64_at(row))
            .filter(|v| *v < lo || *v > hi)
            .count();
        if count > 0 {
            warn(RangeWarning {
                column: name.to_string(),
                count,
                lo,
                hi,
            });
        }
    }

    Ok(())
}
