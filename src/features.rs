use anyhow::{Context, Result, bail};

use crate::data::model::{Column, Dataset};

// ---------------------------------------------------------------------------
// Binning rules
// ---------------------------------------------------------------------------

/// One interval of an ordered binning table, evaluated top to bottom.
#[derive(Debug, Clone, Copy)]
pub struct BinRule {
    pub lower: f64,
    pub upper: f64,
    pub inclusive_low: bool,
    pub inclusive_high: bool,
    pub label: &'static str,
}

impl BinRule {
    fn contains(&self, value: f64) -> bool {
        let above = if self.inclusive_low {
            value >= self.lower
        } else {
            value > self.lower
        };
        let below = if self.inclusive_high {
            value <= self.upper
        } else {
            value < self.upper
        };
        above && below
    }
}

/// Label for values that fall outside every bin.  Kept as a real category
/// rather than a null so the downstream null check stays meaningful and
/// out-of-range rows survive to the soft range warnings.
pub const OUT_OF_RANGE_LABEL: &str = "out of range";

/// Age buckets: right-closed intervals over edges 0, 29, 39, 49, 59, 120.
pub const AGE_BINS: &[BinRule] = &[
    BinRule { lower: 0.0, upper: 29.0, inclusive_low: false, inclusive_high: true, label: "<30" },
    BinRule { lower: 29.0, upper: 39.0, inclusive_low: false, inclusive_high: true, label: "30-39" },
    BinRule { lower: 39.0, upper: 49.0, inclusive_low: false, inclusive_high: true, label: "40-49" },
    BinRule { lower: 49.0, upper: 59.0, inclusive_low: false, inclusive_high: true, label: "50-59" },
    BinRule { lower: 59.0, upper: 120.0, inclusive_low: false, inclusive_high: true, label: "60+" },
];

/// BMI buckets: left-closed intervals over edges 0, 18.5, 25, 30, 100.
pub const BMI_BINS: &[BinRule] = &[
    BinRule { lower: 0.0, upper: 18.5, inclusive_low: true, inclusive_high: false, label: "underweight" },
    BinRule { lower: 18.5, upper: 25.0, inclusive_low: true, inclusive_high: false, label: "normal" },
    BinRule { lower: 25.0, upper: 30.0, inclusive_low: true, inclusive_high: false, label: "overweight" },
    BinRule { lower: 30.0, upper: 100.0, inclusive_low: true, inclusive_high: false, label: "obese" },
];

/// First matching rule wins; anything else is [`OUT_OF_RANGE_LABEL`].
pub fn bin_label(value: f64, rules: &[BinRule]) -> &'static str {
    rules
        .iter()
        .find(|r| r.contains(value))
        .map_or(OUT_OF_RANGE_LABEL, |r| r.label)
}

// ---------------------------------------------------------------------------
// Feature engineering
// ---------------------------------------------------------------------------

/// Derive the engineered columns from `Age`, `BMI`, `Glucose`, and
/// `Pregnancies`, returning a new dataset with the originals untouched and
/// four columns appended: `AgeGroup`, `BMICategory`, `Glucose_BMI`,
/// `Pregnancies_Age`.
///
/// Null inputs propagate to null outputs row-wise; the validator's hard null
/// check rejects them afterwards.
pub fn apply_feature_engineering(input: &Dataset) -> Result<Dataset> {
    let age = numeric_column(input, "Age")?;
    let bmi = numeric_column(input, "BMI")?;
    let glucose = numeric_column(input, "Glucose")?;
    let pregnancies = numeric_column(input, "Pregnancies")?;

    let age_group: Vec<Option<String>> = age
        .iter()
        .map(|v| v.map(|a| bin_label(a, AGE_BINS).to_string()))
        .collect();
    let bmi_category: Vec<Option<String>> = bmi
        .iter()
        .map(|v| v.map(|b| bin_label(b, BMI_BINS).to_string()))
        .collect();
    let glucose_bmi: Vec<Option<f64>> = glucose
        .iter()
        .zip(&bmi)
        .map(|(g, b)| g.zip(*b).map(|(g, b)| g * b))
        .collect();
    let pregnancies_age: Vec<Option<f64>> = pregnancies
        .iter()
        .zip(&age)
        .map(|(p, a)| p.zip(*a).map(|(p, a)| p / (a + 1.0)))
        .collect();

    let mut out = input.clone();
    out.push_column("AgeGroup", Column::Str(age_group))?;
    out.push_column("BMICategory", Column::Str(bmi_category))?;
    out.push_column("Glucose_BMI", Column::Float(glucose_bmi))?;
    out.push_column("Pregnancies_Age", Column::Float(pregnancies_age))?;
    Ok(out)
}

/// Per-row f64 view of a column that must exist and be numeric.
fn numeric_column(dataset: &Dataset, name: &str) -> Result<Vec<Option<f64>>> {
    let col = dataset
        .column(name)
        .with_context(|| format!("dataset missing column '{name}' required for feature engineering"))?;
    if let Column::Str(_) = col {
        bail!("column '{name}' must be numeric, got {}", col.type_name());
    }
    Ok((0..col.len()).map(|row| col.f64_at(row)).collect())
}
