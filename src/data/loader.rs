use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, Float64Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::feature_spec::FeatureSpec;

use super::model::{Column, Dataset};

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Load a row-oriented CSV file with a header row into a [`Dataset`].
///
/// Cell types are detected per column: all-integer → `Int`, otherwise
/// all-numeric → `Float`, otherwise `Str`.  Empty cells become nulls in any
/// column type.
pub fn load_dataset_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        if record.len() != headers.len() {
            bail!(
                "CSV row {row_no}: {} fields, expected {}",
                record.len(),
                headers.len()
            );
        }
        for (col_idx, value) in record.iter().enumerate() {
            cells[col_idx].push(value.to_string());
        }
    }

    let columns = headers
        .into_iter()
        .zip(cells)
        .map(|(name, raw)| (name, infer_column(&raw)))
        .collect();
    Dataset::from_columns(columns)
}

/// Detect the narrowest type that fits every non-empty cell.
fn infer_column(raw: &[String]) -> Column {
    let trimmed: Vec<Option<&str>> = raw
        .iter()
        .map(|c| {
            let t = c.trim();
            (!t.is_empty()).then_some(t)
        })
        .collect();

    if trimmed.iter().flatten().all(|s| s.parse::<i64>().is_ok()) {
        Column::Int(
            trimmed
                .iter()
                .map(|c| c.and_then(|s| s.parse::<i64>().ok()))
                .collect(),
        )
    } else if trimmed.iter().flatten().all(|s| s.parse::<f64>().is_ok()) {
        Column::Float(
            trimmed
                .iter()
                .map(|c| c.and_then(|s| s.parse::<f64>().ok()))
                .collect(),
        )
    } else {
        Column::Str(trimmed.iter().map(|c| c.map(str::to_string)).collect())
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file into a [`Dataset`].  Used to re-read what
/// [`super::writer::write_parquet`] produced; supports the same Int64 /
/// Float64 / Utf8 column types.
pub fn load_dataset_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening parquet file {}", path.display()))?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let schema = builder.schema().clone();
    let reader = builder.build().context("building parquet reader")?;

    let mut columns: Vec<(String, Column)> = Vec::with_capacity(schema.fields().len());
    for field in schema.fields() {
        let col = match field.data_type() {
            DataType::Int64 => Column::Int(Vec::new()),
            DataType::Float64 => Column::Float(Vec::new()),
            DataType::Utf8 | DataType::LargeUtf8 => Column::Str(Vec::new()),
            other => bail!("column '{}': unsupported parquet type {other:?}", field.name()),
        };
        columns.push((field.name().clone(), col));
    }

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for (idx, (name, col)) in columns.iter_mut().enumerate() {
            let array = batch.column(idx);
            match col {
                Column::Int(v) => {
                    let arr = array
                        .as_any()
                        .downcast_ref::<Int64Array>()
                        .with_context(|| format!("column '{name}': expected Int64Array"))?;
                    v.extend(arr.iter());
                }
                Column::Float(v) => {
                    let arr = array
                        .as_any()
                        .downcast_ref::<Float64Array>()
                        .with_context(|| format!("column '{name}': expected Float64Array"))?;
                    v.extend(arr.iter());
                }
                Column::Str(v) => {
                    let arr = array
                        .as_any()
                        .downcast_ref::<StringArray>()
                        .with_context(|| format!("column '{name}': expected StringArray"))?;
                    v.extend(arr.iter().map(|c| c.map(str::to_string)));
                }
            }
        }
    }

    Dataset::from_columns(columns)
}

// ---------------------------------------------------------------------------
// Feature-spec loader
// ---------------------------------------------------------------------------

/// Load the feature specification JSON document.
pub fn load_feature_spec(path: &Path) -> Result<FeatureSpec> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading feature spec {}", path.display()))?;
    serde_json::from_str(&text).context("parsing feature spec JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str, ext: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::Builder::new().suffix(ext).tempfile().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn csv_type_detection_per_column() {
        let f = write_temp(
            "Pregnancies,BMI,Label\n6,33.6,pos\n1,26.6,neg\n8,23.3,pos\n",
            ".csv",
        );
        let ds = load_dataset_csv(f.path()).unwrap();
        assert_eq!(ds.row_count(), 3);
        assert_eq!(
            ds.column("Pregnancies").unwrap(),
            &Column::Int(vec![Some(6), Some(1), Some(8)])
        );
        assert_eq!(
            ds.column("BMI").unwrap(),
            &Column::Float(vec![Some(33.6), Some(26.6), Some(23.3)])
        );
        assert_eq!(ds.column("Label").unwrap().type_name(), "str");
    }

    #[test]
    fn csv_empty_cells_become_nulls() {
        let f = write_temp("Glucose,BMI\n148,33.6\n,26.6\n", ".csv");
        let ds = load_dataset_csv(f.path()).unwrap();
        assert_eq!(
            ds.column("Glucose").unwrap(),
            &Column::Int(vec![Some(148), None])
        );
    }

    #[test]
    fn csv_one_fractional_cell_makes_the_column_float() {
        let f = write_temp("Age\n50\n31.5\n", ".csv");
        let ds = load_dataset_csv(f.path()).unwrap();
        assert_eq!(
            ds.column("Age").unwrap(),
            &Column::Float(vec![Some(50.0), Some(31.5)])
        );
    }

    #[test]
    fn missing_csv_is_an_error() {
        let err = load_dataset_csv(Path::new("no/such/file.csv")).unwrap_err();
        assert!(err.to_string().contains("opening CSV"));
    }

    #[test]
    fn feature_spec_parses_known_and_extra_keys() {
        let f = write_temp(
            r#"{
                "target": "Outcome",
                "numeric_features": ["Glucose", "BMI"],
                "categorical_features": ["AgeGroup"],
                "source": "cleaning step v3"
            }"#,
            ".json",
        );
        let spec = load_feature_spec(f.path()).unwrap();
        assert_eq!(spec.target, "Outcome");
        assert_eq!(spec.numeric_features, vec!["Glucose", "BMI"]);
        assert_eq!(spec.extra["source"], "cleaning step v3");
    }

    #[test]
    fn malformed_feature_spec_is_a_parse_error() {
        let f = write_temp("{ not json", ".json");
        let err = load_feature_spec(f.path()).unwrap_err();
        assert!(err.to_string().contains("parsing feature spec"));
    }
}
