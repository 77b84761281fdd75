use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use super::model::{Column, Dataset};

// ---------------------------------------------------------------------------
// Parquet writer
// ---------------------------------------------------------------------------

/// Persist the dataset as a Parquet file, one Arrow column per dataset
/// column, order preserved.  Nulls map to Arrow nulls.
pub fn write_parquet(dataset: &Dataset, path: &Path) -> Result<()> {
    let mut fields = Vec::with_capacity(dataset.column_count());
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(dataset.column_count());

    for (name, col) in dataset.iter() {
        let (data_type, array): (DataType, ArrayRef) = match col {
            Column::Int(v) => (DataType::Int64, Arc::new(Int64Array::from(v.clone()))),
            Column::Float(v) => (DataType::Float64, Arc::new(Float64Array::from(v.clone()))),
            Column::Str(v) => (
                DataType::Utf8,
                Arc::new(v.iter().map(|c| c.as_deref()).collect::<StringArray>()),
            ),
        };
        fields.push(Field::new(name, data_type, true));
        arrays.push(array);
    }

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), arrays).context("building record batch")?;

    let file = std::fs::File::create(path)
        .with_context(|| format!("creating parquet file {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV writer
// ---------------------------------------------------------------------------

/// Persist the dataset as CSV with a header row.  Same columns, values, and
/// row order as the parquet output; nulls become empty cells.
pub fn write_csv(dataset: &Dataset, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating CSV file {}", path.display()))?;

    writer
        .write_record(dataset.column_names())
        .context("writing CSV header")?;

    for row in 0..dataset.row_count() {
        let record: Vec<String> = dataset.iter().map(|(_, col)| cell_text(col, row)).collect();
        writer
            .write_record(&record)
            .with_context(|| format!("writing CSV row {row}"))?;
    }
    writer.flush().context("flushing CSV writer")?;
    Ok(())
}

fn cell_text(col: &Column, row: usize) -> String {
    match col {
        Column::Int(v) => v[row].map_or(String::new(), |i| i.to_string()),
        Column::Float(v) => v[row].map_or(String::new(), |f| f.to_string()),
        Column::Str(v) => v[row].clone().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_dataset_parquet;

    fn sample_dataset() -> Dataset {
        Dataset::from_columns(vec![
            (
                "Pregnancies".into(),
                Column::Int(vec![Some(6), Some(1), None]),
            ),
            (
                "BMI".into(),
                Column::Float(vec![Some(33.6), Some(26.6), Some(23.3)]),
            ),
            (
                "AgeGroup".into(),
                Column::Str(vec![Some("50-59".into()), Some("30-39".into()), None]),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn parquet_round_trip_preserves_everything() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.parquet");
        let ds = sample_dataset();

        write_parquet(&ds, &path).unwrap();
        let reloaded = load_dataset_parquet(&path).unwrap();

        assert_eq!(reloaded, ds);
    }

    #[test]
    fn csv_output_has_header_and_empty_cells_for_nulls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        write_csv(&sample_dataset(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Pregnancies,BMI,AgeGroup");
        assert_eq!(lines[1], "6,33.6,50-59");
        assert_eq!(lines[3], ",23.3,");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn unwritable_destination_propagates_an_error() {
        let ds = sample_dataset();
        let err = write_parquet(&ds, Path::new("no/such/dir/out.parquet")).unwrap_err();
        assert!(err.to_string().contains("creating parquet file"));
    }
}
