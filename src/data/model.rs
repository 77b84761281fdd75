use anyhow::{Result, bail};

// ---------------------------------------------------------------------------
// Column – one named column's cells
// ---------------------------------------------------------------------------

/// A single column of the dataset.  All cells share one primitive type;
/// `None` marks a missing value.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Int(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Str(Vec<Option<String>>),
}

impl Column {
    /// Number of cells (rows) in the column.
    pub fn len(&self) -> usize {
        match self {
            Column::Int(v) => v.len(),
            Column::Float(v) => v.len(),
            Column::Str(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn null_count(&self) -> usize {
        match self {
            Column::Int(v) => v.iter().filter(|c| c.is_none()).count(),
            Column::Float(v) => v.iter().filter(|c| c.is_none()).count(),
            Column::Str(v) => v.iter().filter(|c| c.is_none()).count(),
        }
    }

    pub fn has_nulls(&self) -> bool {
        self.null_count() > 0
    }

    /// Numeric view of a single cell.  `None` for nulls, out-of-bounds rows,
    /// and string columns.
    pub fn f64_at(&self, row: usize) -> Option<f64> {
        match self {
            Column::Int(v) => v.get(row).copied().flatten().map(|i| i as f64),
            Column::Float(v) => v.get(row).copied().flatten(),
            Column::Str(_) => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Column::Int(_) => "int",
            Column::Float(_) => "float",
            Column::Str(_) => "str",
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – named columns over one fixed row set
// ---------------------------------------------------------------------------

/// In-memory table of named columns, row-aligned.  Rows have no identity
/// beyond their position; column order is insertion order and is preserved
/// through persistence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<(String, Column)>,
}

impl Dataset {
    pub fn new() -> Self {
        Dataset::default()
    }

    /// Build a dataset from pre-assembled columns, enforcing equal lengths
    /// and unique names.
    pub fn from_columns(columns: Vec<(String, Column)>) -> Result<Self> {
        let mut ds = Dataset::new();
        for (name, col) in columns {
            ds.push_column(name, col)?;
        }
        Ok(ds)
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |(_, c)| c.len())
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Ordered column names.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|(n, _)| n.clone()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|(n, _)| n == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }

    /// Iterate columns in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(n, c)| (n.as_str(), c))
    }

    /// Append a column.  Fails on a duplicate name or, for a non-empty
    /// dataset, a row-count mismatch.
    pub fn push_column(&mut self, name: impl Into<String>, column: Column) -> Result<()> {
        let name = name.into();
        if self.has_column(&name) {
            bail!("duplicate column '{name}'");
        }
        if !self.columns.is_empty() && column.len() != self.row_count() {
            bail!(
                "column '{name}' has {} rows, expected {}",
                column.len(),
                self.row_count()
            );
        }
        self.columns.push((name, column));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_column_dataset() -> Dataset {
        Dataset::from_columns(vec![
            ("a".into(), Column::Int(vec![Some(1), Some(2), None])),
            ("b".into(), Column::Float(vec![Some(0.5), None, Some(2.5)])),
        ])
        .unwrap()
    }

    #[test]
    fn counts_and_lookup() {
        let ds = two_column_dataset();
        assert_eq!(ds.row_count(), 3);
        assert_eq!(ds.column_count(), 2);
        assert_eq!(ds.column_names(), vec!["a", "b"]);
        assert!(ds.has_column("a"));
        assert!(!ds.has_column("c"));
    }

    #[test]
    fn null_scan() {
        let ds = two_column_dataset();
        assert_eq!(ds.column("a").unwrap().null_count(), 1);
        assert!(ds.column("b").unwrap().has_nulls());
        let full = Column::Str(vec![Some("x".into()), Some("y".into())]);
        assert!(!full.has_nulls());
    }

    #[test]
    fn numeric_view() {
        let ds = two_column_dataset();
        assert_eq!(ds.column("a").unwrap().f64_at(0), Some(1.0));
        assert_eq!(ds.column("a").unwrap().f64_at(2), None);
        assert_eq!(ds.column("b").unwrap().f64_at(2), Some(2.5));
        let s = Column::Str(vec![Some("x".into())]);
        assert_eq!(s.f64_at(0), None);
    }

    #[test]
    fn push_column_rejects_length_mismatch() {
        let mut ds = two_column_dataset();
        let err = ds.push_column("c", Column::Int(vec![Some(1)])).unwrap_err();
        assert!(err.to_string().contains("expected 3"));
    }

    #[test]
    fn push_column_rejects_duplicate_name() {
        let mut ds = two_column_dataset();
        let err = ds
            .push_column("a", Column::Int(vec![None, None, None]))
            .unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }
}
