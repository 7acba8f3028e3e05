//! Columnar dataset model
//!
//! A `Dataset` is an ordered collection of named columns sharing one row
//! count. The column set is the explicit schema discovered at flatten time:
//! each column is either numeric or categorical, decided from the values
//! observed across the batch. Column order is insertion order, so a given
//! batch always produces the same layout.

use rustc_hash::FxHashMap;

/// The values of one column, typed by kind
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    /// Numeric values, `None` marking a missing cell
    Numeric(Vec<Option<f64>>),
    /// Categorical (text) values, `None` marking a missing cell
    Categorical(Vec<Option<String>>),
}

impl ColumnData {
    /// Number of rows in the column
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(values) => values.len(),
            Self::Categorical(values) => values.len(),
        }
    }

    /// Whether the column has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of non-missing cells
    #[must_use]
    pub fn non_missing_count(&self) -> usize {
        match self {
            Self::Numeric(values) => values.iter().filter(|v| v.is_some()).count(),
            Self::Categorical(values) => values.iter().filter(|v| v.is_some()).count(),
        }
    }
}

/// One named column of a dataset
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name, unique within the dataset
    pub name: String,
    /// Column values
    pub data: ColumnData,
}

/// A table of flattened health records
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: Vec<Column>,
    index: FxHashMap<String, usize>,
    rows: usize,
}

impl Dataset {
    /// Create an empty dataset with a fixed row count
    #[must_use]
    pub fn with_rows(rows: usize) -> Self {
        Self {
            columns: Vec::new(),
            index: FxHashMap::default(),
            rows,
        }
    }

    /// Number of rows
    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.rows
    }

    /// Number of columns
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Append a column. Panics in debug builds if the row count disagrees;
    /// replaces any existing column with the same name.
    pub fn push_column(&mut self, name: impl Into<String>, data: ColumnData) {
        let name = name.into();
        debug_assert_eq!(data.len(), self.rows, "column {name} has wrong row count");
        if let Some(&position) = self.index.get(&name) {
            self.columns[position].data = data;
        } else {
            self.index.insert(name.clone(), self.columns.len());
            self.columns.push(Column { name, data });
        }
    }

    /// Remove a column by name, keeping the order of the remaining columns
    pub fn remove_column(&mut self, name: &str) -> Option<Column> {
        let position = self.index.remove(name)?;
        let column = self.columns.remove(position);
        for (i, col) in self.columns.iter().enumerate().skip(position) {
            self.index.insert(col.name.clone(), i);
        }
        Some(column)
    }

    /// Look up a column by name
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.index.get(name).map(|&i| &self.columns[i])
    }

    /// Look up a numeric column's values by name
    #[must_use]
    pub fn numeric(&self, name: &str) -> Option<&[Option<f64>]> {
        match &self.column(name)?.data {
            ColumnData::Numeric(values) => Some(values),
            ColumnData::Categorical(_) => None,
        }
    }

    /// Look up a categorical column's values by name
    #[must_use]
    pub fn categorical(&self, name: &str) -> Option<&[Option<String>]> {
        match &self.column(name)?.data {
            ColumnData::Categorical(values) => Some(values),
            ColumnData::Numeric(_) => None,
        }
    }

    /// All columns in insertion order
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Names of all columns in insertion order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Names of numeric columns in insertion order
    pub fn numeric_column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().filter_map(|c| match c.data {
            ColumnData::Numeric(_) => Some(c.name.as_str()),
            ColumnData::Categorical(_) => None,
        })
    }

    /// Names of categorical columns in insertion order
    pub fn categorical_column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().filter_map(|c| match c.data {
            ColumnData::Categorical(_) => Some(c.name.as_str()),
            ColumnData::Numeric(_) => None,
        })
    }

    /// Non-missing values of a numeric column, in row order
    #[must_use]
    pub fn numeric_values(&self, name: &str) -> Option<Vec<f64>> {
        Some(self.numeric(name)?.iter().flatten().copied().collect())
    }
}

/// The two column-aligned representations built from one imputed batch
#[derive(Debug, Clone)]
pub struct DualRepresentation {
    /// Data in original units, clinically readable
    pub raw: Dataset,
    /// Data with every numeric column standardized to zero mean, unit variance
    pub scaled: Dataset,
}
