//! Tabular data model for chart requests.
//!
//! A [`Dataset`] is a fixed-schema table: named columns over a shared row
//! count. It can be assembled column-wise or row-wise; row-wise assembly
//! enforces that every record carries the same fields.

use crate::error::{Error, Result};
use std::collections::HashMap;
use trueno::Vector;

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// A numeric value.
    Number(f32),
    /// A categorical text value.
    Text(String),
    /// A missing value.
    Null,
}

impl Value {
    /// Get as f32, or None if not a number.
    #[must_use]
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as string slice, or None if not text.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Whether this value is missing.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Display label used for level names and facet strips.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Value::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e7 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            Value::Text(s) => s.clone(),
            Value::Null => "NA".to_string(),
        }
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Number(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(v as f32)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// Kind of a dataset column, inferred from its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldKind {
    /// Numeric (every non-null value is a number).
    Numeric,
    /// Categorical (at least one text value).
    Categorical,
}

/// A fixed-schema table of named columns.
///
/// Column insertion order is preserved, and level enumeration is
/// first-appearance ordered, so renders over the same dataset are
/// deterministic.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dataset {
    /// Column names in insertion order.
    names: Vec<String>,
    /// Column data keyed by column name.
    columns: HashMap<String, Vec<Value>>,
    /// Number of rows.
    n_rows: usize,
}

impl Dataset {
    /// Create a new empty dataset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a numeric column.
    pub fn add_numeric(&mut self, name: &str, data: &[f32]) {
        let values: Vec<Value> = data.iter().map(|&v| Value::Number(v)).collect();
        self.insert_column(name, values);
    }

    /// Add a categorical column.
    pub fn add_categorical(&mut self, name: &str, data: &[&str]) {
        let values: Vec<Value> = data.iter().map(|&s| Value::Text(s.to_string())).collect();
        self.insert_column(name, values);
    }

    /// Add a column of raw values.
    pub fn add_column(&mut self, name: &str, values: Vec<Value>) {
        self.insert_column(name, values);
    }

    fn insert_column(&mut self, name: &str, values: Vec<Value>) {
        if !self.columns.contains_key(name) {
            self.names.push(name.to_string());
        }
        self.n_rows = self.n_rows.max(values.len());
        self.columns.insert(name.to_string(), values);
    }

    /// Append one record.
    ///
    /// The first row fixes the schema; later rows must name exactly the
    /// same fields.
    ///
    /// # Errors
    ///
    /// Returns `SchemaMismatch` if the row introduces an unknown field or
    /// omits an established one.
    pub fn push_row(&mut self, row: &[(&str, Value)]) -> Result<()> {
        if self.names.is_empty() {
            for (name, _) in row {
                self.names.push((*name).to_string());
                self.columns.insert((*name).to_string(), Vec::new());
            }
        } else {
            for (name, _) in row {
                if !self.columns.contains_key(*name) {
                    return Err(Error::SchemaMismatch {
                        column: (*name).to_string(),
                    });
                }
            }
            if row.len() != self.names.len() {
                let missing = self
                    .names
                    .iter()
                    .find(|n| !row.iter().any(|(name, _)| *name == n.as_str()))
                    .cloned()
                    .unwrap_or_default();
                return Err(Error::SchemaMismatch { column: missing });
            }
        }

        for (name, value) in row {
            if let Some(col) = self.columns.get_mut(*name) {
                col.push(value.clone());
            }
        }
        self.n_rows += 1;
        Ok(())
    }

    /// Number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.names.len()
    }

    /// Whether the dataset has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    /// Whether a column exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Column names in insertion order.
    #[must_use]
    pub fn columns(&self) -> Vec<&str> {
        self.names.iter().map(String::as_str).collect()
    }

    /// Raw values of a column.
    #[must_use]
    pub fn values(&self, name: &str) -> Option<&[Value]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Inferred kind of a column.
    ///
    /// A column with any text value is categorical; otherwise numeric.
    #[must_use]
    pub fn field_kind(&self, name: &str) -> Option<FieldKind> {
        let col = self.columns.get(name)?;
        if col.iter().any(|v| matches!(v, Value::Text(_))) {
            Some(FieldKind::Categorical)
        } else {
            Some(FieldKind::Numeric)
        }
    }

    /// A column as row-aligned f32 values.
    ///
    /// Non-numeric cells become NaN so indices stay aligned with the other
    /// channels of the same record; renderers skip non-finite pairs.
    #[must_use]
    pub fn numeric(&self, name: &str) -> Option<Vec<f32>> {
        self.columns.get(name).map(|col| {
            col.iter()
                .map(|v| v.as_f32().unwrap_or(f32::NAN))
                .collect()
        })
    }

    /// Distinct labels of a column in first-appearance order.
    #[must_use]
    pub fn levels(&self, name: &str) -> Vec<String> {
        let mut seen = Vec::new();
        if let Some(col) = self.columns.get(name) {
            for value in col {
                let label = value.label();
                if !seen.contains(&label) {
                    seen.push(label);
                }
            }
        }
        seen
    }

    /// Min/max over the finite values of a numeric column.
    ///
    /// Reductions go through trueno's SIMD vector ops. Returns `None` for
    /// missing columns or columns without finite values.
    #[must_use]
    pub fn extent(&self, name: &str) -> Option<(f32, f32)> {
        let values = self.numeric(name)?;
        let finite: Vec<f32> = values.into_iter().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return None;
        }

        let vec = Vector::from_vec(finite);
        let min = vec.min().unwrap_or(f32::INFINITY);
        let max = vec.max().unwrap_or(f32::NEG_INFINITY);

        if min.is_finite() && max.is_finite() {
            Some((min, max))
        } else {
            None
        }
    }

    /// Extract the rows at `indices` into a new dataset with the same
    /// schema (used by facet partitioning).
    #[must_use]
    pub fn subset(&self, indices: &[usize]) -> Dataset {
        let mut out = Dataset::new();
        for name in &self.names {
            let col = &self.columns[name];
            let values: Vec<Value> = indices
                .iter()
                .filter_map(|&i| col.get(i).cloned())
                .collect();
            out.insert_column(name, values);
        }
        out.n_rows = indices.len();
        out
    }
}
