// Copyright 2025 the Botplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scalar values and the uniform column map.

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

/// A single JSON scalar cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing value (`null`).
    Null,
    /// A boolean.
    Bool(bool),
    /// Any JSON number.
    Number(f64),
    /// A string.
    Text(String),
}

impl Value {
    /// Returns the numeric value, if this cell is a finite number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) if v.is_finite() => Some(*v),
            _ => None,
        }
    }

    /// Returns `true` for `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the category label used when this cell lands on a discrete scale.
    ///
    /// Integral numbers print without a decimal point so `2024` and `2024.0` map to the
    /// same category. `null` has no category.
    pub fn category(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Bool(b) => Some(b.to_string()),
            Self::Number(v) => Some(number_label(*v)),
            Self::Text(s) => Some(s.clone()),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

fn number_label(v: f64) -> String {
    if v.is_finite() && v.abs() < 1e15 {
        #[allow(clippy::cast_possible_truncation, reason = "bounded well inside the i64 range")]
        let i = v as i64;
        if i as f64 == v {
            return format!("{i}");
        }
    }
    format!("{v}")
}

/// How a column's values can be placed on a scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    /// Every non-null cell is a number (and there is at least one).
    Numeric,
    /// At least one non-null cell is a string or boolean.
    Categorical,
    /// No rows, or only `null` cells.
    Empty,
}

/// Column name to values, all columns the same length.
///
/// Columns are kept ordered by name so iteration (and every error message listing column
/// names) is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnTable {
    columns: BTreeMap<String, Vec<Value>>,
}

impl ColumnTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a column.
    #[must_use]
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<Value>>,
    ) -> Self {
        self.insert(name, values.into_iter().map(Into::into).collect());
        self
    }

    /// Adds or replaces a column.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<Value>) {
        self.columns.insert(name.into(), values);
    }

    /// Returns the values of `name`.
    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Returns `true` if `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Column names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows: the length of the longest column.
    ///
    /// For a table that passed [`ColumnTable::check_lengths`] every column has this length.
    pub fn row_count(&self) -> usize {
        self.columns.values().map(Vec::len).max().unwrap_or(0)
    }

    /// Verifies every column has the same length.
    ///
    /// On mismatch returns the first column (by name) whose length differs from the first
    /// column, as `(expected, column, actual)`.
    pub fn check_lengths(&self) -> Result<(), (usize, &str, usize)> {
        let mut iter = self.columns.iter();
        let Some((_, first)) = iter.next() else {
            return Ok(());
        };
        let expected = first.len();
        for (name, values) in iter {
            if values.len() != expected {
                return Err((expected, name, values.len()));
            }
        }
        Ok(())
    }

    /// Returns the numeric value at `(row, col)`.
    pub fn f64(&self, row: usize, col: &str) -> Option<f64> {
        self.columns.get(col)?.get(row)?.as_f64()
    }

    /// Returns the category label at `(row, col)`.
    pub fn category(&self, row: usize, col: &str) -> Option<String> {
        self.columns.get(col)?.get(row)?.category()
    }

    /// Classifies a column. Missing columns are [`ColumnKind::Empty`].
    pub fn kind(&self, col: &str) -> ColumnKind {
        let Some(values) = self.columns.get(col) else {
            return ColumnKind::Empty;
        };
        let mut any_number = false;
        for v in values {
            match v {
                Value::Null => {}
                Value::Number(_) => any_number = true,
                Value::Bool(_) | Value::Text(_) => return ColumnKind::Categorical,
            }
        }
        if any_number {
            ColumnKind::Numeric
        } else {
            ColumnKind::Empty
        }
    }

    /// Returns the index of the first cell that is neither a number nor `null`.
    pub fn first_non_numeric(&self, col: &str) -> Option<(usize, &Value)> {
        self.columns
            .get(col)?
            .iter()
            .enumerate()
            .find(|(_, v)| !matches!(v, Value::Null | Value::Number(_)))
    }
}
