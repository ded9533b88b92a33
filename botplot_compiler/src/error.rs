// Copyright 2025 the Botplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structured compile errors.
//!
//! Every failure names the offending identifier (column, geom, theme, color pair) so it can
//! be fixed without reading compiler source.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use serde::Serialize;

use crate::scale::ScaleKind;

/// Stable, machine-readable error tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    /// The spec could not be parsed or has an out-of-range setting.
    InvalidSpec,
    /// A layer references a column absent from the data.
    MissingColumn,
    /// Data columns have different lengths.
    RaggedColumns,
    /// A column holds values a geom cannot place.
    IncompatibleColumn,
    /// A layer names a geom that is not registered.
    UnknownGeom,
    /// A geom name was registered twice.
    DuplicateGeom,
    /// The spec names a theme that does not exist.
    UnknownTheme,
    /// A theme color is not a valid hex color.
    InvalidColor,
    /// Layers disagree on the scale kind of a shared axis.
    ScaleConflict,
    /// A color pair falls below its minimum contrast ratio.
    ContrastViolation,
}

impl ErrorKind {
    /// The kebab-case tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidSpec => "invalid-spec",
            Self::MissingColumn => "missing-column",
            Self::RaggedColumns => "ragged-columns",
            Self::IncompatibleColumn => "incompatible-column",
            Self::UnknownGeom => "unknown-geom",
            Self::DuplicateGeom => "duplicate-geom",
            Self::UnknownTheme => "unknown-theme",
            Self::InvalidColor => "invalid-color",
            Self::ScaleConflict => "scale-conflict",
            Self::ContrastViolation => "contrast-violation",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A compile failure. No partial plot is ever produced alongside one.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CompileError {
    /// The spec could not be parsed or holds an unusable setting.
    #[error("invalid spec: {message}")]
    InvalidSpec {
        /// What is wrong.
        message: String,
    },

    /// A layer references a column that is not in `data.columns`.
    #[error(
        "layer {layer} ({geom}): column '{column}' for {role} not found; available columns: {}",
        .available.join(", ")
    )]
    MissingColumn {
        /// Layer index.
        layer: usize,
        /// Layer geom name.
        geom: String,
        /// Binding role (`x`, `y`, `color`).
        role: String,
        /// The missing column name.
        column: String,
        /// Every column in the data, sorted.
        available: Vec<String>,
    },

    /// Data columns differ in length.
    #[error(
        "column '{column}' has {actual} values but column '{reference}' has {expected}; \
         all columns must be the same length"
    )]
    RaggedColumns {
        /// First column (by name), used as the reference length.
        reference: String,
        /// Reference length.
        expected: usize,
        /// Offending column.
        column: String,
        /// Offending length.
        actual: usize,
    },

    /// A column holds a value the geom cannot place on its scale.
    #[error(
        "layer {layer} ({geom}): column '{column}' for {role} must be {expected}, \
         found {found} at row {row}"
    )]
    IncompatibleColumn {
        /// Layer index.
        layer: usize,
        /// Layer geom name.
        geom: String,
        /// Binding role.
        role: String,
        /// Column name.
        column: String,
        /// What the geom needs (e.g. `numeric`).
        expected: String,
        /// The offending value, JSON-ish.
        found: String,
        /// Row of the offending value.
        row: usize,
    },

    /// A layer names an unregistered geom.
    #[error("unknown geom '{name}'; registered geoms: {}", .registered.join(", "))]
    UnknownGeom {
        /// The requested name.
        name: String,
        /// Every registered geom, sorted.
        registered: Vec<String>,
    },

    /// A geom name was registered twice.
    #[error("geom '{name}' is already registered")]
    DuplicateGeom {
        /// The duplicated name.
        name: String,
    },

    /// The spec names an unknown theme.
    #[error("unknown theme '{name}'; available themes: {}", .available.join(", "))]
    UnknownTheme {
        /// The requested name.
        name: String,
        /// Every theme name, sorted.
        available: Vec<String>,
    },

    /// A theme color failed to parse.
    #[error("theme field '{field}': invalid color '{value}' ({reason})")]
    InvalidColor {
        /// Theme field, e.g. `text` or `palette[2]`.
        field: String,
        /// The rejected value.
        value: String,
        /// Why the parser rejected it.
        reason: String,
    },

    /// Two layers need different scale kinds on the same axis.
    #[error(
        "{axis} scale conflict: layer {first_layer} ({first_geom}) is {first_kind} \
         but layer {second_layer} ({second_geom}) is {second_kind}"
    )]
    ScaleConflict {
        /// Axis role (`x`, `y`, `color`).
        axis: String,
        /// First contributing layer.
        first_layer: usize,
        /// Its geom.
        first_geom: String,
        /// Its scale kind.
        first_kind: ScaleKind,
        /// First disagreeing layer.
        second_layer: usize,
        /// Its geom.
        second_geom: String,
        /// Its scale kind.
        second_kind: ScaleKind,
    },

    /// A color pair is below its minimum contrast.
    #[error(
        "contrast violation: {element} {foreground} on {background} is {ratio:.2}:1, \
         minimum {minimum:.1}:1"
    )]
    ContrastViolation {
        /// What the foreground color is used for.
        element: String,
        /// Foreground color, `#RRGGBB`.
        foreground: String,
        /// Background color, `#RRGGBB`.
        background: String,
        /// Measured contrast ratio.
        ratio: f64,
        /// Required contrast ratio.
        minimum: f64,
    },
}

impl CompileError {
    /// The machine-readable tag for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidSpec { .. } => ErrorKind::InvalidSpec,
            Self::MissingColumn { .. } => ErrorKind::MissingColumn,
            Self::RaggedColumns { .. } => ErrorKind::RaggedColumns,
            Self::IncompatibleColumn { .. } => ErrorKind::IncompatibleColumn,
            Self::UnknownGeom { .. } => ErrorKind::UnknownGeom,
            Self::DuplicateGeom { .. } => ErrorKind::DuplicateGeom,
            Self::UnknownTheme { .. } => ErrorKind::UnknownTheme,
            Self::InvalidColor { .. } => ErrorKind::InvalidColor,
            Self::ScaleConflict { .. } => ErrorKind::ScaleConflict,
            Self::ContrastViolation { .. } => ErrorKind::ContrastViolation,
        }
    }

    pub(crate) fn invalid_spec(message: impl Into<String>) -> Self {
        Self::InvalidSpec {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for CompileError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_spec(alloc::format!("{err}"))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;
    use alloc::vec;

    use super::*;

    #[test]
    fn missing_column_lists_available_columns() {
        let err = CompileError::MissingColumn {
            layer: 0,
            geom: "bar".into(),
            role: "y".into(),
            column: "y_col".into(),
            available: vec!["a".into(), "b".into()],
        };
        assert_eq!(err.kind(), ErrorKind::MissingColumn);
        assert_eq!(
            err.to_string(),
            "layer 0 (bar): column 'y_col' for y not found; available columns: a, b"
        );
    }

    #[test]
    fn kinds_serialize_kebab_case() {
        let json = serde_json::to_string(&ErrorKind::ContrastViolation).unwrap();
        assert_eq!(json, r#""contrast-violation""#);
        assert_eq!(ErrorKind::UnknownGeom.to_string(), "unknown-geom");
    }
}
