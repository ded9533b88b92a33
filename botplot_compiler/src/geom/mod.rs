// Copyright 2025 the Botplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The geom protocol and registry.
//!
//! A geom turns one layer's rows into primitives. It is stateless: every call gets the
//! layer, the data and (for `compile`) the resolved scales and layout context. Geoms are
//! registered by name in a [`GeomRegistry`], which is populated once and then only read.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use botplot_core::{ColumnTable, Layer, Primitive, Value};
use botplot_text::TextMeasurer;
use hashbrown::HashMap;
use kurbo::Rect;

use crate::error::CompileError;
use crate::format::LabelFormat;
use crate::scale::{ResolvedScales, ScaleHint};
use crate::theme::Theme;

mod bar;
mod line;
mod scatter;
mod value_label;
mod waterfall;

pub use bar::Bar;
pub use line::Line;
pub use scatter::Scatter;
pub use waterfall::Waterfall;

const NULL: &Value = &Value::Null;

/// One layer and the data it reads.
#[derive(Clone, Copy, Debug)]
pub struct LayerInput<'a> {
    /// Position of the layer in the spec.
    pub index: usize,
    /// The layer.
    pub layer: &'a Layer,
    /// The plot's data.
    pub data: &'a ColumnTable,
}

impl<'a> LayerInput<'a> {
    /// Values of a bound column; empty if the column is absent.
    pub fn column(&self, name: &str) -> &'a [Value] {
        self.data.column(name).unwrap_or_default()
    }

    /// Values of the color column, if the layer binds one.
    pub fn color_column(&self) -> Option<&'a [Value]> {
        self.layer.color.as_deref().map(|c| self.column(c))
    }

    /// The color value at `row`, or `Null` without a color binding.
    pub fn color_at(&self, row: usize) -> &'a Value {
        self.color_column()
            .and_then(|c| c.get(row))
            .unwrap_or(NULL)
    }

    /// Fails unless every non-null cell of the column bound to `role` is a number.
    pub fn require_numeric(&self, geom: &str, role: &str, column: &str) -> Result<(), CompileError> {
        match self.data.first_non_numeric(column) {
            None => Ok(()),
            Some((row, value)) => Err(CompileError::IncompatibleColumn {
                layer: self.index,
                geom: geom.to_string(),
                role: role.to_string(),
                column: column.to_string(),
                expected: "numeric".to_string(),
                found: describe_value(value),
                row,
            }),
        }
    }
}

fn describe_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::Text(s) => format!("string \"{s}\""),
    }
}

/// Everything a geom may read while compiling, besides its layer and the scales.
#[derive(Clone, Copy)]
pub struct LayerContext<'a> {
    /// The resolved theme.
    pub theme: &'a Theme,
    /// The plot area in canvas pixels.
    pub plot_area: Rect,
    /// Font metrics.
    pub measurer: &'a dyn TextMeasurer,
    /// Parsed value label template, if the layer has one.
    pub label_format: Option<&'a LabelFormat>,
}

impl fmt::Debug for LayerContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerContext")
            .field("theme", &self.theme.name)
            .field("plot_area", &self.plot_area)
            .field("label_format", &self.label_format)
            .finish_non_exhaustive()
    }
}

/// A chart type.
pub trait Geom: fmt::Debug + Send + Sync {
    /// Registry name, e.g. `"bar"`.
    fn name(&self) -> &str;

    /// Checks the layer's columns before any scale is resolved.
    ///
    /// Referenced columns are already known to exist.
    fn validate(&self, input: &LayerInput<'_>) -> Result<(), CompileError>;

    /// What this layer contributes to the shared scales.
    fn scale_hint(&self, input: &LayerInput<'_>) -> ScaleHint;

    /// Emits positioned primitives. Must be deterministic.
    fn compile(
        &self,
        input: &LayerInput<'_>,
        scales: &ResolvedScales,
        ctx: &LayerContext<'_>,
    ) -> Vec<Primitive>;
}

/// Name to geom lookup. Append-only.
#[derive(Debug, Default)]
pub struct GeomRegistry {
    geoms: HashMap<String, Box<dyn Geom>>,
}

impl GeomRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding `scatter`, `line`, `bar` and `waterfall`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        let builtins: [Box<dyn Geom>; 4] =
            [Box::new(Scatter), Box::new(Line), Box::new(Bar), Box::new(Waterfall)];
        for geom in builtins {
            let name = geom.name().to_string();
            registry.geoms.insert(name, geom);
        }
        registry
    }

    /// The process-wide registry of builtin geoms.
    #[cfg(feature = "std")]
    pub fn global() -> &'static Self {
        static GLOBAL: std::sync::OnceLock<GeomRegistry> = std::sync::OnceLock::new();
        GLOBAL.get_or_init(Self::with_builtins)
    }

    /// Adds a geom. Fails if the name is taken.
    pub fn register(&mut self, geom: impl Geom + 'static) -> Result<(), CompileError> {
        let name = geom.name().to_string();
        if self.geoms.contains_key(&name) {
            return Err(CompileError::DuplicateGeom { name });
        }
        log::debug!("registered geom '{name}'");
        self.geoms.insert(name, Box::new(geom));
        Ok(())
    }

    /// Looks up a geom by name.
    pub fn get(&self, name: &str) -> Option<&dyn Geom> {
        self.geoms.get(name).map(|g| &**g)
    }

    /// Looks up a geom, failing with the list of registered names.
    pub fn lookup(&self, name: &str) -> Result<&dyn Geom, CompileError> {
        self.get(name).ok_or_else(|| CompileError::UnknownGeom {
            name: name.to_string(),
            registered: self.names(),
        })
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.geoms.keys().cloned().collect();
        names.sort();
        names
    }
}
