// Copyright 2025 the Botplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The declarative plot description.
//!
//! A [`PlotSpec`] is a proposal: it is deserialized as-is and only checked by the compiler's
//! validation stage. The types here carry no behavior beyond defaults and builders.

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::value::ColumnTable;

/// Complete description of one plot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlotSpec {
    /// Column data shared by all layers.
    #[serde(default)]
    pub data: DataSpec,
    /// Layers, compiled in order.
    #[serde(default)]
    pub layers: Vec<Layer>,
    /// Title, subtitle, axis titles and footnote.
    #[serde(default)]
    pub labels: Labels,
    /// Legend visibility and side.
    #[serde(default)]
    pub legend: Legend,
    /// Canvas size in pixels.
    #[serde(default)]
    pub size: Size,
    /// Theme name or inline override.
    #[serde(default)]
    pub theme: ThemeRef,
}

impl PlotSpec {
    /// Parses a spec from its JSON wire format.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the spec back to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Creates a spec over the given data with default labels, legend, size and theme.
    pub fn new(columns: ColumnTable) -> Self {
        Self {
            data: DataSpec { columns },
            ..Self::default()
        }
    }

    /// Appends a layer.
    #[must_use]
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Sets the labels.
    #[must_use]
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// Sets the legend configuration.
    #[must_use]
    pub fn with_legend(mut self, legend: Legend) -> Self {
        self.legend = legend;
        self
    }

    /// Sets the canvas size.
    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.size = Size { width, height };
        self
    }

    /// Sets the theme.
    #[must_use]
    pub fn with_theme(mut self, theme: impl Into<ThemeRef>) -> Self {
        self.theme = theme.into();
        self
    }
}

/// Column data attached to a spec.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataSpec {
    /// Column name to values.
    #[serde(default)]
    pub columns: ColumnTable,
}

/// One chart-type instance bound to data columns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Layer {
    /// Registered geom name (`scatter`, `line`, `bar`, `waterfall`, ...).
    pub geom: String,
    /// Column bound to the x axis.
    pub x: String,
    /// Column bound to the y axis.
    pub y: String,
    /// Optional column bound to color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Draw per-datum value labels (bar-like geoms).
    #[serde(default)]
    pub labels: bool,
    /// Value label template, e.g. `"${:,.0f}"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_format: Option<String>,
}

impl Layer {
    /// Creates a layer with no color binding and no value labels.
    pub fn new(geom: impl Into<String>, x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            geom: geom.into(),
            x: x.into(),
            y: y.into(),
            color: None,
            labels: false,
            label_format: None,
        }
    }

    /// Binds a color column.
    #[must_use]
    pub fn with_color(mut self, column: impl Into<String>) -> Self {
        self.color = Some(column.into());
        self
    }

    /// Enables value labels, optionally with a format template.
    #[must_use]
    pub fn with_value_labels(mut self, format: Option<&str>) -> Self {
        self.labels = true;
        self.label_format = format.map(Into::into);
        self
    }

    /// Every `(role, column)` binding of this layer, in role order.
    pub fn bindings(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [("x", Some(self.x.as_str())), ("y", Some(self.y.as_str()))]
            .into_iter()
            .chain(core::iter::once(("color", self.color.as_deref())))
            .filter_map(|(role, col)| col.map(|c| (role, c)))
    }
}

/// Plot-level labels.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Labels {
    /// Plot title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Subtitle, drawn under the title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// X axis title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    /// Y axis title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    /// Footnote (source line), drawn under the plot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footnote: Option<String>,
}

/// Legend configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Legend {
    /// Whether to draw a legend when a layer has a color binding.
    #[serde(default = "default_true")]
    pub show: bool,
    /// Side of the canvas the legend occupies.
    #[serde(default)]
    pub position: LegendPosition,
}

impl Default for Legend {
    fn default() -> Self {
        Self {
            show: true,
            position: LegendPosition::Right,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Legend side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    /// Above the plot area.
    Top,
    /// Below the plot area.
    Bottom,
    /// Left of the plot area.
    Left,
    /// Right of the plot area.
    #[default]
    Right,
}

/// Canvas size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Size {
    /// Width in pixels.
    #[serde(default = "default_width")]
    pub width: f64,
    /// Height in pixels.
    #[serde(default = "default_height")]
    pub height: f64,
}

impl Default for Size {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

fn default_width() -> f64 {
    800.0
}

fn default_height() -> f64 {
    500.0
}

/// Theme selection: a preset name or an inline override of a preset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeRef {
    /// A registered theme name.
    Name(String),
    /// Field overrides applied on top of `base`.
    Override(ThemeOverride),
}

impl Default for ThemeRef {
    fn default() -> Self {
        Self::Name("default".into())
    }
}

impl From<&str> for ThemeRef {
    fn from(value: &str) -> Self {
        Self::Name(value.into())
    }
}

impl From<ThemeOverride> for ThemeRef {
    fn from(value: ThemeOverride) -> Self {
        Self::Override(value)
    }
}

/// Inline theme override. Unset fields inherit from `base`.
///
/// Colors are CSS color strings (hex, named, or `rgb()`); they are parsed by the
/// compiler so that a bad value is reported with its field name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[expect(missing_docs, reason = "fields mirror the resolved theme one to one")]
pub struct ThemeOverride {
    /// Base preset name; `"default"` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_muted: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub palette: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footnote_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_x_grid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_y_grid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_x_axis: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_y_axis: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bar_padding: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_right: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_left: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick_count: Option<usize>,
}
