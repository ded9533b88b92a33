// Copyright 2025 the Botplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Themes: named bundles of visual defaults, resolved once per compile.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;

use botplot_core::{ThemeOverride, ThemeRef};
use botplot_text::{FontFamily, FontWeight, TextStyle};
use hashbrown::HashMap;
use peniko::Color;

use crate::error::CompileError;

/// Default categorical palette; every entry reaches 3:1 against white.
pub const DEFAULT_PALETTE: [Color; 10] = [
    Color::from_rgb8(0x4E, 0x79, 0xA7),
    Color::from_rgb8(0xC5, 0x6A, 0x00),
    Color::from_rgb8(0xE1, 0x57, 0x59),
    Color::from_rgb8(0x4A, 0x8B, 0x86),
    Color::from_rgb8(0x59, 0xA1, 0x4F),
    Color::from_rgb8(0xA6, 0x8B, 0x00),
    Color::from_rgb8(0xB0, 0x7A, 0xA1),
    Color::from_rgb8(0xC4, 0x63, 0x6E),
    Color::from_rgb8(0x9C, 0x75, 0x5F),
    Color::from_rgb8(0x7B, 0x75, 0x73),
];

/// Grayscale palette for print; every entry reaches 3:1 against white.
pub const PRINT_PALETTE: [Color; 10] = [
    Color::from_rgb8(0x00, 0x00, 0x00),
    Color::from_rgb8(0x40, 0x40, 0x40),
    Color::from_rgb8(0x59, 0x59, 0x59),
    Color::from_rgb8(0x6E, 0x6E, 0x6E),
    Color::from_rgb8(0x80, 0x80, 0x80),
    Color::from_rgb8(0x26, 0x26, 0x26),
    Color::from_rgb8(0x4D, 0x4D, 0x4D),
    Color::from_rgb8(0x63, 0x63, 0x63),
    Color::from_rgb8(0x76, 0x76, 0x76),
    Color::from_rgb8(0x8A, 0x8A, 0x8A),
];

/// Outer padding on each canvas side, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
    /// Top padding.
    pub top: f64,
    /// Right padding.
    pub right: f64,
    /// Bottom padding.
    pub bottom: f64,
    /// Left padding.
    pub left: f64,
}

impl Margins {
    /// The same padding on every side.
    pub const fn uniform(v: f64) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }
}

/// A fully populated theme.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    /// Preset name this theme was resolved from.
    pub name: String,
    /// Canvas background.
    pub background: Color,
    /// Primary text (title, axis titles, tick labels, legend, value labels).
    pub text: Color,
    /// Secondary text (subtitle, footnote).
    pub text_muted: Color,
    /// Axis lines and tick marks.
    pub axis: Color,
    /// Gridlines and waterfall connectors (decorative, not contrast-gated).
    pub grid: Color,
    /// Mark colors, assigned to categories in first-seen order.
    pub palette: Vec<Color>,
    /// CSS font family list.
    pub font_family: FontFamily,
    /// Title font size.
    pub title_size: f64,
    /// Title font weight.
    pub title_weight: FontWeight,
    /// Subtitle font size.
    pub subtitle_size: f64,
    /// Axis title font size.
    pub label_size: f64,
    /// Tick label and value label font size.
    pub tick_size: f64,
    /// Footnote font size.
    pub footnote_size: f64,
    /// Legend label font size.
    pub legend_size: f64,
    /// Vertical gridlines at x ticks.
    pub show_x_grid: bool,
    /// Horizontal gridlines at y ticks.
    pub show_y_grid: bool,
    /// X axis line and tick marks.
    pub show_x_axis: bool,
    /// Y axis line and tick marks.
    pub show_y_axis: bool,
    /// Axis line width.
    pub axis_width: f64,
    /// Gridline width.
    pub grid_width: f64,
    /// Axis tick mark length.
    pub tick_length: f64,
    /// Point radius for scatter marks.
    pub point_radius: f64,
    /// Stroke width for line marks.
    pub line_width: f64,
    /// Fraction of the band left empty around each bar.
    pub bar_padding: f64,
    /// Outer canvas padding.
    pub margins: Margins,
    /// Target number of tick intervals on numeric axes.
    pub tick_count: usize,
    /// Fraction of the tick range added on each unpinned side of a numeric axis.
    pub scale_expand: f64,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "default".into(),
            background: Color::from_rgb8(0xFF, 0xFF, 0xFF),
            text: Color::from_rgb8(0x33, 0x33, 0x33),
            text_muted: Color::from_rgb8(0x66, 0x66, 0x66),
            axis: Color::from_rgb8(0x33, 0x33, 0x33),
            grid: Color::from_rgb8(0xEE, 0xEE, 0xEE),
            palette: DEFAULT_PALETTE.to_vec(),
            font_family: FontFamily::Named(Arc::from("Inter, Helvetica Neue, Arial, sans-serif")),
            title_size: 16.0,
            title_weight: FontWeight::BOLD,
            subtitle_size: 13.0,
            label_size: 12.0,
            tick_size: 10.0,
            footnote_size: 10.0,
            legend_size: 11.0,
            show_x_grid: false,
            show_y_grid: true,
            show_x_axis: true,
            show_y_axis: false,
            axis_width: 1.0,
            grid_width: 1.0,
            tick_length: 5.0,
            point_radius: 4.0,
            line_width: 2.0,
            bar_padding: 0.2,
            margins: Margins::uniform(20.0),
            tick_count: 5,
            scale_expand: 0.03,
        }
    }
}

impl Theme {
    /// Larger type and marks for social feeds.
    pub fn bluesky() -> Self {
        Self {
            name: "bluesky".into(),
            title_size: 20.0,
            subtitle_size: 15.0,
            label_size: 14.0,
            tick_size: 12.0,
            footnote_size: 11.0,
            legend_size: 13.0,
            point_radius: 5.0,
            line_width: 2.5,
            margins: Margins {
                top: 28.0,
                right: 24.0,
                bottom: 28.0,
                left: 24.0,
            },
            ..Self::default()
        }
    }

    /// Newsletter embed sizing.
    pub fn substack() -> Self {
        Self {
            name: "substack".into(),
            title_size: 18.0,
            subtitle_size: 14.0,
            label_size: 13.0,
            tick_size: 11.0,
            legend_size: 12.0,
            line_width: 2.5,
            ..Self::default()
        }
    }

    /// Black-and-gray serif styling for print.
    pub fn print() -> Self {
        Self {
            name: "print".into(),
            font_family: FontFamily::Named(Arc::from("Georgia, Times New Roman, serif")),
            text: Color::from_rgb8(0x00, 0x00, 0x00),
            text_muted: Color::from_rgb8(0x44, 0x44, 0x44),
            axis: Color::from_rgb8(0x00, 0x00, 0x00),
            grid: Color::from_rgb8(0xDD, 0xDD, 0xDD),
            palette: PRINT_PALETTE.to_vec(),
            show_y_axis: true,
            axis_width: 0.75,
            point_radius: 3.0,
            line_width: 1.5,
            ..Self::default()
        }
    }

    /// Text style for a role-specific font size at normal weight.
    pub fn text_style(&self, font_size: f64) -> TextStyle {
        TextStyle::new(font_size).with_family(self.font_family.clone())
    }

    /// Applies an inline override on top of `self`.
    pub fn apply(mut self, o: &ThemeOverride) -> Result<Self, CompileError> {
        let colors = [
            ("background", &o.background, &mut self.background),
            ("text", &o.text, &mut self.text),
            ("text_muted", &o.text_muted, &mut self.text_muted),
            ("axis", &o.axis, &mut self.axis),
            ("grid", &o.grid, &mut self.grid),
        ];
        for (field, value, slot) in colors {
            if let Some(value) = value {
                *slot = color_field(field, value)?;
            }
        }
        if let Some(palette) = &o.palette {
            if palette.is_empty() {
                return Err(CompileError::invalid_spec(
                    "theme field 'palette' must hold at least one color",
                ));
            }
            self.palette = palette
                .iter()
                .enumerate()
                .map(|(i, v)| color_field(&format!("palette[{i}]"), v))
                .collect::<Result<_, _>>()?;
        }
        if let Some(family) = &o.font_family {
            self.font_family = FontFamily::from_css(family);
        }

        let sizes = [
            ("title_size", o.title_size, &mut self.title_size),
            ("subtitle_size", o.subtitle_size, &mut self.subtitle_size),
            ("label_size", o.label_size, &mut self.label_size),
            ("tick_size", o.tick_size, &mut self.tick_size),
            ("footnote_size", o.footnote_size, &mut self.footnote_size),
            ("legend_size", o.legend_size, &mut self.legend_size),
            ("point_radius", o.point_radius, &mut self.point_radius),
            ("line_width", o.line_width, &mut self.line_width),
            ("axis_width", o.axis_width, &mut self.axis_width),
        ];
        for (field, value, slot) in sizes {
            if let Some(v) = value {
                *slot = positive_field(field, v)?;
            }
        }
        let margins = [
            ("margin_top", o.margin_top, &mut self.margins.top),
            ("margin_right", o.margin_right, &mut self.margins.right),
            ("margin_bottom", o.margin_bottom, &mut self.margins.bottom),
            ("margin_left", o.margin_left, &mut self.margins.left),
        ];
        for (field, value, slot) in margins {
            if let Some(v) = value {
                if !(v.is_finite() && v >= 0.0) {
                    return Err(CompileError::invalid_spec(format!(
                        "theme field '{field}' must be a non-negative number, got {v}"
                    )));
                }
                *slot = v;
            }
        }
        if let Some(v) = o.bar_padding {
            if !(v.is_finite() && (0.0..1.0).contains(&v)) {
                return Err(CompileError::invalid_spec(format!(
                    "theme field 'bar_padding' must be in [0, 1), got {v}"
                )));
            }
            self.bar_padding = v;
        }
        if let Some(n) = o.tick_count {
            if n < 2 {
                return Err(CompileError::invalid_spec(format!(
                    "theme field 'tick_count' must be at least 2, got {n}"
                )));
            }
            self.tick_count = n;
        }

        let toggles = [
            (o.show_x_grid, &mut self.show_x_grid),
            (o.show_y_grid, &mut self.show_y_grid),
            (o.show_x_axis, &mut self.show_x_axis),
            (o.show_y_axis, &mut self.show_y_axis),
        ];
        for (value, slot) in toggles {
            if let Some(v) = value {
                *slot = v;
            }
        }
        Ok(self)
    }
}

fn color_field(field: &str, value: &str) -> Result<Color, CompileError> {
    botplot_core::color::parse(value).map_err(|err| CompileError::InvalidColor {
        field: field.into(),
        value: value.into(),
        reason: err.to_string(),
    })
}

fn positive_field(field: &str, v: f64) -> Result<f64, CompileError> {
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(CompileError::invalid_spec(format!(
            "theme field '{field}' must be a positive number, got {v}"
        )))
    }
}

/// Name to theme lookup.
#[derive(Clone, Debug)]
pub struct ThemeStore {
    themes: HashMap<String, Theme>,
}

impl Default for ThemeStore {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ThemeStore {
    /// An empty store.
    pub fn empty() -> Self {
        Self {
            themes: HashMap::new(),
        }
    }

    /// The builtin presets: `default`, `bluesky` (alias `social`), `substack`, `print`.
    pub fn builtin() -> Self {
        let mut store = Self::empty();
        store.insert("default", Theme::default());
        store.insert("bluesky", Theme::bluesky());
        store.insert("social", Theme::bluesky());
        store.insert("substack", Theme::substack());
        store.insert("print", Theme::print());
        store
    }

    /// Adds or replaces a theme.
    pub fn insert(&mut self, name: impl Into<String>, theme: Theme) {
        self.themes.insert(name.into(), theme);
    }

    /// Looks up a theme by name.
    pub fn get(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }

    /// All theme names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.themes.keys().cloned().collect();
        names.sort();
        names
    }

    /// Resolves a theme reference, applying inline overrides.
    pub fn resolve(&self, theme: &ThemeRef) -> Result<Theme, CompileError> {
        match theme {
            ThemeRef::Name(name) => self.lookup(name),
            ThemeRef::Override(o) => {
                let base = o.base.as_deref().unwrap_or("default");
                self.lookup(base)?.apply(o)
            }
        }
    }

    fn lookup(&self, name: &str) -> Result<Theme, CompileError> {
        self.get(name).cloned().ok_or_else(|| CompileError::UnknownTheme {
            name: name.to_string(),
            available: self.names(),
        })
    }
}
