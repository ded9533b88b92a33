// Copyright 2025 the Botplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scale resolution and mapping.
//!
//! Resolution happens in two steps. Before layout, every layer's [`ScaleHint`] is merged
//! into one [`ScaleDomains`] (a domain plus ticks per axis, and the color assignment).
//! After layout, the domains are instantiated over the plot area's pixel ranges into
//! [`ResolvedScales`], whose `map` functions are pure.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use alloc::{format, vec};
use core::fmt;

use botplot_core::{ColumnKind, ColumnTable, Value};
use hashbrown::HashMap;
use kurbo::Rect;
use peniko::Color;

use crate::accessibility::mix_linear;
use crate::error::CompileError;
use crate::format::{format_general, format_tick};
use crate::theme::Theme;
use crate::ticks::{Ticks, nice_ticks};

/// Whether an axis places numbers or categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleKind {
    /// Continuous numeric values.
    Numeric,
    /// Discrete labels.
    Categorical,
}

impl fmt::Display for ScaleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Numeric => "numeric",
            Self::Categorical => "categorical",
        })
    }
}

/// A min/max pair that grows as values are included.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NumericExtent {
    /// Smallest included value.
    pub min: f64,
    /// Largest included value.
    pub max: f64,
}

impl NumericExtent {
    /// The extent of no values.
    pub const EMPTY: Self = Self {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };

    /// Grows the extent to cover `v`. Non-finite values are ignored.
    pub fn include(&mut self, v: f64) {
        if v.is_finite() {
            self.min = self.min.min(v);
            self.max = self.max.max(v);
        }
    }

    /// The smallest extent covering both.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Returns `true` if nothing was included.
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }
}

impl FromIterator<f64> for NumericExtent {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut extent = Self::EMPTY;
        for v in iter {
            extent.include(v);
        }
        extent
    }
}

/// What one layer contributes to one axis.
#[derive(Clone, Debug, PartialEq)]
pub enum DomainContribution {
    /// No values (all-null or empty column). Agrees with any kind.
    Empty,
    /// A numeric extent.
    Numeric(NumericExtent),
    /// Distinct categories in first-seen order.
    Categorical(Vec<String>),
}

impl DomainContribution {
    /// Classifies a column and collects its extent or categories.
    pub fn from_column(data: &ColumnTable, column: &str) -> Self {
        match data.kind(column) {
            ColumnKind::Numeric => Self::numeric(data, column),
            ColumnKind::Categorical => Self::categories(data, column),
            ColumnKind::Empty => Self::Empty,
        }
    }

    /// The numeric extent of a column, ignoring non-numeric cells.
    pub fn numeric(data: &ColumnTable, column: &str) -> Self {
        let extent: NumericExtent = data
            .column(column)
            .unwrap_or_default()
            .iter()
            .filter_map(Value::as_f64)
            .collect();
        if extent.is_empty() {
            Self::Empty
        } else {
            Self::Numeric(extent)
        }
    }

    /// The distinct labels of a column, treating every cell as a category.
    pub fn categories(data: &ColumnTable, column: &str) -> Self {
        let mut out = Vec::new();
        push_distinct(
            &mut out,
            data.column(column)
                .unwrap_or_default()
                .iter()
                .filter_map(Value::category),
        );
        Self::Categorical(out)
    }

    /// The scale kind, or `None` when empty.
    pub fn kind(&self) -> Option<ScaleKind> {
        match self {
            Self::Empty => None,
            Self::Numeric(_) => Some(ScaleKind::Numeric),
            Self::Categorical(_) => Some(ScaleKind::Categorical),
        }
    }
}

fn push_distinct(out: &mut Vec<String>, values: impl IntoIterator<Item = String>) {
    for v in values {
        if !out.contains(&v) {
            out.push(v);
        }
    }
}

/// A layer's scale requirements.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleHint {
    /// X axis contribution.
    pub x: DomainContribution,
    /// Y axis contribution.
    pub y: DomainContribution,
    /// Color contribution, when the layer binds color.
    pub color: Option<DomainContribution>,
    /// The y domain must include zero (bar-like geoms).
    pub zero_baseline: bool,
}

/// A hint tagged with the layer it came from.
#[derive(Clone, Debug)]
pub struct LayerHint<'a> {
    /// Layer index.
    pub layer: usize,
    /// Geom name.
    pub geom: &'a str,
    /// The layer's hint.
    pub hint: ScaleHint,
}

/// A resolved positional domain, before a pixel range is known.
#[derive(Clone, Debug, PartialEq)]
pub enum AxisDomain {
    /// Numeric domain with its ticks.
    Numeric {
        /// Domain start.
        lo: f64,
        /// Domain end.
        hi: f64,
        /// Tick values inside `[lo, hi]`.
        ticks: Ticks,
    },
    /// Categories in first-seen order.
    Categorical(Vec<String>),
}

impl AxisDomain {
    /// Tick label strings in axis order.
    pub fn tick_labels(&self) -> Vec<String> {
        match self {
            Self::Numeric { ticks, .. } => ticks
                .values
                .iter()
                .map(|&v| format_tick(v, ticks.step))
                .collect(),
            Self::Categorical(cats) => cats.clone(),
        }
    }

    /// Maps this domain onto a pixel range.
    pub fn instantiate(&self, range: (f64, f64)) -> PositionScale {
        match self {
            Self::Numeric { lo, hi, ticks } => PositionScale::Linear {
                scale: ScaleLinear::new((*lo, *hi), range),
                ticks: ticks.clone(),
            },
            Self::Categorical(cats) => PositionScale::Band(BandScale::new(cats.clone(), range)),
        }
    }
}

/// All domains shared by the layers of one plot.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleDomains {
    /// Horizontal axis.
    pub x: AxisDomain,
    /// Vertical axis.
    pub y: AxisDomain,
    /// Color assignment.
    pub color: ColorScale,
}

impl ScaleDomains {
    /// Instantiates the positional domains over `plot_area`; y grows upward.
    pub fn instantiate(&self, plot_area: Rect) -> ResolvedScales {
        ResolvedScales {
            x: self.x.instantiate((plot_area.x0, plot_area.x1)),
            y: self.y.instantiate((plot_area.y1, plot_area.y0)),
            color: self.color.clone(),
        }
    }
}

/// Merges every layer's hint into shared domains.
///
/// Fails with [`CompileError::ScaleConflict`] when two layers need different scale kinds
/// on the same axis.
pub fn resolve_scales(hints: &[LayerHint<'_>], theme: &Theme) -> Result<ScaleDomains, CompileError> {
    let zero = hints.iter().any(|h| h.hint.zero_baseline);
    let x = merge("x", hints.iter().map(|h| (h.layer, h.geom, Some(&h.hint.x))))?;
    let y = merge("y", hints.iter().map(|h| (h.layer, h.geom, Some(&h.hint.y))))?;
    let color = merge(
        "color",
        hints.iter().map(|h| (h.layer, h.geom, h.hint.color.as_ref())),
    )?;

    let domains = ScaleDomains {
        x: axis_domain(x, false, theme),
        y: axis_domain(y, zero, theme),
        color: color_scale(color, theme),
    };
    log::trace!("resolved scales: {domains:?}");
    Ok(domains)
}

enum Merged {
    Empty,
    Numeric(NumericExtent),
    Categorical(Vec<String>),
}

fn merge<'a>(
    axis: &str,
    parts: impl Iterator<Item = (usize, &'a str, Option<&'a DomainContribution>)>,
) -> Result<Merged, CompileError> {
    let mut first: Option<(usize, &str, ScaleKind)> = None;
    let mut merged = Merged::Empty;
    for (layer, geom, part) in parts {
        let Some(part) = part else { continue };
        let Some(kind) = part.kind() else { continue };
        match first {
            Some((first_layer, first_geom, first_kind)) if first_kind != kind => {
                return Err(CompileError::ScaleConflict {
                    axis: axis.to_string(),
                    first_layer,
                    first_geom: first_geom.to_string(),
                    first_kind,
                    second_layer: layer,
                    second_geom: geom.to_string(),
                    second_kind: kind,
                });
            }
            Some(_) => {}
            None => first = Some((layer, geom, kind)),
        }
        merged = match (merged, part) {
            (Merged::Numeric(a), DomainContribution::Numeric(b)) => Merged::Numeric(a.union(*b)),
            (Merged::Categorical(mut a), DomainContribution::Categorical(b)) => {
                push_distinct(&mut a, b.iter().cloned());
                Merged::Categorical(a)
            }
            (_, DomainContribution::Numeric(b)) => Merged::Numeric(*b),
            (_, DomainContribution::Categorical(b)) => Merged::Categorical(b.clone()),
            (m, DomainContribution::Empty) => m,
        };
    }
    Ok(merged)
}

fn axis_domain(merged: Merged, zero_baseline: bool, theme: &Theme) -> AxisDomain {
    let extent = match merged {
        Merged::Categorical(cats) => return AxisDomain::Categorical(cats),
        Merged::Numeric(e) => e,
        Merged::Empty => NumericExtent { min: 0.0, max: 1.0 },
    };
    numeric_domain(extent, zero_baseline, theme)
}

/// Extends a numeric extent to nice ticks and pads it.
fn numeric_domain(mut extent: NumericExtent, zero_baseline: bool, theme: &Theme) -> AxisDomain {
    if zero_baseline {
        extent.include(0.0);
    }
    if extent.min == extent.max {
        let v = extent.min;
        extent = if v == 0.0 {
            if zero_baseline {
                NumericExtent { min: 0.0, max: 1.0 }
            } else {
                NumericExtent { min: -1.0, max: 1.0 }
            }
        } else {
            NumericExtent {
                min: v - v.abs() / 2.0,
                max: v + v.abs() / 2.0,
            }
        };
    }

    let ticks = nice_ticks(extent.min, extent.max, theme.tick_count);
    let (Some(t0), Some(t1)) = (ticks.first(), ticks.last()) else {
        return AxisDomain::Numeric {
            lo: extent.min,
            hi: extent.max,
            ticks,
        };
    };
    let lo = t0.min(extent.min);
    let hi = t1.max(extent.max);
    let pad = theme.scale_expand * (hi - lo);
    let pinned_lo = zero_baseline && lo == 0.0;
    let pinned_hi = zero_baseline && hi == 0.0;
    AxisDomain::Numeric {
        lo: if pinned_lo { lo } else { lo - pad },
        hi: if pinned_hi { hi } else { hi + pad },
        ticks,
    }
}

fn color_scale(merged: Merged, theme: &Theme) -> ColorScale {
    let first = theme.palette.first().copied().unwrap_or(theme.text);
    match merged {
        Merged::Categorical(cats) => ColorScale::categorical(cats, &theme.palette, first),
        Merged::Numeric(e) => ColorScale::Continuous {
            lo: e.min,
            hi: e.max,
            from: first,
            to: theme.palette.get(1).copied().unwrap_or(first),
        },
        Merged::Empty => ColorScale::Constant(first),
    }
}

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

}

/// Evenly divides a range into `count` adjacent bands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleBand {
    range: (f64, f64),
    count: usize,
}

impl ScaleBand {
    /// Creates a new band scale covering `count` bands over `range`.
    pub fn new(range: (f64, f64), count: usize) -> Self {
        Self { range, count }
    }

    /// Returns the computed band width.
    pub fn band_width(&self) -> f64 {
        let (r0, r1) = self.range;
        if self.count == 0 {
            return 0.0;
        }
        (r1 - r0).abs() / self.count as f64
    }

    /// Returns the start position of the band at `index`.
    pub fn x(&self, index: usize) -> f64 {
        let (r0, r1) = self.range;
        r0.min(r1) + self.band_width() * index as f64
    }

    /// Returns the center of the band at `index`.
    pub fn center(&self, index: usize) -> f64 {
        self.x(index) + self.band_width() / 2.0
    }
}

/// A band scale keyed by category label.
#[derive(Clone, Debug, PartialEq)]
pub struct BandScale {
    band: ScaleBand,
    categories: Vec<String>,
    index: HashMap<String, usize>,
}

impl BandScale {
    /// Creates a band scale over `categories` in the given order.
    pub fn new(categories: Vec<String>, range: (f64, f64)) -> Self {
        let index = categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();
        Self {
            band: ScaleBand::new(range, categories.len()),
            categories,
            index,
        }
    }

    /// Band index of a category.
    pub fn index_of(&self, category: &str) -> Option<usize> {
        self.index.get(category).copied()
    }

    /// Center of a category's band.
    pub fn center_of(&self, category: &str) -> Option<f64> {
        self.index_of(category).map(|i| self.band.center(i))
    }

    /// The underlying band layout.
    pub fn band(&self) -> &ScaleBand {
        &self.band
    }

    /// Categories in axis order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }
}

/// A positional scale instantiated over pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum PositionScale {
    /// Numeric axis.
    Linear {
        /// Domain to pixel mapping.
        scale: ScaleLinear,
        /// Tick values.
        ticks: Ticks,
    },
    /// Categorical axis.
    Band(BandScale),
}

impl PositionScale {
    /// Maps a cell to a pixel coordinate (band center for categories).
    ///
    /// Returns `None` for nulls, non-finite numbers, and values outside a band domain.
    pub fn map_value(&self, value: &Value) -> Option<f64> {
        match self {
            Self::Linear { scale, .. } => value.as_f64().map(|v| scale.map(v)),
            Self::Band(band) => band.center_of(&value.category()?),
        }
    }

    /// Maps a number on a linear axis; `None` on a band axis.
    pub fn map_number(&self, v: f64) -> Option<f64> {
        match self {
            Self::Linear { scale, .. } if v.is_finite() => Some(scale.map(v)),
            _ => None,
        }
    }

    /// Band width for categorical axes, `0.0` for numeric ones.
    pub fn band_width(&self) -> f64 {
        match self {
            Self::Linear { .. } => 0.0,
            Self::Band(band) => band.band().band_width(),
        }
    }

    /// Tick positions with their labels.
    pub fn ticks(&self) -> Vec<(f64, String)> {
        match self {
            Self::Linear { scale, ticks } => ticks
                .values
                .iter()
                .map(|&v| (scale.map(v), format_tick(v, ticks.step)))
                .collect(),
            Self::Band(band) => band
                .categories()
                .iter()
                .enumerate()
                .map(|(i, c)| (band.band().center(i), c.clone()))
                .collect(),
        }
    }
}

/// Every resolved scale of one plot.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedScales {
    /// Horizontal position.
    pub x: PositionScale,
    /// Vertical position.
    pub y: PositionScale,
    /// Color.
    pub color: ColorScale,
}

/// Maps a color-bound cell to a color.
#[derive(Clone, Debug, PartialEq)]
pub enum ColorScale {
    /// No color binding; every mark uses one color.
    Constant(Color),
    /// Palette colors assigned to categories in first-seen order, cycling.
    Categorical {
        /// Category to color, in assignment order.
        entries: Vec<(String, Color)>,
        /// Category to entry index.
        index: HashMap<String, usize>,
        /// Color for cells without a category.
        fallback: Color,
    },
    /// Numeric values interpolated in linear light.
    Continuous {
        /// Domain start.
        lo: f64,
        /// Domain end.
        hi: f64,
        /// Color at `lo`.
        from: Color,
        /// Color at `hi`.
        to: Color,
    },
}

impl ColorScale {
    fn categorical(categories: Vec<String>, palette: &[Color], fallback: Color) -> Self {
        let entries: Vec<(String, Color)> = categories
            .into_iter()
            .enumerate()
            .map(|(i, c)| {
                let color = if palette.is_empty() {
                    fallback
                } else {
                    palette[i % palette.len()]
                };
                (c, color)
            })
            .collect();
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, (c, _))| (c.clone(), i))
            .collect();
        Self::Categorical {
            entries,
            index,
            fallback,
        }
    }

    /// Color for one cell.
    pub fn map(&self, value: &Value) -> Color {
        match self {
            Self::Constant(c) => *c,
            Self::Categorical {
                entries,
                index,
                fallback,
            } => value
                .category()
                .and_then(|c| index.get(&c))
                .map_or(*fallback, |&i| entries[i].1),
            Self::Continuous { lo, hi, from, to } => {
                let Some(v) = value.as_f64() else {
                    return *from;
                };
                let t = if hi > lo { (v - lo) / (hi - lo) } else { 0.0 };
                mix_linear(*from, *to, t)
            }
        }
    }

    /// Group tag for a cell: its category on a categorical scale.
    pub fn group(&self, value: &Value) -> Option<String> {
        match self {
            Self::Categorical { .. } => value.category(),
            _ => None,
        }
    }

    /// Legend entries: every category, or the two ends of a ramp.
    pub fn legend_entries(&self) -> Vec<(String, Color)> {
        match self {
            Self::Constant(_) => vec![],
            Self::Categorical { entries, .. } => entries.clone(),
            Self::Continuous { lo, hi, from, to } => {
                vec![(format_general(*lo), *from), (format_general(*hi), *to)]
            }
        }
    }
}

/// Describes a domain for log records.
pub(crate) fn describe(domain: &AxisDomain) -> String {
    match domain {
        AxisDomain::Numeric { lo, hi, ticks } => {
            format!("numeric [{lo}, {hi}] with {} ticks", ticks.values.len())
        }
        AxisDomain::Categorical(cats) => format!("{} categories", cats.len()),
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::error::ErrorKind;

    fn hint(x: DomainContribution, y: DomainContribution) -> ScaleHint {
        ScaleHint {
            x,
            y,
            color: None,
            zero_baseline: false,
        }
    }

    fn numeric(min: f64, max: f64) -> DomainContribution {
        DomainContribution::Numeric(NumericExtent { min, max })
    }

    fn cats(names: &[&str]) -> DomainContribution {
        DomainContribution::Categorical(names.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn linear_scale_maps_endpoints() {
        let s = ScaleLinear::new((0.0, 10.0), (100.0, 0.0));
        assert_eq!(s.map(0.0), 100.0);
        assert_eq!(s.map(10.0), 0.0);
        assert_eq!(ScaleLinear::new((3.0, 3.0), (5.0, 9.0)).map(3.0), 5.0);
    }

    #[test]
    fn band_centers_are_monotonic() {
        let b = ScaleBand::new((0.0, 90.0), 3);
        assert_eq!(b.band_width(), 30.0);
        assert_eq!(b.center(0), 15.0);
        assert!(b.center(1) < b.center(2), "bands increase");
    }

    #[test]
    fn categories_merge_in_first_seen_order() {
        let hints = [
            LayerHint {
                layer: 0,
                geom: "bar",
                hint: hint(cats(&["b", "a"]), numeric(1.0, 2.0)),
            },
            LayerHint {
                layer: 1,
                geom: "bar",
                hint: hint(cats(&["a", "c"]), numeric(0.0, 5.0)),
            },
        ];
        let d = resolve_scales(&hints, &Theme::default()).unwrap();
        assert_eq!(d.x.tick_labels(), vec!["b", "a", "c"]);
    }

    #[test]
    fn mixed_kinds_conflict() {
        let hints = [
            LayerHint {
                layer: 0,
                geom: "scatter",
                hint: hint(numeric(0.0, 1.0), numeric(0.0, 1.0)),
            },
            LayerHint {
                layer: 1,
                geom: "bar",
                hint: hint(cats(&["a"]), numeric(0.0, 1.0)),
            },
        ];
        let err = resolve_scales(&hints, &Theme::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ScaleConflict);
        let msg = err.to_string();
        assert!(msg.starts_with("x scale conflict"), "{msg}");
        assert!(msg.contains("layer 0 (scatter) is numeric"), "{msg}");
        assert!(msg.contains("layer 1 (bar) is categorical"), "{msg}");
    }

    #[test]
    fn zero_baseline_pins_the_bottom() {
        let mut h = hint(cats(&["a"]), numeric(12.0, 97.0));
        h.zero_baseline = true;
        let hints = [LayerHint {
            layer: 0,
            geom: "bar",
            hint: h,
        }];
        let d = resolve_scales(&hints, &Theme::default()).unwrap();
        let AxisDomain::Numeric { lo, hi, ticks } = d.y else {
            panic!("numeric y");
        };
        assert_eq!(lo, 0.0);
        assert_eq!(ticks.values, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        assert!((hi - 103.0).abs() < 1e-9, "padded top {hi}");
    }

    #[test]
    fn negative_bars_pin_the_top() {
        let mut h = hint(cats(&["a"]), numeric(-40.0, -5.0));
        h.zero_baseline = true;
        let d = resolve_scales(
            &[LayerHint {
                layer: 0,
                geom: "bar",
                hint: h,
            }],
            &Theme::default(),
        )
        .unwrap();
        let AxisDomain::Numeric { lo, hi, .. } = d.y else {
            panic!("numeric y");
        };
        assert_eq!(hi, 0.0);
        assert!(lo < -40.0, "padded bottom {lo}");
    }

    #[test]
    fn empty_domain_falls_back_to_unit() {
        let d = resolve_scales(
            &[LayerHint {
                layer: 0,
                geom: "scatter",
                hint: hint(DomainContribution::Empty, DomainContribution::Empty),
            }],
            &Theme::default(),
        )
        .unwrap();
        let AxisDomain::Numeric { ticks, .. } = d.x else {
            panic!("numeric x");
        };
        assert_eq!(ticks.first(), Some(0.0));
        assert_eq!(ticks.last(), Some(1.0));
    }

    #[test]
    fn singleton_domain_is_widened() {
        let d = resolve_scales(
            &[LayerHint {
                layer: 0,
                geom: "scatter",
                hint: hint(numeric(10.0, 10.0), numeric(0.0, 0.0)),
            }],
            &Theme::default(),
        )
        .unwrap();
        let AxisDomain::Numeric { lo, hi, .. } = d.x else {
            panic!("numeric x");
        };
        assert!(lo <= 5.0 && hi >= 15.0, "[{lo}, {hi}]");
        let AxisDomain::Numeric { lo, hi, .. } = d.y else {
            panic!("numeric y");
        };
        assert!(lo < 0.0 && hi > 0.0, "[{lo}, {hi}]");
    }

    #[test]
    fn categorical_colors_cycle_the_palette() {
        let theme = Theme {
            palette: vec![Color::from_rgb8(1, 2, 3), Color::from_rgb8(4, 5, 6)],
            ..Theme::default()
        };
        let scale = color_scale(
            Merged::Categorical(vec!["a".into(), "b".into(), "c".into()]),
            &theme,
        );
        assert_eq!(scale.map(&Value::from("c")), Color::from_rgb8(1, 2, 3));
        assert_eq!(scale.map(&Value::from("b")), Color::from_rgb8(4, 5, 6));
        assert_eq!(scale.legend_entries().len(), 3);
    }

    #[test]
    fn continuous_color_hits_endpoints() {
        let theme = Theme::default();
        let scale = color_scale(
            Merged::Numeric(NumericExtent {
                min: 0.0,
                max: 10.0,
            }),
            &theme,
        );
        assert_eq!(scale.map(&Value::from(0.0)), theme.palette[0]);
        assert_eq!(scale.map(&Value::from(10.0)), theme.palette[1]);
    }

    #[test]
    fn band_scale_maps_categories() {
        let s = AxisDomain::Categorical(vec!["x".into(), "y".into()]).instantiate((0.0, 100.0));
        assert_eq!(s.map_value(&Value::from("y")), Some(75.0));
        assert_eq!(s.map_value(&Value::from("z")), None);
        assert_eq!(s.band_width(), 50.0);
        assert_eq!(s.map_number(1.0), None);
    }
}
