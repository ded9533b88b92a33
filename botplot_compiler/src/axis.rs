// Copyright 2025 the Botplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis guides: measurement for layout, then gridlines, rules, tick marks and labels.
//!
//! The x axis sits below the plot area and the y axis to its left. Tick labels are
//! measured before the plot size is known, so both axes reserve their space up front.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use botplot_core::{LinePrimitive, Primitive, TextAnchor, TextBaseline, TextPrimitive, TextRole};
use botplot_text::TextMeasurer;
use kurbo::{Point, Rect};
use peniko::Color;

use crate::scale::{AxisDomain, PositionScale};
use crate::theme::Theme;

/// Space between a tick mark (or the plot edge) and its label.
pub const TICK_PADDING: f64 = 4.0;
/// Space between tick labels and the axis title.
pub const TITLE_GAP: f64 = 6.0;
/// Minimum horizontal space between neighboring x tick labels.
pub const MIN_LABEL_GAP: f64 = 4.0;

fn tick_extent(show: bool, theme: &Theme) -> f64 {
    if show { theme.tick_length } else { 0.0 }
}

fn label_width(theme: &Theme, measurer: &dyn TextMeasurer, text: &str) -> f64 {
    measurer
        .measure(text, &theme.role_style(TextRole::AxisTick))
        .advance_width
}

/// Thickness of the left axis block: tick marks, labels and the rotated title.
pub fn measure_left(
    theme: &Theme,
    measurer: &dyn TextMeasurer,
    tick_labels: &[String],
    title: Option<&str>,
) -> f64 {
    let max_w = tick_labels
        .iter()
        .map(|s| label_width(theme, measurer, s))
        .fold(0.0_f64, f64::max);
    let mut w = tick_extent(theme.show_y_axis, theme) + TICK_PADDING + max_w;
    if title.is_some() {
        w += TITLE_GAP + theme.role_line_height(TextRole::AxisTitle, measurer);
    }
    w
}

/// Predicts whether x tick labels would collide at `plot_width`.
///
/// When they would, the bottom axis reserves a second label row so colliding labels can
/// be staggered.
pub fn predict_stagger(
    theme: &Theme,
    measurer: &dyn TextMeasurer,
    x: &AxisDomain,
    plot_width: f64,
) -> bool {
    let ticks = x.instantiate((0.0, plot_width)).ticks();
    ticks.windows(2).any(|pair| {
        let (p0, a) = &pair[0];
        let (p1, b) = &pair[1];
        let half = 0.5 * (label_width(theme, measurer, a) + label_width(theme, measurer, b));
        (p1 - p0).abs() < half + MIN_LABEL_GAP
    })
}

/// Thickness of the bottom axis block.
pub fn measure_bottom(
    theme: &Theme,
    measurer: &dyn TextMeasurer,
    staggered: bool,
    title: Option<&str>,
) -> f64 {
    let rows = if staggered { 2.0 } else { 1.0 };
    let mut h = tick_extent(theme.show_x_axis, theme)
        + TICK_PADDING
        + rows * theme.role_line_height(TextRole::AxisTick, measurer);
    if title.is_some() {
        h += TITLE_GAP + theme.role_line_height(TextRole::AxisTitle, measurer);
    }
    h
}

fn rule(from: Point, to: Point, stroke: Color, stroke_width: f64) -> Primitive {
    Primitive::Line(LinePrimitive {
        points: vec![from, to],
        stroke,
        stroke_width,
        group: None,
    })
}

/// Gridlines at tick positions, clipped to the plot.
pub fn grid_lines(x: &PositionScale, y: &PositionScale, plot: Rect, theme: &Theme) -> Vec<Primitive> {
    let mut out = Vec::new();
    let inside = |v: f64, lo: f64, hi: f64| v >= lo - 1e-9 && v <= hi + 1e-9;
    if theme.show_y_grid {
        for (py, _) in y.ticks() {
            if inside(py, plot.y0, plot.y1) {
                out.push(rule(
                    Point::new(plot.x0, py),
                    Point::new(plot.x1, py),
                    theme.grid,
                    theme.grid_width,
                ));
            }
        }
    }
    if theme.show_x_grid {
        for (px, _) in x.ticks() {
            if inside(px, plot.x0, plot.x1) {
                out.push(rule(
                    Point::new(px, plot.y0),
                    Point::new(px, plot.y1),
                    theme.grid,
                    theme.grid_width,
                ));
            }
        }
    }
    out
}

/// Axis lines and tick marks for the axes the theme shows.
pub fn axis_rules(x: &PositionScale, y: &PositionScale, plot: Rect, theme: &Theme) -> Vec<Primitive> {
    let mut out = Vec::new();
    let (stroke, width, len) = (theme.axis, theme.axis_width, theme.tick_length);
    if theme.show_x_axis {
        out.push(rule(
            Point::new(plot.x0, plot.y1),
            Point::new(plot.x1, plot.y1),
            stroke,
            width,
        ));
        for (px, _) in x.ticks() {
            out.push(rule(
                Point::new(px, plot.y1),
                Point::new(px, plot.y1 + len),
                stroke,
                width,
            ));
        }
    }
    if theme.show_y_axis {
        out.push(rule(
            Point::new(plot.x0, plot.y0),
            Point::new(plot.x0, plot.y1),
            stroke,
            width,
        ));
        for (py, _) in y.ticks() {
            out.push(rule(
                Point::new(plot.x0 - len, py),
                Point::new(plot.x0, py),
                stroke,
                width,
            ));
        }
    }
    out
}

/// Tick labels for both axes: x below the plot, y to its left.
pub fn tick_texts(x: &PositionScale, y: &PositionScale, plot: Rect, theme: &Theme) -> Vec<TextPrimitive> {
    let mut out = Vec::new();
    let label_y = plot.y1 + tick_extent(theme.show_x_axis, theme) + TICK_PADDING;
    for (px, label) in x.ticks() {
        out.push(theme.label(
            TextRole::AxisTick,
            label,
            Point::new(px, label_y),
            TextAnchor::Middle,
            TextBaseline::Hanging,
        ));
    }
    let label_x = plot.x0 - tick_extent(theme.show_y_axis, theme) - TICK_PADDING;
    for (py, label) in y.ticks() {
        out.push(theme.label(
            TextRole::AxisTick,
            label,
            Point::new(label_x, py),
            TextAnchor::End,
            TextBaseline::Middle,
        ));
    }
    out
}

/// Axis titles at the outer edges of their axis blocks.
pub fn axis_titles(
    x_title: Option<&str>,
    y_title: Option<&str>,
    plot: Rect,
    axis_left: Rect,
    axis_bottom: Rect,
    theme: &Theme,
    measurer: &dyn TextMeasurer,
) -> Vec<TextPrimitive> {
    let lh = theme.role_line_height(TextRole::AxisTitle, measurer);
    let mut out = Vec::new();
    if let Some(title) = x_title {
        out.push(theme.label(
            TextRole::AxisTitle,
            title,
            Point::new(0.5 * (plot.x0 + plot.x1), axis_bottom.y1 - lh),
            TextAnchor::Middle,
            TextBaseline::Hanging,
        ));
    }
    if let Some(title) = y_title {
        let mut t = theme.label(
            TextRole::AxisTitle,
            title,
            Point::new(axis_left.x0 + 0.5 * lh, 0.5 * (plot.y0 + plot.y1)),
            TextAnchor::Middle,
            TextBaseline::Middle,
        );
        t.angle = -90.0;
        out.push(t);
    }
    out
}
