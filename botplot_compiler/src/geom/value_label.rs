// Copyright 2025 the Botplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-datum value labels for bar-like geoms.

use botplot_core::{TextAnchor, TextBaseline, TextPrimitive, TextRole};
use kurbo::{Point, Rect};
use peniko::Color;

use super::LayerContext;
use crate::accessibility::{MIN_BODY_TEXT, best_text_color};
use crate::format::format_value;

/// Clearance around a label drawn inside its bar.
const INSIDE_PAD: f64 = 4.0;
/// Gap between a bar end and a label drawn outside it.
const OUTSIDE_GAP: f64 = 4.0;

/// Places the label for `value` on `bar`.
///
/// The label goes inside the bar when it fits with padding and the better of the theme's
/// text and background colors reaches body-text contrast against `fill`. Otherwise it sits
/// just beyond the bar end: above for non-negative values, below for negative ones.
pub(super) fn value_label(ctx: &LayerContext<'_>, bar: Rect, value: f64, fill: Color) -> TextPrimitive {
    let theme = ctx.theme;
    let text = format_value(value, ctx.label_format);
    let metrics = ctx
        .measurer
        .measure(&text, &theme.role_style(TextRole::ValueLabel));
    let (w, h) = (metrics.advance_width, metrics.line_height());
    let cx = 0.5 * (bar.x0 + bar.x1);

    let fits = w + 2.0 * INSIDE_PAD <= bar.width() && h + 2.0 * INSIDE_PAD <= bar.height();
    if fits {
        let (color, ratio) = best_text_color(fill, [theme.text, theme.background]);
        if ratio >= MIN_BODY_TEXT {
            let mut label = theme.label(
                TextRole::ValueLabel,
                text,
                Point::new(cx, 0.5 * (bar.y0 + bar.y1)),
                TextAnchor::Middle,
                TextBaseline::Middle,
            );
            label.fill = color;
            label.container = Some(bar);
            return label;
        }
    }

    let (y, baseline) = if value >= 0.0 {
        (bar.y0 - OUTSIDE_GAP, TextBaseline::Alphabetic)
    } else {
        (bar.y1 + OUTSIDE_GAP, TextBaseline::Hanging)
    };
    theme.label(
        TextRole::ValueLabel,
        text,
        Point::new(cx, y),
        TextAnchor::Middle,
        baseline,
    )
}
