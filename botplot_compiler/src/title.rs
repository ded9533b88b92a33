// Copyright 2025 the Botplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plot titles, subtitles and footnotes.
//!
//! These are guides rather than data-bound marks: they reserve strips in the layout (title
//! and subtitle on top, footnote at the bottom) and then emit text into those strips.

use alloc::vec::Vec;

use botplot_core::{Labels, TextAnchor, TextBaseline, TextPrimitive, TextRole};
use botplot_text::TextMeasurer;
use kurbo::{Point, Rect};

use crate::theme::Theme;

/// Space below the title and below the subtitle.
pub const TITLE_GAP: f64 = 6.0;
/// Space between the content above and the footnote.
pub const FOOTNOTE_GAP: f64 = 8.0;

fn non_empty(s: &Option<alloc::string::String>) -> Option<&str> {
    s.as_deref().filter(|s| !s.is_empty())
}

/// Height of the top strip holding the title and subtitle.
pub fn measure_top(labels: &Labels, theme: &Theme, measurer: &dyn TextMeasurer) -> f64 {
    let mut h = 0.0;
    if non_empty(&labels.title).is_some() {
        h += theme.role_line_height(TextRole::Title, measurer) + TITLE_GAP;
    }
    if non_empty(&labels.subtitle).is_some() {
        h += theme.role_line_height(TextRole::Subtitle, measurer) + TITLE_GAP;
    }
    h
}

/// Height of the bottom strip holding the footnote.
pub fn measure_footnote(labels: &Labels, theme: &Theme, measurer: &dyn TextMeasurer) -> f64 {
    if non_empty(&labels.footnote).is_some() {
        FOOTNOTE_GAP + theme.role_line_height(TextRole::Footnote, measurer)
    } else {
        0.0
    }
}

/// Title and subtitle, centered over the plot and stacked down from the strip top.
pub fn title_texts(
    labels: &Labels,
    theme: &Theme,
    measurer: &dyn TextMeasurer,
    strip: Rect,
    plot: Rect,
) -> Vec<TextPrimitive> {
    let x = 0.5 * (plot.x0 + plot.x1);
    let mut y = strip.y0;
    let mut out = Vec::new();
    for (role, text) in [
        (TextRole::Title, non_empty(&labels.title)),
        (TextRole::Subtitle, non_empty(&labels.subtitle)),
    ] {
        let Some(text) = text else { continue };
        out.push(theme.label(
            role,
            text,
            Point::new(x, y),
            TextAnchor::Middle,
            TextBaseline::Hanging,
        ));
        y += theme.role_line_height(role, measurer) + TITLE_GAP;
    }
    out
}

/// Footnote, left-aligned with the plot.
pub fn footnote_text(labels: &Labels, theme: &Theme, strip: Rect, plot: Rect) -> Option<TextPrimitive> {
    let text = non_empty(&labels.footnote)?;
    Some(theme.label(
        TextRole::Footnote,
        text,
        Point::new(plot.x0, strip.y0 + FOOTNOTE_GAP),
        TextAnchor::Start,
        TextBaseline::Hanging,
    ))
}
