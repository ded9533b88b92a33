// Copyright 2025 the Botplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Role-based text styling and text box geometry.

use alloc::string::String;

use botplot_core::{TextAnchor, TextBaseline, TextPrimitive, TextRole};
use botplot_text::{FontFamily, FontWeight, TextMeasurer, TextStyle};
use kurbo::{Affine, Point, Rect};
use peniko::Color;

use crate::theme::Theme;

impl Theme {
    /// Font size used for a text role.
    pub fn role_size(&self, role: TextRole) -> f64 {
        match role {
            TextRole::Title => self.title_size,
            TextRole::Subtitle => self.subtitle_size,
            TextRole::AxisTitle => self.label_size,
            TextRole::Footnote => self.footnote_size,
            TextRole::Legend => self.legend_size,
            TextRole::AxisTick | TextRole::ValueLabel => self.tick_size,
        }
    }

    /// Fill color used for a text role.
    pub fn role_fill(&self, role: TextRole) -> Color {
        match role {
            TextRole::Subtitle | TextRole::Footnote => self.text_muted,
            _ => self.text,
        }
    }

    /// Font weight used for a text role.
    pub fn role_weight(&self, role: TextRole) -> FontWeight {
        match role {
            TextRole::Title => self.title_weight,
            _ => FontWeight::NORMAL,
        }
    }

    /// Full measurement style for a text role.
    pub fn role_style(&self, role: TextRole) -> TextStyle {
        self.text_style(self.role_size(role))
            .with_weight(self.role_weight(role))
    }

    /// Line height of a role's text.
    pub fn role_line_height(&self, role: TextRole, measurer: &dyn TextMeasurer) -> f64 {
        measurer.measure("Mg", &self.role_style(role)).line_height()
    }

    /// An unrotated text primitive styled for `role`.
    pub fn label(
        &self,
        role: TextRole,
        text: impl Into<String>,
        position: Point,
        anchor: TextAnchor,
        baseline: TextBaseline,
    ) -> TextPrimitive {
        TextPrimitive {
            position,
            text: text.into(),
            font_size: self.role_size(role),
            font_family: String::from(self.font_family.as_css_family()),
            font_weight: self.role_weight(role).0,
            fill: self.role_fill(role),
            anchor,
            baseline,
            angle: 0.0,
            role,
            container: None,
        }
    }
}

/// The style a text primitive was emitted with.
pub fn primitive_style(text: &TextPrimitive) -> TextStyle {
    TextStyle::new(text.font_size)
        .with_family(FontFamily::from_css(&text.font_family))
        .with_weight(FontWeight(text.font_weight))
}

/// Measured `(width, line height)` of a text primitive.
pub fn primitive_size(text: &TextPrimitive, measurer: &dyn TextMeasurer) -> (f64, f64) {
    let m = measurer.measure(&text.text, &primitive_style(text));
    (m.advance_width, m.line_height())
}

/// Box of unrotated text of `size` anchored at `(x, y)`.
pub fn text_bounds(
    x: f64,
    y: f64,
    size: (f64, f64),
    anchor: TextAnchor,
    baseline: TextBaseline,
) -> Rect {
    let (w, h) = size;
    let (x0, x1) = match anchor {
        TextAnchor::Start => (x, x + w),
        TextAnchor::Middle => (x - w * 0.5, x + w * 0.5),
        TextAnchor::End => (x - w, x),
    };
    let (y0, y1) = match baseline {
        TextBaseline::Middle => (y - h * 0.5, y + h * 0.5),
        TextBaseline::Alphabetic => (y - h, y),
        TextBaseline::Hanging => (y, y + h),
    };
    Rect::new(x0, y0, x1, y1)
}

/// Axis-aligned box of a text primitive, rotation included.
pub fn primitive_bounds(text: &TextPrimitive, measurer: &dyn TextMeasurer) -> Rect {
    let p = text.position;
    let rect = text_bounds(p.x, p.y, primitive_size(text, measurer), text.anchor, text.baseline);
    if text.angle == 0.0 {
        rect
    } else {
        Affine::rotate_about(text.angle.to_radians(), p).transform_rect_bbox(rect)
    }
}
