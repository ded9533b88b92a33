// Copyright 2025 the Botplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend guide: color swatches with labels.
//!
//! Side legends (left/right) stack entries vertically; top and bottom legends lay them out
//! in a single row.

use alloc::string::String;
use alloc::vec::Vec;

use botplot_core::{LegendPosition, Primitive, RectPrimitive, TextAnchor, TextBaseline, TextPrimitive, TextRole};
use botplot_text::TextMeasurer;
use kurbo::{Point, Rect, Size};
use peniko::Color;

use crate::theme::Theme;

/// Swatch square size.
pub const SWATCH_SIZE: f64 = 10.0;
/// Gap between a swatch and its label.
pub const LABEL_DX: f64 = 6.0;
/// Vertical gap between stacked entries.
pub const ROW_GAP: f64 = 4.0;
/// Horizontal gap between entries in a row.
pub const ITEM_GAP: f64 = 12.0;
/// Gap between the legend and the plot block.
pub const OFFSET: f64 = 15.0;

/// A legend ready to be measured and placed.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendSwatches {
    /// Entries in display order.
    pub items: Vec<(String, Color)>,
    /// Lay entries out in one row instead of a column.
    pub horizontal: bool,
}

impl LegendSwatches {
    /// A legend for `position`.
    pub fn new(items: Vec<(String, Color)>, position: LegendPosition) -> Self {
        let horizontal = matches!(position, LegendPosition::Top | LegendPosition::Bottom);
        Self { items, horizontal }
    }

    fn label_widths<'a>(
        &'a self,
        theme: &'a Theme,
        measurer: &'a dyn TextMeasurer,
    ) -> impl Iterator<Item = f64> + 'a {
        let style = theme.role_style(TextRole::Legend);
        self.items
            .iter()
            .map(move |(label, _)| measurer.measure(label, &style).advance_width)
    }

    fn row_height(theme: &Theme, measurer: &dyn TextMeasurer) -> f64 {
        SWATCH_SIZE.max(theme.role_line_height(TextRole::Legend, measurer))
    }

    /// Size of the laid-out legend.
    pub fn measure(&self, theme: &Theme, measurer: &dyn TextMeasurer) -> Size {
        let n = self.items.len();
        if n == 0 {
            return Size::ZERO;
        }
        let row_h = Self::row_height(theme, measurer);
        let gaps = (n - 1) as f64;
        if self.horizontal {
            let labels: f64 = self.label_widths(theme, measurer).sum();
            Size::new(
                n as f64 * (SWATCH_SIZE + LABEL_DX) + labels + gaps * ITEM_GAP,
                row_h,
            )
        } else {
            let max_w = self.label_widths(theme, measurer).fold(0.0_f64, f64::max);
            Size::new(SWATCH_SIZE + LABEL_DX + max_w, n as f64 * row_h + gaps * ROW_GAP)
        }
    }

    /// Swatch rects and label texts with the legend's top-left corner at `origin`.
    pub fn primitives(
        &self,
        theme: &Theme,
        measurer: &dyn TextMeasurer,
        origin: Point,
    ) -> (Vec<Primitive>, Vec<TextPrimitive>) {
        let row_h = Self::row_height(theme, measurer);
        let mut swatches = Vec::with_capacity(self.items.len());
        let mut labels = Vec::with_capacity(self.items.len());
        let (mut x, mut y) = (origin.x, origin.y);
        for ((label, color), width) in self.items.iter().zip(self.label_widths(theme, measurer)) {
            let swatch_y = y + 0.5 * (row_h - SWATCH_SIZE);
            swatches.push(Primitive::Rect(RectPrimitive {
                rect: Rect::new(x, swatch_y, x + SWATCH_SIZE, swatch_y + SWATCH_SIZE),
                fill: *color,
                group: Some(label.clone()),
            }));
            labels.push(theme.label(
                TextRole::Legend,
                label.clone(),
                Point::new(x + SWATCH_SIZE + LABEL_DX, y + 0.5 * row_h),
                TextAnchor::Start,
                TextBaseline::Middle,
            ));
            if self.horizontal {
                x += SWATCH_SIZE + LABEL_DX + width + ITEM_GAP;
            } else {
                y += row_h + ROW_GAP;
            }
        }
        (swatches, labels)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use botplot_text::HeuristicTextMeasurer;

    use super::*;

    fn items() -> Vec<(String, Color)> {
        vec![
            ("North".into(), Color::from_rgb8(0x4E, 0x79, 0xA7)),
            ("South".into(), Color::from_rgb8(0xC5, 0x6A, 0x00)),
        ]
    }

    #[test]
    fn side_legend_stacks_entries() {
        let theme = Theme::default();
        let m = HeuristicTextMeasurer;
        let legend = LegendSwatches::new(items(), LegendPosition::Right);
        let size = legend.measure(&theme, &m);
        let (swatches, labels) = legend.primitives(&theme, &m, Point::new(10.0, 10.0));
        assert_eq!(swatches.len(), 2);
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].position.x, labels[1].position.x);
        assert!(labels[1].position.y > labels[0].position.y, "second row below first");
        assert!(size.height > size.width * 0.1, "{size:?}");
    }

    #[test]
    fn top_legend_is_one_row() {
        let theme = Theme::default();
        let m = HeuristicTextMeasurer;
        let legend = LegendSwatches::new(items(), LegendPosition::Top);
        let size = legend.measure(&theme, &m);
        let (_, labels) = legend.primitives(&theme, &m, Point::ZERO);
        assert_eq!(labels[0].position.y, labels[1].position.y);
        let last = labels[1].position.x
            + m.measure("South", &theme.role_style(TextRole::Legend)).advance_width;
        assert!((last - size.width).abs() < 1e-9, "row width {} vs {last}", size.width);
    }

    #[test]
    fn empty_legend_measures_zero() {
        let legend = LegendSwatches::new(Vec::new(), LegendPosition::Left);
        assert_eq!(legend.measure(&Theme::default(), &HeuristicTextMeasurer), Size::ZERO);
    }
}
