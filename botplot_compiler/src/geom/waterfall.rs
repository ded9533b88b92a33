// Copyright 2025 the Botplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waterfall: floating bars between running totals.

use alloc::string::String;
use alloc::vec::Vec;

use botplot_core::{LinePrimitive, Primitive, RectPrimitive};
use kurbo::{Point, Rect};

use super::value_label::value_label;
use super::{Geom, LayerContext, LayerInput};
use crate::error::CompileError;
use crate::scale::{DomainContribution, NumericExtent, ResolvedScales, ScaleHint};

/// Each row moves a running total by its y value. Increases use the first palette color,
/// decreases the second, and thin connectors join consecutive bar ends.
#[derive(Clone, Copy, Debug)]
pub struct Waterfall;

/// Running totals `(start, end)` for rows with a numeric y, with their row index and delta.
fn steps(ys: &[botplot_core::Value]) -> Vec<(usize, f64, f64, f64)> {
    let mut total = 0.0;
    ys.iter()
        .enumerate()
        .filter_map(|(row, y)| {
            let delta = y.as_f64()?;
            let start = total;
            total += delta;
            Some((row, delta, start, total))
        })
        .collect()
}

impl Geom for Waterfall {
    fn name(&self) -> &str {
        "waterfall"
    }

    fn validate(&self, input: &LayerInput<'_>) -> Result<(), CompileError> {
        input.require_numeric(self.name(), "y", &input.layer.y)
    }

    fn scale_hint(&self, input: &LayerInput<'_>) -> ScaleHint {
        let totals = steps(input.column(&input.layer.y));
        let mut extent = NumericExtent::EMPTY;
        for &(_, _, start, end) in &totals {
            extent.include(start);
            extent.include(end);
        }
        ScaleHint {
            x: DomainContribution::categories(input.data, &input.layer.x),
            y: if extent.is_empty() {
                DomainContribution::Empty
            } else {
                DomainContribution::Numeric(extent)
            },
            color: None,
            zero_baseline: true,
        }
    }

    fn compile(
        &self,
        input: &LayerInput<'_>,
        scales: &ResolvedScales,
        ctx: &LayerContext<'_>,
    ) -> Vec<Primitive> {
        let theme = ctx.theme;
        let xs = input.column(&input.layer.x);
        let width = scales.x.band_width() * (1.0 - theme.bar_padding);
        let up = theme.palette.first().copied().unwrap_or(theme.text);
        let down = theme.palette.get(1).copied().unwrap_or(up);

        let mut bars = Vec::new();
        let mut connectors = Vec::new();
        let mut labels = Vec::new();
        let mut previous: Option<Rect> = None;
        let mut previous_end = 0.0;
        for (row, delta, start, end) in steps(input.column(&input.layer.y)) {
            let Some(cx) = xs.get(row).and_then(|x| scales.x.map_value(x)) else {
                continue;
            };
            let (Some(y0), Some(y1)) = (scales.y.map_number(start), scales.y.map_number(end)) else {
                continue;
            };
            let rect = Rect::new(cx - 0.5 * width, y0.min(y1), cx + 0.5 * width, y0.max(y1));
            let (fill, group) = if delta >= 0.0 {
                (up, "positive")
            } else {
                (down, "negative")
            };

            if let (Some(prev), Some(level)) = (previous, scales.y.map_number(previous_end)) {
                connectors.push(Primitive::Line(LinePrimitive {
                    points: alloc::vec![Point::new(prev.x1, level), Point::new(rect.x0, level)],
                    stroke: theme.grid,
                    stroke_width: theme.grid_width,
                    group: None,
                }));
            }
            bars.push(Primitive::Rect(RectPrimitive {
                rect,
                fill,
                group: Some(String::from(group)),
            }));
            if input.layer.labels {
                labels.push(Primitive::Text(value_label(ctx, rect, delta, fill)));
            }
            previous = Some(rect);
            previous_end = end;
        }

        connectors.extend(bars);
        connectors.extend(labels);
        connectors
    }
}
