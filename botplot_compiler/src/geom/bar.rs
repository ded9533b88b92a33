// Copyright 2025 the Botplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bar: one rect per row, drawn from the zero baseline.

use alloc::vec::Vec;

use botplot_core::{Primitive, RectPrimitive};
use kurbo::Rect;

use super::value_label::value_label;
use super::{Geom, LayerContext, LayerInput};
use crate::error::CompileError;
use crate::scale::{DomainContribution, ResolvedScales, ScaleHint};

/// Vertical bars on a categorical x axis.
///
/// Bars always start at zero, so the y domain is forced to include it.
#[derive(Clone, Copy, Debug)]
pub struct Bar;

impl Geom for Bar {
    fn name(&self) -> &str {
        "bar"
    }

    fn validate(&self, input: &LayerInput<'_>) -> Result<(), CompileError> {
        input.require_numeric(self.name(), "y", &input.layer.y)
    }

    fn scale_hint(&self, input: &LayerInput<'_>) -> ScaleHint {
        ScaleHint {
            x: DomainContribution::categories(input.data, &input.layer.x),
            y: DomainContribution::numeric(input.data, &input.layer.y),
            color: input
                .layer
                .color
                .as_deref()
                .map(|c| DomainContribution::from_column(input.data, c)),
            zero_baseline: true,
        }
    }

    fn compile(
        &self,
        input: &LayerInput<'_>,
        scales: &ResolvedScales,
        ctx: &LayerContext<'_>,
    ) -> Vec<Primitive> {
        let xs = input.column(&input.layer.x);
        let ys = input.column(&input.layer.y);
        let width = scales.x.band_width() * (1.0 - ctx.theme.bar_padding);
        let Some(base) = scales.y.map_number(0.0) else {
            return Vec::new();
        };

        let mut bars = Vec::new();
        let mut labels = Vec::new();
        for (row, (x, y)) in xs.iter().zip(ys).enumerate() {
            let Some(cx) = scales.x.map_value(x) else {
                continue;
            };
            let Some(v) = y.as_f64() else { continue };
            let Some(top) = scales.y.map_number(v) else {
                continue;
            };
            let rect = Rect::new(cx - 0.5 * width, top.min(base), cx + 0.5 * width, top.max(base));
            let color = input.color_at(row);
            let fill = scales.color.map(color);
            bars.push(Primitive::Rect(RectPrimitive {
                rect,
                fill,
                group: scales.color.group(color),
            }));
            if input.layer.labels {
                labels.push(Primitive::Text(value_label(ctx, rect, v, fill)));
            }
        }
        bars.extend(labels);
        bars
    }
}
