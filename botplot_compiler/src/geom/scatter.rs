// Copyright 2025 the Botplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scatter: one point per row.

use alloc::vec::Vec;

use botplot_core::{PointPrimitive, Primitive};
use kurbo::Point;

use super::{Geom, LayerContext, LayerInput};
use crate::error::CompileError;
use crate::scale::{DomainContribution, ResolvedScales, ScaleHint};

/// One point per row; x may be numeric or categorical, y is numeric.
#[derive(Clone, Copy, Debug)]
pub struct Scatter;

impl Geom for Scatter {
    fn name(&self) -> &str {
        "scatter"
    }

    fn validate(&self, input: &LayerInput<'_>) -> Result<(), CompileError> {
        input.require_numeric(self.name(), "y", &input.layer.y)
    }

    fn scale_hint(&self, input: &LayerInput<'_>) -> ScaleHint {
        ScaleHint {
            x: DomainContribution::from_column(input.data, &input.layer.x),
            y: DomainContribution::numeric(input.data, &input.layer.y),
            color: input
                .layer
                .color
                .as_deref()
                .map(|c| DomainContribution::from_column(input.data, c)),
            zero_baseline: false,
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
        xs.iter()
            .zip(ys)
            .enumerate()
            .filter_map(|(row, (x, y))| {
                let center = Point::new(scales.x.map_value(x)?, scales.y.map_value(y)?);
                let color = input.color_at(row);
                Some(Primitive::Point(PointPrimitive {
                    center,
                    radius: ctx.theme.point_radius,
                    fill: scales.color.map(color),
                    group: scales.color.group(color),
                }))
            })
            .collect()
    }
}
