// Copyright 2025 the Botplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line: one polyline per color group, rows in data order.

use alloc::string::String;
use alloc::vec::Vec;

use botplot_core::{LinePrimitive, PointPrimitive, Primitive, Value};
use kurbo::Point;

use super::{Geom, LayerContext, LayerInput};
use crate::error::CompileError;
use crate::scale::{DomainContribution, ResolvedScales, ScaleHint};

/// Connected points, grouped by the color column when one is bound.
///
/// A group with a single placeable row is drawn as a point.
#[derive(Clone, Copy, Debug)]
pub struct Line;

struct Group<'a> {
    key: Option<String>,
    color: &'a Value,
    points: Vec<Point>,
}

impl Geom for Line {
    fn name(&self) -> &str {
        "line"
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

        let mut groups: Vec<Group<'_>> = Vec::new();
        for (row, (x, y)) in xs.iter().zip(ys).enumerate() {
            let (Some(px), Some(py)) = (scales.x.map_value(x), scales.y.map_value(y)) else {
                continue;
            };
            let color = input.color_at(row);
            let key = color.category();
            let point = Point::new(px, py);
            match groups.iter_mut().find(|g| g.key == key) {
                Some(g) => g.points.push(point),
                None => groups.push(Group {
                    key,
                    color,
                    points: alloc::vec![point],
                }),
            }
        }

        groups
            .into_iter()
            .map(|g| {
                let stroke = scales.color.map(g.color);
                let group = scales.color.group(g.color);
                if g.points.len() == 1 {
                    Primitive::Point(PointPrimitive {
                        center: g.points[0],
                        radius: ctx.theme.line_width.max(ctx.theme.point_radius / 2.0),
                        fill: stroke,
                        group,
                    })
                } else {
                    Primitive::Line(LinePrimitive {
                        points: g.points,
                        stroke,
                        stroke_width: ctx.theme.line_width,
                        group,
                    })
                }
            })
            .collect()
    }
}
