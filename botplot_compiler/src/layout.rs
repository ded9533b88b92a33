// Copyright 2025 the Botplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A measure/arrange box model for plots.
//!
//! - **Measure**: each guide (titles, axes, legend, footnote) reports its thickness.
//! - **Arrange**: the canvas is carved into strips around the plot area, which gets
//!   whatever remains (never less than 1x1).
//!
//! Horizontal thicknesses do not depend on the plot height, so the plot width can be
//! computed before the bottom axis is measured. That lets the bottom axis know whether its
//! tick labels need a second (staggered) row.

use botplot_core::LegendPosition;
use kurbo::{Rect, Size};

use crate::legend::OFFSET;
use crate::theme::Margins;

/// Measured inputs for one plot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartLayoutSpec {
    /// Canvas size.
    pub view: Size,
    /// Outer padding.
    pub margins: Margins,
    /// Title and subtitle strip height.
    pub title_top: f64,
    /// Footnote strip height.
    pub footnote_bottom: f64,
    /// Left axis block width.
    pub axis_left: f64,
    /// Bottom axis block height.
    pub axis_bottom: f64,
    /// Legend size and side.
    pub legend: Option<(Size, LegendPosition)>,
}

impl ChartLayoutSpec {
    fn legend_on(&self, side: LegendPosition) -> Option<Size> {
        match self.legend {
            Some((size, pos)) if pos == side => Some(size),
            _ => None,
        }
    }

    fn horizontal_margins(&self) -> (f64, f64) {
        let left = self.margins.left
            + self.axis_left.max(0.0)
            + self
                .legend_on(LegendPosition::Left)
                .map_or(0.0, |s| s.width + OFFSET);
        let right = self.margins.right
            + self
                .legend_on(LegendPosition::Right)
                .map_or(0.0, |s| s.width + OFFSET);
        (left, right)
    }

    /// Plot width implied by the horizontal strips alone.
    pub fn plot_width(&self) -> f64 {
        let (left, right) = self.horizontal_margins();
        (self.view.width - left - right).max(1.0)
    }
}

/// Output of the arrange pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartLayout {
    /// Canvas bounds.
    pub view: Rect,
    /// The plot (data) area.
    pub plot: Rect,
    /// Title and subtitle strip, spanning the plot width.
    pub title_top: Rect,
    /// Left axis block.
    pub axis_left: Rect,
    /// Bottom axis block.
    pub axis_bottom: Rect,
    /// Footnote strip.
    pub footnote: Rect,
    /// Legend box, if any.
    pub legend: Option<Rect>,
}

impl ChartLayout {
    /// Computes a layout from measured guide thicknesses.
    pub fn arrange(spec: &ChartLayoutSpec) -> Self {
        let m = spec.margins;
        let title_h = spec.title_top.max(0.0);
        let foot_h = spec.footnote_bottom.max(0.0);
        let axis_left_w = spec.axis_left.max(0.0);
        let axis_bottom_h = spec.axis_bottom.max(0.0);

        let (margin_left, _) = spec.horizontal_margins();
        let plot_w = spec.plot_width();
        let legend_top = spec
            .legend_on(LegendPosition::Top)
            .map_or(0.0, |s| s.height + OFFSET);
        let legend_bottom = spec
            .legend_on(LegendPosition::Bottom)
            .map_or(0.0, |s| s.height + OFFSET);
        let margin_top = m.top + title_h + legend_top;
        let margin_bottom = m.bottom + foot_h + legend_bottom + axis_bottom_h;
        let plot_h = (spec.view.height - margin_top - margin_bottom).max(1.0);

        let plot = Rect::new(
            margin_left,
            margin_top,
            margin_left + plot_w,
            margin_top + plot_h,
        );
        let view = Rect::new(0.0, 0.0, spec.view.width, spec.view.height);
        let title_top = Rect::new(plot.x0, m.top, plot.x1, m.top + title_h);
        let axis_left = Rect::new(plot.x0 - axis_left_w, plot.y0, plot.x0, plot.y1);
        let axis_bottom = Rect::new(plot.x0, plot.y1, plot.x1, plot.y1 + axis_bottom_h);
        let foot_y0 = axis_bottom.y1 + legend_bottom;
        let footnote = Rect::new(plot.x0, foot_y0, plot.x1, foot_y0 + foot_h);

        let legend = spec.legend.map(|(size, pos)| {
            let (x0, y0) = match pos {
                LegendPosition::Right => (plot.x1 + OFFSET, plot.y0),
                LegendPosition::Left => (m.left, plot.y0),
                LegendPosition::Top => (plot.x0, title_top.y1),
                LegendPosition::Bottom => (plot.x0, axis_bottom.y1 + OFFSET),
            };
            Rect::new(x0, y0, x0 + size.width, y0 + size.height)
        });

        let layout = Self {
            view,
            plot,
            title_top,
            axis_left,
            axis_bottom,
            footnote,
            legend,
        };
        log::trace!("layout: {layout:?}");
        layout
    }
}
