// Copyright 2025 the Botplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The compile pipeline.
//!
//! `Validate -> Resolve Scales -> Compute Layout -> Accessibility Gate -> Compile Layers ->
//! Assemble`. Every stage is pure; any error aborts the compile and no partial plot is
//! returned.

use alloc::borrow::Cow;
use alloc::format;
use alloc::string::ToString;
use alloc::vec::Vec;
use core::fmt;

use botplot_core::{CompiledPlot, PlotSpec, Primitive, RectPrimitive, TextPrimitive};
use botplot_text::{HeuristicTextMeasurer, TextMeasurer};
use kurbo::{Point, Size};

use crate::accessibility::check_theme;
use crate::axis;
use crate::error::CompileError;
use crate::format::LabelFormat;
use crate::geom::{Geom, GeomRegistry, LayerContext, LayerInput};
use crate::labels::resolve_collisions;
use crate::layout::{ChartLayout, ChartLayoutSpec};
use crate::legend::LegendSwatches;
use crate::scale::{LayerHint, describe, resolve_scales};
use crate::theme::ThemeStore;
use crate::title;

/// Compiles plot specs against a geom registry, a text measurer and a theme store.
///
/// ```
/// use botplot_compiler::{Compiler, GeomRegistry};
/// use botplot_core::{ColumnTable, Layer, PlotSpec};
///
/// let registry = GeomRegistry::with_builtins();
/// let spec = PlotSpec::new(
///     ColumnTable::new()
///         .with_column("x", ["a", "b"])
///         .with_column("y", [3.0, 5.0]),
/// )
/// .with_layer(Layer::new("bar", "x", "y"));
/// let plot = Compiler::new(&registry).compile(&spec).unwrap();
/// assert_eq!(plot.rects().count(), 3); // background + two bars
/// ```
pub struct Compiler<'a> {
    registry: &'a GeomRegistry,
    measurer: &'a dyn TextMeasurer,
    themes: Cow<'a, ThemeStore>,
}

impl fmt::Debug for Compiler<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compiler")
            .field("registry", &self.registry.names())
            .field("themes", &self.themes.names())
            .finish_non_exhaustive()
    }
}

/// A validated layer with its geom and parsed label template.
struct ReadyLayer<'s, 'r> {
    input: LayerInput<'s>,
    geom: &'r dyn Geom,
    label_format: Option<LabelFormat>,
}

impl<'a> Compiler<'a> {
    /// A compiler with the heuristic text measurer and the builtin themes.
    pub fn new(registry: &'a GeomRegistry) -> Self {
        Self {
            registry,
            measurer: &HeuristicTextMeasurer,
            themes: Cow::Owned(ThemeStore::builtin()),
        }
    }

    /// Uses `measurer` for all text metrics.
    #[must_use]
    pub fn with_measurer(mut self, measurer: &'a dyn TextMeasurer) -> Self {
        self.measurer = measurer;
        self
    }

    /// Resolves theme names against `themes`.
    #[must_use]
    pub fn with_themes(mut self, themes: &'a ThemeStore) -> Self {
        self.themes = Cow::Borrowed(themes);
        self
    }

    /// Parses a JSON spec and compiles it.
    pub fn compile_json(&self, json: &str) -> Result<CompiledPlot, CompileError> {
        let spec = PlotSpec::from_json(json)?;
        self.compile(&spec)
    }

    /// Compiles a spec into positioned primitives.
    pub fn compile(&self, spec: &PlotSpec) -> Result<CompiledPlot, CompileError> {
        let measurer = self.measurer;

        // Validate.
        check_size(spec)?;
        let theme = self.themes.resolve(&spec.theme)?;
        let layers = self.validate(spec)?;
        log::debug!(
            "validated {} layer(s) with theme '{}'",
            layers.len(),
            theme.name
        );

        // Resolve scales.
        let hints: Vec<LayerHint<'_>> = layers
            .iter()
            .map(|l| LayerHint {
                layer: l.input.index,
                geom: l.geom.name(),
                hint: l.geom.scale_hint(&l.input),
            })
            .collect();
        let domains = resolve_scales(&hints, &theme)?;
        log::debug!(
            "scales: x {}, y {}",
            describe(&domains.x),
            describe(&domains.y)
        );

        // Compute layout.
        let x_title = non_empty(spec.labels.x.as_deref());
        let y_title = non_empty(spec.labels.y.as_deref());
        let legend = spec
            .legend
            .show
            .then(|| domains.color.legend_entries())
            .filter(|entries| !entries.is_empty())
            .map(|entries| LegendSwatches::new(entries, spec.legend.position));
        let mut layout_spec = ChartLayoutSpec {
            view: Size::new(spec.size.width, spec.size.height),
            margins: theme.margins,
            title_top: title::measure_top(&spec.labels, &theme, measurer),
            footnote_bottom: title::measure_footnote(&spec.labels, &theme, measurer),
            axis_left: axis::measure_left(&theme, measurer, &domains.y.tick_labels(), y_title),
            axis_bottom: 0.0,
            legend: legend
                .as_ref()
                .map(|l| (l.measure(&theme, measurer), spec.legend.position)),
        };
        let staggered =
            axis::predict_stagger(&theme, measurer, &domains.x, layout_spec.plot_width());
        layout_spec.axis_bottom = axis::measure_bottom(&theme, measurer, staggered, x_title);
        let layout = ChartLayout::arrange(&layout_spec);
        log::debug!("plot area {:?}, staggered x ticks: {staggered}", layout.plot);

        // Accessibility gate.
        check_theme(&theme, &domains.color)?;

        // Compile layers.
        let scales = domains.instantiate(layout.plot);
        let mut shapes = Vec::new();
        let mut value_labels = Vec::new();
        for l in &layers {
            let ctx = LayerContext {
                theme: &theme,
                plot_area: layout.plot,
                measurer,
                label_format: l.label_format.as_ref(),
            };
            let out = l.geom.compile(&l.input, &scales, &ctx);
            log::trace!(
                "layer {} ({}) emitted {} primitive(s)",
                l.input.index,
                l.geom.name(),
                out.len()
            );
            for p in out {
                match p {
                    Primitive::Text(t) => value_labels.push(t),
                    other => shapes.push(other),
                }
            }
        }

        // Assemble.
        let mut primitives = Vec::with_capacity(shapes.len() + 16);
        primitives.push(Primitive::Rect(RectPrimitive {
            rect: layout.view,
            fill: theme.background,
            group: None,
        }));
        primitives.extend(axis::grid_lines(&scales.x, &scales.y, layout.plot, &theme));
        primitives.extend(shapes);
        primitives.extend(axis::axis_rules(&scales.x, &scales.y, layout.plot, &theme));

        let mut texts: Vec<TextPrimitive> =
            title::title_texts(&spec.labels, &theme, measurer, layout.title_top, layout.plot);
        texts.extend(title::footnote_text(
            &spec.labels,
            &theme,
            layout.footnote,
            layout.plot,
        ));
        texts.extend(axis::axis_titles(
            x_title,
            y_title,
            layout.plot,
            layout.axis_left,
            layout.axis_bottom,
            &theme,
            measurer,
        ));
        if let (Some(legend), Some(rect)) = (&legend, layout.legend) {
            let (swatches, labels) = legend.primitives(&theme, measurer, Point::new(rect.x0, rect.y0));
            primitives.extend(swatches);
            texts.extend(labels);
        }
        texts.extend(axis::tick_texts(&scales.x, &scales.y, layout.plot, &theme));
        texts.extend(value_labels);

        let emitted = texts.len();
        let texts = resolve_collisions(texts, measurer);
        log::debug!(
            "placed {} of {emitted} label(s), {} primitive(s) total",
            texts.len(),
            primitives.len() + texts.len()
        );
        primitives.extend(texts.into_iter().map(Primitive::Text));

        Ok(CompiledPlot {
            width: spec.size.width,
            height: spec.size.height,
            background: theme.background,
            plot_area: layout.plot,
            primitives,
        })
    }

    fn validate<'s>(&self, spec: &'s PlotSpec) -> Result<Vec<ReadyLayer<'s, 'a>>, CompileError> {
        let data = &spec.data.columns;
        if let Err((expected, column, actual)) = data.check_lengths() {
            let reference = data.names().next().unwrap_or_default().to_string();
            return Err(CompileError::RaggedColumns {
                reference,
                expected,
                column: column.to_string(),
                actual,
            });
        }

        let mut layers = Vec::with_capacity(spec.layers.len());
        for (index, layer) in spec.layers.iter().enumerate() {
            let geom = self.registry.lookup(&layer.geom)?;
            let label_format = layer
                .label_format
                .as_deref()
                .map(LabelFormat::parse)
                .transpose()
                .map_err(|msg| {
                    CompileError::invalid_spec(format!("layer {index} ({}): {msg}", layer.geom))
                })?;
            for (role, column) in layer.bindings() {
                if !data.contains(column) {
                    return Err(CompileError::MissingColumn {
                        layer: index,
                        geom: layer.geom.clone(),
                        role: role.to_string(),
                        column: column.to_string(),
                        available: data.names().map(ToString::to_string).collect(),
                    });
                }
            }
            layers.push(ReadyLayer {
                input: LayerInput {
                    index,
                    layer,
                    data,
                },
                geom,
                label_format,
            });
        }

        for l in &layers {
            l.geom.validate(&l.input)?;
        }
        Ok(layers)
    }
}

fn check_size(spec: &PlotSpec) -> Result<(), CompileError> {
    let size = spec.size;
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if valid(size.width) && valid(size.height) {
        Ok(())
    } else {
        Err(CompileError::invalid_spec(format!(
            "size must be positive, got {}x{}",
            size.width, size.height
        )))
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// Compiles `spec` with the builtin geoms, the heuristic measurer and the builtin themes.
pub fn compile(spec: &PlotSpec) -> Result<CompiledPlot, CompileError> {
    #[cfg(feature = "std")]
    {
        Compiler::new(GeomRegistry::global()).compile(spec)
    }
    #[cfg(not(feature = "std"))]
    {
        let registry = GeomRegistry::with_builtins();
        Compiler::new(&registry).compile(spec)
    }
}

