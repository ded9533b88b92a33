// Copyright 2025 the Botplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end compiles through the public pipeline.

extern crate std;

use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use botplot_core::{
    ColumnTable, CompiledPlot, Labels, Layer, Legend, LegendPosition, PlotSpec, Primitive,
    RectPrimitive, TextPrimitive, TextRole, ThemeOverride, Value,
};
use botplot_text::{HeuristicTextMeasurer, TextMeasurer, TextMetrics, TextStyle};
use kurbo::Rect;

use crate::error::{CompileError, ErrorKind};
use crate::geom::{Geom, GeomRegistry, LayerContext, LayerInput};
use crate::accessibility::{MIN_BODY_TEXT, contrast_ratio};
use crate::labels::{contains, overlaps};
use crate::scale::{DomainContribution, ResolvedScales, ScaleHint, ScaleLinear};
use crate::text::primitive_bounds;
use crate::theme::Theme;
use crate::{Compiler, compile};

fn bars(categories: &[&str], values: &[f64]) -> PlotSpec {
    PlotSpec::new(
        ColumnTable::new()
            .with_column("x", categories.iter().copied())
            .with_column("y", values.iter().copied()),
    )
    .with_layer(Layer::new("bar", "x", "y"))
}

fn compile_ok(spec: &PlotSpec) -> CompiledPlot {
    match compile(spec) {
        Ok(plot) => plot,
        Err(err) => panic!("compile failed: {err}"),
    }
}

fn compile_err(spec: &PlotSpec) -> CompileError {
    match compile(spec) {
        Ok(_) => panic!("compile unexpectedly succeeded"),
        Err(err) => err,
    }
}

/// Rects drawn by layers: everything tagged with a group, or untagged rects inside the plot.
fn data_rects(plot: &CompiledPlot) -> Vec<&RectPrimitive> {
    plot.rects()
        .filter(|r| r.rect != Rect::new(0.0, 0.0, plot.width, plot.height))
        .filter(|r| r.rect.x0 >= plot.plot_area.x0 - 1e-9 && r.rect.x1 <= plot.plot_area.x1 + 1e-9)
        .collect()
}

fn texts_with_role(plot: &CompiledPlot, role: TextRole) -> Vec<&TextPrimitive> {
    plot.texts().filter(|t| t.role == role).collect()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn identical_specs_compile_to_identical_json() {
    let spec = bars(&["a", "b", "c"], &[3.0, 7.5, 1.25])
        .with_labels(Labels {
            title: Some("Quarterly".into()),
            x: Some("Quarter".into()),
            y: Some("Revenue".into()),
            ..Labels::default()
        });
    let json = spec.to_json().unwrap();
    let first = Compiler::new(&GeomRegistry::with_builtins())
        .compile_json(&json)
        .unwrap()
        .to_json()
        .unwrap();
    let second = Compiler::new(&GeomRegistry::with_builtins())
        .compile_json(&json)
        .unwrap()
        .to_json()
        .unwrap();
    assert_eq!(first, second, "compiles must be byte-identical");
}

#[test]
fn single_bar_spans_zero_to_value() {
    let plot = compile_ok(&bars(&["a"], &[42.0]));
    let rects = data_rects(&plot);
    assert_eq!(rects.len(), 1, "one bar: {rects:?}");
    let area = plot.plot_area;
    // [0, 42] ticks to [0, 50] and pads only the top by 3% of 50.
    let y = ScaleLinear::new((0.0, 51.5), (area.y1, area.y0));
    let bar = rects[0].rect;
    assert!(close(bar.y1, y.map(0.0)), "baseline {} vs {}", bar.y1, y.map(0.0));
    assert!(close(bar.y0, y.map(42.0)), "top {} vs {}", bar.y0, y.map(42.0));
}

#[test]
fn bars_share_a_zero_baseline() {
    for (values, expect) in [
        (&[4.0, 9.0, 2.0][..], Some(true)),
        (&[-4.0, -9.0, -2.0][..], Some(false)),
        (&[-4.0, 9.0, -2.0][..], None),
    ] {
        let plot = compile_ok(&bars(&["a", "b", "c"], values));
        let area = plot.plot_area;
        let rects = data_rects(&plot);
        assert_eq!(rects.len(), 3, "three bars for {values:?}");
        let baseline = |r: &RectPrimitive, v: f64| if v >= 0.0 { r.rect.y1 } else { r.rect.y0 };
        let zero = baseline(rects[0], values[0]);
        for (r, &v) in rects.iter().zip(values) {
            assert!(close(baseline(r, v), zero), "{values:?}: bar for {v} leaves the baseline");
        }
        match expect {
            Some(true) => assert!(close(zero, area.y1), "positive data sits on the plot bottom"),
            Some(false) => assert!(close(zero, area.y0), "negative data hangs from the plot top"),
            None => assert!(zero > area.y0 && zero < area.y1, "mixed data puts zero inside"),
        }
    }
}

#[test]
fn y_ticks_for_0_to_97() {
    let plot = compile_ok(&bars(&["Q1", "Q2"], &[12.0, 97.0]));
    let ticks: Vec<&str> = texts_with_role(&plot, TextRole::AxisTick)
        .into_iter()
        .map(|t| t.text.as_str())
        .filter(|t| !t.starts_with('Q'))
        .collect();
    assert_eq!(ticks, vec!["0", "20", "40", "60", "80", "100"], "y tick labels");
}

#[test]
fn missing_columns_are_rejected_for_every_geom() {
    let registry = GeomRegistry::with_builtins();
    for geom in registry.names() {
        let spec = PlotSpec::new(
            ColumnTable::new()
                .with_column("x", ["a", "b"])
                .with_column("y", [1.0, 2.0]),
        )
        .with_layer(Layer::new(geom.clone(), "x", "y_col"));
        let err = Compiler::new(&registry).compile(&spec).unwrap_err();
        assert_eq!(
            err,
            CompileError::MissingColumn {
                layer: 0,
                geom: geom.clone(),
                role: "y".into(),
                column: "y_col".into(),
                available: vec!["x".into(), "y".into()],
            },
            "{geom}"
        );
    }
}

#[test]
fn missing_columns_fail_before_any_geom_validates() {
    let spec = PlotSpec::new(
        ColumnTable::new()
            .with_column("x", ["a", "b"])
            .with_column("y", [Value::from(1.0), Value::from("n/a")]),
    )
    .with_layer(Layer::new("bar", "x", "y"))
    .with_layer(Layer::new("scatter", "x", "missing"));
    assert_eq!(compile_err(&spec).kind(), ErrorKind::MissingColumn, "lookup first");
}

#[test]
fn non_numeric_y_is_incompatible() {
    let spec = PlotSpec::new(
        ColumnTable::new()
            .with_column("x", ["a", "b"])
            .with_column("y", [Value::from(1.0), Value::from("n/a")]),
    )
    .with_layer(Layer::new("bar", "x", "y"));
    let err = compile_err(&spec);
    assert_eq!(err.kind(), ErrorKind::IncompatibleColumn, "{err}");
    assert!(err.to_string().contains("row 1"), "{err}");
}

#[test]
fn unknown_geom_and_theme_list_alternatives() {
    let spec = bars(&["a"], &[1.0]).with_layer(Layer::new("pie", "x", "y"));
    assert_eq!(
        compile_err(&spec).to_string(),
        "unknown geom 'pie'; registered geoms: bar, line, scatter, waterfall"
    );

    let spec = bars(&["a"], &[1.0]).with_theme("neon");
    assert_eq!(
        compile_err(&spec).to_string(),
        "unknown theme 'neon'; available themes: bluesky, default, print, social, substack"
    );
}

#[test]
fn low_contrast_text_is_rejected() {
    let spec = bars(&["a"], &[1.0]).with_theme(ThemeOverride {
        text: Some("#B7B7B7".into()),
        ..ThemeOverride::default()
    });
    match compile_err(&spec) {
        CompileError::ContrastViolation {
            foreground,
            background,
            ratio,
            minimum,
            ..
        } => {
            assert_eq!(foreground, "#B7B7B7", "foreground named");
            assert_eq!(background, "#FFFFFF", "background named");
            assert!((ratio - 2.0).abs() < 0.05, "ratio {ratio}");
            assert!(close(minimum, 4.5), "body text minimum, got {minimum}");
        }
        other => panic!("expected a contrast violation, got {other}"),
    }
}

#[test]
fn bad_override_color_names_the_field() {
    let spec = bars(&["a"], &[1.0]).with_theme(ThemeOverride {
        base: Some("print".into()),
        grid: Some("not-a-color".into()),
        ..ThemeOverride::default()
    });
    match compile_err(&spec) {
        CompileError::InvalidColor { field, value, .. } => {
            assert_eq!(field, "grid", "field named");
            assert_eq!(value, "not-a-color", "value echoed");
        }
        other => panic!("expected an invalid color, got {other}"),
    }
}

#[test]
fn scale_kinds_must_agree_across_layers() {
    let spec = PlotSpec::new(
        ColumnTable::new()
            .with_column("n", [1.0, 2.0])
            .with_column("c", ["a", "b"])
            .with_column("y", [1.0, 2.0]),
    )
    .with_layer(Layer::new("scatter", "n", "y"))
    .with_layer(Layer::new("bar", "c", "y"));
    let err = compile_err(&spec);
    assert_eq!(
        err.to_string(),
        "x scale conflict: layer 0 (scatter) is numeric but layer 1 (bar) is categorical"
    );
}

#[test]
fn ragged_columns_are_rejected() {
    let spec = PlotSpec::new(
        ColumnTable::new()
            .with_column("a", [1.0, 2.0])
            .with_column("b", [1.0, 2.0, 3.0]),
    );
    assert_eq!(
        compile_err(&spec),
        CompileError::RaggedColumns {
            reference: "a".into(),
            expected: 2,
            column: "b".into(),
            actual: 3,
        },
        "first column is the reference"
    );
}

#[test]
fn non_positive_size_is_invalid() {
    let spec = bars(&["a"], &[1.0]).with_size(0.0, 300.0);
    assert_eq!(compile_err(&spec).kind(), ErrorKind::InvalidSpec, "zero width");
}

#[test]
fn malformed_json_is_invalid_spec() {
    let err = Compiler::new(&GeomRegistry::with_builtins())
        .compile_json("{\"data\": ")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidSpec, "{err}");
}

#[test]
fn empty_spec_still_draws_axes() {
    let plot = compile_ok(&PlotSpec::new(ColumnTable::new()));
    assert!(plot.plot_area.width() >= 1.0, "plot area is never degenerate");
    assert_eq!(
        plot.primitives.first().and_then(Primitive::as_rect).map(|r| r.rect),
        Some(Rect::new(0.0, 0.0, plot.width, plot.height)),
        "background comes first"
    );
    assert!(
        !texts_with_role(&plot, TextRole::AxisTick).is_empty(),
        "fallback domain has ticks"
    );
}

#[test]
fn surviving_labels_never_overlap() {
    let names: Vec<String> = (0..40).map(|i| alloc::format!("category {i}")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let values: Vec<f64> = (0..40).map(|i| f64::from(i) * 1000.5).collect();
    let mut spec = bars(&refs, &values)
        .with_size(320.0, 200.0)
        .with_labels(Labels {
            title: Some("A fairly long title for a narrow canvas".into()),
            subtitle: Some("with a subtitle underneath".into()),
            footnote: Some("Source: synthetic".into()),
            ..Labels::default()
        });
    spec.layers[0] = Layer::new("bar", "x", "y").with_value_labels(Some("{:,.1f}"));
    let plot = compile_ok(&spec);

    let m = HeuristicTextMeasurer;
    let boxes: Vec<Rect> = plot.texts().map(|t| primitive_bounds(t, &m)).collect();
    for (i, a) in boxes.iter().enumerate() {
        for b in &boxes[i + 1..] {
            assert!(!overlaps(*a, *b), "{a:?} overlaps {b:?}");
        }
    }
    assert!(
        texts_with_role(&plot, TextRole::ValueLabel).len() < 40,
        "some value labels are demoted on a crowded canvas"
    );
    assert_eq!(texts_with_role(&plot, TextRole::Title).len(), 1, "title survives");
}

#[test]
fn inside_value_labels_stay_on_their_bar_through_collisions() {
    let text = Theme::default().text;
    let m = HeuristicTextMeasurer;
    let mut inside = 0;
    for v in (40..=200).step_by(7) {
        let v = f64::from(v);
        let mut spec = bars(&["a", "big"], &[v, 1000.0]);
        spec.layers[0] = Layer::new("bar", "x", "y").with_value_labels(None);
        spec.layers.push(Layer::new("bar", "x", "y").with_value_labels(None));
        let plot = compile_ok(&spec);
        let rects = data_rects(&plot);
        for label in texts_with_role(&plot, TextRole::ValueLabel) {
            if label.fill == text {
                continue;
            }
            inside += 1;
            let bounds = primitive_bounds(label, &m);
            assert!(
                rects.iter().any(|r| contains(r.rect, bounds)
                    && contrast_ratio(label.fill, r.fill) >= MIN_BODY_TEXT),
                "value {v}: label '{}' at {bounds:?} left every bar it is readable on",
                label.text
            );
        }
    }
    assert!(inside > 0, "the tall bar carries inside labels");
}

#[test]
fn value_labels_use_the_layer_format() {
    let mut spec = bars(&["a", "b"], &[1200.0, 3400.0]);
    spec.layers[0] = Layer::new("bar", "x", "y").with_value_labels(Some("${:,.0f}"));
    let plot = compile_ok(&spec);
    let labels: Vec<&str> = texts_with_role(&plot, TextRole::ValueLabel)
        .into_iter()
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(labels, vec!["$1,200", "$3,400"], "formatted labels");

    spec.layers[0].label_format = Some("{:x}".into());
    assert_eq!(compile_err(&spec).kind(), ErrorKind::InvalidSpec, "bad template");
}

#[test]
fn waterfall_floats_bars_between_running_totals() {
    let spec = PlotSpec::new(
        ColumnTable::new()
            .with_column("step", ["start", "cost", "gain"])
            .with_column("delta", [10.0, -4.0, 6.0]),
    )
    .with_layer(Layer::new("waterfall", "step", "delta"));
    let plot = compile_ok(&spec);

    let rects: Vec<&RectPrimitive> = plot.rects().filter(|r| r.group.is_some()).collect();
    let groups: Vec<&str> = rects.iter().filter_map(|r| r.group.as_deref()).collect();
    assert_eq!(groups, vec!["positive", "negative", "positive"], "signs");
    // The second bar hangs from the first bar's top.
    assert!(close(rects[1].rect.y0, rects[0].rect.y0), "cost starts at 10");
    // The third bar starts where the second ended.
    assert!(close(rects[2].rect.y1, rects[1].rect.y1), "gain starts at 6");

    let connectors = plot
        .primitives
        .iter()
        .filter(|p| match p {
            Primitive::Line(l) => l.points.len() == 2 && l.points[0].y == l.points[1].y
                && l.points[0].x >= rects[0].rect.x1 - 1e-9
                && l.points[1].x <= rects[2].rect.x0 + 1e-9,
            _ => false,
        })
        .count();
    assert_eq!(connectors, 2, "one connector between each pair of bars");
}

#[test]
fn line_groups_by_color() {
    let spec = PlotSpec::new(
        ColumnTable::new()
            .with_column("t", [1.0, 2.0, 3.0, 1.0, 2.0, 3.0])
            .with_column("v", [1.0, 3.0, 2.0, 2.0, 2.5, 4.0])
            .with_column("s", ["a", "a", "a", "b", "b", "b"]),
    )
    .with_layer(Layer::new("line", "t", "v").with_color("s"));
    let plot = compile_ok(&spec);
    let groups: Vec<&str> = plot
        .primitives
        .iter()
        .filter_map(|p| match p {
            Primitive::Line(l) => l.group.as_deref(),
            _ => None,
        })
        .collect();
    assert_eq!(groups, vec!["a", "b"], "one polyline per series");
    let legend: Vec<&str> = texts_with_role(&plot, TextRole::Legend)
        .into_iter()
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(legend, vec!["a", "b"], "legend lists series in first-seen order");
}

#[test]
fn legend_sits_on_its_side() {
    let base = PlotSpec::new(
        ColumnTable::new()
            .with_column("x", [1.0, 2.0, 3.0])
            .with_column("y", [2.0, 4.0, 3.0])
            .with_column("g", ["north", "south", "north"]),
    )
    .with_layer(Layer::new("scatter", "x", "y").with_color("g"));

    for position in [
        LegendPosition::Top,
        LegendPosition::Bottom,
        LegendPosition::Left,
        LegendPosition::Right,
    ] {
        let spec = base.clone().with_legend(Legend {
            show: true,
            position,
        });
        let plot = compile_ok(&spec);
        let area = plot.plot_area;
        let labels = texts_with_role(&plot, TextRole::Legend);
        assert_eq!(labels.len(), 2, "{position:?}: both entries");
        for t in labels {
            let p = t.position;
            let ok = match position {
                LegendPosition::Top => p.y < area.y0,
                LegendPosition::Bottom => p.y > area.y1,
                LegendPosition::Left => p.x < area.x0,
                LegendPosition::Right => p.x > area.x1,
            };
            assert!(ok, "{position:?}: label at {p:?}, plot {area:?}");
        }
    }

    let hidden = base.with_legend(Legend {
        show: false,
        position: LegendPosition::Right,
    });
    assert!(
        texts_with_role(&compile_ok(&hidden), TextRole::Legend).is_empty(),
        "hidden legend draws nothing"
    );
}

#[test]
fn numeric_color_ramp_draws_endpoint_legend() {
    let spec = PlotSpec::new(
        ColumnTable::new()
            .with_column("x", [1.0, 2.0, 3.0])
            .with_column("y", [2.0, 4.0, 3.0])
            .with_column("heat", [0.0, 5.0, 10.0]),
    )
    .with_layer(Layer::new("scatter", "x", "y").with_color("heat"));
    let plot = compile_ok(&spec);
    let legend: Vec<&str> = texts_with_role(&plot, TextRole::Legend)
        .into_iter()
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(legend, vec!["0", "10"], "ramp endpoints");
}

struct WideMeasurer;

impl TextMeasurer for WideMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let mut m = HeuristicTextMeasurer.measure(text, style);
        m.advance_width *= 3.0;
        m
    }
}

#[test]
fn measurer_drives_the_margins() {
    let mut spec = bars(&["a", "b"], &[12_000.0, 97_000.0]);
    spec.theme = "print".into();
    let registry = GeomRegistry::with_builtins();
    let narrow = Compiler::new(&registry).compile(&spec).unwrap();
    let wide = Compiler::new(&registry)
        .with_measurer(&WideMeasurer)
        .compile(&spec)
        .unwrap();
    assert!(
        wide.plot_area.x0 > narrow.plot_area.x0,
        "wider y tick labels push the plot right: {} vs {}",
        wide.plot_area.x0,
        narrow.plot_area.x0
    );
}

/// A plugin geom: a horizontal rule at each row's y value.
#[derive(Debug)]
struct HRule;

impl Geom for HRule {
    fn name(&self) -> &str {
        "hrule"
    }

    fn validate(&self, input: &LayerInput<'_>) -> Result<(), CompileError> {
        input.require_numeric(self.name(), "y", &input.layer.y)
    }

    fn scale_hint(&self, input: &LayerInput<'_>) -> ScaleHint {
        ScaleHint {
            x: DomainContribution::Empty,
            y: DomainContribution::numeric(input.data, &input.layer.y),
            color: None,
            zero_baseline: false,
        }
    }

    fn compile(
        &self,
        input: &LayerInput<'_>,
        scales: &ResolvedScales,
        ctx: &LayerContext<'_>,
    ) -> Vec<Primitive> {
        input
            .column(&input.layer.y)
            .iter()
            .filter_map(|v| scales.y.map_number(v.as_f64()?))
            .map(|y| {
                Primitive::Line(botplot_core::LinePrimitive {
                    points: vec![
                        kurbo::Point::new(ctx.plot_area.x0, y),
                        kurbo::Point::new(ctx.plot_area.x1, y),
                    ],
                    stroke: ctx.theme.axis,
                    stroke_width: 1.0,
                    group: Some("hrule".into()),
                })
            })
            .collect()
    }
}

#[test]
fn registered_plugins_compile_alongside_builtins() {
    let mut registry = GeomRegistry::with_builtins();
    registry.register(HRule).unwrap();
    let spec = bars(&["a", "b"], &[3.0, 5.0]).with_layer(Layer::new("hrule", "x", "y"));
    let plot = Compiler::new(&registry).compile(&spec).unwrap();
    let rules = plot
        .primitives
        .iter()
        .filter(|p| matches!(p, Primitive::Line(l) if l.group.as_deref() == Some("hrule")))
        .count();
    assert_eq!(rules, 2, "one rule per row");
    assert_eq!(
        compile_err(&spec).kind(),
        ErrorKind::UnknownGeom,
        "the builtin registry does not know the plugin"
    );
}

#[test]
fn themes_come_from_the_given_store() {
    let mut themes = crate::ThemeStore::empty();
    themes.insert("house", crate::Theme::print());
    let registry = GeomRegistry::with_builtins();
    let spec = bars(&["a"], &[1.0]).with_theme("house");
    let plot = Compiler::new(&registry)
        .with_themes(&themes)
        .compile(&spec)
        .unwrap();
    assert!(plot.texts().all(|t| t.font_family.contains("Georgia")), "print fonts");

    let err = Compiler::new(&registry)
        .with_themes(&themes)
        .compile(&bars(&["a"], &[1.0]))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownTheme, "default is not in the custom store");
}
