// Copyright 2025 the Botplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Positioned drawables: the compiler's output contract.
//!
//! Every geom emits these and every renderer draws them. Coordinates are pixels with the
//! origin at the top-left of the canvas and y growing downward. Primitives carry their own
//! style and never point back at the data they came from.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

use kurbo::{BezPath, PathEl, Point, Rect};
use peniko::Color;
use serde::{Serialize, Serializer};

use crate::color;

/// Horizontal text alignment relative to the anchor point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAnchor {
    /// The anchor is the start of the text.
    Start,
    /// The anchor is the horizontal center.
    Middle,
    /// The anchor is the end of the text.
    End,
}

/// Vertical text alignment relative to the anchor point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextBaseline {
    /// The anchor sits on the alphabetic baseline (text extends upward).
    Alphabetic,
    /// The anchor is the vertical middle of the line box.
    Middle,
    /// The anchor is the top of the line box (text extends downward).
    Hanging,
}

/// What a text primitive is for. Layout uses this to rank labels when they collide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextRole {
    /// Plot title.
    Title,
    /// Plot subtitle.
    Subtitle,
    /// X or y axis title.
    AxisTitle,
    /// Footnote line.
    Footnote,
    /// Legend entry label.
    Legend,
    /// Axis tick label.
    AxisTick,
    /// Per-datum value label.
    ValueLabel,
}

/// A filled circle.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PointPrimitive {
    /// Center.
    pub center: Point,
    /// Radius in pixels.
    pub radius: f64,
    /// Fill color.
    #[serde(serialize_with = "color::serialize")]
    pub fill: Color,
    /// Optional group tag (the color category).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// A stroked open polyline (two points for a rule).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LinePrimitive {
    /// Vertices in drawing order.
    pub points: Vec<Point>,
    /// Stroke color.
    #[serde(serialize_with = "color::serialize")]
    pub stroke: Color,
    /// Stroke width in pixels.
    pub stroke_width: f64,
    /// Optional group tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// An axis-aligned filled rectangle (bars, backgrounds, legend swatches).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RectPrimitive {
    /// Rectangle in pixels (`x0 <= x1`, `y0 <= y1`).
    pub rect: Rect,
    /// Fill color.
    #[serde(serialize_with = "color::serialize")]
    pub fill: Color,
    /// Optional group tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// A single line of text.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TextPrimitive {
    /// Anchor point.
    pub position: Point,
    /// Text content.
    pub text: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// CSS font family list.
    pub font_family: String,
    /// CSS font weight.
    pub font_weight: u16,
    /// Fill color.
    #[serde(serialize_with = "color::serialize")]
    pub fill: Color,
    /// Horizontal alignment.
    pub anchor: TextAnchor,
    /// Vertical alignment.
    pub baseline: TextBaseline,
    /// Clockwise rotation in degrees around `position`.
    pub angle: f64,
    /// What the label is for.
    pub role: TextRole,
    /// Shape the label is drawn on, when its fill was chosen against that shape's color.
    ///
    /// Collision resolution keeps such a label inside this rectangle or drops it. Layout
    /// only; never serialized.
    #[serde(skip)]
    pub container: Option<Rect>,
}

/// An arbitrary path, optionally filled and/or stroked.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PathPrimitive {
    /// Geometry, serialized as SVG path data.
    #[serde(serialize_with = "serialize_path")]
    pub path: BezPath,
    /// Fill color, if filled.
    #[serde(serialize_with = "color::serialize_option")]
    pub fill: Option<Color>,
    /// Stroke color, if stroked.
    #[serde(serialize_with = "color::serialize_option")]
    pub stroke: Option<Color>,
    /// Stroke width in pixels.
    pub stroke_width: f64,
    /// Optional group tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// The closed set of drawables.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    /// A filled circle.
    Point(PointPrimitive),
    /// A stroked polyline.
    Line(LinePrimitive),
    /// A filled rectangle.
    Rect(RectPrimitive),
    /// A line of text.
    Text(TextPrimitive),
    /// A general path.
    Path(PathPrimitive),
}

impl Primitive {
    /// Returns the text payload, if this is a text primitive.
    pub fn as_text(&self) -> Option<&TextPrimitive> {
        match self {
            Self::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Returns the rect payload, if this is a rect primitive.
    pub fn as_rect(&self) -> Option<&RectPrimitive> {
        match self {
            Self::Rect(r) => Some(r),
            _ => None,
        }
    }

    /// Geometric bounds of non-text primitives (stroke width ignored).
    ///
    /// Text bounds depend on font metrics and are computed by the compiler's layout pass.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Point(p) => Some(Rect::from_center_size(
                p.center,
                (2.0 * p.radius, 2.0 * p.radius),
            )),
            Self::Line(l) => l
                .points
                .iter()
                .map(|p| Rect::from_points(*p, *p))
                .reduce(|a, b| a.union(b)),
            Self::Rect(r) => Some(r.rect),
            Self::Path(p) => {
                use kurbo::Shape;
                Some(p.path.bounding_box())
            }
            Self::Text(_) => None,
        }
    }
}

/// The terminal artifact of one compile.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CompiledPlot {
    /// Canvas width in pixels.
    pub width: f64,
    /// Canvas height in pixels.
    pub height: f64,
    /// Canvas background color.
    #[serde(serialize_with = "color::serialize")]
    pub background: Color,
    /// The plot (data) area after margins.
    pub plot_area: Rect,
    /// Primitives in paint order.
    pub primitives: Vec<Primitive>,
}

impl CompiledPlot {
    /// Serializes the plot to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the plot to indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// All text primitives in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.primitives.iter().filter_map(Primitive::as_text)
    }

    /// All rect primitives in paint order.
    pub fn rects(&self) -> impl Iterator<Item = &RectPrimitive> {
        self.primitives.iter().filter_map(Primitive::as_rect)
    }
}

/// Formats a path as SVG path data (`M`, `L`, `Q`, `C`, `Z`).
pub fn path_to_svg(path: &BezPath) -> String {
    let mut out = String::new();
    for (i, el) in path.elements().iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        // Writing into a `String` cannot fail.
        let _ = match *el {
            PathEl::MoveTo(p) => write!(out, "M{},{}", p.x, p.y),
            PathEl::LineTo(p) => write!(out, "L{},{}", p.x, p.y),
            PathEl::QuadTo(a, p) => write!(out, "Q{},{} {},{}", a.x, a.y, p.x, p.y),
            PathEl::CurveTo(a, b, p) => {
                write!(out, "C{},{} {},{} {},{}", a.x, a.y, b.x, b.y, p.x, p.y)
            }
            PathEl::ClosePath => write!(out, "Z"),
        };
    }
    out
}

fn serialize_path<S: Serializer>(path: &BezPath, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path_to_svg(path))
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn primitives_are_tagged_by_kind() {
        let p = Primitive::Rect(RectPrimitive {
            rect: Rect::new(1.0, 2.0, 3.0, 4.0),
            fill: Color::from_rgb8(0x4E, 0x79, 0xA7),
            group: None,
        });
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.starts_with(r#"{"kind":"rect""#), "{json}");
        assert!(json.contains(r##""fill":"#4E79A7""##), "{json}");
        assert!(!json.contains("group"), "unset group is omitted: {json}");
    }

    #[test]
    fn text_serializes_anchor_and_role() {
        let t = Primitive::Text(TextPrimitive {
            position: Point::new(0.0, 0.0),
            text: "hi".into(),
            font_size: 10.0,
            font_family: "sans-serif".into(),
            font_weight: 400,
            fill: Color::from_rgb8(0, 0, 0),
            anchor: TextAnchor::Middle,
            baseline: TextBaseline::Hanging,
            angle: 0.0,
            role: TextRole::AxisTick,
            container: Some(Rect::new(0.0, 0.0, 20.0, 20.0)),
        });
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains(r#""anchor":"middle""#), "{json}");
        assert!(json.contains(r#""baseline":"hanging""#), "{json}");
        assert!(json.contains(r#""role":"axis_tick""#), "{json}");
        assert!(!json.contains("container"), "layout-only field is not serialized: {json}");
    }

    #[test]
    fn path_data_is_svg() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 5.5));
        path.close_path();
        assert_eq!(path_to_svg(&path), "M0,0 L10,5.5 Z");
    }

    #[test]
    fn line_bounds_cover_all_points() {
        let line = Primitive::Line(LinePrimitive {
            points: vec![Point::new(5.0, 1.0), Point::new(-1.0, 8.0), Point::new(2.0, 3.0)],
            stroke: Color::from_rgb8(0, 0, 0),
            stroke_width: 1.0,
            group: None,
        });
        assert_eq!(line.bounds(), Some(Rect::new(-1.0, 1.0, 5.0, 8.0)));
    }
}
