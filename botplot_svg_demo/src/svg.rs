// Copyright 2025 the Botplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG writer for compiled plots.

use std::fmt::Write;

use botplot_core::{CompiledPlot, Primitive, TextAnchor, TextBaseline, path_to_svg};
use peniko::Color;

/// Renders every primitive in paint order.
pub(crate) fn render(plot: &CompiledPlot) -> String {
    let mut out = String::new();
    // Writing into a `String` cannot fail.
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#,
        w = plot.width,
        h = plot.height,
    );
    for primitive in &plot.primitives {
        let _ = write_primitive(&mut out, primitive);
    }
    out.push_str("</svg>\n");
    out
}

fn write_primitive(out: &mut String, primitive: &Primitive) -> std::fmt::Result {
    match primitive {
        Primitive::Rect(r) => {
            write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                r.rect.x0,
                r.rect.y0,
                r.rect.width(),
                r.rect.height(),
            )?;
            write_paint_attr(out, "fill", r.fill)?;
            write_group(out, r.group.as_deref())?;
            out.push_str("/>\n");
        }
        Primitive::Point(p) => {
            write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}""#,
                p.center.x, p.center.y, p.radius
            )?;
            write_paint_attr(out, "fill", p.fill)?;
            write_group(out, p.group.as_deref())?;
            out.push_str("/>\n");
        }
        Primitive::Line(l) => {
            out.push_str(r#"<polyline points=""#);
            for (i, p) in l.points.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                write!(out, "{},{}", p.x, p.y)?;
            }
            out.push_str(r#"" fill="none""#);
            write_paint_attr(out, "stroke", l.stroke)?;
            write!(
                out,
                r#" stroke-width="{}" stroke-linejoin="round" stroke-linecap="round""#,
                l.stroke_width
            )?;
            write_group(out, l.group.as_deref())?;
            out.push_str("/>\n");
        }
        Primitive::Path(p) => {
            write!(out, r#"<path d="{}""#, path_to_svg(&p.path))?;
            match p.fill {
                Some(fill) => write_paint_attr(out, "fill", fill)?,
                None => out.push_str(r#" fill="none""#),
            }
            if let Some(stroke) = p.stroke {
                write_paint_attr(out, "stroke", stroke)?;
                write!(out, r#" stroke-width="{}""#, p.stroke_width)?;
            }
            write_group(out, p.group.as_deref())?;
            out.push_str("/>\n");
        }
        Primitive::Text(t) => {
            let baseline = match t.baseline {
                TextBaseline::Middle => "middle",
                TextBaseline::Alphabetic => "alphabetic",
                TextBaseline::Hanging => "hanging",
            };
            write!(
                out,
                r#"<text x="{}" y="{}" font-size="{}" font-family="{}" font-weight="{}" dominant-baseline="{}""#,
                t.position.x,
                t.position.y,
                t.font_size,
                escape_xml(&t.font_family),
                t.font_weight,
                baseline
            )?;
            if t.angle != 0.0 {
                write!(
                    out,
                    r#" transform="rotate({} {} {})""#,
                    t.angle, t.position.x, t.position.y
                )?;
            }
            out.push_str(match t.anchor {
                TextAnchor::Start => r#" text-anchor="start""#,
                TextAnchor::Middle => r#" text-anchor="middle""#,
                TextAnchor::End => r#" text-anchor="end""#,
            });
            write_paint_attr(out, "fill", t.fill)?;
            out.push('>');
            out.push_str(&escape_xml(&t.text));
            out.push_str("</text>\n");
        }
    }
    Ok(())
}

fn svg_paint(color: Color) -> (String, Option<f64>) {
    let rgba = color.to_rgba8();
    let value = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
    let opacity = (rgba.a != 255).then(|| f64::from(rgba.a) / 255.0);
    (value, opacity)
}

fn write_paint_attr(out: &mut String, name: &str, color: Color) -> std::fmt::Result {
    let (value, opacity) = svg_paint(color);
    write!(out, r#" {name}="{value}""#)?;
    if let Some(o) = opacity {
        write!(out, r#" {name}-opacity="{o}""#)?;
    }
    Ok(())
}

fn write_group(out: &mut String, group: Option<&str>) -> std::fmt::Result {
    match group {
        Some(g) => write!(out, r#" data-group="{}""#, escape_xml(g)),
        None => Ok(()),
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
