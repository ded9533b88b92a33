// Copyright 2025 the Botplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text label collision resolution.
//!
//! Labels are placed greedily in priority order (by [`TextRole`], ties broken by emission
//! order). Each label tries its original position, then a few role-specific alternatives;
//! a label that cannot be placed without overlapping an already-placed one is dropped.
//! A label with a [`container`](TextPrimitive::container) only accepts positions that keep
//! its box inside that container, since its fill was picked against the container's color.
//! Surviving labels keep their emission order.

use alloc::vec::Vec;

use botplot_core::{TextAnchor, TextBaseline, TextPrimitive, TextRole};
use botplot_text::TextMeasurer;
use kurbo::{Point, Rect};
use smallvec::SmallVec;

use crate::text::{primitive_bounds, primitive_size};

/// Vertical distance of one value-label nudge.
pub const NUDGE_STEP: f64 = 3.0;
/// Nudges tried in each direction.
pub const MAX_NUDGES: usize = 4;
/// Boxes closer than this still count as touching, not overlapping.
const OVERLAP_EPS: f64 = 1e-6;

type Candidates = SmallVec<[(Point, TextAnchor); 12]>;

/// Returns `true` if the interiors of `a` and `b` intersect.
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 - OVERLAP_EPS
        && b.x0 < a.x1 - OVERLAP_EPS
        && a.y0 < b.y1 - OVERLAP_EPS
        && b.y0 < a.y1 - OVERLAP_EPS
}

/// Returns `true` if `inner` lies within `outer`.
pub fn contains(outer: Rect, inner: Rect) -> bool {
    inner.x0 >= outer.x0 - OVERLAP_EPS
        && inner.x1 <= outer.x1 + OVERLAP_EPS
        && inner.y0 >= outer.y0 - OVERLAP_EPS
        && inner.y1 <= outer.y1 + OVERLAP_EPS
}

fn candidates(text: &TextPrimitive, measurer: &dyn TextMeasurer) -> Candidates {
    let p = text.position;
    let mut out = Candidates::new();
    out.push((p, text.anchor));
    match text.role {
        TextRole::ValueLabel => {
            for k in 1..=MAX_NUDGES {
                let dy = k as f64 * NUDGE_STEP;
                out.push((Point::new(p.x, p.y - dy), text.anchor));
                out.push((Point::new(p.x, p.y + dy), text.anchor));
            }
            for anchor in [TextAnchor::Start, TextAnchor::End] {
                if anchor != text.anchor {
                    out.push((p, anchor));
                }
            }
        }
        TextRole::AxisTick if text.angle == 0.0 && text.baseline == TextBaseline::Hanging => {
            let (_, line_height) = primitive_size(text, measurer);
            out.push((Point::new(p.x, p.y + line_height), text.anchor));
        }
        _ => {}
    }
    out
}

/// Drops or moves labels until no two surviving label boxes overlap.
pub fn resolve_collisions(texts: Vec<TextPrimitive>, measurer: &dyn TextMeasurer) -> Vec<TextPrimitive> {
    let mut order: Vec<usize> = (0..texts.len()).collect();
    order.sort_by_key(|&i| (texts[i].role, i));

    let mut placed: Vec<(usize, TextPrimitive, Rect)> = Vec::with_capacity(texts.len());
    for i in order {
        let text = &texts[i];
        let mut accepted = None;
        for (position, anchor) in candidates(text, measurer) {
            let mut moved = text.clone();
            moved.position = position;
            moved.anchor = anchor;
            let bounds = primitive_bounds(&moved, measurer);
            if text.container.is_some_and(|c| !contains(c, bounds)) {
                continue;
            }
            if placed.iter().all(|(_, _, other)| !overlaps(bounds, *other)) {
                accepted = Some((moved, bounds));
                break;
            }
        }
        match accepted {
            Some((moved, bounds)) => {
                if moved.position != text.position || moved.anchor != text.anchor {
                    log::trace!("moved {:?} label '{}'", text.role, text.text);
                }
                placed.push((i, moved, bounds));
            }
            None => log::debug!("demoted {:?} label '{}'", text.role, text.text),
        }
    }

    placed.sort_by_key(|(i, _, _)| *i);
    placed.into_iter().map(|(_, t, _)| t).collect()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use botplot_text::HeuristicTextMeasurer;
    use peniko::Color;

    use super::*;
    use crate::theme::Theme;

    fn label(role: TextRole, text: &str, x: f64, y: f64) -> TextPrimitive {
        Theme::default().label(
            role,
            text,
            Point::new(x, y),
            TextAnchor::Middle,
            TextBaseline::Middle,
        )
    }

    fn assert_disjoint(texts: &[TextPrimitive]) {
        let m = HeuristicTextMeasurer;
        for (i, a) in texts.iter().enumerate() {
            for b in &texts[i + 1..] {
                assert!(
                    !overlaps(primitive_bounds(a, &m), primitive_bounds(b, &m)),
                    "'{}' overlaps '{}'",
                    a.text,
                    b.text
                );
            }
        }
    }

    #[test]
    fn touching_boxes_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!overlaps(a, Rect::new(10.0, 0.0, 20.0, 10.0)), "shared edge");
        assert!(overlaps(a, Rect::new(9.0, 9.0, 20.0, 20.0)), "shared corner area");
    }

    #[test]
    fn higher_priority_wins_regardless_of_order() {
        let texts = vec![
            label(TextRole::AxisTick, "100", 50.0, 50.0),
            label(TextRole::Title, "Title", 50.0, 50.0),
        ];
        let out = resolve_collisions(texts, &HeuristicTextMeasurer);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].role, TextRole::Title);
    }

    #[test]
    fn value_labels_nudge_before_demotion() {
        let texts = vec![
            label(TextRole::ValueLabel, "12", 50.0, 50.0),
            label(TextRole::ValueLabel, "13", 52.0, 52.0),
        ];
        let out = resolve_collisions(texts, &HeuristicTextMeasurer);
        assert_eq!(out.len(), 2, "second label finds a nudged slot");
        assert_eq!(out[0].position, Point::new(50.0, 50.0));
        assert_ne!(out[1].position, Point::new(52.0, 52.0));
        assert_disjoint(&out);
    }

    #[test]
    fn contained_labels_never_leave_their_container() {
        // Inside labels of two coincident bars: white text chosen against the bar color.
        let bar = Rect::new(30.0, 40.0, 70.0, 60.0);
        let inside = |text: &str| {
            let mut t = label(TextRole::ValueLabel, text, 50.0, 50.0);
            t.fill = Color::WHITE;
            t.container = Some(bar);
            t
        };
        let out = resolve_collisions(vec![inside("47"), inside("47")], &HeuristicTextMeasurer);
        assert_eq!(out.len(), 1, "the second label has no free slot inside the bar");
        let bounds = primitive_bounds(&out[0], &HeuristicTextMeasurer);
        assert!(contains(bar, bounds), "{bounds:?} escaped {bar:?}");
    }

    #[test]
    fn contained_labels_nudge_within_a_tall_container() {
        let bar = Rect::new(30.0, 0.0, 70.0, 200.0);
        let blocker = label(TextRole::AxisTick, "47", 50.0, 100.0);
        let mut inside = label(TextRole::ValueLabel, "47", 50.0, 100.0);
        inside.container = Some(bar);
        let out = resolve_collisions(vec![blocker, inside], &HeuristicTextMeasurer);
        assert_eq!(out.len(), 2, "a nudge inside the bar resolves the overlap");
        assert!(contains(bar, primitive_bounds(&out[1], &HeuristicTextMeasurer)), "still inside");
        assert_disjoint(&out);
    }

    #[test]
    fn x_ticks_stagger_one_line_down() {
        let theme = Theme::default();
        let tick = |text: &str, x: f64| {
            theme.label(
                TextRole::AxisTick,
                text,
                Point::new(x, 100.0),
                TextAnchor::Middle,
                TextBaseline::Hanging,
            )
        };
        let out = resolve_collisions(
            vec![tick("Northeast", 50.0), tick("Southeast", 70.0)],
            &HeuristicTextMeasurer,
        );
        assert_eq!(out.len(), 2);
        assert!(out[1].position.y > 100.0, "second tick staggered");
        assert_disjoint(&out);
    }

    #[test]
    fn unplaceable_labels_are_dropped_and_survivors_keep_order() {
        let texts = vec![
            label(TextRole::Footnote, "note", 10.0, 10.0),
            label(TextRole::AxisTitle, "a wide axis title", 12.0, 10.0),
            label(TextRole::Legend, "far away", 500.0, 500.0),
        ];
        let out = resolve_collisions(texts, &HeuristicTextMeasurer);
        let names: Vec<_> = out.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(names, vec!["a wide axis title", "far away"]);
    }
}
