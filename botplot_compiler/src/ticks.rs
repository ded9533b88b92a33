// Copyright 2025 the Botplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Heckbert "nice number" tick generation.
//!
//! Steps are always `{1, 2, 5} x 10^k`. For a domain `[lo, hi]` and a target count `n`
//! the generator picks the **smallest** nice step whose aligned cover
//! `[floor(lo / s) * s, ceil(hi / s) * s]` has at most `n` intervals, starting the search
//! at the largest nice number not above `(hi - lo) / n`.
//!
//! Picking the smallest valid step makes generation idempotent: regenerating from the
//! first and last emitted tick with the same target yields the same ticks, because the
//! cover of a wider domain can only need more intervals than the cover of a narrower one.

use alloc::vec;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Relative slack when testing whether a bound sits on a step multiple.
const ALIGN_EPS: f64 = 1e-9;
/// Upper bound on the number of candidate steps tried.
const MAX_STEP_CANDIDATES: usize = 64;
/// Upper bound on the requested interval count.
const MAX_TARGET: usize = 1000;

/// Tick values plus the step that produced them.
#[derive(Clone, Debug, PartialEq)]
pub struct Ticks {
    /// Tick values in ascending order.
    pub values: Vec<f64>,
    /// Distance between adjacent ticks; `0.0` for a single degenerate tick.
    pub step: f64,
}

impl Ticks {
    /// First tick.
    pub fn first(&self) -> Option<f64> {
        self.values.first().copied()
    }

    /// Last tick.
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    fn single(v: f64) -> Self {
        Self {
            values: vec![v],
            step: 0.0,
        }
    }
}

/// A nice step held as `mantissa x 10^exp` so stepping up and rounding stay exact.
#[derive(Clone, Copy, Debug)]
struct NiceStep {
    mantissa: u8,
    exp: i32,
}

impl NiceStep {
    /// Largest nice step not above `raw`.
    fn floor_of(raw: f64) -> Self {
        #[allow(clippy::cast_possible_truncation, reason = "log10 of a finite f64 fits in i32")]
        let mut exp = raw.log10().floor() as i32;
        let mut base = pow10(exp);
        // Guard against log10 landing one decade off near exact powers of ten.
        if base > raw {
            exp -= 1;
            base = pow10(exp);
        } else if base * 10.0 <= raw {
            exp += 1;
            base = pow10(exp);
        }
        let f = raw / base;
        let mantissa = if f >= 5.0 {
            5
        } else if f >= 2.0 {
            2
        } else {
            1
        };
        Self { mantissa, exp }
    }

    fn next(self) -> Self {
        match self.mantissa {
            1 => Self {
                mantissa: 2,
                exp: self.exp,
            },
            2 => Self {
                mantissa: 5,
                exp: self.exp,
            },
            _ => Self {
                mantissa: 1,
                exp: self.exp + 1,
            },
        }
    }

    fn value(self) -> f64 {
        f64::from(self.mantissa) * pow10(self.exp)
    }

    /// Decimal places needed to print multiples of this step exactly.
    fn decimals(self) -> i32 {
        (-self.exp).max(0)
    }
}

fn pow10(exp: i32) -> f64 {
    if exp >= 0 {
        10_f64.powi(exp)
    } else {
        1.0 / 10_f64.powi(-exp)
    }
}

/// Number of intervals in the aligned cover of `[lo, hi]` for step `s`, and its first index.
fn cover(lo: f64, hi: f64, s: f64) -> (f64, f64) {
    let k0 = (lo / s + ALIGN_EPS).floor();
    let k1 = (hi / s - ALIGN_EPS).ceil();
    (k0, (k1 - k0).max(0.0))
}

fn round_to(v: f64, decimals: i32) -> f64 {
    let scale = pow10(decimals);
    let r = (v * scale).round() / scale;
    // Normalize -0.0.
    if r == 0.0 { 0.0 } else { r }
}

/// Generates nice ticks covering `[lo, hi]` with at most `target` intervals.
///
/// Bounds may be given in either order. Degenerate input (equal bounds, or a non-finite
/// bound) yields a single tick. A `target` below 2 is treated as 2.
pub fn nice_ticks(lo: f64, hi: f64, target: usize) -> Ticks {
    match (lo.is_finite(), hi.is_finite()) {
        (true, true) => {}
        (true, false) => return Ticks::single(lo),
        (false, true) => return Ticks::single(hi),
        (false, false) => return Ticks::single(0.0),
    }
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    if lo == hi {
        return Ticks::single(lo);
    }

    let target = target.clamp(2, MAX_TARGET);
    let target_f = target as f64;
    let raw = (hi - lo) / target_f;
    if !raw.is_finite() || raw <= 0.0 {
        return Ticks::single(lo);
    }

    let mut step = NiceStep::floor_of(raw);
    let (mut k0, mut n) = cover(lo, hi, step.value());
    for _ in 0..MAX_STEP_CANDIDATES {
        if n <= target_f {
            break;
        }
        step = step.next();
        (k0, n) = cover(lo, hi, step.value());
    }

    let s = step.value();
    let decimals = step.decimals();
    #[allow(
        clippy::cast_possible_truncation,
        reason = "n is a non-negative whole number of intervals bounded by the target"
    )]
    let n = n.min(target_f) as usize;
    let values = (0..=n)
        .map(|i| round_to((k0 + i as f64) * s, decimals))
        .collect();
    Ticks { values, step: s }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn zero_to_97_snaps_to_twenty() {
        let t = nice_ticks(0.0, 97.0, 5);
        assert_eq!(t.step, 20.0);
        assert_eq!(t.values, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    }

    #[test]
    fn ticks_bracket_the_data() {
        let t = nice_ticks(3.2, 47.9, 5);
        assert!(t.first().unwrap() <= 3.2, "{t:?}");
        assert!(t.last().unwrap() >= 47.9, "{t:?}");
        assert!(t.values.len() - 1 <= 5, "{t:?}");
    }

    #[test]
    fn regenerating_from_ticks_is_idempotent() {
        let cases = [
            (0.0, 97.0, 5),
            (-3.7, 12.2, 5),
            (0.013, 0.092, 4),
            (1234.0, 98765.0, 6),
            (-0.5, 0.5, 3),
            (7.0, 7.3, 5),
            (-250.0, -12.0, 5),
            (0.0, 1.0, 2),
        ];
        for (lo, hi, n) in cases {
            let a = nice_ticks(lo, hi, n);
            let b = nice_ticks(a.first().unwrap(), a.last().unwrap(), n);
            assert_eq!(a, b, "not idempotent for [{lo}, {hi}] / {n}");
        }
    }

    #[test]
    fn reversed_bounds_are_accepted() {
        assert_eq!(nice_ticks(97.0, 0.0, 5), nice_ticks(0.0, 97.0, 5));
    }

    #[test]
    fn degenerate_domains_yield_one_tick() {
        assert_eq!(nice_ticks(5.0, 5.0, 5).values, vec![5.0]);
        assert_eq!(nice_ticks(f64::NAN, 3.0, 5).values, vec![3.0]);
        assert_eq!(nice_ticks(f64::NAN, f64::INFINITY, 5).values, vec![0.0]);
    }

    #[test]
    fn small_targets_are_clamped() {
        let t = nice_ticks(0.0, 10.0, 0);
        assert!(t.values.len() >= 2, "{t:?}");
        assert!(t.values.len() <= 3, "{t:?}");
    }

    #[test]
    fn fractional_steps_round_cleanly() {
        let t = nice_ticks(0.0, 0.3, 3);
        assert_eq!(t.values, vec![0.0, 0.1, 0.2, 0.3]);
    }
}
