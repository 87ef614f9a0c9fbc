//! Trace simplification.
//!
//! Reduces a dense rider trace to the points that carry its shape using
//! the Ramer-Douglas-Peucker algorithm. The split ranges are kept on an
//! explicit stack instead of the call stack, so a long pathological trace
//! cannot overflow it.

use log::debug;

use crate::fix::Fix;
use crate::geo::{meters_to_degrees, perpendicular_distance};

/// Default simplification tolerance, in degrees of latitude/longitude.
///
/// This is an angular tolerance, not a physical one: 0.00005 degrees is
/// about 5.5 m north-south everywhere, but shrinks east-west with
/// latitude. Use [`Tolerance::Meters`] when that matters.
pub const DEFAULT_EPSILON_DEG: f64 = 0.00005;

/// How far an interior point may stray from the simplified path before it
/// has to be kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tolerance {
    /// Flat distance on raw degrees.
    Degrees(f64),
    /// Meters. No dropped point strays further than this, in any direction.
    Meters(f64),
}

impl Default for Tolerance {
    fn default() -> Self {
        Tolerance::Degrees(DEFAULT_EPSILON_DEG)
    }
}

impl Tolerance {
    /// Resolve to a degree epsilon.
    pub fn to_degrees(self) -> f64 {
        match self {
            Tolerance::Degrees(eps) => eps,
            Tolerance::Meters(m) => meters_to_degrees(m),
        }
    }
}

/// Simplify a trace with a tolerance in degrees.
///
/// Traces of two points or fewer are returned unchanged. Otherwise the
/// first and last fix are always kept and every dropped fix lies within
/// `epsilon` of the kept segment that replaced it.
pub fn simplify_trace(points: &[Fix], epsilon: f64) -> Vec<Fix> {
    let indices = simplify_trace_indices(points, epsilon);
    let simplified: Vec<Fix> = indices.into_iter().map(|i| points[i].clone()).collect();

    debug!(
        "simplified trace from {} to {} points (epsilon {})",
        points.len(),
        simplified.len(),
        epsilon
    );
    simplified
}

/// Simplify a trace with either tolerance variant.
pub fn simplify_trace_with(points: &[Fix], tolerance: Tolerance) -> Vec<Fix> {
    simplify_trace(points, tolerance.to_degrees())
}

/// Indices of the fixes a simplification keeps, in ascending order.
///
/// A negative or NaN epsilon behaves like zero.
pub fn simplify_trace_indices(points: &[Fix], epsilon: f64) -> Vec<usize> {
    if points.len() <= 2 {
        return (0..points.len()).collect();
    }

    let epsilon = if epsilon > 0.0 { epsilon } else { 0.0 };
    let end = points.len() - 1;

    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[end] = true;

    let mut ranges = vec![(0, end)];
    while let Some((start, end)) = ranges.pop() {
        if end <= start + 1 {
            continue;
        }

        let first = &points[start];
        let last = &points[end];

        // Find the interior point farthest from the segment; the first
        // one wins on ties.
        let mut max_dist = 0.0;
        let mut max_idx = start;
        for (i, p) in points.iter().enumerate().take(end).skip(start + 1) {
            let dist = perpendicular_distance(p, first, last);
            if dist > max_dist {
                max_dist = dist;
                max_idx = i;
            }
        }

        if max_dist > epsilon {
            keep[max_idx] = true;
            // Right half first so the left half is processed next.
            ranges.push((max_idx, end));
            ranges.push((start, max_idx));
        }
    }

    keep.iter()
        .enumerate()
        .filter_map(|(i, &k)| k.then_some(i))
        .collect()
}
