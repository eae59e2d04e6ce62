//! Equal-width bin grids.
//!
//! Boundaries are computed as `min + i * width` and the last one is pinned to
//! `max`, so the grid always covers the data range exactly even when
//! `width * n` rounds short. Ranges whose span overflows `f64` (opposite-sign
//! positions near `f64::MAX`) are worked on in halves.

use crate::error::{DistError, Result};

/// Smallest half-width used when a range collapses to a single point.
const MIN_HALF_WIDTH: f64 = 1e-9;

/// Minimum bin width, in ULPs of the range's magnitude.
const MIN_BIN_ULPS: f64 = 4.0;

/// `steps + 1` strictly ascending points from `min` to `max` (inclusive).
pub fn lin_space(min: f64, max: f64, steps: usize) -> Result<Vec<f64>> {
    if !(min.is_finite() && max.is_finite() && max > min) {
        return Err(DistError::configuration(format!(
            "invalid range: min={min}, max={max} (must be finite and max>min)"
        )));
    }
    if steps == 0 {
        return Err(DistError::configuration("bin count must be >= 1"));
    }

    let n = steps as f64;
    let mut out = Vec::with_capacity(steps + 1);
    if (max - min).is_finite() {
        let width = (max - min) / n;
        for i in 0..steps {
            out.push(min + width * i as f64);
        }
    } else {
        let (lo, width) = (min / 2.0, (max / 2.0 - min / 2.0) / n);
        for i in 0..steps {
            out.push((lo + width * i as f64) * 2.0);
        }
    }
    out.push(max);

    if out.windows(2).any(|w| !(w[0] < w[1])) {
        return Err(DistError::configuration(format!(
            "range [{min}, {max}] is too narrow for {steps} bins"
        )));
    }
    Ok(out)
}

/// Widen a range too narrow to hold `bins` distinct bins.
///
/// A single point, or a span under a few ULPs per bin, is widened
/// symmetrically around its midpoint by `max(1e-9, |mid| * 1e-9)` (more if
/// `bins` needs it). The result is clamped to finite values.
pub fn widen_degenerate(min: f64, max: f64, bins: usize) -> (f64, f64) {
    let magnitude = min.abs().max(max.abs());
    let ulp = (magnitude * f64::EPSILON).max(f64::from_bits(1));
    let needed = MIN_BIN_ULPS * bins.max(1) as f64 * ulp;
    if max > min && max - min >= needed {
        return (min, max);
    }

    let mid = min / 2.0 + max / 2.0;
    let half = (mid.abs() * MIN_HALF_WIDTH).max(MIN_HALF_WIDTH).max(needed / 2.0);
    ((mid - half).max(-f64::MAX), (mid + half).min(f64::MAX))
}

/// `(x - lo) / (hi - lo)` without overflowing when the span exceeds `f64::MAX`.
pub fn span_fraction(lo: f64, hi: f64, x: f64) -> f64 {
    if (hi - lo).is_finite() {
        (x - lo) / (hi - lo)
    } else {
        (x / 2.0 - lo / 2.0) / (hi / 2.0 - lo / 2.0)
    }
}

/// `lo + t * (hi - lo)` without overflowing when the span exceeds `f64::MAX`.
pub fn lerp(lo: f64, hi: f64, t: f64) -> f64 {
    if (hi - lo).is_finite() {
        lo + t * (hi - lo)
    } else {
        (lo / 2.0 + t * (hi / 2.0 - lo / 2.0)) * 2.0
    }
}

/// `mass / (upper - lower)` without overflowing when the span exceeds `f64::MAX`.
pub fn density(mass: f64, lower: f64, upper: f64) -> f64 {
    if (upper - lower).is_finite() {
        mass / (upper - lower)
    } else {
        (mass / 2.0) / (upper / 2.0 - lower / 2.0)
    }
}

/// Index of the bin containing `x`.
///
/// Bins are `[b[i], b[i+1])` except the last, which also contains its upper
/// edge. Returns `None` outside `[b[0], b[n]]`. `boundaries` must be strictly
/// ascending.
pub fn locate_bin(boundaries: &[f64], x: f64) -> Option<usize> {
    let n = boundaries.len().checked_sub(1)?;
    let (&lo, &hi) = (boundaries.first()?, boundaries.last()?);
    if n == 0 || !(x >= lo && x <= hi) {
        return None;
    }
    if x == hi {
        return Some(n - 1);
    }

    let mut idx = ((span_fraction(lo, hi, x) * n as f64).floor() as usize).min(n - 1);
    // Arithmetic can land one bin off near an edge; settle against the edges.
    if x < boundaries[idx] {
        idx = idx.saturating_sub(1);
    } else if x >= boundaries[idx + 1] && idx + 1 < n {
        idx += 1;
    }
    if boundaries[idx] <= x && x < boundaries[idx + 1] {
        return Some(idx);
    }
    // Still off (bins only a few ULPs wide): search the edges.
    Some(boundaries.partition_point(|&b| b <= x) - 1)
}
