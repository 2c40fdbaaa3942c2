//! Scalar helpers for position comparisons and linear interpolation

/// Absolute tolerance used when comparing positions that should coincide exactly
pub const ZERO_TOLERANCE: f64 = 1.0e-6;

/// Check if two values are equal within `tol`
#[inline]
pub fn is_equal(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

/// Check if `x` lies in `[lo, hi]`, widened by `tol` on both sides
#[inline]
pub fn in_range(lo: f64, x: f64, hi: f64, tol: f64) -> bool {
    lo - tol <= x && x <= hi + tol
}

/// Linearly interpolate the value at `x` on the line through `(x1, y1)` and `(x2, y2)`.
///
/// A degenerate interval returns `y1`.
pub fn lin_interp(x: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = x2 - x1;
    if dx.abs() <= f64::EPSILON {
        return y1;
    }
    y1 + (y2 - y1) * (x - x1) / dx
}

/// Area under a linear function from `w1` to `w2` over `length`
#[inline]
pub fn trapezoid_area(w1: f64, w2: f64, length: f64) -> f64 {
    (w1 + w2) / 2.0 * length
}
