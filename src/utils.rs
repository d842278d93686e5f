//! Shared helpers for the tolerance-based comparisons used in history
//! assertions.

/// Approximate equality under a relative and an absolute tolerance.
///
/// Two values compare close when their difference is within `rel_tol` of the
/// larger magnitude, or within `abs_tol` outright. The absolute tolerance
/// keeps comparisons against zero meaningful.
pub fn is_close(a: f64, b: f64, rel_tol: f64, abs_tol: f64) -> bool {
    let scaled = rel_tol * a.abs().max(b.abs());
    (a - b).abs() <= scaled.max(abs_tol)
}
