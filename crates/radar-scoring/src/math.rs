//! Numeric helpers shared by every formula.

/// Logistic function mapping any real number into `(0, 1)`.
#[must_use]
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// `ln(1 + x)` with negative inputs treated as zero.
///
/// Negative counts are silently floored rather than rejected; this keeps the
/// log in its domain and is not a validation step.
#[must_use]
pub fn log1p(x: f64) -> f64 {
    x.max(0.0).ln_1p()
}

/// Restrict `value` to `[lo, hi]`.
///
/// Unlike [`f64::clamp`] this never panics on a reversed range and maps `NaN`
/// to `lo`.
#[must_use]
pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() {
        return lo;
    }
    lo.max(hi.min(value))
}

/// Clamp to the unit interval.
#[must_use]
pub fn unit(value: f64) -> f64 {
    clamp(value, 0.0, 1.0)
}

/// Round half away from zero to `decimals` places.
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}
