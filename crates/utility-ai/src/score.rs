//! Score normalization and aggregation formulas.

/// Clamps a raw consideration output into `[0, 1]`.
///
/// NaN maps to `0.0` so a broken input can never win a selection.
#[inline]
pub fn clamp_score(raw: f64) -> f64 {
    if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 1.0) }
}

/// Applies the compensation factor to a raw product of `count` scores.
///
/// ```text
/// mod_factor = 1 - 1 / count
/// makeup     = (1 - raw) * mod_factor
/// final      = raw + makeup * raw
/// ```
///
/// A single consideration is returned unchanged (`mod_factor == 0`). A raw
/// product of exactly `0` stays `0`. `count == 0` has no defined factor and
/// yields `raw` untouched; [`crate::Choice`] never calls it that way.
#[inline]
pub fn compensate(raw: f64, count: usize) -> f64 {
    if count == 0 {
        return raw;
    }
    let mod_factor = 1.0 - 1.0 / count as f64;
    let makeup = (1.0 - raw) * mod_factor;
    raw + makeup * raw
}
