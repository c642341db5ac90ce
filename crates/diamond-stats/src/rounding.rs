/// Rounds `value` to `digits` decimal places, half away from zero.
///
/// Non-finite values are returned unchanged.
///
/// # Examples
///
/// ```
/// use diamond_stats::rounding::round_to;
///
/// assert_eq!(round_to(0.3004, 3), 0.3);
/// assert_eq!(round_to(1.005_1, 2), 1.01);
/// assert_eq!(round_to(-2.345_6, 1), -2.3);
/// ```
#[must_use]
pub fn round_to(value: f64, digits: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10_f64.powi(digits);
    (value * scale).round() / scale
}

/// Computes `numerator / denominator` rounded to `digits` decimal places.
///
/// Returns `None` when the denominator is zero, so that an undefined ratio
/// is carried as a missing value instead of NaN.
///
/// # Examples
///
/// ```
/// use diamond_stats::rounding::ratio;
///
/// assert_eq!(ratio(150, 500, 3), Some(0.3));
/// assert_eq!(ratio(3, 0, 3), None);
/// ```
#[must_use]
pub fn ratio(numerator: u32, denominator: u32, digits: i32) -> Option<f64> {
    (denominator != 0)
        .then(|| round_to(f64::from(numerator) / f64::from(denominator), digits))
}
