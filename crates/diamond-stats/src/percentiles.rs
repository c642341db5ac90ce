/// Computes a single percentile value from sorted data.
///
/// This function interpolates linearly between the two closest order
/// statistics. For a dataset with n values, the k-th percentile sits at the
/// fractional position `h = (n - 1) * k / 100`, and the result is
/// `x[floor(h)] + (h - floor(h)) * (x[floor(h) + 1] - x[floor(h)])`.
///
/// # Arguments
///
/// * `sorted_values` - Values sorted in ascending order
/// * `percentile` - The percentile to compute (0.0 to 100.0)
///
/// # Returns
///
/// The value at the specified percentile, or `None` if the input is empty.
///
/// # Examples
///
/// ```
/// use diamond_stats::percentiles::compute_percentile;
///
/// let values = [1.0, 2.0, 3.0, 4.0];
///
/// assert_eq!(compute_percentile(&values, 50.0), Some(2.5));
/// assert_eq!(compute_percentile(&values, 25.0), Some(1.75));
/// assert_eq!(compute_percentile(&[], 50.0), None);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn compute_percentile(sorted_values: &[f64], percentile: f64) -> Option<f64> {
    debug_assert!(
        sorted_values.is_sorted_by(|a, b| a <= b),
        "values must be sorted in ascending order"
    );

    let last = sorted_values.len().checked_sub(1)?;
    let position = (last as f64) * percentile.clamp(0.0, 100.0) / 100.0;
    let lower = (position.floor() as usize).min(last);
    let upper = (lower + 1).min(last);
    let fraction = position - position.floor();
    let low_value = sorted_values[lower];
    let high_value = sorted_values[upper];
    Some(low_value + fraction * (high_value - low_value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_value() {
        assert_eq!(compute_percentile(&[7.0], 0.0), Some(7.0));
        assert_eq!(compute_percentile(&[7.0], 50.0), Some(7.0));
        assert_eq!(compute_percentile(&[7.0], 100.0), Some(7.0));
    }

    #[test]
    fn test_bounds_are_min_and_max() {
        let values = [0.5, 1.5, 2.0, 9.0];
        assert_eq!(compute_percentile(&values, 0.0), Some(0.5));
        assert_eq!(compute_percentile(&values, 100.0), Some(9.0));
    }

    #[test]
    fn test_out_of_range_percentile_is_clamped() {
        let values = [1.0, 2.0, 3.0];
        assert_eq!(compute_percentile(&values, -10.0), Some(1.0));
        assert_eq!(compute_percentile(&values, 250.0), Some(3.0));
    }

    #[test]
    fn test_quartiles_of_odd_length() {
        // Positions: 0.25 * 4 = 1.0, 0.75 * 4 = 3.0
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(compute_percentile(&values, 25.0), Some(2.0));
        assert_eq!(compute_percentile(&values, 50.0), Some(3.0));
        assert_eq!(compute_percentile(&values, 75.0), Some(4.0));
    }
}
