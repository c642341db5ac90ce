use serde::Serialize;

use crate::{percentiles, rounding};

/// Descriptive statistics summarizing a dataset.
///
/// This structure holds the five-number summary (minimum, first quartile,
/// median, third quartile, maximum), the arithmetic mean, and the sample
/// variance of a dataset of `f64` values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveStats {
    /// The number of values in the dataset.
    pub count: usize,
    /// The minimum value in the dataset.
    pub min: f64,
    /// The 25th percentile (linear interpolation).
    pub first_quartile: f64,
    /// The median value of the dataset.
    pub median: f64,
    /// The arithmetic mean (average) of the dataset.
    pub mean: f64,
    /// The 75th percentile (linear interpolation).
    pub third_quartile: f64,
    /// The maximum value in the dataset.
    pub max: f64,
    /// The sample variance (`n - 1` denominator).
    ///
    /// `None` when the dataset holds a single value.
    pub variance: Option<f64>,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from unsorted values.
    ///
    /// This method will sort the values internally before computing statistics.
    ///
    /// # Arguments
    ///
    /// * `values` - An iterator over `f64` values, collected and sorted internally.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use diamond_stats::descriptive::DescriptiveStats;
    /// let values = [5.0, 2.0, 4.0, 1.0, 3.0];
    /// let stats = DescriptiveStats::new(values).unwrap();
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// assert_eq!(stats.median, 3.0);
    ///
    /// assert!(DescriptiveStats::new(Vec::<f64>::new()).is_none());
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes descriptive statistics from pre-sorted values.
    ///
    /// This is an optimized version that skips the sorting step.
    /// Use this when you already have sorted data to avoid unnecessary work.
    ///
    /// # Arguments
    ///
    /// * `sorted_values` - Values sorted in ascending order
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let count = sorted_values.len();
        let n = count as f64;
        let mean = sorted_values.iter().sum::<f64>() / n;
        let variance = (count > 1).then(|| {
            sorted_values
                .iter()
                .map(|v| (v - mean).powi(2))
                .sum::<f64>()
                / (n - 1.0)
        });

        Some(Self {
            count,
            min,
            first_quartile: percentiles::compute_percentile(sorted_values, 25.0)?,
            median: percentiles::compute_percentile(sorted_values, 50.0)?,
            mean,
            third_quartile: percentiles::compute_percentile(sorted_values, 75.0)?,
            max,
            variance,
        })
    }

    /// Returns the sample standard deviation, if the variance is defined.
    #[must_use]
    pub fn std_dev(&self) -> Option<f64> {
        self.variance.map(f64::sqrt)
    }

    /// Returns a copy with every statistic rounded to `digits` decimal places.
    ///
    /// # Examples
    ///
    /// ```
    /// # use diamond_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::new([0.1234, 0.5678]).unwrap().rounded(3);
    /// assert_eq!(stats.min, 0.123);
    /// assert_eq!(stats.max, 0.568);
    /// ```
    #[must_use]
    pub fn rounded(&self, digits: i32) -> Self {
        let round = |v: f64| rounding::round_to(v, digits);
        Self {
            count: self.count,
            min: round(self.min),
            first_quartile: round(self.first_quartile),
            median: round(self.median),
            mean: round(self.mean),
            third_quartile: round(self.third_quartile),
            max: round(self.max),
            variance: self.variance.map(round),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values() {
        assert!(DescriptiveStats::new(Vec::new()).is_none());
    }

    #[test]
    fn test_single_value_has_no_variance() {
        let stats = DescriptiveStats::new([0.42]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.min, 0.42);
        assert_eq!(stats.first_quartile, 0.42);
        assert_eq!(stats.median, 0.42);
        assert_eq!(stats.third_quartile, 0.42);
        assert_eq!(stats.max, 0.42);
        assert_eq!(stats.variance, None);
        assert_eq!(stats.std_dev(), None);
    }

    #[test]
    fn test_even_length_summary() {
        let stats = DescriptiveStats::new([4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.first_quartile, 1.75);
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.mean, 2.5);
        assert_eq!(stats.third_quartile, 3.25);
        assert_eq!(stats.max, 4.0);
        // ((1.5^2 + 0.5^2) * 2) / 3
        let variance = stats.variance.unwrap();
        assert!((variance - 5.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_rounded_keeps_missing_variance() {
        let stats = DescriptiveStats::new([1.23456]).unwrap().rounded(3);
        assert_eq!(stats.mean, 1.235);
        assert_eq!(stats.variance, None);
    }

    #[test]
    #[should_panic(expected = "values must be sorted")]
    fn test_from_sorted_rejects_unsorted() {
        let _ = DescriptiveStats::from_sorted(&[3.0, 1.0]);
    }
}
