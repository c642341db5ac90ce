//! Decade summaries of the OBP/SLG coefficient ratio.
//!
//! Bucket `i` (for `i = 1, 2, …`) covers `1900 + 10·i ≤ year < 1910 + 10·i`,
//! so the first bucket is 1910–1919. Seasons before 1910 belong to no bucket.
//! Buckets run up to the one holding the latest season; a bucket with no
//! usable ratio reports no statistics.

use diamond_stats::descriptive::DescriptiveStats;
use serde::Serialize;

use crate::regression::CoefficientSeries;

/// First season year covered by a bucket.
pub const FIRST_BUCKET_YEAR: u16 = 1910;

/// Decimal digits kept in decade statistics.
pub const SUMMARY_DIGITS: i32 = 3;

const DECADE: u16 = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecadeSummary {
    pub start_year: u16,
    /// Inclusive.
    pub end_year: u16,
    /// Ratios that entered the statistics.
    pub seasons: usize,
    pub stats: Option<DescriptiveStats>,
}

/// Index of the bucket holding `year`, starting at 1 for 1910–1919.
#[must_use]
pub fn decade_index(year: u16) -> Option<u16> {
    (year >= FIRST_BUCKET_YEAR).then(|| (year - FIRST_BUCKET_YEAR) / DECADE + 1)
}

/// Summarizes the series' `obp / slg` ratios by decade.
///
/// Seasons whose SLG coefficient is zero have no ratio and are left out.
#[must_use]
pub fn summarize_by_decade(series: &CoefficientSeries) -> Vec<DecadeSummary> {
    let Some(last) = series
        .seasons()
        .iter()
        .filter_map(|season| decade_index(season.year))
        .max()
    else {
        return Vec::new();
    };

    let mut buckets = vec![Vec::new(); usize::from(last)];
    for season in series.seasons() {
        let Some(index) = decade_index(season.year) else {
            continue;
        };
        if let Some(ratio) = season.coefficients.obp_slg_ratio() {
            buckets[usize::from(index - 1)].push(ratio);
        }
    }

    (1..=last)
        .zip(buckets)
        .map(|(index, ratios)| {
            let start_year = FIRST_BUCKET_YEAR + (index - 1) * DECADE;
            DecadeSummary {
                start_year,
                end_year: start_year + DECADE - 1,
                seasons: ratios.len(),
                stats: DescriptiveStats::new(ratios).map(|s| s.rounded(SUMMARY_DIGITS)),
            }
        })
        .collect()
}
