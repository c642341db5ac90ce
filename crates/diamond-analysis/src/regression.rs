//! Runs-scored regression on team OBP and SLG.
//!
//! For one season, each team with both ratios contributes a design row
//! `[1, OBP, SLG]` and a response `runs`. The coefficients of the
//! least-squares fit are rounded to 2 digits. [`CoefficientSeries`] repeats
//! the fit for every season and keeps the results ordered by year.

use diamond_stats::{
    least_squares::{self, LeastSquaresError},
    rounding,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::team_season::TeamSeasonStat;

/// Decimal digits kept in regression coefficients.
pub const COEFFICIENT_DIGITS: i32 = 2;

/// Fitted `runs = intercept + obp·OBP + slg·SLG` for one season.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegressionCoefficients {
    pub intercept: f64,
    pub obp: f64,
    pub slg: f64,
    /// Teams that entered the fit.
    pub teams: usize,
}

impl RegressionCoefficients {
    /// Fits the coefficients for one season's teams.
    ///
    /// Teams with a missing OBP or SLG are left out of the design matrix.
    ///
    /// # Errors
    ///
    /// Returns [`LeastSquaresError::SingularMatrix`] when fewer than three
    /// teams remain or their ratios are collinear.
    pub fn estimate(teams: &[TeamSeasonStat]) -> Result<Self, LeastSquaresError> {
        let (rows, runs): (Vec<[f64; 3]>, Vec<f64>) = teams
            .iter()
            .filter_map(|team| {
                let obp = team.on_base_percentage?;
                let slg = team.slugging?;
                Some(([1.0, obp, slg], f64::from(team.runs)))
            })
            .unzip();
        let skipped = teams.len() - rows.len();
        if skipped > 0 {
            warn!("{skipped} teams without OBP or SLG left out of the fit");
        }
        if rows.is_empty() {
            return Err(LeastSquaresError::SingularMatrix { column: 0 });
        }

        let beta = least_squares::fit(&rows, &runs)?;
        Ok(Self {
            intercept: rounding::round_to(beta[0], COEFFICIENT_DIGITS),
            obp: rounding::round_to(beta[1], COEFFICIENT_DIGITS),
            slg: rounding::round_to(beta[2], COEFFICIENT_DIGITS),
            teams: rows.len(),
        })
    }

    /// `obp / slg`; `None` when the SLG coefficient is zero.
    #[must_use]
    pub fn obp_slg_ratio(&self) -> Option<f64> {
        let ratio = self.obp / self.slg;
        ratio.is_finite().then_some(ratio)
    }
}

/// Coefficients fitted for one season.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeasonCoefficients {
    pub year: u16,
    #[serde(flatten)]
    pub coefficients: RegressionCoefficients,
}

/// A season's fit failed.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
#[display("season {year}: {source}")]
pub struct SeasonRegressionError {
    pub year: u16,
    pub source: LeastSquaresError,
}

/// Per-season coefficients ordered by year.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CoefficientSeries {
    seasons: Vec<SeasonCoefficients>,
}

impl CoefficientSeries {
    /// Fits every `(year, teams)` season.
    ///
    /// The first singular season aborts the series.
    pub fn estimate<I>(seasons: I) -> Result<Self, SeasonRegressionError>
    where
        I: IntoIterator<Item = (u16, Vec<TeamSeasonStat>)>,
    {
        let mut series = Self::default();
        for (year, teams) in seasons {
            series.push(year, &teams)?;
        }
        Ok(series)
    }

    /// Fits one season and inserts it at its year.
    ///
    /// A season already present is replaced.
    pub fn push(
        &mut self,
        year: u16,
        teams: &[TeamSeasonStat],
    ) -> Result<(), SeasonRegressionError> {
        let coefficients = RegressionCoefficients::estimate(teams)
            .map_err(|source| SeasonRegressionError { year, source })?;
        debug!(
            "{year}: intercept={} obp={} slg={} ({} teams)",
            coefficients.intercept, coefficients.obp, coefficients.slg, coefficients.teams
        );
        let entry = SeasonCoefficients { year, coefficients };
        match self.seasons.binary_search_by_key(&year, |s| s.year) {
            Ok(index) => self.seasons[index] = entry,
            Err(index) => self.seasons.insert(index, entry),
        }
        Ok(())
    }

    #[must_use]
    pub fn seasons(&self) -> &[SeasonCoefficients] {
        &self.seasons
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seasons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seasons.is_empty()
    }

    #[must_use]
    pub fn get(&self, year: u16) -> Option<&RegressionCoefficients> {
        self.seasons
            .binary_search_by_key(&year, |s| s.year)
            .ok()
            .map(|index| &self.seasons[index].coefficients)
    }
}
