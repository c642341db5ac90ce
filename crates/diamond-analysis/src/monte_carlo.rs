//! Monte Carlo estimates of how often a small game sample ranks two batters
//! correctly.
//!
//! [`simulate`] repeats [`SeasonEvents::compare_batters`] for a fixed pair
//! and reports the share of trials whose ratio is below 1.
//! [`difference_relation`] does the same for many random pairs of eligible
//! players, pairing each season-average gap with its success rate, and
//! [`RelationFit`] fits a line through those points.
//!
//! # Reproducibility
//!
//! Every random draw comes from the caller's RNG. The relation draws all
//! player pairs and one [`SimulationSeed`] per point up front, then runs the
//! points on scoped threads with their own [`Pcg32`](rand_pcg::Pcg32), so a
//! given seed always gives the same points regardless of scheduling.

use std::{num::NonZero, thread};

use diamond_stats::{
    least_squares::{self, LeastSquaresError},
    rounding,
};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

use crate::{SimulationError, SimulationSeed, batting::PlayerAverages, sampling::SeasonEvents};

/// Decimal digits kept in average differences.
pub const DIFFERENCE_DIGITS: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationParams {
    pub games_per_sample: usize,
    pub trials: usize,
}

/// An eligible player and their season average.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerMatch {
    pub player_id: String,
    pub average: f64,
}

impl PlayerMatch {
    /// The eligible player whose average is closest to `target`.
    pub fn closest(averages: &PlayerAverages, target: f64) -> Result<Self, SimulationError> {
        let (player_id, average) = averages
            .closest_to(target)
            .ok_or(SimulationError::NoEligiblePlayers)?;
        Ok(Self {
            player_id: player_id.to_owned(),
            average,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationOutcome {
    pub low: PlayerMatch,
    pub high: PlayerMatch,
    pub games_per_sample: usize,
    pub trials: usize,
    pub successes: usize,
    pub success_rate: f64,
    /// At least one sample was drawn with replacement.
    pub oversampled: bool,
}

/// Resolves both targets to eligible players and runs the trials.
pub fn simulate<R>(
    events: &SeasonEvents,
    averages: &PlayerAverages,
    low_target: f64,
    high_target: f64,
    params: SimulationParams,
    rng: &mut R,
) -> Result<SimulationOutcome, SimulationError>
where
    R: Rng + ?Sized,
{
    let low = PlayerMatch::closest(averages, low_target)?;
    let high = PlayerMatch::closest(averages, high_target)?;
    debug!(
        "low target {low_target} -> {} ({}), high target {high_target} -> {} ({})",
        low.player_id, low.average, high.player_id, high.average
    );
    simulate_players(events, low, high, params, rng)
}

/// Runs `params.trials` independent comparisons of `low` against `high`.
pub fn simulate_players<R>(
    events: &SeasonEvents,
    low: PlayerMatch,
    high: PlayerMatch,
    params: SimulationParams,
    rng: &mut R,
) -> Result<SimulationOutcome, SimulationError>
where
    R: Rng + ?Sized,
{
    if params.trials == 0 {
        return Err(SimulationError::NoTrials);
    }

    let mut successes = 0;
    let mut oversampled = false;
    for _ in 0..params.trials {
        let comparison = events.compare_batters(
            &low.player_id,
            &high.player_id,
            params.games_per_sample,
            rng,
        )?;
        successes += usize::from(comparison.is_correct());
        oversampled |= comparison.oversampled;
    }
    if oversampled {
        warn!(
            "{} or {} played fewer than {} games; samples were drawn with replacement",
            low.player_id, high.player_id, params.games_per_sample
        );
    }

    #[expect(clippy::cast_precision_loss)]
    let success_rate = successes as f64 / params.trials as f64;
    Ok(SimulationOutcome {
        low,
        high,
        games_per_sample: params.games_per_sample,
        trials: params.trials,
        successes,
        success_rate,
        oversampled,
    })
}

/// One random pair's average gap and success rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationPoint {
    pub low: PlayerMatch,
    pub high: PlayerMatch,
    pub difference: f64,
    pub success_rate: f64,
    pub oversampled: bool,
}

struct RelationJob {
    low: PlayerMatch,
    high: PlayerMatch,
    seed: SimulationSeed,
}

impl RelationJob {
    fn run(
        &self,
        events: &SeasonEvents,
        params: SimulationParams,
    ) -> Result<RelationPoint, SimulationError> {
        let outcome = simulate_players(
            events,
            self.low.clone(),
            self.high.clone(),
            params,
            &mut self.seed.rng(),
        )?;
        Ok(RelationPoint {
            difference: rounding::round_to(
                outcome.high.average - outcome.low.average,
                DIFFERENCE_DIGITS,
            ),
            success_rate: outcome.success_rate,
            oversampled: outcome.oversampled,
            low: outcome.low,
            high: outcome.high,
        })
    }
}

/// Simulates `points` random pairs of distinct eligible players.
///
/// In each pair the player with the lower season average is the low player.
pub fn difference_relation<R>(
    events: &SeasonEvents,
    averages: &PlayerAverages,
    params: SimulationParams,
    points: usize,
    rng: &mut R,
) -> Result<Vec<RelationPoint>, SimulationError>
where
    R: Rng + ?Sized,
{
    if params.trials == 0 {
        return Err(SimulationError::NoTrials);
    }
    let players: Vec<(&str, f64)> = averages.iter().collect();
    if players.len() < 2 {
        return Err(SimulationError::TooFewPlayers {
            found: players.len(),
        });
    }

    let jobs: Vec<RelationJob> = (0..points)
        .map(|_| {
            let pair = rand::seq::index::sample(&mut *rng, players.len(), 2);
            let (a, b) = (players[pair.index(0)], players[pair.index(1)]);
            let (low, high) = if a.1 <= b.1 { (a, b) } else { (b, a) };
            let to_match = |(player_id, average): (&str, f64)| PlayerMatch {
                player_id: player_id.to_owned(),
                average,
            };
            RelationJob {
                low: to_match(low),
                high: to_match(high),
                seed: rng.random(),
            }
        })
        .collect();

    let threads = thread::available_parallelism().map_or(1, NonZero::get);
    let chunk_size = jobs.len().div_ceil(threads).max(1);
    debug!("simulating {} pairs on up to {threads} threads", jobs.len());

    let mut results: Vec<Option<Result<RelationPoint, SimulationError>>> =
        std::iter::repeat_with(|| None).take(jobs.len()).collect();
    thread::scope(|s| {
        for (jobs, results) in jobs.chunks(chunk_size).zip(results.chunks_mut(chunk_size)) {
            s.spawn(move || {
                for (job, result) in jobs.iter().zip(results) {
                    *result = Some(job.run(events, params));
                }
            });
        }
    });
    results.into_iter().flatten().collect()
}

/// Least-squares line `success_rate = intercept + slope · difference`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RelationFit {
    pub intercept: f64,
    pub slope: f64,
}

impl RelationFit {
    /// # Errors
    ///
    /// Fails when there are fewer than two distinct differences.
    pub fn estimate(points: &[RelationPoint]) -> Result<Self, LeastSquaresError> {
        let (rows, rates): (Vec<[f64; 2]>, Vec<f64>) = points
            .iter()
            .map(|p| ([1.0, p.difference], p.success_rate))
            .unzip();
        if rows.is_empty() {
            return Err(LeastSquaresError::SingularMatrix { column: 0 });
        }
        let beta = least_squares::fit(&rows, &rates)?;
        Ok(Self {
            intercept: beta[0],
            slope: beta[1],
        })
    }

    #[must_use]
    pub fn predict(&self, difference: f64) -> f64 {
        self.intercept + self.slope * difference
    }
}

#[cfg(test)]
mod tests {
    use diamond_data::event::EventRow;

    use super::*;

    /// 160 games of four at-bats each, cycling through `pattern` hits per game.
    fn player_events(player: &str, pattern: &[u8]) -> Vec<EventRow> {
        (0..160)
            .flat_map(|game| {
                let hits = pattern[game % pattern.len()];
                (0..4u8).map(move |ab| EventRow {
                    game_id: format!("G{game:03}"),
                    player_id: player.to_owned(),
                    event_code: if ab < hits { 20 } else { 2 },
                    at_bat: true,
                    hit_value: u8::from(ab < hits),
                    sacrifice_hit: false,
                    sacrifice_fly: false,
                })
            })
            .collect()
    }

    /// A .250 hitter, a .300 hitter and a .275 hitter.
    fn season() -> (SeasonEvents, PlayerAverages) {
        let mut events = player_events("lowguy01", &[0, 1, 2, 1]);
        events.extend(player_events("highgu01", &[2, 1, 2, 0, 1]));
        events.extend(player_events("middl001", &[1, 1, 1, 2, 0, 1, 1, 1, 2, 1]));
        let averages = [
            ("lowguy01".to_owned(), 0.25),
            ("highgu01".to_owned(), 0.3),
            ("middl001".to_owned(), 0.275),
        ]
        .into_iter()
        .collect();
        (SeasonEvents::from_events(&events), averages)
    }

    fn params(games_per_sample: usize, trials: usize) -> SimulationParams {
        SimulationParams {
            games_per_sample,
            trials,
        }
    }

    fn seed(byte: u8) -> SimulationSeed {
        SimulationSeed::from_bytes([byte; 16])
    }

    #[test]
    fn test_targets_resolve_to_closest_players() {
        let (events, averages) = season();
        let mut rng = seed(1).rng();
        let outcome = simulate(&events, &averages, 0.24, 0.31, params(10, 20), &mut rng).unwrap();
        assert_eq!(outcome.low.player_id, "lowguy01");
        assert_eq!(outcome.high.player_id, "highgu01");
        assert_eq!(outcome.trials, 20);
        assert!(outcome.successes <= 20);
        assert!(!outcome.oversampled);
    }

    #[test]
    fn test_single_trial_is_reproducible() {
        let (events, averages) = season();
        let run = |s| simulate(&events, &averages, 0.25, 0.3, params(5, 1), &mut seed(s).rng());
        let first = run(7).unwrap();
        assert_eq!(first, run(7).unwrap());
        assert!(first.success_rate == 0.0 || first.success_rate == 1.0);
    }

    #[test]
    fn test_larger_samples_rank_more_reliably() {
        let (events, averages) = season();
        let rate = |games| {
            let mut rng = seed(3).rng();
            simulate(&events, &averages, 0.25, 0.3, params(games, 1000), &mut rng)
                .unwrap()
                .success_rate
        };
        let small = rate(4);
        let large = rate(100);
        assert!(large > 0.95, "large-sample rate {large}");
        assert!(large > small, "{small} vs {large}");
    }

    #[test]
    fn test_oversampling_is_flagged() {
        let (events, averages) = season();
        let outcome =
            simulate(&events, &averages, 0.25, 0.3, params(200, 3), &mut seed(4).rng()).unwrap();
        assert!(outcome.oversampled);
    }

    #[test]
    fn test_simulation_errors() {
        let (events, averages) = season();
        assert_eq!(
            simulate(&events, &averages, 0.25, 0.3, params(5, 0), &mut seed(1).rng()),
            Err(SimulationError::NoTrials)
        );
        assert_eq!(
            simulate(
                &events,
                &PlayerAverages::default(),
                0.25,
                0.3,
                params(5, 1),
                &mut seed(1).rng()
            ),
            Err(SimulationError::NoEligiblePlayers)
        );
        let one: PlayerAverages = [("lowguy01".to_owned(), 0.25)].into_iter().collect();
        assert!(matches!(
            difference_relation(&events, &one, params(5, 1), 3, &mut seed(1).rng()),
            Err(SimulationError::TooFewPlayers { found: 1 })
        ));
    }

    #[test]
    fn test_relation_is_deterministic_and_ordered() {
        let (events, averages) = season();
        let run = || {
            difference_relation(&events, &averages, params(20, 50), 12, &mut seed(9).rng())
        };
        let points = run().unwrap();
        assert_eq!(points.len(), 12);
        assert_eq!(points, run().unwrap());
        for point in &points {
            assert_ne!(point.low.player_id, point.high.player_id);
            assert!(point.low.average <= point.high.average);
            assert!(point.difference >= 0.0);
            assert!((0.0..=1.0).contains(&point.success_rate));
        }
    }

    #[test]
    fn test_relation_fit_recovers_line() {
        let point = |difference: f64| RelationPoint {
            low: PlayerMatch {
                player_id: "a".to_owned(),
                average: 0.25,
            },
            high: PlayerMatch {
                player_id: "b".to_owned(),
                average: 0.25 + difference,
            },
            difference,
            success_rate: 0.5 + 4.0 * difference,
            oversampled: false,
        };
        let points: Vec<_> = [0.0, 0.025, 0.05, 0.1].into_iter().map(point).collect();
        let fit = RelationFit::estimate(&points).unwrap();
        assert!((fit.intercept - 0.5).abs() < 1e-9);
        assert!((fit.slope - 4.0).abs() < 1e-9);
        assert!((fit.predict(0.075) - 0.8).abs() < 1e-9);

        assert!(RelationFit::estimate(&points[..1]).is_err());
        assert!(RelationFit::estimate(&[]).is_err());
    }
}
