//! Season analyses built on the `diamond-data` records.
//!
//! # Overview
//!
//! The crate covers two independent pipelines.
//!
//! ## Runs Regression Workflow
//!
//! 1. **Aggregate Teams** ([`team_season::aggregate_season`]): sum each team's
//!    home and road batting lines into OBP, SLG and runs
//! 2. **Fit Seasons** ([`regression::CoefficientSeries`]): least-squares fit of
//!    runs on OBP and SLG, one season at a time
//! 3. **Summarize Decades** ([`trend::summarize_by_decade`]): descriptive
//!    statistics of the OBP/SLG coefficient ratio per decade
//!
//! ## Batting Average Observability Workflow
//!
//! 1. **Aggregate Players** ([`batting::PlayerAverages`]): season averages of
//!    players who meet the plate-appearance threshold
//! 2. **Index Games** ([`sampling::SeasonEvents`]): per-game hits and at-bats
//!    for every player
//! 3. **Simulate** ([`monte_carlo::simulate`], [`monte_carlo::difference_relation`]):
//!    how often `n` random games rank two batters the same way their seasons do
//!
//! # Examples
//!
//! ```
//! use diamond_analysis::{
//!     SimulationSeed,
//!     batting::{EligibilityRule, PlayerAverages},
//!     monte_carlo::{self, SimulationParams},
//!     sampling::SeasonEvents,
//! };
//! use diamond_data::event::read_events;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut input = String::new();
//! for game in 0..4 {
//!     input += &format!("G{game},low,20,1,1,0,0\nG{game},low,2,1,0,0,0\n");
//!     input += &format!("G{game},high,20,1,1,0,0\nG{game},high,20,1,2,0,0\n");
//! }
//! let events = read_events(input.as_bytes())?;
//!
//! let rule = EligibilityRule { games: 4, min_pa_factor: 0.5 };
//! let averages = PlayerAverages::from_events(&events, &rule);
//! assert_eq!(averages.get("low"), Some(0.5));
//!
//! let season = SeasonEvents::from_events(&events);
//! let params = SimulationParams { games_per_sample: 2, trials: 10 };
//! let seed: SimulationSeed = "000102030405060708090a0b0c0d0e0f".parse()?;
//! let outcome = monte_carlo::simulate(&season, &averages, 0.5, 1.0, params, &mut seed.rng())?;
//! assert_eq!(outcome.success_rate, 1.0);
//! # Ok(())
//! # }
//! ```

pub use self::seed::{ParseSeedError, SimulationSeed};

pub mod batting;
pub mod monte_carlo;
pub mod regression;
pub mod sampling;
mod seed;
pub mod team_season;
pub mod trend;

/// Errors from game sampling and the Monte Carlo runs.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SimulationError {
    #[display("player {player_id} has no events in the season")]
    UnknownPlayer { player_id: String },
    #[display("no player meets the plate-appearance threshold")]
    NoEligiblePlayers,
    #[display("at least 2 eligible players are needed, found {found}")]
    TooFewPlayers { found: usize },
    #[display("games per sample must be at least 1")]
    EmptySample,
    #[display("number of trials must be at least 1")]
    NoTrials,
}
