//! Random game samples for a player and sample-based batter comparison.
//!
//! [`SeasonEvents`] indexes a season's events by player and game. A sample of
//! `n` games is drawn uniformly without replacement; when the player has
//! fewer than `n` games the draw falls back to sampling with replacement and
//! the sample is flagged.

use std::collections::BTreeMap;

use diamond_data::event::EventRow;
use rand::{Rng, seq::IndexedRandom as _};
use serde::Serialize;
use tracing::debug;

use crate::SimulationError;

/// Hits and at-bats of one player in one game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GameLine {
    pub hits: u32,
    pub at_bats: u32,
}

impl GameLine {
    /// Totals the events of one game.
    #[must_use]
    pub fn from_events<'a, I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a EventRow>,
    {
        events.into_iter().fold(Self::default(), |line, event| Self {
            hits: line.hits + u32::from(event.is_hit()),
            at_bats: line.at_bats + u32::from(event.at_bat),
        })
    }

    /// Unrounded `hits / at_bats`; NaN without at-bats.
    #[must_use]
    pub fn average(&self) -> f64 {
        f64::from(self.hits) / f64::from(self.at_bats)
    }
}

impl std::ops::Add for GameLine {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            hits: self.hits + rhs.hits,
            at_bats: self.at_bats + rhs.at_bats,
        }
    }
}

impl std::iter::Sum for GameLine {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |a, b| a + b)
    }
}

/// Drawn game lines for one player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSample {
    pub lines: Vec<GameLine>,
    /// The player had fewer games than requested.
    pub with_replacement: bool,
}

impl GameSample {
    #[must_use]
    pub fn total(&self) -> GameLine {
        self.lines.iter().copied().sum()
    }
}

/// Result of one sample comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    /// `low sample average / high sample average`.
    pub ratio: f64,
    /// Either sample was drawn with replacement.
    pub oversampled: bool,
}

impl Comparison {
    /// The sample ranks the high player strictly ahead.
    ///
    /// Non-finite ratios never count.
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.ratio.is_finite() && self.ratio < 1.0
    }
}

/// A season's events grouped as per-game lines for each player.
#[derive(Debug, Clone, Default)]
pub struct SeasonEvents {
    players: BTreeMap<String, Vec<GameLine>>,
}

impl SeasonEvents {
    #[must_use]
    pub fn from_events(events: &[EventRow]) -> Self {
        let mut games = BTreeMap::<&str, BTreeMap<&str, Vec<&EventRow>>>::new();
        for event in events {
            games
                .entry(&event.player_id)
                .or_default()
                .entry(&event.game_id)
                .or_default()
                .push(event);
        }
        let players = games
            .into_iter()
            .map(|(player, games)| {
                let lines = games.into_values().map(GameLine::from_events).collect();
                (player.to_owned(), lines)
            })
            .collect();
        Self { players }
    }

    /// The player's game lines in game-id order.
    #[must_use]
    pub fn games(&self, player_id: &str) -> Option<&[GameLine]> {
        self.players.get(player_id).map(Vec::as_slice)
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Draws `n` of the player's games uniformly at random.
    pub fn sample_games<R>(
        &self,
        player_id: &str,
        n: usize,
        rng: &mut R,
    ) -> Result<GameSample, SimulationError>
    where
        R: Rng + ?Sized,
    {
        if n == 0 {
            return Err(SimulationError::EmptySample);
        }
        let games = self
            .games(player_id)
            .ok_or_else(|| SimulationError::UnknownPlayer {
                player_id: player_id.to_owned(),
            })?;

        if n <= games.len() {
            let lines = games.choose_multiple(rng, n).copied().collect();
            return Ok(GameSample {
                lines,
                with_replacement: false,
            });
        }

        debug!(
            "{player_id} has {} games, sampling {n} with replacement",
            games.len()
        );
        let lines = (0..n)
            .map(|_| games[rng.random_range(0..games.len())])
            .collect();
        Ok(GameSample {
            lines,
            with_replacement: true,
        })
    }

    /// Samples `n` games of each player and divides the low player's sample
    /// average by the high player's.
    ///
    /// A ratio below 1 means the sample ranks the high player ahead. Without
    /// sample at-bats, or with a zero high average, the ratio is not finite.
    pub fn compare_batters<R>(
        &self,
        low: &str,
        high: &str,
        n: usize,
        rng: &mut R,
    ) -> Result<Comparison, SimulationError>
    where
        R: Rng + ?Sized,
    {
        let low_sample = self.sample_games(low, n, rng)?;
        let high_sample = self.sample_games(high, n, rng)?;
        Ok(Comparison {
            ratio: low_sample.total().average() / high_sample.total().average(),
            oversampled: low_sample.with_replacement || high_sample.with_replacement,
        })
    }
}
