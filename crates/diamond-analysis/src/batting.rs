//! Season batting averages per player from plate-appearance events.
//!
//! ```text
//! H  = events with hit value > 0
//! AB = events with the at-bat flag set
//! PA = AB + SF + SH + events coded walk, hit-by-pitch or interference
//! ```
//!
//! A player is eligible when `PA ≥ floor(factor × games)` (3.1 × 162 = 502
//! by default). Only eligible players get an average; everyone else is
//! absent from [`PlayerAverages`].

use std::collections::{BTreeMap, BTreeSet};

use diamond_data::event::EventRow;
use diamond_stats::rounding;
use serde::Serialize;

/// Decimal digits kept in batting averages.
pub const AVERAGE_DIGITS: i32 = 3;

/// Minimum plate appearances per scheduled game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EligibilityRule {
    pub games: u32,
    pub min_pa_factor: f64,
}

impl Default for EligibilityRule {
    fn default() -> Self {
        Self {
            games: 162,
            min_pa_factor: 3.1,
        }
    }
}

impl EligibilityRule {
    #[must_use]
    pub fn min_plate_appearances(&self) -> u32 {
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let threshold = (self.min_pa_factor * f64::from(self.games)).floor() as u32;
        threshold
    }

    #[must_use]
    pub fn is_eligible(&self, plate_appearances: u32) -> bool {
        plate_appearances >= self.min_plate_appearances()
    }
}

/// One player's season line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSeasonAverage {
    pub player_id: String,
    pub hits: u32,
    pub at_bats: u32,
    pub plate_appearances: u32,
    pub games: usize,
    /// `None` unless the player is eligible and has at least one at-bat.
    pub average: Option<f64>,
}

#[derive(Default)]
struct Counts<'a> {
    hits: u32,
    at_bats: u32,
    plate_appearances: u32,
    games: BTreeSet<&'a str>,
}

impl<'a> Counts<'a> {
    fn add(&mut self, event: &'a EventRow) {
        self.hits += u32::from(event.is_hit());
        self.at_bats += u32::from(event.at_bat);
        self.plate_appearances += u32::from(event.at_bat)
            + u32::from(event.sacrifice_fly)
            + u32::from(event.sacrifice_hit)
            + u32::from(event.is_non_at_bat_appearance());
        self.games.insert(&event.game_id);
    }
}

/// Season lines for every player in `events`, ordered by player id.
#[must_use]
pub fn aggregate_players(events: &[EventRow], rule: &EligibilityRule) -> Vec<PlayerSeasonAverage> {
    let mut players = BTreeMap::<&str, Counts<'_>>::new();
    for event in events {
        players.entry(&event.player_id).or_default().add(event);
    }
    players
        .into_iter()
        .map(|(player_id, counts)| PlayerSeasonAverage {
            player_id: player_id.to_owned(),
            hits: counts.hits,
            at_bats: counts.at_bats,
            plate_appearances: counts.plate_appearances,
            games: counts.games.len(),
            average: rule
                .is_eligible(counts.plate_appearances)
                .then(|| rounding::ratio(counts.hits, counts.at_bats, AVERAGE_DIGITS))
                .flatten(),
        })
        .collect()
}

/// Season batting averages of the eligible players, keyed by player id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PlayerAverages {
    averages: BTreeMap<String, f64>,
}

impl PlayerAverages {
    /// Aggregates `events` and keeps the eligible players.
    #[must_use]
    pub fn from_events(events: &[EventRow], rule: &EligibilityRule) -> Self {
        Self::from_players(aggregate_players(events, rule))
    }

    #[must_use]
    pub fn from_players<I>(players: I) -> Self
    where
        I: IntoIterator<Item = PlayerSeasonAverage>,
    {
        let averages = players
            .into_iter()
            .filter_map(|player| Some((player.player_id, player.average?)))
            .collect();
        Self { averages }
    }

    #[must_use]
    pub fn get(&self, player_id: &str) -> Option<f64> {
        self.averages.get(player_id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.averages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.averages.is_empty()
    }

    /// Players in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.averages.iter().map(|(id, avg)| (id.as_str(), *avg))
    }

    /// The player whose average is closest to `target`.
    ///
    /// Ties go to the lexically smallest player id.
    #[must_use]
    pub fn closest_to(&self, target: f64) -> Option<(&str, f64)> {
        let mut best: Option<(&str, f64, f64)> = None;
        for (id, average) in self.iter() {
            let distance = (average - target).abs();
            if best.is_none_or(|(_, _, d)| distance < d) {
                best = Some((id, average, distance));
            }
        }
        best.map(|(id, average, _)| (id, average))
    }
}

impl FromIterator<(String, f64)> for PlayerAverages {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        Self {
            averages: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(game: &str, player: &str, code: u16, at_bat: bool, hit_value: u8) -> EventRow {
        EventRow {
            game_id: game.to_owned(),
            player_id: player.to_owned(),
            event_code: code,
            at_bat,
            hit_value,
            sacrifice_hit: false,
            sacrifice_fly: false,
        }
    }

    /// `at_bats` at-bats (the first `hits` of them singles) and `walks` walks,
    /// spread four plate appearances per game.
    fn season(player: &str, at_bats: u32, hits: u32, walks: u32) -> Vec<EventRow> {
        let mut events = Vec::new();
        for i in 0..at_bats + walks {
            let game = format!("G{:03}", i / 4);
            events.push(if i < at_bats {
                event(&game, player, if i < hits { 20 } else { 2 }, true, u8::from(i < hits))
            } else {
                event(&game, player, 14, false, 0)
            });
        }
        events
    }

    #[test]
    fn test_default_threshold() {
        let rule = EligibilityRule::default();
        assert_eq!(rule.min_plate_appearances(), 502);
        assert!(rule.is_eligible(502));
        assert!(!rule.is_eligible(501));

        let short = EligibilityRule {
            games: 154,
            ..rule
        };
        assert_eq!(short.min_plate_appearances(), 477);
    }

    #[test]
    fn test_eligible_player_at_threshold() {
        let events = season("mantm101", 500, 150, 2);
        let players = aggregate_players(&events, &EligibilityRule::default());
        assert_eq!(players.len(), 1);
        let player = &players[0];
        assert_eq!(player.plate_appearances, 502);
        assert_eq!(player.hits, 150);
        assert_eq!(player.at_bats, 500);
        assert_eq!(player.games, 126);
        assert_eq!(player.average, Some(0.3));
    }

    #[test]
    fn test_ineligible_player_is_absent() {
        let mut events = season("mantm101", 500, 150, 2);
        events.extend(season("berry101", 500, 160, 1));
        let averages = PlayerAverages::from_events(&events, &EligibilityRule::default());
        assert_eq!(averages.len(), 1);
        assert_eq!(averages.get("mantm101"), Some(0.3));
        assert_eq!(averages.get("berry101"), None);
    }

    #[test]
    fn test_sacrifices_and_interference_count_as_plate_appearances() {
        let mut events = vec![
            event("G1", "p", 14, false, 0),
            event("G1", "p", 15, false, 0),
            event("G1", "p", 16, false, 0),
            event("G2", "p", 2, false, 0),
            event("G2", "p", 2, false, 0),
            event("G2", "p", 3, true, 0),
        ];
        events[3].sacrifice_fly = true;
        events[4].sacrifice_hit = true;
        let players = aggregate_players(&events, &EligibilityRule::default());
        assert_eq!(players[0].plate_appearances, 6);
        assert_eq!(players[0].at_bats, 1);
        assert_eq!(players[0].games, 2);
        assert_eq!(players[0].average, None);
    }

    #[test]
    fn test_eligible_without_at_bats_has_no_average() {
        let rule = EligibilityRule {
            games: 1,
            min_pa_factor: 1.0,
        };
        let events = vec![event("G1", "p", 14, false, 0)];
        let players = aggregate_players(&events, &rule);
        assert_eq!(players[0].average, None);
    }

    #[test]
    fn test_closest_breaks_ties_by_player_id() {
        let averages: PlayerAverages = [
            ("zimmd101".to_owned(), 0.25),
            ("aaroh101".to_owned(), 0.375),
            ("mayew101".to_owned(), 0.5),
        ]
        .into_iter()
        .collect();
        assert_eq!(averages.closest_to(0.3125), Some(("aaroh101", 0.375)));
        assert_eq!(averages.closest_to(0.2), Some(("zimmd101", 0.25)));
        assert_eq!(averages.closest_to(0.9), Some(("mayew101", 0.5)));
        assert_eq!(PlayerAverages::default().closest_to(0.3), None);
    }
}
