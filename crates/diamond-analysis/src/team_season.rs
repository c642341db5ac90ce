//! Team-season batting aggregates from a season's game log.
//!
//! Games are grouped twice, once by visiting team and once by home team.
//! Each grouping sums its own side's counting stats, runs and wins; the two
//! groupings are then merged by team identifier. Empty (unrecorded) fields
//! count as zero in the sums.
//!
//! # Formulas
//!
//! ```text
//! BA  = H / AB
//! OBP = (H + BB + HBP) / (AB + BB + HBP + SF)
//! SLG = (1B + 2·2B + 3·3B + 4·HR) / AB,   1B = H − 2B − 3B − HR
//! ```
//!
//! Ratios are rounded to 3 digits. A zero denominator gives `None`.

use std::collections::BTreeMap;

use diamond_data::game_log::{BattingLine, GameLogRow, Side};
use diamond_stats::rounding;
use serde::Serialize;

/// Decimal digits kept in team ratios.
pub const RATIO_DIGITS: i32 = 3;

/// Summed offensive counting stats.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BattingTotals {
    pub at_bats: u32,
    pub hits: u32,
    pub doubles: u32,
    pub triples: u32,
    pub home_runs: u32,
    pub rbi: u32,
    pub sacrifice_hits: u32,
    pub sacrifice_flies: u32,
    pub hit_by_pitch: u32,
    pub walks: u32,
}

impl BattingTotals {
    fn add_line(&mut self, line: &BattingLine) {
        let value = |v: Option<u32>| v.unwrap_or(0);
        self.at_bats += value(line.at_bats);
        self.hits += value(line.hits);
        self.doubles += value(line.doubles);
        self.triples += value(line.triples);
        self.home_runs += value(line.home_runs);
        self.rbi += value(line.rbi);
        self.sacrifice_hits += value(line.sacrifice_hits);
        self.sacrifice_flies += value(line.sacrifice_flies);
        self.hit_by_pitch += value(line.hit_by_pitch);
        self.walks += value(line.walks);
    }

    fn add(&mut self, other: &Self) {
        self.at_bats += other.at_bats;
        self.hits += other.hits;
        self.doubles += other.doubles;
        self.triples += other.triples;
        self.home_runs += other.home_runs;
        self.rbi += other.rbi;
        self.sacrifice_hits += other.sacrifice_hits;
        self.sacrifice_flies += other.sacrifice_flies;
        self.hit_by_pitch += other.hit_by_pitch;
        self.walks += other.walks;
    }

    #[must_use]
    pub fn singles(&self) -> u32 {
        self.hits
            .saturating_sub(self.doubles + self.triples + self.home_runs)
    }

    #[must_use]
    pub fn total_bases(&self) -> u32 {
        self.singles() + 2 * self.doubles + 3 * self.triples + 4 * self.home_runs
    }

    #[must_use]
    pub fn batting_average(&self) -> Option<f64> {
        rounding::ratio(self.hits, self.at_bats, RATIO_DIGITS)
    }

    #[must_use]
    pub fn on_base_percentage(&self) -> Option<f64> {
        rounding::ratio(
            self.hits + self.walks + self.hit_by_pitch,
            self.at_bats + self.walks + self.hit_by_pitch + self.sacrifice_flies,
            RATIO_DIGITS,
        )
    }

    #[must_use]
    pub fn slugging(&self) -> Option<f64> {
        rounding::ratio(self.total_bases(), self.at_bats, RATIO_DIGITS)
    }
}

/// One team's contribution from the games it played on one side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SideTotals {
    pub games: u32,
    pub wins: u32,
    pub runs: u32,
    pub batting: BattingTotals,
}

impl SideTotals {
    fn add(&mut self, other: &Self) {
        self.games += other.games;
        self.wins += other.wins;
        self.runs += other.runs;
        self.batting.add(&other.batting);
    }
}

/// Season aggregate for one team.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSeasonStat {
    pub team: String,
    pub games: u32,
    pub wins: u32,
    pub runs: u32,
    pub rbi: u32,
    pub batting_average: Option<f64>,
    pub on_base_percentage: Option<f64>,
    pub slugging: Option<f64>,
    pub totals: BattingTotals,
}

impl TeamSeasonStat {
    fn from_totals(team: String, totals: &SideTotals) -> Self {
        let batting = &totals.batting;
        Self {
            team,
            games: totals.games,
            wins: totals.wins,
            runs: totals.runs,
            rbi: batting.rbi,
            batting_average: batting.batting_average(),
            on_base_percentage: batting.on_base_percentage(),
            slugging: batting.slugging(),
            totals: batting.clone(),
        }
    }
}

/// Sums every game a team played on `side`, keyed by team identifier.
#[must_use]
pub fn aggregate_side(rows: &[GameLogRow], side: Side) -> BTreeMap<String, SideTotals> {
    let mut teams = BTreeMap::<String, SideTotals>::new();
    for row in rows {
        let totals = teams.entry(row.team(side).to_owned()).or_default();
        totals.games += 1;
        totals.runs += row.score(side).unwrap_or(0);
        if row.winner() == Some(side) {
            totals.wins += 1;
        }
        totals.batting.add_line(row.batting(side));
    }
    teams
}

/// Aggregates one season's games into per-team stats, ordered by team.
///
/// A team that only appears on one side still gets a record.
#[must_use]
pub fn aggregate_season(rows: &[GameLogRow]) -> Vec<TeamSeasonStat> {
    let mut combined = BTreeMap::<String, SideTotals>::new();
    for side in Side::ALL {
        for (team, totals) in aggregate_side(rows, side) {
            combined.entry(team).or_default().add(&totals);
        }
    }
    combined
        .into_iter()
        .map(|(team, totals)| TeamSeasonStat::from_totals(team, &totals))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[expect(clippy::too_many_arguments)]
    fn line(
        ab: u32,
        h: u32,
        d: u32,
        t: u32,
        hr: u32,
        rbi: u32,
        sh: u32,
        sf: u32,
        hbp: u32,
        bb: u32,
    ) -> BattingLine {
        BattingLine {
            at_bats: Some(ab),
            hits: Some(h),
            doubles: Some(d),
            triples: Some(t),
            home_runs: Some(hr),
            rbi: Some(rbi),
            sacrifice_hits: Some(sh),
            sacrifice_flies: Some(sf),
            hit_by_pitch: Some(hbp),
            walks: Some(bb),
        }
    }

    fn game(
        visitor: &str,
        home: &str,
        scores: (u32, u32),
        visiting_batting: BattingLine,
        home_batting: BattingLine,
    ) -> GameLogRow {
        GameLogRow {
            date: "19540413".to_owned(),
            visiting_team: visitor.to_owned(),
            home_team: home.to_owned(),
            visiting_score: Some(scores.0),
            home_score: Some(scores.1),
            visiting_batting,
            home_batting,
        }
    }

    /// Two teams, four games, two home games each.
    fn four_game_season() -> Vec<GameLogRow> {
        vec![
            game(
                "AAA",
                "BBB",
                (5, 3),
                line(30, 10, 2, 1, 1, 5, 0, 1, 1, 4),
                line(32, 8, 1, 0, 0, 3, 1, 0, 0, 2),
            ),
            game(
                "AAA",
                "BBB",
                (2, 4),
                line(31, 7, 1, 0, 1, 2, 0, 0, 0, 3),
                line(33, 11, 3, 0, 1, 4, 0, 1, 1, 5),
            ),
            game(
                "BBB",
                "AAA",
                (6, 1),
                line(35, 12, 2, 1, 2, 6, 0, 0, 0, 2),
                line(29, 6, 0, 0, 0, 1, 1, 1, 0, 1),
            ),
            game(
                "BBB",
                "AAA",
                (0, 3),
                line(30, 5, 1, 0, 0, 0, 0, 0, 1, 1),
                line(28, 8, 2, 0, 1, 3, 0, 1, 0, 2),
            ),
        ]
    }

    #[test]
    fn test_hand_computed_season() {
        let stats = aggregate_season(&four_game_season());
        assert_eq!(stats.len(), 2);

        let a = &stats[0];
        assert_eq!(a.team, "AAA");
        assert_eq!(a.games, 4);
        assert_eq!(a.wins, 2);
        assert_eq!(a.runs, 11);
        assert_eq!(a.rbi, 11);
        assert_eq!(a.totals.at_bats, 118);
        assert_eq!(a.totals.hits, 31);
        // TB = 22 + 2*5 + 3*1 + 4*3 = 47
        assert_eq!(a.totals.total_bases(), 47);
        assert_eq!(a.batting_average, Some(0.263)); // 31/118
        #[expect(clippy::approx_constant)]
        let obp = Some(0.318); // 42/132
        assert_eq!(a.on_base_percentage, obp);
        assert_eq!(a.slugging, Some(0.398)); // 47/118

        let b = &stats[1];
        assert_eq!(b.team, "BBB");
        assert_eq!(b.games, 4);
        assert_eq!(b.wins, 2);
        assert_eq!(b.runs, 13);
        assert_eq!(b.totals.at_bats, 130);
        // TB = 25 + 2*7 + 3*1 + 4*3 = 54
        assert_eq!(b.totals.total_bases(), 54);
        assert_eq!(b.batting_average, Some(0.277)); // 36/130
        assert_eq!(b.on_base_percentage, Some(0.336)); // 48/143
        assert_eq!(b.slugging, Some(0.415)); // 54/130
    }

    #[test]
    fn test_wins_sum_to_games() {
        let rows = four_game_season();
        let stats = aggregate_season(&rows);
        let wins: u32 = stats.iter().map(|s| s.wins).sum();
        assert_eq!(wins as usize, rows.len());
    }

    #[test]
    fn test_side_grouping_is_independent() {
        let rows = four_game_season();
        let visitors = aggregate_side(&rows, Side::Visitor);
        let homes = aggregate_side(&rows, Side::Home);
        assert_eq!(visitors["AAA"].games, 2);
        assert_eq!(visitors["AAA"].wins, 1);
        assert_eq!(visitors["AAA"].runs, 7);
        assert_eq!(homes["AAA"].games, 2);
        assert_eq!(homes["AAA"].wins, 1);
        assert_eq!(homes["AAA"].runs, 4);
    }

    #[test]
    fn test_one_sided_team_and_missing_values() {
        let mut visitor = line(0, 0, 0, 0, 0, 0, 0, 0, 0, 0);
        visitor.sacrifice_flies = None;
        let rows = vec![game(
            "CCC",
            "DDD",
            (1, 2),
            visitor,
            line(30, 9, 9, 0, 0, 2, 0, 0, 0, 0),
        )];
        let stats = aggregate_season(&rows);

        let c = &stats[0];
        assert_eq!(c.team, "CCC");
        assert_eq!(c.games, 1);
        assert_eq!(c.batting_average, None);
        assert_eq!(c.on_base_percentage, None);
        assert_eq!(c.slugging, None);

        let d = &stats[1];
        assert_eq!(d.wins, 1);
        assert_eq!(d.slugging, Some(0.6)); // 18/30
    }

    #[test]
    fn test_slugging_can_exceed_one() {
        let rows = vec![game(
            "EEE",
            "FFF",
            (8, 0),
            line(4, 3, 0, 0, 3, 8, 0, 0, 0, 0),
            line(4, 0, 0, 0, 0, 0, 0, 0, 0, 0),
        )];
        let stats = aggregate_season(&rows);
        assert_eq!(stats[0].slugging, Some(3.0));
        assert_eq!(stats[0].on_base_percentage, Some(0.75));
        assert_eq!(stats[1].batting_average, Some(0.0));
    }
}
