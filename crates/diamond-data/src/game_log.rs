//! Retrosheet game logs (one CSV row per game, no header).
//!
//! Only the reader in this module knows column positions; everything
//! downstream works with [`GameLogRow`] fields.

use std::{fs::File, io, path::Path};

use tracing::debug;

use crate::{ParseError, record::RecordFields};

// 1-based columns of the Retrosheet game log layout.
const DATE: usize = 1;
const VISITING_TEAM: usize = 4;
const HOME_TEAM: usize = 7;
const VISITING_SCORE: usize = 10;
const HOME_SCORE: usize = 11;
const VISITING_OFFENSE: usize = 22;
const HOME_OFFENSE: usize = 50;

/// Offsets of the batting fields within an offense block.
const AT_BATS: usize = 0;
const HITS: usize = 1;
const DOUBLES: usize = 2;
const TRIPLES: usize = 3;
const HOME_RUNS: usize = 4;
const RBI: usize = 5;
const SACRIFICE_HITS: usize = 6;
const SACRIFICE_FLIES: usize = 7;
const HIT_BY_PITCH: usize = 8;
const WALKS: usize = 9;

/// Minimum row width needed to reach the last home batting field.
pub const MIN_COLUMNS: usize = HOME_OFFENSE + WALKS;

/// Which side of a game a team played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Visitor,
    Home,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Visitor, Side::Home];
}

/// One side's offensive counting stats for a game.
///
/// `None` means the field was empty in the log (not recorded).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BattingLine {
    pub at_bats: Option<u32>,
    pub hits: Option<u32>,
    pub doubles: Option<u32>,
    pub triples: Option<u32>,
    pub home_runs: Option<u32>,
    pub rbi: Option<u32>,
    pub sacrifice_hits: Option<u32>,
    pub sacrifice_flies: Option<u32>,
    pub hit_by_pitch: Option<u32>,
    pub walks: Option<u32>,
}

impl BattingLine {
    fn from_fields(fields: &RecordFields<'_>, start: usize) -> Result<Self, ParseError> {
        let column = |offset: usize| start + offset;
        Ok(Self {
            at_bats: fields.optional_number(column(AT_BATS), "at-bats")?,
            hits: fields.optional_number(column(HITS), "hits")?,
            doubles: fields.optional_number(column(DOUBLES), "doubles")?,
            triples: fields.optional_number(column(TRIPLES), "triples")?,
            home_runs: fields.optional_number(column(HOME_RUNS), "home runs")?,
            rbi: fields.optional_number(column(RBI), "RBI")?,
            sacrifice_hits: fields.optional_number(column(SACRIFICE_HITS), "sacrifice hits")?,
            sacrifice_flies: fields.optional_number(column(SACRIFICE_FLIES), "sacrifice flies")?,
            hit_by_pitch: fields.optional_number(column(HIT_BY_PITCH), "hit by pitch")?,
            walks: fields.optional_number(column(WALKS), "walks")?,
        })
    }
}

/// One game from a season's game log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameLogRow {
    /// Game date as written in the log (`yyyymmdd`).
    pub date: String,
    pub visiting_team: String,
    pub home_team: String,
    pub visiting_score: Option<u32>,
    pub home_score: Option<u32>,
    pub visiting_batting: BattingLine,
    pub home_batting: BattingLine,
}

impl GameLogRow {
    #[must_use]
    pub fn team(&self, side: Side) -> &str {
        match side {
            Side::Visitor => &self.visiting_team,
            Side::Home => &self.home_team,
        }
    }

    #[must_use]
    pub fn score(&self, side: Side) -> Option<u32> {
        match side {
            Side::Visitor => self.visiting_score,
            Side::Home => self.home_score,
        }
    }

    #[must_use]
    pub fn batting(&self, side: Side) -> &BattingLine {
        match side {
            Side::Visitor => &self.visiting_batting,
            Side::Home => &self.home_batting,
        }
    }

    /// The side that scored more runs; `None` for ties or unrecorded scores.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        let visitor = self.visiting_score?;
        let home = self.home_score?;
        match visitor.cmp(&home) {
            std::cmp::Ordering::Greater => Some(Side::Visitor),
            std::cmp::Ordering::Less => Some(Side::Home),
            std::cmp::Ordering::Equal => None,
        }
    }

    fn from_fields(fields: &RecordFields<'_>) -> Result<Self, ParseError> {
        if fields.len() < MIN_COLUMNS {
            return Err(ParseError::MissingColumns {
                line: fields.line(),
                expected: MIN_COLUMNS,
                found: fields.len(),
            });
        }
        Ok(Self {
            date: fields.text(DATE, "date")?.to_owned(),
            visiting_team: fields.text(VISITING_TEAM, "visiting team")?.to_owned(),
            home_team: fields.text(HOME_TEAM, "home team")?.to_owned(),
            visiting_score: fields.optional_number(VISITING_SCORE, "visiting score")?,
            home_score: fields.optional_number(HOME_SCORE, "home score")?,
            visiting_batting: BattingLine::from_fields(fields, VISITING_OFFENSE)?,
            home_batting: BattingLine::from_fields(fields, HOME_OFFENSE)?,
        })
    }
}

/// Reads every game of a game log from `reader`.
///
/// Any malformed row aborts the whole read.
pub fn read_game_log<R>(reader: R) -> Result<Vec<GameLogRow>, ParseError>
where
    R: io::Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(GameLogRow::from_fields(&RecordFields::new(&record))?);
    }
    Ok(rows)
}

/// Opens and reads a game log file.
pub fn load_game_log<P>(path: P) -> Result<Vec<GameLogRow>, ParseError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ParseError::io(path, e))?;
    let rows = read_game_log(io::BufReader::new(file))?;
    debug!("read {} games from {}", rows.len(), path.display());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a game log line with the given batting lines; other columns are filler.
    fn game_line(
        visitor: &str,
        home: &str,
        scores: (&str, &str),
        visiting_offense: [&str; 10],
        home_offense: [&str; 10],
    ) -> String {
        let mut columns = vec![String::from("0"); 161];
        columns[DATE - 1] = "\"19540413\"".to_owned();
        columns[VISITING_TEAM - 1] = format!("\"{visitor}\"");
        columns[HOME_TEAM - 1] = format!("\"{home}\"");
        columns[VISITING_SCORE - 1] = scores.0.to_owned();
        columns[HOME_SCORE - 1] = scores.1.to_owned();
        for (offset, value) in visiting_offense.iter().enumerate() {
            columns[VISITING_OFFENSE - 1 + offset] = (*value).to_owned();
        }
        for (offset, value) in home_offense.iter().enumerate() {
            columns[HOME_OFFENSE - 1 + offset] = (*value).to_owned();
        }
        columns.join(",")
    }

    const LINE: [&str; 10] = ["34", "9", "2", "0", "1", "4", "1", "0", "1", "3"];

    #[test]
    fn test_reads_named_fields() {
        let line = game_line("NY1", "BRO", ("5", "3"), LINE, LINE);
        let rows = read_game_log(line.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.date, "19540413");
        assert_eq!(row.team(Side::Visitor), "NY1");
        assert_eq!(row.team(Side::Home), "BRO");
        assert_eq!(row.score(Side::Visitor), Some(5));
        assert_eq!(row.winner(), Some(Side::Visitor));
        let batting = row.batting(Side::Home);
        assert_eq!(batting.at_bats, Some(34));
        assert_eq!(batting.hits, Some(9));
        assert_eq!(batting.doubles, Some(2));
        assert_eq!(batting.home_runs, Some(1));
        assert_eq!(batting.sacrifice_flies, Some(0));
        assert_eq!(batting.walks, Some(3));
    }

    #[test]
    fn test_empty_field_is_missing() {
        let mut offense = LINE;
        offense[SACRIFICE_FLIES] = "";
        let line = game_line("BOS", "NYA", ("2", "2"), offense, LINE);
        let rows = read_game_log(line.as_bytes()).unwrap();
        assert_eq!(rows[0].visiting_batting.sacrifice_flies, None);
        assert_eq!(rows[0].winner(), None);
    }

    #[test]
    fn test_non_numeric_field_is_fatal() {
        let mut offense = LINE;
        offense[HITS] = "nine";
        let good = game_line("BOS", "NYA", ("2", "1"), LINE, LINE);
        let bad = game_line("BOS", "NYA", ("2", "1"), LINE, offense);
        let input = format!("{good}\n{bad}\n");
        let err = read_game_log(input.as_bytes()).unwrap_err();
        assert!(
            matches!(
                err,
                ParseError::InvalidNumber {
                    line: 2,
                    column: 51,
                    ..
                }
            ),
            "{err}"
        );
    }

    #[test]
    fn test_short_row_is_fatal() {
        let err = read_game_log("\"19540413\",0,\"Tue\",\"NY1\"\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ParseError::MissingColumns { found: 4, .. }));
    }
}
