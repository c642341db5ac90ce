//! Plate-appearance event files (seven CSV columns, no header).

use std::{fs::File, io, path::Path};

use tracing::debug;

use crate::{ParseError, record::RecordFields};

/// Number of columns in an event row.
pub const EVENT_COLUMNS: usize = 7;

/// Highest hit value (home run).
pub const MAX_HIT_VALUE: u8 = 4;

/// Event codes for plate appearances that are not at-bats:
/// walk, hit-by-pitch, interference.
pub const NON_AT_BAT_EVENT_CODES: [u16; 3] = [14, 15, 16];

/// One plate appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub game_id: String,
    pub player_id: String,
    pub event_code: u16,
    pub at_bat: bool,
    /// 0 = no hit, 1-4 = single through home run.
    pub hit_value: u8,
    pub sacrifice_hit: bool,
    pub sacrifice_fly: bool,
}

impl EventRow {
    #[must_use]
    pub fn is_hit(&self) -> bool {
        self.hit_value > 0
    }

    /// Whether the event code is a walk, hit-by-pitch or interference.
    #[must_use]
    pub fn is_non_at_bat_appearance(&self) -> bool {
        NON_AT_BAT_EVENT_CODES.contains(&self.event_code)
    }

    fn from_fields(fields: &RecordFields<'_>) -> Result<Self, ParseError> {
        if fields.len() != EVENT_COLUMNS {
            return Err(ParseError::ColumnCount {
                line: fields.line(),
                expected: EVENT_COLUMNS,
                found: fields.len(),
            });
        }
        let hit_value: u8 = fields.number(5, "hit value")?;
        if hit_value > MAX_HIT_VALUE {
            return Err(ParseError::OutOfRange {
                line: fields.line(),
                column: 5,
                field: "hit value",
                value: hit_value.to_string(),
            });
        }
        Ok(Self {
            game_id: fields.text(1, "game id")?.to_owned(),
            player_id: fields.text(2, "player id")?.to_owned(),
            event_code: fields.number(3, "event code")?,
            at_bat: fields.flag(4, "at-bat flag")?,
            hit_value,
            sacrifice_hit: fields.flag(6, "sacrifice-hit flag")?,
            sacrifice_fly: fields.flag(7, "sacrifice-fly flag")?,
        })
    }
}

/// Reads every event from `reader`.
pub fn read_events<R>(reader: R) -> Result<Vec<EventRow>, ParseError>
where
    R: io::Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut events = Vec::new();
    for record in reader.records() {
        let record = record?;
        events.push(EventRow::from_fields(&RecordFields::new(&record))?);
    }
    Ok(events)
}

/// Opens and reads an event file.
pub fn load_events<P>(path: P) -> Result<Vec<EventRow>, ParseError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ParseError::io(path, e))?;
    let events = read_events(io::BufReader::new(file))?;
    debug!("read {} events from {}", events.len(), path.display());
    Ok(events)
}
