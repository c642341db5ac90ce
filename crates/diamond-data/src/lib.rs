//! Typed records and readers for the external baseball data files.
//!
//! - [`game_log`]: Retrosheet game logs, one row per game ([`game_log::GameLogRow`])
//! - [`event`]: plate-appearance event files ([`event::EventRow`])
//! - [`season`]: discovery of yearly `GL<year>.TXT` files
//!
//! Both readers are strict: a row that cannot be parsed aborts the read with
//! a [`ParseError`] carrying the line and column. Empty numeric fields in
//! game logs are not errors; they are read as `None` (not recorded).

pub use self::error::ParseError;

mod error;
pub mod event;
pub mod game_log;
mod record;
pub mod season;
