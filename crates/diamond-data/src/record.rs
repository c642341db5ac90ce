//! Named access to positional CSV fields.

use std::str::FromStr;

use csv::StringRecord;

use crate::ParseError;

/// A CSV record together with its source line, for error reporting.
pub(crate) struct RecordFields<'a> {
    record: &'a StringRecord,
    line: u64,
}

impl<'a> RecordFields<'a> {
    pub(crate) fn new(record: &'a StringRecord) -> Self {
        let line = record.position().map_or(0, csv::Position::line);
        Self { record, line }
    }

    pub(crate) fn line(&self) -> u64 {
        self.line
    }

    pub(crate) fn len(&self) -> usize {
        self.record.len()
    }

    /// Returns the trimmed field at 1-based `column`, or `""` past the end.
    fn raw(&self, column: usize) -> &'a str {
        self.record.get(column - 1).unwrap_or("").trim()
    }

    /// A field that must be present and non-empty.
    pub(crate) fn text(&self, column: usize, field: &'static str) -> Result<&'a str, ParseError> {
        let value = self.raw(column);
        if value.is_empty() {
            return Err(ParseError::EmptyField {
                line: self.line,
                column,
                field,
            });
        }
        Ok(value)
    }

    /// A numeric field that must be present.
    pub(crate) fn number<T>(&self, column: usize, field: &'static str) -> Result<T, ParseError>
    where
        T: FromStr,
    {
        let value = self.text(column, field)?;
        self.parse(value, column, field)
    }

    /// A numeric field where an empty value means "not recorded".
    pub(crate) fn optional_number<T>(
        &self,
        column: usize,
        field: &'static str,
    ) -> Result<Option<T>, ParseError>
    where
        T: FromStr,
    {
        let value = self.raw(column);
        if value.is_empty() {
            return Ok(None);
        }
        self.parse(value, column, field).map(Some)
    }

    /// A 0/1 (or T/F) flag.
    pub(crate) fn flag(&self, column: usize, field: &'static str) -> Result<bool, ParseError> {
        match self.text(column, field)? {
            "1" | "T" | "t" => Ok(true),
            "0" | "F" | "f" => Ok(false),
            other => Err(ParseError::InvalidNumber {
                line: self.line,
                column,
                field,
                value: other.to_owned(),
            }),
        }
    }

    fn parse<T>(&self, value: &str, column: usize, field: &'static str) -> Result<T, ParseError>
    where
        T: FromStr,
    {
        value.parse().map_err(|_| ParseError::InvalidNumber {
            line: self.line,
            column,
            field,
            value: value.to_owned(),
        })
    }
}
