use std::{io, path::PathBuf};

/// Fatal failure while loading an input file.
///
/// Line numbers are 1-based record positions in the source file; column
/// numbers are 1-based field positions.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ParseError {
    #[display("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[display("malformed CSV record: {source}")]
    Csv { source: csv::Error },
    #[display("line {line}: expected at least {expected} columns, found {found}")]
    MissingColumns {
        line: u64,
        expected: usize,
        found: usize,
    },
    #[display("line {line}: expected exactly {expected} columns, found {found}")]
    ColumnCount {
        line: u64,
        expected: usize,
        found: usize,
    },
    #[display("line {line}: column {column} ({field}) is empty")]
    EmptyField {
        line: u64,
        column: usize,
        field: &'static str,
    },
    #[display("line {line}: column {column} ({field}) is not a valid number: {value:?}")]
    InvalidNumber {
        line: u64,
        column: usize,
        field: &'static str,
        value: String,
    },
    #[display("line {line}: column {column} ({field}) is out of range: {value}")]
    OutOfRange {
        line: u64,
        column: usize,
        field: &'static str,
        value: String,
    },
}

impl From<csv::Error> for ParseError {
    fn from(source: csv::Error) -> Self {
        Self::Csv { source }
    }
}

impl ParseError {
    /// Attaches the path of the file being read to an I/O failure.
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
