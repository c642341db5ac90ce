//! Discovery of yearly game-log files (`GL<year>.TXT`) in a directory.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::ParseError;

/// A game-log file for one season.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SeasonFile {
    pub year: u16,
    pub path: PathBuf,
}

/// Inclusive year filter; `None` bounds are open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YearRange {
    pub from: Option<u16>,
    pub to: Option<u16>,
}

impl YearRange {
    #[must_use]
    pub fn contains(&self, year: u16) -> bool {
        self.from.is_none_or(|from| from <= year) && self.to.is_none_or(|to| year <= to)
    }
}

/// Extracts the season year from a `GL<year>.TXT` file name (case-insensitive).
#[must_use]
pub fn season_year(file_name: &str) -> Option<u16> {
    let upper = file_name.to_ascii_uppercase();
    let digits = upper.strip_prefix("GL")?.strip_suffix(".TXT")?;
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Lists the game logs in `dir` whose season falls in `years`, ordered by year.
pub fn discover_game_logs<P>(dir: P, years: YearRange) -> Result<Vec<SeasonFile>, ParseError>
where
    P: AsRef<Path>,
{
    let dir = dir.as_ref();
    let mut seasons = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| ParseError::io(dir, e))? {
        let entry = entry.map_err(|e| ParseError::io(dir, e))?;
        let path = entry.path();
        let Some(year) = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(season_year)
        else {
            continue;
        };
        if years.contains(year) && path.is_file() {
            seasons.push(SeasonFile { year, path });
        }
    }
    seasons.sort();
    debug!("found {} game logs in {}", seasons.len(), dir.display());
    Ok(seasons)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_year() {
        assert_eq!(season_year("GL1954.TXT"), Some(1954));
        assert_eq!(season_year("gl2019.txt"), Some(2019));
        assert_eq!(season_year("GL54.TXT"), None);
        assert_eq!(season_year("GL1954.csv"), None);
        assert_eq!(season_year("EV1954.TXT"), None);
        assert_eq!(season_year("GL19x4.TXT"), None);
    }

    #[test]
    fn test_year_range() {
        let all = YearRange::default();
        assert!(all.contains(1871));

        let range = YearRange {
            from: Some(1910),
            to: Some(2019),
        };
        assert!(!range.contains(1909));
        assert!(range.contains(1910));
        assert!(range.contains(2019));
        assert!(!range.contains(2020));
    }
}
