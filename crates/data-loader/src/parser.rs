//! Parser for the song dataset.
//!
//! Format: one header row, then one song per line:
//! `id,title,artist,genre,tempo,energy,danceability,liveness,valence,duration,acousticness,speechiness,popularity,artist_code,genre_code`
//!
//! Blank lines (and any line with at most one field) are skipped. Every other
//! row must be complete and numeric where the schema says so; a single row
//! that isn't aborts the whole load.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use rayon::prelude::*;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Column positions in a dataset row
mod column {
    pub const ID: usize = 0;
    pub const TITLE: usize = 1;
    pub const ARTIST: usize = 2;
    pub const GENRE: usize = 3;
    pub const TEMPO: usize = 4;
    pub const ENERGY: usize = 5;
    pub const DANCEABILITY: usize = 6;
    pub const LIVENESS: usize = 7;
    pub const VALENCE: usize = 8;
    pub const DURATION: usize = 9;
    pub const ACOUSTICNESS: usize = 10;
    pub const SPEECHINESS: usize = 11;
    pub const POPULARITY: usize = 12;
    pub const ARTIST_CODE: usize = 13;
    pub const GENRE_CODE: usize = 14;
}

/// Read and parse a dataset file
pub fn parse_catalog(path: &Path) -> Result<Vec<Song>> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;

    let source = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    parse_catalog_str(&content, &source)
}

/// Parse dataset text. `source` names the input in error messages.
///
/// Rows are parsed in parallel; the returned songs keep file order.
pub fn parse_catalog_str(content: &str, source: &str) -> Result<Vec<Song>> {
    let lines: Vec<&str> = content.lines().collect();

    let songs: Vec<Song> = lines
        .par_iter()
        .enumerate()
        // Skip header
        .skip(1)
        .filter_map(|(idx, line)| parse_row(line, idx + 1, source).transpose())
        .collect::<Result<_>>()?;

    let skipped = lines.len().saturating_sub(1) - songs.len();
    debug!("Parsed {} songs from {} ({} rows skipped)", songs.len(), source, skipped);
    Ok(songs)
}

/// Parse one data row.
///
/// Returns `Ok(None)` for rows that should be skipped silently.
fn parse_row(line: &str, line_no: usize, source: &str) -> Result<Option<Song>> {
    let line = line.trim_end_matches('\r');
    let fields: Vec<&str> = line.split(',').collect();

    if fields.len() <= 1 {
        return Ok(None);
    }
    if fields.len() != COLUMN_COUNT {
        return Err(DataLoadError::FieldCountMismatch {
            expected: COLUMN_COUNT,
            found: fields.len(),
            line: line_no,
        });
    }

    let row = Row {
        fields: &fields,
        line_no,
        source,
    };

    let song = Song {
        id: row.number(column::ID, "id")?,
        title: row.text(column::TITLE),
        artist: row.text(column::ARTIST),
        genre: row.text(column::GENRE),
        tempo: row.number(column::TEMPO, "tempo")?,
        energy: row.number(column::ENERGY, "energy")?,
        danceability: row.number(column::DANCEABILITY, "danceability")?,
        liveness: row.number(column::LIVENESS, "liveness")?,
        valence: row.number(column::VALENCE, "valence")?,
        duration: row.number(column::DURATION, "duration")?,
        acousticness: row.number(column::ACOUSTICNESS, "acousticness")?,
        speechiness: row.number(column::SPEECHINESS, "speechiness")?,
        popularity: row.number(column::POPULARITY, "popularity")?,
        artist_code: row.number(column::ARTIST_CODE, "artist_code")?,
        genre_code: row.number(column::GENRE_CODE, "genre_code")?,
        score: 0.0,
    };

    Ok(Some(song))
}

/// A split row with the context needed for error messages
struct Row<'a> {
    fields: &'a [&'a str],
    line_no: usize,
    source: &'a str,
}

impl Row<'_> {
    fn text(&self, col: usize) -> String {
        self.fields[col].trim().to_string()
    }

    fn number<T>(&self, col: usize, name: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = self.fields[col].trim();
        if raw.is_empty() {
            return Err(self.error(format!("Missing {}", name)));
        }
        raw.parse()
            .map_err(|e| self.error(format!("Invalid {} '{}': {}", name, raw, e)))
    }

    fn error(&self, reason: String) -> DataLoadError {
        DataLoadError::ParseError {
            file: self.source.to_string(),
            line: self.line_no,
            reason,
        }
    }
}
