//! Core domain types for the song catalog.
//!
//! This module defines the records shared by every other crate:
//! - `Song`: one catalog row plus its mutable score
//! - `Preference`: the like/dislike choice made by a swipe
//! - `Mark`: a song bound to a preference, waiting to be trained on

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Type Aliases and Constants
// =============================================================================

/// Unique identifier for a song (first column of the dataset)
pub type SongId = u32;

/// Number of comma-separated columns in a dataset row
pub const COLUMN_COUNT: usize = 15;

/// Number of model inputs produced by [`Song::feature_vector`]
pub const FEATURE_COUNT: usize = 11;

// =============================================================================
// Song
// =============================================================================

/// A song from the catalog.
///
/// Everything except `score` is fixed at load time. The score starts at 0.0,
/// becomes the preference value (1.0 / 0.0) when the song is marked, and the
/// predicted like-probability when it is scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub id: SongId,
    pub title: String,
    pub artist: String,
    pub genre: String,

    // Audio features
    /// Beats per minute
    pub tempo: f64,
    pub energy: f64,
    pub danceability: f64,
    pub liveness: f64,
    pub valence: f64,
    /// Track length in seconds
    pub duration: f64,
    pub acousticness: f64,
    pub speechiness: f64,
    pub popularity: f64,

    // Categorical codes assigned by the dataset
    pub genre_code: f64,
    pub artist_code: f64,

    #[serde(default)]
    pub score: f64,
}

impl Song {
    /// Model inputs in their fixed order.
    ///
    /// The order is `tempo, energy, danceability, liveness, valence,
    /// duration, acousticness, speechiness, popularity, genre_code,
    /// artist_code`. Models trained on one order cannot score the other.
    pub fn feature_vector(&self) -> [f64; FEATURE_COUNT] {
        [
            self.tempo,
            self.energy,
            self.danceability,
            self.liveness,
            self.valence,
            self.duration,
            self.acousticness,
            self.speechiness,
            self.popularity,
            self.genre_code,
            self.artist_code,
        ]
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} | {}", self.title, self.artist, self.genre)
    }
}

// =============================================================================
// Preference and Mark
// =============================================================================

/// Direction of a swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Preference {
    Like,
    Dislike,
}

impl Preference {
    /// Score assigned to a marked song: 1.0 for a like, 0.0 for a dislike
    pub fn score(self) -> f64 {
        match self {
            Preference::Like => 1.0,
            Preference::Dislike => 0.0,
        }
    }
}

/// A song bound to the user's preference.
///
/// Marks live in the pending list until the next training round consumes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    pub song: Song,
    pub preference: Preference,
}

impl Mark {
    /// Bind `song` to `preference`, overwriting its score with the preference value
    pub fn new(mut song: Song, preference: Preference) -> Self {
        song.score = preference.score();
        Self { song, preference }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// A song with distinct values in every feature slot
    pub fn sample_song(id: SongId, title: &str, artist: &str) -> Song {
        Song {
            id,
            title: title.to_string(),
            artist: artist.to_string(),
            genre: "dance pop".to_string(),
            tempo: 120.0,
            energy: 0.8,
            danceability: 0.7,
            liveness: 0.1,
            valence: 0.6,
            duration: 210.0,
            acousticness: 0.05,
            speechiness: 0.04,
            popularity: 75.0,
            genre_code: 3.0,
            artist_code: 42.0,
            score: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::sample_song;
    use super::*;

    #[test]
    fn test_feature_vector_order() {
        let song = sample_song(1, "Title", "Artist");
        let features = song.feature_vector();

        assert_eq!(features.len(), FEATURE_COUNT);
        assert_eq!(features[0], 120.0);
        assert_eq!(features[8], 75.0);
        // genre code comes before artist code in the model input
        assert_eq!(features[9], 3.0);
        assert_eq!(features[10], 42.0);
    }

    #[test]
    fn test_mark_sets_score() {
        let liked = Mark::new(sample_song(1, "A", "B"), Preference::Like);
        assert_eq!(liked.song.score, 1.0);

        let mut song = sample_song(2, "C", "D");
        song.score = 0.9;
        let disliked = Mark::new(song, Preference::Dislike);
        assert_eq!(disliked.song.score, 0.0);
        assert_eq!(disliked.preference, Preference::Dislike);
    }
}
