//! Core traits for the recommendation pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to scored songs.

use anyhow::Result;
use data_loader::Song;

/// Core trait for filtering scored songs.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be shared with scoring workers
/// - Filters take ownership of the Vec<Song> and return a filtered Vec
/// - Filters run after scoring, so `song.score` holds the predicted
///   like-probability
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of scored songs.
    fn apply(&self, songs: Vec<Song>) -> Result<Vec<Song>>;
}
