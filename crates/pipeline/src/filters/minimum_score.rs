//! Filter to keep only songs the model expects the user to like.

use crate::traits::Filter;
use anyhow::Result;
use data_loader::Song;

/// Removes songs whose predicted like-probability is below a threshold.
///
/// The threshold is inclusive: a song scored exactly at the threshold stays.
pub struct MinimumScoreFilter {
    threshold: f64,
}

impl MinimumScoreFilter {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Filter for MinimumScoreFilter {
    fn name(&self) -> &str {
        "MinimumScoreFilter"
    }

    fn apply(&self, songs: Vec<Song>) -> Result<Vec<Song>> {
        let filtered: Vec<Song> = songs
            .into_iter()
            .filter(|song| song.score >= self.threshold)
            .collect();

        Ok(filtered)
    }
}
