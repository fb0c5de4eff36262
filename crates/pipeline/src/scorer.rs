//! Scoring and ranking of candidate songs.
//!
//! ## Algorithm
//! 1. Ask the model for P(like) of every candidate (in parallel)
//! 2. Store the probability as the song's score
//! 3. Run the filter pipeline (by default: score >= like threshold)
//! 4. Sort the survivors by descending score
//!
//! Every call recomputes from scratch; nothing is cached between calls.

use crate::filter_pipeline::FilterPipeline;
use crate::filters::MinimumScoreFilter;
use crate::sort::{sort_songs, SortKey};
use crate::traits::Filter;
use anyhow::Result;
use classifier::Classifier;
use data_loader::Song;
use rayon::prelude::*;
use std::time::Instant;
use tracing::{info, warn};

/// Probability at or above which a song counts as recommended
pub const DEFAULT_LIKE_THRESHOLD: f64 = 0.5;

/// Scores candidates with a classifier and ranks the ones worth recommending
pub struct Scorer {
    pipeline: FilterPipeline,
}

impl Scorer {
    /// Scorer whose pipeline keeps songs with score >= `like_threshold`
    pub fn new(like_threshold: f64) -> Self {
        Self {
            pipeline: FilterPipeline::new().add_filter(MinimumScoreFilter::new(like_threshold)),
        }
    }

    /// Scorer with a caller-built pipeline
    pub fn with_pipeline(pipeline: FilterPipeline) -> Self {
        Self { pipeline }
    }

    /// Append a filter after the existing ones (builder pattern)
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.pipeline = self.pipeline.add_filter(filter);
        self
    }

    /// Score every candidate and return the recommended set, best first.
    ///
    /// Candidates are not modified; the returned songs are copies carrying
    /// their predicted score. Equal scores keep candidate order.
    pub fn score_all<C>(&self, candidates: &[Song], model: &C) -> Result<Vec<Song>>
    where
        C: Classifier + ?Sized,
    {
        let start = Instant::now();

        let scored: Vec<Song> = candidates
            .par_iter()
            .map(|song| {
                let mut scored = song.clone();
                scored.score = predict_like(model, song);
                scored
            })
            .collect();

        let mut recommended = self.pipeline.apply(scored)?;
        sort_songs(&mut recommended, SortKey::Score);

        info!(
            "Scored {} candidates, {} recommended in {:.2?}",
            candidates.len(),
            recommended.len(),
            start.elapsed()
        );
        Ok(recommended)
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new(DEFAULT_LIKE_THRESHOLD)
    }
}

/// Like-probability for one song; a failed prediction counts as 0.0
fn predict_like<C>(model: &C, song: &Song) -> f64
where
    C: Classifier + ?Sized,
{
    match model.predict(&song.feature_vector()) {
        Ok(probability) => probability,
        Err(e) => {
            warn!("Prediction failed for song {}: {}", song.id, e);
            0.0
        }
    }
}
