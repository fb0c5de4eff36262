//! Pipeline for scoring, filtering and ordering songs.
//!
//! This crate provides:
//! - Feature extraction that turns marks into training examples
//! - Filter trait and implementations for post-scoring filtering
//! - FilterPipeline for composing filters
//! - Scorer, which runs a classifier over candidates and ranks the result
//! - Sort utility for title / artist / score ordering
//!
//! ## Architecture
//! The pipeline processes candidates in stages:
//! 1. The Scorer asks the classifier for a like-probability per song
//! 2. Filters remove songs below the like threshold (and anything else added)
//! 3. Survivors are ranked by descending score
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{Scorer, SortKey, sort_songs};
//!
//! let mut recommended = Scorer::default().score_all(catalog.songs(), &model)?;
//! sort_songs(&mut recommended, SortKey::Title);
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod features;
pub mod scorer;
pub mod sort;

// Re-export main types
pub use traits::Filter;
pub use filter_pipeline::FilterPipeline;
pub use features::{label_for, training_batch, training_example};
pub use scorer::{Scorer, DEFAULT_LIKE_THRESHOLD};
pub use sort::{sort_songs, SortKey};
