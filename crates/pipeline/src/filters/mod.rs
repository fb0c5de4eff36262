//! Filter implementations for the scoring pipeline.
//!
//! This module contains the concrete filters that can be composed
//! into a FilterPipeline.

pub mod minimum_score;

// Re-export for convenience
pub use minimum_score::MinimumScoreFilter;
