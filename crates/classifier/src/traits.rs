//! The classifier seam.
//!
//! The session only ever sees this trait, so any batch or incremental
//! classifier can stand in for the bundled k-nearest-neighbours model.

use crate::error::ClassifierError;
use serde::{Deserialize, Serialize};

/// Binary training label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Liked,
    Disliked,
}

impl Label {
    /// Numeric value of the label: 1.0 for liked, 0.0 for disliked
    pub fn value(self) -> f64 {
        match self {
            Label::Liked => 1.0,
            Label::Disliked => 0.0,
        }
    }
}

/// One labeled feature vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledExample {
    pub features: Vec<f64>,
    pub label: Label,
}

impl LabeledExample {
    pub fn new(features: impl Into<Vec<f64>>, label: Label) -> Self {
        Self {
            features: features.into(),
            label,
        }
    }
}

/// An updatable binary classifier.
///
/// ## Design Note
/// - `train` never mutates the seed; it returns the updated model so the
///   caller decides when the new model becomes authoritative
/// - `Send + Sync` lets scoring fan out across threads and training run on a
///   blocking worker
pub trait Classifier: Send + Sync {
    /// Fit a new model starting from `self` plus `batch`.
    fn train(&self, batch: &[LabeledExample]) -> Result<Self, ClassifierError>
    where
        Self: Sized;

    /// Probability in `[0, 1]` that `features` belongs to a liked song.
    fn predict(&self, features: &[f64]) -> Result<f64, ClassifierError>;
}
