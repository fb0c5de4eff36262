//! k-nearest-neighbours classifier.
//!
//! Training appends examples; prediction is a majority vote among the `k`
//! closest stored examples by Euclidean distance. The returned probability is
//! the share of liked neighbours.

use crate::error::ClassifierError;
use crate::traits::{Classifier, Label, LabeledExample};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Updatable k-nearest-neighbours model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawKnn")]
pub struct KnnClassifier {
    k: usize,
    dimension: usize,
    examples: Vec<LabeledExample>,
}

/// Unchecked on-disk form; every load goes through the same checks as `new`
#[derive(Deserialize)]
struct RawKnn {
    k: usize,
    dimension: usize,
    examples: Vec<LabeledExample>,
}

impl TryFrom<RawKnn> for KnnClassifier {
    type Error = ClassifierError;

    fn try_from(raw: RawKnn) -> Result<Self, Self::Error> {
        let mut model = Self::new(raw.k, raw.dimension)?;
        for example in &raw.examples {
            model.check_features(&example.features)?;
        }
        model.examples = raw.examples;
        Ok(model)
    }
}

impl KnnClassifier {
    /// Create an empty model.
    ///
    /// # Arguments
    /// * `k` - Number of neighbours that vote (must be > 0)
    /// * `dimension` - Length of every feature vector (must be > 0)
    pub fn new(k: usize, dimension: usize) -> Result<Self, ClassifierError> {
        if k == 0 {
            return Err(ClassifierError::InvalidConfig("k must be at least 1".into()));
        }
        if dimension == 0 {
            return Err(ClassifierError::InvalidConfig(
                "feature dimension must be at least 1".into(),
            ));
        }
        Ok(Self {
            k,
            dimension,
            examples: Vec::new(),
        })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn examples(&self) -> &[LabeledExample] {
        &self.examples
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    fn check_features(&self, features: &[f64]) -> Result<(), ClassifierError> {
        if features.len() != self.dimension {
            return Err(ClassifierError::DimensionMismatch {
                expected: self.dimension,
                found: features.len(),
            });
        }
        if let Some((index, &value)) = features.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ClassifierError::NonFiniteFeature { index, value });
        }
        Ok(())
    }
}

impl Classifier for KnnClassifier {
    fn train(&self, batch: &[LabeledExample]) -> Result<Self, ClassifierError> {
        if batch.is_empty() {
            return Err(ClassifierError::EmptyBatch);
        }
        for example in batch {
            self.check_features(&example.features)?;
        }

        let mut updated = self.clone();
        updated.examples.extend_from_slice(batch);
        debug!(
            "KNN model updated: {} new examples, {} total",
            batch.len(),
            updated.examples.len()
        );
        Ok(updated)
    }

    fn predict(&self, features: &[f64]) -> Result<f64, ClassifierError> {
        if self.examples.is_empty() {
            return Err(ClassifierError::EmptyModel);
        }
        self.check_features(features)?;

        let mut neighbours: Vec<(f64, Label)> = self
            .examples
            .iter()
            .map(|example| (squared_distance(&example.features, features), example.label))
            .collect();

        let k = self.k.min(neighbours.len());
        if k < neighbours.len() {
            neighbours.select_nth_unstable_by(k - 1, |a, b| a.0.total_cmp(&b.0));
        }

        let liked = neighbours[..k]
            .iter()
            .filter(|(_, label)| *label == Label::Liked)
            .count();
        Ok(liked as f64 / k as f64)
    }
}

/// Squared Euclidean distance; ordering is the same as the true distance
fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}
