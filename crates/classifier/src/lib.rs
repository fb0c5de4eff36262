//! Preference classifier and its persisted artifact.
//!
//! This crate provides:
//! - The `Classifier` trait: `train(batch) -> model` and `predict(features) -> P(like)`
//! - `KnnClassifier`, an updatable k-nearest-neighbours implementation
//! - `ModelStore`, which persists a model and replaces it atomically
//!
//! Nothing here knows about songs; callers hand in plain feature vectors.

pub mod error;
pub mod knn;
pub mod store;
pub mod traits;

pub use error::{ClassifierError, ModelError};
pub use knn::KnnClassifier;
pub use store::ModelStore;
pub use traits::{Classifier, Label, LabeledExample};
