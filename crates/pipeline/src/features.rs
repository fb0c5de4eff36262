//! Feature extraction for training.
//!
//! Turns pending marks into the labeled vectors the classifier trains on.

use classifier::{Label, LabeledExample};
use data_loader::{Mark, Preference};

/// Classifier label for a swipe direction
pub fn label_for(preference: Preference) -> Label {
    match preference {
        Preference::Like => Label::Liked,
        Preference::Dislike => Label::Disliked,
    }
}

/// One labeled example for a mark
pub fn training_example(mark: &Mark) -> LabeledExample {
    LabeledExample::new(mark.song.feature_vector(), label_for(mark.preference))
}

/// One labeled example per mark, in mark order
pub fn training_batch(marks: &[Mark]) -> Vec<LabeledExample> {
    marks.iter().map(training_example).collect()
}
