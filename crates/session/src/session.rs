//! # Recommendation Session
//!
//! This module owns the whole swipe-to-recommendation loop:
//! 1. Hold the active catalog the user swipes through
//! 2. Collect like/dislike marks
//! 3. Train the classifier on pending marks and persist the result
//! 4. Score the active catalog and keep the ranked recommended set
//! 5. Re-order either list on request
//!
//! All state lives in `RecommendationSession`; callers hold it by value and
//! drive it sequentially. Training is the only slow step and runs on tokio's
//! blocking pool while the caller awaits it.

use std::time::Instant;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{error, info, warn};

use classifier::{Classifier, ClassifierError, KnnClassifier, ModelError, ModelStore};
use data_loader::{Catalog, Mark, Preference, Song, SongId, FEATURE_COUNT};
use pipeline::{sort_songs, training_batch, Scorer, SortKey};

use crate::collector::{MarkTally, PreferenceCollector};
use crate::config::SessionConfig;
use crate::error::SessionError;

/// Result of one training round
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrainingOutcome {
    /// There were no pending marks
    NothingToTrain,
    /// The model was updated; `persisted` is false if writing it to disk failed
    Trained { examples: usize, persisted: bool },
    /// The classifier rejected the batch; nothing changed
    Failed,
}

/// Controller for one user's swipe session
pub struct RecommendationSession<C = KnnClassifier> {
    config: SessionConfig,
    /// Songs not currently pending as marks, in display order
    catalog: Vec<Song>,
    collector: PreferenceCollector,
    /// Last scoring result, best first
    recommended: Vec<Song>,
    /// Seed for every training round
    base_model: C,
    /// Model used for scoring; `None` until trained or loaded
    model: Option<C>,
    store: ModelStore,
    scorer: Scorer,
}

impl RecommendationSession<KnnClassifier> {
    /// Session backed by an empty KNN model sized from the config
    pub fn with_knn(config: SessionConfig, catalog: Catalog) -> Result<Self> {
        config.validate()?;
        let base_model = KnnClassifier::new(config.neighbors, FEATURE_COUNT)
            .context("Failed to build base model")?;
        Ok(Self::new(config, base_model, catalog))
    }
}

impl<C> RecommendationSession<C>
where
    C: Classifier + Clone + Serialize + DeserializeOwned + 'static,
{
    /// Create a session over `catalog`, starting from `base_model`.
    ///
    /// Nothing is read from disk here; call [`Self::load_persisted_model`] or
    /// [`Self::refresh`] to pick up a model from an earlier session.
    pub fn new(config: SessionConfig, base_model: C, catalog: Catalog) -> Self {
        let store = ModelStore::new(config.model_path.clone());
        let scorer = Scorer::new(config.like_threshold);
        Self {
            config,
            catalog: catalog.into_songs(),
            collector: PreferenceCollector::new(),
            recommended: Vec::new(),
            base_model,
            model: None,
            store,
            scorer,
        }
    }

    /// Replace the active model with the persisted one, if any.
    ///
    /// Returns `Ok(false)` when no model has been persisted yet.
    pub fn load_persisted_model(&mut self) -> Result<bool> {
        let loaded: Option<C> = self
            .store
            .load()
            .with_context(|| format!("Failed to load model from {:?}", self.store.path()))?;

        match loaded {
            Some(model) => {
                self.model = Some(model);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Mark the song with `song_id` as liked or disliked.
    pub fn mark(&mut self, song_id: SongId, preference: Preference) -> Result<&Mark, SessionError> {
        let index = self
            .catalog
            .iter()
            .position(|song| song.id == song_id)
            .ok_or(SessionError::UnknownSong(song_id))?;
        self.collector.mark(&mut self.catalog, index, preference)
    }

    /// Mark the song at `index` of the active catalog.
    pub fn mark_at(&mut self, index: usize, preference: Preference) -> Result<&Mark, SessionError> {
        self.collector.mark(&mut self.catalog, index, preference)
    }

    /// Train on every pending mark.
    ///
    /// Every round starts from the base model and adds only the current
    /// marks. The result is persisted atomically and becomes the active model.
    /// Pending marks are cleared and their songs go back into the catalog.
    ///
    /// Failures are logged and reported through the outcome, never returned
    /// as errors: the previous model stays authoritative and the marks stay
    /// pending.
    pub async fn train(&mut self) -> TrainingOutcome {
        if self.collector.is_empty() {
            return TrainingOutcome::NothingToTrain;
        }

        let start = Instant::now();
        let batch = training_batch(self.collector.pending());
        let examples = batch.len();
        let seed = self.base_model.clone();
        let store = self.store.clone();

        info!("Training on {} marks", examples);

        let result = tokio::task::spawn_blocking(move || fit_and_persist(seed, &batch, &store)).await;

        let (updated, persisted) = match result {
            Ok(Ok((updated, persist_result))) => {
                let persisted = match persist_result {
                    Ok(()) => true,
                    Err(e) => {
                        error!("Failed to persist trained model: {}", e);
                        false
                    }
                };
                (updated, persisted)
            }
            Ok(Err(e)) => {
                error!("Training failed, keeping previous model: {}", e);
                return TrainingOutcome::Failed;
            }
            Err(e) => {
                error!("Training task panicked, keeping previous model: {}", e);
                return TrainingOutcome::Failed;
            }
        };

        self.model = Some(updated);
        let consumed = self.collector.drain();
        self.catalog.extend(consumed.into_iter().map(|mark| mark.song));

        info!(
            "Trained on {} marks in {:.2?} (persisted: {})",
            examples,
            start.elapsed(),
            persisted
        );
        TrainingOutcome::Trained {
            examples,
            persisted,
        }
    }

    /// Recompute the recommended set from the active catalog.
    ///
    /// Without a model the recommended set is empty.
    pub fn score_all(&mut self) -> Result<&[Song]> {
        self.recommended = match &self.model {
            Some(model) => self
                .scorer
                .score_all(&self.catalog, model)
                .context("Failed to score catalog")?,
            None => {
                info!("No trained model yet, nothing to recommend");
                Vec::new()
            }
        };
        Ok(&self.recommended)
    }

    /// Bring the recommended set up to date.
    ///
    /// With pending marks this trains first; otherwise it picks up the
    /// persisted model when none is active. Then it rescores.
    pub async fn refresh(&mut self) -> Result<&[Song]> {
        if !self.collector.is_empty() {
            self.train().await;
        } else if self.model.is_none() {
            if let Err(e) = self.load_persisted_model() {
                warn!("Ignoring unreadable persisted model: {:#}", e);
            }
        }
        self.score_all()
    }

    /// Forget the active model and delete the persisted one.
    pub fn reset_model(&mut self) -> Result<()> {
        self.model = None;
        self.recommended.clear();
        self.store
            .remove()
            .with_context(|| format!("Failed to remove model at {:?}", self.store.path()))?;
        Ok(())
    }

    pub fn sort_catalog(&mut self, key: SortKey) {
        sort_songs(&mut self.catalog, key);
    }

    pub fn sort_recommended(&mut self, key: SortKey) {
        sort_songs(&mut self.recommended, key);
    }

    /// Songs still available to swipe (and to score)
    pub fn catalog(&self) -> &[Song] {
        &self.catalog
    }

    pub fn pending_marks(&self) -> &[Mark] {
        self.collector.pending()
    }

    pub fn recommended(&self) -> &[Song] {
        &self.recommended
    }

    pub fn tally(&self) -> MarkTally {
        self.collector.tally()
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    pub fn model(&self) -> Option<&C> {
        self.model.as_ref()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

/// Runs on the blocking pool: fit, then try to persist.
///
/// A fit error aborts; a persist error is handed back alongside the model.
fn fit_and_persist<C>(
    seed: C,
    batch: &[classifier::LabeledExample],
    store: &ModelStore,
) -> std::result::Result<(C, std::result::Result<(), ModelError>), ClassifierError>
where
    C: Classifier + Serialize,
{
    let updated = seed.train(batch)?;
    let persisted = store.save(&updated);
    Ok((updated, persisted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{catalog, song};
    use classifier::{Label, LabeledExample};
    use serde::Deserialize;

    /// Predicts 1.0 for songs whose energy is at least the largest liked
    /// energy seen so far; refuses batches containing `reject_tempo`.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct EnergyModel {
        min_liked_energy: Option<f64>,
        reject_tempo: Option<f64>,
    }

    impl Classifier for EnergyModel {
        fn train(&self, batch: &[LabeledExample]) -> std::result::Result<Self, ClassifierError> {
            let mut updated = self.clone();
            for example in batch {
                if Some(example.features[0]) == self.reject_tempo {
                    return Err(ClassifierError::InvalidConfig("rejected".into()));
                }
                if example.label == Label::Liked {
                    let energy = example.features[1];
                    updated.min_liked_energy =
                        Some(updated.min_liked_energy.map_or(energy, |e| e.min(energy)));
                }
            }
            Ok(updated)
        }

        fn predict(&self, features: &[f64]) -> std::result::Result<f64, ClassifierError> {
            match self.min_liked_energy {
                Some(min) if features[1] >= min => Ok(1.0),
                Some(_) => Ok(0.0),
                None => Err(ClassifierError::EmptyModel),
            }
        }
    }

    fn session(dir: &tempfile::TempDir, reject_tempo: Option<f64>) -> RecommendationSession<EnergyModel> {
        let config = SessionConfig::default().with_model_path(dir.path().join("model.json"));
        let base = EnergyModel {
            min_liked_energy: None,
            reject_tempo,
        };
        RecommendationSession::new(
            config,
            base,
            catalog(vec![
                song(1, "Low", 0.2, 100.0),
                song(2, "High", 0.9, 110.0),
                song(3, "Mid", 0.6, 120.0),
                song(4, "Top", 0.95, 130.0),
            ]),
        )
    }

    #[tokio::test]
    async fn test_train_without_marks() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir, None);

        assert_eq!(session.train().await, TrainingOutcome::NothingToTrain);
        assert!(!session.has_model());
    }

    #[tokio::test]
    async fn test_train_clears_marks_and_returns_songs() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir, None);

        session.mark(2, Preference::Like).unwrap();
        session.mark(1, Preference::Dislike).unwrap();
        assert_eq!(session.catalog().len(), 2);

        let outcome = session.train().await;
        assert_eq!(
            outcome,
            TrainingOutcome::Trained {
                examples: 2,
                persisted: true
            }
        );
        assert!(session.pending_marks().is_empty());
        assert_eq!(session.catalog().len(), 4);
        assert!(dir.path().join("model.json").is_file());
        assert_eq!(session.tally().total(), 2);
    }

    #[tokio::test]
    async fn test_failed_training_keeps_marks_and_model() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir, Some(130.0));

        session.mark(2, Preference::Like).unwrap();
        session.train().await;
        let saved = std::fs::read_to_string(dir.path().join("model.json")).unwrap();

        session.mark(4, Preference::Like).unwrap();
        assert_eq!(session.train().await, TrainingOutcome::Failed);

        assert_eq!(session.pending_marks().len(), 1);
        assert_eq!(session.model().unwrap().min_liked_energy, Some(0.9));
        let after = std::fs::read_to_string(dir.path().join("model.json")).unwrap();
        assert_eq!(saved, after);
    }

    #[tokio::test]
    async fn test_each_round_starts_from_base_model() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir, None);

        session.mark(3, Preference::Like).unwrap();
        session.train().await;
        assert_eq!(session.model().unwrap().min_liked_energy, Some(0.6));

        session.mark(2, Preference::Like).unwrap();
        session.train().await;
        // Only the second round's like counts
        assert_eq!(session.model().unwrap().min_liked_energy, Some(0.9));
    }

    #[tokio::test]
    async fn test_persist_failure_still_updates_model() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the model file should be makes the rename fail
        let model_path = dir.path().join("model.json");
        std::fs::create_dir(&model_path).unwrap();
        std::fs::write(model_path.join("keep"), b"x").unwrap();

        let config = SessionConfig::default().with_model_path(&model_path);
        let base = EnergyModel {
            min_liked_energy: None,
            reject_tempo: None,
        };
        let mut session = RecommendationSession::new(config, base, catalog(vec![song(1, "A", 0.5, 100.0)]));

        session.mark(1, Preference::Like).unwrap();
        assert_eq!(
            session.train().await,
            TrainingOutcome::Trained {
                examples: 1,
                persisted: false
            }
        );
        assert!(session.has_model());
        assert!(session.pending_marks().is_empty());
    }

    #[tokio::test]
    async fn test_score_all_without_model_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir, None);

        assert!(session.score_all().unwrap().is_empty());
        assert!(session.refresh().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_trains_then_scores() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir, None);

        session.mark(3, Preference::Like).unwrap();
        let recommended: Vec<SongId> = session.refresh().await.unwrap().iter().map(|s| s.id).collect();

        // energy >= 0.6: songs 4 (0.95), 2 (0.9), 3 (0.6); all score 1.0, catalog order kept
        assert_eq!(recommended, vec![2, 4, 3]);
        assert!(session.recommended().iter().all(|s| s.score == 1.0));
    }

    #[tokio::test]
    async fn test_unknown_song() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir, None);

        assert_eq!(
            session.mark(99, Preference::Like).unwrap_err(),
            SessionError::UnknownSong(99)
        );
        session.mark(1, Preference::Like).unwrap();
        assert_eq!(
            session.mark(1, Preference::Like).unwrap_err(),
            SessionError::UnknownSong(1)
        );
    }

    #[tokio::test]
    async fn test_reset_model() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir, None);

        session.mark(2, Preference::Like).unwrap();
        session.refresh().await.unwrap();
        assert!(!session.recommended().is_empty());

        session.reset_model().unwrap();
        assert!(!session.has_model());
        assert!(session.recommended().is_empty());
        assert!(!dir.path().join("model.json").exists());
    }
}
