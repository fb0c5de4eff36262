//! Preference collection.
//!
//! Each swipe moves a song out of the active catalog into the pending-marks
//! list, where it waits for the next training round.

use crate::error::SessionError;
use data_loader::{Mark, Preference, Song};
use std::fmt;
use tracing::debug;

/// Running like/dislike counters for a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkTally {
    pub likes: u32,
    pub dislikes: u32,
}

impl MarkTally {
    fn record(&mut self, preference: Preference) {
        match preference {
            Preference::Like => self.likes += 1,
            Preference::Dislike => self.dislikes += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.likes + self.dislikes
    }
}

impl fmt::Display for MarkTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "# Dislikes: {} - # Likes: {}", self.dislikes, self.likes)
    }
}

/// Owns the pending marks and the tally
#[derive(Debug, Default)]
pub struct PreferenceCollector {
    pending: Vec<Mark>,
    tally: MarkTally,
}

impl PreferenceCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the song at `index` out of `catalog` and record it as a mark.
    pub fn mark(
        &mut self,
        catalog: &mut Vec<Song>,
        index: usize,
        preference: Preference,
    ) -> Result<&Mark, SessionError> {
        if index >= catalog.len() {
            return Err(SessionError::IndexOutOfRange {
                index,
                len: catalog.len(),
            });
        }

        let song = catalog.remove(index);
        debug!("Marked song {} as {:?}", song.id, preference);

        self.tally.record(preference);
        self.pending.push(Mark::new(song, preference));
        Ok(&self.pending[self.pending.len() - 1])
    }

    pub fn pending(&self) -> &[Mark] {
        &self.pending
    }

    pub fn tally(&self) -> MarkTally {
        self.tally
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take every pending mark, leaving the list empty. The tally is kept.
    pub fn drain(&mut self) -> Vec<Mark> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::song;

    #[test]
    fn test_mark_like_moves_song() {
        let mut catalog = vec![song(1, "A", 0.5, 100.0), song(2, "B", 0.5, 100.0), song(3, "C", 0.5, 100.0)];
        let mut collector = PreferenceCollector::new();

        let mark = collector.mark(&mut catalog, 1, Preference::Like).unwrap();
        assert_eq!(mark.song.id, 2);
        assert_eq!(mark.song.score, 1.0);

        assert_eq!(catalog.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(collector.pending().len(), 1);
        assert_eq!(collector.tally(), MarkTally { likes: 1, dislikes: 0 });
    }

    #[test]
    fn test_mark_dislike_scores_zero() {
        let mut catalog = vec![song(1, "A", 0.5, 100.0)];
        let mut collector = PreferenceCollector::new();

        let mark = collector.mark(&mut catalog, 0, Preference::Dislike).unwrap();
        assert_eq!(mark.song.score, 0.0);
        assert!(catalog.is_empty());
        assert_eq!(collector.tally().dislikes, 1);
    }

    #[test]
    fn test_mark_out_of_range() {
        let mut catalog = vec![song(1, "A", 0.5, 100.0)];
        let mut collector = PreferenceCollector::new();

        let err = collector.mark(&mut catalog, 3, Preference::Like).unwrap_err();
        assert_eq!(err, SessionError::IndexOutOfRange { index: 3, len: 1 });
        assert_eq!(catalog.len(), 1);
        assert!(collector.is_empty());
        assert_eq!(collector.tally().total(), 0);
    }

    #[test]
    fn test_drain_keeps_tally() {
        let mut catalog = vec![song(1, "A", 0.5, 100.0), song(2, "B", 0.5, 100.0)];
        let mut collector = PreferenceCollector::new();
        collector.mark(&mut catalog, 0, Preference::Like).unwrap();
        collector.mark(&mut catalog, 0, Preference::Dislike).unwrap();

        let drained = collector.drain();
        assert_eq!(drained.len(), 2);
        assert!(collector.is_empty());
        assert_eq!(collector.tally().to_string(), "# Dislikes: 1 - # Likes: 1");
    }
}
