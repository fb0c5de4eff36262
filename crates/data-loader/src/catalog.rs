//! Catalog building and indexing logic.
//!
//! A `Catalog` is the ordered list of songs from the dataset plus an id index
//! for O(1) lookups. Building one validates the parsed rows.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// The full set of songs loaded from the dataset, in file order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    songs: Vec<Song>,
    /// Position of each song in `songs`
    by_id: HashMap<SongId, usize>,
}

impl Catalog {
    /// Load and validate a catalog from a dataset file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading song catalog from {:?}", path);
        let songs = parser::parse_catalog(path)?;
        let catalog = Self::from_songs(songs)?;
        info!("Loaded {} songs", catalog.len());
        Ok(catalog)
    }

    /// Build a catalog from already-parsed songs
    pub fn from_songs(songs: Vec<Song>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(songs.len());
        for (position, song) in songs.iter().enumerate() {
            if by_id.insert(song.id, position).is_some() {
                return Err(DataLoadError::ValidationError(format!(
                    "duplicate song id {}",
                    song.id
                )));
            }
        }

        let catalog = Self { songs, by_id };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check that every model input is a finite number
    pub fn validate(&self) -> Result<()> {
        for song in &self.songs {
            if let Some(value) = song.feature_vector().iter().find(|v| !v.is_finite()) {
                return Err(DataLoadError::ValidationError(format!(
                    "song {} has non-finite feature value {}",
                    song.id, value
                )));
            }
        }
        Ok(())
    }

    pub fn get(&self, id: SongId) -> Option<&Song> {
        self.position(id).map(|i| &self.songs[i])
    }

    /// Position of a song in file order
    pub fn position(&self, id: SongId) -> Option<usize> {
        self.by_id.get(&id).copied()
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Give up the index and take the songs, in file order
    pub fn into_songs(self) -> Vec<Song> {
        self.songs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::test_support::sample_song;
    use std::io::Write;

    #[test]
    fn test_lookup_by_id() {
        let catalog = Catalog::from_songs(vec![
            sample_song(10, "First", "A"),
            sample_song(20, "Second", "B"),
        ])
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(20).unwrap().title, "Second");
        assert_eq!(catalog.position(10), Some(0));
        assert!(catalog.get(30).is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = Catalog::from_songs(vec![
            sample_song(1, "First", "A"),
            sample_song(1, "Again", "B"),
        ]);
        assert!(matches!(result, Err(DataLoadError::ValidationError(_))));
    }

    #[test]
    fn test_non_finite_feature_rejected() {
        let mut song = sample_song(1, "First", "A");
        song.energy = f64::NAN;
        let result = Catalog::from_songs(vec![song]);
        assert!(matches!(result, Err(DataLoadError::ValidationError(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "id,title,artist,genre,bpm,nrgy,dnce,live,val,dur,acous,spch,pop,artist_code,genre_code").unwrap();
        writeln!(file, "1,Hey Soul Sister,Train,neo mellow,97,89,67,8,80,217,19,4,83,0,0").unwrap();
        writeln!(file, "2,Love The Way You Lie,Eminem,detroit hip hop,87,93,75,52,64,263,24,23,82,1,1").unwrap();

        let catalog = Catalog::load_from_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.songs()[0].artist, "Train");
        assert_eq!(catalog.get(2).unwrap().genre, "detroit hip hop");
    }
}
