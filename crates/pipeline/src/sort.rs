//! Secondary ordering of song lists.

use anyhow::{anyhow, Error};
use data_loader::Song;
use std::fmt;
use std::str::FromStr;

/// Field to order a song list by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Ascending lexicographic
    Title,
    /// Ascending lexicographic
    Artist,
    /// Descending
    Score,
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(SortKey::Title),
            "artist" => Ok(SortKey::Artist),
            "score" => Ok(SortKey::Score),
            other => Err(anyhow!("Unknown sort key: {}", other)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::Title => "title",
            SortKey::Artist => "artist",
            SortKey::Score => "score",
        };
        f.write_str(name)
    }
}

/// Reorder `songs` in place by `key`.
///
/// The sort is stable, so songs that compare equal keep their relative order.
pub fn sort_songs(songs: &mut [Song], key: SortKey) {
    match key {
        SortKey::Title => songs.sort_by(|a, b| a.title.cmp(&b.title)),
        SortKey::Artist => songs.sort_by(|a, b| a.artist.cmp(&b.artist)),
        SortKey::Score => songs.sort_by(|a, b| b.score.total_cmp(&a.score)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::song;

    fn fixture() -> Vec<Song> {
        vec![
            song(1, "Bad Guy", "Billie Eilish", 0.6),
            song(2, "All Of Me", "John Legend", 0.9),
            song(3, "Closer", "The Chainsmokers", 0.6),
            song(4, "Animals", "Maroon 5", 0.75),
        ]
    }

    fn ids(songs: &[Song]) -> Vec<u32> {
        songs.iter().map(|s| s.id).collect()
    }

    #[test]
    fn test_sort_by_title_ascending() {
        let mut songs = fixture();
        sort_songs(&mut songs, SortKey::Title);
        assert_eq!(ids(&songs), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_sort_by_artist_ascending() {
        let mut songs = fixture();
        sort_songs(&mut songs, SortKey::Artist);
        assert_eq!(ids(&songs), vec![1, 2, 4, 3]);
    }

    #[test]
    fn test_sort_by_score_descending_keeps_tie_order() {
        let mut songs = fixture();
        sort_songs(&mut songs, SortKey::Score);
        assert_eq!(ids(&songs), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_parse_sort_key() {
        assert_eq!("Title".parse::<SortKey>().unwrap(), SortKey::Title);
        assert_eq!(" score ".parse::<SortKey>().unwrap(), SortKey::Score);
        assert_eq!(SortKey::Artist.to_string().parse::<SortKey>().unwrap(), SortKey::Artist);
        assert!("genre".parse::<SortKey>().is_err());
    }
}
