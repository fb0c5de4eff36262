use data_loader::SongId;
use thiserror::Error;

/// Errors returned by session operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Song {0} is not in the active catalog")]
    UnknownSong(SongId),

    #[error("No song at position {index} (active catalog has {len})")]
    IndexOutOfRange { index: usize, len: usize },
}
