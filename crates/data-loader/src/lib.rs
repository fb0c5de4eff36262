//! # Data Loader Crate
//!
//! This crate loads the song dataset that the swipe session works through.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Song, Preference, Mark)
//! - **parser**: Parse the comma-separated dataset into songs
//! - **catalog**: Ordered, validated catalog with an id index
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Catalog;
//! use std::path::Path;
//!
//! let catalog = Catalog::load_from_file(Path::new("data/data.csv"))?;
//! let song = catalog.get(1).unwrap();
//! println!("{} songs, first is {}", catalog.len(), song);
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod catalog;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use catalog::Catalog;
pub use types::{
    // Type aliases and constants
    SongId,
    COLUMN_COUNT,
    FEATURE_COUNT,
    // Core types
    Song,
    Mark,
    // Enums
    Preference,
};
