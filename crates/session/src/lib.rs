//! Session crate for the song recommender.
//!
//! This crate contains the controller that ties the catalog, the preference
//! collector, the classifier and the scorer together.
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{Catalog, Preference};
//! use session::{RecommendationSession, SessionConfig};
//!
//! let catalog = Catalog::load_from_file(Path::new("data/data.csv"))?;
//! let mut session = RecommendationSession::with_knn(SessionConfig::default(), catalog)?;
//!
//! session.mark(1, Preference::Like)?;
//! session.mark(2, Preference::Dislike)?;
//!
//! for song in session.refresh().await? {
//!     println!("{:.2} {}", song.score, song);
//! }
//! ```

pub mod collector;
pub mod config;
pub mod error;
pub mod session;

pub use collector::{MarkTally, PreferenceCollector};
pub use config::SessionConfig;
pub use error::SessionError;
pub use session::{RecommendationSession, TrainingOutcome};
