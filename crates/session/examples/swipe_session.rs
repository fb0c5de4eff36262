//! Example: A scripted swipe session
//!
//! Run with: cargo run --package session --example swipe_session
//!
//! This example shows how to:
//! 1. Load a song catalog
//! 2. Like and dislike a handful of songs
//! 3. Train the KNN model and persist it
//! 4. Display the ranked recommendations
//! 5. Re-open the session and reuse the persisted model
//!
//! A small built-in catalog is used. The catalog and the model are written to
//! a temporary directory so repeated runs start fresh.

use data_loader::{Catalog, Preference};
use pipeline::SortKey;
use session::{RecommendationSession, SessionConfig};
use std::time::Instant;

const SAMPLE_CATALOG: &str = "\
id,title,artist,genre,bpm,nrgy,dnce,live,val,dur,acous,spch,pop,artist_code,genre_code
1,Thunder Road,Band A,metal,170,95,40,30,20,240,1,10,60,0,0
2,Iron Sky,Band B,metal,168,93,42,28,22,235,2,9,58,1,0
3,Quiet River,Singer C,folk,80,20,50,10,60,200,90,3,40,2,1
4,Morning Dew,Singer D,folk,82,22,48,12,58,205,88,4,42,3,1
5,Steel Heart,Band E,metal,172,96,38,32,18,245,1,11,61,4,0
6,Autumn Leaves,Singer F,folk,78,18,52,9,62,198,92,3,39,5,1
7,Crash Course,Band G,metal,165,90,45,25,25,230,3,8,55,6,0
8,Neon Nights,DJ H,dance,124,80,88,15,70,210,5,6,75,7,2
9,Glass Tower,DJ I,dance,126,82,90,12,72,215,4,7,73,8,2
10,Slow Burn,Singer J,folk,76,25,45,11,55,230,85,3,35,9,1
";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("=== Song Recommender Swipe Session ===\n");

    let workdir = tempfile::tempdir()?;
    let data_path = workdir.path().join("data.csv");
    std::fs::write(&data_path, SAMPLE_CATALOG)?;

    let config = SessionConfig::default()
        .with_model_path(workdir.path().join("song_rec_knn.json"))
        .with_neighbors(3);

    // Load catalog
    println!("Loading catalog from {:?}...", data_path);
    let start = Instant::now();
    let catalog = Catalog::load_from_file(&data_path)?;
    println!("Loaded {} songs in {:?}\n", catalog.len(), start.elapsed());

    let mut session = RecommendationSession::with_knn(config.clone(), catalog.clone())?;

    // Swipe: like anything high-energy, dislike the rest, for the first six songs
    println!("Swiping...");
    for _ in 0..6 {
        let Some(song) = session.catalog().first() else {
            break;
        };
        let preference = if song.energy >= 60.0 {
            Preference::Like
        } else {
            Preference::Dislike
        };
        let mark = session.mark_at(0, preference)?;
        println!("  {:?}: {}", mark.preference, mark.song);
    }
    println!("{}\n", session.tally());

    // Train and score
    let start = Instant::now();
    let outcome = session.train().await;
    println!("Training: {:?} in {:?}", outcome, start.elapsed());

    session.score_all()?;
    print_recommendations(&session);

    session.sort_recommended(SortKey::Title);
    println!("\nSame songs by title:");
    for song in session.recommended() {
        println!("  {}", song.title);
    }

    // A new session picks up the model persisted above
    println!("\nRe-opening session...");
    let mut reopened = RecommendationSession::with_knn(config, catalog)?;
    let count = reopened.refresh().await?.len();
    println!("Persisted model recommends {} songs", count);

    Ok(())
}

fn print_recommendations(session: &RecommendationSession) {
    println!("\nRecommended ({}):", session.recommended().len());
    for (i, song) in session.recommended().iter().enumerate() {
        println!("  {}. {} (P(like): {:.2})", i + 1, song, song.score);
    }
}
