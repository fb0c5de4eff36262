use data_loader::Catalog;
use std::path::Path;
use std::time::Instant;

fn main() {
    let path = Path::new("data/data.csv");

    println!("Loading song catalog from {:?}...\n", path);

    let start = Instant::now();
    let catalog = Catalog::load_from_file(path).expect("Failed to load catalog");
    let elapsed = start.elapsed();

    let artists = catalog
        .songs()
        .iter()
        .map(|song| song.artist.as_str())
        .collect::<std::collections::HashSet<_>>()
        .len();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Songs: {}", catalog.len());
    println!("Artists: {}", artists);
    println!("\nPerformance: {:.0} songs/second",
             catalog.len() as f64 / elapsed.as_secs_f64());
}
