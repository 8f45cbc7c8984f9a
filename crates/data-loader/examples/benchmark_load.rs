use data_loader::{ColumnMapping, load_csv};
use std::path::Path;
use std::time::Instant;

fn main() {
    let path = Path::new("data/movies.csv");

    println!("Loading catalog export from {}...\n", path.display());

    let start = Instant::now();
    let table = load_csv(path).expect("Failed to load catalog");
    let elapsed = start.elapsed();

    let mapping = ColumnMapping::default();
    let missing: Vec<&str> = mapping
        .required()
        .into_iter()
        .filter(|name| table.column_index(name).is_none())
        .collect();

    println!("=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Columns: {}", table.header().join(", "));
    println!("Records: {}", table.len());
    println!("Missing required columns: {:?}", missing);
    println!("\nPerformance: {:.0} records/second",
             table.len() as f64 / elapsed.as_secs_f64());
}
