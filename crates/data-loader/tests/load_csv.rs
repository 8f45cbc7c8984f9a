//! File-boundary tests for the CSV loader.

use data_loader::{ColumnMapping, DataLoadError, load_csv};
use std::io::Write;
use std::path::Path;

#[test]
fn test_load_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "\u{feff}Movie Name,Genre,Plot,Rating,Votes\n\
         Inception,Sci-Fi,A thief enters dreams.,8.8,\"2,400,000\"\n"
    )
    .unwrap();

    let table = load_csv(file.path()).unwrap();
    let mapping = ColumnMapping::default();

    // BOM must not leak into the first column name
    assert_eq!(table.column_index(&mapping.title), Some(0));
    assert_eq!(table.len(), 1);
    assert_eq!(table.cell(0, 4), Some("2,400,000"));
}

#[test]
fn test_invalid_utf8_is_decoded_lossily() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"Movie Name,Plot\nAm\xe9lie,A shy waitress\n")
        .unwrap();

    let table = load_csv(file.path()).unwrap();
    let title = table.cell(0, 0).unwrap();
    assert!(title.starts_with("Am"));
    assert!(title.ends_with("lie"));
}

#[test]
fn test_missing_file() {
    let err = load_csv(Path::new("definitely/not/here.csv")).unwrap_err();
    assert!(matches!(err, DataLoadError::FileNotFound { .. }));
}
