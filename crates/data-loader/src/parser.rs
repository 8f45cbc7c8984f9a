//! CSV parser for catalog files.
//!
//! Records are split by the `csv` crate in flexible mode (RFC 4180 quoting,
//! `\n` and `\r\n` endings); this module turns them into a `RawTable`:
//! - the first non-blank record is the header, names trimmed
//! - records wider than the header are skipped with a warning
//! - shorter records are padded with missing cells
//! - records the reader rejects are skipped with a warning
//!
//! A quoted field that never closes runs to the end of the input.

use crate::error::{DataLoadError, Result};
use crate::types::{RawTable, normalize_cell};
use csv::StringRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Read a file as UTF-8, replacing invalid sequences.
///
/// Catalog exports are mostly UTF-8 but scraped plots occasionally carry
/// stray bytes; a lossy decode keeps those rows usable.
fn read_utf8_lossy(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(|_| DataLoadError::FileNotFound {
        path: path.display().to_string(),
    })?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;

    let content = String::from_utf8_lossy(&bytes).into_owned();
    Ok(match content.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => content,
    })
}

/// Load a CSV file into a `RawTable`
pub fn load_csv(path: &Path) -> Result<RawTable> {
    let content = read_utf8_lossy(path)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    parse_csv(&content, &file_name)
}

/// Parse CSV text into a `RawTable`.
///
/// `file` is only used in log and error messages.
pub fn parse_csv(content: &str, file: &str) -> Result<RawTable> {
    let mut reader = reader(content);
    let mut records = reader.records().filter(|record| match record {
        Ok(record) => !is_blank(record),
        Err(_) => true,
    });

    let header = match records.next() {
        Some(Ok(record)) => record
            .iter()
            .map(|name| name.trim().to_string())
            .collect::<Vec<_>>(),
        Some(Err(e)) => return Err(parse_error(file, &e)),
        None => {
            return Err(DataLoadError::EmptyHeader {
                file: file.to_string(),
            });
        }
    };

    let mut table = RawTable::new(header);
    let width = table.header().len();
    let mut skipped = 0usize;

    for record in records {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping record: {}", parse_error(file, &e));
                skipped += 1;
                continue;
            }
        };

        if record.len() > width {
            warn!(
                "Skipping line {} in {}: expected {} fields, saw {}",
                start_line(&record),
                file,
                width,
                record.len()
            );
            skipped += 1;
            continue;
        }

        table.push_record(record.iter().map(normalize_cell).collect());
    }

    debug!(
        "Parsed {} records from {} ({} skipped)",
        table.len(),
        file,
        skipped
    );
    Ok(table)
}

/// Headerless, flexible reader: width checks happen against our own header
fn reader(content: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes())
}

fn is_blank(record: &StringRecord) -> bool {
    record.len() == 1 && record[0].trim().is_empty()
}

/// 1-based line on which a record starts
fn start_line(record: &StringRecord) -> u64 {
    record.position().map_or(0, |pos| pos.line())
}

fn parse_error(file: &str, e: &csv::Error) -> DataLoadError {
    DataLoadError::ParseError {
        file: file.to_string(),
        line: e.position().map_or(0, |pos| pos.line() as usize),
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_table() {
        let table = parse_csv("a,b,c\n1,2,3\n4,5,6\n", "test.csv").unwrap();

        assert_eq!(table.header(), ["a", "b", "c"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(1, 2), Some("6"));
    }

    #[test]
    fn test_quoted_fields() {
        let content = "title,plot\n\"Up, Up and Away\",\"He said \"\"go\"\"\nthen left\"\n";
        let table = parse_csv(content, "test.csv").unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.cell(0, 0), Some("Up, Up and Away"));
        assert_eq!(table.cell(0, 1), Some("He said \"go\"\nthen left"));
    }

    #[test]
    fn test_vote_with_thousands_separator_stays_one_field() {
        let table = parse_csv("Votes,Rating\n\"1,234\",7.5\n", "test.csv").unwrap();
        assert_eq!(table.cell(0, 0), Some("1,234"));
    }

    #[test]
    fn test_wide_record_is_skipped() {
        let table = parse_csv("a,b\n1,2\n1,2,3\n4,5\n", "test.csv").unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(1, 0), Some("4"));
    }

    #[test]
    fn test_short_record_is_padded() {
        let table = parse_csv("a,b,c\n1\n", "test.csv").unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.cell(0, 0), Some("1"));
        assert_eq!(table.cell(0, 1), None);
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        let table = parse_csv("a,b\r\n\r\n1,2\r\n\r\n3,4", "test.csv").unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(1, 1), Some("4"));
    }

    #[test]
    fn test_unterminated_quote_runs_to_end() {
        let table = parse_csv("a,b\n1,2\n\"oops,3\n4,5\n", "test.csv").unwrap();

        assert_eq!(table.len(), 2);
        assert!(table.cell(1, 0).unwrap().starts_with("oops,3\n4,5"));
        assert_eq!(table.cell(1, 1), None);
    }

    #[test]
    fn test_whitespace_only_line_is_blank() {
        let table = parse_csv("a,b\n   \n1,2\n", "test.csv").unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_header_names_are_trimmed() {
        let table = parse_csv(" Movie Name , Votes\nHeat,9000\n", "test.csv").unwrap();
        assert_eq!(table.header(), ["Movie Name", "Votes"]);
        assert_eq!(table.column_index("Votes"), Some(1));
    }

    #[test]
    fn test_empty_input_has_no_header() {
        let err = parse_csv("", "empty.csv").unwrap_err();
        assert!(matches!(err, DataLoadError::EmptyHeader { .. }));
    }

    #[test]
    fn test_record_start_lines() {
        let lines: Vec<_> = reader("a\n\"x\ny\"\nz\n")
            .records()
            .map(|r| start_line(&r.unwrap()))
            .collect();
        assert_eq!(lines, vec![1, 2, 4]);
    }

    #[test]
    fn test_multiline_field_keeps_following_records() {
        let table = parse_csv("a,b\n\"x\ny\",1\nz,2,extra\nw,3\n", "test.csv").unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, 0), Some("x\ny"));
        assert_eq!(table.cell(1, 0), Some("w"));
    }
}
