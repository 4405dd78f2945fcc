// End-to-end: file on disk -> parse_file -> Report
// Run with: cargo test -p addrstat-io --test pipeline

use std::fs;
use std::path::Path;

use tempfile::tempdir;

use addrstat_core::{Address, FloorHistogram, Report};
use addrstat_io::{parse_file, IoError, ParseOptions};

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

#[test]
fn two_identical_rows_make_one_duplicate_and_one_bucket() {
    let dir = tempdir().unwrap();
    let path = write(dir.path(), "x.csv", "city,street,house,floor\nX,Main,1,3\nX,Main,1,3\n");

    let outcome = parse_file(&path, &ParseOptions::default());
    assert!(outcome.is_complete());

    let report = Report::compute(&outcome.records);
    assert_eq!(report.records, 2);
    assert_eq!(report.duplicates.len(), 1);
    assert_eq!(report.duplicates[&Address::new("X", "Main", "1", 3)], 2);
    assert_eq!(report.floors["X"], FloorHistogram::from_buckets([0, 0, 2, 0, 0]));
}

#[test]
fn csv_with_mixed_separators_and_bad_rows() {
    let dir = tempdir().unwrap();
    let path = write(
        dir.path(),
        "mixed.CSV",
        "city;street;house;floor\n\
         \"Mos,cow\",Main St,12,3\n\
         Kazan;Baumana\n\
         Kazan;Baumana;7;seven\n\
         Kazan;Baumana;7,5\n\
         Omsk,Mira,1,0\n",
    );

    let outcome = parse_file(&path, &ParseOptions::default());
    assert_eq!(
        outcome.records,
        vec![
            Address::new("Mos,cow", "Main St", "12", 3),
            Address::new("Kazan", "Baumana", "7", 5),
            Address::new("Omsk", "Mira", "1", 0),
        ]
    );
    assert_eq!(outcome.diagnostics.len(), 2);

    let report = Report::compute(&outcome.records);
    assert!(report.duplicates.is_empty());
    // Floor 0 is ingested but not bucketed.
    assert_eq!(report.records, 3);
    assert_eq!(report.floors["Omsk"].total(), 0);
}

#[test]
fn header_only_csv_is_empty_but_complete() {
    let dir = tempdir().unwrap();
    let path = write(dir.path(), "empty.csv", "city,street,house,floor\n");

    let outcome = parse_file(&path, &ParseOptions::default());
    assert!(outcome.is_complete());
    assert!(Report::compute(&outcome.records).is_empty());
}

// ---------------------------------------------------------------------------
// XML
// ---------------------------------------------------------------------------

#[test]
fn xml_items_feed_the_same_statistics() {
    let dir = tempdir().unwrap();
    let path = write(
        dir.path(),
        "addr.xml",
        r#"<?xml version="1.0" encoding="UTF-8"?>
<root>
  <item city="A" street="B" house="1" floor="2"/>
  <item city="A" street="B" house="1" floor="x"/>
  <item city="A" street="B" house="1" floor="2"/>
  <item city="C" street="D" house="9" floor="5"/>
</root>"#,
    );

    let outcome = parse_file(&path, &ParseOptions::default());
    assert!(outcome.is_complete());
    assert_eq!(outcome.records.len(), 3);
    assert_eq!(outcome.diagnostics.len(), 1);

    let report = Report::compute(&outcome.records);
    assert_eq!(report.duplicates[&Address::new("A", "B", "1", 2)], 2);
    assert_eq!(report.floors["A"].count(2), 2);
    assert_eq!(report.floors["C"].count(5), 1);
}

#[test]
fn malformed_xml_reports_parse_error_with_partial_records() {
    let dir = tempdir().unwrap();
    let path = write(
        dir.path(),
        "bad.xml",
        r#"<root><item city="A" street="B" house="1" floor="2"/></broken>"#,
    );

    let outcome = parse_file(&path, &ParseOptions::default());
    assert!(matches!(outcome.error, Some(IoError::ParseError { .. })));
    assert_eq!(outcome.records, vec![Address::new("A", "B", "1", 2)]);
}

#[test]
fn truncated_xml_is_not_reported_complete() {
    let dir = tempdir().unwrap();
    let path = write(
        dir.path(),
        "cut.xml",
        r#"<root><item city="A" street="B" house="1" floor="2"/><item city="C""#,
    );

    let outcome = parse_file(&path, &ParseOptions::default());
    assert!(!outcome.is_complete());
    assert!(matches!(outcome.error, Some(IoError::ParseError { .. })));
    assert_eq!(outcome.records, vec![Address::new("A", "B", "1", 2)]);
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

#[test]
fn txt_file_is_rejected_even_if_it_exists() {
    let dir = tempdir().unwrap();
    let path = write(dir.path(), "report.txt", "city,street,house,floor\nX,Main,1,3\n");

    let outcome = parse_file(&path, &ParseOptions::default());
    assert!(outcome.records.is_empty());
    assert!(matches!(outcome.error, Some(IoError::UnsupportedFormat(_))));
}

#[test]
fn missing_files_report_file_not_found() {
    let dir = tempdir().unwrap();
    for name in ["nope.csv", "nope.xml"] {
        let outcome = parse_file(&dir.path().join(name), &ParseOptions::default());
        assert!(outcome.records.is_empty());
        assert!(
            matches!(outcome.error, Some(IoError::FileNotFound(_))),
            "{name}: {:?}",
            outcome.error
        );
    }
}

#[test]
fn repeated_runs_share_no_state() {
    let dir = tempdir().unwrap();
    let first = write(dir.path(), "a.csv", "h\nX,Main,1,3\nX,Main,1,3\n");
    let second = write(dir.path(), "b.csv", "h\nY,Side,2,1\n");

    let a = Report::compute(&parse_file(&first, &ParseOptions::default()).records);
    let b = Report::compute(&parse_file(&second, &ParseOptions::default()).records);

    assert_eq!(a.duplicates.len(), 1);
    assert!(b.duplicates.is_empty());
    assert!(!b.floors.contains_key("X"));
}
