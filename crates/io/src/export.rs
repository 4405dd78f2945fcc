// Report export (CSV / JSON)

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use addrstat_core::stats::FLOOR_BUCKETS;
use addrstat_core::Report;

use crate::error::IoError;
use crate::format::Format;

/// Write `report` to `path`, choosing the format from the extension.
///
/// CSV writes the floor histogram to `path` and the duplicates to a sibling
/// `<stem>.duplicates.csv`. JSON writes everything to `path`.
/// Returns the files written.
pub fn export(report: &Report, path: &Path) -> Result<Vec<PathBuf>, IoError> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        export_json(report, path)?;
        return Ok(vec![path.to_path_buf()]);
    }

    match Format::from_path(path) {
        Some(Format::Csv) => {
            let duplicates_path = duplicates_path(path);
            export_floors_csv(report, path)?;
            export_duplicates_csv(report, &duplicates_path)?;
            Ok(vec![path.to_path_buf(), duplicates_path])
        }
        _ => Err(IoError::UnsupportedFormat(path.to_path_buf())),
    }
}

fn duplicates_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());
    path.with_file_name(format!("{stem}.duplicates.csv"))
}

fn export_floors_csv(report: &Report, path: &Path) -> Result<(), IoError> {
    let mut writer = ::csv::Writer::from_path(path).map_err(|e| IoError::export(path, e))?;

    let mut header = vec!["city".to_string()];
    header.extend((1..=FLOOR_BUCKETS).map(|floor| format!("floor_{floor}")));
    writer.write_record(&header).map_err(|e| IoError::export(path, e))?;

    for (city, histogram) in report.sorted_cities() {
        let mut record = vec![city.to_string()];
        record.extend(histogram.buckets().iter().map(|count| count.to_string()));
        writer.write_record(&record).map_err(|e| IoError::export(path, e))?;
    }

    writer.flush().map_err(|e| IoError::export(path, e))?;
    Ok(())
}

fn export_duplicates_csv(report: &Report, path: &Path) -> Result<(), IoError> {
    let mut writer = ::csv::Writer::from_path(path).map_err(|e| IoError::export(path, e))?;

    writer
        .write_record(["city", "street", "house", "floor", "count"])
        .map_err(|e| IoError::export(path, e))?;

    for (address, count) in report.sorted_duplicates() {
        let floor = address.floor().to_string();
        let count = count.to_string();
        writer
            .write_record([
                address.city(),
                address.street(),
                address.house(),
                floor.as_str(),
                count.as_str(),
            ])
            .map_err(|e| IoError::export(path, e))?;
    }

    writer.flush().map_err(|e| IoError::export(path, e))?;
    Ok(())
}

fn export_json(report: &Report, path: &Path) -> Result<(), IoError> {
    let file = File::create(path).map_err(|e| IoError::export(path, e))?;
    write_json(report, file).map_err(|e| IoError::export(path, e))
}

/// Pretty-printed summary, flushed before returning.
fn write_json<W: Write>(report: &Report, inner: W) -> io::Result<()> {
    let mut writer = BufWriter::new(inner);
    serde_json::to_writer_pretty(&mut writer, &report.summary())?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    use addrstat_core::Address;

    fn sample_report() -> Report {
        let dup = Address::new("X", "Main", "1", 3);
        Report::compute(&[
            dup.clone(),
            dup,
            Address::new("A", "Side", "\"2\"", 5),
            Address::new("A", "Side", "4", 9),
        ])
    }

    #[test]
    fn test_csv_export_writes_floors_and_duplicates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.csv");

        let written = export(&sample_report(), &path).unwrap();
        assert_eq!(written, vec![path.clone(), dir.path().join("stats.duplicates.csv")]);

        let floors = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = floors.lines().collect();
        assert_eq!(lines[0], "city,floor_1,floor_2,floor_3,floor_4,floor_5");
        assert_eq!(lines[1], "A,0,0,0,0,1");
        assert_eq!(lines[2], "X,0,0,2,0,0");

        let dups = fs::read_to_string(&written[1]).unwrap();
        let lines: Vec<&str> = dups.lines().collect();
        assert_eq!(lines, vec!["city,street,house,floor,count", "X,Main,1,3,2"]);
    }

    #[test]
    fn test_json_export() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.JSON");

        export(&sample_report(), &path).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["records"], 4);
        assert_eq!(parsed["duplicates"][0]["city"], "X");
        assert_eq!(parsed["duplicates"][0]["count"], 2);
        assert_eq!(parsed["floors"][0]["city"], "A");
        assert_eq!(parsed["floors"][1]["floors"], serde_json::json!([0, 0, 2, 0, 0]));
    }

    /// Accepts nothing; every write fails.
    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "no space left"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_json_write_failure_is_reported() {
        // The summary fits in the buffer, so the failure only surfaces on flush.
        let err = write_json(&sample_report(), FullDisk).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
    }

    #[test]
    fn test_unknown_export_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.txt");
        let err = export(&sample_report(), &path).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(_)));
        assert!(!path.exists());
    }
}
