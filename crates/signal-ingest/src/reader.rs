//! Sample Sequence Reader

use crate::format::{parse_numeric, CandidateFormat, TextEncoding};
use crate::spreadsheet::read_spreadsheet;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// An ordered, finite sequence of numeric samples from one source.
pub type SampleSequence = Vec<f64>;

/// Read all numeric samples from a raw recording file.
///
/// Supported extensions: `.csv` (delimited text with format autodetection),
/// `.xlsx`/`.xls` (first fully numeric sheet column). Never fails upward:
/// unreadable files, unsupported extensions and files without recoverable
/// numeric data all yield an empty sequence, which the batch driver counts
/// as a skip.
pub fn read_samples(path: &Path) -> SampleSequence {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => read_delimited(path),
        "xlsx" | "xls" => match read_spreadsheet(path) {
            Ok(values) => values,
            Err(err) => {
                warn!(path = %path.display(), %err, "spreadsheet yielded no data");
                Vec::new()
            }
        },
        _ => {
            warn!(path = %path.display(), "unsupported extension, skipping");
            Vec::new()
        }
    }
}

/// Delimited-text path: try every candidate format in order, fall back to
/// one-number-per-line plain text.
fn read_delimited(path: &Path) -> Vec<f64> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(path = %path.display(), %err, "unreadable file, skipping");
            return Vec::new();
        }
    };

    for candidate in CandidateFormat::all() {
        if let Some(values) = candidate.extract(&bytes) {
            debug!(
                path = %path.display(),
                encoding = ?candidate.encoding,
                delimiter = %(candidate.delimiter as char),
                n = values.len(),
                "candidate format matched"
            );
            return values;
        }
    }

    plain_text_fallback(&bytes)
}

fn plain_text_fallback(bytes: &[u8]) -> Vec<f64> {
    let Some(text) = TextEncoding::Utf8.decode(bytes) else {
        return Vec::new();
    };
    text.lines().filter_map(parse_numeric).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &[u8]) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_semicolon_comma_decimal_round_trip() {
        let (_dir, path) = write_temp("seg.csv", b"1,5;2,5;3,5\n");
        // Semicolon is tried before comma, so the row parses as three
        // fields and contributes its first value; this is a single-row
        // file with one sample.
        let values = read_samples(&path);
        assert_eq!(values, vec![1.5]);
    }

    #[test]
    fn test_semicolon_rows_with_comma_decimals() {
        let (_dir, path) = write_temp("seg.csv", b"1,5\n2,5\n3,5\n");
        let values = read_samples(&path);
        assert_eq!(values, vec![1.5, 2.5, 3.5]);
    }

    #[test]
    fn test_tab_delimited_with_header() {
        let (_dir, path) = write_temp("seg.csv", b"sensor\tamp\n1.0\t4\n2.0\t5\n");
        let values = read_samples(&path);
        assert_eq!(values, vec![1.0, 2.0]);
    }

    #[test]
    fn test_latin1_bytes_still_parse() {
        // 0xE9 is invalid UTF-8 but decodes under Latin-1
        let (_dir, path) = write_temp("seg.csv", b"se\xE9al;x\n1.5;a\n2.5;b\n");
        let values = read_samples(&path);
        assert_eq!(values, vec![1.5, 2.5]);
    }

    #[test]
    fn test_unreadable_path_is_empty() {
        let values = read_samples(Path::new("/nonexistent/file.csv"));
        assert!(values.is_empty());
    }

    #[test]
    fn test_unsupported_extension_is_empty() {
        let (_dir, path) = write_temp("seg.dat", b"1.0\n2.0\n");
        assert!(read_samples(&path).is_empty());
    }

    #[test]
    fn test_no_numeric_data_is_empty() {
        let (_dir, path) = write_temp("seg.csv", b"a;b\nc;d\n");
        assert!(read_samples(&path).is_empty());
    }
}
