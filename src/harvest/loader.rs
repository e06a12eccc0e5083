// src/harvest/loader.rs
// =============================================================================
// Reads the URL list file.
//
// One URL per line, kept in file order. Blank lines are kept as empty
// strings: we don't validate URLs here, an empty one simply fails to fetch
// later and gets logged by its worker.
//
// Lines don't have to be valid UTF-8: bad bytes become U+FFFD and the line
// is kept, so that one URL fails to fetch instead of the whole run stopping.
// Only a failure to open or read the file aborts the load, with no partial
// result.
// =============================================================================

use crate::error::HarvestError;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Loads every line of the file at `path`
pub fn load_urls(path: &Path) -> Result<Vec<String>, HarvestError> {
    let to_load_error = |source| HarvestError::Load {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(to_load_error)?;
    let urls = read_lines(BufReader::new(file)).map_err(to_load_error)?;

    tracing::debug!("Loaded {} URL(s) from {}", urls.len(), path.display());
    Ok(urls)
}

/// Splits a reader into lines, stripping "\n" or "\r\n"
pub fn read_lines<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    // split() yields io::Result<Vec<u8>> without the '\n'; collect() stops at the first Err
    reader
        .split(b'\n')
        .map(|line| {
            let mut line = line?;
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            Ok(String::from_utf8_lossy(&line).into_owned())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    #[test]
    fn test_lines_in_file_order() {
        let input = "https://a.io\nhttps://b.io\nhttps://c.io\n";
        let lines = read_lines(Cursor::new(input)).unwrap();
        assert_eq!(lines, vec!["https://a.io", "https://b.io", "https://c.io"]);
    }

    #[test]
    fn test_last_line_without_newline() {
        let lines = read_lines(Cursor::new("https://a.io\nhttps://b.io")).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "https://b.io");
    }

    #[test]
    fn test_blank_lines_are_preserved() {
        let lines = read_lines(Cursor::new("https://a.io\n\nhttps://b.io\n")).unwrap();
        assert_eq!(lines, vec!["https://a.io", "", "https://b.io"]);
    }

    #[test]
    fn test_crlf_is_stripped() {
        let lines = read_lines(Cursor::new("https://a.io\r\nhttps://b.io\r\n")).unwrap();
        assert_eq!(lines, vec!["https://a.io", "https://b.io"]);
    }

    #[test]
    fn test_empty_input() {
        let lines = read_lines(Cursor::new("")).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_invalid_utf8_line_is_kept() {
        let bytes: &[u8] = b"https://good.io/a\nhttps://caf\xe9.io/menu\nhttps://good.io/b\n";
        let lines = read_lines(Cursor::new(bytes)).unwrap();
        assert_eq!(
            lines,
            vec!["https://good.io/a", "https://caf\u{FFFD}.io/menu", "https://good.io/b"]
        );
    }

    #[test]
    fn test_load_file_with_latin1_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"https://good.io/a\nhttps://caf\xe9.io/menu\r\nhttps://good.io/b\n")
            .unwrap();

        let urls = load_urls(file.path()).unwrap();
        assert_eq!(urls.len(), 3);
        assert_eq!(urls[0], "https://good.io/a");
        assert_eq!(urls[2], "https://good.io/b");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "https://example.com/a").unwrap();
        writeln!(file, "http://example.com/page").unwrap();

        let urls = load_urls(file.path()).unwrap();
        assert_eq!(urls, vec!["https://example.com/a", "http://example.com/page"]);
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");

        let err = load_urls(&missing).unwrap_err();
        assert!(matches!(err, HarvestError::Load { .. }));
        assert_eq!(err.exit_code(), 2);
    }
}
