use std::path::{Path, PathBuf};

use log::warn;
use thiserror::Error;

use super::model::{RunId, Series, SeriesKind};
use super::resolver::PathResolver;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a located file could not be turned into a [`Series`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: expected 2 columns, found {found}")]
    ColumnCount { line: usize, found: usize },
    #[error("line {line}: '{token}' is not a number")]
    NotANumber { line: usize, token: String },
}

// ---------------------------------------------------------------------------
// Table parsing
// ---------------------------------------------------------------------------

/// Parse a whitespace-delimited two-column table.
///
/// Blank lines and `#` comments are skipped. A file with a single row yields a
/// single point; a file with no rows yields an empty vector.
pub fn parse_two_column(text: &str) -> Result<Vec<(f64, f64)>, LoadError> {
    let mut rows = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let content = raw.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }
        let tokens: Vec<&str> = content.split_whitespace().collect();
        if tokens.len() != 2 {
            return Err(LoadError::ColumnCount {
                line: line_no,
                found: tokens.len(),
            });
        }
        let x = parse_float(tokens[0], line_no)?;
        let y = parse_float(tokens[1], line_no)?;
        rows.push((x, y));
    }
    Ok(rows)
}

fn parse_float(token: &str, line: usize) -> Result<f64, LoadError> {
    token.parse::<f64>().map_err(|_| LoadError::NotANumber {
        line,
        token: token.to_string(),
    })
}

/// Read and parse a file that is known to exist.
/// `Ok(None)` means the file holds no rows.
fn read_series(resolver: &PathResolver<'_>, path: &Path) -> Result<Option<Series>, LoadError> {
    let text = resolver
        .storage()
        .read_to_string(path)
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Series::from_points(parse_two_column(&text)?))
}

// ---------------------------------------------------------------------------
// SeriesLoader
// ---------------------------------------------------------------------------

/// Loads series by base file name; every failure mode collapses to `None`.
pub struct SeriesLoader<'a> {
    resolver: PathResolver<'a>,
}

impl<'a> SeriesLoader<'a> {
    pub fn new(resolver: PathResolver<'a>) -> Self {
        SeriesLoader { resolver }
    }

    pub fn resolver(&self) -> &PathResolver<'a> {
        &self.resolver
    }

    /// Resolve and parse `base_name`.
    ///
    /// Missing files, empty files and malformed files all return `None`;
    /// malformed files are logged with their path.
    pub fn load(&self, base_name: &str) -> Option<Series> {
        let path = self.resolver.resolve(base_name)?;
        match read_series(&self.resolver, &path) {
            Ok(series) => series,
            Err(e) => {
                warn!("  [ERROR] {}: {e}", path.display());
                None
            }
        }
    }

    /// Load one file variant of a run.
    pub fn load_run(&self, run: &RunId, kind: SeriesKind) -> Option<Series> {
        self.load(&run.file_name(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::SnapshotTag;
    use crate::data::storage::mem::MemStorage;

    fn load(fs: &MemStorage, name: &str) -> Option<Series> {
        let resolver = PathResolver::for_workspace(fs, Path::new("w"), "data");
        SeriesLoader::new(resolver).load(name)
    }

    #[test]
    fn parses_multi_row_table() {
        let fs = MemStorage::new().with_file("w/h.dat", "0.0 1.0\n0.5\t2.0\n1.0   -3e-1\n");
        let s = load(&fs, "h.dat").unwrap();
        assert_eq!(s.x(), &[0.0, 0.5, 1.0]);
        assert_eq!(s.y(), &[1.0, 2.0, -0.3]);
    }

    #[test]
    fn single_row_becomes_length_one_series() {
        let fs = MemStorage::new().with_file("w/data/one.dat", "2.5 7.0\n");
        let s = load(&fs, "one.dat").unwrap();
        assert_eq!(s.len(), 1);
        assert_eq!(s.x(), &[2.5]);
        assert_eq!(s.y(), &[7.0]);
    }

    #[test]
    fn empty_file_is_absent() {
        let fs = MemStorage::new()
            .with_file("w/empty.dat", "")
            .with_file("w/blank.dat", "\n   \n# header only\n");
        assert!(load(&fs, "empty.dat").is_none());
        assert!(load(&fs, "blank.dat").is_none());
    }

    #[test]
    fn malformed_file_is_absent() {
        let fs = MemStorage::new()
            .with_file("w/three.dat", "0 1 2\n")
            .with_file("w/word.dat", "0 1\n1 abc\n")
            .with_file("w/ragged.dat", "0 1\n2\n");
        assert!(load(&fs, "three.dat").is_none());
        assert!(load(&fs, "word.dat").is_none());
        assert!(load(&fs, "ragged.dat").is_none());
    }

    #[test]
    fn missing_file_is_absent() {
        let fs = MemStorage::new();
        assert!(load(&fs, "nowhere.dat").is_none());
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let rows = parse_two_column("# t x\n\n0 1 # first\n1 2\n").unwrap();
        assert_eq!(rows, vec![(0.0, 1.0), (1.0, 2.0)]);
    }

    #[test]
    fn parse_errors_report_line_numbers() {
        match parse_two_column("0 1\n\n1 2 3\n") {
            Err(LoadError::ColumnCount { line, found }) => {
                assert_eq!(line, 3);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected {other:?}"),
        }
        match parse_two_column("0 x\n") {
            Err(LoadError::NotANumber { line, token }) => {
                assert_eq!(line, 1);
                assert_eq!(token, "x");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn load_run_uses_naming_convention() {
        let fs = MemStorage::new().with_file("w/data/r_snap_T2.dat", "0 0\n1 1\n");
        let resolver = PathResolver::for_workspace(&fs, Path::new("w"), "data");
        let loader = SeriesLoader::new(resolver);
        let run = RunId::new("r");
        assert!(loader
            .load_run(&run, SeriesKind::Snapshot(SnapshotTag::Half))
            .is_some());
        assert!(loader.load_run(&run, SeriesKind::History).is_none());
    }
}
