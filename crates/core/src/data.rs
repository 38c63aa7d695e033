//! Comma-delimited record reader shared by the catalog, event and shop files.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{LoadError, LoadResult};

/// A text data file held in memory together with the path it came from, so
/// every parse failure can name the file and line.
pub struct DataFile {
    path: PathBuf,
    text: String,
}

impl DataFile {
    pub fn read(path: &Path) -> LoadResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        Ok(Self { path: path.to_path_buf(), text })
    }

    pub fn from_text(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self { path: path.into(), text: text.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Non-blank, non-comment lines split on commas.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.text.lines().enumerate().filter_map(|(index, raw)| {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            Some(Record {
                path: &self.path,
                line: index + 1,
                raw: line,
                fields: line.split(',').map(str::trim).collect(),
            })
        })
    }
}

pub struct Record<'a> {
    path: &'a Path,
    raw: &'a str,
    pub line: usize,
    pub fields: Vec<&'a str>,
}

impl<'a> Record<'a> {
    pub fn tag(&self) -> &'a str {
        self.fields.first().copied().unwrap_or_default()
    }

    pub fn text(&self, index: usize, what: &str) -> LoadResult<&'a str> {
        self.fields.get(index).copied().ok_or_else(|| self.error(format!("missing {what}")))
    }

    /// Everything from field `index` to the end of the line, commas included.
    pub fn rest(&self, index: usize) -> Option<&'a str> {
        self.raw.splitn(index + 1, ',').nth(index).map(str::trim)
    }

    pub fn parse<T: FromStr>(&self, index: usize, what: &str) -> LoadResult<T> {
        let raw = self.text(index, what)?;
        raw.parse().map_err(|_| self.error(format!("{what} `{raw}` is not a valid number")))
    }

    pub fn error(&self, message: impl Into<String>) -> LoadError {
        LoadError::parse(self.path, self.line, message)
    }

    pub fn path(&self) -> &'a Path {
        self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_comments_and_blank_lines() {
        let text = "# header\n\n1, grass ,1\n  # indented comment\n2,wall,0\n";
        let file = DataFile::from_text("x.dat", text);
        let records: Vec<_> = file.records().collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].line, 3);
        assert_eq!(records[0].fields, vec!["1", "grass", "1"]);
        assert_eq!(records[1].tag(), "2");
    }

    #[test]
    fn parse_errors_name_file_and_line() {
        let file = DataFile::from_text("maps/town.evt", "MOVE,a,3\n");
        let record = file.records().next().expect("one record");
        let err = record.parse::<i32>(1, "x").expect_err("non-numeric x");
        let message = err.to_string();
        assert!(message.contains("maps/town.evt:1"), "{message}");
        assert!(message.contains("x `a`"), "{message}");

        let missing = record.text(5, "destination").expect_err("short record");
        assert!(missing.to_string().contains("missing destination"));
        assert_eq!(record.rest(1), Some("a,3"));
        assert_eq!(record.rest(3), None);
    }
}
