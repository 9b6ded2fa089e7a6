use std::fmt::{self, Display, Formatter};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// One content unit: a page entry or the homepage.
///
/// Example of an entry file
/// ```text
/// My *first* post
/// 2024-01-01
///
/// Everything from here on is content.
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// File name without extension
    pub filename: String,
    pub title: String,
    /// Never parsed as a date, only compared as a string
    pub datestring: String,
    pub content: String,
}

impl Display for Entry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "filename={}, date={}\ntitle={}\ncontent:\n{}",
               self.filename,
               self.datestring,
               self.title,
               self.content
        )
    }
}

impl Entry {
    pub fn from_file(path: &Path) -> Result<Entry> {
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::from_string(path, &text))
    }

    pub fn from_string(path: &Path, text: &str) -> Entry {
        // Universal newlines, keeping a trailing empty line like a plain split would
        let lines: Vec<&str> = text.split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();

        let title = lines.first().copied().unwrap_or_default().to_string();
        let datestring = lines.get(1).copied().unwrap_or_default().to_string();

        // An empty third line only separates the header from the content
        let content_start = match lines.get(2) {
            Some(line) if line.is_empty() => 3,
            _ => 2,
        };
        let content = lines.get(content_start..)
            .map(|rest| rest.join("\n"))
            .unwrap_or_default();

        Entry {
            filename: Self::extract_filename(path),
            title,
            datestring,
            content,
        }
    }

    /// Final path segment, cut at its first `.`
    fn extract_filename(path: &Path) -> String {
        let Some(file_name) = path.file_name() else {
            return String::new();
        };
        let file_name = file_name.to_string_lossy();
        file_name.split('.').next().unwrap_or_default().to_string()
    }
}

pub fn make_entry(path: &Path) -> Result<Entry> {
    Entry::from_file(path)
}
