use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const ENTRY_EXTENSION: &str = ".txt";

pub struct EntryList {
    pub root_dir: PathBuf,
}

impl EntryList {
    pub fn new(root_dir: &Path) -> Self {
        EntryList { root_dir: root_dir.to_path_buf() }
    }

    /// Every `.txt` file directly inside the entries directory, in listing order.
    /// Symlinks count when they point at a file.
    pub fn retrieve_files(&self) -> Result<Vec<PathBuf>> {
        let io_err = |source| Error::Io { path: self.root_dir.clone(), source };

        let mut entries = vec![];
        for dir_entry in fs::read_dir(&self.root_dir).map_err(io_err)? {
            let dir_entry = dir_entry.map_err(io_err)?;
            let is_entry = dir_entry.file_name().to_str()
                .is_some_and(|file_name| file_name.ends_with(ENTRY_EXTENSION));
            if !is_entry {
                continue;
            }

            let path = dir_entry.path();
            let metadata = fs::metadata(&path).map_err(|source| Error::Io { path: path.clone(), source })?;
            if metadata.is_file() {
                entries.push(path);
            }
        }
        Ok(entries)
    }
}
