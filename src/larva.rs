use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use flate2::read::GzDecoder;
use spdlog::{debug, info, warn, Logger};
use tar::Archive;

use crate::error::{Error, Result};
use crate::options::OPTIONS_FILENAME;

pub const LARVA_DIR: &str = "larva";
pub const ENTRIES_DIR: &str = "larva/entries";
pub const HOMEPAGE_FILENAME: &str = "larva/homepage.txt";

/// Everything a folder needs to be built by Pupate
pub const REQUIRED_PATHS: [&str; 4] = [LARVA_DIR, ENTRIES_DIR, HOMEPAGE_FILENAME, OPTIONS_FILENAME];

/// Datestring of the bundled homepage, replaced by the spawn date
const SAMPLE_DATE: &str = "2024-04-22";

fn missing_paths(root: &Path) -> Vec<PathBuf> {
    REQUIRED_PATHS.iter()
        .map(PathBuf::from)
        .filter(|path| !root.join(path).exists())
        .collect()
}

/// Tells whether `root` is Pupate-shaped, warning about each missing path.
pub fn check(root: &Path, logger: &Logger) -> bool {
    let missing = missing_paths(root);
    for path in &missing {
        warn!(logger: logger, "Missing {}", path.display());
    }
    missing.is_empty()
}

pub fn require_structure(root: &Path, logger: &Logger) -> Result<()> {
    let missing = missing_paths(root);
    if missing.is_empty() {
        return Ok(());
    }
    for path in &missing {
        warn!(logger: logger, "Missing {}", path.display());
    }
    Err(Error::Structural { missing })
}

fn get_current_date() -> String {
    let current_local: DateTime<Local> = Local::now();
    current_local.format("%Y-%m-%d").to_string()
}

fn replace_date(homepage: &str) -> String {
    homepage.replacen(SAMPLE_DATE, &get_current_date(), 1)
}

/// Scaffolds a site in `root`. Existing files are never overwritten.
pub fn spawn(root: &Path, logger: &Logger) -> Result<()> {
    info!(logger: logger, "Spawning...");

    for dir in [LARVA_DIR, ENTRIES_DIR] {
        let dir = root.join(dir);
        fs::create_dir_all(&dir).map_err(|source| Error::Io { path: dir.clone(), source })?;
    }

    let archive_err = |source| Error::Io { path: PathBuf::from("res.tar.gz"), source };
    let tar_gz = include_bytes!(concat!(env!("OUT_DIR"), "/res.tar.gz"));
    let mut archive = Archive::new(GzDecoder::new(tar_gz.as_ref()));

    for file in archive.entries().map_err(archive_err)? {
        let mut file = file.map_err(archive_err)?;
        if !file.header().entry_type().is_file() {
            continue;
        }

        let relative = file.path().map_err(archive_err)?.into_owned();
        let target = root.join(&relative);
        if target.exists() {
            debug!(logger: logger, "Keeping existing {}", target.display());
            continue;
        }

        let mut contents = String::new();
        file.read_to_string(&mut contents).map_err(archive_err)?;
        if relative == Path::new(HOMEPAGE_FILENAME) {
            contents = replace_date(&contents);
        }

        debug!(logger: logger, "Writing {}", target.display());
        crate::imago::write_file(&target, &contents)?;
    }

    info!(logger: logger, "Spawning finished!");
    Ok(())
}

/// Pupate creates and moves files in the site root, so a read-only root only deserves a warning up front.
pub fn warn_if_read_only(root: &Path, logger: &Logger) {
    match fs::metadata(root) {
        Ok(metadata) if metadata.permissions().readonly() => {
            warn!(logger: logger, "{} is read-only, Pupate will not be able to write to it", root.display());
        }
        Ok(_) => {}
        Err(e) => {
            warn!(logger: logger, "Cannot read permissions of {}: {}", root.display(), e);
        }
    }
}
