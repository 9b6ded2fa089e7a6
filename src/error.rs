use std::path::PathBuf;

use thiserror::Error;

use crate::options::OptionsError;
use crate::slug::SlugError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Not a Pupate-shaped directory, missing: {}", display_paths(.missing))]
    Structural { missing: Vec<PathBuf> },

    #[error(transparent)]
    Options(#[from] OptionsError),

    #[error(transparent)]
    Slug(#[from] SlugError),

    #[error("Could not access `{}`: {source}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },

    #[error("Refusing to use `{}` as output location: clearing it would move the site's own files", .output.display())]
    UnsafeOutput { output: PathBuf },
}

pub type Result<T> = std::result::Result<T, Error>;

fn display_paths(paths: &[PathBuf]) -> String {
    paths.iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
