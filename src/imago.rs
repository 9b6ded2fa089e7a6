use std::fs;
use std::path::{self, Component, Path, PathBuf};

use spdlog::{debug, Logger};

use crate::error::{Error, Result};
use crate::larva::LARVA_DIR;

/// Hidden folder under the site root receiving the previous imago
pub const BACKUP_DIR: &str = ".imago-backup";

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> Error + '_ {
    move |source| Error::Io { path: path.to_path_buf(), source }
}

/// Writes `contents` to `path`, creating any missing parent folder.
pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }
    fs::write(path, contents).map_err(io_error(path))
}

/// Resolves `.` and `..` without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(component),
            },
            other => normalized.push(other),
        }
    }
    normalized
}

/// Rejects output locations whose clearing would move the site's own sources or backup.
///
/// The root is made absolute first, so `..` from a relative root is still seen as its parent.
pub fn check_output_location(root: &Path, output_location: &Path) -> Result<PathBuf> {
    let root = normalize(&path::absolute(root).map_err(io_error(root))?);
    let output = normalize(&root.join(output_location));
    let larva = root.join(LARVA_DIR);
    let backup = root.join(BACKUP_DIR);

    let unsafe_output = output == root
        || larva.starts_with(&output)
        || output.starts_with(&larva)
        || output.starts_with(&backup)
        || backup.starts_with(&output);

    if unsafe_output {
        return Err(Error::UnsafeOutput { output: output_location.to_path_buf() });
    }

    Ok(output)
}

fn remove_any(path: &Path) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(io_error(path))?;
    if metadata.is_dir() {
        fs::remove_dir_all(path).map_err(io_error(path))
    } else {
        fs::remove_file(path).map_err(io_error(path))
    }
}

/// Empties `output` by moving each of its items into `backup`.
///
/// A same-named item left in `backup` by an earlier build is replaced. The
/// output folder is created when absent. Returns how many items were moved.
pub fn clear_output(output: &Path, backup: &Path, logger: &Logger) -> Result<usize> {
    fs::create_dir_all(output).map_err(io_error(output))?;
    fs::create_dir_all(backup).map_err(io_error(backup))?;

    let mut moved = 0;
    for item in fs::read_dir(output).map_err(io_error(output))? {
        let item = item.map_err(io_error(output))?;
        let source = item.path();
        let target = backup.join(item.file_name());

        if fs::symlink_metadata(&target).is_ok() {
            remove_any(&target)?;
        }

        debug!(logger: logger, "Backing up {} -> {}", source.display(), target.display());
        fs::rename(&source, &target).map_err(io_error(&source))?;
        moved += 1;
    }

    Ok(moved)
}

#[cfg(test)]
mod tests {
    use std::env;

    use tempfile::TempDir;

    use crate::test_data::test_logger;

    use super::*;

    #[test]
    fn test_write_file_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a").join("b").join("index.html");
        write_file(&path, "<p>hi</p>").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "<p>hi</p>");
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Path::new("./site/../imago/")), PathBuf::from("imago"));
        assert_eq!(normalize(Path::new("/srv/site/./public")), PathBuf::from("/srv/site/public"));
        assert_eq!(normalize(Path::new(".")), PathBuf::new());
        assert_eq!(normalize(Path::new("../../up")), PathBuf::from("../../up"));
        assert_eq!(normalize(Path::new("/../etc")), PathBuf::from("/etc"));
    }

    #[test]
    fn test_safe_output_locations() {
        let root = Path::new("/srv/site");
        assert_eq!(check_output_location(root, Path::new("imago")).unwrap(), PathBuf::from("/srv/site/imago"));
        assert_eq!(check_output_location(root, Path::new("public/site")).unwrap(),
                   PathBuf::from("/srv/site/public/site"));
        assert_eq!(check_output_location(root, Path::new("../www")).unwrap(), PathBuf::from("/srv/www"));

        let cwd = env::current_dir().unwrap();
        assert_eq!(check_output_location(Path::new("."), Path::new("imago")).unwrap(), cwd.join("imago"));
    }

    #[test]
    fn test_unsafe_output_locations() {
        let root = Path::new("/srv/site");
        for output in [".", "", "..", "/", "larva", "larva/entries", "./larva/../larva/x", ".imago-backup",
            ".imago-backup/old"] {
            let res = check_output_location(root, Path::new(output));
            assert!(matches!(res, Err(Error::UnsafeOutput { .. })), "{} should be rejected", output);
        }
    }

    #[test]
    fn test_unsafe_output_from_relative_root() {
        let cwd = env::current_dir().unwrap();
        let site_dir = cwd.file_name().unwrap().to_string_lossy().into_owned();
        let sibling_of_site = format!("../{}", site_dir);
        let inside_larva = format!("../{}/larva/entries", site_dir);

        for output in ["..", "../..", sibling_of_site.as_str(), inside_larva.as_str(), ".", ""] {
            let res = check_output_location(Path::new("."), Path::new(output));
            assert!(matches!(res, Err(Error::UnsafeOutput { .. })), "{} should be rejected", output);
        }

        let res = check_output_location(Path::new("./larva/.."), Path::new(".."));
        assert!(matches!(res, Err(Error::UnsafeOutput { .. })));
    }

    #[test]
    fn test_clear_creates_missing_output() {
        let tmp = TempDir::new().unwrap();
        let output = tmp.path().join("imago");
        let backup = tmp.path().join(BACKUP_DIR);

        assert_eq!(clear_output(&output, &backup, &test_logger()).unwrap(), 0);
        assert!(output.is_dir());
    }

    #[test]
    fn test_clear_moves_into_backup() {
        let tmp = TempDir::new().unwrap();
        let output = tmp.path().join("imago");
        let backup = tmp.path().join(BACKUP_DIR);
        write_file(&output.join("index.html"), "new home").unwrap();
        write_file(&output.join("post").join("index.html"), "new post").unwrap();
        write_file(&backup.join("index.html"), "old home").unwrap();
        write_file(&backup.join("post").join("stale.html"), "stale").unwrap();
        write_file(&backup.join("kept.html"), "kept").unwrap();

        let moved = clear_output(&output, &backup, &test_logger()).unwrap();

        assert_eq!(moved, 2);
        assert_eq!(fs::read_dir(&output).unwrap().count(), 0);
        assert_eq!(fs::read_to_string(backup.join("index.html")).unwrap(), "new home");
        assert_eq!(fs::read_to_string(backup.join("post").join("index.html")).unwrap(), "new post");
        assert!(!backup.join("post").join("stale.html").exists());
        assert!(backup.join("kept.html").exists());
    }
}
