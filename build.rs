use std::fs::File;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use flate2::write::GzEncoder;
use flate2::Compression;

/// Files `pupate spawn` writes into a new site, relative to `res/`.
/// Templates under `res/imago` are compiled in by the renderers instead.
const SPAWNED: [&str; 2] = ["options.txt", "larva"];

fn get_archive_path() -> PathBuf {
    let out_dir = env::var("OUT_DIR").unwrap();
    PathBuf::from(out_dir).join("res.tar.gz")
}

fn compress_spawned(res_dir: &Path, archive_path: &Path) -> io::Result<()> {
    let tar_gz = File::create(archive_path)?;
    let enc = GzEncoder::new(tar_gz, Compression::default());
    let mut tar = tar::Builder::new(enc);

    for name in SPAWNED {
        let path = res_dir.join(name);
        if path.is_dir() {
            tar.append_dir_all(name, &path)?;
        } else {
            tar.append_path_with_name(&path, name)?;
        }
    }

    tar.into_inner()?.finish()?;
    Ok(())
}

fn main() {
    let current_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let res_dir = PathBuf::from(&current_dir).join("res");
    for name in SPAWNED {
        println!("cargo:rerun-if-changed={}", res_dir.join(name).display());
    }

    let archive_path = get_archive_path();
    let _ = fs::remove_file(&archive_path);
    compress_spawned(&res_dir, &archive_path).unwrap()
}
