//! Directory enumeration and single-fragment reads.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::codec::{self, FRAGMENT_EXTENSIONS, Format};
use crate::error::LoadError;

/// Regular files directly inside `dir` whose extension is a recognised
/// fragment extension, sorted by file name. Symlinks to files count as
/// files; subdirectories are skipped.
pub fn fragment_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => continue,
            Err(e) => {
                log::warn!("skipping {}: {}", path.display(), e);
                continue;
            }
        }
        let recognised = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| FRAGMENT_EXTENSIONS.contains(&ext));
        if recognised {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Directories directly inside `dir`, sorted by name. Symlinks are not
/// followed.
pub fn subdirectories(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Open and decode one fragment file. The format follows the extension,
/// YAML when it is not recognised.
pub fn load_fragment<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
    let format = Format::from_path(path).unwrap_or_default();
    log::debug!("decoding {}", path.display());
    codec::decode(BufReader::new(file), format).map_err(|source| LoadError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Like [`load_fragment`], but a missing file yields `None`.
pub fn load_optional_fragment<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, LoadError> {
    match load_fragment(path) {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}
