use std::fs;
use std::io;
use std::path::Path;

use super::{LoadOptions, PATH_INDEX_FILE, PATHS_DIR, SERVERS_FILE};
use crate::error::LoadError;
use crate::files::{load_fragment, load_optional_fragment, subdirectories};
use crate::model::{HttpMethod, PathItem, Paths, Server};

/// Walk `root/paths` and build the path map.
///
/// Every directory holding an `index.yml` becomes one path item, keyed by
/// its location relative to `paths/` (`paths/pets/{petId}` →
/// `/pets/{petId}`). Method files next to the index (`get.yml`, ...)
/// replace the matching operation, and a `servers.yml` replaces the item's
/// servers. Directories without an index are only descended into.
pub fn load_paths(root: &Path, options: &LoadOptions) -> Result<Paths, LoadError> {
    let paths_root = root.join(PATHS_DIR);
    if options.skips_missing() {
        match fs::metadata(&paths_root) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("{} not found, no paths loaded", paths_root.display());
                return Ok(Paths::new());
            }
            Err(e) => return Err(LoadError::io(&paths_root, e)),
        }
    }

    let mut paths = Paths::new();
    walk(&paths_root, &paths_root, &mut paths)?;
    Ok(paths)
}

fn walk(dir: &Path, paths_root: &Path, paths: &mut Paths) -> Result<(), LoadError> {
    if let Some(item) = load_path_item(dir)? {
        let key = url_path(dir, paths_root);
        log::debug!("path {} from {}", key, dir.display());
        paths.insert(key, item);
    }

    let children = subdirectories(dir).map_err(|e| LoadError::io(dir, e))?;
    for child in children {
        walk(&child, paths_root, paths)?;
    }
    Ok(())
}

fn load_path_item(dir: &Path) -> Result<Option<PathItem>, LoadError> {
    let index = dir.join(PATH_INDEX_FILE);
    if !index.is_file() {
        return Ok(None);
    }
    let mut item: PathItem = load_fragment(&index)?;

    for method in HttpMethod::ALL {
        let file = dir.join(method.file_name());
        if file.is_file() {
            *item.operation_mut(method) = Some(load_fragment(&file)?);
        }
    }

    if let Some(servers) = load_optional_fragment::<Vec<Server>>(&dir.join(SERVERS_FILE))? {
        item.servers = servers;
    }

    Ok(Some(item))
}

/// `/`-joined location of `dir` below `paths_root`, always with a leading
/// slash. The root itself maps to `/`.
fn url_path(dir: &Path, paths_root: &Path) -> String {
    let relative = dir.strip_prefix(paths_root).unwrap_or(dir);
    let mut key = String::new();
    for segment in relative.components() {
        key.push('/');
        key.push_str(&segment.as_os_str().to_string_lossy());
    }
    if key.is_empty() {
        key.push('/');
    }
    key
}
