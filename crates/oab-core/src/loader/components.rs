use std::io;
use std::path::Path;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;

use super::COMPONENTS_DIR;
use crate::error::LoadError;
use crate::files::{fragment_files, load_fragment};
use crate::model::{ComponentKind, Components, RefOr};

/// Load every `components/<kind>/*.{yml,yaml,json}` file under `root`.
///
/// A kind directory that does not exist yields an empty mapping. Entries are
/// keyed by file stem; when two files share a stem the later one in sorted
/// order (`.json`, then `.yaml`, then `.yml`) replaces the earlier.
pub fn load_components(root: &Path) -> Result<Components, LoadError> {
    let dir = root.join(COMPONENTS_DIR);
    Ok(Components {
        schemas: load_kind(&dir, ComponentKind::Schemas)?,
        responses: load_kind(&dir, ComponentKind::Responses)?,
        parameters: load_kind(&dir, ComponentKind::Parameters)?,
        examples: load_kind(&dir, ComponentKind::Examples)?,
        request_bodies: load_kind(&dir, ComponentKind::RequestBodies)?,
        headers: load_kind(&dir, ComponentKind::Headers)?,
        security_schemes: load_kind(&dir, ComponentKind::SecuritySchemes)?,
        links: load_kind(&dir, ComponentKind::Links)?,
        callbacks: load_kind(&dir, ComponentKind::Callbacks)?,
    })
}

fn load_kind<T: DeserializeOwned>(
    components_dir: &Path,
    kind: ComponentKind,
) -> Result<IndexMap<String, RefOr<T>>, LoadError> {
    let dir = components_dir.join(kind.dir_name());
    let files = match fragment_files(&dir) {
        Ok(files) => files,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("no {} directory at {}", kind, dir.display());
            return Ok(IndexMap::new());
        }
        Err(e) => return Err(LoadError::io(&dir, e)),
    };

    let mut entries = IndexMap::with_capacity(files.len());
    for file in files {
        let Some(name) = file.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
            continue;
        };
        let value: RefOr<T> = load_fragment(&file)?;
        if entries.insert(name.clone(), value).is_some() {
            log::warn!(
                "{} '{}' defined more than once, keeping {}",
                kind,
                name,
                file.display()
            );
        }
    }
    Ok(entries)
}
