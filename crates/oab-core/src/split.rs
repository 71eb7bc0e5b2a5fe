//! Writing a document back out as a project tree, the inverse of
//! [`crate::project::load_project`].

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;

use crate::codec::{self, Format};
use crate::error::WriteError;
use crate::loader::{
    COMPONENTS_DIR, INFO_FILE, PATH_INDEX_FILE, PATHS_DIR, SECURITY_FILE, SERVERS_FILE,
    TAGS_FILE, VERSION_FILE,
};
use crate::model::{ComponentKind, Document, HttpMethod, PathItem, RefOr};

/// Write `document` into `project_dir` using the fragment layout.
///
/// Existing files at the target locations are overwritten; unrelated files
/// are left alone.
pub fn split_document(document: &Document, project_dir: &Path) -> Result<(), WriteError> {
    create_dir(project_dir)?;

    let version = project_dir.join(VERSION_FILE);
    fs::write(&version, format!("{}\n", document.openapi))
        .map_err(|e| WriteError::io(&version, e))?;

    write_fragment(&project_dir.join(INFO_FILE), &document.info)?;
    write_fragment(&project_dir.join(SERVERS_FILE), &document.servers)?;
    write_fragment(&project_dir.join(SECURITY_FILE), &document.security)?;
    write_fragment(&project_dir.join(TAGS_FILE), &document.tags)?;

    let paths_root = project_dir.join(PATHS_DIR);
    create_dir(&paths_root)?;
    for (key, item) in &document.paths {
        let dir = path_key_dir(&paths_root, key)?;
        write_path_item(&dir, item)?;
    }

    let components_dir = project_dir.join(COMPONENTS_DIR);
    let components = &document.components;
    write_kind(&components_dir, ComponentKind::Schemas, &components.schemas)?;
    write_kind(&components_dir, ComponentKind::Responses, &components.responses)?;
    write_kind(&components_dir, ComponentKind::Parameters, &components.parameters)?;
    write_kind(&components_dir, ComponentKind::Examples, &components.examples)?;
    write_kind(
        &components_dir,
        ComponentKind::RequestBodies,
        &components.request_bodies,
    )?;
    write_kind(&components_dir, ComponentKind::Headers, &components.headers)?;
    write_kind(
        &components_dir,
        ComponentKind::SecuritySchemes,
        &components.security_schemes,
    )?;
    write_kind(&components_dir, ComponentKind::Links, &components.links)?;
    write_kind(&components_dir, ComponentKind::Callbacks, &components.callbacks)?;

    log::info!("split document into {}", project_dir.display());
    Ok(())
}

/// Directory for a path key. Keys must be `/` or `/`-separated non-empty
/// segments without `.`, `..` or backslashes.
fn path_key_dir(paths_root: &Path, key: &str) -> Result<PathBuf, WriteError> {
    if key == "/" {
        return Ok(paths_root.to_path_buf());
    }
    let invalid = || WriteError::InvalidPathKey(key.to_string());
    let rest = key.strip_prefix('/').ok_or_else(invalid)?;

    let mut dir = paths_root.to_path_buf();
    for segment in rest.split('/') {
        if !is_plain_name(segment) {
            return Err(invalid());
        }
        dir.push(segment);
    }
    Ok(dir)
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

fn write_path_item(dir: &Path, item: &PathItem) -> Result<(), WriteError> {
    create_dir(dir)?;

    let mut index = item.clone();
    for method in HttpMethod::ALL {
        *index.operation_mut(method) = None;
    }
    write_fragment(&dir.join(PATH_INDEX_FILE), &index)?;

    for (method, operation) in item.operations() {
        write_fragment(&dir.join(method.file_name()), operation)?;
    }
    Ok(())
}

fn write_kind<T: Serialize>(
    components_dir: &Path,
    kind: ComponentKind,
    entries: &IndexMap<String, RefOr<T>>,
) -> Result<(), WriteError> {
    if entries.is_empty() {
        return Ok(());
    }
    let dir = components_dir.join(kind.dir_name());
    create_dir(&dir)?;
    for (name, value) in entries {
        if !is_plain_name(name) {
            return Err(WriteError::InvalidComponentName(name.clone()));
        }
        write_fragment(&dir.join(format!("{name}.yml")), value)?;
    }
    Ok(())
}

fn write_fragment<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), WriteError> {
    let bytes = codec::encode_to_vec(value, Format::Yaml).map_err(|source| WriteError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, bytes).map_err(|e| WriteError::io(path, e))
}

fn create_dir(dir: &Path) -> Result<(), WriteError> {
    fs::create_dir_all(dir).map_err(|e| WriteError::io(dir, e))
}
