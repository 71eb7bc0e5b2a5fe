use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use super::{INFO_FILE, LoadOptions, SECURITY_FILE, SERVERS_FILE, TAGS_FILE, VERSION_FILE};
use crate::error::LoadError;
use crate::files::{load_fragment, load_optional_fragment};
use crate::model::{Info, SecurityRequirement, Server, Tag};

/// Read the plain-text `openapi_version` file, dropping trailing newlines.
pub fn load_version(root: &Path) -> Result<String, LoadError> {
    let path = root.join(VERSION_FILE);
    let raw = fs::read_to_string(&path).map_err(|e| LoadError::io(&path, e))?;
    Ok(raw.trim_end_matches(['\n', '\r']).to_string())
}

pub fn load_info(root: &Path) -> Result<Info, LoadError> {
    load_fragment(&root.join(INFO_FILE))
}

pub fn load_servers(root: &Path, options: &LoadOptions) -> Result<Vec<Server>, LoadError> {
    load_list(&root.join(SERVERS_FILE), options)
}

pub fn load_security(
    root: &Path,
    options: &LoadOptions,
) -> Result<Vec<SecurityRequirement>, LoadError> {
    load_list(&root.join(SECURITY_FILE), options)
}

pub fn load_tags(root: &Path, options: &LoadOptions) -> Result<Vec<Tag>, LoadError> {
    load_list(&root.join(TAGS_FILE), options)
}

fn load_list<T: DeserializeOwned>(path: &Path, options: &LoadOptions) -> Result<Vec<T>, LoadError> {
    if !options.skips_missing() {
        return load_fragment(path);
    }
    let list = load_optional_fragment(path)?;
    if list.is_none() {
        log::debug!("{} not found, treating as empty", path.display());
    }
    Ok(list.unwrap_or_default())
}
