//! Assembling a project directory into one document, and writing it out.

use std::fs;
use std::path::Path;

use crate::codec::{self, Format};
use crate::error::{LoadError, WriteError};
use crate::loader::{self, LoadOptions};
use crate::model::Document;

/// Load a project with the default (strict) options.
pub fn load_project(dir: &Path) -> Result<Document, LoadError> {
    load_project_with(dir, &LoadOptions::default())
}

/// Load every section of the project at `dir` and compose the document.
/// The first failing loader aborts the whole load.
pub fn load_project_with(dir: &Path, options: &LoadOptions) -> Result<Document, LoadError> {
    assemble(dir, options).map_err(|source| LoadError::Project {
        dir: dir.to_path_buf(),
        source: Box::new(source),
    })
}

fn assemble(dir: &Path, options: &LoadOptions) -> Result<Document, LoadError> {
    let openapi = loader::load_version(dir)?;
    let info = loader::load_info(dir)?;
    let servers = loader::load_servers(dir, options)?;
    let paths = loader::load_paths(dir, options)?;
    let components = loader::load_components(dir)?;
    let security = loader::load_security(dir, options)?;
    let tags = loader::load_tags(dir, options)?;

    let document = Document {
        openapi,
        info,
        servers,
        paths,
        components,
        security,
        tags,
    };
    log::info!(
        "loaded {} ({} paths, {} components)",
        dir.display(),
        document.paths.len(),
        document.components.len()
    );
    Ok(document)
}

/// Encode `document` into `output`, creating or overwriting it.
///
/// JSON is written when `output` ends in `.json`, YAML otherwise. The whole
/// document is encoded before the file is touched.
pub fn write_document(output: &Path, document: &Document) -> Result<(), WriteError> {
    let format = Format::from_path(output).unwrap_or_default();
    let bytes = codec::encode_to_vec(document, format).map_err(|source| WriteError::Encode {
        path: output.to_path_buf(),
        source,
    })?;
    fs::write(output, bytes).map_err(|e| WriteError::io(output, e))?;
    log::info!("wrote {}", output.display());
    Ok(())
}
