use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    #[error("failed to load project '{}': {source}", .dir.display())]
    Project {
        dir: PathBuf,
        #[source]
        source: Box<LoadError>,
    },
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the root cause is a missing file or directory.
    pub fn is_not_found(&self) -> bool {
        match self {
            LoadError::Io { source, .. } => source.kind() == io::ErrorKind::NotFound,
            LoadError::Decode {
                source: CodecError::Io(source),
                ..
            } => source.kind() == io::ErrorKind::NotFound,
            LoadError::Decode { .. } => false,
            LoadError::Project { source, .. } => source.is_not_found(),
        }
    }

    /// The file or directory the error is about, looking through the
    /// project wrapper.
    pub fn path(&self) -> &std::path::Path {
        match self {
            LoadError::Io { path, .. } | LoadError::Decode { path, .. } => path,
            LoadError::Project { source, .. } => source.path(),
        }
    }
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    #[error("path key cannot be mapped to a directory: {0}")]
    InvalidPathKey(String),

    #[error("component name cannot be used as a file name: {0}")]
    InvalidComponentName(String),
}

impl WriteError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        WriteError::Io {
            path: path.into(),
            source,
        }
    }
}
