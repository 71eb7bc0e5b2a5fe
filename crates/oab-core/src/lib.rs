//! Bundle a directory tree of OpenAPI fragments into one document.
//!
//! A project looks like:
//!
//! ```text
//! openapi_version
//! info.yml
//! servers.yml
//! security.yml
//! tags.yml
//! paths/<segment>/.../index.yml   (+ get.yml, post.yml, ..., servers.yml)
//! components/<kind>/<Name>.{yml,yaml,json}
//! ```
//!
//! [`project::load_project`] reads it into a [`model::Document`],
//! [`project::write_document`] writes the bundle, and
//! [`split::split_document`] goes the other way.

pub mod codec;
pub mod config;
pub mod error;
pub mod files;
pub mod loader;
pub mod model;
pub mod project;
pub mod split;

pub use error::{CodecError, LoadError, WriteError};
pub use loader::LoadOptions;
pub use model::Document;
pub use project::{load_project, load_project_with, write_document};
pub use split::split_document;
