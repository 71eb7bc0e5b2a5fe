//! Fragment loaders: each maps a fixed file or directory under the project
//! root to a decoded piece of the document.

pub mod components;
pub mod paths;
pub mod sections;

use crate::config::{MissingFragments, OabConfig};

pub use components::load_components;
pub use paths::load_paths;
pub use sections::{load_info, load_security, load_servers, load_tags, load_version};

pub const VERSION_FILE: &str = "openapi_version";
pub const INFO_FILE: &str = "info.yml";
pub const SERVERS_FILE: &str = "servers.yml";
pub const SECURITY_FILE: &str = "security.yml";
pub const TAGS_FILE: &str = "tags.yml";
pub const PATHS_DIR: &str = "paths";
pub const PATH_INDEX_FILE: &str = "index.yml";
pub const COMPONENTS_DIR: &str = "components";

/// Options shared by the loaders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub missing: MissingFragments,
}

impl LoadOptions {
    pub fn lenient() -> Self {
        Self {
            missing: MissingFragments::Skip,
        }
    }

    pub(crate) fn skips_missing(&self) -> bool {
        self.missing == MissingFragments::Skip
    }
}

impl From<&OabConfig> for LoadOptions {
    fn from(config: &OabConfig) -> Self {
        Self {
            missing: config.missing_fragments,
        }
    }
}
