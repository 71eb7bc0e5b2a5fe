use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Project configuration loaded from `.oab.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OabConfig {
    pub project_dir: String,
    pub output: String,
    pub missing_fragments: MissingFragments,
}

impl Default for OabConfig {
    fn default() -> Self {
        Self {
            project_dir: ".".to_string(),
            output: "openapi.yml".to_string(),
            missing_fragments: MissingFragments::Error,
        }
    }
}

/// What to do when an optional top-level fragment is absent.
///
/// `openapi_version` and `info.yml` are required either way; component kind
/// directories are always allowed to be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingFragments {
    /// `servers.yml`, `security.yml`, `tags.yml` and `paths/` must exist.
    #[default]
    Error,
    /// Absent sections load as empty.
    Skip,
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".oab.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<OabConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: OabConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# oab configuration
project_dir: .            # directory holding openapi_version, info.yml, paths/, components/
output: openapi.yml       # bundled file; a .json extension switches the output to JSON

# error | skip
# skip lets servers.yml, security.yml, tags.yml and paths/ be absent
missing_fragments: error
"#
}
