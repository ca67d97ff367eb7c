//! Asset bundling configuration loader.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AssetError, Result};
use crate::models::AssetType;

/// Candidate file names probed by [`AssetsConfig::discover`], in order.
const DEFAULT_CONFIG_FILES: [&str; 3] = [
  "assets.config.json",
  "assets.config.yml",
  "assets.config.yaml",
];

/// Directory below the application root holding public assets.
pub const DEFAULT_PUBLIC_DIR: &str = "public";

/// Subpath below a namespace root where templates live.
pub const DEFAULT_VIEWS_SUBPATH: &str = "lib/resources/views";

/// Query parameter used for version suffixes when none is configured.
pub const DEFAULT_VERSION_PARAMETER: &str = "v";

/// The `assets` section of the application configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssetsConfig {
  /// Serve combined bundles instead of individual source files.
  pub enabled: bool,
  /// Bundles declared directly in configuration.
  pub tags: Vec<TagConfig>,
  /// Templates scanned for `assets()` tags.
  pub templates: Vec<String>,
  /// Legacy name for `templates`, read only when `templates` is empty.
  pub paths: Vec<String>,
  /// Override for the tag pattern; the first capture group holds the argument list.
  pub tag_pattern: Option<String>,
  /// Append `?<versionParameter>=<version>` to combined bundle routes.
  pub append_version: bool,
  /// Query parameter name for the version suffix.
  pub version_parameter: String,
  /// Version value for the version suffix.
  pub version: String,
  /// Public asset root relative to the application root.
  pub public_path: Option<String>,
  /// Subpath below namespace roots where templates are resolved.
  pub views_subpath: String,
}

/// A bundle declared in configuration rather than in a template.
#[derive(Debug, Clone, Deserialize)]
pub struct TagConfig {
  /// Public route of the bundle.
  pub route: String,
  /// Asset type of the bundle.
  #[serde(rename = "type")]
  pub kind: AssetType,
  /// Optional base path overriding the public root.
  #[serde(default)]
  pub path: Option<String>,
  /// Files making up the bundle, relative to the base path.
  #[serde(default)]
  pub files: Vec<String>,
}

impl Default for AssetsConfig {
  fn default() -> Self {
    Self {
      enabled: false,
      tags: Vec::new(),
      templates: Vec::new(),
      paths: Vec::new(),
      tag_pattern: None,
      append_version: false,
      version_parameter: DEFAULT_VERSION_PARAMETER.into(),
      version: String::new(),
      public_path: None,
      views_subpath: DEFAULT_VIEWS_SUBPATH.into(),
    }
  }
}

impl AssetsConfig {
  /// Attempt to load configuration from the provided directory.
  ///
  /// Missing or unparsable files fall back to defaults, which leaves bundling disabled.
  pub fn discover(dir: &Path) -> Self {
    DEFAULT_CONFIG_FILES
      .iter()
      .map(|name| dir.join(name))
      .find(|candidate| candidate.is_file())
      .and_then(|candidate| match Self::from_path(&candidate) {
        Ok(config) => Some(config),
        Err(err) => {
          tracing::warn!("{err}; using default asset configuration");
          None
        }
      })
      .unwrap_or_default()
  }

  /// Read configuration from a JSON or YAML file.
  ///
  /// The document may be the assets section itself or a full application config with an
  /// `assets` key.
  pub fn from_path(path: &Path) -> Result<Self> {
    let content = fs::read_to_string(path).map_err(|err| config_error(path, err))?;
    let document: serde_json::Value = if is_yaml(path) {
      serde_yaml::from_str(&content).map_err(|err| config_error(path, err))?
    } else {
      serde_json::from_str(&content).map_err(|err| config_error(path, err))?
    };
    Self::from_value(document).map_err(|err| config_error(path, err))
  }

  /// Interpret an already parsed configuration document.
  pub fn from_value(document: serde_json::Value) -> serde_json::Result<Self> {
    let section = match document {
      serde_json::Value::Object(mut map) if map.get("assets").is_some_and(|v| v.is_object()) => {
        map.remove("assets").unwrap_or_default()
      }
      other => other,
    };
    serde_json::from_value(section)
  }

  /// Template references to scan, falling back to the legacy `paths` list.
  pub fn template_references(&self) -> &[String] {
    if self.templates.is_empty() {
      &self.paths
    } else {
      &self.templates
    }
  }

  /// Version query suffix for combined routes, or `None` when versions are not appended.
  pub fn version_suffix(&self) -> Option<String> {
    self
      .append_version
      .then(|| format!("?{}={}", self.version_parameter, self.version))
  }
}

fn is_yaml(path: &Path) -> bool {
  matches!(
    path.extension().and_then(|ext| ext.to_str()),
    Some("yml" | "yaml")
  )
}

fn config_error(path: &Path, err: impl std::fmt::Display) -> AssetError {
  AssetError::Config {
    path: PathBuf::from(path),
    message: err.to_string(),
  }
}
