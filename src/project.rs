//! Filesystem layout shared by the scanner, the helper and middleware registration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::AssetsConfig;

/// Resolved filesystem context for asset handling.
#[derive(Debug, Clone)]
pub struct AssetLayout {
  /// Application root; bare template references resolve below it.
  pub app_root: PathBuf,
  /// Global public root that asset file lists are relative to.
  pub public_root: PathBuf,
  /// Subpath below a namespace root that holds templates.
  pub views_subpath: String,
  /// Registered namespace roots for `namespace:template` references.
  pub namespaces: BTreeMap<String, PathBuf>,
}

impl AssetLayout {
  /// Layout with an application root and an explicit public root.
  pub fn new(app_root: impl Into<PathBuf>, public_root: impl Into<PathBuf>) -> Self {
    Self {
      app_root: app_root.into(),
      public_root: public_root.into(),
      views_subpath: crate::config::DEFAULT_VIEWS_SUBPATH.into(),
      namespaces: BTreeMap::new(),
    }
  }

  /// Derive a layout from configuration, resolving relative paths against `app_root`.
  pub fn from_config(app_root: &Path, config: &AssetsConfig) -> Self {
    let public_root = match config.public_path.as_deref() {
      Some(public) => app_root.join(public),
      None => app_root.join(crate::config::DEFAULT_PUBLIC_DIR),
    };

    Self {
      app_root: app_root.to_path_buf(),
      public_root,
      views_subpath: config.views_subpath.clone(),
      namespaces: BTreeMap::new(),
    }
  }

  /// Register a namespace root for `namespace:template` references.
  pub fn with_namespace(mut self, name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
    self.namespaces.insert(name.into(), root.into());
    self
  }

  /// Base directory for a declaration, honouring its optional path override.
  pub fn base_path(&self, path_override: Option<&str>) -> PathBuf {
    match path_override {
      Some(path) if !path.is_empty() => self.app_root.join(path),
      _ => self.public_root.clone(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn public_root_defaults_below_app_root() {
    let layout = AssetLayout::from_config(Path::new("/srv/app"), &AssetsConfig::default());
    assert_eq!(layout.public_root, PathBuf::from("/srv/app/public"));
    assert_eq!(layout.views_subpath, "lib/resources/views");
  }

  #[test]
  fn base_path_prefers_override() {
    let layout = AssetLayout::new("/srv/app", "/srv/app/public");
    assert_eq!(layout.base_path(None), PathBuf::from("/srv/app/public"));
    assert_eq!(layout.base_path(Some("")), PathBuf::from("/srv/app/public"));
    assert_eq!(
      layout.base_path(Some("vendor/assets")),
      PathBuf::from("/srv/app/vendor/assets")
    );
  }
}
