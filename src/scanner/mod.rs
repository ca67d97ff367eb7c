//! Template scanning for `assets()` declaration tags.

mod parse;
mod pattern;

use std::fs;
use std::path::Path;

pub use parse::{TagArguments, parse_tag_arguments};
pub use pattern::{DEFAULT_TAG_PATTERN, TagPattern};

use crate::asset_paths::expand_wildcards;
use crate::error::{AssetError, Result};
use crate::models::AssetDeclaration;
use crate::project::AssetLayout;

/// Parse every well-formed tag in `source`, in source order, without touching the filesystem.
///
/// Malformed tags are logged and skipped; argument lists shorter than three elements are
/// dropped silently.
pub fn find_asset_tags(source: &str, pattern: &TagPattern) -> Vec<TagArguments> {
  pattern
    .arguments(source)
    .filter_map(|raw| match parse_tag_arguments(raw) {
      Ok(arguments) => arguments,
      Err(err) => {
        tracing::warn!("skipping assets() tag: {err}");
        None
      }
    })
    .collect()
}

/// Scans templates for asset declarations and expands their wildcard entries.
#[derive(Debug, Clone)]
pub struct TagScanner {
  pattern: TagPattern,
  layout: AssetLayout,
}

impl TagScanner {
  /// Create a scanner using `pattern` and resolving files against `layout`.
  pub fn new(pattern: TagPattern, layout: AssetLayout) -> Self {
    Self { pattern, layout }
  }

  /// Scanner with the default `assets(...)` pattern.
  pub fn with_layout(layout: AssetLayout) -> Self {
    Self::new(TagPattern::default(), layout)
  }

  /// Layout the scanner resolves against.
  pub fn layout(&self) -> &AssetLayout {
    &self.layout
  }

  /// Parse the declarations in a template source.
  ///
  /// Wildcards are expanded immediately, filtered by the declared type. A wildcard root that
  /// cannot be listed fails the whole scan.
  pub fn scan(&self, source: &str) -> Result<Vec<AssetDeclaration>> {
    find_asset_tags(source, &self.pattern)
      .into_iter()
      .map(|tag| -> Result<AssetDeclaration> {
        let base = self.layout.base_path(tag.path.as_deref());
        let files = expand_wildcards(&base, &tag.files, Some(&tag.kind))?;
        Ok(AssetDeclaration {
          route: tag.route,
          kind: tag.kind,
          files,
          path: tag.path,
        })
      })
      .collect()
  }

  /// Read a template from disk and scan it.
  pub fn scan_template(&self, path: &Path) -> Result<Vec<AssetDeclaration>> {
    let source = fs::read_to_string(path).map_err(|source| AssetError::TemplateUnreadable {
      path: path.to_path_buf(),
      source,
    })?;
    let declarations = self.scan(&source)?;
    tracing::debug!(
      template = %path.display(),
      found = declarations.len(),
      "scanned template for assets() tags"
    );
    Ok(declarations)
  }
}
