//! Template helper emitting `<script>`/`<link>` tags for asset bundles.
//!
//! With bundling enabled a route renders as one tag for the combined file; otherwise it
//! renders one tag per source file. Results are cached per route for the lifetime of the
//! helper.

mod cache;
mod tags;

use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use cache::RenderCache;
pub use tags::build_tag;

use crate::asset_paths::expand_wildcards;
use crate::config::AssetsConfig;
use crate::error::Result;
use crate::models::{AssetType, CacheEntry};

/// Result of [`AssetsHelper::render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
  /// Markup only.
  Html(String),
  /// The whole cache entry, for callers that need the resolved files.
  Entry(Arc<CacheEntry>),
}

/// Renders and memoizes asset tags per route.
#[derive(Debug)]
pub struct AssetsHelper {
  config: AssetsConfig,
  public_root: PathBuf,
  cache: RenderCache,
}

impl AssetsHelper {
  /// Create a helper resolving files below `public_root`.
  pub fn new(config: AssetsConfig, public_root: impl Into<PathBuf>) -> Self {
    Self {
      config,
      public_root: public_root.into(),
      cache: RenderCache::new(),
    }
  }

  /// Configuration the helper renders with.
  pub fn config(&self) -> &AssetsConfig {
    &self.config
  }

  /// Public root wildcard entries are expanded against.
  pub fn public_root(&self) -> &Path {
    &self.public_root
  }

  /// Cache backing the helper.
  pub fn cache(&self) -> &RenderCache {
    &self.cache
  }

  /// Markup for `route`, computing and caching it on first use.
  pub fn assets(&self, route: &str, kind: &AssetType, files: &[String]) -> Result<String> {
    Ok(self.entry(route, kind, files)?.html.clone())
  }

  /// Cache entry for `route`, computing it on first use.
  pub fn entry(&self, route: &str, kind: &AssetType, files: &[String]) -> Result<Arc<CacheEntry>> {
    if let Some(entry) = self.cache.get(route) {
      tracing::trace!(route, "asset cache hit");
      return Ok(entry);
    }

    tracing::debug!(route, kind = %kind, "asset cache miss");
    let entry = self.build_entry(route, kind, files)?;
    Ok(self.cache.insert(route, entry))
  }

  /// Render `route`, returning the markup when `html_only` is set and the cache entry otherwise.
  pub fn render(
    &self,
    route: &str,
    kind: &AssetType,
    files: &[String],
    html_only: bool,
  ) -> Result<Rendered> {
    let entry = self.entry(route, kind, files)?;
    Ok(if html_only {
      Rendered::Html(entry.html.clone())
    } else {
      Rendered::Entry(entry)
    })
  }

  fn build_entry(&self, route: &str, kind: &AssetType, files: &[String]) -> Result<CacheEntry> {
    let files = expand_wildcards(&self.public_root, files, Some(kind))?;
    let full_html: String = files.iter().map(|file| build_tag(file, kind)).collect();

    let (combined_file, html) = if self.config.enabled {
      let combined = match self.config.version_suffix() {
        Some(suffix) => format!("{route}{suffix}"),
        None => route.to_string(),
      };
      let html = build_tag(&combined, kind);
      (combined, html)
    } else {
      (route.to_string(), full_html.clone())
    };

    Ok(CacheEntry {
      route: route.to_string(),
      version_parameter: self.config.version_parameter.clone(),
      version: self.config.version.clone(),
      files,
      combined_file,
      full_html,
      html,
    })
  }
}
