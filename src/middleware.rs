//! Registration of bundle groups with the asset-compilation middleware.
//!
//! Groups come from two places: bundles declared under `tags` in configuration, and
//! `assets()` tags found in the configured templates. The middleware that concatenates and
//! serves the files is external and receives the groups through [`BundleMiddleware`].

use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Serialize, Serializer};

use crate::config::AssetsConfig;
use crate::error::{AssetError, Result};
use crate::models::{AssetDeclaration, AssetType};
use crate::project::AssetLayout;
use crate::scanner::{TagPattern, TagScanner};

/// One bundle handed to the middleware.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetGroup {
  /// Matcher for request paths served by this bundle.
  #[serde(serialize_with = "serialize_regex")]
  pub route: Regex,
  /// Directory the files are relative to.
  pub path: PathBuf,
  /// Asset type of the bundle.
  pub data_type: AssetType,
  /// Files concatenated into the bundle, in order.
  pub files: Vec<String>,
}

impl AssetGroup {
  /// Build a group whose matcher accepts any request path containing `route`.
  pub fn new(route: &str, path: PathBuf, data_type: AssetType, files: Vec<String>) -> Result<Self> {
    let pattern = Regex::new(&regex::escape(route)).map_err(|source| {
      AssetError::InvalidRoutePattern {
        route: route.to_string(),
        source,
      }
    })?;

    Ok(Self {
      route: pattern,
      path,
      data_type,
      files,
    })
  }

  /// Returns `true` when the middleware should serve `request_path` from this group.
  pub fn matches(&self, request_path: &str) -> bool {
    self.route.is_match(request_path)
  }
}

fn serialize_regex<S: Serializer>(regex: &Regex, serializer: S) -> std::result::Result<S::Ok, S::Error> {
  serializer.serialize_str(regex.as_str())
}

/// Resolves template references from configuration to files on disk.
pub trait TemplateResolver {
  /// Path of the template named by `template`.
  fn resolve(&self, template: &str) -> PathBuf;
}

/// Resolver for `namespace:relative/path` references below each namespace's views directory.
///
/// References without a registered namespace resolve below the application root's views
/// directory; absolute paths are used as they are.
#[derive(Debug, Clone)]
pub struct ViewsDirResolver<'a> {
  layout: &'a AssetLayout,
}

impl<'a> ViewsDirResolver<'a> {
  /// Resolver over the namespaces registered in `layout`.
  pub fn new(layout: &'a AssetLayout) -> Self {
    Self { layout }
  }
}

impl TemplateResolver for ViewsDirResolver<'_> {
  fn resolve(&self, template: &str) -> PathBuf {
    if Path::new(template).is_absolute() {
      return PathBuf::from(template);
    }

    let (root, relative) = match template.split_once(':') {
      Some((namespace, relative)) => match self.layout.namespaces.get(namespace) {
        Some(root) => (root.as_path(), relative),
        None => (self.layout.app_root.as_path(), relative),
      },
      None => (self.layout.app_root.as_path(), template),
    };

    root
      .join(&self.layout.views_subpath)
      .join(relative.trim_start_matches('/'))
  }
}

/// External middleware that serves combined bundles.
pub trait BundleMiddleware {
  /// Install the bundle groups. Called at most once per registration.
  fn register(&mut self, groups: Vec<AssetGroup>);
}

/// Collect bundle groups from configured tags followed by each template's declarations.
pub fn collect_asset_groups<R: TemplateResolver + ?Sized>(
  config: &AssetsConfig,
  layout: &AssetLayout,
  resolver: &R,
) -> Result<Vec<AssetGroup>> {
  let mut groups = Vec::with_capacity(config.tags.len());

  for tag in &config.tags {
    groups.push(AssetGroup::new(
      &tag.route,
      layout.base_path(tag.path.as_deref()),
      tag.kind.clone(),
      tag.files.clone(),
    )?);
  }

  let scanner = TagScanner::new(
    TagPattern::new(config.tag_pattern.as_deref())?,
    layout.clone(),
  );
  for template in config.template_references() {
    let template_path = resolver.resolve(template);
    for declaration in scanner.scan_template(&template_path)? {
      groups.push(group_from_declaration(layout, declaration)?);
    }
  }

  Ok(groups)
}

fn group_from_declaration(layout: &AssetLayout, declaration: AssetDeclaration) -> Result<AssetGroup> {
  let AssetDeclaration {
    route,
    kind,
    files,
    path,
  } = declaration;
  AssetGroup::new(&route, layout.base_path(path.as_deref()), kind, files)
}

/// Register the bundling middleware when bundling is enabled and at least one group exists.
///
/// Returns the number of groups handed to the middleware.
pub fn register_asset_middleware<R, M>(
  config: &AssetsConfig,
  layout: &AssetLayout,
  resolver: &R,
  middleware: &mut M,
) -> Result<usize>
where
  R: TemplateResolver + ?Sized,
  M: BundleMiddleware + ?Sized,
{
  if !config.enabled {
    tracing::debug!("asset bundling disabled; middleware not registered");
    return Ok(0);
  }

  let groups = collect_asset_groups(config, layout, resolver)?;
  let count = groups.len();
  if count == 0 {
    tracing::debug!("no asset bundles declared; middleware not registered");
    return Ok(0);
  }

  tracing::info!(groups = count, "registering asset bundle middleware");
  middleware.register(groups);
  Ok(count)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::TagConfig;
  use std::fs;
  use tempfile::tempdir;

  #[derive(Default)]
  struct Recorder {
    calls: Vec<Vec<AssetGroup>>,
  }

  impl BundleMiddleware for Recorder {
    fn register(&mut self, groups: Vec<AssetGroup>) {
      self.calls.push(groups);
    }
  }

  fn write_template(layout: &AssetLayout, name: &str, body: &str) {
    let path = layout.app_root.join(&layout.views_subpath).join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
  }

  fn config_tag(route: &str, kind: &str, files: &[&str]) -> TagConfig {
    TagConfig {
      route: route.into(),
      kind: kind.into(),
      path: None,
      files: files.iter().map(|file| file.to_string()).collect(),
    }
  }

  #[test]
  fn route_matcher_escapes_dots_and_slashes() {
    let group = AssetGroup::new("/js/app.js", PathBuf::from("public"), AssetType::JS, Vec::new())
      .unwrap();
    assert!(group.matches("/js/app.js"));
    assert!(group.matches("/js/app.js?v=3"));
    assert!(!group.matches("/js/appxjs"));
  }

  #[test]
  fn resolver_maps_namespaces_to_views_directories() {
    let layout = AssetLayout::new("/srv/app", "/srv/app/public")
      .with_namespace("demo-bundle", "/srv/bundles/demo");
    let resolver = ViewsDirResolver::new(&layout);

    assert_eq!(
      resolver.resolve("demo-bundle:layout.html.twig"),
      PathBuf::from("/srv/bundles/demo/lib/resources/views/layout.html.twig")
    );
    assert_eq!(
      resolver.resolve("layout.html.twig"),
      PathBuf::from("/srv/app/lib/resources/views/layout.html.twig")
    );
    assert_eq!(
      resolver.resolve("/tmp/page.html"),
      PathBuf::from("/tmp/page.html")
    );
  }

  #[test]
  fn collects_config_tags_before_template_tags() {
    let dir = tempdir().unwrap();
    let layout = AssetLayout::new(dir.path(), dir.path().join("public"));
    write_template(
      &layout,
      "layout.html",
      "assets(\"/b.js\", \"js\", [\"b.js\"])\nassets(\"/c.css\", \"css\", [\"c.css\"], {\"path\": \"vendor\"})",
    );

    let config = AssetsConfig {
      enabled: true,
      tags: vec![config_tag("/a.js", "javascript", &["a.js"])],
      templates: vec!["layout.html".into()],
      ..AssetsConfig::default()
    };

    let groups = collect_asset_groups(&config, &layout, &ViewsDirResolver::new(&layout)).unwrap();
    let routes: Vec<&str> = groups.iter().map(|group| group.route.as_str()).collect();
    assert_eq!(routes, vec![r"/a\.js", r"/b\.js", r"/c\.css"]);
    assert_eq!(groups[0].path, dir.path().join("public"));
    assert_eq!(groups[2].path, dir.path().join("vendor"));
    assert_eq!(groups[1].files, vec!["b.js".to_string()]);
  }

  #[test]
  fn honours_configured_tag_pattern() {
    let dir = tempdir().unwrap();
    let layout = AssetLayout::new(dir.path(), dir.path().join("public"));
    write_template(
      &layout,
      "page.html",
      "bundle(\"/x.js\", \"js\", [\"x.js\"])\nassets(\"/y.js\", \"js\", [\"y.js\"])",
    );

    let config = AssetsConfig {
      templates: vec!["page.html".into()],
      tag_pattern: Some(r"bundle\((.*)\)".into()),
      ..AssetsConfig::default()
    };

    let groups = collect_asset_groups(&config, &layout, &ViewsDirResolver::new(&layout)).unwrap();
    assert_eq!(groups.len(), 1);
    assert!(groups[0].matches("/x.js"));
  }

  #[test]
  fn falls_back_to_legacy_template_paths() {
    let dir = tempdir().unwrap();
    let layout = AssetLayout::new(dir.path(), dir.path().join("public"));
    write_template(&layout, "legacy.html", "assets(\"/l.js\", \"js\", [\"l.js\"])");

    let config = AssetsConfig {
      paths: vec!["legacy.html".into()],
      ..AssetsConfig::default()
    };

    let groups = collect_asset_groups(&config, &layout, &ViewsDirResolver::new(&layout)).unwrap();
    assert_eq!(groups.len(), 1);
    assert!(groups[0].matches("/l.js"));
  }

  #[test]
  fn skips_registration_when_disabled() {
    let dir = tempdir().unwrap();
    let layout = AssetLayout::new(dir.path(), dir.path().join("public"));
    let config = AssetsConfig {
      tags: vec![config_tag("/a.js", "js", &["a.js"])],
      ..AssetsConfig::default()
    };

    let mut recorder = Recorder::default();
    let count =
      register_asset_middleware(&config, &layout, &ViewsDirResolver::new(&layout), &mut recorder)
        .unwrap();
    assert_eq!(count, 0);
    assert!(recorder.calls.is_empty());
  }

  #[test]
  fn skips_registration_without_groups() {
    let dir = tempdir().unwrap();
    let layout = AssetLayout::new(dir.path(), dir.path().join("public"));
    let config = AssetsConfig {
      enabled: true,
      ..AssetsConfig::default()
    };

    let mut recorder = Recorder::default();
    let count =
      register_asset_middleware(&config, &layout, &ViewsDirResolver::new(&layout), &mut recorder)
        .unwrap();
    assert_eq!(count, 0);
    assert!(recorder.calls.is_empty());
  }

  #[test]
  fn registers_all_groups_once() {
    let dir = tempdir().unwrap();
    let layout = AssetLayout::new(dir.path(), dir.path().join("public"));
    let config = AssetsConfig {
      enabled: true,
      tags: vec![
        config_tag("/a.js", "js", &["a.js"]),
        config_tag("/a.css", "css", &["a.css"]),
      ],
      ..AssetsConfig::default()
    };

    let mut recorder = Recorder::default();
    let count =
      register_asset_middleware(&config, &layout, &ViewsDirResolver::new(&layout), &mut recorder)
        .unwrap();
    assert_eq!(count, 2);
    assert_eq!(recorder.calls.len(), 1);
    assert!(recorder.calls[0][1].data_type.is_css());
  }

  #[test]
  fn missing_template_fails_registration() {
    let dir = tempdir().unwrap();
    let layout = AssetLayout::new(dir.path(), dir.path().join("public"));
    let config = AssetsConfig {
      enabled: true,
      templates: vec!["missing.html".into()],
      ..AssetsConfig::default()
    };

    let mut recorder = Recorder::default();
    let err =
      register_asset_middleware(&config, &layout, &ViewsDirResolver::new(&layout), &mut recorder)
        .unwrap_err();
    assert!(matches!(err, AssetError::TemplateUnreadable { .. }));
  }
}
