//! Expansion of trailing `/*` entries in asset file lists.

use std::path::Path;

use crate::asset_paths::filters::matches_asset_type;
use crate::asset_paths::listing::list_files_recursively;
use crate::error::Result;
use crate::models::AssetType;

/// Suffix marking a file-list entry as a recursive wildcard.
pub const WILDCARD_SUFFIX: &str = "/*";

/// Expand wildcard entries of `files` against `root`, keeping only files of `kind`.
///
/// Literal entries pass through untouched and in place. A wildcard entry is replaced by
/// the matching regular files below `<root>/<dir>`, each joined as `<dir>/<relative>`.
/// A wildcard root that cannot be listed is an error rather than an empty match.
pub fn expand_wildcards(
  root: &Path,
  files: &[String],
  kind: Option<&AssetType>,
) -> Result<Vec<String>> {
  let mut expanded = Vec::with_capacity(files.len());

  for file in files {
    let Some(dir) = file.strip_suffix(WILDCARD_SUFFIX) else {
      expanded.push(file.clone());
      continue;
    };

    let listing_root = root.join(dir.trim_start_matches('/'));
    let matches = list_files_recursively(&listing_root)?;
    tracing::debug!(
      wildcard = %file,
      root = %listing_root.display(),
      found = matches.len(),
      "expanding asset wildcard"
    );

    expanded.extend(
      matches
        .into_iter()
        .filter(|relative| matches_asset_type(kind, relative))
        .map(|relative| join_relative(dir, &relative)),
    );
  }

  Ok(expanded)
}

fn join_relative(dir: &str, relative: &str) -> String {
  let dir = dir.trim_end_matches('/');
  if dir.is_empty() {
    relative.to_string()
  } else {
    format!("{dir}/{relative}")
  }
}
