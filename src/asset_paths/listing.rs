//! Recursive directory listing used by wildcard expansion.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AssetError, Result};

/// List every regular file below `dir`, returning paths relative to it with forward slashes.
///
/// Entries of each directory are visited in file-name order and subdirectories are walked
/// depth-first where they sort, so the result does not depend on the platform's native
/// listing order. Failing to read any directory aborts the listing.
pub fn list_files_recursively(dir: &Path) -> Result<Vec<String>> {
  let mut files = Vec::new();
  collect_files(dir, Path::new(""), &mut files)?;
  Ok(files)
}

fn collect_files(dir: &Path, relative_root: &Path, files: &mut Vec<String>) -> Result<()> {
  let unavailable = |source| AssetError::AssetRootUnavailable {
    path: dir.to_path_buf(),
    source,
  };

  let mut entries = fs::read_dir(dir)
    .map_err(unavailable)?
    .collect::<std::io::Result<Vec<_>>>()
    .map_err(unavailable)?;
  entries.sort_by_key(|entry| entry.file_name());

  for entry in entries {
    let file_name = entry.file_name();
    let next_relative = if relative_root.as_os_str().is_empty() {
      PathBuf::from(&file_name)
    } else {
      relative_root.join(&file_name)
    };

    let path = entry.path();
    let file_type = entry.file_type().map_err(|source| AssetError::AssetRootUnavailable {
      path: path.clone(),
      source,
    })?;

    // Symlinks are followed; dangling ones are neither files nor directories.
    let (is_dir, is_file) = if file_type.is_symlink() {
      match fs::metadata(&path) {
        Ok(metadata) => (metadata.is_dir(), metadata.is_file()),
        Err(err) => {
          tracing::debug!(link = %path.display(), "skipping dangling symlink: {err}");
          continue;
        }
      }
    } else {
      (file_type.is_dir(), file_type.is_file())
    };

    if is_dir {
      collect_files(&path, &next_relative, files)?;
    } else if is_file {
      files.push(next_relative.to_string_lossy().replace('\\', "/"));
    }
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn lists_nested_files_in_name_order() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("b/inner")).unwrap();
    fs::write(root.join("c.js"), "").unwrap();
    fs::write(root.join("a.js"), "").unwrap();
    fs::write(root.join("b/inner/d.js"), "").unwrap();
    fs::write(root.join("b/e.css"), "").unwrap();

    let files = list_files_recursively(root).unwrap();
    assert_eq!(files, vec!["a.js", "b/e.css", "b/inner/d.js", "c.js"]);
  }

  #[test]
  fn skips_empty_directories() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("empty/deeper")).unwrap();
    assert!(list_files_recursively(dir.path()).unwrap().is_empty());
  }

  #[cfg(unix)]
  #[test]
  fn skips_dangling_symlinks() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("app.js"), "").unwrap();
    fs::create_dir_all(root.join("shared")).unwrap();
    fs::write(root.join("shared/util.js"), "").unwrap();
    std::os::unix::fs::symlink(root.join("missing.txt"), root.join("notes.txt")).unwrap();
    std::os::unix::fs::symlink(root.join("shared"), root.join("linked")).unwrap();

    let files = list_files_recursively(root).unwrap();
    assert_eq!(files, vec!["app.js", "linked/util.js", "shared/util.js"]);
  }

  #[test]
  fn missing_directory_is_an_error() {
    let dir = tempdir().unwrap();
    let err = list_files_recursively(&dir.path().join("missing")).unwrap_err();
    assert!(matches!(err, AssetError::AssetRootUnavailable { .. }));
  }
}
