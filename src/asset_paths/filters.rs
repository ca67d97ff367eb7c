use crate::models::AssetType;

/// Decide whether a wildcard match belongs in the file list of a declaration.
///
/// An unset type keeps every file. `js`/`javascript` keep `.js` files and
/// `css`/`stylesheet` keep `.css` files; any other type keeps nothing.
pub fn matches_asset_type(kind: Option<&AssetType>, relative_path: &str) -> bool {
  match kind {
    None => true,
    Some(kind) => kind
      .extension()
      .is_some_and(|extension| relative_path.ends_with(extension)),
  }
}
