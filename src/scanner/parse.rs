//! Strict parsing of `assets()` argument lists.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{AssetError, Result};
use crate::models::AssetType;

/// Arguments of one tag before wildcard expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagArguments {
  /// Public route of the bundle.
  pub route: String,
  /// Declared asset type.
  pub kind: AssetType,
  /// File list as written, wildcards included.
  pub files: Vec<String>,
  /// Optional base path override from a trailing `{"path": ...}` object.
  pub path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct TagOptions {
  #[serde(default)]
  path: Option<String>,
}

/// Parse the raw argument text of a tag.
///
/// The text is read as the body of a JSON array. When that fails and the text holds no
/// double quotes, single quotes are swapped for double quotes and parsing is retried.
/// Returns `Ok(None)` for argument lists with fewer than three elements.
pub fn parse_tag_arguments(raw: &str) -> Result<Option<TagArguments>> {
  let text = raw.trim();
  let values = parse_argument_list(text).map_err(|source| AssetError::MalformedTagSyntax {
    tag: text.to_string(),
    source,
  })?;

  if values.len() < 3 {
    return Ok(None);
  }

  let malformed = |source| AssetError::MalformedTagSyntax {
    tag: text.to_string(),
    source,
  };

  let (route, kind, files): (String, AssetType, Vec<String>) =
    serde_json::from_value(Value::Array(values[..3].to_vec())).map_err(malformed)?;

  let options = match values.get(3) {
    Some(value @ Value::Object(_)) => {
      serde_json::from_value::<TagOptions>(value.clone()).map_err(malformed)?
    }
    _ => TagOptions::default(),
  };

  Ok(Some(TagArguments {
    route,
    kind,
    files,
    path: options.path,
  }))
}

fn parse_argument_list(text: &str) -> serde_json::Result<Vec<Value>> {
  match serde_json::from_str(&format!("[{text}]")) {
    Ok(values) => Ok(values),
    Err(err) if text.contains('"') => Err(err),
    Err(_) => serde_json::from_str(&format!("[{}]", text.replace('\'', "\""))),
  }
}
