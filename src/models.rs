//! Data structures produced while scanning templates and rendering asset tags.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared asset type of an `assets()` tag or a configured bundle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AssetType {
  /// `js` or `javascript`.
  Js {
    /// Spelling used by the author.
    alias: JsAlias,
  },
  /// `css` or `stylesheet`.
  Css {
    /// Spelling used by the author.
    alias: CssAlias,
  },
  /// Anything else, kept verbatim.
  Other(String),
}

/// Accepted spellings of the JavaScript type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsAlias {
  /// `js`
  Short,
  /// `javascript`
  Long,
}

/// Accepted spellings of the stylesheet type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CssAlias {
  /// `css`
  Short,
  /// `stylesheet`
  Long,
}

impl AssetType {
  /// JavaScript type as spelled `js`.
  pub const JS: AssetType = AssetType::Js {
    alias: JsAlias::Short,
  };
  /// Stylesheet type as spelled `css`.
  pub const CSS: AssetType = AssetType::Css {
    alias: CssAlias::Short,
  };

  /// Classify a type string. Never fails; unknown spellings become [`AssetType::Other`].
  pub fn parse(value: &str) -> Self {
    match value {
      "js" => Self::Js {
        alias: JsAlias::Short,
      },
      "javascript" => Self::Js {
        alias: JsAlias::Long,
      },
      "css" => Self::Css {
        alias: CssAlias::Short,
      },
      "stylesheet" => Self::Css {
        alias: CssAlias::Long,
      },
      other => Self::Other(other.to_string()),
    }
  }

  /// The type as it was written.
  pub fn as_str(&self) -> &str {
    match self {
      Self::Js {
        alias: JsAlias::Short,
      } => "js",
      Self::Js {
        alias: JsAlias::Long,
      } => "javascript",
      Self::Css {
        alias: CssAlias::Short,
      } => "css",
      Self::Css {
        alias: CssAlias::Long,
      } => "stylesheet",
      Self::Other(value) => value,
    }
  }

  /// Returns `true` for `js` and `javascript`.
  pub fn is_js(&self) -> bool {
    matches!(self, Self::Js { .. })
  }

  /// Returns `true` for `css` and `stylesheet`.
  pub fn is_css(&self) -> bool {
    matches!(self, Self::Css { .. })
  }

  /// File extension (with leading dot) a wildcard match must carry for this type.
  pub fn extension(&self) -> Option<&'static str> {
    match self {
      Self::Js { .. } => Some(".js"),
      Self::Css { .. } => Some(".css"),
      Self::Other(_) => None,
    }
  }
}

impl From<String> for AssetType {
  fn from(value: String) -> Self {
    match AssetType::parse(&value) {
      Self::Other(_) => Self::Other(value),
      known => known,
    }
  }
}

impl From<&str> for AssetType {
  fn from(value: &str) -> Self {
    AssetType::parse(value)
  }
}

impl From<AssetType> for String {
  fn from(value: AssetType) -> Self {
    match value {
      AssetType::Other(raw) => raw,
      known => known.as_str().to_string(),
    }
  }
}

impl fmt::Display for AssetType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// One parsed `assets(route, type, files)` occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetDeclaration {
  /// Public route of the bundle; also the render cache key.
  pub route: String,
  /// Declared asset type.
  #[serde(rename = "type")]
  pub kind: AssetType,
  /// File list with wildcard entries already expanded.
  pub files: Vec<String>,
  /// Optional base path overriding the global public root.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub path: Option<String>,
}

/// Memoized render result for one route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
  /// Route the entry is stored under.
  pub route: String,
  /// Query parameter name used for the version suffix.
  pub version_parameter: String,
  /// Version value used for the version suffix.
  pub version: String,
  /// Resolved file list in render order.
  pub files: Vec<String>,
  /// Route of the combined bundle, including the version query when appended.
  pub combined_file: String,
  /// One tag per resolved source file.
  pub full_html: String,
  /// Markup handed back to templates.
  pub html: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_known_aliases() {
    assert!(AssetType::parse("js").is_js());
    assert!(AssetType::parse("javascript").is_js());
    assert!(AssetType::parse("css").is_css());
    assert!(AssetType::parse("stylesheet").is_css());
    assert_eq!(AssetType::parse("JS"), AssetType::Other("JS".into()));
  }

  #[test]
  fn keeps_author_spelling() {
    assert_eq!(AssetType::parse("javascript").as_str(), "javascript");
    assert_eq!(AssetType::parse("stylesheet").to_string(), "stylesheet");
    assert_eq!(AssetType::parse("less").as_str(), "less");
  }

  #[test]
  fn serializes_as_plain_string() {
    let json = serde_json::to_string(&AssetType::CSS).unwrap();
    assert_eq!(json, "\"css\"");
    let parsed: AssetType = serde_json::from_str("\"javascript\"").unwrap();
    assert!(parsed.is_js());
  }
}
