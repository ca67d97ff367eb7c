use std::sync::OnceLock;

use regex::Regex;

use crate::error::{AssetError, Result};

/// Pattern matching `assets(...)` tags; the capture holds the raw argument list.
pub const DEFAULT_TAG_PATTERN: &str = r"assets\((.*)\)";

fn default_tag_regex() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| compile(DEFAULT_TAG_PATTERN).expect("invalid assets() tag regex"))
}

fn compile(pattern: &str) -> std::result::Result<Regex, regex::Error> {
  Regex::new(&format!("(?im){pattern}"))
}

/// Compiled tag pattern, applied multiline and case-insensitively.
#[derive(Debug, Clone)]
pub struct TagPattern {
  regex: Regex,
}

impl TagPattern {
  /// Compile a configured pattern, or use the default when none is given.
  pub fn new(pattern: Option<&str>) -> Result<Self> {
    let regex = match pattern {
      None => default_tag_regex().clone(),
      Some(pattern) => compile(pattern).map_err(|source| AssetError::InvalidTagPattern {
        pattern: pattern.to_string(),
        source,
      })?,
    };
    Ok(Self { regex })
  }

  /// Raw argument text of every tag in `source`, in match order.
  ///
  /// Patterns without a capture group yield the whole match.
  pub fn arguments<'s>(&self, source: &'s str) -> impl Iterator<Item = &'s str> {
    self.regex.captures_iter(source).filter_map(|caps| {
      caps
        .get(1)
        .or_else(|| caps.get(0))
        .map(|capture| capture.as_str())
    })
  }
}

impl Default for TagPattern {
  fn default() -> Self {
    Self {
      regex: default_tag_regex().clone(),
    }
  }
}
