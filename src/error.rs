//! Error taxonomy shared by the scanner, the wildcard expander and the helper.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the library.
pub type Result<T> = std::result::Result<T, AssetError>;

/// Failures raised while scanning templates, expanding asset paths or loading configuration.
#[derive(Debug, Error)]
pub enum AssetError {
  /// The argument list of an `assets(...)` tag could not be parsed.
  #[error("malformed assets() tag `{tag}`: {source}")]
  MalformedTagSyntax {
    /// Raw argument text captured from the template.
    tag: String,
    /// Parse error from the last attempt.
    #[source]
    source: serde_json::Error,
  },
  /// A wildcard root directory is missing or unreadable.
  #[error("asset root {} is unavailable", .path.display())]
  AssetRootUnavailable {
    /// Directory that was being listed.
    path: PathBuf,
    /// Underlying I/O failure.
    #[source]
    source: std::io::Error,
  },
  /// A template file could not be read.
  #[error("failed to read template {}", .path.display())]
  TemplateUnreadable {
    /// Template path after resolution.
    path: PathBuf,
    /// Underlying I/O failure.
    #[source]
    source: std::io::Error,
  },
  /// The configured tag pattern is not a valid regular expression.
  #[error("invalid tag pattern `{pattern}`")]
  InvalidTagPattern {
    /// Pattern text as configured.
    pattern: String,
    /// Regex compilation error.
    #[source]
    source: regex::Error,
  },
  /// A bundle route could not be turned into a request matcher.
  #[error("invalid bundle route `{route}`")]
  InvalidRoutePattern {
    /// Route as declared.
    route: String,
    /// Regex compilation error.
    #[source]
    source: regex::Error,
  },
  /// The configuration file could not be read or parsed.
  #[error("failed to load config {}: {message}", .path.display())]
  Config {
    /// Path of the configuration file.
    path: PathBuf,
    /// Description of the failure.
    message: String,
  },
}
