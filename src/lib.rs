#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![allow(clippy::module_inception)]

pub mod asset_paths;
pub mod config;
pub mod error;
pub mod helper;
pub mod middleware;
pub mod models;
pub mod project;
pub mod scanner;

pub use config::{AssetsConfig, TagConfig};
pub use error::{AssetError, Result};
pub use helper::{AssetsHelper, Rendered, build_tag};
pub use middleware::{
  AssetGroup, BundleMiddleware, TemplateResolver, ViewsDirResolver, collect_asset_groups,
  register_asset_middleware,
};
pub use models::{AssetDeclaration, AssetType, CacheEntry};
pub use project::AssetLayout;
pub use scanner::{TagPattern, TagScanner};
