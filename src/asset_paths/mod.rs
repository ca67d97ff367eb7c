//! Helpers for resolving asset file lists against the public asset root.
//!
//! Listing, type filtering and wildcard expansion live in separate submodules so each can
//! be tested on its own. The same expansion is shared by template scanning and the
//! render-time helper.

mod filters;
mod listing;
mod wildcard;

pub use filters::matches_asset_type;
pub use listing::list_files_recursively;
pub use wildcard::{WILDCARD_SUFFIX, expand_wildcards};
