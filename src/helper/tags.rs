use crate::models::AssetType;

/// Build the HTML tag referencing `route`.
///
/// Unknown types render as an empty string so a typo in a template never breaks rendering.
pub fn build_tag(route: &str, kind: &AssetType) -> String {
  match kind {
    AssetType::Js { .. } => format!(r#"<script type="text/javascript" src="{route}"></script>"#),
    AssetType::Css { .. } => format!(r#"<link href="{route}" rel="stylesheet" media="screen">"#),
    AssetType::Other(_) => String::new(),
  }
}
