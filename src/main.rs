//! Command-line entry point for inspecting asset declarations and rendered tags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use template_assets::{
  AssetLayout, AssetType, AssetsConfig, AssetsHelper, TagPattern, TagScanner, ViewsDirResolver,
  collect_asset_groups,
};

/// Inspect assets() tags, bundle groups and rendered asset markup.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
  /// Asset configuration file (JSON or YAML); discovered in the root directory when omitted
  #[arg(short = 'C', long, global = true, value_hint = clap::ValueHint::FilePath)]
  config: Option<PathBuf>,

  /// Application root directory
  #[arg(short, long, global = true, default_value = ".", value_hint = clap::ValueHint::DirPath)]
  root: PathBuf,

  /// Public asset root (overrides `publicPath` from the configuration)
  #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
  public: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Print the asset declarations found in templates as JSON
  Scan {
    /// Template files to scan
    #[arg(required = true, value_hint = clap::ValueHint::FilePath)]
    templates: Vec<PathBuf>,
  },

  /// Print the bundle groups the middleware would be registered with
  Groups,

  /// Render the markup for one bundle
  Render {
    /// Public route of the bundle
    route: String,
    /// Asset type (js, javascript, css, stylesheet)
    #[arg(value_name = "TYPE")]
    kind: String,
    /// Files or `dir/*` wildcards making up the bundle
    files: Vec<String>,
    /// Print the whole cache entry instead of the markup
    #[arg(long)]
    entry: bool,
  },
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("template_assets=info")),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let config = load_config(cli.config.as_deref(), &cli.root)?;
  let mut layout = AssetLayout::from_config(&cli.root, &config);
  if let Some(public) = &cli.public {
    layout.public_root = public.clone();
  }

  match cli.command {
    Command::Scan { templates } => {
      let pattern = TagPattern::new(config.tag_pattern.as_deref())?;
      let scanner = TagScanner::new(pattern, layout);
      let mut declarations = Vec::new();
      for template in &templates {
        declarations.extend(
          scanner
            .scan_template(template)
            .with_context(|| format!("failed to scan {}", template.display()))?,
        );
      }
      println!("{}", serde_json::to_string_pretty(&declarations)?);
    }
    Command::Groups => {
      let groups = collect_asset_groups(&config, &layout, &ViewsDirResolver::new(&layout))
        .context("failed to collect asset groups")?;
      println!("{}", serde_json::to_string_pretty(&groups)?);
    }
    Command::Render {
      route,
      kind,
      files,
      entry,
    } => {
      let helper = AssetsHelper::new(config, layout.public_root);
      let kind = AssetType::parse(&kind);
      if entry {
        let entry = helper.entry(&route, &kind, &files)?;
        println!("{}", serde_json::to_string_pretty(entry.as_ref())?);
      } else {
        println!("{}", helper.assets(&route, &kind, &files)?);
      }
    }
  }

  Ok(())
}

fn load_config(path: Option<&Path>, root: &Path) -> Result<AssetsConfig> {
  match path {
    Some(path) => AssetsConfig::from_path(path)
      .with_context(|| format!("failed to load asset configuration from {}", path.display())),
    None => Ok(AssetsConfig::discover(root)),
  }
}
