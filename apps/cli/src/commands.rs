//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use serde::Serialize;
use sidenav_core::{
    DirRegistry, DocRegistry, ValidatedTree, breadcrumb, flatten_group, load_sidebar, neighbors,
};
use sidenav_shared::{
    AppConfig, SidenavError, ValidateConfig, init_config, load_config, load_config_from,
};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// SideNav: validate and navigate documentation sidebars.
#[derive(Parser)]
#[command(
    name = "sidenav",
    version,
    about = "Validate documentation sidebar trees and derive next/previous links and breadcrumbs.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.sidenav/sidenav.toml.
    #[arg(long, global = true, env = "SIDENAV_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Where the sidebar comes from and how doc ids are checked.
#[derive(Args, Debug, Default)]
pub(crate) struct SourceArgs {
    /// Sidebar file (.json or .toml). Defaults to `defaults.sidebar_path`.
    #[arg(short, long)]
    pub sidebar: Option<PathBuf>,

    /// Docs directory; every doc id must have a file here.
    #[arg(long)]
    pub docs_dir: Option<PathBuf>,

    /// Extensions tried in the docs directory (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub ext: Vec<String>,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Validate a sidebar and report every violation.
    Check {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Print the documents of a group in navigation order.
    Flatten {
        #[command(flatten)]
        source: SourceArgs,

        /// Group to flatten (defaults to `defaults.group`).
        #[arg(short, long)]
        group: Option<String>,

        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Print the category trail leading to a document.
    Breadcrumb {
        /// Document id.
        doc_id: String,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Print the previous and next documents of a document.
    Neighbors {
        /// Document id.
        doc_id: String,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "sidenav=info",
        1 => "sidenav=debug",
        _ => "sidenav=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let app_config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    match cli.command {
        Command::Check { source } => cmd_check(&resolve(&app_config, source)),
        Command::Flatten {
            source,
            group,
            json,
        } => {
            let mut config = resolve(&app_config, source);
            if let Some(group) = group {
                config.group = group;
            }
            cmd_flatten(&config, json)
        }
        Command::Breadcrumb { doc_id, source } => {
            cmd_breadcrumb(&resolve(&app_config, source), &doc_id)
        }
        Command::Neighbors { doc_id, source } => {
            cmd_neighbors(&resolve(&app_config, source), &doc_id)
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(&app_config),
        },
    }
}

/// Merge CLI flags over the config file.
fn resolve(app_config: &AppConfig, source: SourceArgs) -> ValidateConfig {
    let mut config = ValidateConfig::from(app_config);
    if let Some(sidebar) = source.sidebar {
        config.sidebar_path = sidebar;
    }
    if let Some(docs_dir) = source.docs_dir {
        config.docs_dir = Some(docs_dir);
    }
    if !source.ext.is_empty() {
        config.extensions = source.ext;
    }
    config
}

/// Load and validate the configured sidebar.
fn load(config: &ValidateConfig) -> sidenav_shared::Result<ValidatedTree> {
    let registry = config
        .docs_dir
        .as_deref()
        .map(|dir| dir_registry(dir, &config.extensions));

    load_sidebar(
        &config.sidebar_path,
        registry.as_ref().map(|r| r as &dyn DocRegistry),
    )
}

fn dir_registry(dir: &Path, extensions: &[String]) -> DirRegistry {
    DirRegistry::new(dir).with_extensions(extensions)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_check(config: &ValidateConfig) -> Result<()> {
    info!(sidebar = %config.sidebar_path.display(), "checking sidebar");

    match load(config) {
        Ok(tree) => {
            println!();
            println!("  Sidebar is valid.");
            println!("  File:   {}", config.sidebar_path.display());
            println!("  Groups: {}", tree.groups.len());
            println!("  Docs:   {}", tree.doc_count());
            println!();
            Ok(())
        }
        Err(SidenavError::Validation { violations }) => {
            eprintln!();
            for violation in &violations {
                eprintln!("  {}  {}", violation.kind.name(), violation.path);
                eprintln!("      {}", violation.kind);
            }
            eprintln!();
            Err(eyre!(
                "{} has {} violation(s)",
                config.sidebar_path.display(),
                violations.len()
            ))
        }
        Err(e) => Err(e.into()),
    }
}

/// One row of `flatten` output.
#[derive(Debug, Serialize)]
struct FlatEntry<'a> {
    position: usize,
    id: &'a str,
    label: String,
    breadcrumb: Vec<&'a str>,
}

fn cmd_flatten(config: &ValidateConfig, json: bool) -> Result<()> {
    let tree = load(config)?;
    let docs = flatten_group(&tree, &config.group)?;

    let mut entries = Vec::with_capacity(docs.len());
    for (position, doc) in docs.iter().enumerate() {
        entries.push(FlatEntry {
            position,
            id: &doc.id,
            label: doc.label(),
            breadcrumb: breadcrumb(&tree, &doc.id)?,
        });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for entry in &entries {
        let trail = if entry.breadcrumb.is_empty() {
            String::new()
        } else {
            format!("  ({})", entry.breadcrumb.join(" > "))
        };
        println!("{:>4}  {}  {}{trail}", entry.position + 1, entry.id, entry.label);
    }
    Ok(())
}

fn cmd_breadcrumb(config: &ValidateConfig, doc_id: &str) -> Result<()> {
    let tree = load(config)?;
    let trail = breadcrumb(&tree, doc_id)?;
    println!("{}", trail.join(" > "));
    Ok(())
}

fn cmd_neighbors(config: &ValidateConfig, doc_id: &str) -> Result<()> {
    let tree = load(config)?;
    let around = neighbors(&tree, doc_id)?;

    let show = |doc: Option<&sidenav_shared::DocNode>| match doc {
        Some(doc) => format!("{} ({})", doc.label(), doc.id),
        None => "-".to_string(),
    };
    println!("  Previous: {}", show(around.previous));
    println!("  Next:     {}", show(around.next));
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{toml_str}");
    Ok(())
}
