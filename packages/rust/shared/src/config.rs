//! Application configuration for SideNav.
//!
//! User config lives at `~/.sidenav/sidenav.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SidenavError};
use crate::types::DEFAULT_GROUP;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "sidenav.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".sidenav";

// ---------------------------------------------------------------------------
// Config structs (matching sidenav.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Doc registry settings.
    #[serde(default)]
    pub registry: RegistryConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Group queried by traversal commands.
    #[serde(default = "default_group")]
    pub group: String,

    /// Sidebar file loaded when none is given on the command line.
    #[serde(default = "default_sidebar_path")]
    pub sidebar_path: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            group: default_group(),
            sidebar_path: default_sidebar_path(),
        }
    }
}

fn default_group() -> String {
    DEFAULT_GROUP.into()
}
fn default_sidebar_path() -> String {
    "sidebars.json".into()
}

/// `[registry]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Docs directory used to check that every doc id has content.
    /// Unset disables the check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs_dir: Option<String>,

    /// File extensions tried for each doc id, without the dot.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            docs_dir: None,
            extensions: default_extensions(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["md".into(), "mdx".into()]
}

// ---------------------------------------------------------------------------
// Validate config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime configuration for a load/validate run, merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct ValidateConfig {
    /// Sidebar file to load.
    pub sidebar_path: PathBuf,
    /// Group used for traversal queries.
    pub group: String,
    /// Docs directory for the content registry, if any.
    pub docs_dir: Option<PathBuf>,
    /// Extensions tried by the content registry.
    pub extensions: Vec<String>,
}

impl From<&AppConfig> for ValidateConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            sidebar_path: PathBuf::from(&config.defaults.sidebar_path),
            group: config.defaults.group.clone(),
            docs_dir: config.registry.docs_dir.as_ref().map(PathBuf::from),
            extensions: config.registry.extensions.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.sidenav/`).
pub fn config_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| SidenavError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.sidenav/sidenav.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| SidenavError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| SidenavError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    init_config_in(&config_dir()?)
}

/// Write a default config file into `dir`, refusing to replace an existing one.
pub fn init_config_in(dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| SidenavError::io(dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() {
        return Err(SidenavError::config(format!(
            "config file already exists at {}",
            path.display()
        )));
    }

    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| SidenavError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| SidenavError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
