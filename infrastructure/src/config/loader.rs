//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order
const PROJECT_FILES: [&str; 2] = ["tavily.toml", ".tavily.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Conventional variable holding the provider key
    pub const API_KEY_ENV: &'static str = "TAVILY_API_KEY";

    /// Prefix for nested overrides, e.g. `TAVILY_TOOL_SEARCH__TIMEOUT_SECONDS=30`
    pub const ENV_PREFIX: &'static str = "TAVILY_TOOL_";

    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./tavily.toml` or `./.tavily.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/tavily-tool/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let global = Self::global_config_path();
        let project = Self::project_config_path();
        let figment = Self::file_figment(
            global.as_deref(),
            project.as_deref(),
            config_path.map(PathBuf::as_path),
        );
        Self::with_env(figment).extract().map_err(Box::new)
    }

    /// Load defaults plus environment only (for --no-config)
    pub fn load_defaults() -> Result<FileConfig, Box<figment::Error>> {
        Self::with_env(Self::file_figment(None, None, None))
            .extract()
            .map_err(Box::new)
    }

    /// Defaults merged with whichever of the given files exist
    fn file_figment(global: Option<&Path>, project: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        for path in [global, project, explicit].into_iter().flatten() {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        figment
    }

    fn with_env(figment: Figment) -> Figment {
        figment
            .merge(Env::prefixed(Self::ENV_PREFIX).split("__"))
            .merge(
                Env::raw()
                    .only(&[Self::API_KEY_ENV])
                    .map(|_| "tavily.api_key".into()),
            )
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/tavily-tool/config.toml if set,
    /// otherwise falls back to ~/.config/tavily-tool/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("tavily-tool").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");

        let api_key_set = std::env::var_os(Self::API_KEY_ENV).is_some();
        println!(
            "  [{}] Env:     {} / {}*",
            if api_key_set { "FOUND" } else { "     " },
            Self::API_KEY_ENV,
            Self::ENV_PREFIX
        );

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./tavily.toml or ./.tavily.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}
