//! Simple CLI configuration loader for viewroute
//!
//! Implements single-source priority loading with flag overrides:
//! 1. --config file/dir (highest priority)
//! 2. Working directory: ./viewroute.json or ./.viewroute/config.json
//! 3. XDG config: $XDG_CONFIG_HOME/viewroute/config.json
//! 4. Built-in defaults (no files)
//!
//! The base prefix from `--base` / `BASE_URL` always wins over the file.
//! Files use the `RouterOptions` schema directly: `base_url`, `max_history`,
//! `cache_components`, `sensitive` and `strict`, all optional.

use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use viewroute_core::{BasePath, RouterOptions};

/// CLI configuration loader
pub struct CliConfigLoader {
    /// Override config file/directory path
    config_override: Option<PathBuf>,
    /// Base prefix override from flag or environment
    base_override: Option<String>,
    /// Directory searched for project-local config
    working_dir: Option<PathBuf>,
    /// Whether to consult the user config directory
    use_user_config: bool,
}

impl CliConfigLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self {
            config_override: None,
            base_override: None,
            working_dir: None,
            use_user_config: true,
        }
    }

    /// Set config file/directory override
    pub fn with_config_override(mut self, path: PathBuf) -> Self {
        self.config_override = Some(path);
        self
    }

    /// Set base prefix override
    pub fn with_base_override(mut self, base: String) -> Self {
        self.base_override = Some(base);
        self
    }

    /// Search this directory instead of the current one
    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = Some(dir);
        self
    }

    /// Skip the user config directory
    pub fn without_user_config(mut self) -> Self {
        self.use_user_config = false;
        self
    }

    /// Load and resolve configuration
    pub async fn load(&self) -> Result<RouterOptions> {
        // Step 1: Find and load base configuration
        let mut options = if let Some(override_path) = &self.config_override {
            self.load_from_path(override_path).await.with_context(|| {
                format!(
                    "Failed to load config from override path: {}",
                    override_path.display()
                )
            })?
        } else {
            self.search_and_load().await?
        };

        // Step 2: Apply flag overrides
        if let Some(base) = &self.base_override {
            options.base = BasePath::new(base).context("Configuration validation failed")?;
        }

        Ok(options)
    }

    /// Search for config in priority order
    async fn search_and_load(&self) -> Result<RouterOptions> {
        // 1. Working directory
        if let Some(config) = self.try_load_cwd().await? {
            return Ok(config);
        }

        // 2. XDG config directory
        if self.use_user_config {
            if let Some(config) = self.try_load_xdg().await? {
                return Ok(config);
            }
        }

        // 3. Defaults only
        debug!("no config file found, using defaults");
        Ok(RouterOptions::default())
    }

    /// Try loading from the working directory
    async fn try_load_cwd(&self) -> Result<Option<RouterOptions>> {
        let cwd = match &self.working_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };

        for candidate in [
            cwd.join("viewroute.json"),
            cwd.join(".viewroute").join("config.json"),
        ] {
            if candidate.exists() {
                return Ok(Some(self.load_file(&candidate).await?));
            }
        }

        Ok(None)
    }

    /// Try loading from XDG config directory
    async fn try_load_xdg(&self) -> Result<Option<RouterOptions>> {
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("viewroute").join("config.json");
            if config_path.exists() {
                return Ok(Some(self.load_file(&config_path).await?));
            }
        }
        Ok(None)
    }

    /// Load configuration from a specific path (file or directory)
    async fn load_from_path(&self, path: &Path) -> Result<RouterOptions> {
        if path.is_file() {
            self.load_file(path).await
        } else if path.is_dir() {
            let config_file = path.join("config.json");
            if config_file.exists() {
                self.load_file(&config_file).await
            } else {
                Err(anyhow!(
                    "No config.json found in directory: {}",
                    path.display()
                ))
            }
        } else {
            Err(anyhow!("Config path does not exist: {}", path.display()))
        }
    }

    /// Load a single config file
    async fn load_file(&self, path: &Path) -> Result<RouterOptions> {
        debug!(path = %path.display(), "loading config file");
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

impl Default for CliConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
