//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the [`RenameSettings`]
//! built from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables, `REBRAND__SECTION__KEY`
//! 3. Config file: `--config`, else `.rebrand.toml` in the project dir,
//!    else the user config dir
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use rebrand_core::{
    application::{CommandSpec, IconSettings, RenameSettings},
    domain::{AppId, AppName, IconPlatforms, Identity},
};

use crate::error::{CliError, CliResult};

/// Name of the per-project config file.
pub const LOCAL_CONFIG_FILE: &str = ".rebrand.toml";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// The identity a fresh template ships with.
    pub baseline: BaselineConfig,
    /// Project layout.
    pub project: ProjectConfig,
    /// External tools.
    pub commands: CommandsConfig,
    /// Icon generation.
    pub icons: IconConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineConfig {
    pub app_id: String,
    pub name: String,
    /// Defaults to the snake_case form of `name`.
    pub snake_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub manifest_file: PathBuf,
    pub tool_dir: PathBuf,
    pub scan_targets: Vec<PathBuf>,
    pub excluded: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandsConfig {
    /// Run in order after the rename.
    pub refresh: Vec<CommandSpec>,
    pub icon_generator: CommandSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconConfig {
    pub platforms: IconPlatforms,
    pub notification_destination: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let settings = RenameSettings::default();
        Self {
            baseline: BaselineConfig {
                app_id: settings.baseline.app_id.to_string(),
                name: settings.baseline.app_name.to_string(),
                snake_name: None,
            },
            project: ProjectConfig {
                manifest_file: settings.manifest_file,
                tool_dir: settings.tool_dir,
                scan_targets: settings.scan_targets,
                excluded: settings.excluded,
            },
            commands: CommandsConfig {
                refresh: settings.refresh_commands,
                icon_generator: settings.icons.generator,
            },
            icons: IconConfig {
                platforms: settings.icons.platforms,
                notification_destination: settings.icons.notification_destination,
            },
            output: OutputConfig { no_color: false },
        }
    }
}

impl AppConfig {
    /// Load configuration, layering file and environment over defaults.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&Path>, project_dir: &Path) -> anyhow::Result<Self> {
        let defaults = serde_json::to_string(&Self::default())
            .context("Failed to serialize default configuration")?;
        let mut builder =
            Config::builder().add_source(File::from_str(&defaults, FileFormat::Json));

        match config_file {
            Some(path) => {
                if !path.is_file() {
                    bail!("Config file not found: {}", path.display());
                }
                builder = builder.add_source(File::from(path).format(FileFormat::Toml));
            }
            None => {
                if let Some(path) = Self::discover(project_dir) {
                    tracing::debug!(path = %path.display(), "Using config file");
                    builder = builder.add_source(File::from(path).format(FileFormat::Toml));
                }
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("REBRAND")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to read configuration")?;
        config
            .try_deserialize()
            .context("Invalid configuration values")
    }

    /// First existing implicit config file.
    fn discover(project_dir: &Path) -> Option<PathBuf> {
        let local = project_dir.join(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Some(local);
        }
        Self::config_path().filter(|p| p.is_file())
    }

    /// Path to the user-level configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "rebrand", "rebrand")
            .map(|d| d.config_dir().join("config.toml"))
    }

    /// Build the core settings, validating the baseline identity.
    pub fn to_settings(&self) -> CliResult<RenameSettings> {
        let app_id = AppId::parse(&self.baseline.app_id).map_err(|e| CliError::ConfigError {
            message: format!("baseline.app_id: {e}"),
            source: Some(Box::new(e)),
        })?;
        let app_name = AppName::parse(&self.baseline.name).map_err(|e| CliError::ConfigError {
            message: format!("baseline.name: {e}"),
            source: Some(Box::new(e)),
        })?;
        let mut baseline = Identity::new(app_id, app_name);
        if let Some(snake) = self.baseline.snake_name.as_deref().filter(|s| !s.is_empty()) {
            baseline = baseline.with_snake_name(snake);
        }

        if self.project.manifest_file.as_os_str().is_empty() {
            return Err(CliError::ConfigError {
                message: "project.manifest_file must not be empty".into(),
                source: None,
            });
        }

        Ok(RenameSettings {
            baseline,
            manifest_file: self.project.manifest_file.clone(),
            tool_dir: self.project.tool_dir.clone(),
            scan_targets: self.project.scan_targets.clone(),
            excluded: self.project.excluded.clone(),
            refresh_commands: self.commands.refresh.clone(),
            icons: IconSettings {
                generator: self.commands.icon_generator.clone(),
                platforms: self.icons.platforms,
                notification_destination: self.icons.notification_destination.clone(),
            },
        })
    }
}
