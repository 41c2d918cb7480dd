//! Configuration management utilities.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));
static WORKSPACE_CONFIG_PATH: &str = ".ringmark/config.toml";

/// Layered configuration loaded from defaults, user, workspace, and env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub store: Store,
    #[serde(default)]
    pub display: Display,
}

/// Where the bookmark file lives relative to the workspace root.
///
/// Unset fields fall through to earlier layers, then to the built-in values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Store {
    #[serde(default)]
    directory: Option<String>,
    #[serde(default)]
    file: Option<String>,
}

impl Store {
    fn default_directory() -> &'static str {
        ".vscode"
    }

    fn default_file() -> &'static str {
        "bookmarks.json"
    }

    pub fn directory(&self) -> &str {
        self.directory
            .as_deref()
            .unwrap_or(Self::default_directory())
    }

    pub fn file(&self) -> &str {
        self.file.as_deref().unwrap_or(Self::default_file())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Display {
    /// Show the full path in picker descriptions rather than just the line.
    #[serde(default)]
    full_path: Option<bool>,
}

impl Display {
    pub fn full_path(&self) -> bool {
        self.full_path.unwrap_or(true)
    }
}

/// Environment overrides for the store location.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    store_dir: Option<String>,
    store_file: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            store_dir: env::var("RINGMARK_STORE_DIR").ok(),
            store_file: env::var("RINGMARK_STORE_FILE").ok(),
        }
    }

    #[cfg(test)]
    fn for_tests(store_dir: &str, store_file: &str) -> Self {
        Self {
            store_dir: Some(store_dir.to_owned()),
            store_file: Some(store_file.to_owned()),
        }
    }
}

impl Config {
    /// Load configuration for the workspace at `root`.
    pub fn load(root: &Path) -> Result<Self> {
        let env = EnvOverrides::from_env();
        let global = global_config_path();
        let workspace = Some(root.join(WORKSPACE_CONFIG_PATH));
        Self::load_with_layers(global, workspace, env)
    }

    fn load_with_layers(
        global: Option<PathBuf>,
        workspace: Option<PathBuf>,
        env_overrides: EnvOverrides,
    ) -> Result<Self> {
        let mut layers: Vec<Config> = Vec::new();

        layers.push(Self::from_str(&DEFAULT_CONFIG)?);

        if let Some(global_path) = global.filter(|path| path.exists()) {
            tracing::debug!(path = %global_path.display(), "loading global config");
            layers.push(Self::from_file(&global_path)?);
        }

        if let Some(workspace_path) = workspace.filter(|path| path.exists()) {
            tracing::debug!(path = %workspace_path.display(), "loading workspace config");
            layers.push(Self::from_file(&workspace_path)?);
        }

        let merged = layers.into_iter().reduce(Config::merge).unwrap_or_default();
        Ok(apply_env_overrides(merged, env_overrides))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data)
            .with_context(|| format!("invalid config file: {}", path.display()))
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            store: merge_store(self.store, other.store),
            display: merge_display(self.display, other.display),
        }
    }
}

fn merge_store(mut base: Store, overlay: Store) -> Store {
    if let Some(value) = overlay.directory {
        base.directory = Some(value);
    }
    if let Some(value) = overlay.file {
        base.file = Some(value);
    }
    base
}

fn merge_display(mut base: Display, overlay: Display) -> Display {
    if let Some(value) = overlay.full_path {
        base.full_path = Some(value);
    }
    base
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("ringmark/config.toml"))
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Config {
    if let Some(dir) = env.store_dir.filter(|value| !value.is_empty()) {
        config.store.directory = Some(dir);
    }
    if let Some(file) = env.store_file.filter(|value| !value.is_empty()) {
        config.store.file = Some(file);
    }
    config
}
