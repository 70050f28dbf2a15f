//! Configuration file management
//!
//! Loads TOML configuration files and provides mapper settings.
//! Default config path: ~/.config/glyphmap/config.toml

use crate::constants::{
    Codepoint, DEFAULT_CONCURRENCY, DEFAULT_PROBE_SIZE, DEFAULT_RENDER_SIZE, DEFAULT_TOLERANCE,
    PUA_END, PUA_START,
};
use crate::mapper::MatchSettings;
use anyhow::{bail, Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Font file settings
    pub fonts: FontPaths,
    /// Outline matching settings
    pub matching: MatchingConfig,
    /// Batch settings
    pub batch: BatchConfig,
}

/// Font file settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontPaths {
    /// Font with the nonstandard (usually private-use) glyphs
    pub special: String,
    /// Font with standard CJK glyphs
    pub standard: String,
}

/// Outline matching settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Pixel size outlines are compared at
    pub render_size: u32,
    /// Max per-axis point deviation (1/64 pixel at render_size)
    pub tolerance: i64,
    /// Pixel size used to probe bounds and advance
    pub probe_size: u32,
}

/// Batch settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Simultaneous resolutions
    pub concurrency: usize,
    /// First special codepoint (inclusive)
    pub start: Codepoint,
    /// Last special codepoint (inclusive)
    pub end: Codepoint,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            render_size: DEFAULT_RENDER_SIZE,
            tolerance: DEFAULT_TOLERANCE,
            probe_size: DEFAULT_PROBE_SIZE,
        }
    }
}

impl MatchingConfig {
    pub fn to_settings(&self) -> MatchSettings {
        MatchSettings {
            render_size: self.render_size,
            tolerance: self.tolerance,
            probe_size: self.probe_size,
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            start: PUA_START,
            end: PUA_END,
        }
    }
}

/// Template written by `--init-config`
const CONFIG_TEMPLATE: &str = r#"# glyphmap configuration

[fonts]
# Font with the nonstandard glyphs (file path, ~ is expanded)
special = ""
# Font with standard CJK glyphs
standard = ""

[matching]
# Pixel size outlines are compared at
render_size = 1000
# Max per-axis point deviation in 1/64 pixel units
tolerance = 10
# Pixel size used to probe glyph bounds and advance
probe_size = 12

[batch]
# Simultaneous resolutions
concurrency = 10
# Special codepoint range (inclusive)
start = 0xE000
end = 0xF8FF
"#;

impl Config {
    /// System-wide config path
    const SYSTEM_CONFIG_PATH: &'static str = "/etc/glyphmap/config.toml";

    /// Get the path that would be used for loading config
    /// Returns None if using built-in defaults
    pub fn config_path() -> Option<PathBuf> {
        // 1. GLYPHMAP_CONFIG environment variable
        if let Ok(path) = std::env::var("GLYPHMAP_CONFIG") {
            let p = Path::new(&path);
            if p.exists() {
                return Some(p.to_path_buf());
            }
        }

        // 2. User config: ~/.config/glyphmap/config.toml
        if let Some(config_path) = default_config_path() {
            if config_path.exists() {
                return Some(config_path);
            }
        }

        // 3. System config: /etc/glyphmap/config.toml
        let system_config = Path::new(Self::SYSTEM_CONFIG_PATH);
        if system_config.exists() {
            return Some(system_config.to_path_buf());
        }

        None
    }

    /// Load configuration with priority:
    /// 1. GLYPHMAP_CONFIG environment variable
    /// 2. ~/.config/glyphmap/config.toml (user config)
    /// 3. /etc/glyphmap/config.toml (system config)
    /// 4. Built-in defaults
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            match Self::load_from_file(&path) {
                Ok(config) => {
                    info!("Loaded config: {}", path.display());
                    return config;
                }
                Err(e) => {
                    warn!("Failed to load config {}: {:#}", path.display(), e);
                }
            }
        }
        info!("Using built-in default config");
        Self::default()
    }

    /// Load settings from specified path
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Write the commented template to the user config path
    pub fn write_default_config(force: bool) -> Result<PathBuf> {
        let Some(config_path) = default_config_path() else {
            bail!("Could not determine config directory");
        };
        if config_path.exists() && !force {
            bail!(
                "Config file already exists: {} (use --init-config=force)",
                config_path.display()
            );
        }
        if let Some(dir) = config_path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        std::fs::write(&config_path, CONFIG_TEMPLATE)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        Ok(config_path)
    }
}

/// Get default config file path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("glyphmap").join("config.toml"))
}

/// Expand leading `~` to the home directory
pub fn expand_path(path: &str) -> PathBuf {
    if !path.starts_with('~') {
        return PathBuf::from(path);
    }

    match dirs::home_dir() {
        Some(home) if path == "~" => home,
        Some(home) => home.join(path[1..].trim_start_matches('/')),
        None => PathBuf::from(path),
    }
}
