//! Configuration for the Chunkmark CLI.
//!
//! Provides the [`ChunkmarkConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `CHUNKMARK_CONFIG` environment variable
//! 3. XDG default: `~/.config/chunkmark/config.toml`
//! 4. Built-in defaults
//!
//! Values from `CHUNKMARK_<SECTION>_<KEY>` environment variables are laid
//! over whatever the file provides.

use chunkmark_content::{FrontmatterPolicy, RenderOptions};
use chunkmark_core::{Error, Result};
use confyg::{Confygery, env};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment prefix for overrides and the config path variable.
pub const ENV_PREFIX: &str = "CHUNKMARK";

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the Chunkmark CLI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkmarkConfig {
    /// Where documents come from.
    pub input: InputConfig,

    /// Where rendered pages go.
    pub output: OutputConfig,

    /// How documents are rendered.
    pub render: RenderConfig,
}

/// Input configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Default input file or directory when none is given.
    pub path: Option<String>,

    /// Extension of Markdown files found in directories, without the dot.
    pub extension: String,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory.
    pub path: String,

    /// Write a `<stem>.json` section manifest next to each page.
    pub manifest: bool,
}

/// Rendering configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// GitHub-flavored Markdown extensions.
    pub gfm: bool,

    /// Slug headings that have no explicit id.
    pub auto_slug: bool,

    /// `lenient` or `strict` handling of unreadable frontmatter.
    pub frontmatter: FrontmatterPolicy,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: None,
            extension: "md".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "output".to_string(),
            manifest: false,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        let options = RenderOptions::default();
        Self {
            gfm: options.gfm,
            auto_slug: options.auto_slug,
            frontmatter: options.frontmatter,
        }
    }
}

impl From<&RenderConfig> for RenderOptions {
    fn from(config: &RenderConfig) -> Self {
        RenderOptions {
            gfm: config.gfm,
            auto_slug: config.auto_slug,
            frontmatter: config.frontmatter,
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl ChunkmarkConfig {
    /// Load configuration from file, environment, and defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                log::debug!("Loading config from {}", path.display());
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level(ENV_PREFIX);
        env_opts.add_section("input");
        env_opts.add_section("output");
        env_opts.add_section("render");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        Ok(config)
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var(format!("{ENV_PREFIX}_CONFIG")) {
            return Some(PathBuf::from(path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("chunkmark").join("config.toml"))
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Render options for the document processor.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::from(&self.render)
    }
}

// ============================================================================
// Tests
// ============================================================================
