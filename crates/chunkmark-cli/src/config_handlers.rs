//! Handler functions for config CLI commands.
//!
//! Implements the `path`, `get` and `init` subcommands over
//! [`ChunkmarkConfig`], plus the TOML dotted-key helpers they use.

use crate::cli::ConfigAction;
use crate::config::ChunkmarkConfig;
use chunkmark_core::{Error, Result};
use std::path::PathBuf;

// ============================================================================
// Command dispatch
// ============================================================================

/// Handle a config subcommand.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Get { key } => cmd_config_get(config_path, &key),
        ConfigAction::Init { file, force } => cmd_config_init(file.as_deref(), force),
    }
}

// ============================================================================
// Command handlers
// ============================================================================

/// Show the resolved config file path.
pub fn cmd_config_path(config_path: Option<&str>) -> Result<()> {
    match ChunkmarkConfig::resolve_config_path(config_path) {
        Some(path) => {
            println!("{}", path.display());
            if !path.exists() {
                eprintln!("(file does not exist; run `chunkmark config init` to create it)");
            }
            Ok(())
        }
        None => Err(Error::config(
            "Could not determine config directory for this platform",
        )),
    }
}

/// Get a configuration value by dotted key.
pub fn cmd_config_get(config_path: Option<&str>, key: &str) -> Result<()> {
    let config = ChunkmarkConfig::load(config_path)?;
    println!("{}", lookup_config_value(&config, key)?);
    Ok(())
}

/// Look up a dotted key in a loaded config and format it for display.
pub fn lookup_config_value(config: &ChunkmarkConfig, key: &str) -> Result<String> {
    let value = toml::Value::try_from(config).map_err(|e| Error::config(e.to_string()))?;
    get_nested_value(&value, key)
        .map(format_toml_value)
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))
}

/// Create a default configuration file.
pub fn cmd_config_init(file: Option<&str>, force: bool) -> Result<()> {
    let path = write_default_config(file, force)?;
    println!("Config file created at {}", path.display());
    Ok(())
}

/// Write the default configuration, returning where it went.
pub fn write_default_config(file: Option<&str>, force: bool) -> Result<PathBuf> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => ChunkmarkConfig::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = ChunkmarkConfig::default().to_toml_string()?;
    std::fs::write(&path, &toml_str).map_err(|e| Error::io_with_path(e, &path))?;
    Ok(path)
}

// ============================================================================
// TOML dotted-key helpers
// ============================================================================

/// Navigate a dotted key path in a TOML value tree.
pub fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    let mut current = value;
    for part in key.split('.') {
        current = current.as_table()?.get(part)?;
    }
    Some(current)
}

/// Format a TOML value for display on stdout.
pub fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(_) | toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
