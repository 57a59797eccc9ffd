//! XML configuration support.
//! - Loads settings from config.xml (quick_xml).
//! - $PERM_COPY_CONFIG wins over the OS default path; a missing default file means defaults.
//!
//! Unknown XML elements are rejected so typos surface instead of being ignored.

use anyhow::{Context, Result, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::CONFIG_ENV;
use super::paths::default_config_path;
use super::types::{Config, LogLevel};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
    #[serde(rename = "json")]
    json: Option<bool>,
    #[serde(rename = "strict")]
    strict: Option<bool>,
}

fn xml_to_config(parsed: XmlConfig, path: &Path) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(s) = parsed.log_level.as_deref() {
        let trimmed = s.trim();
        cfg.log_level = trimmed
            .parse::<LogLevel>()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("log_level in '{}'", path.display()))?;
    }
    if let Some(s) = parsed.log_file.as_deref() {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            cfg.log_file = Some(PathBuf::from(trimmed));
        }
    }
    cfg.json = parsed.json.unwrap_or(false);
    cfg.strict = parsed.strict.unwrap_or(false);
    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed, path)
}

/// Resolve and load the effective config file.
///
/// Search order:
///  - $PERM_COPY_CONFIG (must exist)
///  - OS default (`<config_dir>/perm_copy/config.xml`), skipped when absent
pub fn load_config() -> Result<Config> {
    if let Some(p) = env::var_os(CONFIG_ENV) {
        let path = PathBuf::from(p);
        if !path.exists() {
            bail!("{} points to a missing file: {}", CONFIG_ENV, path.display());
        }
        debug!(path = %path.display(), "loading config from {}", CONFIG_ENV);
        return load_config_from_xml_path(&path);
    }
    match default_config_path() {
        Some(path) if path.exists() => {
            debug!(path = %path.display(), "loading config from default path");
            load_config_from_xml_path(&path)
        }
        _ => Ok(Config::default()),
    }
}
