//! Configuration loading and resolution for the Compass console
//!
//! Resolution priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::warn;

/// Default backend address when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Default file name prefix for exported analysis documents
pub const DEFAULT_EXPORT_PREFIX: &str = "analysis";

/// Environment variable overriding the backend base URL
pub const ENV_BASE_URL: &str = "COMPASS_BASE_URL";

/// Environment variable overriding the export directory
pub const ENV_EXPORT_DIR: &str = "COMPASS_EXPORT_DIR";

/// Resolved console configuration
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Backend base URL, no trailing slash
    pub base_url: String,
    /// Directory receiving exported analysis documents
    pub export_dir: PathBuf,
    /// File name prefix for exported analysis documents
    pub export_prefix: String,
}

/// Raw TOML config file contents (`~/.config/compass/config.toml`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub base_url: Option<String>,
    pub export_dir: Option<String>,
    pub export_prefix: Option<String>,
}

impl TomlConfig {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid TOML config: {}", e)))
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            export_dir: PathBuf::from("."),
            export_prefix: DEFAULT_EXPORT_PREFIX.to_string(),
        }
    }
}

impl ConsoleConfig {
    /// Resolve configuration following the priority order:
    /// CLI argument → environment variable → TOML config file → default.
    pub fn resolve(cli_base_url: Option<&str>, cli_export_dir: Option<&str>) -> Self {
        let toml_config = load_config_file()
            .and_then(|path| std::fs::read_to_string(path).map_err(Error::Io))
            .and_then(|content| TomlConfig::parse(&content))
            .unwrap_or_default();

        let base_url = resolve_value(
            cli_base_url,
            ENV_BASE_URL,
            toml_config.base_url.as_deref(),
            DEFAULT_BASE_URL,
            "base_url",
        );

        let export_dir = resolve_value(
            cli_export_dir,
            ENV_EXPORT_DIR,
            toml_config.export_dir.as_deref(),
            ".",
            "export_dir",
        );

        let export_prefix = toml_config
            .export_prefix
            .unwrap_or_else(|| DEFAULT_EXPORT_PREFIX.to_string());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            export_dir: PathBuf::from(export_dir),
            export_prefix,
        }
    }
}

/// Resolve one value through the CLI → ENV → TOML → default chain.
///
/// Warns when more than one source is set (potential misconfiguration);
/// the highest-priority source wins.
fn resolve_value(
    cli: Option<&str>,
    env_var_name: &str,
    toml_value: Option<&str>,
    default: &str,
    key: &str,
) -> String {
    let env_value = std::env::var(env_var_name).ok();

    let mut sources = Vec::new();
    if cli.is_some() {
        sources.push("command line");
    }
    if env_value.is_some() {
        sources.push("environment");
    }
    if toml_value.is_some() {
        sources.push("TOML");
    }
    if sources.len() > 1 {
        warn!(
            "{} found in multiple sources: {}. Using {} (highest priority).",
            key,
            sources.join(", "),
            sources[0]
        );
    }

    if let Some(value) = cli {
        return value.to_string();
    }
    if let Some(value) = env_value {
        return value;
    }
    if let Some(value) = toml_value {
        return value.to_string();
    }
    default.to_string()
}

/// Get the platform config file path (`<config dir>/compass/config.toml`)
fn load_config_file() -> Result<PathBuf> {
    let path = dirs::config_dir()
        .map(|d| d.join("compass").join("config.toml"))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

    if path.exists() {
        Ok(path)
    } else {
        Err(Error::Config(format!("Config file not found: {:?}", path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_config_parses_all_keys() {
        let config = TomlConfig::parse(
            r#"
            base_url = "http://analysis.internal:9000"
            export_dir = "/tmp/compass-exports"
            export_prefix = "interview"
            "#,
        )
        .unwrap();

        assert_eq!(config.base_url.as_deref(), Some("http://analysis.internal:9000"));
        assert_eq!(config.export_dir.as_deref(), Some("/tmp/compass-exports"));
        assert_eq!(config.export_prefix.as_deref(), Some("interview"));
    }

    #[test]
    fn toml_config_tolerates_empty_file() {
        let config = TomlConfig::parse("").unwrap();
        assert!(config.base_url.is_none());
        assert!(config.export_dir.is_none());
    }

    #[test]
    fn toml_config_rejects_malformed_input() {
        assert!(TomlConfig::parse("base_url = [not toml").is_err());
    }

    #[test]
    fn cli_argument_wins_over_toml() {
        let value = resolve_value(
            Some("http://cli:1"),
            "COMPASS_TEST_UNSET_VAR",
            Some("http://toml:2"),
            DEFAULT_BASE_URL,
            "base_url",
        );
        assert_eq!(value, "http://cli:1");
    }

    #[test]
    fn default_applies_when_no_source_set() {
        let value = resolve_value(
            None,
            "COMPASS_TEST_UNSET_VAR",
            None,
            DEFAULT_BASE_URL,
            "base_url",
        );
        assert_eq!(value, DEFAULT_BASE_URL);
    }

    #[test]
    fn resolve_strips_trailing_slash_from_base_url() {
        // CLI argument outranks every other source, so this stays hermetic
        let config = ConsoleConfig::resolve(Some("http://host:8000/"), None);
        assert_eq!(config.base_url, "http://host:8000");
    }
}
