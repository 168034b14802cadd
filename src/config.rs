use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::engine::{EngineConfig, DEFAULT_MAX_CACHING_LENGTH, DEFAULT_MIN_LENGTH};

const SAMPLE_CONFIG: &str = include_str!("../config.sample.toml");

const DEFAULT_LIMIT: usize = 10;
const DEFAULT_SEPARATOR: &str = "|";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Validation(String),
}

/// Application configuration. Zero and empty values mean "unset" and resolve
/// to the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineSection,
    #[serde(default)]
    pub query: QuerySection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineSection {
    #[serde(default)]
    pub min_length: usize,
    #[serde(default)]
    pub max_caching_length: usize,
    #[serde(default)]
    pub cache_byte_limit: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuerySection {
    #[serde(default)]
    pub limit: usize,
    #[serde(default)]
    pub separator: String,
    #[serde(default)]
    pub rtl: bool,
}

impl Config {
    /// Engine tunables with defaults applied.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            min_length: or_default(self.engine.min_length, DEFAULT_MIN_LENGTH),
            max_caching_length: or_default(
                self.engine.max_caching_length,
                DEFAULT_MAX_CACHING_LENGTH,
            ),
            cache_byte_limit: self.engine.cache_byte_limit,
        }
    }

    pub fn limit(&self) -> usize {
        or_default(self.query.limit, DEFAULT_LIMIT)
    }

    pub fn separator(&self) -> &str {
        if self.query.separator.is_empty() {
            DEFAULT_SEPARATOR
        } else {
            &self.query.separator
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let cfg = self.engine_config();
        if cfg.min_length > cfg.max_caching_length {
            return Err(ConfigError::Validation(format!(
                "engine.min_length ({}) cannot exceed engine.max_caching_length ({})",
                cfg.min_length, cfg.max_caching_length
            )));
        }
        Ok(())
    }
}

fn or_default(v: usize, default: usize) -> usize {
    if v == 0 {
        default
    } else {
        v
    }
}

/// Load and merge one or more config files, in order. With no files, the
/// defaults are used.
pub fn load_all(paths: &[PathBuf]) -> Result<Config, ConfigError> {
    let mut config = Config::default();

    for path in paths {
        log::info!("loading config: {}", path.display());
        merge(&mut config, read_file(path)?);
    }

    config.validate()?;
    Ok(config)
}

/// Parse a config from TOML text.
pub fn parse(s: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(s)?)
}

/// Generate sample config file.
pub fn generate_sample(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::Validation(format!(
            "config file '{}' already exists",
            path.display()
        )));
    }
    std::fs::write(path, SAMPLE_CONFIG)?;
    Ok(())
}

/// Load configuration from a given TOML file.
fn read_file(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

/// Merge the given src config into the dest config struct.
fn merge(dest: &mut Config, src: Config) {
    if src.engine.min_length > 0 {
        dest.engine.min_length = src.engine.min_length;
    }
    if src.engine.max_caching_length > 0 {
        dest.engine.max_caching_length = src.engine.max_caching_length;
    }
    if src.engine.cache_byte_limit > 0 {
        dest.engine.cache_byte_limit = src.engine.cache_byte_limit;
    }

    if src.query.limit > 0 {
        dest.query.limit = src.query.limit;
    }
    if !src.query.separator.is_empty() {
        dest.query.separator = src.query.separator;
    }
    dest.query.rtl = src.query.rtl;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_config() {
        let cfg = parse(SAMPLE_CONFIG).unwrap();
        assert_eq!(cfg.engine_config(), EngineConfig::default());
        assert_eq!(cfg.limit(), 10);
        assert_eq!(cfg.separator(), "|");
        assert!(!cfg.query.rtl);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_defaults_for_unset() {
        let cfg = parse("[query]\nrtl = true\n").unwrap();
        assert_eq!(cfg.engine_config(), EngineConfig::default());
        assert_eq!(cfg.limit(), 10);
        assert_eq!(cfg.separator(), "|");
        assert!(cfg.query.rtl);
    }

    #[test]
    fn test_merge() {
        let mut dest = parse("[engine]\nmin_length = 2\nmax_caching_length = 8\n").unwrap();
        let src = parse("[engine]\nmax_caching_length = 10\n[query]\nseparator = \",\"\n").unwrap();
        merge(&mut dest, src);

        let cfg = dest.engine_config();
        assert_eq!(cfg.min_length, 2);
        assert_eq!(cfg.max_caching_length, 10);
        assert_eq!(dest.separator(), ",");
    }

    #[test]
    fn test_validate() {
        let cfg = parse("[engine]\nmin_length = 7\n").unwrap();
        assert!(matches!(cfg.validate(), Err(ConfigError::Validation(_))));

        let cfg = parse("[engine]\nmin_length = 7\nmax_caching_length = 7\n").unwrap();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(parse("[engine\n"), Err(ConfigError::Toml(_))));
        assert!(matches!(
            parse("[engine]\nmin_length = \"two\"\n"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_load_all_without_files() {
        let cfg = load_all(&[]).unwrap();
        assert_eq!(cfg.engine_config(), EngineConfig::default());
    }

    #[test]
    fn test_load_missing_file() {
        let res = load_all(&[PathBuf::from("/nonexistent/suggestd.toml")]);
        assert!(matches!(res, Err(ConfigError::Io(_))));
    }
}
