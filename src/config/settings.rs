//! Application configuration loading from config.toml
//!
//! One immutable [`AppConfig`] is built at startup and handed to every
//! pipeline. All sections are optional; missing values fall back to the
//! defaults of each section.

use super::{DocumentConfig, RateTable};
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory rendered orders are written to
    pub output_dir: PathBuf,
    /// Daily rates per designation category
    pub rates: RateTable,
    /// Fixed document text
    pub document: DocumentConfig,
    /// Roster entries seeded on startup
    pub teachers: Vec<TeacherConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("sanctions"),
            rates: RateTable::default(),
            document: DocumentConfig::default(),
            teachers: Vec::new(),
        }
    }
}

/// A roster entry to seed
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TeacherConfig {
    /// Application identifier
    pub app_id: String,
    /// Display name
    pub name: String,
    /// Designation text including the rate keyword
    pub designation: String,
    /// Secondary identity code
    pub nic_pin: String,
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns `Error::Config` if the file cannot be read or is not valid TOML.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Loads the configuration named by `SANCTION_CONFIG`, or `./config.toml`.
///
/// A missing default file is not an error: the built-in defaults are used.
/// A path given explicitly through the environment must exist.
pub fn load_app_configuration() -> Result<AppConfig> {
    if let Ok(path) = std::env::var("SANCTION_CONFIG") {
        return load_config(path);
    }

    if Path::new(DEFAULT_CONFIG_PATH).exists() {
        load_config(DEFAULT_CONFIG_PATH)
    } else {
        info!("No {} found, using built-in defaults.", DEFAULT_CONFIG_PATH);
        Ok(AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::config::UnrecognizedPolicy;
    use std::io::Write;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            output_dir = "out"

            [rates]
            unrecognized = "reject"

            [[rates.tiers]]
            keyword = "LECTURER"
            daily_rate = 1445

            [document]
            signatory_name = "R. K. SHARMA"

            [[teachers]]
            app_id = "2013051618"
            name = "RASHMI SHARMA"
            designation = "LECTURER ENGLISH"
            nic_pin = "81517653"
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.rates.unrecognized, UnrecognizedPolicy::Reject);
        assert_eq!(config.rates.tiers.len(), 1);
        assert_eq!(config.document.signatory_name, "R. K. SHARMA");
        assert_eq!(config.teachers.len(), 1);
        assert_eq!(config.teachers[0].designation, "LECTURER ENGLISH");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.output_dir, PathBuf::from("sanctions"));
        assert_eq!(config.rates, RateTable::default());
        assert!(config.teachers.is_empty());
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "output_dir = \"orders\"").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("orders"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("/nonexistent/config.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "output_dir = [").unwrap();

        let result = load_config(file.path());
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
