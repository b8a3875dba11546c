//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for reading rate
//! configurations and personal salary files from YAML or JSON.

use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::TaxConfig;

/// The serialization format of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.yaml` or `.yml`
    Yaml,
    /// `.json`
    Json,
}

impl ConfigFormat {
    /// Picks the format from the file suffix, case-insensitively.
    ///
    /// # Example
    ///
    /// ```
    /// use tax_engine::config::ConfigFormat;
    ///
    /// assert_eq!(ConfigFormat::from_path("tax.YML".as_ref()), Some(ConfigFormat::Yaml));
    /// assert_eq!(ConfigFormat::from_path("tax.toml".as_ref()), None);
    /// ```
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Reads configuration files into typed structs.
///
/// The same loader serves the global rate file (`tax.yaml`) and the
/// personal files passed to each command (`personal.yaml`, `salaries.yaml`,
/// `year.yaml`). Files ending in `.json` are read as JSON.
///
/// # Example
///
/// ```no_run
/// use tax_engine::config::ConfigLoader;
/// use tax_engine::models::PersonalInfo;
///
/// let config = ConfigLoader::load_tax_config("./config/tax.yaml")?;
/// let info: PersonalInfo = ConfigLoader::load_file("./config/personal.yaml")?;
/// # Ok::<(), tax_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads and validates the global rate configuration.
    ///
    /// Returns an error if the file is missing, cannot be parsed, or any of
    /// its tables is inconsistent (see [`TaxConfig::validate`]).
    pub fn load_tax_config<P: AsRef<Path>>(path: P) -> EngineResult<TaxConfig> {
        let config: TaxConfig = Self::load_file(path)?;
        config.validate()?;
        debug!(
            brackets = config.year_tax_rates.brackets().len(),
            "Loaded tax configuration"
        );
        Ok(config)
    }

    /// Loads any deserializable type from a YAML or JSON file.
    pub fn load_file<T, P>(path: P) -> EngineResult<T>
    where
        T: DeserializeOwned,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let format =
            ConfigFormat::from_path(path).ok_or_else(|| EngineError::UnsupportedConfigFormat {
                path: path_str.clone(),
            })?;

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        debug!(path = %path_str, ?format, "Reading configuration file");
        Self::parse(&content, format, &path_str)
    }

    /// Parses already-read content; `origin` names the source in errors.
    pub fn parse<T: DeserializeOwned>(
        content: &str,
        format: ConfigFormat,
        origin: &str,
    ) -> EngineResult<T> {
        let parsed = match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            ConfigFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        };

        parsed.map_err(|message| EngineError::ConfigParseError {
            path: origin.to_string(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EndowmentType, PersonalInfo, ResidenceType};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/tax.yaml"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load_tax_config(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let config = result.unwrap();
        assert_eq!(config.accumulation_fund.min_base, dec("2200"));
        assert_eq!(config.accumulation_fund.max_base, dec("27786"));
        assert_eq!(config.year_tax_rates.brackets().len(), 7);
    }

    #[test]
    fn test_insurance_tables_loaded_correctly() {
        let config = ConfigLoader::load_tax_config(config_path()).unwrap();

        assert_eq!(config.insurances.workers_endowment.company_rate, dec("16"));
        assert_eq!(config.insurances.workers_endowment.private_rate, dec("8"));
        assert_eq!(config.insurances.serious_medical.extra_payment, dec("3"));
        assert_eq!(
            config.insurances.agricultural_unemployment.private_rate,
            Decimal::ZERO
        );
    }

    #[test]
    fn test_json_and_yaml_configurations_match() {
        let yaml = ConfigLoader::load_tax_config(config_path()).unwrap();
        let json = ConfigLoader::load_tax_config("./config/tax.json").unwrap();
        assert_eq!(yaml, json);
    }

    #[test]
    fn test_load_personal_info() {
        let info: PersonalInfo = ConfigLoader::load_file("./config/personal.yaml").unwrap();
        assert_eq!(info.residence, ResidenceType::NonAgricultural);
        assert_eq!(info.endowment, EndowmentType::Workers);
        assert_eq!(info.salary.salary, dec("20000"));
        assert_eq!(info.salary.accumulation_fund_rate, dec("12"));
    }

    #[test]
    fn test_parse_personal_info_with_numeric_flags() {
        let content = "residence: 1\nendowment: 1\nsalary: 8000\n";
        let info: PersonalInfo =
            ConfigLoader::parse(content, ConfigFormat::Yaml, "personal.yaml").unwrap();

        assert_eq!(info.residence, ResidenceType::Agricultural);
        assert_eq!(info.endowment, EndowmentType::Office);
        assert_eq!(info.salary.salary, dec("8000"));
    }

    #[test]
    fn test_load_missing_file_returns_error() {
        let result = ConfigLoader::load_tax_config("/nonexistent/tax.yaml");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("tax.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_suffix_returns_error() {
        let result = ConfigLoader::load_tax_config("./config/tax.toml");
        assert!(matches!(
            result,
            Err(EngineError::UnsupportedConfigFormat { .. })
        ));
    }

    #[test]
    fn test_parse_error_names_origin() {
        let result: EngineResult<TaxConfig> =
            ConfigLoader::parse("accumulation_fund: [", ConfigFormat::Yaml, "inline.yaml");

        match result {
            Err(EngineError::ConfigParseError { path, .. }) => assert_eq!(path, "inline.yaml"),
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("a/b/salaries.yaml")),
            Some(ConfigFormat::Yaml)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("personal.json")),
            Some(ConfigFormat::Json)
        );
        assert_eq!(ConfigFormat::from_path(Path::new("personal")), None);
    }
}
