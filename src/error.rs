//! Error types for the tax engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading rate tables and
//! computing contributions or tax.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the tax engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use tax_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/tax.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/tax.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration file has a suffix the loader does not know.
    #[error("Unsupported configuration format '{path}': expected .yaml, .yml or .json")]
    UnsupportedConfigFormat {
        /// The offending path.
        path: String,
    },

    /// A contribution rate table is inconsistent.
    #[error("Invalid rate table '{table}': {message}")]
    InvalidRateTable {
        /// Name of the table (e.g. "medical").
        table: String,
        /// What is wrong with it.
        message: String,
    },

    /// The yearly tax bracket table is malformed.
    #[error("Invalid tax bracket table at bracket {index}: {message}")]
    InvalidBracketTable {
        /// Zero-based position of the offending bracket.
        index: usize,
        /// What is wrong with it.
        message: String,
    },

    /// A personal or salary input was invalid.
    #[error("Invalid personal info field '{field}': {message}")]
    InvalidPersonalInfo {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The contribution base is below the configured minimum.
    #[error("Base {base} for {category} is below the minimum base {min_base}")]
    BaseBelowMinimum {
        /// The contribution category.
        category: String,
        /// The declared base.
        base: Decimal,
        /// The configured minimum.
        min_base: Decimal,
    },

    /// The contribution rate is outside the configured range.
    #[error("Rate {rate}% for {category} must be between {min_rate}% and {max_rate}%")]
    RateOutOfRange {
        /// The contribution category.
        category: String,
        /// The declared rate.
        rate: Decimal,
        /// The configured minimum rate.
        min_rate: Decimal,
        /// The configured maximum rate.
        max_rate: Decimal,
    },

    /// No bracket covers the cumulative taxable salary.
    #[error("No tax bracket covers cumulative taxable salary {taxable}")]
    NoApplicableBracket {
        /// The cumulative taxable salary that was looked up.
        taxable: Decimal,
    },

    /// A month's amounts are too large to settle.
    #[error("Amounts in month {month} exceed the supported range")]
    AmountOverflow {
        /// The month being settled.
        month: u32,
    },

    /// A salary list contained no months.
    #[error("No monthly salaries were provided")]
    EmptySalaries,

    /// A salary list contained more months than a tax year has.
    #[error("A tax year has at most 12 months, got {count}")]
    TooManyMonths {
        /// The number of months provided.
        count: usize,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/tax.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/tax.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_unsupported_format_mentions_known_suffixes() {
        let error = EngineError::UnsupportedConfigFormat {
            path: "tax.toml".to_string(),
        };
        assert!(error.to_string().contains("tax.toml"));
        assert!(error.to_string().contains(".json"));
    }

    #[test]
    fn test_base_below_minimum_displays_values() {
        let error = EngineError::BaseBelowMinimum {
            category: "accumulation_fund".to_string(),
            base: dec("2000"),
            min_base: dec("2200"),
        };
        assert_eq!(
            error.to_string(),
            "Base 2000 for accumulation_fund is below the minimum base 2200"
        );
    }

    #[test]
    fn test_rate_out_of_range_displays_bounds() {
        let error = EngineError::RateOutOfRange {
            category: "accumulation_fund".to_string(),
            rate: dec("15"),
            min_rate: dec("5"),
            max_rate: dec("12"),
        };
        assert_eq!(
            error.to_string(),
            "Rate 15% for accumulation_fund must be between 5% and 12%"
        );
    }

    #[test]
    fn test_invalid_bracket_table_displays_index() {
        let error = EngineError::InvalidBracketTable {
            index: 2,
            message: "gap after previous bracket".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid tax bracket table at bracket 2: gap after previous bracket"
        );
    }

    #[test]
    fn test_too_many_months_displays_count() {
        let error = EngineError::TooManyMonths { count: 13 };
        assert_eq!(error.to_string(), "A tax year has at most 12 months, got 13");
    }

    #[test]
    fn test_amount_overflow_displays_month() {
        let error = EngineError::AmountOverflow { month: 3 };
        assert_eq!(error.to_string(), "Amounts in month 3 exceed the supported range");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_empty() -> EngineResult<()> {
            Err(EngineError::EmptySalaries)
        }

        fn propagates_error() -> EngineResult<()> {
            returns_empty()?;
            Ok(())
        }

        assert!(matches!(propagates_error(), Err(EngineError::EmptySalaries)));
    }
}
