//! TOML configuration for the `wtb` binary.
//!
//! Every key is optional:
//!
//! ```toml
//! [calculator]
//! working_days = "weekly_times_four"   # or { flat = 30 }
//! day_length = "calendar"              # or "working_day"
//!
//! [rates]
//! file = "rates.csv"                   # relative to this file
//! base = "INR"
//!
//! [display]
//! currencies = ["INR", "USD"]
//!
//! [links]
//! label = "LinkedIn"
//! url = "https://www.linkedin.com"
//!
//! [logging]
//! level = "warn"
//! file = "wtb.log"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;
use wtb_core::CurrencyCode;
use wtb_core::calculations::CalculatorConfig;

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "wtb.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub calculator: CalculatorConfig,
    pub rates: RatesConfig,
    pub display: DisplayConfig,
    pub links: LinksConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RatesConfig {
    /// CSV rate table; the built-in table is used when unset.
    pub file: Option<PathBuf>,
    /// Base currency of `file`.
    pub base: Option<CurrencyCode>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub currencies: Vec<CurrencyCode>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinksConfig {
    pub label: String,
    pub url: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            label: "LinkedIn".to_string(),
            url: "https://www.linkedin.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

impl AppConfig {
    /// Parses configuration text. Relative paths are resolved against `base_dir`.
    pub fn from_toml(
        raw: &str,
        base_dir: &Path,
    ) -> Result<Self> {
        let mut config: AppConfig = toml::from_str(raw).context("Parsing configuration TOML")?;
        config.rates.file = config.rates.file.map(|f| base_dir.join(f));
        config.logging.file = config.logging.file.map(|f| base_dir.join(f));
        config
            .calculator
            .validate()
            .context("Invalid [calculator] section")?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Reading config file: {}", path.display()))?;
        let base_dir = path.parent().unwrap_or(Path::new("."));
        Self::from_toml(&raw, base_dir)
            .with_context(|| format!("Loading config file: {}", path.display()))
    }

    /// Loads `path` if given, else `wtb.toml` from the working directory if it
    /// exists, else the defaults.
    pub fn load_with_fallback(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.is_file() {
            debug!(path = %default_path.display(), "using config from working directory");
            return Self::load(default_path);
        }

        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use wtb_core::calculations::{DayLengthPolicy, WorkingDaysPolicy};

    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = AppConfig::from_toml("", Path::new(".")).unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.links.url, "https://www.linkedin.com");
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.rates.file, None);
    }

    #[test]
    fn full_config_parses_every_section() {
        let raw = r#"
            [calculator]
            working_days = { flat = 30 }
            day_length = "working_day"

            [rates]
            file = "rates.csv"
            base = "eur"

            [display]
            currencies = ["EUR", "usd"]

            [links]
            label = "Jobs"
            url = "https://example.com/jobs"

            [logging]
            level = "debug"
            file = "logs/wtb.log"
        "#;

        let config = AppConfig::from_toml(raw, Path::new("/etc/wtb")).unwrap();

        assert_eq!(config.calculator.working_days, WorkingDaysPolicy::Flat(30));
        assert_eq!(config.calculator.day_length, DayLengthPolicy::WorkingDay);
        assert_eq!(config.rates.file, Some(PathBuf::from("/etc/wtb/rates.csv")));
        assert_eq!(config.rates.base, Some(CurrencyCode::parse("EUR").unwrap()));
        assert_eq!(
            config.display.currencies,
            vec![
                CurrencyCode::parse("EUR").unwrap(),
                CurrencyCode::parse("USD").unwrap()
            ]
        );
        assert_eq!(config.links.label, "Jobs");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(
            config.logging.file,
            Some(PathBuf::from("/etc/wtb/logs/wtb.log"))
        );
    }

    #[test]
    fn absolute_paths_are_kept() {
        let raw = r#"
            [rates]
            file = "/opt/rates.csv"
        "#;

        let config = AppConfig::from_toml(raw, Path::new("/etc/wtb")).unwrap();

        assert_eq!(config.rates.file, Some(PathBuf::from("/opt/rates.csv")));
    }

    #[test]
    fn invalid_calculator_policy_is_rejected() {
        let raw = r#"
            [calculator]
            working_days = { flat = 0 }
        "#;

        let err = AppConfig::from_toml(raw, Path::new(".")).unwrap_err();

        assert!(format!("{err:#}").contains("flat working days per month"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let raw = r#"
            [display]
            currency = ["USD"]
        "#;

        assert!(AppConfig::from_toml(raw, Path::new(".")).is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = AppConfig::load(Path::new("/no/such/wtb.toml")).unwrap_err();

        assert!(err.to_string().contains("Reading config file"));
    }
}
