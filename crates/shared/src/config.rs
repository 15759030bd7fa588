//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::types::CurrencyCode;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Tax configuration.
    #[serde(default)]
    pub tax: TaxConfig,
    /// Currency configuration.
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Tax configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxConfig {
    /// IGV (VAT) rate as a fraction, e.g. 0.18 for 18%.
    #[serde(default = "default_igv_rate")]
    pub igv_rate: Decimal,
}

fn default_igv_rate() -> Decimal {
    Decimal::new(18, 2)
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            igv_rate: default_igv_rate(),
        }
    }
}

/// Currency configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrencyConfig {
    /// Currency that reports and invoices are expressed in.
    #[serde(default = "default_base_currency")]
    pub base_currency: CurrencyCode,
}

fn default_base_currency() -> CurrencyCode {
    CurrencyCode::PEN
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            base_currency: default_base_currency(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default `tracing` filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "tourdesk=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, lowest precedence first: `config/default`, `config/{RUN_MODE}`,
    /// then `TOURDESK__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or fails validation.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TOURDESK").separator("__"))
            .build()?;

        let app_config: Self = config.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    /// Checks invariants that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Configuration` if the IGV rate is outside `[0, 1)`.
    pub fn validate(&self) -> AppResult<()> {
        let rate = self.tax.igv_rate;
        if rate < Decimal::ZERO || rate >= Decimal::ONE {
            return Err(AppError::Configuration(format!(
                "tax.igv_rate must be in [0, 1), got {rate}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.tax.igv_rate, dec!(0.18));
        assert_eq!(config.currency.base_currency, CurrencyCode::PEN);
        assert_eq!(config.logging.filter, "tourdesk=info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_without_sources_uses_defaults() {
        temp_env::with_vars_unset(
            [
                "TOURDESK__TAX__IGV_RATE",
                "TOURDESK__CURRENCY__BASE_CURRENCY",
                "RUN_MODE",
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.tax.igv_rate, dec!(0.18));
                assert_eq!(config.currency.base_currency, CurrencyCode::PEN);
            },
        );
    }

    #[test]
    fn test_load_reads_environment_overrides() {
        temp_env::with_vars(
            [
                ("TOURDESK__TAX__IGV_RATE", Some("0.10")),
                ("TOURDESK__CURRENCY__BASE_CURRENCY", Some("usd")),
                ("RUN_MODE", None),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.tax.igv_rate, dec!(0.10));
                assert_eq!(config.currency.base_currency, CurrencyCode::USD);
            },
        );
    }

    #[test]
    fn test_load_rejects_out_of_range_rate() {
        temp_env::with_vars(
            [("TOURDESK__TAX__IGV_RATE", Some("1.5")), ("RUN_MODE", None)],
            || {
                let err = AppConfig::load().unwrap_err();
                assert!(matches!(err, AppError::Configuration(_)));
            },
        );
    }

    #[test]
    fn test_validate_rejects_negative_rate() {
        let mut config = AppConfig::default();
        config.tax.igv_rate = dec!(-0.01);
        assert!(config.validate().is_err());
    }
}
