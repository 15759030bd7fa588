//! Subcommands and their handlers.
//!
//! Every handler returns the JSON document to print on stdout.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::Subcommand;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tourdesk_core::billing::{InvoiceAmounts, compute_commission};
use tourdesk_core::currency::CurrencyConverter;
use tourdesk_core::documents::{DocumentType, NationalId, normalize, validate_tax_id};
use tourdesk_core::pricing::resolve_for_service;
use tourdesk_core::tax::TaxCalculator;
use tourdesk_shared::AppConfig;
use tourdesk_shared::types::{CurrencyCode, Money};
use tracing::info;

use crate::input::{load_catalog, load_rates};

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Split an amount into base, IGV and total
    Tax {
        /// Amount to split
        #[arg(long, allow_hyphen_values = true)]
        amount: Decimal,
        /// Currency of the amount
        #[arg(long, default_value = "PEN")]
        currency: CurrencyCode,
        /// The amount already includes IGV
        #[arg(long)]
        includes_tax: bool,
        /// Tax rate override (defaults to the configured IGV rate)
        #[arg(long)]
        rate: Option<Decimal>,
    },

    /// Resolve the seasonal price of a catalog service on a date
    Price {
        /// Catalog JSON file
        #[arg(long)]
        catalog: PathBuf,
        /// Service id or name
        #[arg(long)]
        service: String,
        /// Date to price (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Also convert the price into this currency
        #[arg(long, requires = "rates")]
        to: Option<CurrencyCode>,
        /// Exchange rates JSON file, required with --to
        #[arg(long)]
        rates: Option<PathBuf>,
    },

    /// Convert an amount using the rate in effect on a date
    Convert {
        /// Exchange rates JSON file
        #[arg(long)]
        rates: PathBuf,
        /// Amount to convert
        #[arg(long, allow_hyphen_values = true)]
        amount: Decimal,
        /// Source currency
        #[arg(long)]
        from: CurrencyCode,
        /// Target currency (defaults to the configured base currency)
        #[arg(long)]
        to: Option<CurrencyCode>,
        /// Conversion date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
    },

    /// Identity document helpers
    #[command(subcommand, alias = "doc")]
    Document(DocumentCommands),

    /// Compute a commission on a base amount
    Commission {
        /// Base amount
        #[arg(long, allow_hyphen_values = true)]
        base: Decimal,
        /// Currency of the base amount
        #[arg(long, default_value = "USD")]
        currency: CurrencyCode,
        /// Commission percentage, 0 to 100
        #[arg(long, allow_hyphen_values = true)]
        percentage: Decimal,
    },

    /// Derive or check invoice amounts
    Invoice {
        /// Net subtotal
        #[arg(long, allow_hyphen_values = true)]
        subtotal: Decimal,
        /// Invoice currency (defaults to the configured base currency)
        #[arg(long)]
        currency: Option<CurrencyCode>,
        /// Tax amount to check instead of deriving it
        #[arg(long, requires = "total", allow_hyphen_values = true)]
        tax: Option<Decimal>,
        /// Total amount to check instead of deriving it
        #[arg(long, requires = "tax", allow_hyphen_values = true)]
        total: Option<Decimal>,
        /// Tax rate override (defaults to the configured IGV rate)
        #[arg(long)]
        rate: Option<Decimal>,
    },
}

/// Document subcommands.
#[derive(Debug, Subcommand)]
pub enum DocumentCommands {
    /// Normalize a document number
    Normalize {
        /// Document type (dni, ruc, passport, other)
        #[arg(short = 't', long = "type")]
        doc_type: DocumentType,
        /// Document number as entered
        value: String,
    },
    /// Check the check digit of a RUC
    ValidateRuc {
        /// RUC to check
        value: String,
    },
    /// Normalize a document and fail if it is not valid
    Validate {
        /// Document type (dni, ruc, passport, other)
        #[arg(short = 't', long = "type")]
        doc_type: DocumentType,
        /// Document number as entered
        value: String,
    },
}

fn calculator(config: &AppConfig, rate: Option<Decimal>) -> Result<TaxCalculator> {
    Ok(match rate {
        Some(rate) => TaxCalculator::new(rate)?,
        None => TaxCalculator::from_config(&config.tax)?,
    })
}

/// Runs a command.
pub fn run(command: Commands, config: &AppConfig) -> Result<Value> {
    match command {
        Commands::Tax {
            amount,
            currency,
            includes_tax,
            rate,
        } => {
            let calculator = calculator(config, rate)?;
            let split = calculator.compute(Money::new(amount, currency), includes_tax)?;
            Ok(json!({
                "rate": calculator.rate(),
                "includes_tax": includes_tax,
                "split": split,
            }))
        }

        Commands::Price {
            catalog,
            service,
            date,
            to,
            rates,
        } => {
            let loaded = load_catalog(&catalog)?;
            let Some(found) = loaded.find(&service) else {
                bail!("Service '{service}' not found in {}", catalog.display());
            };
            let resolution = resolve_for_service(&loaded.catalog, found, date);

            let mut output = json!({
                "service_id": found.id,
                "service": found.name,
                "date": resolution.date,
                "season": resolution.season_label(),
                "price": resolution.price,
                "matched_period": resolution.matched_period,
            });

            if let (Some(to), Some(rates)) = (to, rates) {
                let converter = CurrencyConverter::new(load_rates(&rates)?);
                let conversion = converter.convert(resolution.price, to, date)?;
                output["conversion"] = serde_json::to_value(conversion)?;
            }
            Ok(output)
        }

        Commands::Convert {
            rates,
            amount,
            from,
            to,
            date,
        } => {
            let to = to.unwrap_or(config.currency.base_currency);
            let converter = CurrencyConverter::new(load_rates(&rates)?);
            let conversion = converter.convert(Money::new(amount, from), to, date)?;
            info!(%from, %to, rate = %conversion.rate, "Converted amount");
            Ok(serde_json::to_value(conversion)?)
        }

        Commands::Document(command) => run_document(command),

        Commands::Commission {
            base,
            currency,
            percentage,
        } => {
            let commission = compute_commission(Money::new(base, currency), percentage)?;
            Ok(json!({
                "base": Money::new(base, currency),
                "percentage": percentage,
                "commission": commission,
            }))
        }

        Commands::Invoice {
            subtotal,
            currency,
            tax,
            total,
            rate,
        } => {
            let currency = currency.unwrap_or(config.currency.base_currency);
            let subtotal = Money::new(subtotal, currency);

            let amounts = match (tax, total) {
                (Some(tax), Some(total)) => {
                    let amounts = InvoiceAmounts {
                        subtotal,
                        tax_amount: Money::new(tax, currency),
                        total_amount: Money::new(total, currency),
                    };
                    amounts.validate()?;
                    amounts
                }
                _ => InvoiceAmounts::from_subtotal(subtotal, &calculator(config, rate)?)
                    .context("Failed to derive invoice amounts")?,
            };
            Ok(serde_json::to_value(amounts)?)
        }
    }
}

fn run_document(command: DocumentCommands) -> Result<Value> {
    match command {
        DocumentCommands::Normalize { doc_type, value } => Ok(json!({
            "type": doc_type,
            "value": value,
            "normalized": normalize(doc_type, &value),
        })),
        DocumentCommands::ValidateRuc { value } => Ok(json!({
            "ruc": value,
            "valid": validate_tax_id(&value),
        })),
        DocumentCommands::Validate { doc_type, value } => {
            let normalized = NationalId::new(doc_type, value.as_str()).validate()?;
            Ok(json!({
                "type": doc_type,
                "value": value,
                "normalized": normalized,
                "valid": true,
            }))
        }
    }
}
