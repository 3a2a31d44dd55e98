use potshare_application::{LedgerAudit, SnapshotProcessor};
use potshare_domain::{DEFAULT_SETTLEMENT_EPSILON, Money, SettlementPlanner};
use potshare_presentation::{CurrencyFormat, RenderContext};
use rust_decimal::Decimal;
use std::{env, str::FromStr};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

const EPSILON_VAR: &str = "POTSHARE_SETTLEMENT_EPSILON";
const FRACTION_DIGITS_VAR: &str = "POTSHARE_LEDGER_FRACTION_DIGITS";
const DEFAULT_LEDGER_FRACTION_DIGITS: u32 = 2;
/// Beyond this `Decimal` cannot carry the scale.
const MAX_FRACTION_DIGITS: u32 = 28;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a decimal number, got '{value}'")]
    InvalidDecimal { key: &'static str, value: String },
    #[error(
        "{key} must be an integer between 0 and {max}, got '{value}'",
        max = MAX_FRACTION_DIGITS
    )]
    InvalidFractionDigits { key: &'static str, value: String },
}

/// Interpreter configuration, read from the environment and `.env`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    pub settlement_epsilon: Money,
    pub ledger_fraction_digits: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            settlement_epsilon: DEFAULT_SETTLEMENT_EPSILON,
            ledger_fraction_digits: DEFAULT_LEDGER_FRACTION_DIGITS,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(EPSILON_VAR) {
            let epsilon = Decimal::from_str(value.trim()).map_err(|_| {
                ConfigError::InvalidDecimal {
                    key: EPSILON_VAR,
                    value: value.clone(),
                }
            })?;
            config.settlement_epsilon = Money::from_decimal(epsilon.abs());
        }

        if let Some(value) = lookup(FRACTION_DIGITS_VAR) {
            config.ledger_fraction_digits = value
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|digits| *digits <= MAX_FRACTION_DIGITS)
                .ok_or_else(|| ConfigError::InvalidFractionDigits {
                    key: FRACTION_DIGITS_VAR,
                    value: value.clone(),
                })?;
        }

        Ok(config)
    }

    pub fn planner(&self) -> SettlementPlanner {
        SettlementPlanner::new(self.settlement_epsilon)
    }

    pub fn processor(&self) -> SnapshotProcessor {
        SnapshotProcessor::new(self.planner())
    }

    pub fn audit(&self) -> LedgerAudit {
        LedgerAudit::new(self.planner())
    }

    /// Base render context; participant names are filled in per snapshot.
    pub fn render_context(&self) -> RenderContext {
        RenderContext::default()
            .with_ledger_currency(CurrencyFormat::usd(self.ledger_fraction_digits))
    }
}

/// Logs go to stderr so the summaries on stdout stay clean. Level via `RUST_LOG`.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
