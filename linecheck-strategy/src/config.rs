//! Configuration types for the moneyline comparison run.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding [`RunnerConfig::data_dir`].
pub const ENV_DATA_DIR: &str = "LINECHECK_DATA_DIR";
/// Environment variable overriding [`RunnerConfig::output_dir`].
pub const ENV_OUTPUT_DIR: &str = "LINECHECK_OUTPUT_DIR";
/// Environment variable overriding [`EvaluatorConfig::stake`].
pub const ENV_STAKE: &str = "LINECHECK_STAKE";
/// Environment variable overriding [`EvaluatorConfig::fee_percent`].
pub const ENV_FEE_PERCENT: &str = "LINECHECK_FEE_PERCENT";
/// Environment variable overriding [`EvaluatorConfig::min_expected_value`].
pub const ENV_MIN_EV: &str = "LINECHECK_MIN_EV";
/// Environment variable pointing at a team alias override file.
pub const ENV_ALIASES: &str = "LINECHECK_ALIASES";

/// Directory holding the snapshot files when nothing else is configured.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Valuation parameters applied to every matched event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EvaluatorConfig {
    /// Amount placed on the evaluated side (e.g., 100 = $100)
    pub stake: Decimal,
    /// Kalshi fee withheld from winnings, in percent (e.g., 1 = 1%)
    pub fee_percent: Decimal,
    /// Expected value (on `stake`) an opportunity must strictly exceed
    pub min_expected_value: Decimal,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            stake: Decimal::ONE_HUNDRED,      // $100
            fee_percent: Decimal::ONE,        // 1%
            min_expected_value: Decimal::TWO, // $2 on a $100 stake
        }
    }
}

impl EvaluatorConfig {
    /// Build from environment variables, falling back to defaults for any
    /// variable that is unset or does not parse.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment, test fixture, ...).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let decimal = |key: &str, default: Decimal| {
            lookup(key)
                .and_then(|v| v.trim().parse::<Decimal>().ok())
                .unwrap_or(default)
        };

        Self {
            stake: decimal(ENV_STAKE, defaults.stake),
            fee_percent: decimal(ENV_FEE_PERCENT, defaults.fee_percent),
            min_expected_value: decimal(ENV_MIN_EV, defaults.min_expected_value),
        }
    }
}

/// Configuration for a batch run over one or more sports.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RunnerConfig {
    /// Directory the snapshot files are read from
    pub data_dir: PathBuf,
    /// Directory reports are written to (defaults to `data_dir`)
    pub output_dir: Option<PathBuf>,
    /// Whether `odds_comparison_<sport>.json` reports are written at all
    pub write_reports: bool,
    /// Optional JSON file of extra team aliases, keyed by sport code
    pub aliases: Option<PathBuf>,
    /// Valuation parameters
    pub evaluator: EvaluatorConfig,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            output_dir: None,
            write_reports: true,
            aliases: None,
            evaluator: EvaluatorConfig::default(),
        }
    }
}

impl RunnerConfig {
    /// Build from environment variables (see the `ENV_*` constants).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment, test fixture, ...).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let path = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
        };

        Self {
            data_dir: path(ENV_DATA_DIR).unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            output_dir: path(ENV_OUTPUT_DIR),
            write_reports: true,
            aliases: path(ENV_ALIASES),
            evaluator: EvaluatorConfig::from_lookup(&lookup),
        }
    }

    /// Directory reports are written to.
    pub fn output_dir(&self) -> &Path {
        self.output_dir.as_deref().unwrap_or(&self.data_dir)
    }
}
