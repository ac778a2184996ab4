//! Command-line interface definitions.

use clap::{Parser, ValueEnum};
use linecheck_strategy::RunnerConfig;
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Find Kalshi winner contracts priced below the sportsbook consensus
#[derive(Parser, Debug)]
#[command(name = "linecheck")]
#[command(version)]
pub struct Cli {
    /// Sport code to analyse (all sports when omitted)
    pub sport: Option<String>,

    /// Directory holding the snapshot files
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Directory reports are written to (defaults to the data directory)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Expected value an opportunity must exceed, in dollars
    #[arg(long)]
    pub min_ev: Option<Decimal>,

    /// Amount placed on each evaluated side, in dollars
    #[arg(long)]
    pub stake: Option<Decimal>,

    /// Kalshi fee withheld from winnings, in percent
    #[arg(long)]
    pub fee_percent: Option<Decimal>,

    /// JSON file of extra team aliases, keyed by sport code
    #[arg(long)]
    pub aliases: Option<PathBuf>,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Skip writing odds_comparison_<sport>.json reports
    #[arg(long)]
    pub no_write: bool,

    /// Color output mode [auto, always, never]
    #[arg(long, default_value = "auto", hide_possible_values = true)]
    pub color: ColorChoice,
}

impl Cli {
    /// Apply command-line overrides on top of an environment-derived config.
    pub fn runner_config(&self, mut config: RunnerConfig) -> RunnerConfig {
        if let Some(data_dir) = &self.data_dir {
            config.data_dir = data_dir.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = Some(output_dir.clone());
        }
        if let Some(aliases) = &self.aliases {
            config.aliases = Some(aliases.clone());
        }
        if let Some(min_ev) = self.min_ev {
            config.evaluator.min_expected_value = min_ev;
        }
        if let Some(stake) = self.stake {
            config.evaluator.stake = stake;
        }
        if let Some(fee_percent) = self.fee_percent {
            config.evaluator.fee_percent = fee_percent;
        }
        if self.no_write {
            config.write_reports = false;
        }
        config
    }
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl ColorChoice {
    pub fn apply(&self) {
        match self {
            ColorChoice::Auto => owo_colors::unset_override(),
            ColorChoice::Always => owo_colors::set_override(true),
            ColorChoice::Never => owo_colors::set_override(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::parse_from(["linecheck"]);
        assert_eq!(cli.sport, None);
        assert_eq!(cli.color, ColorChoice::Auto);
        assert!(!cli.json);
        assert!(!cli.no_write);
    }

    #[test]
    fn test_parse_sport_and_flags() {
        let cli = Cli::parse_from([
            "linecheck",
            "nfl",
            "--min-ev",
            "5.5",
            "--fee-percent",
            "0",
            "--color",
            "never",
            "--json",
        ]);

        assert_eq!(cli.sport.as_deref(), Some("nfl"));
        assert_eq!(cli.min_ev, Some(dec!(5.5)));
        assert_eq!(cli.fee_percent, Some(dec!(0)));
        assert_eq!(cli.color, ColorChoice::Never);
        assert!(cli.json);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "linecheck",
            "--data-dir",
            "/tmp/snapshots",
            "--stake",
            "50",
            "--no-write",
        ]);

        let base = RunnerConfig {
            output_dir: Some(PathBuf::from("/tmp/reports")),
            ..Default::default()
        };
        let config = cli.runner_config(base);

        assert_eq!(config.data_dir, PathBuf::from("/tmp/snapshots"));
        assert_eq!(config.output_dir, Some(PathBuf::from("/tmp/reports")));
        assert_eq!(config.evaluator.stake, dec!(50));
        assert_eq!(config.evaluator.min_expected_value, dec!(2));
        assert!(!config.write_reports);
    }

    #[test]
    fn test_rejects_invalid_decimal() {
        assert!(Cli::try_parse_from(["linecheck", "--min-ev", "lots"]).is_err());
    }
}
