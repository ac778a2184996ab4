//! Moneyline Comparison Engine for Kalshi Winner Markets
//!
//! This crate reconciles Kalshi two-sided winner markets with sportsbook
//! moneylines for the same games, and surfaces Kalshi contracts priced below
//! the sportsbook consensus.
//!
//! # Pipeline
//!
//! ```text
//! KalshiSnapshot  ─> MarketSide     ─┐
//!                                    ├─> EventMatcher ─> MatchedEvent ─> OpportunityEvaluator ─> Opportunity
//! OddsApiSnapshot ─> SportsbookGame ─┘
//! ```
//!
//! # Key Components
//!
//! - [`TeamDirectory`] / [`teams_match`]: two-tier contestant name resolution
//! - [`EventMatcher`]: pairs both sides of a Kalshi event with one sportsbook game
//! - [`OpportunityEvaluator`]: values each side against devigged sportsbook probabilities
//! - [`PayoutCalculator`]: fee-adjusted contract and fixed-odds payouts
//! - [`SportRunner`]: per-sport load, match, evaluate and report
//!
//! # Example
//!
//! ```rust,ignore
//! use linecheck_strategy::{RunnerConfig, Sport, SportRunner};
//! use rust_decimal_macros::dec;
//!
//! let config = RunnerConfig {
//!     data_dir: "data".into(),
//!     ..Default::default()
//! };
//!
//! let runner = SportRunner::new(config)?;
//! let summary = runner.run(Sport::Nfl)?;
//!
//! for opportunity in &summary.opportunities {
//!     println!("{} EV {}", opportunity.bet_team_name, opportunity.expected_value);
//! }
//! ```
//!
//! # Valuation Model
//!
//! The sportsbook consensus is treated as the true win probability:
//!
//! ```text
//! p_raw  = implied probability of the average moneyline (vig included)
//! p_true = p_raw / (p_away_raw + p_home_raw) * 100
//! EV     = p_true_away * net_if_away_wins + p_true_home * net_if_home_wins
//! ```
//!
//! Each Kalshi contract is valued at its own payout: `stake / price` contracts
//! paying $1 each, less the Kalshi fee.

pub mod config;
pub mod evaluator;
pub mod market;
pub mod matcher;
pub mod names;
pub mod odds;
pub mod opportunity;
pub mod payout;
pub mod report;
pub mod runner;
pub mod sport;

pub use config::{EvaluatorConfig, RunnerConfig};
pub use evaluator::OpportunityEvaluator;
pub use market::{MarketSide, PriceQuote, SportsbookGame, TeamRef};
pub use matcher::{ClaimedEvents, EventMatcher, MatchedEvent};
pub use names::{normalize, teams_match, MatchMode, TeamAliases, TeamDirectory};
pub use odds::{odds_to_probability, remove_vig, AmericanOdds};
pub use opportunity::{AverageOdds, EventValuation, Opportunity, Position, Side, StrategyType};
pub use payout::{Payout, PayoutCalculator};
pub use report::OpportunityReport;
pub use runner::{BatchSummary, RunError, SportFailure, SportRunner, SportSummary};
pub use sport::{Sport, UnknownSport};
