//! Snapshot schemas for the two feeds reconciled by `linecheck`.
//!
//! Both feeds are produced by separately-run fetch jobs and persisted as flat
//! JSON files, one per sport:
//!
//! - [`kalshi`]: two-sided Kalshi winner markets (`"Los Angeles R at Seattle Winner?"`),
//!   one market per contestant, priced in cents per $1 contract.
//! - [`odds_api`]: The Odds API moneyline games, one American-odds reading per
//!   bookmaker per contestant.
//!
//! This crate only describes and loads those documents. Matching and valuation
//! live in `linecheck-strategy`.
//!
//! # Example
//!
//! ```rust,ignore
//! use linecheck_data::{kalshi::KalshiSnapshot, odds_api::OddsApiSnapshot, snapshot};
//!
//! let markets: KalshiSnapshot = snapshot::load("data/kalshi_nfl_winner_markets.json")?;
//! let games: OddsApiSnapshot = snapshot::load("data/the_odds_api_nfl_moneyline_odds.json")?;
//!
//! for game in games.games() {
//!     println!("{:?}", game.team_names());
//! }
//! ```

pub mod error;
pub mod kalshi;
pub mod odds_api;
pub mod snapshot;

pub use error::SnapshotError;
pub use kalshi::{KalshiMarket, KalshiMarketData, KalshiSnapshot, WinnerTitle};
pub use odds_api::{Bookmaker, BookmakerMarket, OddsApiEntry, OddsApiGame, OddsApiSnapshot, OddsOutcome};
