//! Positive expected-value opportunity detection and representation.

use crate::{
    market::PriceQuote,
    matcher::MatchedEvent,
    payout::{round_money, Payout},
};
use chrono::{DateTime, Utc};
use derive_more::Display;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Which contestant of a matched event a position backs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[display("away")]
    Away,
    #[display("home")]
    Home,
}

/// How the position is held. Only single-leg positions are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyType {
    /// One Kalshi contract, no offsetting sportsbook bet
    #[default]
    Unhedged,
}

/// Single-leg position on one side of a matched event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Position {
    pub side: Side,
    /// Kalshi ask paid for the contract
    pub price: PriceQuote,
    pub payout: Payout,
    #[serde(with = "rust_decimal::serde::float")]
    pub net_if_away_wins: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub net_if_home_wins: Decimal,
    /// Expected value on the stake, unrounded
    #[serde(with = "rust_decimal::serde::float")]
    pub expected_value: Decimal,
}

impl Position {
    /// Position backing `side` with the given contract payout.
    pub fn new(side: Side, price: PriceQuote, payout: Payout, expected_value: Decimal) -> Self {
        let (net_if_away_wins, net_if_home_wins) = match side {
            Side::Away => (payout.profit_if_win, payout.loss_if_lose),
            Side::Home => (payout.loss_if_lose, payout.profit_if_win),
        };

        Self {
            side,
            price,
            payout,
            net_if_away_wins,
            net_if_home_wins,
            expected_value,
        }
    }
}

/// Sportsbook consensus for one contestant across bookmakers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct AverageOdds {
    /// Arithmetic mean of the bookmakers' American odds
    pub odds: Decimal,
    /// Number of bookmakers contributing a price
    pub bookmakers: usize,
}

/// Every number computed for one matched event, before any threshold is
/// applied.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EventValuation {
    pub away_odds: AverageOdds,
    pub home_odds: AverageOdds,
    /// Implied probabilities (percent) of the whole-number average odds, vig included
    pub away_sportsbook_prob: Decimal,
    pub home_sportsbook_prob: Decimal,
    /// Vig-free probabilities (percent) used as true win likelihoods
    pub away_prob_normalized: Decimal,
    pub home_prob_normalized: Decimal,
    pub away: Position,
    pub home: Position,
}

impl EventValuation {
    /// Position with the higher expected value (away on ties).
    pub fn best(&self) -> &Position {
        if self.home.expected_value > self.away.expected_value {
            &self.home
        } else {
            &self.away
        }
    }

    /// Reportable opportunity backing the best position.
    pub fn into_opportunity(self, event: &MatchedEvent, stake: Decimal) -> Opportunity {
        let best = *self.best();
        let bet_team_name = match best.side {
            Side::Away => event.game.away_team.clone(),
            Side::Home => event.game.home_team.clone(),
        };

        Opportunity {
            event_ticker: event.event_ticker.clone(),
            away_team: event.game.away_team.clone(),
            home_team: event.game.home_team.clone(),
            commence_time: event.game.commence_time,
            strategy_type: StrategyType::Unhedged,
            bet_team: best.side,
            bet_team_name,
            away_contract_price: self.away.price,
            home_contract_price: self.home.price,
            away_sportsbook_prob: self.away_sportsbook_prob,
            home_sportsbook_prob: self.home_sportsbook_prob,
            away_prob_normalized: self.away_prob_normalized,
            home_prob_normalized: self.home_prob_normalized,
            avg_away_odds: self.away_odds.odds.round_dp(2),
            avg_home_odds: self.home_odds.odds.round_dp(2),
            away_bookmaker_count: self.away_odds.bookmakers,
            home_bookmaker_count: self.home_odds.bookmakers,
            payout: best.payout,
            net_if_away_wins: best.net_if_away_wins,
            net_if_home_wins: best.net_if_home_wins,
            expected_value: round_money(best.expected_value),
            total_investment: stake,
        }
    }
}

/// A positive expected-value position on a matched event.
///
/// ### Raw Payload
/// ```json
/// {
///   "event_ticker": "KXNFLGAME-25OCT05LARSEA",
///   "away_team": "Los Angeles Rams",
///   "home_team": "Seattle Seahawks",
///   "commence_time": "2025-10-06T00:25:00Z",
///   "strategy_type": "unhedged",
///   "bet_team": "away",
///   "bet_team_name": "Los Angeles Rams",
///   "away_contract_price": 40,
///   "home_contract_price": 65,
///   "away_sportsbook_prob": 60.0,
///   "home_sportsbook_prob": 43.47826086956522,
///   "away_prob_normalized": 57.98319327731093,
///   "home_prob_normalized": 42.01680672268908,
///   "avg_away_odds": -150.0,
///   "avg_home_odds": 130.0,
///   "away_bookmaker_count": 1,
///   "home_bookmaker_count": 1,
///   "payout": { "profit_if_win": 147.5, "loss_if_lose": -100.0 },
///   "net_if_away_wins": 147.5,
///   "net_if_home_wins": -100.0,
///   "expected_value": 43.51,
///   "total_investment": 100.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Opportunity {
    pub event_ticker: SmolStr,
    pub away_team: String,
    pub home_team: String,
    pub commence_time: Option<DateTime<Utc>>,
    pub strategy_type: StrategyType,
    /// Side the position backs
    pub bet_team: Side,
    /// Sportsbook name of the backed contestant
    pub bet_team_name: String,
    pub away_contract_price: PriceQuote,
    pub home_contract_price: PriceQuote,
    #[serde(with = "rust_decimal::serde::float")]
    pub away_sportsbook_prob: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub home_sportsbook_prob: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub away_prob_normalized: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub home_prob_normalized: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub avg_away_odds: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub avg_home_odds: Decimal,
    pub away_bookmaker_count: usize,
    pub home_bookmaker_count: usize,
    /// Payout of the backed contract
    pub payout: Payout,
    #[serde(with = "rust_decimal::serde::float")]
    pub net_if_away_wins: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub net_if_home_wins: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub expected_value: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_investment: Decimal,
}

impl Opportunity {
    /// Kalshi ask of the backed contract.
    pub fn bet_price(&self) -> PriceQuote {
        match self.bet_team {
            Side::Away => self.away_contract_price,
            Side::Home => self.home_contract_price,
        }
    }
}
