//! Normalised views of both feeds, as consumed by the matcher.

use crate::names::TeamDirectory;
use chrono::{DateTime, Utc};
use linecheck_data::{Bookmaker, KalshiMarket, OddsApiGame, OddsApiSnapshot};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use tracing::debug;

/// Price of one YES contract in cents per $1 payout.
///
/// Only `0..=99` is tradeable: 0 marks a void quote, 100 would leave no
/// profit to win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct PriceQuote(u8);

impl PriceQuote {
    pub const MAX_CENTS: u8 = 99;

    /// Validate a raw quote, returning `None` when outside `0..=99`.
    pub fn new(cents: i64) -> Option<Self> {
        u8::try_from(cents)
            .ok()
            .filter(|cents| *cents <= Self::MAX_CENTS)
            .map(Self)
    }

    pub fn cents(&self) -> u8 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Price in dollars per contract (e.g., 45 -> 0.45).
    pub fn as_fraction(&self) -> Decimal {
        Decimal::from(self.0) / Decimal::ONE_HUNDRED
    }
}

impl TryFrom<i64> for PriceQuote {
    type Error = String;

    fn try_from(cents: i64) -> Result<Self, Self::Error> {
        Self::new(cents).ok_or_else(|| format!("price {cents} outside 0..=99 cents"))
    }
}

impl From<PriceQuote> for u8 {
    fn from(price: PriceQuote) -> Self {
        price.0
    }
}

/// Contestant as labelled by Kalshi, plus its canonical sportsbook name when
/// the sport's [`TeamDirectory`] knows it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TeamRef {
    /// Kalshi label (e.g., "Los Angeles R")
    pub label: SmolStr,
    /// Sportsbook display name (e.g., "Los Angeles Rams")
    pub canonical: Option<SmolStr>,
}

impl TeamRef {
    pub fn resolve(label: &str, directory: &TeamDirectory) -> Self {
        let label = label.trim();
        Self {
            label: SmolStr::new(label),
            canonical: directory.resolve(label).map(SmolStr::new),
        }
    }
}

/// One contract of a two-sided Kalshi winner market.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MarketSide {
    /// Event ticker shared with the opposite side
    pub event_ticker: SmolStr,
    /// Market ticker of this contract
    pub ticker: Option<SmolStr>,
    /// Market title (e.g., "Los Angeles R at Seattle Winner?")
    pub title: String,
    pub team: TeamRef,
    /// YES ask; `None` when the raw quote was out of range
    pub price: Option<PriceQuote>,
}

impl MarketSide {
    /// Build from a raw Kalshi market.
    ///
    /// Returns `None` for markets that are not two-sided winner markets. A
    /// missing ask is read as 0 cents.
    pub fn from_kalshi(market: &KalshiMarket, directory: &TeamDirectory) -> Option<Self> {
        let title = market.title().filter(|_| market.is_winner_market())?;

        let raw_ask = market.market_data.yes_ask.unwrap_or(0);
        let price = PriceQuote::new(raw_ask);
        if price.is_none() {
            debug!(
                event_ticker = %market.event_ticker,
                raw_ask,
                "Kalshi ask outside tradeable range"
            );
        }

        Some(Self {
            event_ticker: market.event_ticker.clone(),
            ticker: market.ticker().map(SmolStr::new),
            title: title.to_string(),
            team: TeamRef::resolve(market.label(), directory),
            price,
        })
    }
}

/// One sportsbook game with both contestants known.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SportsbookGame {
    pub id: Option<SmolStr>,
    pub away_team: String,
    pub home_team: String,
    pub commence_time: Option<DateTime<Utc>>,
    pub bookmakers: Vec<Bookmaker>,
}

impl SportsbookGame {
    /// Build from a raw Odds API game; `None` if the contestants cannot be
    /// determined.
    pub fn from_odds_api(game: &OddsApiGame) -> Option<Self> {
        let (away_team, home_team) = game.team_names()?;
        Some(Self {
            id: game.id.clone(),
            away_team: away_team.to_string(),
            home_team: home_team.to_string(),
            commence_time: game.commence_time,
            bookmakers: game.bookmakers.clone(),
        })
    }

    /// Every game of a snapshot whose contestants can be determined.
    pub fn collect(snapshot: &OddsApiSnapshot) -> Vec<Self> {
        snapshot.games().filter_map(Self::from_odds_api).collect()
    }

    /// Moneyline of `team` at every bookmaker quoting it.
    pub fn moneylines<'a>(&'a self, team: &'a str) -> impl Iterator<Item = Decimal> + 'a {
        self.bookmakers
            .iter()
            .filter_map(move |bookmaker| bookmaker.moneyline(team))
    }
}
