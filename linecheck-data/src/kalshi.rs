//! Kalshi winner-market snapshot schema.
//!
//! A Kalshi game event is listed as two separate binary markets sharing one
//! `event_ticker`, one per contestant. The contestant a market pays out on is
//! named by `market_data.yes_sub_title`, using Kalshi's short label
//! (`"Los Angeles R"`, `"Seattle"`), and `market_data.yes_ask` is the price in
//! cents of one YES contract.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Suffix carried by every head-to-head winner market title.
pub const WINNER_SUFFIX: &str = "Winner?";

/// Separators between the two contestant labels of a winner market title,
/// tried in this order.
pub const TITLE_SEPARATORS: [&str; 3] = [" at ", " @ ", " vs "];

/// Kalshi winner markets for one sport, as persisted by the Kalshi fetch job.
///
/// ### Raw Payload
/// ```json
/// {
///   "source": "kalshi",
///   "sport": "nfl",
///   "total_markets_found": 2,
///   "markets": [
///     {
///       "ticker": "KXNFLGAME-25OCT05LARSEA-LAR",
///       "title": "Los Angeles R at Seattle Winner?",
///       "event_ticker": "KXNFLGAME-25OCT05LARSEA",
///       "market_data": { "yes_sub_title": "Los Angeles R", "yes_ask": 45 }
///     }
///   ]
/// }
/// ```
#[derive(Clone, PartialEq, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct KalshiSnapshot {
    /// Sport code the fetch job was run for
    pub sport: Option<SmolStr>,
    /// Count reported by the fetch job (may differ from `markets.len()`)
    pub total_markets_found: Option<u32>,
    pub markets: Vec<KalshiMarket>,
}

impl KalshiSnapshot {
    /// Number of markets the fetch job found, falling back to the listed count.
    pub fn total_markets(&self) -> usize {
        self.total_markets_found
            .map(|total| total as usize)
            .unwrap_or(self.markets.len())
    }
}

/// One Kalshi binary market (one side of a two-sided event).
#[derive(Clone, PartialEq, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct KalshiMarket {
    /// Market ticker (e.g., "KXNFLGAME-25OCT05LARSEA-LAR")
    pub ticker: Option<SmolStr>,
    /// Market title (e.g., "Los Angeles R at Seattle Winner?")
    pub title: Option<String>,
    /// Event ticker shared by both sides of the same game
    pub event_ticker: SmolStr,
    /// Raw market payload as returned by the Kalshi REST API
    pub market_data: KalshiMarketData,
}

impl KalshiMarket {
    /// Market title, preferring the top-level field over the raw payload.
    pub fn title(&self) -> Option<&str> {
        self.title
            .as_deref()
            .filter(|title| !title.is_empty())
            .or_else(|| self.market_data.title.as_deref())
            .filter(|title| !title.is_empty())
    }

    /// Market ticker, preferring the top-level field over the raw payload.
    pub fn ticker(&self) -> Option<&str> {
        self.ticker
            .as_deref()
            .or(self.market_data.ticker.as_deref())
    }

    /// Contestant label this market pays out on.
    pub fn label(&self) -> &str {
        self.market_data.yes_sub_title.trim()
    }

    /// Parsed winner title, if this is a two-sided winner market.
    pub fn winner_title(&self) -> Option<WinnerTitle> {
        self.title().and_then(WinnerTitle::parse)
    }

    /// True if the title ends with [`WINNER_SUFFIX`] and names two contestants.
    pub fn is_winner_market(&self) -> bool {
        self.winner_title().is_some()
    }
}

/// Subset of the raw Kalshi market payload used for valuation.
#[derive(Clone, PartialEq, Eq, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct KalshiMarketData {
    pub ticker: Option<SmolStr>,
    pub title: Option<String>,
    /// Contestant label the YES contract pays out on
    pub yes_sub_title: String,
    /// Best YES ask in cents (0-100)
    pub yes_ask: Option<i64>,
}

/// Contestant labels parsed from a winner market title.
///
/// `"Los Angeles R at Seattle Winner?"` parses to away `"Los Angeles R"` and
/// home `"Seattle"`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct WinnerTitle {
    pub away: String,
    pub home: String,
}

impl WinnerTitle {
    /// Parse a winner market title.
    ///
    /// Returns `None` unless the title ends with [`WINNER_SUFFIX`] and the text
    /// before it splits on one of [`TITLE_SEPARATORS`] into two non-empty labels.
    pub fn parse(title: &str) -> Option<Self> {
        let game = title.trim().strip_suffix(WINNER_SUFFIX)?.trim();

        let (away, home) = TITLE_SEPARATORS
            .iter()
            .find_map(|separator| game.split_once(separator))?;

        let (away, home) = (away.trim(), home.trim());
        if away.is_empty() || home.is_empty() {
            return None;
        }

        Some(Self {
            away: away.to_string(),
            home: home.to_string(),
        })
    }
}
