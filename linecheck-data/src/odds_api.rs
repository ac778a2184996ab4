//! The Odds API moneyline snapshot schema.
//!
//! Each game carries the two contestant names and, per bookmaker, a list of
//! markets; the head-to-head (`"h2h"`) market lists one outcome per contestant
//! priced in American odds.
//!
//! The fetch job stores games in two shapes: nested under `odds_data` (the
//! saved format, where `odds_data` is `null` for games it could not pair) or
//! flattened with the game fields at the top level. [`OddsApiEntry::game`]
//! hides the difference.

use chrono::{DateTime, Utc};
use itertools::Itertools;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Market key of the head-to-head (moneyline) market.
pub const HEAD_TO_HEAD: &str = "h2h";

/// Moneyline games for one sport, as persisted by the odds fetch job.
///
/// ### Raw Payload
/// ```json
/// {
///   "source": "the_odds_api",
///   "sport": "nfl",
///   "total_games": 1,
///   "matched_games": 1,
///   "games": [
///     {
///       "matched": true,
///       "odds_data": {
///         "id": "e912304de2b2ce35b473ce2ecd3d1502",
///         "commence_time": "2025-10-06T00:25:00Z",
///         "home_team": "Seattle Seahawks",
///         "away_team": "Los Angeles Rams",
///         "bookmakers": [
///           {
///             "key": "draftkings",
///             "title": "DraftKings",
///             "markets": [
///               {
///                 "key": "h2h",
///                 "outcomes": [
///                   { "name": "Los Angeles Rams", "price": 120 },
///                   { "name": "Seattle Seahawks", "price": -142 }
///                 ]
///               }
///             ]
///           }
///         ]
///       }
///     }
///   ]
/// }
/// ```
#[derive(Clone, PartialEq, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OddsApiSnapshot {
    /// Sport code the fetch job was run for
    pub sport: Option<SmolStr>,
    /// Count reported by the fetch job (may differ from `games.len()`)
    pub total_games: Option<u32>,
    /// Games the fetch job itself paired with a Kalshi event
    pub matched_games: Option<u32>,
    pub games: Vec<OddsApiEntry>,
}

impl OddsApiSnapshot {
    /// Number of games the fetch job reported, falling back to the listed count.
    pub fn total_games(&self) -> usize {
        self.total_games
            .map(|total| total as usize)
            .unwrap_or(self.games.len())
    }

    /// Every game carrying odds data, whichever shape it was stored in.
    pub fn games(&self) -> impl Iterator<Item = &OddsApiGame> {
        self.games.iter().filter_map(OddsApiEntry::game)
    }

    /// Number of games from which two contestant names can be extracted.
    pub fn games_with_teams(&self) -> usize {
        self.games()
            .filter(|game| game.team_names().is_some())
            .count()
    }
}

/// One entry of the `games` array, in either the nested or flattened shape.
#[derive(Clone, PartialEq, Debug, Default, Deserialize, Serialize)]
pub struct OddsApiEntry {
    /// Nested odds payload (`null` for games the fetch job could not pair)
    #[serde(default)]
    pub odds_data: Option<OddsApiGame>,
    /// Game fields stored directly on the entry
    #[serde(flatten)]
    pub inline: OddsApiGame,
}

impl OddsApiEntry {
    /// The game this entry describes, if it carries any odds data.
    pub fn game(&self) -> Option<&OddsApiGame> {
        match &self.odds_data {
            Some(game) => Some(game),
            None if self.inline.has_team_fields() || !self.inline.bookmakers.is_empty() => {
                Some(&self.inline)
            }
            None => None,
        }
    }
}

/// A single sportsbook game with per-bookmaker prices.
#[derive(Clone, PartialEq, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OddsApiGame {
    pub id: Option<SmolStr>,
    pub sport_key: Option<SmolStr>,
    pub commence_time: Option<DateTime<Utc>>,
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    pub bookmakers: Vec<Bookmaker>,
}

impl OddsApiGame {
    fn has_team_fields(&self) -> bool {
        non_empty(&self.away_team).is_some() && non_empty(&self.home_team).is_some()
    }

    /// Contestant names as `(away, home)`.
    ///
    /// Prefers the structured `away_team` / `home_team` fields. When either is
    /// absent, falls back to the first bookmaker head-to-head market listing
    /// exactly two distinct outcome names, read in listed order.
    pub fn team_names(&self) -> Option<(&str, &str)> {
        if let (Some(away), Some(home)) = (non_empty(&self.away_team), non_empty(&self.home_team)) {
            return Some((away, home));
        }

        self.bookmakers
            .iter()
            .flat_map(|bookmaker| bookmaker.markets.iter())
            .filter(|market| market.is_head_to_head())
            .find_map(|market| {
                market
                    .outcomes
                    .iter()
                    .map(|outcome| outcome.name.trim())
                    .filter(|name| !name.is_empty())
                    .unique()
                    .collect_tuple()
            })
    }
}

/// One bookmaker's markets for a game.
#[derive(Clone, PartialEq, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Bookmaker {
    /// Bookmaker key (e.g., "draftkings")
    pub key: Option<SmolStr>,
    /// Display name (e.g., "DraftKings")
    pub title: Option<String>,
    pub markets: Vec<BookmakerMarket>,
}

impl Bookmaker {
    /// First head-to-head market this bookmaker lists.
    pub fn head_to_head(&self) -> Option<&BookmakerMarket> {
        self.markets.iter().find(|market| market.is_head_to_head())
    }

    /// This bookmaker's head-to-head price for a contestant, if quoted.
    ///
    /// Only the first head-to-head market and the first outcome carrying
    /// exactly that name, ignoring surrounding whitespace, are considered.
    pub fn moneyline(&self, team: &str) -> Option<Decimal> {
        let team = team.trim();
        self.head_to_head()?
            .outcomes
            .iter()
            .find(|outcome| outcome.name.trim() == team)?
            .price
    }
}

/// A market offered by a bookmaker (only `"h2h"` is read).
#[derive(Clone, PartialEq, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BookmakerMarket {
    pub key: SmolStr,
    pub outcomes: Vec<OddsOutcome>,
}

impl BookmakerMarket {
    pub fn is_head_to_head(&self) -> bool {
        self.key == HEAD_TO_HEAD
    }
}

/// One priced outcome of a bookmaker market.
#[derive(Clone, PartialEq, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OddsOutcome {
    /// Contestant name as the bookmaker lists it
    pub name: String,
    /// American odds (negative = favourite, positive = underdog)
    pub price: Option<Decimal>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
