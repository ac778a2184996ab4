//! Supported sports and their per-sport conventions.

use crate::names::MatchMode;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// A sport with Kalshi winner markets and sportsbook moneylines.
///
/// The sport scopes everything name-related: team dictionaries, whether
/// flexible matching is allowed, and the snapshot file names.
#[derive(Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Debug, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    Nfl,
    Mlb,
    Nba,
    Ncaab,
    Ncaaf,
    Ufc,
    Nhl,
    Mls,
    Ncaabw,
}

impl Sport {
    /// Every supported sport, in batch processing order.
    pub const ALL: [Sport; 9] = [
        Sport::Nfl,
        Sport::Mlb,
        Sport::Nba,
        Sport::Ncaab,
        Sport::Ncaaf,
        Sport::Ufc,
        Sport::Nhl,
        Sport::Mls,
        Sport::Ncaabw,
    ];

    /// Lowercase sport code used on the command line and in file names.
    pub fn code(&self) -> &'static str {
        match self {
            Sport::Nfl => "nfl",
            Sport::Mlb => "mlb",
            Sport::Nba => "nba",
            Sport::Ncaab => "ncaab",
            Sport::Ncaaf => "ncaaf",
            Sport::Ufc => "ufc",
            Sport::Nhl => "nhl",
            Sport::Mls => "mls",
            Sport::Ncaabw => "ncaabw",
        }
    }

    /// Display name (e.g., "NFL").
    pub fn name(&self) -> &'static str {
        match self {
            Sport::Nfl => "NFL",
            Sport::Mlb => "MLB",
            Sport::Nba => "NBA",
            Sport::Ncaab => "NCAAB",
            Sport::Ncaaf => "NCAAF",
            Sport::Ufc => "UFC",
            Sport::Nhl => "NHL",
            Sport::Mls => "MLS",
            Sport::Ncaabw => "NCAABW",
        }
    }

    /// How contestant names are compared for this sport.
    ///
    /// Sports with a curated team dictionary match strictly; college leagues,
    /// combat sports and the leagues without curated names fall back to
    /// substring matching.
    pub fn match_mode(&self) -> MatchMode {
        match self {
            Sport::Nfl | Sport::Mlb | Sport::Nba => MatchMode::Strict,
            Sport::Ncaab
            | Sport::Ncaaf
            | Sport::Ncaabw
            | Sport::Ufc
            | Sport::Nhl
            | Sport::Mls => MatchMode::Flexible,
        }
    }

    /// File name of the Kalshi winner-market snapshot.
    pub fn market_file(&self) -> String {
        format!("kalshi_{}_winner_markets.json", self.code())
    }

    /// File name of the sportsbook moneyline snapshot.
    pub fn odds_file(&self) -> String {
        format!("the_odds_api_{}_moneyline_odds.json", self.code())
    }

    /// File name of the opportunity report.
    pub fn report_file(&self) -> String {
        format!("odds_comparison_{}.json", self.code())
    }
}

impl std::fmt::Display for Sport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A sport code that is not one of [`Sport::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported sport '{code}'. Supported sports: {}", supported_codes())]
pub struct UnknownSport {
    pub code: String,
}

/// Comma-separated list of every supported sport code.
pub fn supported_codes() -> String {
    Sport::ALL.iter().map(Sport::code).join(", ")
}

impl FromStr for Sport {
    type Err = UnknownSport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_lowercase();
        Sport::ALL
            .into_iter()
            .find(|sport| sport.code() == code)
            .ok_or(UnknownSport {
                code: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sport_from_str() {
        assert_eq!("nfl".parse::<Sport>().unwrap(), Sport::Nfl);
        assert_eq!(" NCAABW ".parse::<Sport>().unwrap(), Sport::Ncaabw);

        let error = "cricket".parse::<Sport>().unwrap_err();
        assert_eq!(error.code, "cricket");
        assert!(error.to_string().contains("nfl, mlb, nba"));
    }

    #[test]
    fn test_sport_file_names() {
        assert_eq!(Sport::Nfl.market_file(), "kalshi_nfl_winner_markets.json");
        assert_eq!(Sport::Mlb.odds_file(), "the_odds_api_mlb_moneyline_odds.json");
        assert_eq!(Sport::Ufc.report_file(), "odds_comparison_ufc.json");
    }

    #[test]
    fn test_match_mode_per_sport() {
        assert_eq!(Sport::Nfl.match_mode(), MatchMode::Strict);
        assert_eq!(Sport::Nba.match_mode(), MatchMode::Strict);
        assert_eq!(Sport::Ncaab.match_mode(), MatchMode::Flexible);
        assert_eq!(Sport::Ufc.match_mode(), MatchMode::Flexible);
        assert_eq!(Sport::Mls.match_mode(), MatchMode::Flexible);
    }

    #[test]
    fn test_sport_serde_uses_code() {
        assert_eq!(serde_json::to_string(&Sport::Ncaaf).unwrap(), "\"ncaaf\"");
        assert_eq!(serde_json::from_str::<Sport>("\"nhl\"").unwrap(), Sport::Nhl);
        assert_eq!(Sport::Mls.to_string(), "mls");
    }
}
