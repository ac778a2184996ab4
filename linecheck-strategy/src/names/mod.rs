//! Contestant name resolution.
//!
//! Kalshi labels contestants with a short form (`"Los Angeles R"`, `"Ohio St."`),
//! sportsbooks with a full display name (`"Los Angeles Rams"`, `"Ohio State Buckeyes"`).
//! Resolution happens in two steps:
//!
//! 1. [`TeamDirectory`] maps a Kalshi label to a canonical sportsbook name for
//!    the sports where a curated dictionary exists.
//! 2. [`teams_match`] compares two names after [`normalize`], either exactly
//!    ([`MatchMode::Strict`]) or by substring ([`MatchMode::Flexible`]).
//!
//! Flexible matching is deliberately loose: `"Texas"` is a substring of
//! `"Texas A&M Aggies"`, so two different schools sharing a word can match.

mod directory;

pub use directory::{TeamAliases, TeamDirectory};

use serde::{Deserialize, Serialize};

/// Trailing tokens stripped by [`normalize`], tried in this order.
const TRAILING_SUFFIXES: [&str; 7] = [
    " university",
    " univ",
    " state",
    " st",
    " college",
    " col",
    " st.",
];

/// Leading city abbreviations expanded by [`normalize`].
const CITY_ABBREVIATIONS: [(&str, &str); 10] = [
    ("la", "los angeles"),
    ("l.a.", "los angeles"),
    ("ny", "new york"),
    ("nyc", "new york"),
    ("sf", "san francisco"),
    ("kc", "kansas city"),
    ("tb", "tampa bay"),
    ("gb", "green bay"),
    ("lv", "las vegas"),
    ("okc", "oklahoma city"),
];

/// How strictly two contestant names must agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Normalized names must be equal
    Strict,
    /// Normalized names may also contain one another
    Flexible,
}

impl MatchMode {
    pub fn is_flexible(&self) -> bool {
        matches!(self, MatchMode::Flexible)
    }
}

/// Normalize a contestant name for comparison.
///
/// Lowercases, collapses whitespace, expands a leading city abbreviation
/// (`"LA Rams"` -> `"los angeles rams"`) and strips trailing institutional
/// suffixes (`"Ohio State"` -> `"ohio"`). Suffixes are only removed at the end
/// of the name, so `"Penn State Nittany Lions"` keeps its `"state"`.
pub fn normalize(name: &str) -> String {
    let mut tokens = name.split_whitespace().map(str::to_lowercase);

    let Some(first) = tokens.next() else {
        return String::new();
    };

    let first = CITY_ABBREVIATIONS
        .iter()
        .find(|(abbreviation, _)| *abbreviation == first)
        .map(|(_, city)| city.to_string())
        .unwrap_or(first);

    let mut normalized = std::iter::once(first).chain(tokens).collect::<Vec<_>>().join(" ");

    for suffix in TRAILING_SUFFIXES {
        if normalized.ends_with(suffix) {
            normalized.truncate(normalized.len() - suffix.len());
        }
    }

    normalized.trim().to_string()
}

/// True if two contestant names refer to the same contestant.
///
/// Empty names (before or after normalization) never match.
pub fn teams_match(a: &str, b: &str, mode: MatchMode) -> bool {
    let (a, b) = (normalize(a), normalize(b));
    if a.is_empty() || b.is_empty() {
        return false;
    }

    if a == b {
        return true;
    }

    mode.is_flexible() && (a.contains(b.as_str()) || b.contains(a.as_str()))
}
