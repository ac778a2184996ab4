//! Pairing Kalshi market sides with sportsbook games.

use crate::{
    market::{MarketSide, SportsbookGame},
    names::{teams_match, MatchMode, TeamAliases, TeamDirectory},
    sport::Sport,
};
use fnv::FnvHashSet;
use indexmap::IndexMap;
use linecheck_data::{KalshiMarket, KalshiSnapshot};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use tracing::debug;

/// A Kalshi event whose two sides were paired with one sportsbook game.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MatchedEvent {
    pub event_ticker: SmolStr,
    /// Side paying out if the sportsbook's away team wins
    pub away: MarketSide,
    /// Side paying out if the sportsbook's home team wins
    pub home: MarketSide,
    pub game: SportsbookGame,
}

/// Event tickers already paired with a game.
///
/// Threaded through matching by value so each event is claimed at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimedEvents(FnvHashSet<SmolStr>);

impl ClaimedEvents {
    pub fn contains(&self, event_ticker: &str) -> bool {
        self.0.contains(event_ticker)
    }

    /// Claim an event ticker, returning the grown set.
    pub fn claim(mut self, event_ticker: SmolStr) -> Self {
        self.0.insert(event_ticker);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Matches Kalshi winner-market sides to sportsbook games for one sport.
///
/// Matching is greedy, in sportsbook game order: for each game, the first
/// market side naming its away team and the first naming its home team are
/// paired, provided both sides belong to the same unclaimed event. A game that
/// loses its event to an earlier game is not retried against other events.
#[derive(Debug, Clone)]
pub struct EventMatcher {
    mode: MatchMode,
    directory: TeamDirectory,
}

impl EventMatcher {
    pub fn new(mode: MatchMode, directory: TeamDirectory) -> Self {
        Self { mode, directory }
    }

    /// Matcher using the sport's match mode and built-in directory, extended
    /// with `aliases`.
    pub fn for_sport(sport: Sport, aliases: &TeamAliases) -> Self {
        Self::new(sport.match_mode(), TeamDirectory::for_sport(sport, aliases))
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn directory(&self) -> &TeamDirectory {
        &self.directory
    }

    /// Every winner-market side of a Kalshi snapshot, resolved against this
    /// matcher's directory.
    ///
    /// Sides are grouped by event ticker, events in order of first appearance,
    /// so that matching scans both sides of an event together.
    pub fn market_sides(&self, snapshot: &KalshiSnapshot) -> Vec<MarketSide> {
        snapshot
            .markets
            .iter()
            .fold(
                IndexMap::<&str, Vec<&KalshiMarket>>::new(),
                |mut events, market| {
                    events
                        .entry(market.event_ticker.as_str())
                        .or_default()
                        .push(market);
                    events
                },
            )
            .into_values()
            .flatten()
            .filter_map(|market| MarketSide::from_kalshi(market, &self.directory))
            .collect()
    }

    /// Pair market sides with sportsbook games.
    ///
    /// Each event ticker appears in at most one [`MatchedEvent`]; output order
    /// follows `games`.
    pub fn match_events(
        &self,
        sides: &[MarketSide],
        games: impl IntoIterator<Item = SportsbookGame>,
    ) -> Vec<MatchedEvent> {
        let (matched, claimed) = games.into_iter().fold(
            (Vec::new(), ClaimedEvents::default()),
            |(mut matched, claimed), game| {
                let Some((away, home)) = self.pair_sides(sides, &game) else {
                    return (matched, claimed);
                };

                if claimed.contains(&away.event_ticker) {
                    debug!(
                        event_ticker = %away.event_ticker,
                        away_team = %game.away_team,
                        home_team = %game.home_team,
                        "Event already matched to an earlier game"
                    );
                    return (matched, claimed);
                }

                let claimed = claimed.claim(away.event_ticker.clone());
                matched.push(MatchedEvent {
                    event_ticker: away.event_ticker.clone(),
                    away: away.clone(),
                    home: home.clone(),
                    game,
                });
                (matched, claimed)
            },
        );

        debug!(
            sides = sides.len(),
            matched = matched.len(),
            claimed = claimed.len(),
            "Matched Kalshi events to sportsbook games"
        );
        matched
    }

    /// First sides naming the game's away and home team, if they share one
    /// non-empty event ticker.
    fn pair_sides<'a>(
        &self,
        sides: &'a [MarketSide],
        game: &SportsbookGame,
    ) -> Option<(&'a MarketSide, &'a MarketSide)> {
        let mut away = None;
        let mut home = None;

        for side in sides {
            if self.side_names(side, &game.away_team) {
                away.get_or_insert(side);
            } else if self.side_names(side, &game.home_team) {
                home.get_or_insert(side);
            }
        }

        let (away, home) = (away?, home?);
        if away.event_ticker.is_empty() || away.event_ticker != home.event_ticker {
            debug!(
                away_event = %away.event_ticker,
                home_event = %home.event_ticker,
                away_team = %game.away_team,
                home_team = %game.home_team,
                "Game sides resolve to different events"
            );
            return None;
        }

        Some((away, home))
    }

    /// True if a market side names the given sportsbook team.
    ///
    /// The canonical directory name is tried first. In flexible mode the raw
    /// Kalshi label stands in for a missing canonical name and is also tried
    /// on its own.
    fn side_names(&self, side: &MarketSide, team: &str) -> bool {
        let flexible = self.mode.is_flexible();
        let candidate = side
            .team
            .canonical
            .as_deref()
            .or_else(|| flexible.then_some(side.team.label.as_str()));

        candidate.is_some_and(|name| teams_match(name, team, self.mode))
            || (flexible && teams_match(&side.team.label, team, self.mode))
    }
}
