//! Per-sport and batch orchestration: load, match, evaluate, report.

use crate::{
    config::RunnerConfig,
    evaluator::OpportunityEvaluator,
    market::SportsbookGame,
    matcher::EventMatcher,
    names::TeamAliases,
    opportunity::Opportunity,
    report::OpportunityReport,
    sport::Sport,
};
use chrono::Utc;
use linecheck_data::{snapshot, KalshiSnapshot, OddsApiSnapshot, SnapshotError};
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{error, info, warn};

/// Errors that abort a single sport's run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Failed to load {sport} snapshot: {source}")]
    Snapshot {
        sport: Sport,
        #[source]
        source: SnapshotError,
    },

    #[error("Failed to write {sport} report: {source}")]
    Write {
        sport: Sport,
        #[source]
        source: SnapshotError,
    },

    #[error("Failed to load team aliases: {0}")]
    Aliases(#[source] SnapshotError),
}

impl RunError {
    /// True if the sport simply has no snapshot yet.
    pub fn is_missing_data(&self) -> bool {
        matches!(self, RunError::Snapshot { source, .. } if source.is_missing())
    }

    pub fn sport(&self) -> Option<Sport> {
        match self {
            RunError::Snapshot { sport, .. } | RunError::Write { sport, .. } => Some(*sport),
            RunError::Aliases(_) => None,
        }
    }
}

/// Outcome of one sport's run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SportSummary {
    pub sport: Sport,
    pub sport_name: &'static str,
    /// Markets the Kalshi fetch job reported
    pub total_markets: usize,
    /// Winner-market sides available for matching
    pub market_sides: usize,
    /// Games the sportsbook fetch job reported
    pub total_sportsbook_games: usize,
    /// Sportsbook games whose contestants are known
    pub sportsbook_games_with_teams: usize,
    pub matched_events: usize,
    /// Sorted by expected value, highest first
    pub opportunities: Vec<Opportunity>,
    /// Where the report was written, if it was
    pub report_path: Option<PathBuf>,
}

impl SportSummary {
    pub fn total_opportunities(&self) -> usize {
        self.opportunities.len()
    }

    /// Share of matched events that produced an opportunity, in percent.
    pub fn opportunity_rate(&self) -> Option<Decimal> {
        percent(self.total_opportunities(), self.matched_events)
    }

    /// Share of sportsbook games (with team data) that were matched, in percent.
    pub fn match_rate(&self) -> Option<Decimal> {
        percent(self.matched_events, self.sportsbook_games_with_teams)
    }
}

/// A sport whose run failed for a reason other than missing data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SportFailure {
    pub sport: Sport,
    pub error: String,
}

/// Outcome of a run over several sports.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BatchSummary {
    /// Sports that ran, in processing order
    pub sports: Vec<SportSummary>,
    /// Sports without snapshot data
    pub skipped: Vec<Sport>,
    pub failed: Vec<SportFailure>,
}

impl BatchSummary {
    pub fn has_data(&self) -> bool {
        !self.sports.is_empty()
    }

    pub fn total_markets(&self) -> usize {
        self.sports.iter().map(|summary| summary.total_markets).sum()
    }

    pub fn total_sportsbook_games(&self) -> usize {
        self.sports.iter().map(|summary| summary.total_sportsbook_games).sum()
    }

    pub fn sportsbook_games_with_teams(&self) -> usize {
        self.sports
            .iter()
            .map(|summary| summary.sportsbook_games_with_teams)
            .sum()
    }

    pub fn matched_events(&self) -> usize {
        self.sports.iter().map(|summary| summary.matched_events).sum()
    }

    pub fn total_opportunities(&self) -> usize {
        self.sports.iter().map(SportSummary::total_opportunities).sum()
    }

    pub fn opportunity_rate(&self) -> Option<Decimal> {
        percent(self.total_opportunities(), self.matched_events())
    }

    pub fn match_rate(&self) -> Option<Decimal> {
        percent(self.matched_events(), self.sportsbook_games_with_teams())
    }

    /// Every opportunity across sports, highest expected value first.
    ///
    /// Ties keep sport processing order.
    pub fn ranked(&self) -> Vec<(Sport, &Opportunity)> {
        let mut ranked = self
            .sports
            .iter()
            .flat_map(|summary| {
                summary
                    .opportunities
                    .iter()
                    .map(move |opportunity| (summary.sport, opportunity))
            })
            .collect::<Vec<_>>();

        ranked.sort_by(|(_, a), (_, b)| b.expected_value.cmp(&a.expected_value));
        ranked
    }
}

/// Runs the load -> match -> evaluate -> report pipeline per sport.
#[derive(Debug, Clone)]
pub struct SportRunner {
    config: RunnerConfig,
    aliases: TeamAliases,
    evaluator: OpportunityEvaluator,
}

impl SportRunner {
    /// Build a runner, loading the alias file if one is configured.
    pub fn new(config: RunnerConfig) -> Result<Self, RunError> {
        let aliases = match &config.aliases {
            Some(path) => TeamAliases::load(path).map_err(RunError::Aliases)?,
            None => TeamAliases::default(),
        };
        Ok(Self::with_aliases(config, aliases))
    }

    pub fn with_aliases(config: RunnerConfig, aliases: TeamAliases) -> Self {
        let evaluator = OpportunityEvaluator::new(config.evaluator.clone());
        Self {
            config,
            aliases,
            evaluator,
        }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Run one sport end to end.
    pub fn run(&self, sport: Sport) -> Result<SportSummary, RunError> {
        let markets: KalshiSnapshot = self.load(sport, sport.market_file())?;
        let games: OddsApiSnapshot = self.load(sport, sport.odds_file())?;

        let matcher = EventMatcher::for_sport(sport, &self.aliases);
        let sides = matcher.market_sides(&markets);
        let matched = matcher.match_events(&sides, SportsbookGame::collect(&games));
        let opportunities = self.evaluator.evaluate_all(&matched);

        let report_path = if self.config.write_reports {
            let report = OpportunityReport::new(sport, Utc::now(), opportunities.clone());
            let path = report
                .write_to(self.config.output_dir())
                .map_err(|source| RunError::Write { sport, source })?;
            Some(path)
        } else {
            None
        };

        let summary = SportSummary {
            sport,
            sport_name: sport.name(),
            total_markets: markets.total_markets(),
            market_sides: sides.len(),
            total_sportsbook_games: games.total_games(),
            sportsbook_games_with_teams: games.games_with_teams(),
            matched_events: matched.len(),
            opportunities,
            report_path,
        };

        info!(
            %sport,
            markets = summary.total_markets,
            sportsbook_games = summary.total_sportsbook_games,
            matched = summary.matched_events,
            opportunities = summary.total_opportunities(),
            "Sport run complete"
        );
        Ok(summary)
    }

    /// Run several sports independently.
    ///
    /// Missing data skips a sport; any other failure is recorded and the
    /// remaining sports still run.
    pub fn run_all(&self, sports: impl IntoIterator<Item = Sport>) -> BatchSummary {
        sports
            .into_iter()
            .fold(BatchSummary::default(), |mut batch, sport| {
                match self.run(sport) {
                    Ok(summary) => batch.sports.push(summary),
                    Err(err) if err.is_missing_data() => {
                        info!(%sport, %err, "No snapshot data, skipping sport");
                        batch.skipped.push(sport);
                    }
                    Err(err @ RunError::Write { .. }) => {
                        error!(%sport, %err, "Failed to write report");
                        batch.failed.push(SportFailure {
                            sport,
                            error: err.to_string(),
                        });
                    }
                    Err(err) => {
                        warn!(%sport, %err, "Sport run failed");
                        batch.failed.push(SportFailure {
                            sport,
                            error: err.to_string(),
                        });
                    }
                }
                batch
            })
    }

    fn load<T>(&self, sport: Sport, file_name: String) -> Result<T, RunError>
    where
        T: DeserializeOwned,
    {
        snapshot::load(self.config.data_dir.join(file_name))
            .map_err(|source| RunError::Snapshot { sport, source })
    }
}

fn percent(part: usize, whole: usize) -> Option<Decimal> {
    if whole == 0 {
        return None;
    }
    Some((Decimal::from(part) / Decimal::from(whole) * Decimal::ONE_HUNDRED).round_dp(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::path::Path;

    fn summary(sport: Sport, matched_events: usize, with_teams: usize) -> SportSummary {
        SportSummary {
            sport,
            sport_name: sport.name(),
            total_markets: 0,
            market_sides: 0,
            total_sportsbook_games: with_teams,
            sportsbook_games_with_teams: with_teams,
            matched_events,
            opportunities: vec![],
            report_path: None,
        }
    }

    fn runner(data_dir: &Path) -> SportRunner {
        SportRunner::with_aliases(
            RunnerConfig {
                data_dir: data_dir.to_path_buf(),
                ..Default::default()
            },
            TeamAliases::default(),
        )
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(1, 3), Some(dec!(33.3)));
        assert_eq!(percent(0, 4), Some(dec!(0)));
        assert_eq!(percent(2, 0), None);
    }

    #[test]
    fn test_batch_totals() {
        let batch = BatchSummary {
            sports: vec![summary(Sport::Nfl, 3, 4), summary(Sport::Nba, 1, 4)],
            skipped: vec![Sport::Ufc],
            failed: vec![],
        };

        assert!(batch.has_data());
        assert_eq!(batch.matched_events(), 4);
        assert_eq!(batch.sportsbook_games_with_teams(), 8);
        assert_eq!(batch.match_rate(), Some(dec!(50)));
        assert_eq!(batch.opportunity_rate(), Some(dec!(0)));
        assert!(batch.ranked().is_empty());
    }

    #[test]
    fn test_run_missing_data() {
        let dir = tempfile::tempdir().unwrap();
        let error = runner(dir.path()).run(Sport::Nfl).unwrap_err();

        assert!(error.is_missing_data());
        assert_eq!(error.sport(), Some(Sport::Nfl));
    }

    #[test]
    fn test_run_malformed_data() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(Sport::Nba.market_file()), "not json").unwrap();
        std::fs::write(dir.path().join(Sport::Nba.odds_file()), "{}").unwrap();

        let error = runner(dir.path()).run(Sport::Nba).unwrap_err();
        assert!(!error.is_missing_data());
        assert!(matches!(
            error,
            RunError::Snapshot {
                source: SnapshotError::Parse { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_run_all_skips_and_records_failures() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(Sport::Mlb.market_file()), "{ \"markets\": [] }").unwrap();
        std::fs::write(dir.path().join(Sport::Mlb.odds_file()), "{ \"games\": [] }").unwrap();
        std::fs::write(dir.path().join(Sport::Nhl.market_file()), "[").unwrap();
        std::fs::write(dir.path().join(Sport::Nhl.odds_file()), "{}").unwrap();

        let batch = runner(dir.path()).run_all([Sport::Nfl, Sport::Mlb, Sport::Nhl]);

        assert_eq!(batch.skipped, vec![Sport::Nfl]);
        assert_eq!(batch.sports.len(), 1);
        assert_eq!(batch.sports[0].sport, Sport::Mlb);
        assert_eq!(batch.sports[0].matched_events, 0);
        assert_eq!(batch.failed.len(), 1);
        assert_eq!(batch.failed[0].sport, Sport::Nhl);

        // An empty run still writes its report
        assert!(dir.path().join(Sport::Mlb.report_file()).exists());
    }

    #[test]
    fn test_new_with_missing_alias_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = RunnerConfig {
            data_dir: dir.path().to_path_buf(),
            aliases: Some(dir.path().join("aliases.json")),
            ..Default::default()
        };

        let error = SportRunner::new(config).unwrap_err();
        assert!(matches!(error, RunError::Aliases(_)));
        assert_eq!(error.sport(), None);
    }
}
