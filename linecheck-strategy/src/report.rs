//! Per-sport opportunity report persisted after every run.

use crate::{opportunity::Opportunity, sport::Sport};
use chrono::{DateTime, Utc};
use linecheck_data::{snapshot, SnapshotError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const REPORT_SOURCE: &str = "odds_comparison";
pub const REPORT_CONTENT_TYPE: &str = "positive_ev_opportunities";

/// Opportunities found for one sport, written as `odds_comparison_<sport>.json`.
///
/// ### Raw Payload
/// ```json
/// {
///   "source": "odds_comparison",
///   "content_type": "positive_ev_opportunities",
///   "sport": "nfl",
///   "query_time": "2025-10-01T12:00:00Z",
///   "total_opportunities": 1,
///   "opportunities": [ { "event_ticker": "KXNFLGAME-25OCT05LARSEA", "expected_value": 43.51 } ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OpportunityReport {
    pub source: String,
    pub content_type: String,
    pub sport: Sport,
    pub query_time: DateTime<Utc>,
    pub total_opportunities: usize,
    /// Sorted by expected value, highest first
    pub opportunities: Vec<Opportunity>,
}

impl OpportunityReport {
    pub fn new(sport: Sport, query_time: DateTime<Utc>, opportunities: Vec<Opportunity>) -> Self {
        Self {
            source: REPORT_SOURCE.to_string(),
            content_type: REPORT_CONTENT_TYPE.to_string(),
            sport,
            query_time,
            total_opportunities: opportunities.len(),
            opportunities,
        }
    }

    /// Write the report as `<dir>/odds_comparison_<sport>.json`, replacing any
    /// previous report for the sport.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf, SnapshotError> {
        let path = dir.as_ref().join(self.sport.report_file());
        snapshot::write(&path, self)?;
        Ok(path)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        snapshot::load(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_write_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let query_time = DateTime::from_timestamp(1_759_320_000, 0).unwrap();
        let report = OpportunityReport::new(Sport::Nhl, query_time, vec![]);

        let path = report.write_to(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("odds_comparison_nhl.json"));

        let loaded = OpportunityReport::load(&path).unwrap();
        assert_eq!(loaded, report);
        assert_eq!(loaded.source, "odds_comparison");
        assert_eq!(loaded.content_type, "positive_ev_opportunities");
        assert_eq!(loaded.total_opportunities, 0);
    }

    #[test]
    fn test_report_raw_fields() {
        let query_time = DateTime::from_timestamp(1_759_320_000, 0).unwrap();
        let report = OpportunityReport::new(Sport::Ncaab, query_time, vec![]);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["sport"], "ncaab");
        assert_eq!(json["query_time"], "2025-10-01T12:00:00Z");
        assert_eq!(json["opportunities"], serde_json::json!([]));
    }
}
