//! Loading snapshot files as the fetch jobs write them.

use linecheck_data::{KalshiSnapshot, OddsApiSnapshot, SnapshotError, snapshot};
use rust_decimal_macros::dec;
use std::path::Path;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

const KALSHI_NBA: &str = r#"
{
    "source": "kalshi",
    "sport": "nba",
    "total_markets_found": 5,
    "markets": [
        {
            "ticker": "KXNBAGAME-25OCT21BOSNYK-BOS",
            "title": "Boston at New York Winner?",
            "event_ticker": "KXNBAGAME-25OCT21BOSNYK",
            "market_data": { "yes_sub_title": "Boston", "yes_ask": 38, "yes_bid": 36 }
        },
        {
            "ticker": "KXNBAGAME-25OCT21BOSNYK-NYK",
            "title": "Boston at New York Winner?",
            "event_ticker": "KXNBAGAME-25OCT21BOSNYK",
            "market_data": { "yes_sub_title": "New York", "yes_ask": 64 }
        },
        {
            "ticker": "KXNBAMVP-26-SGA",
            "title": "Who will win NBA MVP?",
            "event_ticker": "KXNBAMVP-26",
            "market_data": { "yes_sub_title": "Shai Gilgeous-Alexander", "yes_ask": 31 }
        }
    ]
}
"#;

const ODDS_NBA: &str = r#"
{
    "source": "the_odds_api",
    "sport": "nba",
    "total_games": 3,
    "games": [
        {
            "matched": true,
            "odds_data": {
                "id": "a1",
                "commence_time": "2025-10-21T23:30:00Z",
                "away_team": "Boston Celtics",
                "home_team": "New York Knicks",
                "bookmakers": [
                    {
                        "key": "draftkings",
                        "title": "DraftKings",
                        "markets": [
                            { "key": "spreads", "outcomes": [ { "name": "Boston Celtics", "price": -110 } ] },
                            {
                                "key": "h2h",
                                "outcomes": [
                                    { "name": "Boston Celtics", "price": 150 },
                                    { "name": "New York Knicks", "price": -178 }
                                ]
                            }
                        ]
                    }
                ]
            }
        },
        { "matched": false, "odds_data": null },
        {
            "id": "a3",
            "bookmakers": [
                {
                    "key": "fanduel",
                    "markets": [
                        {
                            "key": "h2h",
                            "outcomes": [
                                { "name": "Miami Heat", "price": 120 },
                                { "name": "Orlando Magic", "price": -140 }
                            ]
                        }
                    ]
                }
            ]
        }
    ]
}
"#;

// ---------------------------------------------------------------------------
// Kalshi
// ---------------------------------------------------------------------------

#[test]
fn test_load_kalshi_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "kalshi_nba_winner_markets.json", KALSHI_NBA);

    let snapshot: KalshiSnapshot = snapshot::load(&path).unwrap();

    assert_eq!(snapshot.total_markets(), 5);
    assert_eq!(snapshot.markets.len(), 3);

    let winners = snapshot
        .markets
        .iter()
        .filter(|market| market.is_winner_market())
        .collect::<Vec<_>>();
    assert_eq!(winners.len(), 2);
    assert_eq!(winners[0].label(), "Boston");
    assert_eq!(winners[0].market_data.yes_ask, Some(38));
    assert_eq!(winners[1].label(), "New York");

    let title = winners[1].winner_title().unwrap();
    assert_eq!(title.away, "Boston");
    assert_eq!(title.home, "New York");
}

// ---------------------------------------------------------------------------
// The Odds API
// ---------------------------------------------------------------------------

#[test]
fn test_load_odds_snapshot_in_both_shapes() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "the_odds_api_nba_moneyline_odds.json", ODDS_NBA);

    let snapshot: OddsApiSnapshot = snapshot::load(&path).unwrap();

    assert_eq!(snapshot.total_games(), 3);
    assert_eq!(snapshot.games().count(), 2);
    assert_eq!(snapshot.games_with_teams(), 2);

    let games = snapshot.games().collect::<Vec<_>>();
    assert_eq!(games[0].team_names(), Some(("Boston Celtics", "New York Knicks")));
    assert_eq!(games[0].bookmakers[0].moneyline("New York Knicks"), Some(dec!(-178)));
    assert_eq!(games[0].bookmakers[0].moneyline("New York"), None);

    // Flattened entry without structured team fields
    assert_eq!(games[1].team_names(), Some(("Miami Heat", "Orlando Magic")));
    assert_eq!(games[1].bookmakers[0].moneyline("Miami Heat"), Some(dec!(120)));
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn test_missing_and_corrupt_snapshots() {
    let dir = tempfile::tempdir().unwrap();

    let missing = snapshot::load::<KalshiSnapshot>(dir.path().join("kalshi_ufc_winner_markets.json"))
        .unwrap_err();
    assert!(missing.is_missing());
    assert!(missing.to_string().starts_with("Snapshot not found"));

    let path = write(dir.path(), "the_odds_api_ufc_moneyline_odds.json", "{ \"games\": [");
    let corrupt = snapshot::load::<OddsApiSnapshot>(&path).unwrap_err();
    assert!(!corrupt.is_missing());
    assert!(matches!(corrupt, SnapshotError::Parse { .. }));
    assert_eq!(corrupt.path(), path.as_path());
}

#[test]
fn test_write_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reports").join("kalshi_nba_winner_markets.json");

    let snapshot: KalshiSnapshot = serde_json::from_str(KALSHI_NBA).unwrap();
    snapshot::write(&path, &snapshot).unwrap();

    let reloaded: KalshiSnapshot = snapshot::load(&path).unwrap();
    assert_eq!(reloaded, snapshot);
}
