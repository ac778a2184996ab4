use crate::sport::Sport;
use fnv::FnvHashMap;
use indexmap::IndexMap;
use linecheck_data::{snapshot, SnapshotError};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::{path::Path, sync::OnceLock};

/// Kalshi label -> sportsbook display name, per sport.
type NameTable = &'static [(&'static str, &'static str)];

static BUILTIN_DIRECTORIES: OnceLock<FnvHashMap<Sport, TeamDirectory>> = OnceLock::new();

/// Curated mapping from Kalshi contestant labels to canonical sportsbook names
/// for one sport.
///
/// Lookups are exact on the (trimmed) label. A label missing from the
/// directory resolves to `None`, which for strictly-matched sports means the
/// market side can never be paired.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamDirectory {
    entries: FnvHashMap<SmolStr, SmolStr>,
}

impl TeamDirectory {
    /// Built-in directory for a sport (empty for sports without curated names).
    pub fn builtin(sport: Sport) -> &'static TeamDirectory {
        static EMPTY: OnceLock<TeamDirectory> = OnceLock::new();

        BUILTIN_DIRECTORIES
            .get_or_init(|| {
                Sport::ALL
                    .into_iter()
                    .map(|sport| (sport, Self::from_entries(builtin_table(sport).iter().copied())))
                    .collect()
            })
            .get(&sport)
            .unwrap_or_else(|| EMPTY.get_or_init(TeamDirectory::default))
    }

    /// Built-in directory for a sport, extended with any user-supplied aliases.
    ///
    /// User aliases take precedence over built-in entries with the same label.
    pub fn for_sport(sport: Sport, aliases: &TeamAliases) -> TeamDirectory {
        let mut directory = Self::builtin(sport).clone();
        directory.extend(aliases.for_sport(sport));
        directory
    }

    pub fn from_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<SmolStr>,
        V: Into<SmolStr>,
    {
        let mut directory = Self::default();
        directory.extend(entries);
        directory
    }

    /// Add or replace entries.
    pub fn extend<K, V>(&mut self, entries: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<SmolStr>,
        V: Into<SmolStr>,
    {
        self.entries.extend(
            entries
                .into_iter()
                .map(|(label, name)| (label.into(), name.into())),
        );
    }

    /// Canonical sportsbook name for a Kalshi label.
    pub fn resolve(&self, label: &str) -> Option<&str> {
        self.entries.get(label.trim()).map(SmolStr::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// User-supplied team aliases, keyed by sport code.
///
/// ### Raw Payload
/// ```json
/// {
///   "ncaab": { "Saint Mary's": "Saint Mary's Gaels", "UConn": "Connecticut Huskies" },
///   "nhl": { "Utah": "Utah Hockey Club" }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct TeamAliases(IndexMap<SmolStr, IndexMap<SmolStr, SmolStr>>);

impl TeamAliases {
    /// Load an alias file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        snapshot::load(path)
    }

    /// Aliases declared for a sport (keys are matched case-insensitively
    /// against [`Sport::code`]).
    pub fn for_sport(&self, sport: Sport) -> impl Iterator<Item = (SmolStr, SmolStr)> + '_ {
        self.0
            .iter()
            .filter(move |(code, _)| code.trim().eq_ignore_ascii_case(sport.code()))
            .flat_map(|(_, entries)| entries.iter())
            .map(|(label, name)| (label.clone(), name.clone()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(IndexMap::is_empty)
    }
}

impl<S> FromIterator<(Sport, S, S)> for TeamAliases
where
    S: Into<SmolStr>,
{
    fn from_iter<T: IntoIterator<Item = (Sport, S, S)>>(iter: T) -> Self {
        let mut aliases = IndexMap::<SmolStr, IndexMap<SmolStr, SmolStr>>::new();
        for (sport, label, name) in iter {
            aliases
                .entry(SmolStr::new_static(sport.code()))
                .or_default()
                .insert(label.into(), name.into());
        }
        Self(aliases)
    }
}

fn builtin_table(sport: Sport) -> NameTable {
    match sport {
        Sport::Nfl => NFL_TEAMS,
        Sport::Mlb => MLB_TEAMS,
        Sport::Nba => NBA_TEAMS,
        Sport::Ncaab | Sport::Ncaaf | Sport::Ufc | Sport::Nhl | Sport::Mls | Sport::Ncaabw => &[],
    }
}

const NFL_TEAMS: NameTable = &[
    ("Arizona", "Arizona Cardinals"),
    ("Atlanta", "Atlanta Falcons"),
    ("Baltimore", "Baltimore Ravens"),
    ("Buffalo", "Buffalo Bills"),
    ("Carolina", "Carolina Panthers"),
    ("Chicago", "Chicago Bears"),
    ("Cincinnati", "Cincinnati Bengals"),
    ("Cleveland", "Cleveland Browns"),
    ("Dallas", "Dallas Cowboys"),
    ("Denver", "Denver Broncos"),
    ("Detroit", "Detroit Lions"),
    ("Green Bay", "Green Bay Packers"),
    ("Houston", "Houston Texans"),
    ("Indianapolis", "Indianapolis Colts"),
    ("Jacksonville", "Jacksonville Jaguars"),
    ("Kansas City", "Kansas City Chiefs"),
    ("Las Vegas", "Las Vegas Raiders"),
    ("Los Angeles C", "Los Angeles Chargers"),
    ("Los Angeles R", "Los Angeles Rams"),
    ("Miami", "Miami Dolphins"),
    ("Minnesota", "Minnesota Vikings"),
    ("New England", "New England Patriots"),
    ("New Orleans", "New Orleans Saints"),
    ("New York G", "New York Giants"),
    ("New York J", "New York Jets"),
    ("Philadelphia", "Philadelphia Eagles"),
    ("Pittsburgh", "Pittsburgh Steelers"),
    ("San Francisco", "San Francisco 49ers"),
    ("Seattle", "Seattle Seahawks"),
    ("Tampa Bay", "Tampa Bay Buccaneers"),
    ("Tennessee", "Tennessee Titans"),
    ("Washington", "Washington Commanders"),
];

const MLB_TEAMS: NameTable = &[
    ("Arizona D", "Arizona Diamondbacks"),
    ("Atlanta B", "Atlanta Braves"),
    ("Baltimore O", "Baltimore Orioles"),
    ("Boston", "Boston Red Sox"),
    ("Chicago C", "Chicago Cubs"),
    ("Chicago W", "Chicago White Sox"),
    ("Cincinnati", "Cincinnati Reds"),
    ("Cleveland", "Cleveland Guardians"),
    ("Colorado", "Colorado Rockies"),
    ("Detroit", "Detroit Tigers"),
    ("Houston", "Houston Astros"),
    ("Kansas City", "Kansas City Royals"),
    ("Los Angeles A", "Los Angeles Angels"),
    ("Los Angeles D", "Los Angeles Dodgers"),
    ("Miami", "Miami Marlins"),
    ("Milwaukee", "Milwaukee Brewers"),
    ("Minnesota", "Minnesota Twins"),
    ("New York M", "New York Mets"),
    ("New York Y", "New York Yankees"),
    ("Oakland", "Oakland Athletics"),
    ("Philadelphia", "Philadelphia Phillies"),
    ("Pittsburgh", "Pittsburgh Pirates"),
    ("San Diego", "San Diego Padres"),
    ("San Francisco", "San Francisco Giants"),
    ("Seattle", "Seattle Mariners"),
    ("St. Louis", "St. Louis Cardinals"),
    ("Tampa Bay", "Tampa Bay Rays"),
    ("Texas", "Texas Rangers"),
    ("Toronto", "Toronto Blue Jays"),
    ("Washington", "Washington Nationals"),
];

// Kalshi lists the Clippers as "Los Angeles C" and the Knicks as plain "New York"
const NBA_TEAMS: NameTable = &[
    ("Atlanta", "Atlanta Hawks"),
    ("Boston", "Boston Celtics"),
    ("Brooklyn", "Brooklyn Nets"),
    ("Charlotte", "Charlotte Hornets"),
    ("Chicago", "Chicago Bulls"),
    ("Cleveland", "Cleveland Cavaliers"),
    ("Dallas", "Dallas Mavericks"),
    ("Denver", "Denver Nuggets"),
    ("Detroit", "Detroit Pistons"),
    ("Golden State", "Golden State Warriors"),
    ("Houston", "Houston Rockets"),
    ("Indiana", "Indiana Pacers"),
    ("Los Angeles C", "LA Clippers"),
    ("Los Angeles L", "Los Angeles Lakers"),
    ("Memphis", "Memphis Grizzlies"),
    ("Miami", "Miami Heat"),
    ("Milwaukee", "Milwaukee Bucks"),
    ("Minnesota", "Minnesota Timberwolves"),
    ("New Orleans", "New Orleans Pelicans"),
    ("New York", "New York Knicks"),
    ("Oklahoma City", "Oklahoma City Thunder"),
    ("Orlando", "Orlando Magic"),
    ("Philadelphia", "Philadelphia 76ers"),
    ("Phoenix", "Phoenix Suns"),
    ("Portland", "Portland Trail Blazers"),
    ("Sacramento", "Sacramento Kings"),
    ("San Antonio", "San Antonio Spurs"),
    ("Toronto", "Toronto Raptors"),
    ("Utah", "Utah Jazz"),
    ("Washington", "Washington Wizards"),
];
