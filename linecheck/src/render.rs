//! Terminal rendering of run summaries and opportunity breakdowns.
//!
//! Every function returns the rendered text; styling is applied through
//! owo-colors and honours the `--color` override.

use linecheck_strategy::{BatchSummary, Opportunity, Sport, SportSummary};
use owo_colors::{OwoColorize, Stream, Style};
use rust_decimal::Decimal;
use std::{fmt::Display, path::Path};

const RULE_WIDTH: usize = 80;

fn paint(text: impl Display, style: Style) -> String {
    text.if_supports_color(Stream::Stdout, |text| text.style(style))
        .to_string()
}

fn heading() -> Style {
    Style::new().cyan().bold()
}

fn label() -> Style {
    Style::new().yellow()
}

fn money_style(amount: Decimal) -> Style {
    if amount.is_sign_negative() && !amount.is_zero() {
        Style::new().red()
    } else {
        Style::new().green()
    }
}

fn double_rule() -> String {
    paint("=".repeat(RULE_WIDTH), Style::new().cyan())
}

fn single_rule() -> String {
    paint("-".repeat(RULE_WIDTH), Style::new().cyan())
}

/// Dollar amount with an explicit sign: `+$147.50`, `-$100.00`.
fn signed_money(amount: Decimal) -> String {
    let amount = amount.round_dp(2);
    if amount.is_sign_negative() && !amount.is_zero() {
        format!("-${:.2}", amount.abs())
    } else {
        format!("+${:.2}", amount.abs())
    }
}

/// Dollar amount with a sign only when negative: `$85.53`, `-$42.02`.
fn money(amount: Decimal) -> String {
    signed_money(amount).trim_start_matches('+').to_string()
}

fn percent(value: Decimal) -> String {
    format!("{:.2}%", value.round_dp(2))
}

struct Totals {
    kalshi_markets: usize,
    sportsbook_games: usize,
    sportsbook_games_with_teams: usize,
    matched: usize,
    opportunities: usize,
    match_rate: Option<Decimal>,
    opportunity_rate: Option<Decimal>,
}

impl From<&SportSummary> for Totals {
    fn from(summary: &SportSummary) -> Self {
        Self {
            kalshi_markets: summary.total_markets,
            sportsbook_games: summary.total_sportsbook_games,
            sportsbook_games_with_teams: summary.sportsbook_games_with_teams,
            matched: summary.matched_events,
            opportunities: summary.total_opportunities(),
            match_rate: summary.match_rate(),
            opportunity_rate: summary.opportunity_rate(),
        }
    }
}

impl From<&BatchSummary> for Totals {
    fn from(batch: &BatchSummary) -> Self {
        Self {
            kalshi_markets: batch.total_markets(),
            sportsbook_games: batch.total_sportsbook_games(),
            sportsbook_games_with_teams: batch.sportsbook_games_with_teams(),
            matched: batch.matched_events(),
            opportunities: batch.total_opportunities(),
            match_rate: batch.match_rate(),
            opportunity_rate: batch.opportunity_rate(),
        }
    }
}

fn summary_block(title: &str, totals: &Totals) -> String {
    let mut sportsbook = totals.sportsbook_games.to_string();
    if totals.sportsbook_games_with_teams != totals.sportsbook_games {
        sportsbook.push_str(&format!(
            " ({})",
            paint(
                format!("{} with team data", totals.sportsbook_games_with_teams),
                Style::new().cyan()
            )
        ));
    }

    let mut matched = totals.matched.to_string();
    if let Some(rate) = totals.match_rate {
        matched.push_str(&format!(
            " ({})",
            paint(
                format!("{rate:.1}% of sportsbook games matched"),
                Style::new().cyan()
            )
        ));
    }

    let mut opportunities = totals.opportunities.to_string();
    if let Some(rate) = totals.opportunity_rate {
        opportunities.push_str(&format!(" ({})", paint(format!("{rate:.1}%"), label())));
    }

    [
        String::new(),
        double_rule(),
        paint(format!("{title}:"), heading()),
        format!("  {} {}", paint("Total Kalshi games:", label()), totals.kalshi_markets),
        format!("  {} {}", paint("Total Sportsbook games:", label()), sportsbook),
        format!("  {} {}", paint("Matched & Analyzed:", label()), matched),
        format!(
            "  {} {}",
            paint("Positive EV opportunities:", Style::new().green()),
            opportunities
        ),
        double_rule(),
        String::new(),
    ]
    .join("\n")
}

/// Breakdown of one opportunity: consensus and Kalshi prices, the position
/// taken and its probability-weighted outcomes.
pub fn opportunity(opportunity: &Opportunity) -> String {
    let away = opportunity.away_team.as_str();
    let home = opportunity.home_team.as_str();
    let team = |name: &str| paint(format!("[{name}]"), Style::new().cyan());
    let title = |text: &str| paint(text, Style::new().blue());

    let away_weighted =
        opportunity.away_prob_normalized / Decimal::ONE_HUNDRED * opportunity.net_if_away_wins;
    let home_weighted =
        opportunity.home_prob_normalized / Decimal::ONE_HUNDRED * opportunity.net_if_home_wins;
    let total = away_weighted + home_weighted;

    let outcome = |name: &str, probability: Decimal, net: Decimal, weighted: Decimal| {
        format!(
            "  {} win: {} * {} = {}",
            paint(name, Style::new().cyan()),
            paint(percent(probability), label()),
            paint(signed_money(net), money_style(net)),
            paint(signed_money(weighted), money_style(weighted)),
        )
    };

    [
        format!(
            "{} {} {} @ {} {}",
            title("Sportsbook Odds:"),
            team(away),
            paint(percent(opportunity.away_prob_normalized), label()),
            team(home),
            paint(percent(opportunity.home_prob_normalized), label()),
        ),
        format!(
            "{} {} {} @ {} {}",
            title("Kalshi Odds:"),
            team(away),
            paint(format!("{}%", opportunity.away_contract_price.cents()), label()),
            team(home),
            paint(format!("{}%", opportunity.home_contract_price.cents()), label()),
        ),
        String::new(),
        format!(
            "{} Bet ${} on {} via {} {}",
            paint("Strategy:", Style::new().magenta()),
            opportunity.total_investment.normalize(),
            paint(&opportunity.bet_team_name, Style::new().green()),
            title("Kalshi"),
            paint("(NO HEDGE)", Style::new().red()),
        ),
        String::new(),
        paint("Expected Value:", Style::new().magenta().bold()),
        String::new(),
        outcome(away, opportunity.away_prob_normalized, opportunity.net_if_away_wins, away_weighted),
        outcome(home, opportunity.home_prob_normalized, opportunity.net_if_home_wins, home_weighted),
        String::new(),
        format!(
            "  {} = {} + {} = {}",
            paint("TOTAL", Style::new().magenta().bold()),
            money(away_weighted),
            money(home_weighted),
            paint(signed_money(total), money_style(total).bold()),
        ),
    ]
    .join("\n")
}

fn opportunity_list<'a>(
    opportunities: impl ExactSizeIterator<Item = (Sport, &'a Opportunity)>,
) -> String {
    let count = opportunities.len();
    opportunities
        .enumerate()
        .map(|(index, (sport, entry))| {
            format!(
                "{} {}\n{}\n{}",
                paint(format!("[{}/{count}]", index + 1), heading()),
                paint(format!("[{}]", sport.name()), Style::new().magenta()),
                single_rule(),
                opportunity(entry),
            )
        })
        .collect::<Vec<_>>()
        .join(format!("\n\n{}\n\n", double_rule()).as_str())
}

/// Summary and breakdowns for a single-sport run.
pub fn sport(summary: &SportSummary) -> String {
    let block = summary_block(
        &format!("SUMMARY ({})", summary.sport_name),
        &Totals::from(summary),
    );

    if summary.opportunities.is_empty() {
        return format!(
            "{block}\n{}\n",
            paint(
                format!("No positive EV opportunities found for {}.", summary.sport_name),
                Style::new().red()
            )
        );
    }

    let list = opportunity_list(
        summary
            .opportunities
            .iter()
            .map(|opportunity| (summary.sport, opportunity)),
    );
    format!("{block}\n{list}\n")
}

/// Summary and ranked breakdowns for a run over several sports.
pub fn batch(batch: &BatchSummary) -> String {
    let mut out = summary_block("SUMMARY", &Totals::from(batch));

    if !batch.failed.is_empty() {
        let failed = batch
            .failed
            .iter()
            .map(|failure| {
                format!(
                    "  {} {}",
                    paint(failure.sport.name(), Style::new().red()),
                    failure.error
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        out.push_str(&format!(
            "\n{}\n{failed}\n",
            paint("Failed sports:", Style::new().red().bold())
        ));
    }

    let ranked = batch.ranked();
    if ranked.is_empty() {
        out.push_str(&format!(
            "\n{}\n",
            paint(
                "No positive EV opportunities found across all sports.",
                Style::new().red()
            )
        ));
        return out;
    }

    out.push_str(&format!(
        "\n{}\n{}\n{}\n{}\n\n",
        double_rule(),
        paint(
            format!("ALL {} POSITIVE EV OPPORTUNITIES ACROSS ALL SPORTS", ranked.len()),
            heading()
        ),
        paint("(sorted by Expected Value)", label()),
        double_rule(),
    ));
    out.push_str(&opportunity_list(ranked.into_iter()));
    out.push('\n');
    out
}

/// Notice printed when a single sport has no snapshot data.
pub fn missing_sport(sport: Sport, data_dir: &Path) -> String {
    format!(
        "No data available for {}.\n\nExpected snapshot files in {}:\n  {}\n  {}\n",
        sport.name(),
        data_dir.display(),
        sport.market_file(),
        sport.odds_file(),
    )
}

/// Notice printed when no sport has snapshot data.
pub fn missing_all(data_dir: &Path) -> String {
    format!(
        "No data available for any sport.\n\nTo generate data, run the Kalshi and sportsbook fetch jobs for a sport so that {} holds:\n  kalshi_<sport>_winner_markets.json\n  the_odds_api_<sport>_moneyline_odds.json\n",
        data_dir.display(),
    )
}
