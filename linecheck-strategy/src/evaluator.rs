//! Valuation of matched events against the sportsbook consensus.
//!
//! The sportsbook market is taken as ground truth: bookmaker moneylines are
//! averaged, converted to probabilities and stripped of their margin. Each
//! Kalshi contract is then valued at its own (fee-adjusted) payout against
//! those probabilities.

use crate::{
    config::EvaluatorConfig,
    market::SportsbookGame,
    matcher::MatchedEvent,
    odds::{odds_to_probability, remove_vig, AmericanOdds},
    opportunity::{AverageOdds, EventValuation, Opportunity, Position, Side},
    payout::PayoutCalculator,
};
use rust_decimal::{prelude::ToPrimitive, Decimal};
use tracing::{debug, info};

impl AverageOdds {
    /// Mean of a set of American-odds prices; `None` if there are none.
    pub fn from_prices(prices: impl IntoIterator<Item = Decimal>) -> Option<Self> {
        let (sum, bookmakers) = prices
            .into_iter()
            .fold((Decimal::ZERO, 0usize), |(sum, count), price| (sum + price, count + 1));

        if bookmakers == 0 {
            return None;
        }

        Some(Self {
            odds: sum / Decimal::from(bookmakers),
            bookmakers,
        })
    }

    /// Consensus moneyline of `team` across every bookmaker quoting it.
    pub fn for_team(game: &SportsbookGame, team: &str) -> Option<Self> {
        Self::from_prices(game.moneylines(team))
    }

    /// Average truncated toward zero to whole American odds.
    pub fn whole_odds(&self) -> Option<AmericanOdds> {
        self.odds.trunc().to_i64()
    }
}

/// Values matched events and keeps the positive expected-value ones.
#[derive(Debug, Clone)]
pub struct OpportunityEvaluator {
    config: EvaluatorConfig,
}

impl OpportunityEvaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Value both single-leg positions of an event.
    ///
    /// Returns `None` when either contestant has no bookmaker moneyline or
    /// either Kalshi quote is unusable.
    pub fn value_event(&self, event: &MatchedEvent) -> Option<EventValuation> {
        let game = &event.game;

        let (Some(away_odds), Some(home_odds)) = (
            AverageOdds::for_team(game, &game.away_team),
            AverageOdds::for_team(game, &game.home_team),
        ) else {
            debug!(
                event_ticker = %event.event_ticker,
                away_team = %game.away_team,
                home_team = %game.home_team,
                "Skipping event without moneylines for both teams"
            );
            return None;
        };

        let (Some(away_price), Some(home_price)) = (event.away.price, event.home.price) else {
            debug!(
                event_ticker = %event.event_ticker,
                "Skipping event with an out-of-range Kalshi ask"
            );
            return None;
        };

        let away_sportsbook_prob = odds_to_probability(away_odds.whole_odds()?);
        let home_sportsbook_prob = odds_to_probability(home_odds.whole_odds()?);
        let (away_prob, home_prob) = remove_vig(away_sportsbook_prob, home_sportsbook_prob);

        let EvaluatorConfig {
            stake, fee_percent, ..
        } = self.config;

        let away_payout = PayoutCalculator::contract_payout(stake, away_price, fee_percent);
        let away_ev = PayoutCalculator::expected_value(
            away_prob,
            home_prob,
            away_payout.profit_if_win,
            away_payout.loss_if_lose,
        );

        let home_payout = PayoutCalculator::contract_payout(stake, home_price, fee_percent);
        let home_ev = PayoutCalculator::expected_value(
            away_prob,
            home_prob,
            home_payout.loss_if_lose,
            home_payout.profit_if_win,
        );

        let valuation = EventValuation {
            away_odds,
            home_odds,
            away_sportsbook_prob,
            home_sportsbook_prob,
            away_prob_normalized: away_prob,
            home_prob_normalized: home_prob,
            away: Position::new(Side::Away, away_price, away_payout, away_ev),
            home: Position::new(Side::Home, home_price, home_payout, home_ev),
        };

        debug!(
            event_ticker = %event.event_ticker,
            away_ev = %away_ev,
            home_ev = %home_ev,
            "Valued event"
        );
        Some(valuation)
    }

    /// Best position of an event, if its expected value is positive and,
    /// rounded to cents, strictly above the configured minimum.
    pub fn evaluate(&self, event: &MatchedEvent) -> Option<Opportunity> {
        let valuation = self.value_event(event)?;
        if valuation.best().expected_value <= Decimal::ZERO {
            return None;
        }

        let opportunity = valuation.into_opportunity(event, self.config.stake);
        if opportunity.expected_value <= self.config.min_expected_value {
            return None;
        }

        info!(
            event_ticker = %opportunity.event_ticker,
            bet_team = %opportunity.bet_team_name,
            price = opportunity.bet_price().cents(),
            expected_value = %opportunity.expected_value,
            "Positive EV opportunity found"
        );
        Some(opportunity)
    }

    /// Every opportunity across `events`, highest expected value first.
    ///
    /// Events with equal expected value keep their input order.
    pub fn evaluate_all<'a>(
        &self,
        events: impl IntoIterator<Item = &'a MatchedEvent>,
    ) -> Vec<Opportunity> {
        let mut opportunities = events
            .into_iter()
            .filter_map(|event| self.evaluate(event))
            .collect::<Vec<_>>();

        opportunities.sort_by(|a, b| b.expected_value.cmp(&a.expected_value));
        opportunities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::{MarketSide, PriceQuote, TeamRef};
    use linecheck_data::{Bookmaker, BookmakerMarket, OddsOutcome};
    use rust_decimal_macros::dec;
    use smol_str::SmolStr;

    fn bookmaker(key: &str, away: (&str, Decimal), home: (&str, Decimal)) -> Bookmaker {
        Bookmaker {
            key: Some(SmolStr::new(key)),
            title: None,
            markets: vec![BookmakerMarket {
                key: SmolStr::new("h2h"),
                outcomes: vec![
                    OddsOutcome {
                        name: away.0.to_string(),
                        price: Some(away.1),
                    },
                    OddsOutcome {
                        name: home.0.to_string(),
                        price: Some(home.1),
                    },
                ],
            }],
        }
    }

    fn side(label: &str, cents: Option<i64>) -> MarketSide {
        MarketSide {
            event_ticker: SmolStr::new("EV1"),
            ticker: None,
            title: "A at B Winner?".to_string(),
            team: TeamRef {
                label: SmolStr::new(label),
                canonical: None,
            },
            price: cents.and_then(PriceQuote::new),
        }
    }

    fn event(away_cents: i64, home_cents: i64, lines: &[(i64, i64)]) -> MatchedEvent {
        let bookmakers = lines
            .iter()
            .enumerate()
            .map(|(i, (away, home))| {
                bookmaker(
                    &format!("book{i}"),
                    ("Away Team", Decimal::from(*away)),
                    ("Home Team", Decimal::from(*home)),
                )
            })
            .collect();

        MatchedEvent {
            event_ticker: SmolStr::new("EV1"),
            away: side("Away", Some(away_cents)),
            home: side("Home", Some(home_cents)),
            game: SportsbookGame {
                id: None,
                away_team: "Away Team".to_string(),
                home_team: "Home Team".to_string(),
                commence_time: None,
                bookmakers,
            },
        }
    }

    fn evaluator() -> OpportunityEvaluator {
        OpportunityEvaluator::new(EvaluatorConfig::default())
    }

    #[test]
    fn test_average_odds() {
        let average = AverageOdds::from_prices([dec!(-120), dec!(-110), dec!(-130)]).unwrap();
        assert_eq!(average.odds, dec!(-120));
        assert_eq!(average.bookmakers, 3);

        assert!(AverageOdds::from_prices([]).is_none());
    }

    #[test]
    fn test_average_odds_truncates_toward_zero() {
        let favourite = AverageOdds::from_prices([dec!(-115), dec!(-120)]).unwrap();
        assert_eq!(favourite.odds, dec!(-117.5));
        assert_eq!(favourite.whole_odds(), Some(-117));

        let underdog = AverageOdds::from_prices([dec!(105), dec!(110)]).unwrap();
        assert_eq!(underdog.whole_odds(), Some(107));
    }

    #[test]
    fn test_value_event() {
        let valuation = evaluator()
            .value_event(&event(40, 65, &[(-150, 130)]))
            .unwrap();

        assert_eq!(valuation.away_sportsbook_prob, dec!(60));
        assert_eq!(valuation.home_sportsbook_prob.round_dp(2), dec!(43.48));
        assert_eq!(valuation.away_prob_normalized.round_dp(2), dec!(57.98));
        assert_eq!(valuation.home_prob_normalized.round_dp(2), dec!(42.02));

        assert_eq!(valuation.away.payout.profit_if_win, dec!(147.50));
        assert_eq!(valuation.away.expected_value.round_dp(2), dec!(43.51));
        assert_eq!(valuation.home.payout.profit_if_win, dec!(52.31));
        assert_eq!(valuation.home.expected_value.round_dp(2), dec!(-36.00));
        assert_eq!(valuation.best().side, Side::Away);
    }

    #[test]
    fn test_evaluate_returns_best_side() {
        let opportunity = evaluator().evaluate(&event(40, 65, &[(-150, 130)])).unwrap();

        assert_eq!(opportunity.bet_team, Side::Away);
        assert_eq!(opportunity.bet_team_name, "Away Team");
        assert_eq!(opportunity.expected_value, dec!(43.51));
        assert_eq!(opportunity.net_if_away_wins, dec!(147.50));
        assert_eq!(opportunity.net_if_home_wins, dec!(-100));
        assert_eq!(opportunity.avg_away_odds, dec!(-150));
        assert_eq!(opportunity.total_investment, dec!(100));
    }

    #[test]
    fn test_evaluate_home_side() {
        // -110 / -110 priced 60 / 40 at Kalshi: home is the cheap side
        let opportunity = evaluator().evaluate(&event(60, 40, &[(-110, -110)])).unwrap();

        assert_eq!(opportunity.bet_team, Side::Home);
        assert_eq!(opportunity.bet_team_name, "Home Team");
        assert_eq!(opportunity.expected_value, dec!(23.75));
        assert_eq!(opportunity.net_if_away_wins, dec!(-100));
        assert_eq!(opportunity.net_if_home_wins, dec!(147.50));
    }

    #[test]
    fn test_evaluate_rejects_fairly_priced_event() {
        // Three books averaging -120 / +110, Kalshi at 55 / 48
        let event = event(55, 48, &[(-120, 110), (-110, 105), (-130, 115)]);

        let valuation = evaluator().value_event(&event).unwrap();
        assert_eq!(valuation.away_odds.odds, dec!(-120));
        assert_eq!(valuation.home_odds.odds, dec!(110));
        assert_eq!(valuation.away.expected_value.round_dp(2), dec!(-3.90));
        assert_eq!(valuation.home.expected_value.round_dp(2), dec!(-3.87));

        assert!(evaluator().evaluate(&event).is_none());
    }

    #[test]
    fn test_evaluate_applies_threshold() {
        // Away EV of 17.46 at 45 cents
        let event = event(45, 48, &[(-120, 110)]);
        assert!(evaluator().evaluate(&event).is_some());

        let strict = OpportunityEvaluator::new(EvaluatorConfig {
            min_expected_value: dec!(17.46),
            ..Default::default()
        });
        assert!(strict.evaluate(&event).is_none());

        let lenient = OpportunityEvaluator::new(EvaluatorConfig {
            min_expected_value: dec!(17.45),
            ..Default::default()
        });
        assert_eq!(lenient.evaluate(&event).unwrap().expected_value, dec!(17.46));
    }

    #[test]
    fn test_evaluate_never_reports_non_positive_ev() {
        let event = event(55, 48, &[(-120, 110)]);
        let permissive = OpportunityEvaluator::new(EvaluatorConfig {
            min_expected_value: dec!(-50),
            ..Default::default()
        });
        assert!(permissive.evaluate(&event).is_none());
    }

    #[test]
    fn test_value_event_skips_missing_moneyline() {
        let mut event = event(40, 65, &[(-150, 130)]);
        event.game.bookmakers[0].markets[0].outcomes.pop();
        assert!(evaluator().value_event(&event).is_none());
    }

    #[test]
    fn test_value_event_skips_invalid_price() {
        let mut event = event(40, 65, &[(-150, 130)]);
        event.home.price = None;
        assert!(evaluator().value_event(&event).is_none());
    }

    #[test]
    fn test_zero_price_is_valued_as_void() {
        let valuation = evaluator().value_event(&event(0, 65, &[(-150, 130)])).unwrap();
        assert_eq!(valuation.away.payout.profit_if_win, Decimal::ZERO);
        assert_eq!(valuation.away.expected_value.round_dp(2), dec!(-42.02));
    }

    #[test]
    fn test_evaluate_all_sorts_by_expected_value() {
        let mut small = event(45, 48, &[(-120, 110)]);
        small.event_ticker = SmolStr::new("SMALL");
        let mut large = event(40, 65, &[(-150, 130)]);
        large.event_ticker = SmolStr::new("LARGE");
        let mut none = event(55, 48, &[(-120, 110)]);
        none.event_ticker = SmolStr::new("NONE");

        let opportunities = evaluator().evaluate_all(&[small, none, large]);
        let tickers = opportunities
            .iter()
            .map(|opportunity| opportunity.event_ticker.as_str())
            .collect::<Vec<_>>();
        assert_eq!(tickers, vec!["LARGE", "SMALL"]);
    }
}
