//! Payout and expected-value calculations for a fixed stake.
//!
//! Uses rust_decimal for exact precision; payouts are rounded to cents with
//! banker's rounding.

use crate::{market::PriceQuote, odds::AmericanOdds};
use derive_more::Constructor;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Profit and loss of one position, settled in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Constructor)]
pub struct Payout {
    /// Net profit if the backed contestant wins (after fees)
    #[serde(with = "rust_decimal::serde::float")]
    pub profit_if_win: Decimal,
    /// Net result if the backed contestant loses (always `-stake`)
    #[serde(with = "rust_decimal::serde::float")]
    pub loss_if_lose: Decimal,
}

/// Payout calculator for Kalshi contracts and sportsbook prices.
pub struct PayoutCalculator;

impl PayoutCalculator {
    /// Payout of spending `stake` on YES contracts at `price`.
    ///
    /// Formula: `contracts = stake / (price / 100)`; each winning contract
    /// pays $1 less `fee_percent`.
    ///
    /// A price of 0 is unpurchasable and yields `(0, -stake)`.
    pub fn contract_payout(stake: Decimal, price: PriceQuote, fee_percent: Decimal) -> Payout {
        let loss_if_lose = round_money(-stake);
        if price.is_zero() {
            return Payout::new(Decimal::ZERO, loss_if_lose);
        }

        let contracts = stake / price.as_fraction();
        let payout_per_contract = Decimal::ONE - fee_percent / Decimal::ONE_HUNDRED;
        let profit_if_win = contracts * payout_per_contract - stake;

        Payout::new(round_money(profit_if_win), loss_if_lose)
    }

    /// Payout of placing `stake` at American `odds` with a sportsbook.
    ///
    /// - Negative odds: profit is `stake * 100 / |odds|`
    /// - Positive odds: profit is `stake * odds / 100`
    pub fn fixed_odds_payout(stake: Decimal, odds: AmericanOdds) -> Payout {
        let profit = if odds < 0 {
            stake * Decimal::ONE_HUNDRED / Decimal::from(odds.unsigned_abs())
        } else {
            stake * Decimal::from(odds) / Decimal::ONE_HUNDRED
        };

        Payout::new(round_money(profit), round_money(-stake))
    }

    /// Expected value of a position on a two-outcome event.
    ///
    /// `prob_a` and `prob_b` are percentages; `net_if_a_wins` / `net_if_b_wins`
    /// are the position's result under each outcome. The result is unrounded.
    pub fn expected_value(
        prob_a: Decimal,
        prob_b: Decimal,
        net_if_a_wins: Decimal,
        net_if_b_wins: Decimal,
    ) -> Decimal {
        prob_a / Decimal::ONE_HUNDRED * net_if_a_wins
            + prob_b / Decimal::ONE_HUNDRED * net_if_b_wins
    }
}

/// Round a monetary amount to cents.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp(2)
}
