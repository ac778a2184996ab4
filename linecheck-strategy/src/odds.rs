//! Probability conversion for fixed-odds prices.
//!
//! All probabilities are percentages in `[0, 100]`, kept as [`Decimal`] so
//! that reference points such as `-100` / `+100` land on exactly `50`.

use rust_decimal::Decimal;

const FIFTY: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// American odds: negative for the favourite (stake needed to win 100),
/// positive for the underdog (profit on a stake of 100).
pub type AmericanOdds = i64;

/// Implied win probability (percent) of an American-odds price, vig included.
///
/// - Negative odds (e.g., -125): `|odds| / (|odds| + 100) * 100`
/// - Positive odds (e.g., +105): `100 / (odds + 100) * 100`
pub fn odds_to_probability(odds: AmericanOdds) -> Decimal {
    if odds < 0 {
        let magnitude = Decimal::from(odds.unsigned_abs());
        magnitude / (magnitude + Decimal::ONE_HUNDRED) * Decimal::ONE_HUNDRED
    } else {
        Decimal::ONE_HUNDRED / (Decimal::from(odds) + Decimal::ONE_HUNDRED) * Decimal::ONE_HUNDRED
    }
}

/// Remove the bookmaker margin from a two-way market.
///
/// Both implied probabilities are rescaled so they sum to 100 while keeping
/// their ratio. A zero sum (degenerate input) yields `(50, 50)`.
pub fn remove_vig(prob_a: Decimal, prob_b: Decimal) -> (Decimal, Decimal) {
    let total = prob_a + prob_b;
    if total.is_zero() {
        return (FIFTY, FIFTY);
    }

    (
        prob_a / total * Decimal::ONE_HUNDRED,
        prob_b / total * Decimal::ONE_HUNDRED,
    )
}
