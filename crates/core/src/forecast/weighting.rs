//! Probability weighting policy

use resplan_domain::{Probability, ProbabilityBracket, ProbabilityWeights};

/// Bracket a probability falls into. Total over `0..=100`.
#[must_use]
pub const fn bracket_of(probability: Probability) -> ProbabilityBracket {
    probability.bracket()
}

/// `amount` scaled by the weight of the probability's bracket.
///
/// A bracket with no configured weight yields 0. The result is rounded to
/// the nearest unit, halves away from zero.
#[must_use]
pub fn weighted_value(amount: u64, probability: Probability, weights: &ProbabilityWeights) -> u64 {
    scale_percent(amount, weights.weight_for(bracket_of(probability)))
}

/// `amount` scaled by the raw probability, i.e. its expected value.
#[must_use]
pub fn expected_value(amount: u64, probability: Probability) -> u64 {
    scale_percent(amount, probability.percent())
}

fn scale_percent(amount: u64, percent: u8) -> u64 {
    let scaled = (u128::from(amount) * u128::from(percent) + 50) / 100;
    u64::try_from(scaled).unwrap_or(u64::MAX)
}
