//! Probability values, brackets and bracket weights

use std::fmt;

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::constants::{
    DEFAULT_WEIGHT_HIGH, DEFAULT_WEIGHT_LOW, DEFAULT_WEIGHT_MEDIUM, DEFAULT_WEIGHT_UNCERTAIN,
    PROBABILITY_HIGH_MIN, PROBABILITY_LOW_MIN, PROBABILITY_MAX, PROBABILITY_MEDIUM_MIN,
};
use crate::errors::{ResplanError, Result};
use crate::impl_domain_status_conversions;

/// Win probability of a lead, an integer percent in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Probability(u8);

impl Probability {
    pub const ZERO: Self = Self(0);

    /// # Errors
    /// Returns `ResplanError::InvalidInput` for values above 100.
    pub fn new(percent: u8) -> Result<Self> {
        if percent > PROBABILITY_MAX {
            return Err(ResplanError::InvalidInput(format!(
                "probability must be within 0-100, got {percent}"
            )));
        }
        Ok(Self(percent))
    }

    #[must_use]
    pub const fn percent(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn bracket(self) -> ProbabilityBracket {
        ProbabilityBracket::from_percent(self.0)
    }
}

impl TryFrom<i64> for Probability {
    type Error = ResplanError;

    fn try_from(value: i64) -> Result<Self> {
        let percent = u8::try_from(value).map_err(|_| {
            ResplanError::InvalidInput(format!("probability must be within 0-100, got {value}"))
        })?;
        Self::new(percent)
    }
}

impl From<Probability> for u8 {
    fn from(value: Probability) -> Self {
        value.0
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Discrete probability ranges used to pick a forecast weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "UPPERCASE")]
pub enum ProbabilityBracket {
    High,
    Medium,
    Low,
    Uncertain,
}

impl_domain_status_conversions!(ProbabilityBracket {
    High => "high",
    Medium => "medium",
    Low => "low",
    Uncertain => "uncertain",
});

impl ProbabilityBracket {
    /// All brackets, highest first.
    pub const ALL: [Self; 4] = [Self::High, Self::Medium, Self::Low, Self::Uncertain];

    /// Bracket for a raw percent. Inclusive lower bounds, no gaps.
    #[must_use]
    pub const fn from_percent(percent: u8) -> Self {
        if percent >= PROBABILITY_HIGH_MIN {
            Self::High
        } else if percent >= PROBABILITY_MEDIUM_MIN {
            Self::Medium
        } else if percent >= PROBABILITY_LOW_MIN {
            Self::Low
        } else {
            Self::Uncertain
        }
    }

    /// Inclusive percent range covered by this bracket.
    #[must_use]
    pub const fn range(self) -> (u8, u8) {
        match self {
            Self::High => (PROBABILITY_HIGH_MIN, PROBABILITY_MAX),
            Self::Medium => (PROBABILITY_MEDIUM_MIN, PROBABILITY_HIGH_MIN - 1),
            Self::Low => (PROBABILITY_LOW_MIN, PROBABILITY_MEDIUM_MIN - 1),
            Self::Uncertain => (0, PROBABILITY_LOW_MIN - 1),
        }
    }
}

/// Forecast weight per bracket, as an integer percent of full value.
///
/// A bracket without a weight contributes nothing to the forecast. Keys
/// serialize as `HIGH`, `MEDIUM`, `LOW`, `UNCERTAIN`.
///
/// Decoding also accepts the legacy fraction shape (`{"HIGH": 1.0,
/// "MEDIUM": 0.7, ...}`): a map is read as fractions when any value has a
/// fractional part or every value is at most 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "UPPERCASE", try_from = "WeightsRecord")]
pub struct ProbabilityWeights {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uncertain: Option<u8>,
}

impl Default for ProbabilityWeights {
    fn default() -> Self {
        Self {
            high: Some(DEFAULT_WEIGHT_HIGH),
            medium: Some(DEFAULT_WEIGHT_MEDIUM),
            low: Some(DEFAULT_WEIGHT_LOW),
            uncertain: Some(DEFAULT_WEIGHT_UNCERTAIN),
        }
    }
}

impl ProbabilityWeights {
    /// Weights with every bracket set.
    #[must_use]
    pub const fn new(high: u8, medium: u8, low: u8, uncertain: u8) -> Self {
        Self { high: Some(high), medium: Some(medium), low: Some(low), uncertain: Some(uncertain) }
    }

    /// Weights with no bracket set; every lead contributes zero.
    #[must_use]
    pub const fn empty() -> Self {
        Self { high: None, medium: None, low: None, uncertain: None }
    }

    /// Convert the legacy fraction shape (`0.0..=1.0`) to percent weights.
    ///
    /// Fractions are rounded to the nearest percent.
    ///
    /// # Errors
    /// Returns `ResplanError::InvalidInput` if any fraction is outside
    /// `0.0..=1.0` or not finite.
    pub fn from_fractions(high: f64, medium: f64, low: f64, uncertain: f64) -> Result<Self> {
        Ok(Self::new(
            fraction_to_percent(high)?,
            fraction_to_percent(medium)?,
            fraction_to_percent(low)?,
            fraction_to_percent(uncertain)?,
        ))
    }

    /// Configured weight for a bracket, if any.
    #[must_use]
    pub const fn get(&self, bracket: ProbabilityBracket) -> Option<u8> {
        match bracket {
            ProbabilityBracket::High => self.high,
            ProbabilityBracket::Medium => self.medium,
            ProbabilityBracket::Low => self.low,
            ProbabilityBracket::Uncertain => self.uncertain,
        }
    }

    /// Effective weight for a bracket; missing brackets weigh 0.
    #[must_use]
    pub fn weight_for(&self, bracket: ProbabilityBracket) -> u8 {
        self.get(bracket).unwrap_or(0)
    }

    /// Replace the weight of one bracket.
    #[must_use]
    pub fn with(mut self, bracket: ProbabilityBracket, weight: Option<u8>) -> Self {
        match bracket {
            ProbabilityBracket::High => self.high = weight,
            ProbabilityBracket::Medium => self.medium = weight,
            ProbabilityBracket::Low => self.low = weight,
            ProbabilityBracket::Uncertain => self.uncertain = weight,
        }
        self
    }

    /// Brackets that have no weight configured.
    #[must_use]
    pub fn missing(&self) -> Vec<ProbabilityBracket> {
        ProbabilityBracket::ALL.into_iter().filter(|b| self.get(*b).is_none()).collect()
    }

    /// # Errors
    /// Returns `ResplanError::InvalidInput` if any weight exceeds 100.
    pub fn validate(&self) -> Result<()> {
        for bracket in ProbabilityBracket::ALL {
            if let Some(weight) = self.get(bracket) {
                if weight > 100 {
                    return Err(ResplanError::InvalidInput(format!(
                        "weight for {bracket} must be within 0-100, got {weight}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Wire shape of weights before deciding between percent and fractions.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
struct WeightsRecord {
    #[serde(default)]
    high: Option<f64>,
    #[serde(default)]
    medium: Option<f64>,
    #[serde(default)]
    low: Option<f64>,
    #[serde(default)]
    uncertain: Option<f64>,
}

impl WeightsRecord {
    fn values(&self) -> impl Iterator<Item = f64> {
        [self.high, self.medium, self.low, self.uncertain].into_iter().flatten()
    }

    fn is_fraction_shaped(&self) -> bool {
        if self.values().next().is_none() {
            return false;
        }
        self.values().any(|v| v.fract() != 0.0) || self.values().all(|v| v <= 1.0)
    }
}

impl TryFrom<WeightsRecord> for ProbabilityWeights {
    type Error = ResplanError;

    fn try_from(record: WeightsRecord) -> Result<Self> {
        let convert: fn(f64) -> Result<u8> =
            if record.is_fraction_shaped() { fraction_to_percent } else { percent_to_u8 };
        Ok(Self {
            high: record.high.map(convert).transpose()?,
            medium: record.medium.map(convert).transpose()?,
            low: record.low.map(convert).transpose()?,
            uncertain: record.uncertain.map(convert).transpose()?,
        })
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percent_to_u8(percent: f64) -> Result<u8> {
    if !percent.is_finite() || percent.fract() != 0.0 || !(0.0..=100.0).contains(&percent) {
        return Err(ResplanError::InvalidInput(format!(
            "weight must be a whole percent within 0-100, got {percent}"
        )));
    }
    Ok(percent as u8)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn fraction_to_percent(fraction: f64) -> Result<u8> {
    if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
        return Err(ResplanError::InvalidInput(format!(
            "weight fraction must be within 0.0-1.0, got {fraction}"
        )));
    }
    Ok((fraction * 100.0).round() as u8)
}
