//! Domain model for a population bracket of the councilor ceiling table.
use serde::{Deserialize, Serialize};

/// Maps an inhabitant range to the percentage of the state deputy subsidy
/// that councilors may receive.
///
/// Bounds are stored as entered and may be swapped; use [`lower_bound`] and
/// [`upper_bound`] for the normalized range.
///
/// [`lower_bound`]: PercentageBracket::lower_bound
/// [`upper_bound`]: PercentageBracket::upper_bound
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentageBracket {
    pub minimum: u64,
    pub maximum: Option<u64>, // None or 0 = unbounded
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BracketValidationError {
    #[error("Percentage {0} must be between 0 and 100")]
    PercentageOutOfRange(f64),
}

impl PercentageBracket {
    pub fn new(minimum: u64, maximum: Option<u64>, percentage: f64) -> Self {
        Self {
            minimum,
            maximum,
            percentage,
        }
    }

    fn is_unbounded(&self) -> bool {
        matches!(self.maximum, None | Some(0))
    }

    pub fn lower_bound(&self) -> f64 {
        let maximum = self.maximum.map(|m| m as f64).unwrap_or(f64::INFINITY);
        (self.minimum as f64).min(maximum)
    }

    pub fn upper_bound(&self) -> f64 {
        match self.maximum {
            Some(maximum) if !self.is_unbounded() => (self.minimum.max(maximum)) as f64,
            _ => f64::INFINITY,
        }
    }

    pub fn contains(&self, inhabitants: u64) -> bool {
        let count = inhabitants as f64;
        self.lower_bound() <= count && count <= self.upper_bound()
    }

    pub fn overlaps(&self, other: &PercentageBracket) -> bool {
        self.lower_bound() <= other.upper_bound() && other.lower_bound() <= self.upper_bound()
    }

    pub fn validate(&self) -> Result<(), BracketValidationError> {
        if !self.percentage.is_finite() || !(0.0..=100.0).contains(&self.percentage) {
            return Err(BracketValidationError::PercentageOutOfRange(self.percentage));
        }
        Ok(())
    }
}
