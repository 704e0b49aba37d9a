//! Domain model for the reference subsidies that bound municipal subsidies.
use chrono::NaiveDate;
use shared::ReferenceSubsidyKind;

use super::legislature::Legislature;

#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceSubsidy {
    pub legislature: Legislature,
    pub kind: ReferenceSubsidyKind,
    pub amount: f64,
    pub law: String,
    pub effective_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReferenceSubsidyValidationError {
    #[error("Reference subsidy amount must be a non-negative number, got {0}")]
    InvalidAmount(f64),
    #[error("The law fixing the reference subsidy must be informed")]
    MissingLaw,
}

impl ReferenceSubsidy {
    pub fn validate(&self) -> Result<(), ReferenceSubsidyValidationError> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(ReferenceSubsidyValidationError::InvalidAmount(self.amount));
        }
        if self.law.trim().is_empty() {
            return Err(ReferenceSubsidyValidationError::MissingLaw);
        }
        Ok(())
    }
}
