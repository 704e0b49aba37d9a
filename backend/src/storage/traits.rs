//! # Storage Traits
//!
//! Storage abstractions for the reference data that the fixation validation
//! reads. Both tables are scoped to a legislative term.

use anyhow::Result;
use async_trait::async_trait;
use shared::ReferenceSubsidyKind;

use crate::domain::models::legislature::Legislature;
use crate::domain::models::percentage_bracket::PercentageBracket;
use crate::domain::models::reference_subsidy::ReferenceSubsidy;

/// Reference subsidies (state deputy, STF minister) per legislative term
#[async_trait]
pub trait ReferenceSubsidyStorage: Send + Sync {
    /// Retrieve the subsidy of one kind for a term
    async fn get_reference_subsidy(
        &self,
        legislature: &Legislature,
        kind: ReferenceSubsidyKind,
    ) -> Result<Option<ReferenceSubsidy>>;

    /// List every reference subsidy registered for a term
    async fn list_reference_subsidies(&self, legislature: &Legislature) -> Result<Vec<ReferenceSubsidy>>;

    /// Store a subsidy, replacing any existing record for the same term and kind
    async fn store_reference_subsidy(&self, subsidy: &ReferenceSubsidy) -> Result<()>;
}

/// Population bracket tables per legislative term
#[async_trait]
pub trait PercentageBracketStorage: Send + Sync {
    /// List the brackets of a term in stored order
    async fn list_percentage_brackets(&self, legislature: &Legislature) -> Result<Vec<PercentageBracket>>;

    /// Replace the whole bracket table of a term
    async fn replace_percentage_brackets(
        &self,
        legislature: &Legislature,
        brackets: &[PercentageBracket],
    ) -> Result<()>;
}
