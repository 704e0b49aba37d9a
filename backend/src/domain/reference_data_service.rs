use anyhow::Result;
use shared::ReferenceSubsidyKind;
use tracing::{info, warn};

use super::brackets::{find_overlaps, sort_brackets};
use super::models::legislature::Legislature;
use super::models::percentage_bracket::PercentageBracket;
use super::models::reference_subsidy::ReferenceSubsidy;
use crate::storage::{
    CsvConnection, PercentageBracketRepository, PercentageBracketStorage,
    ReferenceSubsidyRepository, ReferenceSubsidyStorage,
};

/// Bracket table of a term, sorted, with its data-quality findings
#[derive(Debug, Clone, PartialEq)]
pub struct BracketTable {
    pub brackets: Vec<PercentageBracket>,
    pub overlaps: Vec<(PercentageBracket, PercentageBracket)>,
}

/// Service for the reference data of each legislative term
#[derive(Clone)]
pub struct ReferenceDataService {
    subsidy_repository: ReferenceSubsidyRepository,
    bracket_repository: PercentageBracketRepository,
}

impl ReferenceDataService {
    pub fn new(connection: CsvConnection) -> Self {
        Self {
            subsidy_repository: ReferenceSubsidyRepository::new(connection.clone()),
            bracket_repository: PercentageBracketRepository::new(connection),
        }
    }

    /// Reference subsidy of one kind for a term, if registered
    pub async fn fetch_reference_subsidy(
        &self,
        legislature: &Legislature,
        kind: ReferenceSubsidyKind,
    ) -> Result<Option<ReferenceSubsidy>> {
        let subsidy = self
            .subsidy_repository
            .get_reference_subsidy(legislature, kind)
            .await?;

        if subsidy.is_none() {
            info!("No {} reference subsidy registered for {}", kind, legislature);
        }
        Ok(subsidy)
    }

    /// Every reference subsidy registered for a term
    pub async fn list_reference_subsidies(&self, legislature: &Legislature) -> Result<Vec<ReferenceSubsidy>> {
        let subsidies = self.subsidy_repository.list_reference_subsidies(legislature).await?;
        info!("Found {} reference subsidies for {}", subsidies.len(), legislature);
        Ok(subsidies)
    }

    /// Bracket table of a term in stored order.
    ///
    /// Overlapping brackets are logged; the resolver keeps the first one by
    /// lower bound.
    pub async fn fetch_percentage_brackets(&self, legislature: &Legislature) -> Result<Vec<PercentageBracket>> {
        let brackets = self.bracket_repository.list_percentage_brackets(legislature).await?;

        for (first, second) in find_overlaps(&brackets) {
            warn!(
                "Overlapping percentage brackets for {}: {:?} and {:?}",
                legislature, first, second
            );
        }
        Ok(brackets)
    }

    pub async fn bracket_table(&self, legislature: &Legislature) -> Result<BracketTable> {
        let brackets = self.fetch_percentage_brackets(legislature).await?;

        let overlaps = find_overlaps(&brackets)
            .into_iter()
            .map(|(first, second)| (first.clone(), second.clone()))
            .collect();
        let sorted = sort_brackets(&brackets).into_iter().cloned().collect();

        Ok(BracketTable {
            brackets: sorted,
            overlaps,
        })
    }

    /// Register a reference subsidy, superseding any earlier one for the
    /// same term and kind
    pub async fn store_reference_subsidy(&self, subsidy: ReferenceSubsidy) -> Result<ReferenceSubsidy> {
        subsidy.validate()?;
        self.subsidy_repository.store_reference_subsidy(&subsidy).await?;
        Ok(subsidy)
    }

    /// Replace the bracket table of a term
    pub async fn replace_percentage_brackets(
        &self,
        legislature: &Legislature,
        brackets: Vec<PercentageBracket>,
    ) -> Result<BracketTable> {
        for (index, bracket) in brackets.iter().enumerate() {
            if let Err(e) = bracket.validate() {
                warn!("Rejecting bracket {} for {}: {}", index + 1, legislature, e);
                return Err(e.into());
            }
        }

        self.bracket_repository
            .replace_percentage_brackets(legislature, &brackets)
            .await?;
        self.bracket_table(legislature).await
    }
}
