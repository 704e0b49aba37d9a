//! Fixation orchestration: load the reference data of the case's term, then
//! run the subsidy validation over the proposal.

use anyhow::Result;
use shared::{ReferenceSubsidyKind, SubsidyProposal};
use tracing::info;

use super::fixation_validation::{FixationEvaluation, FixationInputs, FixationValidationService};
use super::models::fixation_context::FixationContext;
use super::reference_data_service::ReferenceDataService;

/// Outcome of validating a proposal for a case
#[derive(Debug, Clone, PartialEq)]
pub struct FixationReport {
    pub context: FixationContext,
    pub evaluation: FixationEvaluation,
}

#[derive(Clone)]
pub struct FixationService {
    reference_data_service: ReferenceDataService,
    validation_service: FixationValidationService,
}

impl FixationService {
    pub fn new(reference_data_service: ReferenceDataService) -> Self {
        Self {
            reference_data_service,
            validation_service: FixationValidationService::new(),
        }
    }

    /// Validate a proposal against the reference data registered for the
    /// context's legislative term
    pub async fn validate_fixation(
        &self,
        context: FixationContext,
        proposal: &SubsidyProposal,
    ) -> Result<FixationReport> {
        info!(
            "Validating fixation for {} ({} inhabitants, term {})",
            context.municipality.as_deref().unwrap_or("unnamed municipality"),
            context.inhabitants,
            context.legislature
        );

        let legislature = context.legislature;
        let (state_deputy, stf_minister, brackets) = tokio::try_join!(
            self.reference_data_service
                .fetch_reference_subsidy(&legislature, ReferenceSubsidyKind::StateDeputy),
            self.reference_data_service
                .fetch_reference_subsidy(&legislature, ReferenceSubsidyKind::StfMinister),
            self.reference_data_service.fetch_percentage_brackets(&legislature),
        )?;

        let term = legislature.key();
        let inputs = FixationInputs {
            legislature: &term,
            inhabitants: context.inhabitants,
            proposal,
            state_deputy: state_deputy.as_ref(),
            stf_minister: stf_minister.as_ref(),
            brackets: &brackets,
        };
        let evaluation = self.validation_service.evaluate(&inputs);

        info!(
            "Fixation for term {}: all valid = {}",
            term,
            evaluation.validation.all_valid()
        );
        Ok(FixationReport { context, evaluation })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::legislature::Legislature;
    use crate::domain::models::percentage_bracket::PercentageBracket;
    use crate::domain::models::reference_subsidy::ReferenceSubsidy;
    use crate::storage::csv::test_utils::TestEnvironment;
    use chrono::NaiveDate;
    use shared::SubsidyRole;

    async fn seeded_service(env: &TestEnvironment) -> FixationService {
        let reference_data = ReferenceDataService::new(env.connection.clone());
        let term: Legislature = "2021-2025".parse().unwrap();

        for (kind, amount) in [
            (ReferenceSubsidyKind::StateDeputy, 10_000.0),
            (ReferenceSubsidyKind::StfMinister, 40_000.0),
        ] {
            reference_data
                .store_reference_subsidy(ReferenceSubsidy {
                    legislature: term,
                    kind,
                    amount,
                    law: "Lei 1.000/2022".to_string(),
                    effective_date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
                })
                .await
                .unwrap();
        }
        reference_data
            .replace_percentage_brackets(
                &term,
                vec![
                    PercentageBracket::new(0, Some(50_000), 10.0),
                    PercentageBracket::new(50_001, None, 20.0),
                ],
            )
            .await
            .unwrap();

        FixationService::new(reference_data)
    }

    #[tokio::test]
    async fn test_validate_fixation_with_registered_reference_data() {
        let env = TestEnvironment::new().await.unwrap();
        let service = seeded_service(&env).await;

        let mut proposal = SubsidyProposal::default();
        proposal.set(SubsidyRole::Mayor, "20.000,00");
        proposal.set(SubsidyRole::ViceMayor, "10.000,00");
        proposal.set(SubsidyRole::Councilors, "2.500,00");

        let context = FixationContext::new("2021-2025".parse().unwrap(), 75_000)
            .with_municipality("Salvador")
            .with_process_number("12345/2024");
        let report = service.validate_fixation(context, &proposal).await.unwrap();

        let validation = &report.evaluation.validation;
        assert!(validation.mayor.is_valid);
        assert!(validation.vice_mayor.is_valid);
        assert!(!validation.councilors.is_valid);
        assert!(validation.councilors.message.as_ref().unwrap().contains("2000.00"));
        assert_eq!(report.evaluation.ceiling.as_ref().unwrap().bracket.percentage, 20.0);
        assert_eq!(report.context.municipality.as_deref(), Some("Salvador"));
    }

    #[tokio::test]
    async fn test_validate_fixation_for_term_without_reference_data() {
        let env = TestEnvironment::new().await.unwrap();
        let service = seeded_service(&env).await;

        let mut proposal = SubsidyProposal::default();
        proposal.set(SubsidyRole::Mayor, "20.000,00");
        proposal.set(SubsidyRole::Councilors, "");

        let context = FixationContext::new("2025-2029".parse().unwrap(), 75_000);
        let report = service.validate_fixation(context, &proposal).await.unwrap();

        let validation = &report.evaluation.validation;
        assert!(validation.councilors.is_valid);
        assert!(!validation.mayor.is_valid);
        assert!(validation.mayor.message.as_ref().unwrap().contains("2025-2029"));
        assert!(report.evaluation.ceiling.is_none());
    }
}
