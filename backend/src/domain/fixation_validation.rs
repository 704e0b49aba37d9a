//! Subsidy validation for the fixation form.
//!
//! Every call re-derives all five verdicts from the current inputs. There is
//! no per-field state: the form calls [`FixationValidationService::evaluate`]
//! again after any change to the proposal, the reference subsidies, the
//! bracket table or the inhabitant count.
//!
//! ## Rules
//!
//! - **Councilors / Council President**: the ceiling is the state deputy
//!   subsidy times the percentage of the bracket for the municipality's
//!   population. A proposal must stay below the ceiling, and the ceiling
//!   itself must stay below the Mayor subsidy.
//! - **Mayor**: must stay below the STF minister subsidy.
//! - **Vice-Mayor / Secretaries**: must stay below the Mayor subsidy.
//!
//! Missing reference data never fails the evaluation. Roles that depend on it
//! get an explanatory message when a nonzero amount was proposed.

use shared::{FixationValidation, SubsidyProposal, SubsidyRole, ValidationResult};
use tracing::debug;

use super::brackets::resolve_bracket;
use super::currency::parse_currency_to_number;
use super::models::percentage_bracket::PercentageBracket;
use super::models::reference_subsidy::ReferenceSubsidy;

/// Everything the evaluation reads
#[derive(Debug, Clone, Copy)]
pub struct FixationInputs<'a> {
    /// Term key used in messages
    pub legislature: &'a str,
    pub inhabitants: u64,
    pub proposal: &'a SubsidyProposal,
    pub state_deputy: Option<&'a ReferenceSubsidy>,
    pub stf_minister: Option<&'a ReferenceSubsidy>,
    pub brackets: &'a [PercentageBracket],
}

/// Councilor ceiling derived from the state deputy subsidy
#[derive(Debug, Clone, PartialEq)]
pub struct CouncilCeiling {
    pub bracket: PercentageBracket,
    pub ceiling: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FixationEvaluation {
    pub validation: FixationValidation,
    /// Present only when both the state deputy subsidy and a bracket were found
    pub ceiling: Option<CouncilCeiling>,
}

enum CeilingLookup {
    MissingReferenceData,
    BracketNotFound,
    Found(CouncilCeiling),
}

#[derive(Clone, Default)]
pub struct FixationValidationService;

impl FixationValidationService {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate all five roles.
    pub fn evaluate(&self, inputs: &FixationInputs<'_>) -> FixationEvaluation {
        let proposal = inputs.proposal;
        let amount = |role: SubsidyRole| -> f64 {
            proposal
                .field(role)
                .map(parse_currency_to_number)
                .unwrap_or(0.0)
        };
        let mayor = amount(SubsidyRole::Mayor);

        let mut validation = FixationValidation::default();

        let lookup = self.lookup_ceiling(inputs);
        for role in [SubsidyRole::Councilors, SubsidyRole::CouncilPresident] {
            *validation.get_mut(role) =
                self.check_council_role(inputs, &lookup, role, amount(role), mayor);
        }

        validation.mayor = self.check_mayor(inputs, mayor);

        if proposal.is_present(SubsidyRole::ViceMayor) {
            validation.vice_mayor =
                Self::check_below_mayor(SubsidyRole::ViceMayor, amount(SubsidyRole::ViceMayor), mayor);
        }
        if proposal.is_present(SubsidyRole::Secretaries) {
            validation.secretaries =
                Self::check_below_mayor(SubsidyRole::Secretaries, amount(SubsidyRole::Secretaries), mayor);
        }

        debug!(
            "Evaluated fixation for term {} ({} inhabitants): all valid = {}",
            inputs.legislature,
            inputs.inhabitants,
            validation.all_valid()
        );

        FixationEvaluation {
            validation,
            ceiling: match lookup {
                CeilingLookup::Found(ceiling) => Some(ceiling),
                _ => None,
            },
        }
    }

    fn lookup_ceiling(&self, inputs: &FixationInputs<'_>) -> CeilingLookup {
        let deputy = match inputs.state_deputy {
            Some(deputy) if !inputs.brackets.is_empty() => deputy,
            _ => return CeilingLookup::MissingReferenceData,
        };

        match resolve_bracket(inputs.inhabitants, inputs.brackets) {
            Some(bracket) => CeilingLookup::Found(CouncilCeiling {
                bracket: bracket.clone(),
                ceiling: deputy.amount * bracket.percentage / 100.0,
            }),
            None => CeilingLookup::BracketNotFound,
        }
    }

    fn check_council_role(
        &self,
        inputs: &FixationInputs<'_>,
        lookup: &CeilingLookup,
        role: SubsidyRole,
        amount: f64,
        mayor: f64,
    ) -> ValidationResult {
        match lookup {
            CeilingLookup::MissingReferenceData => {
                if amount > 0.0 {
                    return ValidationResult::invalid(format!(
                        "State Deputy subsidy or population brackets not found for term {}",
                        inputs.legislature
                    ));
                }
                ValidationResult::valid()
            }
            CeilingLookup::BracketNotFound => {
                if amount > 0.0 {
                    return ValidationResult::invalid(format!(
                        "No population bracket found for {} inhabitants in term {}",
                        inputs.inhabitants, inputs.legislature
                    ));
                }
                ValidationResult::valid()
            }
            CeilingLookup::Found(CouncilCeiling { bracket, ceiling }) => {
                if !inputs.proposal.is_present(role) {
                    return ValidationResult::valid();
                }
                if amount >= *ceiling {
                    ValidationResult::invalid(format!(
                        "{} subsidy of R$ {:.2} exceeds the ceiling of {}% of the State Deputy subsidy (ceiling R$ {:.2})",
                        role, amount, bracket.percentage, ceiling
                    ))
                } else if *ceiling >= mayor {
                    ValidationResult::invalid(format!(
                        "Computed ceiling of R$ {:.2} ({}% of the State Deputy subsidy) is greater than or equal to the Mayor subsidy of R$ {:.2}",
                        ceiling, bracket.percentage, mayor
                    ))
                } else {
                    ValidationResult::valid()
                }
            }
        }
    }

    fn check_mayor(&self, inputs: &FixationInputs<'_>, mayor: f64) -> ValidationResult {
        if mayor <= 0.0 {
            return ValidationResult::valid();
        }

        match inputs.stf_minister {
            None => ValidationResult::invalid(format!(
                "STF Minister subsidy not found for term {}",
                inputs.legislature
            )),
            Some(stf) if mayor >= stf.amount => ValidationResult::invalid(format!(
                "Mayor subsidy of R$ {:.2} must be lower than the STF Minister subsidy of R$ {:.2}",
                mayor, stf.amount
            )),
            Some(_) => ValidationResult::valid(),
        }
    }

    fn check_below_mayor(role: SubsidyRole, amount: f64, mayor: f64) -> ValidationResult {
        if amount >= mayor {
            ValidationResult::invalid(format!(
                "{} subsidy of R$ {:.2} must be lower than the Mayor subsidy of R$ {:.2}",
                role, amount, mayor
            ))
        } else {
            ValidationResult::valid()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::ReferenceSubsidyKind;

    const TERM: &str = "2021-2025";

    fn reference(kind: ReferenceSubsidyKind, amount: f64) -> ReferenceSubsidy {
        ReferenceSubsidy {
            legislature: TERM.parse().unwrap(),
            kind,
            amount,
            law: "Lei 1.000/2022".to_string(),
            effective_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        }
    }

    fn proposal(fields: &[(SubsidyRole, &str)]) -> SubsidyProposal {
        let mut proposal = SubsidyProposal::default();
        for (role, value) in fields {
            proposal.set(*role, *value);
        }
        proposal
    }

    fn evaluate(
        proposal: &SubsidyProposal,
        state_deputy: Option<&ReferenceSubsidy>,
        stf_minister: Option<&ReferenceSubsidy>,
        brackets: &[PercentageBracket],
        inhabitants: u64,
    ) -> FixationEvaluation {
        let inputs = FixationInputs {
            legislature: TERM,
            inhabitants,
            proposal,
            state_deputy,
            stf_minister,
            brackets,
        };
        FixationValidationService::new().evaluate(&inputs)
    }

    fn open_bracket(percentage: f64) -> Vec<PercentageBracket> {
        vec![PercentageBracket::new(0, None, percentage)]
    }

    #[test]
    fn test_empty_form_is_valid() {
        let deputy = reference(ReferenceSubsidyKind::StateDeputy, 10_000.0);
        let stf = reference(ReferenceSubsidyKind::StfMinister, 40_000.0);
        let result = evaluate(&SubsidyProposal::default(), Some(&deputy), Some(&stf), &open_bracket(20.0), 10_000);

        assert_eq!(result.validation, FixationValidation::default());
        assert!(result.validation.all_valid());
    }

    #[test]
    fn test_councilor_exceeds_ceiling() {
        let deputy = reference(ReferenceSubsidyKind::StateDeputy, 10_000.0);
        let form = proposal(&[(SubsidyRole::Mayor, "10.000,00"), (SubsidyRole::Councilors, "2.500,00")]);
        let result = evaluate(&form, Some(&deputy), None, &open_bracket(20.0), 10_000);

        let councilors = &result.validation.councilors;
        assert!(!councilors.is_valid);
        let message = councilors.message.as_ref().unwrap();
        assert!(message.contains("2000.00"), "{}", message);
        assert!(message.contains("20%"), "{}", message);
        assert_eq!(result.ceiling.unwrap().ceiling, 2000.0);
    }

    #[test]
    fn test_ceiling_not_below_mayor() {
        let deputy = reference(ReferenceSubsidyKind::StateDeputy, 10_000.0);
        let form = proposal(&[(SubsidyRole::Mayor, "1.000,00"), (SubsidyRole::Councilors, "1.500,00")]);
        let result = evaluate(&form, Some(&deputy), None, &open_bracket(20.0), 10_000);

        let councilors = &result.validation.councilors;
        assert!(!councilors.is_valid);
        let message = councilors.message.as_ref().unwrap();
        assert!(message.contains("2000.00"), "{}", message);
        assert!(message.contains("1000.00"), "{}", message);
    }

    #[test]
    fn test_ceiling_check_runs_without_mayor() {
        let deputy = reference(ReferenceSubsidyKind::StateDeputy, 10_000.0);
        let form = proposal(&[(SubsidyRole::CouncilPresident, "100,00")]);
        let result = evaluate(&form, Some(&deputy), None, &open_bracket(20.0), 10_000);

        assert!(!result.validation.council_president.is_valid);
        assert!(result.validation.councilors.is_valid);
    }

    #[test]
    fn test_council_roles_valid_below_ceiling_and_mayor() {
        let deputy = reference(ReferenceSubsidyKind::StateDeputy, 10_000.0);
        let stf = reference(ReferenceSubsidyKind::StfMinister, 40_000.0);
        let form = proposal(&[
            (SubsidyRole::Mayor, "15.000,00"),
            (SubsidyRole::Councilors, "1.500,00"),
            (SubsidyRole::CouncilPresident, "1.999,99"),
        ]);
        let result = evaluate(&form, Some(&deputy), Some(&stf), &open_bracket(20.0), 10_000);

        assert!(result.validation.all_valid(), "{:?}", result.validation);
    }

    #[test]
    fn test_council_president_checked_independently() {
        let deputy = reference(ReferenceSubsidyKind::StateDeputy, 10_000.0);
        let form = proposal(&[
            (SubsidyRole::Mayor, "15.000,00"),
            (SubsidyRole::Councilors, "1.500,00"),
            (SubsidyRole::CouncilPresident, "2.000,00"),
        ]);
        let result = evaluate(&form, Some(&deputy), None, &open_bracket(20.0), 10_000);

        assert!(result.validation.councilors.is_valid);
        assert!(!result.validation.council_president.is_valid);
    }

    #[test]
    fn test_mayor_against_stf() {
        let stf = reference(ReferenceSubsidyKind::StfMinister, 4_000.0);

        let over = evaluate(&proposal(&[(SubsidyRole::Mayor, "5.000,00")]), None, Some(&stf), &[], 0);
        assert!(!over.validation.mayor.is_valid);
        let message = over.validation.mayor.message.unwrap();
        assert!(message.contains("5000.00") && message.contains("4000.00"), "{}", message);

        let equal = evaluate(&proposal(&[(SubsidyRole::Mayor, "4.000,00")]), None, Some(&stf), &[], 0);
        assert!(!equal.validation.mayor.is_valid);

        let under = evaluate(&proposal(&[(SubsidyRole::Mayor, "3.000,00")]), None, Some(&stf), &[], 0);
        assert!(under.validation.mayor.is_valid);
    }

    #[test]
    fn test_mayor_without_stf_reference() {
        let result = evaluate(&proposal(&[(SubsidyRole::Mayor, "3.000,00")]), None, None, &[], 0);
        assert!(!result.validation.mayor.is_valid);
        assert!(result.validation.mayor.message.unwrap().contains(TERM));

        let zero = evaluate(&proposal(&[(SubsidyRole::Mayor, "0,00")]), None, None, &[], 0);
        assert!(zero.validation.mayor.is_valid);
    }

    #[test]
    fn test_vice_mayor_compared_even_without_mayor() {
        let result = evaluate(&proposal(&[(SubsidyRole::ViceMayor, "3000")]), None, None, &[], 0);
        assert!(!result.validation.vice_mayor.is_valid);

        let zero = evaluate(&proposal(&[(SubsidyRole::ViceMayor, "0")]), None, None, &[], 0);
        assert!(!zero.validation.vice_mayor.is_valid);

        let empty = evaluate(&proposal(&[(SubsidyRole::ViceMayor, "")]), None, None, &[], 0);
        assert!(empty.validation.vice_mayor.is_valid);
    }

    #[test]
    fn test_blank_field_counts_as_present_zero() {
        let result = evaluate(&proposal(&[(SubsidyRole::ViceMayor, "  ")]), None, None, &[], 0);
        assert!(!result.validation.vice_mayor.is_valid);

        let form = proposal(&[(SubsidyRole::Mayor, "1.000,00"), (SubsidyRole::Secretaries, " ")]);
        let result = evaluate(&form, None, None, &[], 0);
        assert!(result.validation.secretaries.is_valid);
    }

    #[test]
    fn test_secretaries_below_mayor() {
        let form = proposal(&[(SubsidyRole::Mayor, "10.000,00"), (SubsidyRole::Secretaries, "8.000,00")]);
        let result = evaluate(&form, None, None, &[], 0);
        assert!(result.validation.secretaries.is_valid);

        let form = proposal(&[(SubsidyRole::Mayor, "10.000,00"), (SubsidyRole::Secretaries, "10.000,00")]);
        let result = evaluate(&form, None, None, &[], 0);
        assert!(!result.validation.secretaries.is_valid);
    }

    #[test]
    fn test_missing_state_deputy_skips_empty_councilors() {
        let result = evaluate(&SubsidyProposal::default(), None, None, &open_bracket(20.0), 10_000);
        assert!(result.validation.councilors.is_valid);
        assert!(result.validation.councilors.message.is_none());
        assert!(result.ceiling.is_none());
    }

    #[test]
    fn test_missing_reference_data_flags_nonzero_councilors() {
        let form = proposal(&[(SubsidyRole::Councilors, "1.000,00"), (SubsidyRole::CouncilPresident, "0,00")]);
        let result = evaluate(&form, None, None, &open_bracket(20.0), 10_000);
        assert!(!result.validation.councilors.is_valid);
        assert!(result.validation.councilors.message.as_ref().unwrap().contains(TERM));
        assert!(result.validation.council_president.is_valid);

        let deputy = reference(ReferenceSubsidyKind::StateDeputy, 10_000.0);
        let no_brackets = evaluate(&form, Some(&deputy), None, &[], 10_000);
        assert!(!no_brackets.validation.councilors.is_valid);
    }

    #[test]
    fn test_bracket_not_found() {
        let deputy = reference(ReferenceSubsidyKind::StateDeputy, 10_000.0);
        let brackets = vec![PercentageBracket::new(0, Some(10_000), 20.0)];
        let form = proposal(&[(SubsidyRole::Councilors, "1.000,00")]);
        let result = evaluate(&form, Some(&deputy), None, &brackets, 25_000);

        assert!(!result.validation.councilors.is_valid);
        assert!(result.validation.councilors.message.as_ref().unwrap().contains("25000"));
        assert!(result.validation.council_president.is_valid);
        assert!(result.ceiling.is_none());
    }

    #[test]
    fn test_ceiling_uses_population_bracket() {
        let deputy = reference(ReferenceSubsidyKind::StateDeputy, 10_000.0);
        let brackets = vec![
            PercentageBracket::new(0, Some(50_000), 10.0),
            PercentageBracket::new(50_001, None, 20.0),
        ];
        let form = proposal(&[(SubsidyRole::Mayor, "20.000,00"), (SubsidyRole::Councilors, "1.500,00")]);
        let result = evaluate(&form, Some(&deputy), None, &brackets, 75_000);

        let ceiling = result.ceiling.unwrap();
        assert_eq!(ceiling.bracket.percentage, 20.0);
        assert_eq!(ceiling.ceiling, 2000.0);
        assert!(result.validation.councilors.is_valid);
    }

    #[test]
    fn test_unparseable_amounts_count_as_zero() {
        let stf = reference(ReferenceSubsidyKind::StfMinister, 4_000.0);
        let form = proposal(&[(SubsidyRole::Mayor, "abc"), (SubsidyRole::Secretaries, "xyz")]);
        let result = evaluate(&form, None, Some(&stf), &[], 0);

        assert!(result.validation.mayor.is_valid);
        // present but zero, compared against a zero mayor
        assert!(!result.validation.secretaries.is_valid);
    }

    #[test]
    fn test_evaluation_is_repeatable() {
        let deputy = reference(ReferenceSubsidyKind::StateDeputy, 10_000.0);
        let stf = reference(ReferenceSubsidyKind::StfMinister, 4_000.0);
        let form = proposal(&[
            (SubsidyRole::Mayor, "5.000,00"),
            (SubsidyRole::ViceMayor, "6.000,00"),
            (SubsidyRole::Councilors, "2.500,00"),
        ]);
        let brackets = open_bracket(20.0);

        let first = evaluate(&form, Some(&deputy), Some(&stf), &brackets, 10_000);
        let second = evaluate(&form, Some(&deputy), Some(&stf), &brackets, 10_000);
        assert_eq!(first, second);
    }
}
