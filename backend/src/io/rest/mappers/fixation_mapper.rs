//! Mappers between the fixation request/response DTOs and the domain.

use crate::domain::models::fixation_context::FixationContext;
use crate::domain::models::legislature::LegislatureError;
use crate::domain::FixationReport;
use shared::{CouncilCeiling, ValidateFixationRequest, ValidateFixationResponse};

use super::bracket_mapper::BracketMapper;

pub struct FixationMapper;

impl FixationMapper {
    pub fn to_context(request: &ValidateFixationRequest) -> Result<FixationContext, LegislatureError> {
        Ok(FixationContext {
            legislature: request.legislature.parse()?,
            inhabitants: request.inhabitants,
            municipality: non_blank(&request.municipality),
            process_number: non_blank(&request.process_number),
        })
    }

    pub fn to_response(report: FixationReport) -> ValidateFixationResponse {
        let FixationReport { context, evaluation } = report;
        let all_valid = evaluation.validation.all_valid();

        ValidateFixationResponse {
            legislature: context.legislature.key(),
            inhabitants: context.inhabitants,
            municipality: context.municipality,
            process_number: context.process_number,
            results: evaluation.validation,
            ceiling: evaluation.ceiling.map(|ceiling| CouncilCeiling {
                percentage: ceiling.bracket.percentage,
                ceiling: ceiling.ceiling,
                bracket: BracketMapper::to_dto(ceiling.bracket),
            }),
            all_valid,
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
