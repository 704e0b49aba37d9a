//! Mappers for converting between bracket domain models and shared DTOs.

use crate::domain::models::percentage_bracket::PercentageBracket as DomainPercentageBracket;
use crate::domain::BracketTable;
use shared::{
    BracketOverlap, PercentageBracket as SharedPercentageBracket, PercentageBracketsResponse,
};

pub struct BracketMapper;

impl BracketMapper {
    pub fn to_dto(domain: DomainPercentageBracket) -> SharedPercentageBracket {
        SharedPercentageBracket {
            minimum: domain.minimum,
            maximum: domain.maximum,
            percentage: domain.percentage,
        }
    }

    pub fn to_domain(dto: SharedPercentageBracket) -> DomainPercentageBracket {
        DomainPercentageBracket::new(dto.minimum, dto.maximum, dto.percentage)
    }

    pub fn to_table_response(legislature: String, table: BracketTable) -> PercentageBracketsResponse {
        PercentageBracketsResponse {
            legislature,
            brackets: table.brackets.into_iter().map(Self::to_dto).collect(),
            overlaps: table
                .overlaps
                .into_iter()
                .map(|(first, second)| BracketOverlap {
                    first: Self::to_dto(first),
                    second: Self::to_dto(second),
                })
                .collect(),
        }
    }
}
