//! Mappers for converting between reference subsidy domain models and shared DTOs.

use crate::domain::models::legislature::Legislature;
use crate::domain::models::reference_subsidy::ReferenceSubsidy as DomainReferenceSubsidy;
use shared::{
    ReferenceSubsidy as SharedReferenceSubsidy, ReferenceSubsidyKind, StoreReferenceSubsidyRequest,
};

pub struct ReferenceSubsidyMapper;

impl ReferenceSubsidyMapper {
    pub fn to_dto(domain: DomainReferenceSubsidy) -> SharedReferenceSubsidy {
        SharedReferenceSubsidy {
            legislature: domain.legislature.key(),
            kind: domain.kind,
            amount: domain.amount,
            law: domain.law,
            effective_date: domain.effective_date,
        }
    }

    pub fn from_store_request(
        legislature: Legislature,
        kind: ReferenceSubsidyKind,
        request: StoreReferenceSubsidyRequest,
    ) -> DomainReferenceSubsidy {
        DomainReferenceSubsidy {
            legislature,
            kind,
            amount: request.amount,
            law: request.law.trim().to_string(),
            effective_date: request.effective_date,
        }
    }
}
