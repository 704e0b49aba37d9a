//! # REST API Interface Layer
//!
//! HTTP endpoints for the fixation screens:
//!
//! - `POST /api/fixation/validate`: validate a subsidy proposal
//! - `POST /api/currency/format`, `POST /api/currency/parse`: amount masking
//! - `GET /api/legislatures/:term/reference-subsidies`
//! - `GET|PUT /api/legislatures/:term/reference-subsidies/:kind`
//! - `GET|PUT /api/legislatures/:term/brackets`
//!
//! Handlers only translate between JSON and the domain services; domain
//! validation errors become 400 responses and storage failures 500.

pub mod currency_apis;
pub mod fixation_apis;
pub mod mappers;
pub mod reference_data_apis;

pub use currency_apis::*;
pub use fixation_apis::*;
pub use reference_data_apis::*;

use axum::http::StatusCode;

use crate::domain::models::legislature::LegislatureError;
use crate::domain::models::percentage_bracket::BracketValidationError;
use crate::domain::models::reference_subsidy::ReferenceSubsidyValidationError;

/// Status code for an error returned by a domain service
pub fn error_status(error: &anyhow::Error) -> StatusCode {
    if error.downcast_ref::<LegislatureError>().is_some()
        || error.downcast_ref::<ReferenceSubsidyValidationError>().is_some()
        || error.downcast_ref::<BracketValidationError>().is_some()
    {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
