//! # REST API for Subsidy Fixation
//!
//! The fixation screen posts the whole form after every change and renders
//! the five verdicts it gets back.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info, warn};

use super::mappers::fixation_mapper::FixationMapper;
use crate::AppState;
use shared::ValidateFixationRequest;

/// Validate a subsidy proposal against the reference data of its term
pub async fn validate_fixation(
    State(state): State<AppState>,
    Json(request): Json<ValidateFixationRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/fixation/validate - term {} ({} inhabitants)",
        request.legislature, request.inhabitants
    );

    let context = match FixationMapper::to_context(&request) {
        Ok(context) => context,
        Err(e) => {
            warn!("Rejecting fixation request: {}", e);
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    match state
        .fixation_service
        .validate_fixation(context, &request.proposal)
        .await
    {
        Ok(report) => (StatusCode::OK, Json(FixationMapper::to_response(report))).into_response(),
        Err(e) => {
            error!("Failed to validate fixation: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to load reference data").into_response()
        }
    }
}
