//! # REST API for Reference Data
//!
//! Reference subsidies and population bracket tables of each legislative term.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{error, info, warn};

use super::error_status;
use super::mappers::bracket_mapper::BracketMapper;
use super::mappers::reference_subsidy_mapper::ReferenceSubsidyMapper;
use crate::domain::models::legislature::Legislature;
use crate::AppState;
use shared::{ReferenceSubsidyKind, ReplacePercentageBracketsRequest, StoreReferenceSubsidyRequest};

fn parse_legislature(term: &str) -> Result<Legislature, Response> {
    term.parse::<Legislature>().map_err(|e| {
        warn!("Invalid legislature in path: {}", e);
        (StatusCode::BAD_REQUEST, e.to_string()).into_response()
    })
}

fn parse_kind(kind: &str) -> Result<ReferenceSubsidyKind, Response> {
    kind.parse::<ReferenceSubsidyKind>().map_err(|e| {
        warn!("Invalid reference subsidy kind in path: {}", e);
        (StatusCode::BAD_REQUEST, e).into_response()
    })
}

/// GET /api/legislatures/:term/reference-subsidies
pub async fn list_reference_subsidies(
    State(state): State<AppState>,
    Path(term): Path<String>,
) -> Response {
    info!("GET /api/legislatures/{}/reference-subsidies", term);

    let legislature = match parse_legislature(&term) {
        Ok(legislature) => legislature,
        Err(response) => return response,
    };

    match state.reference_data_service.list_reference_subsidies(&legislature).await {
        Ok(subsidies) => {
            let dtos: Vec<_> = subsidies.into_iter().map(ReferenceSubsidyMapper::to_dto).collect();
            (StatusCode::OK, Json(dtos)).into_response()
        }
        Err(e) => {
            error!("Error listing reference subsidies: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing reference subsidies").into_response()
        }
    }
}

/// GET /api/legislatures/:term/reference-subsidies/:kind
pub async fn get_reference_subsidy(
    State(state): State<AppState>,
    Path((term, kind)): Path<(String, String)>,
) -> Response {
    info!("GET /api/legislatures/{}/reference-subsidies/{}", term, kind);

    let (legislature, kind) = match (parse_legislature(&term), parse_kind(&kind)) {
        (Ok(legislature), Ok(kind)) => (legislature, kind),
        (Err(response), _) | (_, Err(response)) => return response,
    };

    match state
        .reference_data_service
        .fetch_reference_subsidy(&legislature, kind)
        .await
    {
        Ok(Some(subsidy)) => (StatusCode::OK, Json(ReferenceSubsidyMapper::to_dto(subsidy))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            format!("No {} reference subsidy for term {}", kind, legislature),
        )
            .into_response(),
        Err(e) => {
            error!("Error retrieving reference subsidy: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving reference subsidy").into_response()
        }
    }
}

/// PUT /api/legislatures/:term/reference-subsidies/:kind
pub async fn store_reference_subsidy(
    State(state): State<AppState>,
    Path((term, kind)): Path<(String, String)>,
    Json(request): Json<StoreReferenceSubsidyRequest>,
) -> Response {
    info!("PUT /api/legislatures/{}/reference-subsidies/{} - request: {:?}", term, kind, request);

    let (legislature, kind) = match (parse_legislature(&term), parse_kind(&kind)) {
        (Ok(legislature), Ok(kind)) => (legislature, kind),
        (Err(response), _) | (_, Err(response)) => return response,
    };

    let subsidy = ReferenceSubsidyMapper::from_store_request(legislature, kind, request);
    match state.reference_data_service.store_reference_subsidy(subsidy).await {
        Ok(stored) => (StatusCode::OK, Json(ReferenceSubsidyMapper::to_dto(stored))).into_response(),
        Err(e) => {
            error!("Error storing reference subsidy: {:?}", e);
            (error_status(&e), e.to_string()).into_response()
        }
    }
}

/// GET /api/legislatures/:term/brackets
pub async fn get_percentage_brackets(
    State(state): State<AppState>,
    Path(term): Path<String>,
) -> Response {
    info!("GET /api/legislatures/{}/brackets", term);

    let legislature = match parse_legislature(&term) {
        Ok(legislature) => legislature,
        Err(response) => return response,
    };

    match state.reference_data_service.bracket_table(&legislature).await {
        Ok(table) => (
            StatusCode::OK,
            Json(BracketMapper::to_table_response(legislature.key(), table)),
        )
            .into_response(),
        Err(e) => {
            error!("Error retrieving percentage brackets: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving percentage brackets").into_response()
        }
    }
}

/// PUT /api/legislatures/:term/brackets
pub async fn replace_percentage_brackets(
    State(state): State<AppState>,
    Path(term): Path<String>,
    Json(request): Json<ReplacePercentageBracketsRequest>,
) -> Response {
    info!(
        "PUT /api/legislatures/{}/brackets - {} brackets",
        term,
        request.brackets.len()
    );

    let legislature = match parse_legislature(&term) {
        Ok(legislature) => legislature,
        Err(response) => return response,
    };

    let brackets = request.brackets.into_iter().map(BracketMapper::to_domain).collect();
    match state
        .reference_data_service
        .replace_percentage_brackets(&legislature, brackets)
        .await
    {
        Ok(table) => (
            StatusCode::OK,
            Json(BracketMapper::to_table_response(legislature.key(), table)),
        )
            .into_response(),
        Err(e) => {
            error!("Error replacing percentage brackets: {:?}", e);
            (error_status(&e), e.to_string()).into_response()
        }
    }
}
