//! # REST API for Currency Fields
//!
//! Masking and parsing of amounts, so every client formats Real values the
//! same way the validation reads them.

use axum::{http::StatusCode, response::IntoResponse, Json};
use tracing::debug;

use crate::domain::currency::{format_brl, format_currency_input, parse_currency_to_number};
use shared::{FormatCurrencyRequest, FormatCurrencyResponse, ParseCurrencyRequest, ParseCurrencyResponse};

/// Mask raw input as a two-decimal amount
pub async fn format_currency(Json(request): Json<FormatCurrencyRequest>) -> impl IntoResponse {
    debug!("POST /api/currency/format - raw: {:?}", request.raw);

    let response = FormatCurrencyResponse {
        formatted: format_currency_input(&request.raw),
    };
    (StatusCode::OK, Json(response))
}

/// Read a formatted amount back into a number
pub async fn parse_currency(Json(request): Json<ParseCurrencyRequest>) -> impl IntoResponse {
    debug!("POST /api/currency/parse - formatted: {:?}", request.formatted);

    let amount = parse_currency_to_number(&request.formatted);
    let response = ParseCurrencyResponse {
        amount,
        display: format_brl(amount),
    };
    (StatusCode::OK, Json(response))
}
