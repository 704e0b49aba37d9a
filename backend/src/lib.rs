//! # Fixation Backend
//!
//! Non-UI logic for the subsidy fixation screens of the municipal audit
//! court's case-management tool.
//!
//! ## Architecture
//!
//! ```text
//! Fixation screens (browser)
//!     ↓
//! IO Layer (REST API, handlers, DTO mappers)
//!     ↓
//! Domain Layer (currency, brackets, subsidy validation, services)
//!     ↓
//! Storage Layer (reference data tables in CSV files)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;

use crate::config::BackendConfig;
use crate::domain::{FixationService, ReferenceDataService};
use crate::storage::CsvConnection;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub fixation_service: FixationService,
    pub reference_data_service: ReferenceDataService,
}

impl AppState {
    pub fn new(connection: CsvConnection) -> Self {
        let reference_data_service = ReferenceDataService::new(connection);
        let fixation_service = FixationService::new(reference_data_service.clone());
        Self {
            fixation_service,
            reference_data_service,
        }
    }
}

/// Initialize the backend services over the configured data directory
pub fn initialize_backend(config: &BackendConfig) -> Result<AppState> {
    info!("Opening data directory {}", config.data_directory.display());
    let connection = CsvConnection::new(&config.data_directory)?;

    info!("Setting up domain services");
    Ok(AppState::new(connection))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &BackendConfig) -> Result<Router> {
    let origin = config
        .allowed_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid allowed origin '{}'", config.allowed_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/fixation/validate", post(io::validate_fixation))
        .route("/currency/format", post(io::format_currency))
        .route("/currency/parse", post(io::parse_currency))
        .route(
            "/legislatures/:term/reference-subsidies",
            get(io::list_reference_subsidies),
        )
        .route(
            "/legislatures/:term/reference-subsidies/:kind",
            get(io::get_reference_subsidy).put(io::store_reference_subsidy),
        )
        .route(
            "/legislatures/:term/brackets",
            get(io::get_percentage_brackets).put(io::replace_percentage_brackets),
        );

    let mut router = Router::new().nest("/api", api_routes);
    if let Some(static_directory) = &config.static_directory {
        info!("Serving frontend from {}", static_directory.display());
        router = router.fallback_service(ServeDir::new(static_directory));
    }

    Ok(router.layer(cors).with_state(app_state))
}
