//! # Domain Module
//!
//! Business rules for fixing municipal subsidies.
//!
//! ## Module Organization
//!
//! - **currency**: masking and parsing of Real amounts typed in the form
//! - **brackets**: selection of the population bracket for a municipality
//! - **fixation_validation**: the five subsidy rules, evaluated as a pure function
//! - **reference_data_service**: reference subsidies and bracket tables per term
//! - **fixation_service**: loads a term's reference data and validates a proposal
//! - **models**: legislature keys, reference subsidies, brackets, case context
//!
//! ## Business Rules
//!
//! - Councilor and Council President subsidies stay below a ceiling derived
//!   from the state deputy subsidy and the municipality's population bracket
//! - That ceiling stays below the Mayor subsidy
//! - The Mayor subsidy stays below the STF minister subsidy
//! - Vice-Mayor and Secretaries subsidies stay below the Mayor subsidy

pub mod brackets;
pub mod currency;
pub mod fixation_service;
pub mod fixation_validation;
pub mod models;
pub mod reference_data_service;

pub use fixation_service::*;
pub use fixation_validation::*;
pub use reference_data_service::*;
