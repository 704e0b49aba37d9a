//! # Storage Module
//!
//! Persistence for the reference data that fixation validation depends on:
//! the reference subsidies and the population bracket tables of each
//! legislative term.
//!
//! The domain layer only sees the traits in [`traits`]; the CSV
//! implementation in [`csv`] keeps one table file per kind of data in the
//! configured data directory.

pub mod csv;
pub mod traits;

pub use self::csv::{CsvConnection, PercentageBracketRepository, ReferenceSubsidyRepository};
pub use traits::{PercentageBracketStorage, ReferenceSubsidyStorage};
