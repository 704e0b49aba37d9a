//! # IO Module
//!
//! Adapter layer between clients and the domain services. The only
//! transport is the JSON REST API in [`rest`].

pub mod rest;

pub use rest::*;
