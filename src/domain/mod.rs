//! Domain layer for msibench
//!
//! This module contains the search models, errors and the generator port.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
