//! Domain layer for the shopping list service
//!
//! This module contains the command and event models and the port traits
//! that storage and messaging adapters implement.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
