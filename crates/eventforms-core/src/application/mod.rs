//! Application layer
//!
//! Use case orchestration and DTOs.

pub mod commands;
pub mod dto;

pub use commands::{FormService, ResponseService};

#[cfg(test)]
mod properties;
