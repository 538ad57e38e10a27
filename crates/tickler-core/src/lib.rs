//! Shared settings, constants, and error types for the tickler workspace.

pub mod config;
pub mod constants;
pub mod error;
