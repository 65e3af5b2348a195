//! Rebyte REST API contract types and validation
//!
//! This crate defines the schema types and validation for the Rebyte
//! task/agent-orchestration REST API. These types are shared between the
//! REST client, the mock client, and the CLI.

pub mod error;
pub mod types;
pub mod validation;

pub use error::*;
pub use types::*;
pub use validation::*;
