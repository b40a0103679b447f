//! # simrs-contracts
//!
//! Shared data model and error types for the SIMRS Regu-AI dashboard.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate, only data definitions, derived accessors, and error types.

pub mod advisory;
pub mod clinical;
pub mod error;
pub mod finance;
pub mod receivable;
