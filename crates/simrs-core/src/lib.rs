//! # simrs-core
//!
//! The domain logic of the SIMRS dashboard.
//!
//! This crate provides:
//! - `aging`: the receivables aging / allowance calculator
//! - `position`: the statement of financial position aggregator
//! - `traits::AdvisoryService`: the capability boundary for AI-generated text
//!
//! The calculator and aggregator are pure functions over in-memory data.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use simrs_core::{aging::age_receivables, position::financial_position};
//!
//! let report = age_receivables(&receivables)?;
//! let summary = financial_position(&report, &inputs)?;
//! ```

pub mod aging;
pub mod position;
pub mod traits;

pub use aging::age_receivables;
pub use position::financial_position;
pub use traits::AdvisoryService;
