//! # simrs-ref-hospital
//!
//! Reference hospital for the SIMRS Regu-AI dashboard.
//!
//! - `mock_data`: the fixed, in-memory receivables, balance sheet, patients
//!   and clinical notes
//! - `panels`: view-models for the Overview, BLU Accounting, and Clinical AI
//!   views
//! - `format`: Rupiah formatting for tables and cards
//!
//! All data is hardcoded and fictional.

pub mod format;
pub mod mock_data;
pub mod panels;

pub use mock_data::MockStore;
