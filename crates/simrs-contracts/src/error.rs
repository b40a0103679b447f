//! Error types for the SIMRS dashboard.
//!
//! Validation failures (`InvalidAge`, `InvalidAmount`) are raised before any
//! aggregation runs. `ServiceUnavailable` is recovered locally by the advisory
//! layer and never reaches a view as a hard failure.

use thiserror::Error;

/// Why the external text-generation service could not produce a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceUnavailable {
    /// No API credential is configured. No network I/O was attempted.
    #[error("no API credential configured")]
    MissingCredential,

    /// The HTTP request could not be sent or timed out.
    #[error("request to advisory service failed: {reason}")]
    Request { reason: String },

    /// The service answered with a non-success status code.
    #[error("advisory service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the expected shape.
    #[error("could not decode advisory response: {reason}")]
    Decode { reason: String },
}

/// The unified error type for the SIMRS crates.
#[derive(Debug, Error)]
pub enum SimrsError {
    /// A receivable age is negative, non-finite, or not a whole month count.
    #[error("invalid receivable age '{value}': {reason}")]
    InvalidAge { value: String, reason: String },

    /// A receivable carries a negative gross amount.
    #[error("invalid amount {amount} on receivable '{receivable_id}': amount must not be negative")]
    InvalidAmount {
        receivable_id: String,
        amount: String,
    },

    /// A total exceeded the range of `Money`.
    #[error("amount overflow while computing {what}")]
    AmountOverflow { what: &'static str },

    /// The advisory service could not be reached.
    #[error("advisory service unavailable: {0}")]
    ServiceUnavailable(#[from] ServiceUnavailable),

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A lookup in the mock store found nothing.
    #[error("no {kind} with id '{id}'")]
    UnknownRecord { kind: &'static str, id: String },
}

/// Convenience alias used throughout the SIMRS crates.
pub type SimrsResult<T> = Result<T, SimrsError>;
