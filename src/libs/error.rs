//! Typed errors for the attendance domain.
//!
//! Command-level code works with `anyhow::Result`; these variants exist where a
//! caller needs to tell failures apart, most importantly the timestamp check at
//! the data-fetch boundary.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CxError {
    /// A punch `checktime` that is not an ISO-8601 date-time.
    #[error("invalid timestamp: {0:?}")]
    InvalidTimestamp(String),

    /// The API answered with a non-success envelope code.
    #[error("CrossChex API returned code {code}: {message}")]
    Api { code: i64, message: String },

    /// Login succeeded but `company/list` returned nothing to select.
    #[error("no company is attached to this account")]
    NoCompany,

    /// A request was attempted before `connect()`.
    #[error("client is not connected")]
    NotConnected,

    /// A required configuration value is missing.
    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),
}
