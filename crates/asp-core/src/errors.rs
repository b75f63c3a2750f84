//! Errors raised while parsing shared domain values.
//!
//! Session, client and feed failures have their own error types in their
//! crates; they all converge into `anyhow` in `asp-cli`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Data failed validation (unknown exam code, bad format).
    #[error("Validation error: {0}")]
    Validation(String),
}
