//! The module contains the errors the advisor can throw.
//!
//! The errors are:
//!
//! - [`Validation`] thrown when a request body misses or mistypes a field.
//! - [`DivisionByZero`] thrown when the expenses are zero, which leaves the
//!   emergency fund coverage undefined.
//! - [`NonFinite`] thrown when a derived figure overflows to infinity.
//!
//!  [`Validation`]: AdvisorError::Validation
//!  [`DivisionByZero`]: AdvisorError::DivisionByZero
//!  [`NonFinite`]: AdvisorError::NonFinite
use thiserror::Error;

/// Advisor custom errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AdvisorError {
    #[error("{0}")]
    Validation(String),
    #[error("Expenses must be non-zero to compute emergency fund coverage")]
    DivisionByZero,
    #[error("The {0} is too large to compute")]
    NonFinite(&'static str),
}

impl AdvisorError {
    /// Builds a validation error out of every collected problem.
    pub(crate) fn from_problems(problems: &[&str]) -> Self {
        Self::Validation(problems.join(", "))
    }
}
