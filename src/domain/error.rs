//! Errors raised by aggregate operations.

use thiserror::Error;

/// Referential failures inside the owner aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("{0}")]
    InvalidArgument(&'static str),
}
