#![forbid(unsafe_code)]

//! Errors surfaced to callers.
//!
//! Normal operation never fails: missing targets read as zero-sized and
//! geometry edge cases clamp. The only rejected input is a registration at
//! the reserved greeting index.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShowcaseError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShowcaseError {
    #[error("target index {index} is reserved for the greeting; targets are numbered from 1")]
    InvalidTargetIndex { index: usize },
}
