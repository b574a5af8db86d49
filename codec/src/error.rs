//! Error types for codec operations

use thiserror::Error;

/// Error type for codec operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unexpected end of buffer")]
    EndOfBuffer,
    #[error("invalid varint")]
    InvalidVarint,
    #[error("invalid time: {0}")]
    InvalidTime(String),
    #[error("name registered twice: {0}")]
    DuplicateName(&'static str),
    #[error("prefix collision between {0} and {1}")]
    PrefixCollision(&'static str, &'static str),
}
