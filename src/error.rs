//! Error type shared by the transforms, the coder and the artifact layer.
//!
//! The core only ever reports two kinds of failure. Input that is rejected before any work is
//! done is `InvalidInput`. Data that cannot be decoded back (a bit prefix with no codeword, a
//! transform with no single sentinel row, a bit length longer than the packed bytes) is
//! `CorruptInput`. Nothing is ever patched up with a default value.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Rejected at validation, before any transformation work begins.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Detected while decoding or reconstructing.
    #[error("Corrupt input: {0}")]
    CorruptInput(String),

    /// File errors from the artifact layer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    pub fn corrupt(msg: impl Into<String>) -> Self {
        Error::CorruptInput(msg.into())
    }
}
