//! Error types for CQL doctor configuration.
//!
//! Curing a phrase never fails; only building a configuration can.

use thiserror::Error;

/// Errors raised while validating a [`DoctorConfig`](crate::DoctorConfig).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DoctorError {
    /// The placeholder key prefix is empty.
    #[error("placeholder key prefix must not be empty")]
    EmptyKeyPrefix,

    /// The placeholder key prefix contains characters other than ASCII letters.
    #[error("invalid placeholder key prefix '{prefix}': only ASCII letters are allowed")]
    InvalidKeyPrefix {
        /// The rejected prefix.
        prefix: String,
    },

    /// A reserved character cannot be escaped by quoting it.
    #[error("character {0:?} cannot be used as a reserved character")]
    InvalidReservedCharacter(char),
}

/// Result type for CQL doctor operations.
pub type DoctorResult<T> = std::result::Result<T, DoctorError>;
