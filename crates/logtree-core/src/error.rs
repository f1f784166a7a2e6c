//! Shared error type across logtree crates.

use std::fmt;

use thiserror::Error;

use crate::address::Address;

/// Stable error codes (used in logs and HTTP responses).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// An entry was bound twice.
    AlreadyBound,
    /// A container lists the same slot name twice.
    DuplicateSlot,
    /// A record was requested from an entry that was never bound.
    Unbound,
    /// Two or more container types claim the same address prefix.
    DuplicateAddress,
    /// Invalid configuration.
    BadConfig,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in logs and responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::AlreadyBound => "ALREADY_BOUND",
            ErrorCode::DuplicateSlot => "DUPLICATE_SLOT",
            ErrorCode::Unbound => "UNBOUND",
            ErrorCode::DuplicateAddress => "DUPLICATE_ADDRESS",
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// One address prefix claimed by more than one container type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub address: Address,
    /// Type names, in registration order.
    pub claimants: Vec<&'static str>,
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <- [{}]", self.address, self.claimants.join(", "))
    }
}

fn join_collisions(collisions: &[Collision]) -> String {
    collisions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, LogTreeError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum LogTreeError {
    #[error("entry already bound at {address}")]
    AlreadyBound { address: Address },
    #[error("slot declared twice at {address}")]
    DuplicateSlot { address: Address },
    #[error("entry is not bound to a container")]
    Unbound,
    #[error("duplicate metric address: {}", join_collisions(.0))]
    DuplicateAddress(Vec<Collision>),
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl LogTreeError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            LogTreeError::AlreadyBound { .. } => ErrorCode::AlreadyBound,
            LogTreeError::DuplicateSlot { .. } => ErrorCode::DuplicateSlot,
            LogTreeError::Unbound => ErrorCode::Unbound,
            LogTreeError::DuplicateAddress(_) => ErrorCode::DuplicateAddress,
            LogTreeError::BadConfig(_) => ErrorCode::BadConfig,
            LogTreeError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            LogTreeError::Internal(_) => ErrorCode::Internal,
        }
    }
}
