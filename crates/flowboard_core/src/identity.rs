//! Identity collaborator contract.
//!
//! # Responsibility
//! - Expose the stable opaque user id delivered by the external identity
//!   service after its readiness signal.
//! - Gate store access: no store operation is permitted before readiness.
//!
//! # Invariants
//! - A `UserId` is never empty.
//! - Identity failure is fatal to the whole board, never retried here.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Identity readiness errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// The readiness signal never fired or failed.
    Unavailable,
    /// The collaborator delivered an unusable (empty) user id.
    InvalidUserId,
}

impl Display for IdentityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "identity is unavailable"),
            Self::InvalidUserId => write!(f, "identity delivered an empty user id"),
        }
    }
}

impl Error for IdentityError {}

/// Stable opaque user identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// Wraps an externally issued identifier, rejecting blank values.
    pub fn try_new(value: impl Into<String>) -> Result<Self, IdentityError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(IdentityError::InvalidUserId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Readiness-gated access to the current user.
///
/// `current_user` returns `Err(IdentityError::Unavailable)` until the
/// external readiness signal has fired.
pub trait IdentityProvider {
    fn current_user(&self) -> Result<UserId, IdentityError>;
}

/// Identity whose readiness signal has already fired.
///
/// Used by host shells that bootstrap identity before constructing the board,
/// and by tests.
#[derive(Debug, Clone)]
pub struct StaticIdentity {
    user: UserId,
}

impl StaticIdentity {
    pub fn new(user: UserId) -> Self {
        Self { user }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> Result<UserId, IdentityError> {
        Ok(self.user.clone())
    }
}

/// Identity whose readiness signal never fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingIdentity;

impl IdentityProvider for PendingIdentity {
    fn current_user(&self) -> Result<UserId, IdentityError> {
        Err(IdentityError::Unavailable)
    }
}
