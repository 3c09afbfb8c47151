//! User-facing failure notices.

/// Notice surfaced to the user, graded by how it may be cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardNotice {
    /// Fatal, non-dismissible. The board cannot operate (identity failure).
    Blocking(String),
    /// Persistent but non-blocking; last-known data stays visible
    /// (subscription outage).
    Banner(String),
    /// Dismissible, one failed mutation attempt.
    Transient(String),
}

impl BoardNotice {
    pub fn message(&self) -> &str {
        match self {
            Self::Blocking(message) | Self::Banner(message) | Self::Transient(message) => message,
        }
    }

    /// Only transient notices may be dismissed by the user.
    pub fn is_dismissible(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}
