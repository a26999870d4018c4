//! Status enums shared across components.

use serde::{Deserialize, Serialize};

/// Authentication state of the current storage scope.
///
/// There are no intermediate states: a session is either anonymous or has a
/// current user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Anonymous,
    Authenticated,
}

impl SessionStatus {
    /// Whether a user is logged in.
    #[must_use]
    pub const fn is_authenticated(self) -> bool {
        matches!(self, Self::Authenticated)
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anonymous => write!(f, "anonymous"),
            Self::Authenticated => write!(f, "authenticated"),
        }
    }
}
