use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A resource's reported lifecycle state, e.g. `"CREATING"` or `"ACTIVE"`.
///
/// Opaque to the waiter: meaning comes only from the pending/target sets the
/// caller configures.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateToken(String);

impl StateToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StateToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for StateToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for StateToken {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for StateToken {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for StateToken {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Waiter state machine.
///
/// `Polling` is the only non-terminal state. Transitions:
/// - `Polling → Polling` when the observed state is pending
/// - `Polling → Success` when it is a target
/// - `Polling → Failure` when it is neither, or the probe failed
/// - `Polling → Timeout` when the wait's own timeout elapses
/// - `Polling → Cancelled` when the caller's context is done
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitState {
    Polling,
    Success,
    Failure,
    Timeout,
    Cancelled,
}

impl WaitState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Polling)
    }
}

impl fmt::Display for WaitState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::Polling => "polling",
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Timeout => "timeout",
            Self::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}
