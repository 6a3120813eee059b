use std::time::Duration;

use thiserror::Error;

use crate::state::StateToken;

/// Failure reported by a [`StatusProbe`](crate::probe::StatusProbe) itself.
///
/// The waiter never retries these; transient network errors are the probe's
/// own business.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// The resource is known to be absent.
    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("status request failed: {0}")]
    Request(String),

    #[error("malformed status response: {0}")]
    Malformed(String),
}

impl ProbeError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// The single terminal error a wait resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WaitError {
    #[error("invalid wait spec: {0}")]
    InvalidSpec(String),

    #[error(transparent)]
    Probe(#[from] ProbeError),

    #[error("unexpected state '{state}', wanted target '{}'", join_states(.target))]
    UnexpectedState {
        state: StateToken,
        target: Vec<StateToken>,
    },

    /// An unexpected state whose payload carried the resource's own
    /// diagnostic. Displays as `<code>: <message>`.
    #[error("{code}: {message}")]
    Failed { code: String, message: String },

    #[error(
        "timeout while waiting for state to become '{}' (last state: '{}', timeout: {timeout:?})",
        join_states(.target),
        last_state_label(.last_state)
    )]
    Timeout {
        last_state: Option<StateToken>,
        target: Vec<StateToken>,
        timeout: Duration,
    },

    #[error("wait cancelled (last state: '{}')", last_state_label(.last_state))]
    Cancelled { last_state: Option<StateToken> },
}

impl WaitError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

fn join_states(states: &[StateToken]) -> String {
    states
        .iter()
        .map(StateToken::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn last_state_label(state: &Option<StateToken>) -> &str {
    state.as_ref().map(StateToken::as_str).unwrap_or("")
}

/// Walk the full error chain and join all causes into one string.
///
/// AWS SDK errors often have terse `Display` impls (e.g. "service error")
/// but useful detail in the source chain.
pub fn format_err_chain(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}
