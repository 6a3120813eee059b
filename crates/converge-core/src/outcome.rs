use std::time::Duration;

use crate::error::WaitError;
use crate::state::{StateToken, WaitState};

/// The result of one wait: the last payload the probe produced, the last
/// state token seen, and the terminal error (none on success).
///
/// The payload is returned on every outcome so callers can inspect the
/// resource's final observed state even when the wait failed.
#[derive(Debug, Clone)]
pub struct Outcome<P> {
    pub payload: Option<P>,
    pub last_state: Option<StateToken>,
    pub error: Option<WaitError>,
    /// Number of probe calls issued.
    pub probes: u32,
    pub elapsed: Duration,
}

impl<P> Outcome<P> {
    /// The terminal state this outcome represents.
    pub fn kind(&self) -> WaitState {
        match &self.error {
            None => WaitState::Success,
            Some(WaitError::Timeout { .. }) => WaitState::Timeout,
            Some(WaitError::Cancelled { .. }) => WaitState::Cancelled,
            Some(_) => WaitState::Failure,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_result(self) -> Result<Option<P>, WaitError> {
        match self.error {
            None => Ok(self.payload),
            Some(err) => Err(err),
        }
    }

    /// Replace the error with [`enrich`]'s result.
    pub fn enriched<F>(mut self, extractor: F) -> Self
    where
        F: Fn(&P) -> Option<Diagnostic>,
    {
        self.error = enrich(&self, extractor);
        self
    }
}

/// A structured error detail carried inside a resource's own status payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Fold a payload's own diagnostic into a failed outcome's error.
///
/// Only an `UnexpectedState` failure with a payload is eligible. When
/// `extractor` finds a diagnostic, the returned error is
/// [`WaitError::Failed`] and displays as `<code>: <message>`; the generic
/// state-mismatch error is dropped. Every other outcome's error is returned
/// unchanged, including `None` for success.
pub fn enrich<P, F>(outcome: &Outcome<P>, extractor: F) -> Option<WaitError>
where
    F: Fn(&P) -> Option<Diagnostic>,
{
    match (&outcome.error, &outcome.payload) {
        (Some(WaitError::UnexpectedState { .. }), Some(payload)) => match extractor(payload) {
            Some(Diagnostic { code, message }) => Some(WaitError::Failed { code, message }),
            None => outcome.error.clone(),
        },
        _ => outcome.error.clone(),
    }
}
