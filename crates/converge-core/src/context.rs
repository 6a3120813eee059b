use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Caller-side cancellation for a wait.
///
/// Carries a [`CancellationToken`] and an optional deadline. Either one
/// firing makes the context "done", which a waiter reports as `Cancelled`
/// rather than `Timeout`. Cheap to clone; clones share the same token.
#[derive(Debug, Clone)]
pub struct WaitContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Default for WaitContext {
    fn default() -> Self {
        Self::with_token(CancellationToken::new())
    }
}

impl WaitContext {
    /// A context that is never done unless cancelled through [`token`](Self::token).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Set an absolute deadline. An earlier existing deadline is kept.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    /// A timeout too large to represent as an instant leaves the deadline unchanged.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self,
        }
    }

    /// A context cancelled whenever this one is, but which can also be
    /// cancelled on its own.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_done(&self) -> bool {
        self.token.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Resolves once the token is cancelled or the deadline passes.
    pub async fn done(&self) {
        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    _ = self.token.cancelled() => {}
                    _ = tokio::time::sleep_until(deadline) => {}
                }
            }
            None => self.token.cancelled().await,
        }
    }
}
