use std::time::Duration;

use tokio::time::Instant;

use crate::config::WaitSpec;
use crate::context::WaitContext;
use crate::error::WaitError;
use crate::outcome::Outcome;
use crate::probe::{Observation, StatusProbe};
use crate::state::StateToken;

/// Poll `spec.probe` until the resource converges.
///
/// Resolves to success when a target state is observed (or, with an empty
/// target set, when the probe reports the resource as not found), to a
/// failure on any other state or probe error, to a timeout once
/// `spec.timeout` elapses while still pending, and to cancellation as soon
/// as `ctx` is done. Probes never overlap.
pub async fn wait<Pr: StatusProbe>(ctx: &WaitContext, spec: WaitSpec<Pr>) -> Outcome<Pr::Payload> {
    Waiter::new(spec).run(ctx).await
}

/// How an inter-probe pause ended.
enum Wake {
    Elapsed,
    TimedOut,
    Cancelled,
}

struct Waiter<Pr: StatusProbe> {
    spec: WaitSpec<Pr>,
    started: Instant,
    deadline: Option<Instant>,
    interval: Duration,
    payload: Option<Pr::Payload>,
    last_state: Option<StateToken>,
    probes: u32,
    target_streak: u32,
}

impl<Pr: StatusProbe> Waiter<Pr> {
    fn new(spec: WaitSpec<Pr>) -> Self {
        let started = Instant::now();
        let deadline = if spec.timeout.is_zero() {
            None
        } else {
            started.checked_add(spec.timeout)
        };
        Self {
            interval: spec.poll_interval,
            spec,
            started,
            deadline,
            payload: None,
            last_state: None,
            probes: 0,
            target_streak: 0,
        }
    }

    async fn run(mut self, ctx: &WaitContext) -> Outcome<Pr::Payload> {
        if let Err(err) = self.spec.validate() {
            return self.finish(Some(err));
        }

        if !self.spec.delay.is_zero() {
            match self.pause(ctx, self.spec.delay).await {
                Wake::Elapsed => {}
                Wake::TimedOut => return self.timed_out(),
                Wake::Cancelled => return self.cancelled(),
            }
        }

        loop {
            if ctx.is_done() {
                return self.cancelled();
            }

            // A probe that finishes together with the context or the
            // deadline still counts.
            let polled = tokio::select! {
                biased;
                result = self.spec.probe.probe() => Ok(result),
                _ = ctx.done() => Err(Wake::Cancelled),
                _ = sleep_until_opt(self.deadline) => Err(Wake::TimedOut),
            };
            let result = match polled {
                Ok(result) => result,
                Err(Wake::TimedOut) => return self.timed_out(),
                Err(_) => return self.cancelled(),
            };
            self.probes += 1;

            let Observation { state, payload } = match result {
                Ok(observation) => observation,
                Err(err) if err.is_not_found() && self.spec.target.is_empty() => {
                    tracing::info!(
                        resource = %self.spec.label,
                        probes = self.probes,
                        "resource no longer exists"
                    );
                    return self.finish(None);
                }
                Err(err) => {
                    tracing::warn!(
                        resource = %self.spec.label,
                        probes = self.probes,
                        "status probe failed: {err}"
                    );
                    return self.finish(Some(WaitError::Probe(err)));
                }
            };

            tracing::debug!(
                resource = %self.spec.label,
                state = %state,
                probes = self.probes,
                "observed state"
            );
            self.payload = Some(payload);
            self.last_state = Some(state.clone());

            if self.spec.pending.is_empty() && self.spec.target.is_empty() {
                return self.succeeded();
            }

            if self.spec.is_target(&state) {
                self.target_streak += 1;
                if self.target_streak >= self.spec.continuous_target_occurrence {
                    return self.succeeded();
                }
            } else if self.spec.is_pending(&state) {
                self.target_streak = 0;
            } else {
                tracing::warn!(
                    resource = %self.spec.label,
                    state = %state,
                    "resource reached unexpected state"
                );
                let target = self.spec.target_list();
                return self.finish(Some(WaitError::UnexpectedState { state, target }));
            }

            if self.deadline.is_some_and(|d| Instant::now() >= d) {
                return self.timed_out();
            }

            let interval = self.interval;
            if let Some(backoff) = self.spec.backoff {
                self.interval = backoff.next(interval);
            }
            match self.pause(ctx, interval).await {
                Wake::Elapsed => {}
                Wake::TimedOut => return self.timed_out(),
                Wake::Cancelled => return self.cancelled(),
            }
        }
    }

    /// Sleep for `duration`, cut short by the wait's own deadline or by the
    /// context.
    async fn pause(&self, ctx: &WaitContext, duration: Duration) -> Wake {
        // An interval too large to represent never elapses on its own.
        let mut wake_at = Instant::now().checked_add(duration);
        let mut hits_deadline = false;
        if let Some(deadline) = self
            .deadline
            .filter(|d| wake_at.is_none_or(|w| *d <= w))
        {
            wake_at = Some(deadline);
            hits_deadline = true;
        }

        tokio::select! {
            biased;
            _ = ctx.done() => Wake::Cancelled,
            _ = sleep_until_opt(wake_at) => {
                if hits_deadline {
                    Wake::TimedOut
                } else {
                    Wake::Elapsed
                }
            }
        }
    }

    fn succeeded(self) -> Outcome<Pr::Payload> {
        tracing::info!(
            resource = %self.spec.label,
            state = self.last_state.as_ref().map(StateToken::as_str).unwrap_or(""),
            probes = self.probes,
            elapsed = ?self.started.elapsed(),
            "resource converged"
        );
        self.finish(None)
    }

    fn timed_out(self) -> Outcome<Pr::Payload> {
        tracing::warn!(
            resource = %self.spec.label,
            probes = self.probes,
            timeout = ?self.spec.timeout,
            "timed out waiting for resource"
        );
        let err = WaitError::Timeout {
            last_state: self.last_state.clone(),
            target: self.spec.target_list(),
            timeout: self.spec.timeout,
        };
        self.finish(Some(err))
    }

    fn cancelled(self) -> Outcome<Pr::Payload> {
        tracing::info!(
            resource = %self.spec.label,
            probes = self.probes,
            "wait cancelled"
        );
        let err = WaitError::Cancelled {
            last_state: self.last_state.clone(),
        };
        self.finish(Some(err))
    }

    fn finish(self, error: Option<WaitError>) -> Outcome<Pr::Payload> {
        Outcome {
            payload: self.payload,
            last_state: self.last_state,
            error,
            probes: self.probes,
            elapsed: self.started.elapsed(),
        }
    }
}

/// Sleep until `at`, or forever when there is no instant to wake at.
async fn sleep_until_opt(at: Option<Instant>) {
    match at {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}
