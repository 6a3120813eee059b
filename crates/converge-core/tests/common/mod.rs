#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use converge_core::{BoxFuture, Diagnostic, Observation, ProbeError, ProbeResult, StatusProbe};
use tokio::time::Instant;

/// Payload returned by [`Scripted`]: the state plus an optional embedded
/// error detail, and the 1-based index of the probe that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Status {
    pub state: String,
    pub seq: u32,
    pub error_code: Option<String>,
    pub error_message: Option<String>,
}

/// One scripted probe response.
#[derive(Debug, Clone)]
pub enum Step {
    State(&'static str),
    Failed {
        state: &'static str,
        code: &'static str,
        message: &'static str,
    },
    Error(ProbeError),
}

/// A probe that replays a fixed script and then repeats its last step.
#[derive(Clone)]
pub struct Scripted {
    steps: Arc<Mutex<VecDeque<Step>>>,
    last: Arc<Mutex<Option<Step>>>,
    calls: Arc<Mutex<Vec<Instant>>>,
    latency: Duration,
}

impl Scripted {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            steps: Arc::new(Mutex::new(steps.into_iter().collect())),
            last: Arc::new(Mutex::new(None)),
            calls: Arc::new(Mutex::new(Vec::new())),
            latency: Duration::ZERO,
        }
    }

    pub fn states(states: &[&'static str]) -> Self {
        Self::new(states.iter().map(|s| Step::State(*s)))
    }

    /// Every probe takes `latency` to answer.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// When each probe was issued.
    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().clone()
    }

    fn next(&self) -> ProbeResult<Status> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(Instant::now());
        let seq = calls.len() as u32;

        let mut last = self.last.lock().unwrap();
        let step = match self.steps.lock().unwrap().pop_front() {
            Some(step) => {
                *last = Some(step.clone());
                step
            }
            None => last.clone().expect("script is empty"),
        };

        match step {
            Step::State(state) => Ok(Observation::new(
                state,
                Status {
                    state: state.to_string(),
                    seq,
                    error_code: None,
                    error_message: None,
                },
            )),
            Step::Failed {
                state,
                code,
                message,
            } => Ok(Observation::new(
                state,
                Status {
                    state: state.to_string(),
                    seq,
                    error_code: Some(code.to_string()),
                    error_message: Some(message.to_string()),
                },
            )),
            Step::Error(err) => Err(err),
        }
    }
}

impl StatusProbe for Scripted {
    type Payload = Status;

    fn probe(&self) -> BoxFuture<'_, ProbeResult<Status>> {
        let latency = self.latency;
        Box::pin(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            self.next()
        })
    }
}

/// Extractor used by the tests: only `FAILED` payloads carry a diagnostic.
pub fn status_diagnostic(status: &Status) -> Option<Diagnostic> {
    if status.state != "FAILED" {
        return None;
    }
    match (&status.error_code, &status.error_message) {
        (Some(code), Some(message)) => Some(Diagnostic::new(code, message)),
        _ => None,
    }
}
