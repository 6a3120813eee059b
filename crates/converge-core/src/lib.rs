//! converge-core
//!
//! Generic state-convergence waiter for remote resources whose lifecycle
//! moves through named states on a control plane we don't own.
//!
//! Public API:
//! - `wait()` — poll a `StatusProbe` until a target state, a failure state,
//!   the wait's timeout, or cancellation
//! - `enrich()` — replace a generic unexpected-state error with the
//!   diagnostic carried in the resource's own payload

pub mod config;
pub mod context;
pub mod error;
pub mod outcome;
pub mod probe;
pub mod state;
pub mod waiter;

pub use crate::config::{Backoff, Timeouts, WaitSpec, DEFAULT_POLL_INTERVAL};
pub use crate::context::WaitContext;
pub use crate::error::{format_err_chain, ProbeError, WaitError};
pub use crate::outcome::{enrich, Diagnostic, Outcome};
pub use crate::probe::{from_fn, BoxFuture, FnProbe, Observation, ProbeResult, StatusProbe};
pub use crate::state::{StateToken, WaitState};
pub use crate::waiter::wait;
