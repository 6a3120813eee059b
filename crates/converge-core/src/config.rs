use std::collections::BTreeSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::WaitError;
use crate::probe::StatusProbe;
use crate::state::StateToken;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Exponential growth of the interval between probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backoff {
    /// Multiplier applied to the interval after each pending observation.
    pub factor: u32,
    /// Upper bound for the interval.
    pub max: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            factor: 2,
            max: Duration::from_secs(10),
        }
    }
}

impl Backoff {
    pub(crate) fn next(&self, current: Duration) -> Duration {
        current.saturating_mul(self.factor.max(1)).min(self.max)
    }
}

/// Everything one wait needs: which states mean "keep going" and which mean
/// "done", how to read the state, and how long to keep trying.
///
/// A `WaitSpec` is built per call and consumed by [`wait`](crate::wait).
pub struct WaitSpec<P> {
    /// Resource label used in log fields, e.g. `"msk_cluster"`.
    pub label: String,
    pub pending: BTreeSet<StateToken>,
    /// Empty means "the resource is gone": a `NotFound` probe is success.
    pub target: BTreeSet<StateToken>,
    pub probe: P,
    pub poll_interval: Duration,
    /// Zero means no deadline.
    pub timeout: Duration,
    /// Wait this long before the first probe.
    pub delay: Duration,
    pub backoff: Option<Backoff>,
    /// Consecutive target observations required before success.
    pub continuous_target_occurrence: u32,
}

impl<P: StatusProbe> WaitSpec<P> {
    pub fn new(label: impl Into<String>, probe: P) -> Self {
        Self {
            label: label.into(),
            pending: BTreeSet::new(),
            target: BTreeSet::new(),
            probe,
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: Duration::ZERO,
            delay: Duration::ZERO,
            backoff: None,
            continuous_target_occurrence: 1,
        }
    }

    pub fn pending<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StateToken>,
    {
        self.pending.extend(states.into_iter().map(Into::into));
        self
    }

    pub fn target<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StateToken>,
    {
        self.target.extend(states.into_iter().map(Into::into));
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = Some(backoff);
        self
    }

    pub fn continuous_target_occurrence(mut self, count: u32) -> Self {
        self.continuous_target_occurrence = count;
        self
    }

    /// Check the invariants the waiter relies on.
    pub fn validate(&self) -> Result<(), WaitError> {
        if self.poll_interval.is_zero() {
            return Err(WaitError::InvalidSpec(
                "poll interval must be greater than zero".into(),
            ));
        }
        if self.continuous_target_occurrence == 0 {
            return Err(WaitError::InvalidSpec(
                "continuous target occurrence must be at least 1".into(),
            ));
        }
        if let Some(state) = self.pending.intersection(&self.target).next() {
            return Err(WaitError::InvalidSpec(format!(
                "state '{state}' is both pending and target"
            )));
        }
        Ok(())
    }

    pub fn is_pending(&self, state: &StateToken) -> bool {
        self.pending.contains(state)
    }

    pub fn is_target(&self, state: &StateToken) -> bool {
        self.target.contains(state)
    }

    pub fn target_list(&self) -> Vec<StateToken> {
        self.target.iter().cloned().collect()
    }
}

/// Per-operation timeouts for a managed resource, in the style of
/// create/update/delete timeout blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeouts {
    #[serde(default = "Timeouts::default_create", with = "secs")]
    pub create: Duration,
    #[serde(default = "Timeouts::default_update", with = "secs")]
    pub update: Duration,
    #[serde(default = "Timeouts::default_delete", with = "secs")]
    pub delete: Duration,
}

impl Timeouts {
    pub const DEFAULT: Duration = Duration::from_secs(120 * 60);

    fn default_create() -> Duration {
        Self::DEFAULT
    }

    fn default_update() -> Duration {
        Self::DEFAULT
    }

    fn default_delete() -> Duration {
        Self::DEFAULT
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            create: Self::DEFAULT,
            update: Self::DEFAULT,
            delete: Self::DEFAULT,
        }
    }
}

/// Durations as whole seconds on the wire.
mod secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_secs)
    }
}
