use std::future::Future;
use std::pin::Pin;

use crate::error::ProbeError;
use crate::state::StateToken;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One successful status check: the coarse state token plus the
/// resource-specific payload it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation<P> {
    pub state: StateToken,
    pub payload: P,
}

impl<P> Observation<P> {
    pub fn new(state: impl Into<StateToken>, payload: P) -> Self {
        Self {
            state: state.into(),
            payload,
        }
    }
}

pub type ProbeResult<P> = Result<Observation<P>, ProbeError>;

/// Reads the current status of one remote resource.
///
/// Each impl holds its resource identifier plus whatever client it needs.
/// Implementations must be idempotent and must not mutate the resource.
/// The waiter may call `probe` many times but never concurrently for a
/// single wait.
///
/// Methods return boxed futures for dyn compatibility.
pub trait StatusProbe: Send + Sync {
    type Payload: Send;

    /// Read the resource's state. `Err(ProbeError::NotFound)` means the
    /// resource is known to be absent.
    fn probe(&self) -> BoxFuture<'_, ProbeResult<Self::Payload>>;
}

impl<T: StatusProbe + ?Sized> StatusProbe for Box<T> {
    type Payload = T::Payload;

    fn probe(&self) -> BoxFuture<'_, ProbeResult<Self::Payload>> {
        (**self).probe()
    }
}

impl<T: StatusProbe + ?Sized> StatusProbe for std::sync::Arc<T> {
    type Payload = T::Payload;

    fn probe(&self) -> BoxFuture<'_, ProbeResult<Self::Payload>> {
        (**self).probe()
    }
}

/// A probe backed by an async closure. See [`from_fn`].
pub struct FnProbe<F> {
    f: F,
}

/// Adapt an async closure into a [`StatusProbe`].
///
/// The closure is called once per probe; it usually clones a client handle
/// and an identifier into an `async move` block.
pub fn from_fn<F, Fut, P>(f: F) -> FnProbe<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = ProbeResult<P>> + Send + 'static,
    P: Send,
{
    FnProbe { f }
}

impl<F, Fut, P> StatusProbe for FnProbe<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = ProbeResult<P>> + Send + 'static,
    P: Send,
{
    type Payload = P;

    fn probe(&self) -> BoxFuture<'_, ProbeResult<P>> {
        Box::pin((self.f)())
    }
}
