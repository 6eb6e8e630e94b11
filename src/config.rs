use crate::{Error, Result};
use std::{fmt, sync::Arc};

/// Number of idle objects a default [`FreeList`](crate::FreeList) retains.
pub const DEFAULT_CAPACITY: usize = 1024;

/// The call site of a reset attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// The reset ran while handing an object out, with the caller's state.
    Acquire,
    /// The reset ran while taking an object back, before storing it.
    Release,
}

/// The outcome of a single reset attempt, as seen by observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResetEvent {
    /// Whether the value exposed the capability and the reset ran.
    pub performed: bool,
    /// Where the attempt happened.
    pub phase: Phase,
}

/// A callback invoked once per reset attempt.
///
/// Observers may run concurrently from many threads.
pub type Observer = Arc<dyn Fn(ResetEvent) + Send + Sync>;

/// Observers of the reset attempts of a capability-detecting pool.
///
/// Each registration appends; observers of a phase fire in registration
/// order, exactly once per attempt in that phase.
#[derive(Clone, Default)]
pub struct Observers {
    on_acquire: Vec<Observer>,
    on_release: Vec<Observer>,
}

impl Observers {
    /// Creates an empty set of observers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an observer of acquisition-time reset attempts.
    #[must_use]
    pub fn on_acquire_reset_observed<F>(mut self, observer: F) -> Self
    where
        F: Fn(ResetEvent) + Send + Sync + 'static,
    {
        self.on_acquire.push(Arc::new(observer));
        self
    }

    /// Appends an observer of release-time reset attempts.
    #[must_use]
    pub fn on_release_reset_observed<F>(mut self, observer: F) -> Self
    where
        F: Fn(ResetEvent) + Send + Sync + 'static,
    {
        self.on_release.push(Arc::new(observer));
        self
    }

    /// Appends an observer of both phases; it can tell them apart through
    /// [`ResetEvent::phase`].
    #[must_use]
    pub fn on_reset_observed<F>(mut self, observer: F) -> Self
    where
        F: Fn(ResetEvent) + Send + Sync + 'static,
    {
        let observer: Observer = Arc::new(observer);
        self.on_acquire.push(observer.clone());
        self.on_release.push(observer);
        self
    }

    /// Checks if no observer is registered for either phase.
    pub fn is_empty(&self) -> bool {
        self.on_acquire.is_empty() && self.on_release.is_empty()
    }

    pub(crate) fn notify(&self, event: ResetEvent) {
        let observers = match event.phase {
            Phase::Acquire => &self.on_acquire,
            Phase::Release => &self.on_release,
        };
        for observer in observers {
            observer(event);
        }
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("on_acquire", &self.on_acquire.len())
            .field("on_release", &self.on_release.len())
            .finish()
    }
}

/// Construction parameters shared by the resetting pools.
///
/// `H` is the custom reset hook type: a [`ReleaseHook`](crate::ReleaseHook)
/// for [`ResetPool`](crate::ResetPool) or a
/// [`StateResetter`](crate::StateResetter) for
/// [`StatefulPool`](crate::StatefulPool).
pub struct Config<H> {
    /// Maximum number of idle objects kept by the free list.
    pub capacity: usize,
    /// Observers of capability-detected resets. Custom hooks are not observed,
    /// and a [`ResetPool`](crate::ResetPool) only reports the release phase.
    pub observers: Observers,
    /// Custom reset hook. Required by `from_config` constructors; when set,
    /// `detecting` constructors use it verbatim instead of detection.
    pub reset: Option<H>,
}

impl<H> Config<H> {
    /// Creates a config with [`DEFAULT_CAPACITY`], no observers and no hook.
    pub fn new() -> Self {
        Config {
            capacity: DEFAULT_CAPACITY,
            observers: Observers::new(),
            reset: None,
        }
    }

    /// Sets the free list capacity.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the observers.
    #[must_use]
    pub fn with_observers(mut self, observers: Observers) -> Self {
        self.observers = observers;
        self
    }

    /// Sets the custom reset hook.
    #[must_use]
    pub fn with_reset(mut self, reset: H) -> Self {
        self.reset = Some(reset);
        self
    }

    /// Checks that the config describes a usable free list.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        Ok(())
    }
}

impl<H> Default for Config<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> fmt::Debug for Config<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("capacity", &self.capacity)
            .field("observers", &self.observers)
            .field("reset", &self.reset.is_some())
            .finish()
    }
}
