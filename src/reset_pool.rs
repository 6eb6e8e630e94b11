use crate::{
    Config, Detector, Error, FreeList, Observers, Pool, RcGuard, Recycle, RefGuard, Resettable,
    Result, Store,
};
use std::{fmt, sync::Arc};

/// A hook run on every object before it goes back to the store.
///
/// Hooks are invoked concurrently from every releasing thread.
pub type ReleaseHook<T> = Arc<dyn Fn(&mut T) + Send + Sync>;

/// An object pool that resets objects when they are returned.
///
/// `ResetPool` decorates a [`Pool`] with a release hook. The hook is either
/// supplied by the caller and used verbatim, or built from a [`Detector`]
/// that invokes [`Reset`](crate::Reset) on values exposing it.
///
/// ```
/// use respool::ResetPool;
///
/// let pool = ResetPool::new(|| Vec::<u8>::with_capacity(64));
/// let mut buf = pool.get();
/// buf.extend_from_slice(b"scratch");
/// pool.put(buf);
///
/// let buf = pool.get();
/// assert!(buf.is_empty());
/// ```
pub struct ResetPool<T, F = FreeList<T>> {
    pool: Pool<T, F>,
    on_release: ReleaseHook<T>,
}

impl<T: Resettable + 'static> ResetPool<T> {
    /// Creates a pool that detects and invokes the niladic reset of its
    /// objects on release, without observers.
    pub fn new<C>(ctor: C) -> Self
    where
        C: Fn() -> T + Send + Sync + 'static,
    {
        Self::from_pool_detecting(Pool::new(ctor), Observers::new())
    }

    /// Creates a capability-detecting pool from `config`.
    ///
    /// Release observers in the config are notified of every attempt. This
    /// pool never resets on acquisition, so acquire observers are never
    /// called. A custom hook in the config takes precedence over detection
    /// and is not observed.
    pub fn detecting<C>(ctor: C, config: Config<ReleaseHook<T>>) -> Result<Self>
    where
        C: Fn() -> T + Send + Sync + 'static,
    {
        config.validate()?;
        let pool = Pool::with_capacity(config.capacity, ctor);
        Ok(match config.reset {
            Some(hook) => Self::from_pool(pool, hook),
            None => Self::from_pool_detecting(pool, config.observers),
        })
    }
}

impl<T> ResetPool<T> {
    /// Creates a pool that runs `hook` on every released object.
    ///
    /// The hook must be safe to call from many threads at once.
    pub fn with_hook<C, H>(ctor: C, hook: H) -> Self
    where
        C: Fn() -> T + Send + Sync + 'static,
        H: Fn(&mut T) + Send + Sync + 'static,
    {
        Self::from_pool(Pool::new(ctor), Arc::new(hook))
    }

    /// Creates a pool with the explicit release hook of `config`.
    ///
    /// Fails with [`Error::MissingReleaseHook`] if the config has no hook,
    /// so that a pool meant to always reset is never built without one.
    pub fn from_config<C>(ctor: C, config: Config<ReleaseHook<T>>) -> Result<Self>
    where
        C: Fn() -> T + Send + Sync + 'static,
    {
        config.validate()?;
        let hook = config.reset.ok_or(Error::MissingReleaseHook)?;
        Ok(Self::from_pool(Pool::with_capacity(config.capacity, ctor), hook))
    }
}

impl<T, F> ResetPool<T, F> {
    /// Decorates `pool` with an explicit release hook.
    pub fn from_pool(pool: Pool<T, F>, on_release: ReleaseHook<T>) -> Self {
        ResetPool { pool, on_release }
    }

    /// Decorates `pool` with a capability-detecting release hook reporting
    /// to `observers`.
    pub fn from_pool_detecting(pool: Pool<T, F>, observers: Observers) -> Self
    where
        T: Resettable + 'static,
    {
        let detector = Detector::new(observers);
        Self::from_pool(
            pool,
            Arc::new(move |obj: &mut T| {
                detector.attempt(obj);
            }),
        )
    }

    /// Gets the undecorated pool.
    pub fn inner(&self) -> &Pool<T, F> {
        &self.pool
    }

    /// Gets the release hook.
    pub fn release_hook(&self) -> &ReleaseHook<T> {
        &self.on_release
    }

    /// Wraps the pool with an atomic reference counter, enabling the use of
    /// [`Self::get_rc`].
    pub fn to_rc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl<T, F: Store<T>> ResetPool<T, F> {
    /// Gets an object from the pool, creating one if the store is empty.
    ///
    /// Objects coming from the store were reset when they were released.
    #[inline]
    pub fn get(&self) -> T {
        self.pool.get()
    }

    /// Runs the release hook on `obj` and returns it to the pool.
    #[inline]
    pub fn put(&self, mut obj: T) {
        (self.on_release)(&mut obj);
        self.pool.put(obj);
    }

    /// Gets an object wrapped in a guard that puts it back when dropped.
    pub fn get_guard(&self) -> RefGuard<'_, T, Self> {
        RefGuard::new(self.get(), self)
    }

    /// Gets an object wrapped in a guard that holds an arc reference to the
    /// owning pool.
    pub fn get_rc(self: Arc<Self>) -> RcGuard<T, Self> {
        let obj = self.get();
        RcGuard::new(obj, self)
    }
}

impl<T, F: Store<T>> Recycle<T> for ResetPool<T, F> {
    #[inline(always)]
    fn recycle(&self, value: T) {
        self.put(value)
    }
}

impl<T, F: fmt::Debug> fmt::Debug for ResetPool<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResetPool").field("pool", &self.pool).finish()
    }
}
