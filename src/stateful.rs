use crate::{
    Config, Detector, Error, FreeList, Observers, Phase, Pool, RcGuard, Recycle, RefGuard,
    ResetPool, Resettable, Result, Store,
};
use std::{fmt, sync::Arc};

/// A resetter applying a state to an object.
///
/// Stateful pools call it with the caller's state on acquisition and with
/// `S::default()` on release. It is invoked concurrently from every thread
/// using the pool.
pub type StateResetter<T, S> = Arc<dyn Fn(&mut T, S) + Send + Sync>;

/// An object pool for stateful objects.
///
/// `StatefulPool` handles two types: `T`, the pooled object, and `S`, the
/// state installed on the object before it is handed out. When the object
/// comes back, its state is reset to `S::default()` before it is stored.
///
/// ```
/// use std::io::{Cursor, Read};
/// use respool::StatefulPool;
///
/// let pool = StatefulPool::<Vec<u8>, _>::new(|| Cursor::new(Vec::new()));
///
/// let mut reader = pool.get(b"payload".to_vec());
/// let mut out = String::new();
/// reader.read_to_string(&mut out).unwrap();
/// assert_eq!(out, "payload");
/// pool.put(reader);
/// ```
pub struct StatefulPool<S, T, F = FreeList<T>> {
    pool: ResetPool<T, F>,
    on_acquire: StateResetter<T, S>,
}

impl<S: Default + 'static, T: Resettable + 'static> StatefulPool<S, T> {
    /// Creates a pool that detects whether its objects implement
    /// [`ResetWith<S>`](crate::ResetWith) and invokes it on both acquisition
    /// and release, without observers.
    pub fn new<C>(ctor: C) -> Self
    where
        C: Fn() -> T + Send + Sync + 'static,
    {
        Self::from_pool_detecting(Pool::new(ctor), Observers::new())
    }

    /// Creates a capability-detecting pool from `config`.
    ///
    /// Observers in the config are notified of every attempt in their phase.
    /// A custom resetter in the config takes precedence over detection and
    /// is not observed.
    pub fn detecting<C>(ctor: C, config: Config<StateResetter<T, S>>) -> Result<Self>
    where
        C: Fn() -> T + Send + Sync + 'static,
    {
        config.validate()?;
        let pool = Pool::with_capacity(config.capacity, ctor);
        Ok(match config.reset {
            Some(resetter) => Self::from_pool(pool, resetter),
            None => Self::from_pool_detecting(pool, config.observers),
        })
    }
}

impl<S: Default + 'static, T: 'static> StatefulPool<S, T> {
    /// Creates a pool applying `resetter` with the caller's state on
    /// acquisition and with `S::default()` on release.
    ///
    /// The resetter must be safe to call from many threads at once.
    pub fn with_resetter<C, R>(ctor: C, resetter: R) -> Self
    where
        C: Fn() -> T + Send + Sync + 'static,
        R: Fn(&mut T, S) + Send + Sync + 'static,
    {
        Self::from_pool(Pool::new(ctor), Arc::new(resetter))
    }

    /// Creates a pool with the custom resetter of `config`.
    ///
    /// Fails with [`Error::MissingResetter`] if the config has none.
    pub fn from_config<C>(ctor: C, config: Config<StateResetter<T, S>>) -> Result<Self>
    where
        C: Fn() -> T + Send + Sync + 'static,
    {
        config.validate()?;
        let resetter = config.reset.ok_or(Error::MissingResetter)?;
        Ok(Self::from_pool(Pool::with_capacity(config.capacity, ctor), resetter))
    }
}

impl<S, T, F> StatefulPool<S, T, F> {
    /// Layers a stateful pool over `pool`, using `resetter` for both phases.
    pub fn from_pool(pool: Pool<T, F>, resetter: StateResetter<T, S>) -> Self
    where
        S: Default + 'static,
        T: 'static,
    {
        let on_release = resetter.clone();
        let pool = ResetPool::from_pool(
            pool,
            Arc::new(move |obj: &mut T| on_release(obj, S::default())),
        );
        Self::from_parts(pool, resetter)
    }

    /// Layers a capability-detecting stateful pool over `pool`.
    pub fn from_pool_detecting(pool: Pool<T, F>, observers: Observers) -> Self
    where
        S: Default + 'static,
        T: Resettable + 'static,
    {
        let on_acquire = Detector::new(observers);
        let on_release = on_acquire.clone();
        let pool = ResetPool::from_pool(
            pool,
            Arc::new(move |obj: &mut T| {
                on_release.attempt_with(obj, S::default(), Phase::Release);
            }),
        );
        Self::from_parts(
            pool,
            Arc::new(move |obj: &mut T, state: S| {
                on_acquire.attempt_with(obj, state, Phase::Acquire);
            }),
        )
    }

    /// Combines a resetting pool with an independent acquisition hook.
    ///
    /// The release behavior is entirely up to `pool`.
    pub fn from_parts(pool: ResetPool<T, F>, on_acquire: StateResetter<T, S>) -> Self {
        StatefulPool { pool, on_acquire }
    }

    /// Gets the resetting pool this pool is layered on.
    pub fn inner(&self) -> &ResetPool<T, F> {
        &self.pool
    }

    /// Wraps the pool with an atomic reference counter, enabling the use of
    /// [`Self::get_rc`].
    pub fn to_rc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl<S, T, F: Store<T>> StatefulPool<S, T, F> {
    /// Gets an object from the pool and installs `state` on it.
    ///
    /// If the store is empty, a new object is created first.
    #[inline]
    pub fn get(&self, state: S) -> T {
        let mut obj = self.pool.get();
        (self.on_acquire)(&mut obj, state);
        obj
    }

    /// Returns an object to the pool after resetting it to the default state.
    #[inline]
    pub fn put(&self, obj: T) {
        self.pool.put(obj);
    }

    /// Gets an object with `state` installed, wrapped in a guard that puts it
    /// back when dropped.
    pub fn get_guard(&self, state: S) -> RefGuard<'_, T, Self> {
        RefGuard::new(self.get(state), self)
    }

    /// Gets an object with `state` installed, wrapped in a guard that holds
    /// an arc reference to the owning pool.
    pub fn get_rc(self: Arc<Self>, state: S) -> RcGuard<T, Self> {
        let obj = self.get(state);
        RcGuard::new(obj, self)
    }
}

impl<S, T, F: Store<T>> Recycle<T> for StatefulPool<S, T, F> {
    #[inline(always)]
    fn recycle(&self, value: T) {
        self.put(value)
    }
}

impl<S, T, F: fmt::Debug> fmt::Debug for StatefulPool<S, T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatefulPool")
            .field("pool", &self.pool)
            .finish()
    }
}
