use crate::{FreeList, RcGuard, Recycle, RefGuard, Store, DEFAULT_CAPACITY};
use std::{fmt, sync::Arc};

/// A zero-argument factory producing a new object on a free list miss.
pub type Constructor<T> = Box<dyn Fn() -> T + Send + Sync>;

/// A type-safe object pool.
///
/// This struct pairs a [`Store`] of idle objects with a constructor that is
/// invoked whenever the store has nothing to hand out. It never resets
/// objects; see [`ResetPool`](crate::ResetPool) and
/// [`StatefulPool`](crate::StatefulPool) for that.
pub struct Pool<T, F = FreeList<T>> {
    ctor: Constructor<T>,
    store: F,
}

impl<T> Pool<T> {
    /// Creates a new pool over a [`FreeList`] retaining up to
    /// [`DEFAULT_CAPACITY`] idle objects.
    pub fn new<C>(ctor: C) -> Self
    where
        C: Fn() -> T + Send + Sync + 'static,
    {
        Self::with_capacity(DEFAULT_CAPACITY, ctor)
    }

    /// Creates a new pool over a [`FreeList`] retaining up to `capacity` idle
    /// objects.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity<C>(capacity: usize, ctor: C) -> Self
    where
        C: Fn() -> T + Send + Sync + 'static,
    {
        Self::with_store(FreeList::new(capacity), ctor)
    }
}

impl<T, F> Pool<T, F> {
    /// Creates a new pool over the given store.
    pub fn with_store<C>(store: F, ctor: C) -> Self
    where
        C: Fn() -> T + Send + Sync + 'static,
    {
        Pool {
            ctor: Box::new(ctor),
            store,
        }
    }

    /// Gets the store backing this pool.
    pub fn store(&self) -> &F {
        &self.store
    }

    /// Wraps the pool with an atomic reference counter, enabling the use of
    /// [`Self::get_rc`] to obtain guards that do not borrow the pool.
    pub fn to_rc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl<T, F: Store<T>> Pool<T, F> {
    /// Gets an object from the pool.
    ///
    /// If the store is empty, a new object is created using the constructor.
    /// A panicking constructor propagates to the caller.
    #[inline]
    pub fn get(&self) -> T {
        match self.store.acquire() {
            Some(obj) => obj,
            None => {
                tracing::trace!("free list miss, constructing a new object");
                (self.ctor)()
            }
        }
    }

    /// Returns an object to the pool.
    ///
    /// The object is handed to the store as is.
    #[inline]
    pub fn put(&self, obj: T) {
        self.store.release(obj);
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

impl<T, F: Store<T>> Recycle<T> for Pool<T, F> {
    #[inline(always)]
    fn recycle(&self, value: T) {
        self.put(value)
    }
}

impl<T, F: fmt::Debug> fmt::Debug for Pool<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool").field("store", &self.store).finish()
    }
}
