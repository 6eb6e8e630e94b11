use crate::{Error, Result};
use crossbeam_queue::ArrayQueue;
use std::{
    any::{type_name, Any},
    fmt,
    marker::PhantomData,
    sync::Arc,
};

/// A best-effort free list of recycled objects.
///
/// Stores are caches, not queues: [`Store::acquire`] may return `None` even
/// right after a [`Store::release`], and a store is free to drop released
/// objects. Pools only rely on a store being safe for the same level of
/// concurrency as the pool itself.
pub trait Store<T> {
    /// Takes an idle object out of the store, if there is one.
    fn acquire(&self) -> Option<T>;

    /// Hands an object to the store, which may keep or drop it.
    fn release(&self, value: T);
}

impl<T, F: Store<T> + ?Sized> Store<T> for Arc<F> {
    #[inline(always)]
    fn acquire(&self) -> Option<T> {
        (**self).acquire()
    }

    #[inline(always)]
    fn release(&self, value: T) {
        (**self).release(value)
    }
}

/// A lock-free free list with bounded retention.
///
/// Objects released while the list is full are dropped.
pub struct FreeList<T> {
    storage: ArrayQueue<T>,
}

impl<T> FreeList<T> {
    /// Creates a free list that retains up to `capacity` idle objects.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Use [`Self::try_new`] to handle that
    /// case as an error.
    pub fn new(capacity: usize) -> Self {
        FreeList {
            storage: ArrayQueue::new(capacity),
        }
    }

    /// Creates a free list that retains up to `capacity` idle objects, or
    /// fails with [`Error::ZeroCapacity`].
    pub fn try_new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        Ok(Self::new(capacity))
    }

    /// Gets the number of objects currently in the free list.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Checks if the free list holds no idle object.
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Gets the maximum number of idle objects the free list retains.
    pub fn cap(&self) -> usize {
        self.storage.capacity()
    }
}

impl<T> Store<T> for FreeList<T> {
    #[inline]
    fn acquire(&self) -> Option<T> {
        self.storage.pop()
    }

    #[inline]
    fn release(&self, value: T) {
        if self.storage.push(value).is_err() {
            tracing::trace!(capacity = self.cap(), "free list full, dropping released object");
        }
    }
}

impl<T> fmt::Debug for FreeList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FreeList")
            .field("len", &self.len())
            .field("cap", &self.cap())
            .finish()
    }
}

/// An untyped object as held by a heterogeneous store.
pub type AnyObject = Box<dyn Any + Send>;

/// A typed view over a store of [`AnyObject`]s.
///
/// Several views of different types may share one store. An entry of
/// another type is treated as a miss and discarded, the same as an empty
/// store.
pub struct Raw<T, F = Arc<FreeList<AnyObject>>> {
    store: F,
    _marker: PhantomData<fn() -> T>,
}

impl<T, F> Raw<T, F> {
    /// Creates a typed view over `store`.
    pub fn new(store: F) -> Self {
        Raw {
            store,
            _marker: PhantomData,
        }
    }

    /// Gets the underlying untyped store.
    pub fn inner(&self) -> &F {
        &self.store
    }
}

impl<T: Any + Send, F: Store<AnyObject>> Raw<T, F> {
    /// Takes an object out of the store if the next entry is a `T`.
    pub fn get(&self) -> Option<T> {
        match self.store.acquire()?.downcast::<T>() {
            Ok(value) => Some(*value),
            Err(_) => {
                tracing::debug!(expected = type_name::<T>(), "discarding free list entry of another type");
                None
            }
        }
    }

    /// Adds `value` to the store.
    pub fn put(&self, value: T) {
        self.store.release(Box::new(value));
    }
}

impl<T: Any + Send, F: Store<AnyObject>> Store<T> for Raw<T, F> {
    #[inline]
    fn acquire(&self) -> Option<T> {
        self.get()
    }

    #[inline]
    fn release(&self, value: T) {
        self.put(value)
    }
}

impl<T, F: fmt::Debug> fmt::Debug for Raw<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Raw")
            .field("type", &type_name::<T>())
            .field("store", &self.store)
            .finish()
    }
}
