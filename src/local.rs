use crate::{Error, Result, Store};
use std::{cell::UnsafeCell, collections::VecDeque, fmt, marker::PhantomData};

/// A free list for a single thread, it cannot be moved between threads.
///
/// Pools built over a `LocalFreeList` skip all atomic operations on the
/// store. Objects released while the list is full are dropped.
pub struct LocalFreeList<T> {
    storage: UnsafeCell<VecDeque<T>>,
    capacity: usize,
    // force the struct to be !Send and !Sync
    _phantom: PhantomData<*mut usize>,
}

impl<T> LocalFreeList<T> {
    /// Creates a local free list that retains up to `capacity` idle objects.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Use [`Self::try_new`] to handle that
    /// case as an error.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be non-zero");
        LocalFreeList {
            storage: UnsafeCell::new(VecDeque::with_capacity(capacity)),
            capacity,
            _phantom: PhantomData,
        }
    }

    /// Creates a local free list that retains up to `capacity` idle objects,
    /// or fails with [`Error::ZeroCapacity`].
    pub fn try_new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        Ok(Self::new(capacity))
    }

    /// Get storage as mutable reference
    /// Safety: the list is !Sync and no reference escapes a single method
    /// call, so there is never more than one live borrow.
    #[allow(clippy::mut_from_ref)]
    fn storage_mut(&self) -> &mut VecDeque<T> {
        unsafe { &mut *self.storage.get() }
    }

    /// Borrows storage as immutable reference
    /// Safety: same as [`Self::storage_mut`].
    fn storage_borrow(&self) -> &VecDeque<T> {
        unsafe { &*self.storage.get() }
    }

    /// Gets the number of objects currently in the free list.
    pub fn len(&self) -> usize {
        self.storage_borrow().len()
    }

    /// Checks if the free list holds no idle object.
    pub fn is_empty(&self) -> bool {
        self.storage_borrow().is_empty()
    }

    /// Gets the maximum number of idle objects the free list retains.
    pub fn cap(&self) -> usize {
        self.capacity
    }
}

impl<T> Store<T> for LocalFreeList<T> {
    #[inline]
    fn acquire(&self) -> Option<T> {
        self.storage_mut().pop_front()
    }

    #[inline]
    fn release(&self, value: T) {
        if self.len() < self.capacity {
            self.storage_mut().push_back(value);
        } else {
            tracing::trace!(capacity = self.capacity, "local free list full, dropping released object");
        }
    }
}

impl<T> fmt::Debug for LocalFreeList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalFreeList")
            .field("len", &self.len())
            .field("cap", &self.cap())
            .finish()
    }
}
