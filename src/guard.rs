use std::{
    fmt,
    mem::{forget, MaybeUninit},
    ops::{Deref, DerefMut},
    ptr,
    sync::Arc,
};

/// A pool that can take an object back.
///
/// Implemented by every pool flavor; recycling is the same as calling the
/// pool's `put`, release hook included.
pub trait Recycle<T> {
    /// Returns `value` to the pool.
    fn recycle(&self, value: T);
}

/// A guard over an object borrowed from a pool.
///
/// The object goes back through [`Recycle::recycle`] when the guard drops.
pub struct RefGuard<'a, T, P: Recycle<T>> {
    obj: MaybeUninit<T>,
    pool: &'a P,
}

impl<'a, T, P: Recycle<T>> RefGuard<'a, T, P> {
    pub(crate) fn new(obj: T, pool: &'a P) -> Self {
        RefGuard {
            obj: MaybeUninit::new(obj),
            pool,
        }
    }

    /// Takes the object out of the guard. It is neither reset nor returned
    /// to the pool.
    pub fn into_inner(self) -> T {
        let obj = unsafe { self.obj.as_ptr().read() };
        forget(self);
        obj
    }
}

/// A guard over an object taken from a pool shared through an [`Arc`].
///
/// Holds the pool alive until the object has been recycled, so the guard can
/// outlive the caller's handle and move to another thread.
pub struct RcGuard<T, P: Recycle<T>> {
    obj: MaybeUninit<T>,
    pool: Arc<P>,
}

impl<T, P: Recycle<T>> RcGuard<T, P> {
    pub(crate) fn new(obj: T, pool: Arc<P>) -> Self {
        RcGuard {
            obj: MaybeUninit::new(obj),
            pool,
        }
    }

    /// Takes the object out of the guard and releases the pool handle. The
    /// object is neither reset nor returned to the pool.
    pub fn into_inner(mut self) -> T {
        let obj = unsafe { self.obj.as_ptr().read() };
        unsafe { ptr::drop_in_place(&mut self.pool) }
        forget(self);
        obj
    }
}

/// Access, drop-time recycling and forwarding impls shared by both guards.
macro_rules! guard_impls {
    ($([$($gen:tt)*] $guard:ty;)+) => {$(
        impl<$($gen)*> Deref for $guard {
            type Target = T;
            #[inline(always)]
            fn deref(&self) -> &T {
                unsafe { &*self.obj.as_ptr() }
            }
        }

        impl<$($gen)*> DerefMut for $guard {
            #[inline(always)]
            fn deref_mut(&mut self) -> &mut T {
                unsafe { &mut *self.obj.as_mut_ptr() }
            }
        }

        impl<$($gen)*> Drop for $guard {
            fn drop(&mut self) {
                // Safety: the object is initialized and read exactly once, here.
                self.pool.recycle(unsafe { ptr::read(self.obj.as_ptr()) });
            }
        }

        impl<$($gen)*> fmt::Debug for $guard
        where
            T: fmt::Debug,
        {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(&**self, f)
            }
        }

        impl<$($gen)*> PartialEq<T> for $guard
        where
            T: PartialEq,
        {
            #[inline]
            fn eq(&self, other: &T) -> bool {
                **self == *other
            }
        }

        impl<$($gen)*> AsRef<T> for $guard {
            #[inline(always)]
            fn as_ref(&self) -> &T {
                self
            }
        }

        impl<$($gen)*> AsMut<T> for $guard {
            #[inline(always)]
            fn as_mut(&mut self) -> &mut T {
                self
            }
        }
    )+};
}

guard_impls! {
    ['a, T, P: Recycle<T>] RefGuard<'a, T, P>;
    [T, P: Recycle<T>] RcGuard<T, P>;
}
