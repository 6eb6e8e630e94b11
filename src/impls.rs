use crate::{offer, Reset, ResetWith, Resettable};
use std::{
    any::Any,
    collections::{BTreeMap, HashMap, VecDeque},
    hash::BuildHasher,
    io::Cursor,
};

macro_rules! clear_on_reset {
    ($([$($generics:tt)*] $ty:ty),* $(,)?) => {$(
        impl<$($generics)*> Reset for $ty {
            #[inline]
            fn reset(&mut self) {
                self.clear();
            }
        }

        impl<$($generics)*> Resettable for $ty {
            #[inline(always)]
            fn as_reset(&mut self) -> Option<&mut dyn Reset> {
                Some(self)
            }
        }
    )*};
}

clear_on_reset! {
    [T] Vec<T>,
    [T] VecDeque<T>,
    [] String,
    [K, V, H: BuildHasher] HashMap<K, V, H>,
    [K, V] BTreeMap<K, V>,
}

/// Rewinds the cursor and drops its contents, keeping the allocation.
impl Reset for Cursor<Vec<u8>> {
    fn reset(&mut self) {
        self.get_mut().clear();
        self.set_position(0);
    }
}

/// Installs `state` as the cursor contents and rewinds it.
impl ResetWith<Vec<u8>> for Cursor<Vec<u8>> {
    fn reset_with(&mut self, state: Vec<u8>) {
        *self.get_mut() = state;
        self.set_position(0);
    }
}

impl Resettable for Cursor<Vec<u8>> {
    #[inline(always)]
    fn as_reset(&mut self) -> Option<&mut dyn Reset> {
        Some(self)
    }

    #[inline(always)]
    fn offer_state(&mut self, state: &mut dyn Any) -> bool {
        offer::<Vec<u8>, _>(self, state)
    }
}

impl<R: Resettable + ?Sized> Resettable for Box<R> {
    #[inline(always)]
    fn as_reset(&mut self) -> Option<&mut dyn Reset> {
        (**self).as_reset()
    }

    #[inline(always)]
    fn offer_state(&mut self, state: &mut dyn Any) -> bool {
        (**self).offer_state(state)
    }
}
