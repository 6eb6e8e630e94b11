use std::any::Any;

/// A value that can return to a canonical empty state without arguments.
pub trait Reset {
    /// Clears the value so it can be handed out again.
    fn reset(&mut self);
}

/// A value whose state is (re)initialized from an argument of type `S`.
///
/// Stateful pools call this with the caller's state on acquisition and with
/// `S::default()` on release.
pub trait ResetWith<S> {
    /// Replaces the internal state of the value with `state`.
    fn reset_with(&mut self, state: S);
}

/// A trait describing which reset capabilities a pooled type exposes.
///
/// Capability detection queries this trait at the call site instead of
/// relying on the concrete type implementing [`Reset`] or [`ResetWith`]. A
/// type that exposes nothing still works with every pool: resets become
/// no-ops and observers see `performed == false`.
///
/// ```
/// use std::any::Any;
/// use respool::{offer, Reset, ResetWith, Resettable};
///
/// struct Frame {
///     payload: Vec<u8>,
/// }
///
/// impl Reset for Frame {
///     fn reset(&mut self) {
///         self.payload.clear();
///     }
/// }
///
/// impl ResetWith<Vec<u8>> for Frame {
///     fn reset_with(&mut self, state: Vec<u8>) {
///         self.payload = state;
///     }
/// }
///
/// impl Resettable for Frame {
///     fn as_reset(&mut self) -> Option<&mut dyn Reset> {
///         Some(self)
///     }
///
///     fn offer_state(&mut self, state: &mut dyn Any) -> bool {
///         offer::<Vec<u8>, _>(self, state)
///     }
/// }
/// ```
pub trait Resettable {
    /// Returns the niladic resetter of this value, if it has one.
    ///
    /// By default, this method returns `None`.
    #[inline(always)]
    fn as_reset(&mut self) -> Option<&mut dyn Reset> {
        None
    }

    /// Offers a state to the monadic resetter of this value.
    ///
    /// `state` is a `&mut Option<S>` erased to [`Any`]. Implementations take
    /// the state out and apply it only when `S` is exactly the type their
    /// [`ResetWith`] implementation declares, and report whether they did.
    /// Use [`offer`](crate::offer) to implement this method.
    ///
    /// By default, this method declines every state.
    #[inline(always)]
    fn offer_state(&mut self, _state: &mut dyn Any) -> bool {
        false
    }
}
