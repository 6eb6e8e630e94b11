use crate::{Observers, Phase, ResetEvent, ResetWith, Resettable};
use std::any::Any;

/// Applies an offered state to `target` when its type is exactly `S`.
///
/// `state` must be the `&mut Option<S>` that [`Detector::attempt_with`] hands
/// to [`Resettable::offer_state`]. A state of any other type, even one that
/// converts into `S`, is declined and left untouched.
pub fn offer<S: 'static, R: ResetWith<S> + ?Sized>(target: &mut R, state: &mut dyn Any) -> bool {
    match state.downcast_mut::<Option<S>>().and_then(Option::take) {
        Some(state) => {
            target.reset_with(state);
            true
        }
        None => false,
    }
}

/// The default reset strategy of the pools.
///
/// A detector queries the [`Resettable`] capabilities of a value, invokes the
/// matching reset if there is one, and then reports the outcome to every
/// observer registered for the phase, in registration order.
#[derive(Debug, Clone, Default)]
pub struct Detector {
    observers: Observers,
}

impl Detector {
    /// Creates a detector that reports to `observers`.
    pub fn new(observers: Observers) -> Self {
        Detector { observers }
    }

    /// Gets the observers this detector reports to.
    pub fn observers(&self) -> &Observers {
        &self.observers
    }

    /// Attempts a niladic reset of `value`.
    ///
    /// Returns whether the value exposed [`Reset`](crate::Reset) and was
    /// reset. Release observers are notified either way.
    pub fn attempt<T: Resettable + ?Sized>(&self, value: &mut T) -> bool {
        let performed = match value.as_reset() {
            Some(resetter) => {
                resetter.reset();
                true
            }
            None => false,
        };
        self.report(performed, Phase::Release);
        performed
    }

    /// Attempts a monadic reset of `value` with `state`.
    ///
    /// Returns whether the value declared `ResetWith<S>` for exactly this
    /// `S`. Observers registered for `phase` are notified either way.
    pub fn attempt_with<S: 'static, T: Resettable + ?Sized>(
        &self,
        value: &mut T,
        state: S,
        phase: Phase,
    ) -> bool {
        let mut slot = Some(state);
        let performed = value.offer_state(&mut slot);
        self.report(performed, phase);
        performed
    }

    fn report(&self, performed: bool, phase: Phase) {
        tracing::trace!(performed, ?phase, "reset attempt");
        self.observers.notify(ResetEvent { performed, phase });
    }
}
