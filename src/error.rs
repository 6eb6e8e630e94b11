/// Errors raised while constructing a pool from a [`Config`](crate::Config).
///
/// Every variant is a configuration mistake. Pools never fail once built:
/// `get` and `put` are infallible and capability mismatches are reported
/// through observers instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An explicit release hook was required but the config carried none.
    #[error("release hook is required but was not configured")]
    MissingReleaseHook,

    /// A custom state resetter was required but the config carried none.
    #[error("state resetter is required but was not configured")]
    MissingResetter,

    /// The free list cannot retain any object.
    #[error("free list capacity must be greater than zero")]
    ZeroCapacity,
}

/// Result alias for pool construction.
pub type Result<T> = std::result::Result<T, Error>;
