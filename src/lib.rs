#![doc = include_str!("../README.md")]
#![warn(missing_docs, missing_debug_implementations)]
mod capability;
mod config;
mod error;
mod guard;
mod impls;
mod local;
mod pool;
mod reset_pool;
mod resettable;
mod stateful;
mod store;

pub use capability::*;
pub use config::*;
pub use error::*;
pub use guard::*;
pub use local::*;
pub use pool::*;
pub use reset_pool::*;
pub use resettable::*;
pub use stateful::*;
pub use store::*;
