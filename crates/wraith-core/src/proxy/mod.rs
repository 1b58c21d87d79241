//! Proxy lifecycle: deferred stand-ins that load on first touch.
//!
//! Two strategies exist. Wrapper proxies store explicit initializer and
//! cloner callbacks and roll back on a failed load; ghost proxies load in
//! place through the entity trait and finalize clones inline in the
//! initializer. The active strategy is a global configuration switch
//! resolved by the definition assembler.

pub mod cloner;
pub mod initializer;
pub mod instance;
pub mod serialize;
pub mod skip;
pub mod state;

pub use cloner::{ghost_cloner, wrapper_cloner};
pub use initializer::{ghost_initializer, wrapper_initializer};
pub use instance::ProxyInstance;
pub use serialize::SerializeStrategy;
pub use skip::{SkippedProperties, skip_proxy, skipped_properties};
pub use state::{Cloner, InitTrigger, Initializer, ProxyCell, ProxyState};

/// Marker implemented by generated ghost-mode proxies.
pub trait GhostEntity {}
