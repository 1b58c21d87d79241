//! Core runtime for Wraith: entity metadata surface, the proxy lifecycle
//! state machine, initializer/cloner builders, and the serialization
//! strategies generated proxies dispatch on.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod error;
pub mod identity;
pub mod instance;
pub mod key;
pub mod model;
pub mod obs;
pub mod persist;
pub mod proxy;
pub mod serialize;
pub mod types;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// CONSTANTS
///

/// Storage name of the internal lazy-state slot on generated proxies.
///
/// Excluded unconditionally from every serialized payload; never listed in
/// the skipped-property set.
pub const LAZY_STATE_PROPERTY: &str = "__lazy_state";

/// Storage name of the cloning-in-progress flag on generated proxies.
///
/// Always present in the skipped-property set.
pub const CLONING_FLAG_PROPERTY: &str = "__is_cloning";

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sinks, serializers, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        instance::Instance,
        key::StorageKey,
        model::{EntityClass, EntityModel, PropertyKind, PropertyModel, PropertyScope},
        proxy::{InitTrigger, ProxyInstance, ProxyState},
        value::Value,
    };
}
