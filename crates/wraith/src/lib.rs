//! ## Crate layout
//! - `build`: proxy definition assembly, rendering, fingerprints, and the
//!   per-entity definition cache.
//! - `core`: proxy lifecycle runtime, metadata surface, serialization
//!   strategies, and observability.
//!
//! The `prelude` module mirrors the runtime surface used by code that
//! creates and consumes proxies.

pub use wraith_build as build;
pub use wraith_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::build::{
        DefinitionBuilder, DefinitionCache, DefinitionFingerprint, ProxyDefinition,
    };
    pub use crate::core::{
        config::{ProxyConfig, ProxyMode},
        error::ProxyError,
        identity::IdentifierValues,
        instance::{Instance, Payload},
        key::StorageKey,
        model::{EntityClass, EntityModel, HookModel, PropertyKind, PropertyModel, PropertyScope},
        persist::{LoadOutcome, LoadTarget, Persister},
        proxy::{InitTrigger, ProxyInstance, ProxyState},
        value::Value,
    };
}
