use crate::{error::ProxyError, identity::IdentifierValues, instance::Instance};

///
/// LoadTarget
///
/// Where a load materializes: a fresh instance, or hydration into an
/// existing one (the proxy being initialized).
///

pub enum LoadTarget<'a> {
    Fresh,
    Into(&'a mut Instance),
}

///
/// LoadOutcome
///

#[derive(Debug)]
pub enum LoadOutcome {
    /// A fresh instance was materialized (the `Fresh` target).
    Loaded(Instance),
    /// The supplied target was populated in place (the `Into` target).
    Hydrated,
    /// No row exists for the identifier.
    Absent,
}

impl LoadOutcome {
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

///
/// Persister
///
/// Load-by-identifier boundary owned by the host persistence component.
/// Read-only from this core's perspective and shared across many proxy
/// instantiations; `Rc` is the sharing currency in the single-threaded
/// host model.
///

pub trait Persister {
    fn load_by_id(
        &self,
        id: &IdentifierValues,
        target: LoadTarget<'_>,
    ) -> Result<LoadOutcome, ProxyError>;
}
