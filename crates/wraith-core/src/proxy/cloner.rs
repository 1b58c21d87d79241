use crate::{
    error::ProxyError,
    identity::flatten_identifier,
    instance::Instance,
    key::StorageKey,
    model::EntityModel,
    obs::{self, ProxyEvent},
    persist::{LoadOutcome, LoadTarget, Persister},
    proxy::state::Cloner,
};
use std::rc::Rc;

/// Build the wrapper-proxy cloner for one entity type.
///
/// Finalizes a shallow clone: marks it initialized, clears the stored
/// callbacks so the clone never re-triggers a lazy load, loads a separate
/// instance by identifier, and copies persistent property values onto the
/// clone so it shares no loaded state with the original. An absent row
/// surfaces as `EntityNotFound` with no rollback.
#[must_use]
pub fn wrapper_cloner(model: &'static EntityModel, persister: Rc<dyn Persister>) -> Cloner {
    Rc::new(move |proxy| {
        if proxy.cell().state().is_initialized() {
            return Ok(());
        }

        proxy.cell_mut().mark_initialized();

        let id = proxy.instance().identifier_values();
        obs::record(&ProxyEvent::LoadIssued { path: model.path });

        match persister.load_by_id(&id, LoadTarget::Fresh)? {
            LoadOutcome::Loaded(fresh) => {
                copy_persistent_properties(model, &fresh, proxy.instance_mut());
                Ok(())
            }
            LoadOutcome::Absent => Err(ProxyError::entity_not_found(
                model.path,
                flatten_identifier(model, &id),
            )),
            LoadOutcome::Hydrated => Err(ProxyError::cloner_invariant(
                "persister reported hydration for a fresh-target load",
            )),
        }
    })
}

/// Cloner for ghost proxies. Clone finalization happens inline in the
/// initializer, so this is a no-op.
#[must_use]
pub fn ghost_cloner() -> Cloner {
    Rc::new(|_proxy| Ok(()))
}

/// Copy every persistent field and association value from `from` onto
/// `onto`, keyed by declaring scope. Transient properties stay untouched.
pub(crate) fn copy_persistent_properties(
    model: &EntityModel,
    from: &Instance,
    onto: &mut Instance,
) {
    for prop in model.properties {
        if !prop.kind.is_persistent() {
            continue;
        }

        let key = StorageKey::for_property(prop);
        if let Some(value) = from.get(&key) {
            onto.set(key, value.clone());
        }
    }
}
