use crate::{
    error::ProxyError,
    identity::flatten_identifier,
    model::EntityModel,
    obs::{self, ProxyEvent},
    persist::{LoadOutcome, LoadTarget, Persister},
    proxy::{
        cloner::copy_persistent_properties,
        state::{InitTrigger, Initializer, ProxyState},
    },
};
use std::rc::Rc;

/// Build the wrapper-proxy initializer for one entity type.
///
/// Runs the wrapper sequence: capture and clear the stored callbacks, fold
/// lazily-supplied defaults into real storage without overwriting touched
/// values, mark the proxy initialized, invoke the post-load hook, then load
/// by identifier into the same instance. An absent row rolls the proxy back
/// (captured callbacks restored, state reset) so a later call can attempt
/// the load again.
#[must_use]
pub fn wrapper_initializer(model: &'static EntityModel, persister: Rc<dyn Persister>) -> Initializer {
    Rc::new(move |proxy, _trigger| {
        let captured = proxy.cell_mut().capture();

        if proxy.cell().state().is_initialized() {
            return Ok(());
        }

        let defaults = proxy.take_lazy_defaults();
        for (key, value) in defaults {
            proxy.instance_mut().set_if_absent(key, value);
        }

        proxy.cell_mut().mark_initialized();

        if let Some(post_load) = model.hooks.post_load {
            post_load(proxy.instance_mut());
        }

        let id = proxy.instance().identifier_values();
        obs::record(&ProxyEvent::LoadIssued { path: model.path });

        match persister.load_by_id(&id, LoadTarget::Into(proxy.instance_mut()))? {
            LoadOutcome::Hydrated | LoadOutcome::Loaded(_) => Ok(()),
            LoadOutcome::Absent => {
                proxy.cell_mut().restore(captured);
                proxy.cell_mut().set_state(ProxyState::Uninitialized);

                Err(ProxyError::entity_not_found(
                    model.path,
                    flatten_identifier(model, &id),
                ))
            }
        }
    })
}

/// Build the trait-based (ghost) initializer for one entity type.
///
/// Loads by identifier into the proxy in place. When triggered during clone
/// finalization it loads a separate instance instead and copies persistent
/// field and association values onto the clone, so the object being cloned
/// is never half-populated mid-clone. No rollback on failure.
#[must_use]
pub fn ghost_initializer(model: &'static EntityModel, persister: Rc<dyn Persister>) -> Initializer {
    Rc::new(move |proxy, trigger| {
        let id = proxy.instance().identifier_values();
        obs::record(&ProxyEvent::LoadIssued { path: model.path });

        match trigger {
            InitTrigger::Access => {
                match persister.load_by_id(&id, LoadTarget::Into(proxy.instance_mut()))? {
                    LoadOutcome::Hydrated | LoadOutcome::Loaded(_) => {
                        proxy.cell_mut().mark_initialized();
                        Ok(())
                    }
                    LoadOutcome::Absent => Err(ProxyError::entity_not_found(
                        model.path,
                        flatten_identifier(model, &id),
                    )),
                }
            }
            InitTrigger::Clone => match persister.load_by_id(&id, LoadTarget::Fresh)? {
                LoadOutcome::Loaded(fresh) => {
                    copy_persistent_properties(model, &fresh, proxy.instance_mut());
                    proxy.cell_mut().mark_initialized();
                    Ok(())
                }
                LoadOutcome::Absent => Err(ProxyError::entity_not_found(
                    model.path,
                    flatten_identifier(model, &id),
                )),
                LoadOutcome::Hydrated => Err(ProxyError::initializer_invariant(
                    "persister reported hydration for a fresh-target load",
                )),
            },
        }
    })
}
