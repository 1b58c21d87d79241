use crate::{
    instance::{Instance, Payload, is_reserved},
    key::StorageKey,
    model::{EntityModel, PropertyScope},
    obs::{self, ProxyEvent},
    value::Value,
};

///
/// SerializeStrategy
///
/// How a generated proxy serializes. Resolved once per entity type at
/// definition build time; generated code dispatches on the fixed choice
/// rather than re-querying capabilities per call.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SerializeStrategy {
    /// The wrapped type's own serialize hook replaces the payload wholesale.
    Custom,
    /// The legacy properties-to-keep list drives the payload.
    SleepList,
    /// All remaining instance state, as-is.
    Default,
}

/// Resolve the serialization strategy for one entity type.
#[must_use]
pub fn resolve_strategy(model: &EntityModel) -> SerializeStrategy {
    if model.hooks.serialize.is_some() {
        SerializeStrategy::Custom
    } else if model.hooks.sleep_properties.is_some() {
        SerializeStrategy::SleepList
    } else {
        SerializeStrategy::Default
    }
}

/// Build the payload under the model's resolved strategy.
///
/// The lazy-state and cloning-flag slots never appear in the output,
/// whichever strategy produced it.
#[must_use]
pub fn build_payload(model: &EntityModel, instance: &Instance) -> Payload {
    let payload = strip_internal(match resolve_strategy(model) {
        SerializeStrategy::Custom => custom_hook_payload(model, instance),
        SerializeStrategy::SleepList => sleep_list_payload(model, instance),
        SerializeStrategy::Default => default_payload(instance),
    });

    obs::record(&ProxyEvent::PayloadBuilt {
        path: model.path,
        properties: u64::try_from(payload.len()).unwrap_or(u64::MAX),
    });

    payload
}

/// Remove internal proxy state from a payload, whatever produced it.
#[must_use]
pub fn strip_internal(mut payload: Payload) -> Payload {
    payload.retain(|raw, _| !is_reserved(StorageKey::from_mangled(raw).name()));
    payload
}

/// Delegate wholly to the wrapped type's serialize hook.
/// Falls back to the default payload when the hook is absent.
#[must_use]
pub fn custom_hook_payload(model: &EntityModel, instance: &Instance) -> Payload {
    match model.hooks.serialize {
        Some(hook) => hook(instance),
        None => default_payload(instance),
    }
}

/// Build the payload from the legacy properties-to-keep list.
///
/// Each declared name resolves unprefixed first, then protected, then
/// private per declaring type. A name that resolves to nothing is reported
/// as a recoverable warning and omitted, never a hard failure.
#[must_use]
pub fn sleep_list_payload(model: &EntityModel, instance: &Instance) -> Payload {
    let mut payload = Payload::new();

    let Some(names) = model.hooks.sleep_properties else {
        return default_payload(instance);
    };

    for name in names {
        match resolve_sleep_key(model, instance, name) {
            Some((key, value)) => {
                payload.insert(key.mangled(), value.clone());
            }
            None => {
                obs::record(&ProxyEvent::SleepPropertyMissing {
                    path: model.path,
                    property: (*name).to_string(),
                });
            }
        }
    }

    payload
}

/// All remaining instance state, keyed by storage form.
#[must_use]
pub fn default_payload(instance: &Instance) -> Payload {
    instance.to_payload()
}

/// Resolve a sleep-list name against storage: unprefixed, then protected,
/// then private per declaring type.
fn resolve_sleep_key<'a>(
    model: &EntityModel,
    instance: &'a Instance,
    name: &str,
) -> Option<(StorageKey, &'a Value)> {
    let public = StorageKey::public(name);
    if let Some(value) = instance.get(&public) {
        return Some((public, value));
    }

    let protected = StorageKey::protected(name);
    if let Some(value) = instance.get(&protected) {
        return Some((protected, value));
    }

    for prop in model.properties {
        if prop.name != name {
            continue;
        }
        if let PropertyScope::PrivateTo(declared_by) = prop.scope {
            let key = StorageKey::private(declared_by, name);
            if let Some(value) = instance.get(&key) {
                return Some((key, value));
            }
        }
    }

    None
}
