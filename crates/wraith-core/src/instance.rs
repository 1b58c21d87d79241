use crate::{
    CLONING_FLAG_PROPERTY, LAZY_STATE_PROPERTY,
    error::ProxyError,
    identity::IdentifierValues,
    key::StorageKey,
    model::EntityModel,
    value::Value,
};
use derive_more::{Deref, DerefMut};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

///
/// Instance
///
/// Dynamic property bag for one entity instance. Generated proxies and the
/// initializer/cloner closures move values through this surface; the typed
/// representation stays with the host runtime.
///

#[derive(Clone)]
pub struct Instance {
    model: &'static EntityModel,
    values: BTreeMap<StorageKey, Value>,
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("path", &self.model.path)
            .field("values", &self.values)
            .finish()
    }
}

impl Instance {
    #[must_use]
    pub fn new(model: &'static EntityModel) -> Self {
        Self {
            model,
            values: BTreeMap::new(),
        }
    }

    #[must_use]
    pub const fn model(&self) -> &'static EntityModel {
        self.model
    }

    #[must_use]
    pub fn get(&self, key: &StorageKey) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn set(&mut self, key: StorageKey, value: Value) {
        self.values.insert(key, value);
    }

    /// Insert only when the slot is still empty; a value already set wins.
    pub(crate) fn set_if_absent(&mut self, key: StorageKey, value: Value) {
        self.values.entry(key).or_insert(value);
    }

    /// Resolve a bare property name through the model's declared scope.
    #[must_use]
    pub fn key_for(&self, name: &str) -> Option<StorageKey> {
        self.model.property(name).map(StorageKey::for_property)
    }

    #[must_use]
    pub fn get_named(&self, name: &str) -> Option<&Value> {
        let key = self.key_for(name)?;
        self.values.get(&key)
    }

    /// Set a declared property by bare name.
    pub fn set_named(&mut self, name: &str, value: Value) -> Result<(), ProxyError> {
        let key = self.key_for(name).ok_or_else(|| {
            ProxyError::instance_unsupported(format!(
                "unknown property '{name}' on '{}'",
                self.model.path
            ))
        })?;
        self.values.insert(key, value);

        Ok(())
    }

    pub fn keys(&self) -> impl Iterator<Item = &StorageKey> {
        self.values.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Identifier values in model identifier order.
    /// Fields not yet present report as `Null`.
    #[must_use]
    pub fn identifier_values(&self) -> IdentifierValues {
        let mut id = IdentifierValues::new();

        for field in self.model.identifier {
            let value = self
                .get_named(field)
                .cloned()
                .unwrap_or(Value::Null);
            id.push(*field, value);
        }

        id
    }

    /// Render the bag as a payload keyed by mangled storage form.
    /// The lazy-state and cloning-flag slots never appear in the output.
    #[must_use]
    pub fn to_payload(&self) -> Payload {
        let mut payload = Payload::new();

        for (key, value) in &self.values {
            if is_reserved(key.name()) {
                continue;
            }
            payload.insert(key.mangled(), value.clone());
        }

        payload
    }

    /// Rebuild an instance from a payload; reserved slots are ignored.
    #[must_use]
    pub fn from_payload(model: &'static EntityModel, payload: &Payload) -> Self {
        let mut instance = Self::new(model);

        for (raw, value) in payload.iter() {
            let key = StorageKey::from_mangled(raw);
            if is_reserved(key.name()) {
                continue;
            }
            instance.values.insert(key, value.clone());
        }

        instance
    }
}

/// Whether a property name is internal proxy state.
pub(crate) fn is_reserved(name: &str) -> bool {
    name == LAZY_STATE_PROPERTY || name == CLONING_FLAG_PROPERTY
}

///
/// Payload
///
/// Serialized property payload keyed by mangled storage form.
/// BTreeMap keeps payload output deterministic.
///

#[derive(Clone, Debug, Default, Deref, DerefMut, Deserialize, PartialEq, Serialize)]
pub struct Payload(BTreeMap<String, Value>);

impl Payload {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }
}
