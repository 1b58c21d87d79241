use crate::{
    error::ProxyError,
    identity::IdentifierValues,
    instance::{Instance, Payload},
    key::StorageKey,
    model::EntityModel,
    obs::{self, ProxyEvent},
    proxy::{
        serialize,
        skip::{SkippedProperties, skipped_properties},
        state::{Cloner, InitTrigger, Initializer, ProxyCell, ProxyState},
    },
    value::Value,
};
use std::{collections::BTreeMap, fmt};

///
/// ProxyInstance
///
/// Runtime stand-in for one entity. Reads of lazy-tracked properties route
/// through the initializer on first touch; identifier and other skipped
/// properties answer eagerly. Writes while uninitialized land in real
/// storage and take precedence over lazily-supplied defaults.
///

pub struct ProxyInstance {
    cell: ProxyCell,
    instance: Instance,
    /// Values supplied at proxy creation; folded into real storage by the
    /// wrapper initializer without overwriting touched values.
    lazy_defaults: BTreeMap<StorageKey, Value>,
    skipped: SkippedProperties,
}

impl ProxyInstance {
    #[must_use]
    pub fn new(
        model: &'static EntityModel,
        initializer: Option<Initializer>,
        cloner: Option<Cloner>,
    ) -> Self {
        Self {
            cell: ProxyCell::new(initializer, cloner),
            instance: Instance::new(model),
            lazy_defaults: BTreeMap::new(),
            skipped: skipped_properties(model),
        }
    }

    #[must_use]
    pub const fn model(&self) -> &'static EntityModel {
        self.instance.model()
    }

    #[must_use]
    pub const fn state(&self) -> ProxyState {
        self.cell.state()
    }

    #[must_use]
    pub const fn cell(&self) -> &ProxyCell {
        &self.cell
    }

    pub(crate) const fn cell_mut(&mut self) -> &mut ProxyCell {
        &mut self.cell
    }

    #[must_use]
    pub const fn instance(&self) -> &Instance {
        &self.instance
    }

    pub(crate) const fn instance_mut(&mut self) -> &mut Instance {
        &mut self.instance
    }

    #[must_use]
    pub const fn skipped(&self) -> &SkippedProperties {
        &self.skipped
    }

    /// Seed identifier values into real storage.
    /// Identifier slots are skipped properties; they never trigger a load.
    pub fn set_identifier(&mut self, id: &IdentifierValues) -> Result<(), ProxyError> {
        for (name, value) in id.iter() {
            self.instance.set_named(name, value.clone())?;
        }

        Ok(())
    }

    /// Supply a lazily-provided default for one property.
    pub fn set_lazy_default(&mut self, key: StorageKey, value: Value) {
        self.lazy_defaults.insert(key, value);
    }

    pub(crate) fn take_lazy_defaults(&mut self) -> BTreeMap<StorageKey, Value> {
        std::mem::take(&mut self.lazy_defaults)
    }

    /// Read a property, triggering initialization on the first touch of a
    /// lazy-tracked one.
    pub fn get(&mut self, key: &StorageKey) -> Result<Option<&Value>, ProxyError> {
        if !self.cell.state().is_initialized() && !self.skipped.contains(key) {
            self.initialize()?;
        }

        Ok(self.instance.get(key))
    }

    /// Read a declared property by bare name, triggering initialization the
    /// same way [`Self::get`] does.
    pub fn get_named(&mut self, name: &str) -> Result<Option<&Value>, ProxyError> {
        match self.instance.key_for(name) {
            Some(key) => self.get(&key),
            None => Ok(None),
        }
    }

    /// Read without triggering initialization.
    #[must_use]
    pub fn peek(&self, key: &StorageKey) -> Option<&Value> {
        self.instance.get(key)
    }

    /// Write directly into real storage. A value touched between proxy
    /// creation and initialization takes precedence over loaded defaults.
    pub fn set(&mut self, key: StorageKey, value: Value) {
        self.instance.set(key, value);
    }

    /// Write a declared property by bare name.
    pub fn set_named(&mut self, name: &str, value: Value) -> Result<(), ProxyError> {
        self.instance.set_named(name, value)
    }

    /// Transition to initialized state, loading on first call.
    /// Re-entry within the same call stack is a safe no-op.
    pub fn initialize(&mut self) -> Result<(), ProxyError> {
        self.initialize_with(InitTrigger::Access)
    }

    pub(crate) fn initialize_with(&mut self, trigger: InitTrigger) -> Result<(), ProxyError> {
        match self.cell.state() {
            ProxyState::Initialized | ProxyState::Initializing => Ok(()),
            ProxyState::Uninitialized => {
                let path = self.instance.model().path;

                let Some(init) = self.cell.initializer_handle() else {
                    return Err(ProxyError::initializer_invariant(format!(
                        "proxy for '{path}' has no initializer"
                    )));
                };

                obs::record(&ProxyEvent::InitStart { path });
                self.cell.set_state(ProxyState::Initializing);

                let result = init(self, trigger);

                match &result {
                    Ok(()) => {
                        if !self.cell.state().is_initialized() {
                            self.cell.mark_initialized();
                        }
                        obs::record(&ProxyEvent::InitFinish { path });
                    }
                    Err(_) => {
                        if self.cell.state() == ProxyState::Initializing {
                            self.cell.set_state(ProxyState::Uninitialized);
                        }
                        obs::record(&ProxyEvent::InitFailed { path });
                    }
                }

                result
            }
        }
    }

    /// Duplicate this proxy and finalize the clone's independent state.
    ///
    /// A clone of an initialized proxy needs no finalization. Otherwise the
    /// stored cloner runs on the clone; ghost-mode proxies (whose cloner is
    /// a no-op) finalize inline through their initializer instead, with the
    /// clone trigger passed explicitly.
    pub fn clone_proxy(&self) -> Result<Self, ProxyError> {
        let mut clone = Self {
            cell: self.cell.clone(),
            instance: self.instance.clone(),
            lazy_defaults: self.lazy_defaults.clone(),
            skipped: self.skipped.clone(),
        };

        if clone.cell.state().is_initialized() {
            return Ok(clone);
        }

        if let Some(cloner) = clone.cell.cloner_handle() {
            cloner(&mut clone)?;
        }
        if !clone.cell.state().is_initialized() {
            clone.initialize_with(InitTrigger::Clone)?;
        }

        obs::record(&ProxyEvent::CloneFinalized {
            path: clone.instance.model().path,
        });

        Ok(clone)
    }

    /// Build the serialized payload under the model's resolved strategy.
    /// Internal lazy state never appears in the output.
    #[must_use]
    pub fn serialize_payload(&self) -> Payload {
        serialize::build_payload(self.instance.model(), &self.instance)
    }

    /// Reconstruct an initialized proxy from a payload.
    /// The result carries no callbacks; there is nothing left to defer.
    #[must_use]
    pub fn from_payload(model: &'static EntityModel, payload: &Payload) -> Self {
        let mut cell = ProxyCell::new(None, None);
        cell.mark_initialized();

        Self {
            cell,
            instance: Instance::from_payload(model, payload),
            lazy_defaults: BTreeMap::new(),
            skipped: skipped_properties(model),
        }
    }
}

impl fmt::Debug for ProxyInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyInstance")
            .field("path", &self.instance.model().path)
            .field("cell", &self.cell)
            .field("properties", &self.instance.len())
            .finish()
    }
}
