use crate::{
    error::ProxyError,
    identity::IdentifierValues,
    instance::Instance,
    key::StorageKey,
    model::{EntityClass, EntityModel, HookModel, PropertyKind, PropertyModel, PropertyScope},
    persist::{LoadOutcome, LoadTarget, Persister},
    value::Value,
};
use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
};

///
/// TestEntityModel
///
/// Test-only builder for `EntityModel`.
/// Leaks storage to satisfy the static lifetime the runtime model requires.
///

pub(crate) struct TestEntityModel {
    path: &'static str,
    entity_name: &'static str,
    class: EntityClass,
    is_abstract: bool,
    identifier: Vec<&'static str>,
    properties: Vec<PropertyModel>,
    hooks: HookModel,
}

impl TestEntityModel {
    pub(crate) fn new(path: &'static str, entity_name: &'static str) -> Self {
        Self {
            path,
            entity_name,
            class: EntityClass::Entity,
            is_abstract: false,
            identifier: Vec::new(),
            properties: Vec::new(),
            hooks: HookModel::default(),
        }
    }

    pub(crate) const fn class(mut self, class: EntityClass) -> Self {
        self.class = class;
        self
    }

    pub(crate) const fn is_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    pub(crate) fn identifier(mut self, fields: &[&'static str]) -> Self {
        self.identifier = fields.to_vec();
        self
    }

    pub(crate) fn property(mut self, prop: PropertyModel) -> Self {
        self.properties.push(prop);
        self
    }

    pub(crate) const fn hooks(mut self, hooks: HookModel) -> Self {
        self.hooks = hooks;
        self
    }

    /// Leak the collected pieces into a static model.
    pub(crate) fn build(self) -> &'static EntityModel {
        let identifier: &'static [&'static str] = Box::leak(self.identifier.into_boxed_slice());
        let properties: &'static [PropertyModel] = Box::leak(self.properties.into_boxed_slice());

        Box::leak(Box::new(EntityModel {
            path: self.path,
            entity_name: self.entity_name,
            class: self.class,
            is_abstract: self.is_abstract,
            identifier,
            properties,
            hooks: self.hooks,
        }))
    }
}

pub(crate) fn field(
    name: &'static str,
    scope: PropertyScope,
    declared_by: &'static str,
) -> PropertyModel {
    PropertyModel {
        name,
        scope,
        declared_by,
        is_static: false,
        kind: PropertyKind::Field,
    }
}

pub(crate) fn association(
    name: &'static str,
    scope: PropertyScope,
    declared_by: &'static str,
) -> PropertyModel {
    PropertyModel {
        name,
        scope,
        declared_by,
        is_static: false,
        kind: PropertyKind::Association,
    }
}

pub(crate) fn transient(
    name: &'static str,
    scope: PropertyScope,
    declared_by: &'static str,
) -> PropertyModel {
    PropertyModel {
        name,
        scope,
        declared_by,
        is_static: false,
        kind: PropertyKind::Transient,
    }
}

///
/// FakeLoad
///

#[derive(Clone)]
pub(crate) enum FakeLoad {
    Row(Vec<(StorageKey, Value)>),
    Absent,
}

///
/// FakePersister
///
/// Scripted persister double. Scripted outcomes are consumed first, in
/// order; the fallback outcome answers every call after the script runs dry.
/// Counts calls and records whether each load carried a hydration target.
///

pub(crate) struct FakePersister {
    model: &'static EntityModel,
    calls: Cell<usize>,
    script: RefCell<VecDeque<FakeLoad>>,
    fallback: RefCell<FakeLoad>,
    targets: RefCell<Vec<bool>>,
    requests: RefCell<Vec<IdentifierValues>>,
}

impl FakePersister {
    pub(crate) fn new(model: &'static EntityModel) -> Self {
        Self {
            model,
            calls: Cell::new(0),
            script: RefCell::new(VecDeque::new()),
            fallback: RefCell::new(FakeLoad::Absent),
            targets: RefCell::new(Vec::new()),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Answer every unscripted call with this row.
    pub(crate) fn returning_row(self, row: Vec<(StorageKey, Value)>) -> Self {
        *self.fallback.borrow_mut() = FakeLoad::Row(row);
        self
    }

    /// Answer every unscripted call with an absent row.
    pub(crate) fn returning_absent(self) -> Self {
        *self.fallback.borrow_mut() = FakeLoad::Absent;
        self
    }

    /// Script the next call to find this row.
    pub(crate) fn push_row(self, row: Vec<(StorageKey, Value)>) -> Self {
        self.script.borrow_mut().push_back(FakeLoad::Row(row));
        self
    }

    /// Script the next call to find nothing.
    pub(crate) fn push_absent(self) -> Self {
        self.script.borrow_mut().push_back(FakeLoad::Absent);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Whether the most recent load carried a hydration target.
    pub(crate) fn last_target(&self) -> Option<bool> {
        self.targets.borrow().last().copied()
    }

    pub(crate) fn requests(&self) -> Vec<IdentifierValues> {
        self.requests.borrow().clone()
    }

    fn next_outcome(&self) -> FakeLoad {
        self.script
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| self.fallback.borrow().clone())
    }
}

impl Persister for FakePersister {
    fn load_by_id(
        &self,
        id: &IdentifierValues,
        target: LoadTarget<'_>,
    ) -> Result<LoadOutcome, ProxyError> {
        self.calls.set(self.calls.get() + 1);
        self.requests.borrow_mut().push(id.clone());
        self.targets
            .borrow_mut()
            .push(matches!(target, LoadTarget::Into(_)));

        match self.next_outcome() {
            FakeLoad::Absent => Ok(LoadOutcome::Absent),
            FakeLoad::Row(row) => match target {
                LoadTarget::Into(instance) => {
                    for (key, value) in row {
                        instance.set(key, value);
                    }
                    Ok(LoadOutcome::Hydrated)
                }
                LoadTarget::Fresh => {
                    let mut instance = Instance::new(self.model);
                    for (key, value) in row {
                        instance.set(key, value);
                    }
                    Ok(LoadOutcome::Loaded(instance))
                }
            },
        }
    }
}
