use std::rc::Rc;
use wraith_core::{
    error::ProxyError,
    identity::IdentifierValues,
    model::{EntityClass, EntityModel, HookModel, PropertyKind, PropertyModel, PropertyScope},
    persist::{LoadOutcome, LoadTarget, Persister},
};

///
/// ModelSpec
///
/// Tweakable bits of the standard test model.
///

pub(crate) struct ModelSpec {
    pub class: EntityClass,
    pub is_abstract: bool,
}

/// Leak a standard order-shaped model: public identifier `id`, private field
/// `total`, protected association `customer`, transient `draft`.
pub(crate) fn leak_model(
    path: &'static str,
    entity_name: &'static str,
    tweak: impl FnOnce(&mut ModelSpec),
) -> &'static EntityModel {
    let mut spec = ModelSpec {
        class: EntityClass::Entity,
        is_abstract: false,
    };
    tweak(&mut spec);

    let properties: &'static [PropertyModel] = Box::leak(Box::new([
        PropertyModel {
            name: "id",
            scope: PropertyScope::Public,
            declared_by: "Order",
            is_static: false,
            kind: PropertyKind::Field,
        },
        PropertyModel {
            name: "total",
            scope: PropertyScope::PrivateTo("Order"),
            declared_by: "Order",
            is_static: false,
            kind: PropertyKind::Field,
        },
        PropertyModel {
            name: "customer",
            scope: PropertyScope::Protected,
            declared_by: "Order",
            is_static: false,
            kind: PropertyKind::Association,
        },
        PropertyModel {
            name: "draft",
            scope: PropertyScope::Public,
            declared_by: "Order",
            is_static: false,
            kind: PropertyKind::Transient,
        },
    ]));

    Box::leak(Box::new(EntityModel {
        path,
        entity_name,
        class: spec.class,
        is_abstract: spec.is_abstract,
        identifier: &["id"],
        properties,
        hooks: HookModel::default(),
    }))
}

///
/// NullPersister
///
/// Persister double that finds nothing, for assembly and rendering tests.
///

pub(crate) struct NullPersister;

impl NullPersister {
    pub(crate) fn shared() -> Rc<dyn Persister> {
        Rc::new(Self)
    }
}

impl Persister for NullPersister {
    fn load_by_id(
        &self,
        _id: &IdentifierValues,
        _target: LoadTarget<'_>,
    ) -> Result<LoadOutcome, ProxyError> {
        Ok(LoadOutcome::Absent)
    }
}
