use crate::{
    CLONING_FLAG_PROPERTY,
    key::StorageKey,
    model::{EntityClass, EntityModel},
};
use derive_more::Deref;
use std::collections::BTreeSet;

///
/// SkippedProperties
///
/// Declared properties excluded from lazy-initialization tracking, keyed by
/// storage form in natural order. Computed once per entity type and embedded
/// into generated proxies as a literal.
///

#[derive(Clone, Debug, Default, Deref, Eq, PartialEq)]
pub struct SkippedProperties(BTreeSet<StorageKey>);

impl SkippedProperties {
    /// Mangled keys in natural order, for codegen literals.
    #[must_use]
    pub fn mangled_keys(&self) -> Vec<String> {
        self.0.iter().map(StorageKey::mangled).collect()
    }
}

/// Decide whether an entity type must never be proxied.
/// Mapped superclasses, embeddable value types, and reflected-abstract types
/// are rejected.
#[must_use]
pub fn skip_proxy(model: &EntityModel) -> bool {
    model.is_abstract || model.class != EntityClass::Entity
}

/// Compute the skipped-property set for one entity type.
///
/// The cloning flag is always skipped. Static and transient properties are
/// never lazy-tracked. Persistent fields and associations are tracked unless
/// they are part of the identifier, which must stay eagerly present to
/// answer identity queries before load. Keys are scoped by the declaring
/// type, not the runtime type.
#[must_use]
pub fn skipped_properties(model: &EntityModel) -> SkippedProperties {
    let mut set = BTreeSet::new();
    set.insert(StorageKey::public(CLONING_FLAG_PROPERTY));

    for prop in model.properties {
        let skip = if prop.is_static {
            true
        } else if prop.kind.is_persistent() {
            model.is_identifier(prop.name)
        } else {
            true
        };

        if skip {
            set.insert(StorageKey::for_property(prop));
        }
    }

    SkippedProperties(set)
}
