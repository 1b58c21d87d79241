use crate::{
    instance::{Instance, Payload},
    model::property::{PropertyKind, PropertyModel},
};

///
/// EntityModel
/// Minimal runtime model for one entity type.
/// Owned by the host metadata system; read-only here.
///

pub struct EntityModel {
    /// Fully-qualified Rust type path (for dispatch and diagnostics).
    pub path: &'static str,
    /// Stable external name used in keys and generated type names.
    pub entity_name: &'static str,
    /// Metadata category; only plain entities are ever proxied.
    pub class: EntityClass,
    /// Reflected abstractness of the underlying type.
    pub is_abstract: bool,
    /// Ordered identifier field names (composite keys allowed).
    pub identifier: &'static [&'static str],
    /// Every declared property, persistent or not.
    pub properties: &'static [PropertyModel],
    /// Capability hooks the wrapped type defines.
    pub hooks: HookModel,
}

impl EntityModel {
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyModel> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Whether the type declares a persistent scalar field with this name.
    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.property(name)
            .is_some_and(|p| p.kind == PropertyKind::Field)
    }

    /// Whether the type declares an association with this name.
    #[must_use]
    pub fn has_association(&self, name: &str) -> bool {
        self.property(name)
            .is_some_and(|p| p.kind == PropertyKind::Association)
    }

    #[must_use]
    pub fn is_identifier(&self, name: &str) -> bool {
        self.identifier.contains(&name)
    }

    #[must_use]
    pub const fn identifier_field_names(&self) -> &'static [&'static str] {
        self.identifier
    }
}

///
/// EntityClass
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntityClass {
    Entity,
    MappedSuperclass,
    Embeddable,
}

///
/// HookModel
///
/// Capability slots for lifecycle hooks defined by the wrapped type.
/// Resolved once at definition build time; an absent slot selects the
/// default behavior.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct HookModel {
    /// Invoked after the wrapper initializer marks the instance initialized.
    pub post_load: Option<fn(&mut Instance)>,
    /// Full custom serialization; replaces the default payload entirely.
    pub serialize: Option<fn(&Instance) -> Payload>,
    /// Legacy "properties to keep" list, consulted when `serialize` is absent.
    pub sleep_properties: Option<&'static [&'static str]>,
}

#[cfg(test)]
mod tests {
    use crate::test_fixtures::{TestEntityModel, association, field, transient};
    use crate::model::PropertyScope;

    #[test]
    fn field_and_association_queries_respect_kind() {
        let model = TestEntityModel::new("app::Order", "Order")
            .identifier(&["id"])
            .property(field("id", PropertyScope::Public, "Order"))
            .property(field("total", PropertyScope::PrivateTo("Order"), "Order"))
            .property(association("customer", PropertyScope::Protected, "Order"))
            .property(transient("draft", PropertyScope::Public, "Order"))
            .build();

        assert!(model.has_field("total"));
        assert!(!model.has_field("customer"));
        assert!(model.has_association("customer"));
        assert!(!model.has_association("draft"));
        assert!(model.is_identifier("id"));
        assert!(!model.is_identifier("total"));
    }
}
