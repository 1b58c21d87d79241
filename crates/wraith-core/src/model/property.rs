///
/// PropertyModel
/// Runtime property metadata consumed by the proxy builders.
///

#[derive(Clone, Copy, Debug)]
pub struct PropertyModel {
    /// Property name as declared on the entity type.
    pub name: &'static str,
    /// Declared visibility, carried as an explicit scope tag.
    pub scope: PropertyScope,
    /// Type that declares the property (not the runtime type).
    pub declared_by: &'static str,
    /// Static (per-type) properties are never lazy-tracked.
    pub is_static: bool,
    pub kind: PropertyKind,
}

///
/// PropertyKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PropertyKind {
    /// Persistent scalar field.
    Field,
    /// Persistent association to another entity.
    Association,
    /// Declared on the type but not persisted.
    Transient,
}

impl PropertyKind {
    #[must_use]
    pub const fn is_persistent(self) -> bool {
        matches!(self, Self::Field | Self::Association)
    }
}

///
/// PropertyScope
///
/// Declared visibility of a property. Private properties are scoped to the
/// declaring type so redeclarations in subtypes stay distinct.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PropertyScope {
    Public,
    Protected,
    PrivateTo(&'static str),
}
