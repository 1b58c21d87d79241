use std::fmt;
use wraith_core::{
    config::ProxyMode,
    model::EntityModel,
    proxy::{Cloner, Initializer, ProxyInstance, SerializeStrategy, SkippedProperties},
};

///
/// ProxyDefinition
///
/// Immutable descriptor for one generated proxy type. Assembled once per
/// entity type by [`crate::DefinitionBuilder`] and cached by the external
/// generation layer, keyed by entity path.
///

#[derive(Clone)]
pub struct ProxyDefinition {
    pub model: &'static EntityModel,
    /// Generated proxy type name, e.g. `OrderProxy`.
    pub proxy_ident: String,
    /// Strategy the definition was assembled under.
    pub mode: ProxyMode,
    /// Ordered identifier field names.
    pub identifier_fields: &'static [&'static str],
    /// Lazy-tracked persistent properties.
    pub lazy_properties: Vec<LazyProperty>,
    /// Properties excluded from lazy tracking, in natural key order.
    pub skipped: SkippedProperties,
    pub strategy: SerializeStrategy,
    pub initializer: Initializer,
    pub cloner: Cloner,
}

impl ProxyDefinition {
    /// Instantiate a runtime proxy carrying this definition's callbacks.
    #[must_use]
    pub fn instantiate(&self) -> ProxyInstance {
        ProxyInstance::new(
            self.model,
            Some(self.initializer.clone()),
            Some(self.cloner.clone()),
        )
    }
}

impl fmt::Debug for ProxyDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyDefinition")
            .field("path", &self.model.path)
            .field("proxy_ident", &self.proxy_ident)
            .field("mode", &self.mode)
            .field("identifier_fields", &self.identifier_fields)
            .field("lazy_properties", &self.lazy_properties)
            .field("strategy", &self.strategy)
            .finish()
    }
}

///
/// LazyProperty
///
/// One lazy-tracked property: declared name plus its storage form.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LazyProperty {
    pub name: &'static str,
    pub storage: String,
}
