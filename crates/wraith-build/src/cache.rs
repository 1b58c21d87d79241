use crate::{DefinitionBuilder, definition::ProxyDefinition};
use std::{collections::BTreeMap, rc::Rc};
use wraith_core::{error::ProxyError, model::EntityModel, persist::Persister};

///
/// DefinitionCache
///
/// Assemble-once store of proxy definitions keyed by entity path.
/// The external generation layer owns regeneration policy; this cache only
/// guarantees one assembly per entity type per process.
///

#[derive(Debug, Default)]
pub struct DefinitionCache {
    entries: BTreeMap<&'static str, Rc<ProxyDefinition>>,
}

impl DefinitionCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached definition, assembling it on first request.
    pub fn get_or_build(
        &mut self,
        model: &'static EntityModel,
        persister: &Rc<dyn Persister>,
    ) -> Result<Rc<ProxyDefinition>, ProxyError> {
        if let Some(definition) = self.entries.get(model.path) {
            return Ok(definition.clone());
        }

        let definition = Rc::new(DefinitionBuilder::new(model, persister.clone()).build()?);
        self.entries.insert(model.path, definition.clone());

        Ok(definition)
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
