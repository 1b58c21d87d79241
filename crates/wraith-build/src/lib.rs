//! Proxy definition assembly and code generation for Wraith.
//!
//! The assembler is invoked once per entity type by the external
//! generation/caching layer. Fragments rendered from a definition are
//! deterministic and idempotent for identical metadata; the caching layer
//! owns on-disk regeneration policy.

mod cache;
mod definition;
mod fingerprint;
mod fragments;
mod render;

pub use cache::DefinitionCache;
pub use definition::{LazyProperty, ProxyDefinition};
pub use fingerprint::{DefinitionFingerprint, fingerprint};
pub use fragments::{FRAGMENTS, FragmentFn, fragment};
pub use render::{render_fragment, render_proxy};

use convert_case::{Case, Casing};
use std::rc::Rc;
use wraith_core::{
    config::{self, ProxyMode},
    error::ProxyError,
    key::StorageKey,
    model::EntityModel,
    persist::Persister,
    proxy::{
        ghost_cloner, ghost_initializer, serialize::resolve_strategy, skip_proxy,
        skipped_properties, wrapper_cloner, wrapper_initializer,
    },
};

/// Generate the proxy type definition for one entity, as source text.
pub fn generate(
    model: &'static EntityModel,
    persister: Rc<dyn Persister>,
) -> Result<String, ProxyError> {
    let definition = DefinitionBuilder::new(model, persister).build()?;
    let tokens = render_proxy(&definition)?;

    Ok(tokens.to_string())
}

///
/// DefinitionBuilder
///

pub struct DefinitionBuilder {
    model: &'static EntityModel,
    persister: Rc<dyn Persister>,
}

impl DefinitionBuilder {
    #[must_use]
    pub fn new(model: &'static EntityModel, persister: Rc<dyn Persister>) -> Self {
        Self { model, persister }
    }

    /// Assemble the proxy definition under the active proxy mode.
    ///
    /// Pure composition: apply the skip predicate, resolve the
    /// skipped-property set and the serialize strategy, and wire the
    /// mode-appropriate initializer/cloner pair.
    pub fn build(&self) -> Result<ProxyDefinition, ProxyError> {
        let model = self.model;

        if skip_proxy(model) {
            return Err(ProxyError::definition_unsupported(format!(
                "'{}' is not a proxyable entity type",
                model.path
            )));
        }

        let mode = config::with_config(|c| c.mode);
        let (initializer, cloner) = match mode {
            ProxyMode::Wrapper => (
                wrapper_initializer(model, self.persister.clone()),
                wrapper_cloner(model, self.persister.clone()),
            ),
            ProxyMode::Ghost => (
                ghost_initializer(model, self.persister.clone()),
                ghost_cloner(),
            ),
        };

        let lazy_properties = model
            .properties
            .iter()
            .filter(|p| !p.is_static && p.kind.is_persistent() && !model.is_identifier(p.name))
            .map(|p| LazyProperty {
                name: p.name,
                storage: StorageKey::for_property(p).mangled(),
            })
            .collect();

        Ok(ProxyDefinition {
            model,
            proxy_ident: proxy_ident(model.entity_name),
            mode,
            identifier_fields: model.identifier_field_names(),
            lazy_properties,
            skipped: skipped_properties(model),
            strategy: resolve_strategy(model),
            initializer,
            cloner,
        })
    }
}

/// Proxy type name for an entity: `order_item` becomes `OrderItemProxy`.
fn proxy_ident(entity_name: &str) -> String {
    format!("{}Proxy", entity_name.to_case(Case::Pascal))
}

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{NullPersister, leak_model};
    use wraith_core::model::{EntityClass, PropertyScope};

    #[test]
    fn proxy_ident_is_pascal_cased_with_suffix() {
        assert_eq!(proxy_ident("Order"), "OrderProxy");
        assert_eq!(proxy_ident("order_item"), "OrderItemProxy");
    }

    #[test]
    fn build_rejects_unproxyable_types() {
        let persister = NullPersister::shared();

        for model in [
            leak_model("app::Document", "Document", |m| {
                m.class = EntityClass::MappedSuperclass;
            }),
            leak_model("app::Money", "Money", |m| {
                m.class = EntityClass::Embeddable;
            }),
            leak_model("app::Shape", "Shape", |m| {
                m.is_abstract = true;
            }),
        ] {
            let err = DefinitionBuilder::new(model, persister.clone())
                .build()
                .expect_err("skip predicate should gate assembly");
            assert!(!err.is_not_found());
            assert!(err.message.contains("not a proxyable"));
        }
    }

    #[test]
    fn build_wires_the_active_mode() {
        let model = leak_model("app::Order", "Order", |_| {});
        let persister = NullPersister::shared();

        let wrapper = DefinitionBuilder::new(model, persister.clone())
            .build()
            .expect("wrapper assembly should succeed");
        assert_eq!(wrapper.mode, ProxyMode::Wrapper);

        let ghost = config::with_mode(ProxyMode::Ghost, || {
            DefinitionBuilder::new(model, persister.clone())
                .build()
                .expect("ghost assembly should succeed")
        });
        assert_eq!(ghost.mode, ProxyMode::Ghost);
    }

    #[test]
    fn lazy_properties_exclude_identifier_and_transients() {
        let model = leak_model("app::Order", "Order", |_| {});
        let persister = NullPersister::shared();

        let definition = DefinitionBuilder::new(model, persister)
            .build()
            .expect("assembly should succeed");

        let names: Vec<&str> = definition
            .lazy_properties
            .iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["total", "customer"]);

        let storage: Vec<&str> = definition
            .lazy_properties
            .iter()
            .map(|p| p.storage.as_str())
            .collect();
        assert_eq!(storage, ["\0Order\0total", "\0*\0customer"]);
    }

    #[test]
    fn instantiated_proxies_carry_the_wired_callbacks() {
        let model = leak_model("app::Order", "Order", |_| {});
        let persister = NullPersister::shared();

        let definition = DefinitionBuilder::new(model, persister)
            .build()
            .expect("assembly should succeed");

        let mut proxy = definition.instantiate();
        proxy
            .set_named("id", wraith_core::value::Value::from("ord-1"))
            .expect("id should resolve");

        // NullPersister finds nothing; the wired initializer must surface
        // EntityNotFound rather than fail structurally.
        let err = proxy.initialize().expect_err("load should find nothing");
        assert!(err.is_not_found());
    }

    #[test]
    fn generated_source_is_deterministic() {
        let model = leak_model("app::Order", "Order", |_| {});
        let persister = NullPersister::shared();

        let first = generate(model, persister.clone()).expect("generation should succeed");
        let second = generate(model, persister).expect("generation should succeed");

        assert_eq!(first, second);
        assert!(first.contains("struct OrderProxy"));
        assert!(first.contains("SKIPPED_PROPERTIES"));
        assert!(first.contains("__is_cloning"));
    }

    #[test]
    fn ghost_mode_emits_the_trait_use_block() {
        let model = leak_model("app::Order", "Order", |_| {});
        let persister = NullPersister::shared();

        let wrapper_src = generate(model, persister.clone()).expect("generation should succeed");
        assert!(!wrapper_src.contains("GhostEntity"));

        let ghost_src = config::with_mode(ProxyMode::Ghost, || {
            generate(model, persister).expect("generation should succeed")
        });
        assert!(ghost_src.contains("GhostEntity"));
    }

    #[test]
    fn unknown_fragment_renders_as_none() {
        let model = leak_model("app::Order", "Order", |_| {});
        let persister = NullPersister::shared();
        let definition = DefinitionBuilder::new(model, persister)
            .build()
            .expect("assembly should succeed");

        let fragment = render_fragment(&definition, "no_such_placeholder")
            .expect("lookup should not fail");
        assert!(fragment.is_none());

        let skipped = render_fragment(&definition, "skipped_properties")
            .expect("rendering should succeed")
            .expect("placeholder should exist");
        assert!(skipped.to_string().contains("SKIPPED_PROPERTIES"));
    }

    #[test]
    fn invalid_entity_path_is_a_definition_error() {
        let model = leak_model("not a path", "Order", |_| {});
        let persister = NullPersister::shared();
        let definition = DefinitionBuilder::new(model, persister)
            .build()
            .expect("assembly should succeed");

        let err = render_proxy(&definition).expect_err("rendering should fail");
        assert!(err.message.contains("not a valid type path"));
    }

    #[test]
    fn fingerprints_are_stable_and_mode_sensitive() {
        let model = leak_model("app::Order", "Order", |_| {});
        let persister = NullPersister::shared();

        let wrapper = DefinitionBuilder::new(model, persister.clone())
            .build()
            .expect("assembly should succeed");
        let first = fingerprint(&wrapper).expect("fingerprint should succeed");
        let second = fingerprint(&wrapper).expect("fingerprint should succeed");
        assert_eq!(first, second);
        assert_eq!(first.to_hex().len(), 64);

        let ghost = config::with_mode(ProxyMode::Ghost, || {
            DefinitionBuilder::new(model, persister)
                .build()
                .expect("assembly should succeed")
        });
        let ghost_print = fingerprint(&ghost).expect("fingerprint should succeed");
        assert_ne!(first, ghost_print);
    }

    #[test]
    fn cache_assembles_once_per_entity_path() {
        let model = leak_model("app::Order", "Order", |_| {});
        let persister: Rc<dyn Persister> = NullPersister::shared();
        let mut cache = DefinitionCache::new();

        let first = cache
            .get_or_build(model, &persister)
            .expect("assembly should succeed");
        let second = cache
            .get_or_build(model, &persister)
            .expect("lookup should succeed");

        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        assert!(cache.contains("app::Order"));
    }
}
