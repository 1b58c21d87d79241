use crate::definition::ProxyDefinition;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use wraith_core::{config::ProxyMode, error::ProxyError, proxy::SerializeStrategy};

/// Fragment generator: one named placeholder in the proxy template.
pub type FragmentFn = fn(&ProxyDefinition) -> Result<TokenStream, ProxyError>;

/// Placeholder registry. Rendering walks this table in order; adding a
/// placeholder means adding a row here, not splicing strings elsewhere.
pub const FRAGMENTS: &[(&str, FragmentFn)] = &[
    ("proxy_struct", proxy_struct),
    ("skipped_properties", skipped_properties_literal),
    ("lifecycle_impl", lifecycle_impl),
    ("serialize_impl", serialize_impl),
    ("trait_use", trait_use),
];

/// Look up a single fragment generator by placeholder name.
#[must_use]
pub fn fragment(name: &str) -> Option<FragmentFn> {
    FRAGMENTS
        .iter()
        .find(|(fragment_name, _)| *fragment_name == name)
        .map(|(_, generate)| *generate)
}

fn proxy_ident(def: &ProxyDefinition) -> proc_macro2::Ident {
    format_ident!("{}", def.proxy_ident)
}

fn target_path(def: &ProxyDefinition) -> Result<syn::Path, ProxyError> {
    syn::parse_str(def.model.path).map_err(|e| {
        ProxyError::definition_internal(format!(
            "entity path '{}' is not a valid type path: {e}",
            def.model.path
        ))
    })
}

fn proxy_struct(def: &ProxyDefinition) -> Result<TokenStream, ProxyError> {
    let ident = proxy_ident(def);
    let doc = format!("Lazy stand-in for `{}`.", def.model.path);

    Ok(quote! {
        #[doc = #doc]
        pub struct #ident {
            inner: ::wraith_core::proxy::ProxyInstance,
        }
    })
}

fn skipped_properties_literal(def: &ProxyDefinition) -> Result<TokenStream, ProxyError> {
    let ident = proxy_ident(def);
    let keys = def.skipped.mangled_keys();
    let fields = def.identifier_fields;

    Ok(quote! {
        impl #ident {
            /// Storage keys excluded from lazy-initialization tracking.
            pub const SKIPPED_PROPERTIES: &'static [&'static str] = &[ #( #keys ),* ];

            /// Ordered identifier field names.
            pub const IDENTIFIER_FIELDS: &'static [&'static str] = &[ #( #fields ),* ];
        }
    })
}

fn lifecycle_impl(def: &ProxyDefinition) -> Result<TokenStream, ProxyError> {
    let ident = proxy_ident(def);
    let target = target_path(def)?;

    Ok(quote! {
        impl #ident {
            #[must_use]
            pub fn new(
                initializer: ::wraith_core::proxy::Initializer,
                cloner: ::wraith_core::proxy::Cloner,
            ) -> Self {
                Self {
                    inner: ::wraith_core::proxy::ProxyInstance::new(
                        #target::MODEL,
                        Some(initializer),
                        Some(cloner),
                    ),
                }
            }

            /// Load now instead of on first touch.
            pub fn initialize(&mut self) -> Result<(), ::wraith_core::error::ProxyError> {
                self.inner.initialize()
            }

            #[must_use]
            pub fn is_initialized(&self) -> bool {
                self.inner.state().is_initialized()
            }

            pub fn get(
                &mut self,
                name: &str,
            ) -> Result<Option<&::wraith_core::value::Value>, ::wraith_core::error::ProxyError>
            {
                self.inner.get_named(name)
            }

            pub fn set(
                &mut self,
                name: &str,
                value: ::wraith_core::value::Value,
            ) -> Result<(), ::wraith_core::error::ProxyError> {
                self.inner.set_named(name, value)
            }

            pub fn clone_proxy(&self) -> Result<Self, ::wraith_core::error::ProxyError> {
                Ok(Self {
                    inner: self.inner.clone_proxy()?,
                })
            }
        }
    })
}

fn serialize_impl(def: &ProxyDefinition) -> Result<TokenStream, ProxyError> {
    let ident = proxy_ident(def);
    let target = target_path(def)?;

    let body = match def.strategy {
        SerializeStrategy::Custom => quote! {
            ::wraith_core::proxy::serialize::strip_internal(
                ::wraith_core::proxy::serialize::custom_hook_payload(
                    #target::MODEL,
                    self.inner.instance(),
                ),
            )
        },
        SerializeStrategy::SleepList => quote! {
            ::wraith_core::proxy::serialize::strip_internal(
                ::wraith_core::proxy::serialize::sleep_list_payload(
                    #target::MODEL,
                    self.inner.instance(),
                ),
            )
        },
        SerializeStrategy::Default => quote! {
            ::wraith_core::proxy::serialize::default_payload(self.inner.instance())
        },
    };

    Ok(quote! {
        impl #ident {
            /// Serialized payload; internal lazy state never appears.
            #[must_use]
            pub fn serialize_payload(&self) -> ::wraith_core::instance::Payload {
                #body
            }
        }
    })
}

fn trait_use(def: &ProxyDefinition) -> Result<TokenStream, ProxyError> {
    match def.mode {
        ProxyMode::Ghost => {
            let ident = proxy_ident(def);
            Ok(quote! {
                impl ::wraith_core::proxy::GhostEntity for #ident {}
            })
        }
        ProxyMode::Wrapper => Ok(TokenStream::new()),
    }
}
