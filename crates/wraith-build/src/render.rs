use crate::{definition::ProxyDefinition, fragments};
use proc_macro2::TokenStream;
use wraith_core::error::ProxyError;

/// Render the full proxy type definition by walking the fragment registry.
///
/// Output is deterministic for identical metadata: fragments render in
/// registry order and every collection they draw from is naturally ordered.
pub fn render_proxy(def: &ProxyDefinition) -> Result<TokenStream, ProxyError> {
    let mut tokens = TokenStream::new();

    for (_, generate) in fragments::FRAGMENTS {
        tokens.extend(generate(def)?);
    }

    Ok(tokens)
}

/// Render a single named fragment, or `None` for an unknown placeholder.
pub fn render_fragment(
    def: &ProxyDefinition,
    name: &str,
) -> Result<Option<TokenStream>, ProxyError> {
    match fragments::fragment(name) {
        Some(generate) => generate(def).map(Some),
        None => Ok(None),
    }
}
