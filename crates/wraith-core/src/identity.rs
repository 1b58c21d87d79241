//! Identifier values and flattening.
//!
//! Identifiers stay eagerly present on a proxy so identity queries can be
//! answered before load; flattening renders them printable for error
//! messages only.

use crate::{model::EntityModel, value::Value};
use std::fmt;

///
/// IdentifierValues
///
/// Ordered identifier values for one entity instance. Order follows the
/// model's identifier field order; composite keys carry one entry per field.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct IdentifierValues(Vec<(String, Value)>);

impl IdentifierValues {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, field: impl Into<String>, value: Value) {
        self.0.push((field.into(), value));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, Value)> {
        self.0.iter()
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.iter().find(|(name, _)| name == field).map(|(_, v)| v)
    }
}

impl fmt::Display for IdentifierValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}

/// Flatten a (possibly composite) identifier into a printable representation.
/// Declared identifier fields missing from `id` render as `<absent>`.
#[must_use]
pub fn flatten_identifier(model: &EntityModel, id: &IdentifierValues) -> String {
    let mut out = String::new();

    for (i, field) in model.identifier.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(field);
        out.push('=');
        match id.get(field) {
            Some(value) => out.push_str(&value.to_string()),
            None => out.push_str("<absent>"),
        }
    }

    out
}
