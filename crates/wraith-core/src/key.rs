use crate::model::{PropertyModel, PropertyScope};
use std::{cmp::Ordering, fmt};

///
/// KeyScope
///
/// Owned scope tag for a storage key. Mirrors [`PropertyScope`] but carries
/// the declaring type by value so keys can outlive static metadata.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum KeyScope {
    Public,
    Protected,
    Private { declared_by: String },
}

///
/// StorageKey
///
/// The normalized unit of property storage. A key pairs a property name with
/// the scope it was declared under; private scopes carry the declaring type,
/// so same-named private properties in parent and child types stay distinct.
/// Ordering follows natural string order of the mangled storage form, which
/// keeps generated-code literals stable across runs.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct StorageKey {
    name: String,
    scope: KeyScope,
}

impl StorageKey {
    #[must_use]
    pub fn public(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scope: KeyScope::Public,
        }
    }

    #[must_use]
    pub fn protected(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scope: KeyScope::Protected,
        }
    }

    #[must_use]
    pub fn private(declared_by: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scope: KeyScope::Private {
                declared_by: declared_by.into(),
            },
        }
    }

    /// Key for a declared property, scoped by its *declaring* type.
    #[must_use]
    pub fn for_property(prop: &PropertyModel) -> Self {
        match prop.scope {
            PropertyScope::Public => Self::public(prop.name),
            PropertyScope::Protected => Self::protected(prop.name),
            PropertyScope::PrivateTo(declared_by) => Self::private(declared_by, prop.name),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn scope(&self) -> &KeyScope {
        &self.scope
    }

    /// Render the visibility-qualified storage form: `name` for public,
    /// `\0*\0name` for protected, `\0Declaring\0name` for private.
    #[must_use]
    pub fn mangled(&self) -> String {
        match &self.scope {
            KeyScope::Public => self.name.clone(),
            KeyScope::Protected => format!("\0*\0{}", self.name),
            KeyScope::Private { declared_by } => format!("\0{declared_by}\0{}", self.name),
        }
    }

    /// Parse a mangled storage form back into a key.
    /// Unprefixed input is treated as a public key.
    #[must_use]
    pub fn from_mangled(raw: &str) -> Self {
        let Some(rest) = raw.strip_prefix('\0') else {
            return Self::public(raw);
        };

        match rest.split_once('\0') {
            Some(("*", name)) => Self::protected(name),
            Some((declared_by, name)) => Self::private(declared_by, name),
            None => Self::public(raw),
        }
    }
}

impl Ord for StorageKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.mangled().cmp(&other.mangled())
    }
}

impl PartialOrd for StorageKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.mangled().replace('\0', "\\0"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn mangled_forms_follow_scope() {
        assert_eq!(StorageKey::public("id").mangled(), "id");
        assert_eq!(StorageKey::protected("note").mangled(), "\0*\0note");
        assert_eq!(
            StorageKey::private("Order", "total").mangled(),
            "\0Order\0total"
        );
    }

    #[test]
    fn from_mangled_inverts_mangled() {
        for key in [
            StorageKey::public("id"),
            StorageKey::protected("note"),
            StorageKey::private("Document", "note"),
        ] {
            assert_eq!(StorageKey::from_mangled(&key.mangled()), key);
        }
    }

    #[test]
    fn same_name_different_declaring_types_stay_distinct() {
        let parent = StorageKey::private("Document", "note");
        let child = StorageKey::private("Order", "note");

        assert_ne!(parent, child);
        assert_ne!(parent.mangled(), child.mangled());
    }

    #[test]
    fn ordering_is_natural_string_order_of_storage_form() {
        let mut keys = vec![
            StorageKey::public("id"),
            StorageKey::private("Order", "total"),
            StorageKey::protected("note"),
            StorageKey::public("amount"),
        ];
        keys.sort();

        let mangled: Vec<String> = keys.iter().map(StorageKey::mangled).collect();
        let mut expected = mangled.clone();
        expected.sort();

        assert_eq!(mangled, expected);
    }

    #[test]
    fn display_escapes_null_bytes() {
        assert_eq!(
            StorageKey::private("Order", "total").to_string(),
            "\\0Order\\0total"
        );
    }

    proptest! {
        #[test]
        fn mangled_round_trip_holds_for_identifier_names(
            name in "[A-Za-z_][A-Za-z0-9_]{0,24}",
            declared_by in "[A-Za-z][A-Za-z0-9_]{0,24}",
        ) {
            let keys = [
                StorageKey::public(name.clone()),
                StorageKey::protected(name.clone()),
                StorageKey::private(declared_by, name),
            ];

            for key in keys {
                prop_assert_eq!(StorageKey::from_mangled(&key.mangled()), key);
            }
        }
    }
}
