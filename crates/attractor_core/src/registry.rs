//! Name-keyed, insertion-ordered catalogs.
//!
//! A [`Registry`] is written during a setup phase and read afterwards. It is
//! an ordinary owned value: mutation goes through `&mut self`, so sharing a
//! registry across threads (see [`crate::catalog::global`]) requires that all
//! registration has finished first. There is no unregister operation.

use std::collections::HashMap;

use crate::error::{AttractorError, Result};

/// An entry that can live in a [`Registry`].
pub trait Registrable {
    /// Human-readable entry kind used in error messages ("System", "Solver").
    const KIND: &'static str;

    fn name(&self) -> &str;

    /// Entry-specific checks run before insertion.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Insertion-ordered name → entry table with duplicate rejection.
#[derive(Debug, Clone)]
pub struct Registry<T> {
    entries: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Registrable> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `entry` under its own name.
    ///
    /// The registry is left unchanged when validation fails or the name is
    /// already taken.
    pub fn register(&mut self, entry: T) -> Result<&T> {
        validate_name(T::KIND, entry.name())?;
        entry.validate()?;
        if self.index.contains_key(entry.name()) {
            return Err(AttractorError::DuplicateRegistration {
                kind: T::KIND,
                name: entry.name().to_string(),
            });
        }

        let slot = self.entries.len();
        tracing::debug!(kind = T::KIND, name = entry.name(), "registered");
        self.index.insert(entry.name().to_string(), slot);
        self.entries.push(entry);
        Ok(&self.entries[slot])
    }

    pub fn get(&self, name: &str) -> Result<&T> {
        match self.index.get(name) {
            Some(&slot) => {
                tracing::debug!(kind = T::KIND, name, "lookup");
                Ok(&self.entries[slot])
            }
            None => Err(not_found::<T>(name)),
        }
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut T> {
        match self.index.get(name) {
            Some(&slot) => Ok(&mut self.entries[slot]),
            None => Err(not_found::<T>(name)),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Registered names in insertion order.
    pub fn list(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn not_found<T: Registrable>(name: &str) -> AttractorError {
    AttractorError::NotFound {
        kind: T::KIND,
        name: name.to_string(),
    }
}

/// Names must be identifiers: `[A-Za-z_][A-Za-z0-9_]*`.
fn validate_name(kind: &str, name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(AttractorError::contract(format!(
            "{kind} name must be a non-empty identifier, got {name:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Entry {
        name: String,
        payload: u32,
    }

    impl Entry {
        fn new(name: &str, payload: u32) -> Self {
            Self {
                name: name.to_string(),
                payload,
            }
        }
    }

    impl Registrable for Entry {
        const KIND: &'static str = "Entry";

        fn name(&self) -> &str {
            &self.name
        }

        fn validate(&self) -> Result<()> {
            if self.payload == 0 {
                return Err(AttractorError::contract("payload must be nonzero"));
            }
            Ok(())
        }
    }

    #[test]
    fn list_preserves_insertion_order() {
        let mut registry = Registry::new();
        for name in ["zeta", "alpha", "mid"] {
            registry.register(Entry::new(name, 1)).unwrap();
        }
        assert_eq!(registry.list(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(registry.len(), 3);
        for name in registry.list() {
            assert_eq!(registry.get(name).unwrap().name, name);
        }
    }

    #[test]
    fn duplicate_leaves_original_entry() {
        let mut registry = Registry::new();
        registry.register(Entry::new("a", 1)).unwrap();
        let err = registry.register(Entry::new("a", 2)).unwrap_err();
        assert_eq!(
            err,
            AttractorError::DuplicateRegistration {
                kind: "Entry",
                name: "a".into()
            }
        );
        assert_eq!(err.to_string(), "Entry a already registered");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("a").unwrap().payload, 1);
    }

    #[test]
    fn missing_name_is_not_found() {
        let registry: Registry<Entry> = Registry::new();
        let err = registry.get("nonexistent").unwrap_err();
        assert_eq!(err.to_string(), "Entry nonexistent not found");
        assert!(registry.is_empty());
    }

    #[test]
    fn rejects_non_identifier_names() {
        let mut registry = Registry::new();
        for bad in ["", "1abc", "has space", "dash-ed"] {
            let err = registry.register(Entry::new(bad, 1)).unwrap_err();
            assert!(matches!(err, AttractorError::ContractViolation(_)), "{bad:?}");
        }
        assert!(registry.register(Entry::new("_ok_2", 1)).is_ok());
    }

    #[test]
    fn failed_validation_does_not_insert() {
        let mut registry = Registry::new();
        assert!(registry.register(Entry::new("zero", 0)).is_err());
        assert!(!registry.contains("zero"));
        assert!(registry.is_empty());
    }
}
