//! Definition registry: name -> rendered definition text.
//!
//! Doubles as the memo table for one generation pass. Entries keep their
//! first-insertion order so output is deterministic, and are never replaced.
use indexmap::{IndexMap, IndexSet};

use crate::error::{GenerateError, Result};

#[derive(Debug, Clone, Default)]
pub struct Registry {
    definitions: IndexMap<String, String>,
    /// Names whose definition is being built further up the call stack.
    pending: IndexSet<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.definitions.get(name).map(String::as_str)
    }

    /// Fails if `name` already has a definition.
    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) -> Result<()> {
        let name = name.into();
        if self.definitions.contains_key(&name) {
            return Err(GenerateError::DuplicateDefinition { name });
        }
        self.pending.shift_remove(&name);
        self.definitions.insert(name, text.into());
        Ok(())
    }

    /// Mark `name` as being defined, so re-entrant lookups stop at it.
    pub(crate) fn begin(&mut self, name: &str) {
        self.pending.insert(name.to_owned());
    }

    /// Defined, or currently being defined.
    pub(crate) fn is_known(&self, name: &str) -> bool {
        self.has(name) || self.pending.contains(name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.definitions.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_definitions(self) -> IndexMap<String, String> {
        self.definitions
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_insert_is_rejected() {
        let mut registry = Registry::new();
        registry.insert("SomeEnum", "export type SomeEnum = \"A\";").unwrap();
        let err = registry.insert("SomeEnum", "other").unwrap_err();
        assert!(matches!(err, GenerateError::DuplicateDefinition { name } if name == "SomeEnum"));
        assert_eq!(registry.get("SomeEnum"), Some("export type SomeEnum = \"A\";"));
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut registry = Registry::new();
        for name in ["Zeta", "Alpha", "Mid"] {
            registry.insert(name, format!("// {name}")).unwrap();
        }
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn pending_names_are_known_but_not_defined() {
        let mut registry = Registry::new();
        registry.begin("Node");
        assert!(registry.is_known("Node"));
        assert!(!registry.has("Node"));
        registry.insert("Node", "export type Node = {\n\n};").unwrap();
        assert!(registry.has("Node"));
        assert_eq!(registry.len(), 1);
    }
}
