//! Symbol table enforcing name uniqueness.
//!
//! The FSM name, states, and events share a single namespace: once a name is
//! declared under one kind it cannot be redeclared under any kind, including
//! its own. The table holds nothing but the name-to-kind mapping; declaration
//! order is tracked by the model.

use crate::error::FsmError;
use std::collections::HashMap;
use std::fmt;

/// The kind a name was declared under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameKind {
    FsmName,
    State,
    Event,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameKind::FsmName => write!(f, "the FSM name"),
            NameKind::State => write!(f, "a state"),
            NameKind::Event => write!(f, "an event"),
        }
    }
}

/// Name-to-kind mapping shared by all three namespaces.
#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: HashMap<String, NameKind>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name` under `kind`.
    ///
    /// Fails with `DuplicateName` (reporting the kind the name already holds)
    /// if the name is declared, regardless of the kind requested. The table
    /// is not mutated on failure.
    pub fn declare(&mut self, name: &str, kind: NameKind) -> Result<(), FsmError> {
        if let Some(existing) = self.entries.get(name) {
            return Err(FsmError::DuplicateName {
                name: name.to_string(),
                kind: *existing,
            });
        }
        self.entries.insert(name.to_string(), kind);
        Ok(())
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn kind_of(&self, name: &str) -> Option<NameKind> {
        self.entries.get(name).copied()
    }

    /// Drops a single entry. Used when the FSM name is replaced so the old
    /// name becomes available again.
    pub fn remove(&mut self, name: &str) {
        self.entries.remove(name);
    }

    /// Drops all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
