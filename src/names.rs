//! Name table shared by the scanner and the circuit model.
//!
//! Every identifier in a definition file (device names, device types, port
//! labels and the reserved keywords) is interned once and referred to by a
//! dense [`NameId`] from then on.

use std::collections::HashMap;
use std::fmt;
use std::ops::Range;

/// A unique identifier for an interned name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NameId(pub usize);

impl fmt::Display for NameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Bidirectional map between name strings and [`NameId`]s.
#[derive(Debug, Default, Clone)]
pub struct Names {
    /// Mapping from name strings to ids
    ids: HashMap<String, NameId>,
    /// Reverse mapping from ids to strings
    strings: Vec<String>,
    /// Number of error codes handed out so far
    error_code_count: usize,
}

impl Names {
    /// Create an empty name table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id for `name`, adding it to the table if it is new.
    pub fn intern(&mut self, name: &str) -> NameId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = NameId(self.strings.len());
        self.strings.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        id
    }

    /// Return the id for `name` without adding it.
    pub fn query(&self, name: &str) -> Option<NameId> {
        self.ids.get(name).copied()
    }

    /// Get the string for an id.
    pub fn lookup(&self, id: NameId) -> Option<&str> {
        self.strings.get(id.0).map(String::as_str)
    }

    /// Number of interned names.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Reserve `count` error codes that no other caller will be given.
    pub fn unique_error_codes(&mut self, count: usize) -> Range<usize> {
        let start = self.error_code_count;
        self.error_code_count += count;
        start..self.error_code_count
    }
}
