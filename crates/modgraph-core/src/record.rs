//! Mod records: what the collector knows about each scanned archive.

use std::collections::HashMap;
use std::path::PathBuf;

/// How strongly a mod wants a dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequirementLevel {
    /// The referrer does not work without it.
    Required,
    /// The referrer merely benefits from it.
    Optional,
}

impl RequirementLevel {
    /// Collapse two declarations of the same dependency: required wins.
    pub fn strongest(self, other: Self) -> Self {
        if self == Self::Required || other == Self::Required {
            Self::Required
        } else {
            Self::Optional
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, Self::Required)
    }
}

/// One dependency declaration, kept in descriptor order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub id: String,
    pub level: RequirementLevel,
}

impl Dependency {
    pub fn required(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            level: RequirementLevel::Required,
        }
    }

    pub fn optional(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            level: RequirementLevel::Optional,
        }
    }
}

/// A mod scanned from the target folder. Immutable once parsed; scoped to a
/// single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModRecord {
    /// Unique mod id as declared by the descriptor.
    pub id: String,
    /// Display name; the id when the descriptor has none.
    pub name: String,
    /// Dependency declarations in descriptor order.
    pub depends: Vec<Dependency>,
    /// Archive this record was read from.
    pub path: PathBuf,
}

impl ModRecord {
    /// Ids declared as required, in declaration order.
    pub fn required_ids(&self) -> impl Iterator<Item = &str> {
        self.depends
            .iter()
            .filter(|dep| dep.level.is_required())
            .map(|dep| dep.id.as_str())
    }

    /// Ids declared as optional, in declaration order.
    pub fn optional_ids(&self) -> impl Iterator<Item = &str> {
        self.depends
            .iter()
            .filter(|dep| !dep.level.is_required())
            .map(|dep| dep.id.as_str())
    }
}

/// The collector's output: records in first-seen order, deduplicated by id.
#[derive(Debug, Default)]
pub struct ModSet {
    records: Vec<ModRecord>,
    index: HashMap<String, usize>,
}

impl ModSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record. A colliding id replaces the earlier record **in
    /// place**, so the id keeps its first-seen position while the later
    /// archive's metadata wins.
    pub fn insert(&mut self, record: ModRecord) {
        match self.index.get(&record.id) {
            Some(&at) => self.records[at] = record,
            None => {
                self.index.insert(record.id.clone(), self.records.len());
                self.records.push(record);
            }
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&ModRecord> {
        self.index.get(id).map(|&at| &self.records[at])
    }

    /// Records in first-seen order.
    pub fn records(&self) -> &[ModRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
