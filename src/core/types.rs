use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// Which of the two recognized line syntaxes produced an entry.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    Versioned,              // name[extras][comparators][; marker]
    SourceControlReference, // git+https://...#egg=name
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Versioned => write!(f, "versioned"),
            Self::SourceControlReference => write!(f, "vcs"),
        }
    }
}

/// One normalized requirement line.
///
/// `name` is the identity key and is always lowercase. Two entries with the
/// same `name` are the same logical package whatever their specifiers say.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequirementEntry {
    pub name: String,
    /// Declaration text emitted verbatim into the output manifest
    pub raw_specifier: String,
    pub source_kind: SourceKind,
}

impl RequirementEntry {
    pub fn new(name: &str, raw_specifier: &str, source_kind: SourceKind) -> Self {
        Self {
            name: name.to_lowercase(),
            raw_specifier: raw_specifier.to_string(),
            source_kind,
        }
    }
}

impl fmt::Display for RequirementEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw_specifier)
    }
}

/// Names suppressed from the final manifest.
///
/// Resolved once before merging; there is no way to mutate it afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet(BTreeSet<String>);

impl ExclusionSet {
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|name| name.as_ref().to_lowercase())
                .collect(),
        )
    }
}

/// Outcome of offering an entry to the map
#[derive(Debug, PartialEq, Eq)]
pub enum Insertion {
    Inserted,
    /// Name already held; carries the entry that keeps its place
    AlreadyPresent(RequirementEntry),
}

/// Write-once map from normalized name to the entry that won precedence.
///
/// Iteration is always in ascending name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateMap(BTreeMap<String, RequirementEntry>);

impl AggregateMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unless the name is already present. Never overwrites.
    pub fn insert_first(&mut self, entry: RequirementEntry) -> Insertion {
        if let Some(existing) = self.0.get(&entry.name) {
            return Insertion::AlreadyPresent(existing.clone());
        }
        self.0.insert(entry.name.clone(), entry);
        Insertion::Inserted
    }

    pub fn remove(&mut self, name: &str) -> Option<RequirementEntry> {
        self.0.remove(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &RequirementEntry> {
        self.0.values()
    }
}

/// A later declaration that lost to an earlier one with a different text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub name: String,
    pub kept: String,
    pub kept_source: String,
    pub dropped: String,
    pub dropped_source: String,
}

/// Counters gathered during one aggregation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregateReport {
    pub sources_processed: usize,
    pub sources_failed: Vec<String>,
    pub lines_parsed: usize,
    pub lines_rejected: usize,
    pub duplicates_dropped: usize,
    pub exclusions_applied: usize,
    pub supplemental_added: usize,
    pub hard_dropped: Vec<String>,
    pub conflicts: Vec<Conflict>,
}

#[derive(Debug, Clone)]
pub struct Aggregation {
    pub map: AggregateMap,
    pub report: AggregateReport,
}
