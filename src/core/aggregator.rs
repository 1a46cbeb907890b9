//! Requirement aggregation
//!
//! Merges sources in discovery order into a write-once map keyed by
//! normalized name:
//!
//! 1. each source's lines, in file order; the first non-excluded
//!    declaration of a name wins and later ones are dropped silently
//! 2. the supplemental list, under the same exclusion and presence guards;
//!    losing to a source is expected there and never counts as a conflict
//! 3. the hard-drop list, removed last
//!
//! Failures stay local to their source or line.

use crate::core::specifier::{self, LineOutcome};
use crate::core::types::{
    AggregateMap, AggregateReport, Aggregation, Conflict, ExclusionSet, Insertion,
    RequirementEntry,
};
use crate::sources::ManifestSource;
use crate::ui;
use std::collections::HashMap;

const SUPPLEMENTAL_ID: &str = "<supplemental>";

#[derive(Debug, Clone, Copy, Default)]
pub struct AggregateOptions {
    /// Print every conflicting later declaration as a warning
    pub report_conflicts: bool,
}

/// Run the merge with default options
pub fn aggregate(
    sources: &[Box<dyn ManifestSource>],
    exclusions: &ExclusionSet,
    supplemental: &[String],
    hard_drops: &[String],
) -> Aggregation {
    aggregate_with(
        sources,
        exclusions,
        supplemental,
        hard_drops,
        AggregateOptions::default(),
    )
}

pub fn aggregate_with(
    sources: &[Box<dyn ManifestSource>],
    exclusions: &ExclusionSet,
    supplemental: &[String],
    hard_drops: &[String],
    options: AggregateOptions,
) -> Aggregation {
    let mut merger = Merger::new(exclusions, options);

    for source in sources {
        match source.read_lines() {
            Ok(lines) => {
                merger.report.sources_processed += 1;
                ui::verbose(&format!("Reading {} ({} lines)", source.id(), lines.len()));
                for (idx, line) in lines.iter().enumerate() {
                    merger.offer_line(line, source.id(), idx + 1);
                }
            }
            Err(e) => {
                ui::warning(&format!("Could not read {}: {}", source.id(), e));
                merger.report.sources_failed.push(source.id().to_string());
            }
        }
    }

    for (idx, line) in supplemental.iter().enumerate() {
        if let Some(entry) = merger.parse(line, SUPPLEMENTAL_ID, idx + 1)
            && merger.offer(entry, SUPPLEMENTAL_ID)
        {
            merger.report.supplemental_added += 1;
        }
    }

    for name in hard_drops {
        if merger.map.remove(&name.to_lowercase()).is_some() {
            ui::verbose(&format!("Dropping '{}' (provided by the runtime)", name));
            merger.report.hard_dropped.push(name.to_lowercase());
        }
    }

    Aggregation {
        map: merger.map,
        report: merger.report,
    }
}

struct Merger<'a> {
    exclusions: &'a ExclusionSet,
    options: AggregateOptions,
    map: AggregateMap,
    /// Source that supplied each kept entry, for conflict reports
    origins: HashMap<String, String>,
    report: AggregateReport,
}

impl<'a> Merger<'a> {
    fn new(exclusions: &'a ExclusionSet, options: AggregateOptions) -> Self {
        Self {
            exclusions,
            options,
            map: AggregateMap::new(),
            origins: HashMap::new(),
            report: AggregateReport::default(),
        }
    }

    fn parse(&mut self, line: &str, source_id: &str, line_no: usize) -> Option<RequirementEntry> {
        match specifier::parse_line(line) {
            LineOutcome::Entry(entry) => {
                self.report.lines_parsed += 1;
                Some(entry)
            }
            LineOutcome::Skipped => None,
            LineOutcome::Rejected(reason) => {
                self.report.lines_rejected += 1;
                ui::warning(&format!(
                    "{}:{}: could not parse requirement '{}': {}",
                    source_id,
                    line_no,
                    line.trim(),
                    reason
                ));
                None
            }
        }
    }

    fn offer_line(&mut self, line: &str, source_id: &str, line_no: usize) {
        if let Some(entry) = self.parse(line, source_id, line_no) {
            self.offer(entry, source_id);
        }
    }

    /// Returns true when the entry was inserted
    fn offer(&mut self, entry: RequirementEntry, source_id: &str) -> bool {
        if self.exclusions.contains(&entry.name) {
            self.report.exclusions_applied += 1;
            ui::verbose(&format!("Excluding '{}' from {}", entry.name, source_id));
            return false;
        }

        let name = entry.name.clone();
        let dropped = entry.raw_specifier.clone();

        match self.map.insert_first(entry) {
            Insertion::Inserted => {
                self.origins.insert(name, source_id.to_string());
                true
            }
            Insertion::AlreadyPresent(kept) => {
                self.report.duplicates_dropped += 1;
                // A discovered pin always outranks the supplemental default
                if kept.raw_specifier != dropped && source_id != SUPPLEMENTAL_ID {
                    self.record_conflict(kept, dropped, source_id);
                }
                false
            }
        }
    }

    fn record_conflict(&mut self, kept: RequirementEntry, dropped: String, source_id: &str) {
        let conflict = Conflict {
            kept_source: self.origins.get(&kept.name).cloned().unwrap_or_default(),
            name: kept.name,
            kept: kept.raw_specifier,
            dropped,
            dropped_source: source_id.to_string(),
        };

        if self.options.report_conflicts {
            ui::warning(&format!(
                "'{}' from {} ignored; keeping '{}' from {}",
                conflict.dropped, conflict.dropped_source, conflict.kept, conflict.kept_source
            ));
        }

        self.report.conflicts.push(conflict);
    }
}
