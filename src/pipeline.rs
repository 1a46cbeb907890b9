//! End-to-end aggregation run, without any output side effects.

use crate::config::types::GatherConfig;
use crate::core::aggregator::{self, AggregateOptions};
use crate::core::exclusion;
use crate::core::types::{Aggregation, ExclusionSet};
use crate::output::writer;
use crate::sources::{self, SourceDescriptor};
use crate::ui;

#[derive(Debug, Clone)]
pub struct GatherOutcome {
    pub sources: Vec<SourceDescriptor>,
    pub exclusions: ExclusionSet,
    pub aggregation: Aggregation,
    /// Rendered manifest, ascending by package name
    pub lines: Vec<String>,
}

/// Discover, resolve exclusions, merge and render.
///
/// Exclusions are resolved before any source is read; per-source and
/// per-line failures are absorbed and show up in the report.
pub fn gather(config: &GatherConfig) -> GatherOutcome {
    let sources = sources::discover(config);
    let descriptors = sources::describe(&sources);

    ui::info(&format!("Found {} manifest source(s)", descriptors.len()));
    for descriptor in &descriptors {
        ui::indent(&format!("- {}", descriptor.id), 1);
    }

    let exclusions = exclusion::resolve_all(&config.exclusion_sources());
    if !exclusions.is_empty() {
        ui::verbose(&format!(
            "Excluding {} name(s): {}",
            exclusions.len(),
            exclusions.iter().collect::<Vec<_>>().join(", ")
        ));
    }

    let aggregation = aggregator::aggregate_with(
        &sources,
        &exclusions,
        &config.supplemental,
        &config.hard_drop,
        AggregateOptions {
            report_conflicts: config.report_conflicts,
        },
    );
    let lines = writer::render(&aggregation.map);

    GatherOutcome {
        sources: descriptors,
        exclusions,
        aggregation,
        lines,
    }
}
