use crate::cli::args::{GatherArgs, GlobalFlags, OutputFormat};
use crate::config::GatherConfig;
use crate::core::types::AggregateReport;
use crate::error::{ReqgatherError, Result};
use crate::output::writer;
use crate::pipeline::{self, GatherOutcome};
use crate::ui;
use crate::utils::machine_output;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
struct GatherSummary<'a> {
    output: PathBuf,
    written: bool,
    packages: usize,
    sources: usize,
    manifest: &'a [String],
    report: &'a AggregateReport,
}

pub fn run(global: &GlobalFlags, args: &GatherArgs) -> Result<()> {
    let config = super::resolve_config(global, args.to_overrides())?;

    ui::header("Gathering requirements");
    ui::keyval("Discovery root", &config.discovery_root.display().to_string());
    if config.remote.is_enabled() {
        ui::keyval(
            "Remote sources",
            &format!(
                "{} (timeout {}s)",
                config.remote.urls.len(),
                config.remote.timeout_secs
            ),
        );
    }

    let outcome = pipeline::gather(&config);
    print_summary(&outcome, config.report_conflicts);

    let report = &outcome.aggregation.report;
    if config.strict_conflicts && !report.conflicts.is_empty() {
        for conflict in &report.conflicts {
            ui::indent(
                &format!(
                    "{}: kept '{}' ({}), dropped '{}' ({})",
                    conflict.name,
                    conflict.kept,
                    conflict.kept_source,
                    conflict.dropped,
                    conflict.dropped_source
                ),
                1,
            );
        }
        return Err(ReqgatherError::ConflictsFound(report.conflicts.len()));
    }

    if args.stdout {
        for line in &outcome.lines {
            println!("{}", line);
        }
        return Ok(());
    }

    let written = if args.check {
        check_output(&config, &outcome)?;
        false
    } else {
        writer::write_manifest(&config.output, &outcome.lines)?;
        ui::success(&format!(
            "Gathered {} package(s) in {}",
            outcome.lines.len(),
            config.output.display()
        ));
        true
    };

    if let Some(format) = args.format {
        emit_machine(&config, &outcome, written, format)?;
    }

    Ok(())
}

fn check_output(config: &GatherConfig, outcome: &GatherOutcome) -> Result<()> {
    if writer::is_up_to_date(&config.output, &outcome.lines) {
        ui::success(&format!("{} is up to date", config.output.display()));
        Ok(())
    } else {
        Err(ReqgatherError::CheckFailed(config.output.clone()))
    }
}

fn print_summary(outcome: &GatherOutcome, conflicts_listed: bool) {
    let report = &outcome.aggregation.report;

    ui::header("Summary");
    ui::keyval("Sources read", &report.sources_processed.to_string());
    ui::keyval("Requirements parsed", &report.lines_parsed.to_string());
    ui::keyval("Duplicates dropped", &report.duplicates_dropped.to_string());
    ui::keyval("Excluded", &report.exclusions_applied.to_string());
    ui::keyval("Supplemental added", &report.supplemental_added.to_string());
    ui::keyval("Packages", &outcome.lines.len().to_string());

    if report.lines_rejected > 0 {
        ui::warning(&format!(
            "{} line(s) could not be parsed and were skipped",
            report.lines_rejected
        ));
    }
    if !report.sources_failed.is_empty() {
        ui::warning(&format!(
            "{} source(s) could not be read: {}",
            report.sources_failed.len(),
            report.sources_failed.join(", ")
        ));
    }
    if !report.conflicts.is_empty() {
        ui::info(&format!(
            "{} conflicting declaration(s) resolved by precedence{}",
            report.conflicts.len(),
            if conflicts_listed {
                ""
            } else {
                " (use --report-conflicts to list them)"
            }
        ));
    }
}

fn emit_machine(
    config: &GatherConfig,
    outcome: &GatherOutcome,
    written: bool,
    format: OutputFormat,
) -> Result<()> {
    let report = &outcome.aggregation.report;
    let warnings = report
        .sources_failed
        .iter()
        .map(|id| format!("source unreadable: {}", id))
        .collect();

    machine_output::emit_v1(
        "gather",
        GatherSummary {
            output: config.output.clone(),
            written,
            packages: outcome.lines.len(),
            sources: outcome.sources.len(),
            manifest: &outcome.lines,
            report,
        },
        warnings,
        Vec::new(),
        format.as_str(),
    )
}
