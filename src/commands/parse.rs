use crate::cli::args::OutputFormat;
use crate::core::specifier::{self, LineOutcome};
use crate::error::{ReqgatherError, Result};
use crate::utils::machine_output;
use colored::Colorize;
use serde::Serialize;

#[derive(Debug, Serialize, PartialEq, Eq)]
struct ParsedLine {
    input: String,
    outcome: &'static str,
    name: Option<String>,
    kind: Option<String>,
    raw_specifier: Option<String>,
    reason: Option<String>,
}

impl ParsedLine {
    fn from_outcome(input: &str, outcome: LineOutcome) -> Self {
        let mut parsed = ParsedLine {
            input: input.to_string(),
            outcome: "skipped",
            name: None,
            kind: None,
            raw_specifier: None,
            reason: None,
        };

        match outcome {
            LineOutcome::Entry(entry) => {
                parsed.outcome = "entry";
                parsed.name = Some(entry.name);
                parsed.kind = Some(entry.source_kind.to_string());
                parsed.raw_specifier = Some(entry.raw_specifier);
            }
            LineOutcome::Skipped => {}
            LineOutcome::Rejected(reason) => {
                parsed.outcome = "rejected";
                parsed.reason = Some(reason.to_string());
            }
        }

        parsed
    }
}

/// Show the parse result for each line. Fails if any line was rejected.
pub fn run(lines: &[String], format: Option<OutputFormat>) -> Result<()> {
    let parsed: Vec<ParsedLine> = lines
        .iter()
        .map(|line| ParsedLine::from_outcome(line, specifier::parse_line(line)))
        .collect();
    let rejected = parsed.iter().filter(|p| p.outcome == "rejected").count();

    if let Some(format) = format {
        let errors = parsed
            .iter()
            .filter_map(|p| p.reason.as_ref().map(|r| format!("{}: {}", p.input, r)))
            .collect();
        return machine_output::emit_v1("parse", &parsed, Vec::new(), errors, format.as_str());
    }

    for p in &parsed {
        match p.outcome {
            "entry" => println!(
                "{}  {}  {}",
                p.name.as_deref().unwrap_or_default().bold(),
                p.kind.as_deref().unwrap_or_default().cyan(),
                p.raw_specifier.as_deref().unwrap_or_default()
            ),
            "rejected" => println!(
                "{}  {}  {}",
                "rejected".red(),
                p.input.trim(),
                p.reason.as_deref().unwrap_or_default().dimmed()
            ),
            _ => println!("{}  {}", "skipped".dimmed(), p.input.trim()),
        }
    }

    if rejected > 0 {
        return Err(ReqgatherError::Other(format!(
            "{} line(s) rejected",
            rejected
        )));
    }
    Ok(())
}
