//! Requirement line parser
//!
//! Turns one raw manifest line into a [`RequirementEntry`]. Two syntaxes are
//! recognized:
//!
//! - Versioned: `name[extras] >=1.0,<2 ; python_version >= "3.9"`
//! - Source control: `git+https://host/repo.git@v1#egg=name`
//!
//! Parsing never fails loudly. Lines that match neither syntax come back as
//! [`LineOutcome::Rejected`] and the caller decides how to report them.

use crate::core::types::{RequirementEntry, SourceKind};
use crate::utils::regex_cache::get_cached_regex;
use thiserror::Error;

/// PEP 508 project name, optionally followed by extras and the remainder
const NAME_PATTERN: &str =
    r"^(?P<name>[A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?)\s*(?:\[(?P<extras>[^\]]*)\])?\s*(?P<rest>.*)$";

/// A single `comparator version` clause
const CLAUSE_PATTERN: &str = r"^\s*(?:===|==|!=|<=|>=|~=|<|>)\s*[A-Za-z0-9.*+!_-]+\s*$";

/// VCS fetch marker, e.g. `git+https://` or `hg+ssh://`
const VCS_PATTERN: &str = r"(?:^|[\s@])(?:git|hg|svn|bzr)\+[A-Za-z]+://";

/// `#egg=` fragment; the value ends at `&` or whitespace
const EGG_PATTERN: &str = r"#egg=(?P<egg>[^&\s]*)";

const EXTRA_PATTERN: &str = r"^[A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?$";

/// Why a line could not be turned into an entry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("unsupported option line")]
    UnsupportedOption,

    #[error("source-control line without #egg= fragment")]
    MissingEggFragment,

    #[error("invalid #egg= package name '{0}'")]
    InvalidEggName(String),

    #[error("invalid extras '{0}'")]
    InvalidExtras(String),

    #[error("invalid version specifier '{0}'")]
    InvalidVersion(String),

    #[error("unrecognized requirement syntax")]
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Entry(RequirementEntry),
    /// Blank or comment line; not worth a warning
    Skipped,
    Rejected(RejectReason),
}

/// Parse a line, discarding the reason for any rejection.
pub fn parse(raw_line: &str) -> Option<RequirementEntry> {
    match parse_line(raw_line) {
        LineOutcome::Entry(entry) => Some(entry),
        _ => None,
    }
}

/// Parse a line into an entry, a silent skip, or a rejection.
pub fn parse_line(raw_line: &str) -> LineOutcome {
    let line = raw_line.trim();

    if line.is_empty() || line.starts_with('#') {
        return LineOutcome::Skipped;
    }

    if is_vcs_line(line) && line.contains("#egg=") {
        return parse_vcs(line);
    }

    // pip options carry no package identity (-r, -c, --index-url, ...)
    if line.starts_with('-') {
        if is_vcs_line(line) {
            return LineOutcome::Rejected(RejectReason::MissingEggFragment);
        }
        return LineOutcome::Rejected(RejectReason::UnsupportedOption);
    }

    match parse_versioned(strip_inline_comment(line)) {
        LineOutcome::Rejected(RejectReason::Unrecognized) if is_vcs_line(line) => {
            LineOutcome::Rejected(RejectReason::MissingEggFragment)
        }
        outcome => outcome,
    }
}

fn is_vcs_line(line: &str) -> bool {
    get_cached_regex(VCS_PATTERN)
        .map(|re| re.is_match(line))
        .unwrap_or(false)
}

fn parse_vcs(line: &str) -> LineOutcome {
    let egg = get_cached_regex(EGG_PATTERN)
        .ok()
        .and_then(|re| re.captures(line))
        .and_then(|caps| caps.name("egg").map(|m| m.as_str().to_string()));

    let Some(egg) = egg else {
        return LineOutcome::Rejected(RejectReason::MissingEggFragment);
    };

    if !is_valid_name(&egg) {
        return LineOutcome::Rejected(RejectReason::InvalidEggName(egg));
    }

    LineOutcome::Entry(RequirementEntry::new(
        &egg,
        line,
        SourceKind::SourceControlReference,
    ))
}

fn parse_versioned(line: &str) -> LineOutcome {
    let Ok(re) = get_cached_regex(NAME_PATTERN) else {
        return LineOutcome::Rejected(RejectReason::Unrecognized);
    };
    let Some(caps) = re.captures(line) else {
        return LineOutcome::Rejected(RejectReason::Unrecognized);
    };

    let name = caps.name("name").map(|m| m.as_str()).unwrap_or_default();
    let rest = caps.name("rest").map(|m| m.as_str().trim()).unwrap_or_default();

    if let Some(extras) = caps.name("extras")
        && !extras_are_valid(extras.as_str())
    {
        return LineOutcome::Rejected(RejectReason::InvalidExtras(extras.as_str().to_string()));
    }

    if let Err(reason) = validate_remainder(rest) {
        return LineOutcome::Rejected(reason);
    }

    LineOutcome::Entry(RequirementEntry::new(name, line, SourceKind::Versioned))
}

/// Validate everything after `name[extras]`
fn validate_remainder(rest: &str) -> Result<(), RejectReason> {
    if rest.is_empty() {
        return Ok(());
    }

    // Direct reference: `name @ https://...`
    if let Some(url) = rest.strip_prefix('@') {
        let url = url.split(" ;").next().unwrap_or_default().trim();
        if url.is_empty() || url.contains(char::is_whitespace) {
            return Err(RejectReason::Unrecognized);
        }
        return Ok(());
    }

    let (versions, marker) = match rest.split_once(';') {
        Some((versions, marker)) => (versions.trim(), Some(marker.trim())),
        None => (rest, None),
    };

    if matches!(marker, Some("")) {
        return Err(RejectReason::Unrecognized);
    }

    let versions = match versions.strip_prefix('(') {
        Some(inner) => inner
            .strip_suffix(')')
            .ok_or_else(|| RejectReason::InvalidVersion(versions.to_string()))?
            .trim(),
        None => versions,
    };

    if versions.is_empty() {
        return Ok(());
    }

    if !versions.starts_with(['<', '>', '=', '!', '~']) {
        return Err(RejectReason::Unrecognized);
    }

    let clause = get_cached_regex(CLAUSE_PATTERN).map_err(|_| RejectReason::Unrecognized)?;
    for part in versions.split(',') {
        if !clause.is_match(part) {
            return Err(RejectReason::InvalidVersion(part.trim().to_string()));
        }
    }

    Ok(())
}

fn extras_are_valid(extras: &str) -> bool {
    let Ok(re) = get_cached_regex(EXTRA_PATTERN) else {
        return false;
    };
    extras
        .split(',')
        .map(str::trim)
        .filter(|extra| !extra.is_empty())
        .all(|extra| re.is_match(extra))
}

fn is_valid_name(name: &str) -> bool {
    get_cached_regex(EXTRA_PATTERN)
        .map(|re| re.is_match(name))
        .unwrap_or(false)
}

/// pip treats ` #` as the start of a comment
fn strip_inline_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    for (idx, ch) in line.char_indices() {
        if ch == '#' && idx > 0 && bytes[idx - 1].is_ascii_whitespace() {
            return line[..idx].trim_end();
        }
    }
    line
}
