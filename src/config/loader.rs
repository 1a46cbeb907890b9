//! KDL configuration loader
//!
//! ```kdl
//! app-root "/app"
//! supplemental "torch==2.6.0" "torchvision"
//! exclude "dlib"
//! remote timeout=10 {
//!     url "https://example.com/requirements.txt"
//! }
//! report-conflicts #true
//! ```

use crate::config::types::RawConfig;
use crate::error::{ReqgatherError, Result};
use crate::project_identity;
use crate::utils::paths;
use kdl::{KdlDocument, KdlNode};
use std::fs;
use std::path::{Path, PathBuf};

const VALID_KEYS: &[&str] = &[
    "app-root",
    "discovery-root",
    "output",
    "top-level-manifest",
    "skip-top-level",
    "manifest-name",
    "supplemental",
    "exclude-file",
    "exclude",
    "hard-drop",
    "remote",
    "report-conflicts",
    "strict-conflicts",
];

/// Find the config file to use, if any.
///
/// An explicit path (flag or environment) must exist; the implicit
/// locations are only used when present.
pub fn locate_config_file(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    let explicit = explicit
        .map(Path::to_path_buf)
        .or_else(|| project_identity::env_get("CONFIG").map(PathBuf::from));

    if let Some(path) = explicit {
        let path = paths::expand_home(&path)?;
        if !path.is_file() {
            return Err(ReqgatherError::ConfigError(format!(
                "Config file not found at: {}",
                path.display()
            )));
        }
        return Ok(Some(path));
    }

    let local = PathBuf::from(project_identity::CONFIG_FILE_BASENAME);
    if local.is_file() {
        return Ok(Some(local));
    }

    if let Ok(user) = paths::user_config_file()
        && user.is_file()
    {
        return Ok(Some(user));
    }

    Ok(None)
}

pub fn load_config_file(path: &Path) -> Result<RawConfig> {
    let content = fs::read_to_string(path).map_err(|e| ReqgatherError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_config(&content, Some(&path.display().to_string()))
}

/// Parse KDL content into a configuration layer
pub fn parse_config(content: &str, file_path: Option<&str>) -> Result<RawConfig> {
    let doc: KdlDocument = content.parse().map_err(|e: kdl::KdlError| {
        ReqgatherError::ConfigError(describe_kdl_error(content, file_path, &e))
    })?;

    let mut config = RawConfig::default();
    for node in doc.nodes() {
        apply_node(node, &mut config)?;
    }
    Ok(config)
}

fn apply_node(node: &KdlNode, config: &mut RawConfig) -> Result<()> {
    let key = node.name().value();
    match key {
        "app-root" => config.app_root = Some(required_path(node)?),
        "discovery-root" => config.discovery_root = Some(required_path(node)?),
        "output" => config.output = Some(required_path(node)?),
        "top-level-manifest" => config.top_level_manifest = Some(required_path(node)?),
        "skip-top-level" => config.skip_top_level = Some(parse_flag(node)?),
        "manifest-name" => config.manifest_name = Some(required_string(node)?),
        "exclude-file" => config.exclude_file = Some(required_path(node)?),
        "supplemental" => extend(&mut config.supplemental, node),
        "exclude" => extend(&mut config.exclude, node),
        "hard-drop" => extend(&mut config.hard_drop, node),
        "remote" => parse_remote(node, config)?,
        "report-conflicts" => config.report_conflicts = Some(parse_flag(node)?),
        "strict-conflicts" => config.strict_conflicts = Some(parse_flag(node)?),
        other => {
            return Err(ReqgatherError::ConfigError(format!(
                "Unknown setting: '{}'. Valid settings: {}",
                other,
                VALID_KEYS.join(", ")
            )));
        }
    }
    Ok(())
}

/// `remote timeout=10 remote-first=#false "https://a" { url "https://b" }`
fn parse_remote(node: &KdlNode, config: &mut RawConfig) -> Result<()> {
    let urls = config.remote_urls.get_or_insert_with(Vec::new);

    for entry in node.entries() {
        match entry.name().map(|n| n.value()) {
            Some("timeout") => {
                let secs = entry
                    .value()
                    .as_integer()
                    .filter(|v| *v > 0)
                    .and_then(|v| u64::try_from(v).ok())
                    .ok_or_else(|| {
                        ReqgatherError::ConfigError(
                            "remote timeout must be a positive integer (seconds)".to_string(),
                        )
                    })?;
                config.remote_timeout_secs = Some(secs);
            }
            Some("remote-first") => {
                let flag = entry.value().as_bool().ok_or_else(|| {
                    ReqgatherError::ConfigError("remote-first must be #true or #false".to_string())
                })?;
                config.remote_first = Some(flag);
            }
            Some(other) => {
                return Err(ReqgatherError::ConfigError(format!(
                    "Unknown remote property: '{}'. Valid: timeout, remote-first",
                    other
                )));
            }
            None => {
                if let Some(url) = entry.value().as_string() {
                    urls.push(url.to_string());
                }
            }
        }
    }

    if let Some(children) = node.children() {
        for child in children.nodes() {
            if child.name().value() != "url" {
                return Err(ReqgatherError::ConfigError(format!(
                    "Unknown remote child: '{}'. Expected: url",
                    child.name().value()
                )));
            }
            urls.extend(strings(child));
        }
    }

    Ok(())
}

fn strings(node: &KdlNode) -> Vec<String> {
    node.entries()
        .iter()
        .filter(|e| e.name().is_none())
        .filter_map(|e| e.value().as_string())
        .map(ToString::to_string)
        .collect()
}

fn extend(target: &mut Option<Vec<String>>, node: &KdlNode) {
    target.get_or_insert_with(Vec::new).extend(strings(node));
}

fn required_string(node: &KdlNode) -> Result<String> {
    strings(node).into_iter().next().ok_or_else(|| {
        ReqgatherError::ConfigError(format!(
            "'{}' requires a string value",
            node.name().value()
        ))
    })
}

fn required_path(node: &KdlNode) -> Result<PathBuf> {
    required_string(node).map(PathBuf::from)
}

/// A bare node name means enabled
fn parse_flag(node: &KdlNode) -> Result<bool> {
    let Some(entry) = node.entries().first() else {
        return Ok(true);
    };

    if let Some(val) = entry.value().as_bool() {
        return Ok(val);
    }

    if let Some(s) = entry.value().as_string() {
        match s.to_lowercase().as_str() {
            "true" => return Ok(true),
            "false" => return Ok(false),
            _ => {}
        }
    }

    Err(ReqgatherError::ConfigError(format!(
        "'{}' expects a boolean (#true or #false)",
        node.name().value()
    )))
}

fn describe_kdl_error(content: &str, file_path: Option<&str>, error: &kdl::KdlError) -> String {
    let location = file_path.unwrap_or("<config>");
    let Some(diag) = error.diagnostics.first() else {
        return format!("{}: failed to parse KDL document", location);
    };

    let (line, col) = offset_to_line_col(content, diag.span.offset());
    let message = diag
        .message
        .clone()
        .unwrap_or_else(|| "parse error".to_string());

    match &diag.help {
        Some(help) => format!("{}:{}:{}: {} (help: {})", location, line, col, message, help),
        None => format!("{}:{}:{}: {}", location, line, col, message),
    }
}

/// Convert byte offset to line and column numbers
fn offset_to_line_col(content: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;

    for (i, c) in content.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }

    (line, col)
}
