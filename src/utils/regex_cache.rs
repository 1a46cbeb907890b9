//! Regex compilation cache
//!
//! The specifier parser matches a handful of fixed patterns against every
//! manifest line; compiling them once keeps large discovery trees cheap.

use regex::Regex;
use std::collections::HashMap;
use std::sync::{LazyLock, Mutex};

/// Global cache for compiled regex patterns
static REGEX_CACHE: LazyLock<Mutex<HashMap<String, Regex>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Get or compile a regex pattern from the cache
///
/// # Examples
/// ```
/// use reqgather::utils::regex_cache::get_cached_regex;
///
/// let regex = get_cached_regex(r"#egg=(\w+)").unwrap();
/// assert!(regex.is_match("git+https://host/repo.git#egg=pkg"));
/// ```
pub fn get_cached_regex(pattern: &str) -> Result<Regex, regex::Error> {
    if let Ok(cache) = REGEX_CACHE.lock()
        && let Some(regex) = cache.get(pattern)
    {
        return Ok(regex.clone());
    }

    let regex = Regex::new(pattern)?;

    // Store in cache (ignore lock poisoning)
    if let Ok(mut cache) = REGEX_CACHE.lock() {
        cache.insert(pattern.to_string(), regex.clone());
    }

    Ok(regex)
}
