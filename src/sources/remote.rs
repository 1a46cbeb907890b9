use super::ManifestSource;
use crate::error::{ReqgatherError, Result};
use crate::project_identity;
use crate::ui;
use reqwest::blocking::Client;
use std::time::Duration;

const ALLOWED_SCHEMES: &[&str] = &["https", "http"];

/// A manifest served over HTTP(S)
///
/// Each fetch runs under its own timeout. Failures surface as errors from
/// [`ManifestSource::read_lines`]; the aggregator decides they are not fatal.
#[derive(Debug, Clone)]
pub struct RemoteSource {
    url: String,
    timeout: Duration,
}

impl RemoteSource {
    pub fn new(url: &str, timeout: Duration) -> Self {
        Self {
            url: url.to_string(),
            timeout,
        }
    }
}

impl ManifestSource for RemoteSource {
    fn id(&self) -> &str {
        &self.url
    }

    fn origin(&self) -> &'static str {
        "remote"
    }

    fn read_lines(&self) -> Result<Vec<String>> {
        validate_url(&self.url)?;
        ui::verbose(&format!(
            "Fetching {} (timeout {}s)",
            self.url,
            self.timeout.as_secs()
        ));
        let body = fetch_url(&self.url, self.timeout)?;
        Ok(body.lines().map(String::from).collect())
    }
}

pub(crate) fn validate_url(url_str: &str) -> Result<()> {
    let parsed = reqwest::Url::parse(url_str)
        .map_err(|_| ReqgatherError::RemoteFetchError(format!("Invalid URL: {}", url_str)))?;

    if !ALLOWED_SCHEMES.contains(&parsed.scheme()) {
        return Err(ReqgatherError::RemoteFetchError(format!(
            "URL scheme '{}' is not supported. Allowed: {}",
            parsed.scheme(),
            ALLOWED_SCHEMES.join(", ")
        )));
    }

    if parsed.host_str().is_none() {
        return Err(ReqgatherError::RemoteFetchError(format!(
            "URL must include a valid host: {}",
            url_str
        )));
    }

    Ok(())
}

fn fetch_url(url: &str, timeout: Duration) -> Result<String> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(project_identity::user_agent())
        .build()
        .map_err(|e| ReqgatherError::RemoteFetchError(format!("HTTP client setup: {}", e)))?;

    let resp = client.get(url).send().map_err(|e| {
        if e.is_timeout() {
            ReqgatherError::RemoteFetchError(format!(
                "Timed out after {}s: {}",
                timeout.as_secs(),
                url
            ))
        } else {
            ReqgatherError::RemoteFetchError(format!("Network error for {}: {}", url, e))
        }
    })?;

    let status = resp.status();
    if !status.is_success() {
        return Err(ReqgatherError::RemoteFetchError(format!(
            "{} returned HTTP {}",
            url, status
        )));
    }

    resp.text().map_err(|e| {
        ReqgatherError::RemoteFetchError(format!("Failed to read body from {}: {}", url, e))
    })
}
