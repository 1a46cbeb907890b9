use super::ManifestSource;
use crate::error::Result;

/// Lines held in memory, e.g. fixtures or literal lists
#[derive(Debug, Clone)]
pub struct InMemorySource {
    id: String,
    lines: Vec<String>,
}

impl InMemorySource {
    pub fn new<S: AsRef<str>>(id: &str, lines: &[S]) -> Self {
        Self {
            id: id.to_string(),
            lines: lines.iter().map(|l| l.as_ref().to_string()).collect(),
        }
    }
}

impl ManifestSource for InMemorySource {
    fn id(&self) -> &str {
        &self.id
    }

    fn origin(&self) -> &'static str {
        "memory"
    }

    fn read_lines(&self) -> Result<Vec<String>> {
        Ok(self.lines.clone())
    }
}
