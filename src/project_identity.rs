//! Central project identity contract.
//!
//! This module is the single source of truth for runtime identity values.

pub const BINARY_NAME: &str = "reqgather";
pub const CONFIG_DIR_NAME: &str = "reqgather";
pub const ENV_PREFIX: &str = "REQGATHER";
pub const CONFIG_FILE_BASENAME: &str = "reqgather.kdl";

pub fn env_key(suffix: &str) -> String {
    format!("{}_{}", ENV_PREFIX, suffix)
}

pub fn env_get(suffix: &str) -> Option<String> {
    std::env::var(env_key(suffix)).ok()
}

pub fn user_agent() -> String {
    format!("{}/{}", BINARY_NAME, env!("CARGO_PKG_VERSION"))
}
