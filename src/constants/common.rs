// Common constants used throughout the codebase

/// Manifest file name searched for during discovery
pub const MANIFEST_FILE_NAME: &str = "requirements.txt";

/// Application root holding the top-level manifest
pub const DEFAULT_APP_ROOT: &str = "/app";

/// Directory under the application root that holds component checkouts
pub const DEFAULT_DISCOVERY_DIR: &str = "custom_nodes";

/// Per-fetch timeout for remote manifests
pub const DEFAULT_REMOTE_TIMEOUT_SECS: u64 = 10;

/// Suffix of the sibling file used for atomic manifest writes
pub const TEMP_FILE_SUFFIX: &str = "reqgather.tmp";
