pub mod common;
pub mod packages;

pub use common::{
    DEFAULT_APP_ROOT, DEFAULT_DISCOVERY_DIR, DEFAULT_REMOTE_TIMEOUT_SECS, MANIFEST_FILE_NAME,
    TEMP_FILE_SUFFIX,
};
pub use packages::{DEFAULT_EXCLUSIONS, RUNTIME_PROVIDED, SUPPLEMENTAL};
