use crate::error::{ReqgatherError, Result};
use crate::project_identity;
use directories::{ProjectDirs, UserDirs};
use std::path::{Path, PathBuf};

pub fn expand_home(path: &Path) -> Result<PathBuf> {
    let path_str = path.to_string_lossy();

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    let user_dirs = UserDirs::new().ok_or_else(|| {
        ReqgatherError::Other("Could not determine user home directory".to_string())
    })?;

    let home = user_dirs.home_dir();

    if path_str == "~" {
        return Ok(home.to_path_buf());
    }

    let stripped = path_str
        .strip_prefix("~/")
        .ok_or_else(|| ReqgatherError::Other(format!("Invalid path format: {}", path_str)))?;

    Ok(home.join(stripped))
}

pub fn config_dir() -> Result<PathBuf> {
    let name = project_identity::CONFIG_DIR_NAME;
    let proj = ProjectDirs::from("com", name, name)
        .ok_or_else(|| ReqgatherError::Other("Could not determine config directory".to_string()))?;
    Ok(proj.config_dir().to_path_buf())
}

pub fn user_config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join(project_identity::CONFIG_FILE_BASENAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_path_untouched() {
        let path = Path::new("/app/custom_nodes");
        assert_eq!(expand_home(path).unwrap(), PathBuf::from("/app/custom_nodes"));
    }

    #[test]
    fn test_relative_path_untouched() {
        let path = Path::new("custom_nodes/requirements.txt");
        assert_eq!(expand_home(path).unwrap(), path.to_path_buf());
    }

    #[test]
    fn test_tilde_invalid_form_rejected() {
        assert!(expand_home(Path::new("~other/file")).is_err());
    }
}
