//! File system utilities.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Writes `content` to `path` through a sibling temp file and a rename, so
/// an interrupted write never leaves a truncated file behind.
///
/// Missing parent directories are created. On Unix the file is created with
/// mode `0600` because it may hold API keys.
pub fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create directory: {}", parent.display()))?;

    let file_name = path.file_name().unwrap_or_default().to_string_lossy();
    let temp_path = parent.join(format!(".{file_name}.tmp"));

    fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write temp file: {}", temp_path.display()))?;
    restrict_permissions(&temp_path)?;

    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to replace file: {}", path.display()))?;

    Ok(())
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
        .with_context(|| format!("Failed to set permissions on {}", path.display()))
}

#[cfg(not(unix))]
#[allow(clippy::unnecessary_wraps)]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        atomic_write(&path, "model = \"claude\"").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "model = \"claude\"");
    }

    #[test]
    fn test_atomic_write_overwrites_and_cleans_up() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        fs::write(&path, "old").unwrap();
        atomic_write(&path, "こんにちは").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "こんにちは");
        assert!(!temp_dir.path().join(".config.toml.tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_atomic_write_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        atomic_write(&path, "secret").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
