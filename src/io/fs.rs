use std::{fs, path::Path};

use anyhow::{Context, Result, bail};

/// Create the directory if it doesn’t exist; error if a non-directory exists there.
pub(crate) fn ensure_dir_exists(path: &Path) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            bail!("[io::fs] Path exists but is not a directory: {}", path.display());
        }
    } else {
        fs::create_dir_all(path)
            .with_context(|| format!("[io::fs] Failed to create directory {}", path.display()))?;
    }
    Ok(())
}

/// Error unless the directory already exists.
pub(crate) fn require_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("[io::fs] Directory does not exist: {}", path.display());
    }
    if !path.is_dir() {
        bail!("[io::fs] Path exists but is not a directory: {}", path.display());
    }
    Ok(())
}

/// Error unless a regular file exists at `path`.
pub(crate) fn require_file_exists(path: &Path) -> Result<()> {
    if !path.is_file() {
        bail!("[io::fs] Required input file is missing: {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directories_are_created_and_checked() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        assert!(require_dir_exists(&nested).is_err());
        ensure_dir_exists(&nested).unwrap();
        require_dir_exists(&nested).unwrap();

        let file = dir.path().join("f.csv");
        fs::write(&file, "x").unwrap();
        assert!(ensure_dir_exists(&file).is_err());
        require_file_exists(&file).unwrap();
        assert!(require_file_exists(&nested).is_err());
    }
}
