use anyhow::{Context, Result};
use std::path::Path;
use tempfile::TempDir;
use tracing::warn;

/// Scratch directory for one run, removed with everything in it on drop.
pub struct CleanupGuard(Option<TempDir>);

impl CleanupGuard {
    /// Creates a fresh directory inside `parent`.
    pub fn new_in(parent: &Path) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("giftoa-")
            .tempdir_in(parent)
            .with_context(|| format!("Failed to create scratch directory in {parent:?}"))?;
        Ok(Self(Some(dir)))
    }

    pub fn path(&self) -> &Path {
        self.0.as_ref().map_or(Path::new(""), TempDir::path)
    }
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        if let Some(dir) = self.0.take() {
            let path = dir.path().to_path_buf();
            if let Err(e) = dir.close() {
                warn!("Failed to remove scratch directory {path:?}: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn directory_is_removed_with_contents() {
        let parent = tempfile::tempdir().unwrap();
        let kept;
        {
            let guard = CleanupGuard::new_in(parent.path()).unwrap();
            kept = guard.path().to_path_buf();
            fs::write(kept.join("0.jpg"), b"frame").unwrap();
            assert!(kept.is_dir());
            assert!(kept.starts_with(parent.path()));
        }
        assert!(!kept.exists());
        assert!(fs::read_dir(parent.path()).unwrap().next().is_none());
    }

    #[test]
    fn guards_never_share_a_directory() {
        let parent = tempfile::tempdir().unwrap();
        let a = CleanupGuard::new_in(parent.path()).unwrap();
        let b = CleanupGuard::new_in(parent.path()).unwrap();
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn leftover_directories_do_not_block_a_new_run() {
        let parent = tempfile::tempdir().unwrap();
        fs::create_dir(parent.path().join("giftoa-stale")).unwrap();

        let guard = CleanupGuard::new_in(parent.path()).unwrap();
        assert!(guard.path().is_dir());
        assert_ne!(guard.path(), parent.path().join("giftoa-stale"));
    }

    #[test]
    fn missing_parent_is_an_error() {
        let parent = tempfile::tempdir().unwrap();
        let err = CleanupGuard::new_in(&parent.path().join("gone")).err().unwrap();
        assert!(err.to_string().contains("Failed to create scratch directory"));
    }
}
