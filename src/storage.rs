//! Filesystem layout for case and session storage.
//!
//! Everything lives under a configurable data root:
//!
//! ```text
//! <data_root>/cases/<case_id>/<session_id>/{audio.<ext>, summary.json}
//! <data_root>/cases/_unlinked/<session_id>/...
//! ```
//!
//! A session directory is fully determined by (case-or-unlinked, session ID).
//! The `_unlinked` bucket is a reserved pseudo-case for sessions that do not
//! belong to any case.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{AppError, Result};

/// Reserved bucket name for sessions without a case.
pub const UNLINKED_BUCKET: &str = "_unlinked";

/// Fixed filename for the persisted summary artifact.
pub const SUMMARY_FILENAME: &str = "summary.json";

/// Maps (case, session) identity to an on-disk location and relocates
/// session directories between buckets.
#[derive(Debug, Clone)]
pub struct StorageLayout {
    data_root: PathBuf,
}

impl StorageLayout {
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
        }
    }

    pub fn data_root(&self) -> &Path {
        &self.data_root
    }

    /// Create the data root and the cases/ directory if missing.
    pub fn ensure_root(&self) -> Result<()> {
        std::fs::create_dir_all(self.data_root.join("cases"))?;
        Ok(())
    }

    fn bucket(&self, case_id: Option<&str>) -> PathBuf {
        self.data_root
            .join("cases")
            .join(case_id.unwrap_or(UNLINKED_BUCKET))
    }

    /// Path of a session directory. `None` means the unlinked bucket.
    pub fn session_dir(&self, case_id: Option<&str>, session_id: &str) -> PathBuf {
        self.bucket(case_id).join(session_id)
    }

    /// Create a session directory under the given bucket.
    pub fn create_session_dir(&self, case_id: Option<&str>, session_id: &str) -> Result<PathBuf> {
        self.ensure_root()?;
        let dir = self.session_dir(case_id, session_id);
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Move a session directory from one bucket to another. If the source
    /// does not exist, the destination is created empty so the session is
    /// always addressable at its recorded location.
    pub fn move_session(
        &self,
        session_id: &str,
        from_case: Option<&str>,
        to_case: Option<&str>,
    ) -> Result<PathBuf> {
        self.ensure_root()?;
        let src = self.session_dir(from_case, session_id);
        let dst = self.session_dir(to_case, session_id);

        if let Some(parent) = dst.parent() {
            std::fs::create_dir_all(parent)?;
        }

        if src.exists() {
            std::fs::rename(&src, &dst).map_err(|e| {
                AppError::Io(format!(
                    "move {} -> {}: {e}",
                    src.display(),
                    dst.display()
                ))
            })?;
            info!(session_id, from = %src.display(), to = %dst.display(), "session moved");
        } else {
            std::fs::create_dir_all(&dst)?;
        }

        Ok(dst)
    }

    /// Data-root-relative form of a path, as stored in the database.
    pub fn relative(&self, path: &Path) -> Result<String> {
        let rel = path.strip_prefix(&self.data_root).map_err(|_| {
            AppError::Io(format!("path outside data root: {}", path.display()))
        })?;
        Ok(rel.to_string_lossy().into_owned())
    }

    /// Resolve a stored relative path back to an absolute one.
    pub fn absolute(&self, relative: &str) -> PathBuf {
        self.data_root.join(relative)
    }
}
