use crate::domain::ports::CandidateBackend;
use crate::utils::error::{CandidateError, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Persists candidates as one pretty-printed JSON array, one value per line.
///
/// Saves go through a temp file in the destination directory that is renamed
/// over the target, so a crash mid-save leaves the previous file intact on
/// filesystems with atomic rename.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The file a save should replace: symlinks are followed so the link
    /// itself survives.
    fn save_target(&self) -> PathBuf {
        fs::canonicalize(&self.path).unwrap_or_else(|_| self.path.clone())
    }

    fn corrupt(&self, source: impl std::error::Error + Send + Sync + 'static) -> CandidateError {
        CandidateError::CorruptStoreError {
            path: self.path.clone(),
            source: Box::new(source),
        }
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn best_effort_sync_dir(dir: &Path) {
    #[cfg(unix)]
    {
        if let Err(e) = fs::File::open(dir).and_then(|d| d.sync_all()) {
            tracing::debug!("Directory sync of {} failed (best-effort): {}", dir.display(), e);
        }
    }

    #[cfg(not(unix))]
    {
        let _ = dir;
    }
}

impl CandidateBackend for FileStore {
    fn load(&self) -> Result<Vec<String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No candidate file at {}", self.path.display());
                return Ok(Vec::new());
            }
            // read_to_string reports non-UTF-8 content as InvalidData.
            Err(e) if e.kind() == ErrorKind::InvalidData => return Err(self.corrupt(e)),
            Err(e) => return Err(CandidateError::IoError(e)),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|e| self.corrupt(e))
    }

    fn save(&self, values: &[String]) -> Result<()> {
        let target = self.save_target();
        let parent = parent_dir(&target);
        fs::create_dir_all(parent)?;

        let mut encoded = serde_json::to_string_pretty(values)?;
        encoded.push('\n');

        let mut tmp = NamedTempFile::new_in(parent)?;
        if let Ok(existing) = fs::metadata(&target) {
            fs::set_permissions(tmp.path(), existing.permissions())?;
        }
        tmp.write_all(encoded.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&target).map_err(|e| CandidateError::IoError(e.error))?;
        best_effort_sync_dir(parent);

        tracing::debug!("Wrote {} candidates to {}", values.len(), target.display());
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
