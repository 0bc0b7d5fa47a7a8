//! All-or-nothing writing of a generation plan

use crate::generate::{GenerateError, GenerationPlan, PlannedFile, WriteMode};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Files touched by a successful commit, relative to the project root
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Write every file in `plan` under `root`.
///
/// Nothing is written when the module directory or any `Create` target already
/// exists. If a write fails partway, every file and directory created by this call
/// is removed again before the error is returned.
pub async fn commit(root: &Path, plan: &GenerationPlan) -> Result<WriteReport, GenerateError> {
    if exists(&root.join(&plan.module_dir)).await {
        return Err(GenerateError::ModuleExists(plan.module_dir.clone()));
    }

    let mut pending = Vec::new();
    let mut skipped = Vec::new();

    for file in &plan.files {
        match (exists(&root.join(&file.path)).await, file.mode) {
            (true, WriteMode::Create) => return Err(GenerateError::PathOccupied(file.path.clone())),
            (true, WriteMode::CreateIfAbsent) => {
                tracing::debug!(path = %file.path.display(), "keeping existing file");
                skipped.push(file.path.clone());
            }
            (false, _) => pending.push(file),
        }
    }

    let mut txn = Transaction::new(root);
    for file in pending {
        if let Err(source) = txn.write(file).await {
            txn.rollback().await;
            return Err(GenerateError::Write {
                path: file.path.clone(),
                source,
            });
        }
    }

    Ok(WriteReport {
        written: txn.written,
        skipped,
    })
}

async fn exists(path: &Path) -> bool {
    fs::symlink_metadata(path).await.is_ok()
}

/// Tracks what a commit created so it can be undone
struct Transaction<'a> {
    root: &'a Path,
    written: Vec<PathBuf>,
    created_dirs: Vec<PathBuf>,
}

impl<'a> Transaction<'a> {
    fn new(root: &'a Path) -> Self {
        Self {
            root,
            written: Vec::new(),
            created_dirs: Vec::new(),
        }
    }

    async fn write(&mut self, file: &PlannedFile) -> std::io::Result<()> {
        let target = self.root.join(&file.path);

        if let Some(parent) = target.parent() {
            self.create_dirs(parent).await?;
        }

        let mut handle = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
            .await?;
        self.written.push(file.path.clone());

        handle.write_all(file.contents.as_bytes()).await?;
        handle.flush().await?;

        tracing::debug!(path = %file.path.display(), bytes = file.contents.len(), "wrote file");
        Ok(())
    }

    /// Create `dir` and any missing ancestors, remembering which ones were new
    async fn create_dirs(&mut self, dir: &Path) -> std::io::Result<()> {
        let mut missing = Vec::new();
        let mut cursor = Some(dir);
        while let Some(current) = cursor {
            if current.as_os_str().is_empty() || exists(current).await {
                break;
            }
            missing.push(current.to_path_buf());
            cursor = current.parent();
        }

        fs::create_dir_all(dir).await?;

        // Outermost first, so rollback can remove them innermost first
        self.created_dirs.extend(missing.into_iter().rev());
        Ok(())
    }

    async fn rollback(self) {
        for path in self.written.iter().rev() {
            let target = self.root.join(path);
            if let Err(e) = fs::remove_file(&target).await {
                tracing::warn!(
                    path = %target.display(),
                    error = %e,
                    "rollback could not remove file"
                );
            }
        }

        for dir in self.created_dirs.iter().rev() {
            if let Err(e) = fs::remove_dir(dir).await {
                tracing::warn!(
                    path = %dir.display(),
                    error = %e,
                    "rollback could not remove directory"
                );
            }
        }

        tracing::debug!(files = self.written.len(), "rolled back partial generation");
    }
}
