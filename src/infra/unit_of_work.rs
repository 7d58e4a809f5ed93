//! Unit of Work pattern implementation.
//!
//! Every mutation is a single read-modify-write against the whole
//! [`Dataset`]: the closure edits a working copy, and the copy replaces the
//! committed state only if the closure succeeds and (for the file backend)
//! the flush to disk succeeds. A failed closure leaves nothing behind, so
//! cascades either fully commit or are discarded.
//!
//! Flush and commit run on a spawned task that owns the lock, so a caller
//! dropping its future mid-flush cannot leave memory and disk disagreeing.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::dataset::Dataset;
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Not object safe because of the generic closures; services are generic
/// over it instead.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Run a read-only closure against the committed state.
    async fn read<F, T>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&Dataset) -> AppResult<T> + Send,
        T: Send;

    /// Run a mutating closure atomically.
    ///
    /// On `Err` nothing is written. Concurrent transactions are serialized by
    /// a store-wide lock.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&mut Dataset) -> AppResult<T> + Send,
        T: Send;
}

/// Concrete implementation of UnitOfWork, in memory or backed by a JSON file
pub struct Persistence {
    state: Arc<Mutex<Dataset>>,
    path: Option<PathBuf>,
}

impl Persistence {
    /// Volatile store, used by tests and `serve --in-memory`.
    pub fn in_memory() -> Self {
        Self::with_dataset(Dataset::default())
    }

    pub fn with_dataset(dataset: Dataset) -> Self {
        Self {
            state: Arc::new(Mutex::new(dataset)),
            path: None,
        }
    }

    /// Open (or lazily create) a JSON-file store.
    pub async fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let dataset = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No data file at {}, starting empty", path.display());
                Dataset::default()
            }
            Err(e) => return Err(e.into()),
        };

        tracing::debug!("Store opened from {}", path.display());
        Ok(Self {
            state: Arc::new(Mutex::new(dataset)),
            path: Some(path),
        })
    }

    /// Write the dataset to a sibling temp file, then rename over the target.
    async fn flush(path: &Path, dataset: &Dataset) -> AppResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(dataset)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    async fn read<F, T>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&Dataset) -> AppResult<T> + Send,
        T: Send,
    {
        let state = self.state.lock().await;
        f(&state)
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&mut Dataset) -> AppResult<T> + Send,
        T: Send,
    {
        let mut committed = self.state.clone().lock_owned().await;
        let mut working = committed.clone();

        let result = f(&mut working)?;

        let path = self.path.clone();
        tokio::spawn(async move {
            if let Some(path) = path {
                if let Err(e) = Self::flush(&path, &working).await {
                    tracing::error!("Flush to {} failed, discarding changes: {}", path.display(), e);
                    return Err(e);
                }
            }

            *committed = working;
            Ok(())
        })
        .await
        .map_err(|e| AppError::internal(format!("Commit task failed: {}", e)))??;

        Ok(result)
    }
}
