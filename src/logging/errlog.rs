use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Handle to the append-only error log file.
///
/// Cheap to clone; all clones share the same file and rotation state.
#[derive(Clone)]
pub struct ErrorLog {
    inner: Arc<Inner>,
}

struct Inner {
    path: PathBuf,
    max_bytes: u64,
    /// Serializes append and rotation so a rotation cannot race a write.
    lock: Mutex<()>,
}

impl ErrorLog {
    pub fn new(path: PathBuf, max_bytes: u64) -> Self {
        Self {
            inner: Arc::new(Inner {
                path,
                max_bytes,
                lock: Mutex::new(()),
            }),
        }
    }

    /// Appends one `[timestamp] context: detail` line.
    pub async fn append(&self, context: &str, detail: &str) {
        let _guard = self.inner.lock.lock().await;

        if let Err(e) = self.rotate_if_needed().await {
            tracing::error!("Failed to rotate error log: {}", e);
        }

        let line = format!("[{}] {}: {}\n", Utc::now().to_rfc3339(), context, detail);
        let file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.inner.path)
            .await;

        match file {
            Ok(mut file) => {
                if let Err(e) = file.write_all(line.as_bytes()).await {
                    tracing::error!("Failed to write to error log: {}", e);
                } else if let Err(e) = file.flush().await {
                    tracing::error!("Failed to flush error log: {}", e);
                }
            }
            Err(e) => {
                tracing::error!("Failed to open error log: {}", e);
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Moves `error.log` aside to `error.log.1` once it exceeds the size
    /// threshold. The previous rotation, if any, is replaced.
    async fn rotate_if_needed(&self) -> std::io::Result<()> {
        let len = match tokio::fs::metadata(&self.inner.path).await {
            Ok(meta) => meta.len(),
            // Nothing written yet, nothing to rotate.
            Err(_) => return Ok(()),
        };

        if len < self.inner.max_bytes {
            return Ok(());
        }

        let mut rotated = self.inner.path.as_os_str().to_owned();
        rotated.push(".1");
        tokio::fs::rename(&self.inner.path, PathBuf::from(rotated)).await
    }
}
