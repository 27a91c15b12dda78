use super::records::{StoreError, now_ms};
use crate::logging::errlog::ErrorLog;
use std::path::{Path, PathBuf};

/// Binary store for uploaded photos.
///
/// Owns the bytes only; record files hold the reference. Attachments are
/// append-only and never garbage collected, so an orphaned file (record
/// write failed after the attachment landed) simply stays on disk.
pub struct AttachmentStore {
    dir: PathBuf,
    errlog: ErrorLog,
}

impl AttachmentStore {
    pub fn new(dir: PathBuf, errlog: ErrorLog) -> Self {
        Self { dir, errlog }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persists uploaded bytes under a unique name and returns that name.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<String, StoreError> {
        let filename = unique_filename(original_name);
        let path = self.dir.join(&filename);

        match tokio::fs::write(&path, bytes).await {
            Ok(()) => Ok(filename),
            Err(e) => {
                self.errlog
                    .append("attachment write failed", &format!("{}: {}", filename, e))
                    .await;
                Err(StoreError::Write {
                    name: filename,
                    source: e,
                })
            }
        }
    }
}

/// `<millis>-<uuid><ext>`, keeping a sanitized copy of the original
/// extension so browsers can still content-type the file when served back.
fn unique_filename(original_name: &str) -> String {
    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            e.chars()
                .filter(char::is_ascii_alphanumeric)
                .collect::<String>()
        })
        .filter(|e| !e.is_empty())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_default();

    format!("{}-{}{}", now_ms(), uuid::Uuid::new_v4(), ext)
}
