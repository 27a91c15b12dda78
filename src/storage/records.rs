use crate::logging::errlog::ErrorLog;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Failures of the filesystem persistence layer.
///
/// Individual records that fail to parse during a listing are not an error
/// here: they are logged and skipped so one corrupt file never takes down
/// the whole read.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to serialize record {name}: {source}")]
    Serialize {
        name: String,
        source: serde_json::Error,
    },
    #[error("failed to write {name}: {source}")]
    Write {
        name: String,
        source: std::io::Error,
    },
    #[error("failed to read record directory {dir}: {source}")]
    Read { dir: String, source: std::io::Error },
}

/// One submission, one file.
///
/// Records are serialized as pretty-printed JSON under a collision-resistant
/// filename and never touched again: there is no update or delete path, and
/// external cleanup is the only way a file leaves the directory.
pub struct RecordStore {
    dir: PathBuf,
    prefix: &'static str,
    errlog: ErrorLog,
}

impl RecordStore {
    pub fn new(dir: PathBuf, prefix: &'static str, errlog: ErrorLog) -> Self {
        Self {
            dir,
            prefix,
            errlog,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Builds the filename for a new record:
    /// `<prefix><millis>-<sanitized name>-<uuid>.json`.
    ///
    /// The millisecond timestamp keeps directory listings roughly
    /// chronological; the UUID token makes two same-name submissions in the
    /// same millisecond land in distinct files instead of overwriting.
    pub fn filename_for(&self, name: &str) -> String {
        format!(
            "{}{}-{}-{}.json",
            self.prefix,
            now_ms(),
            sanitize_name(name),
            uuid::Uuid::new_v4()
        )
    }

    /// Serializes and writes one record. A failed write is appended to the
    /// error log before being returned; the submission is lost.
    pub async fn write<T: Serialize>(
        &self,
        filename: &str,
        record: &T,
    ) -> Result<PathBuf, StoreError> {
        let json = serde_json::to_vec_pretty(record).map_err(|e| StoreError::Serialize {
            name: filename.to_string(),
            source: e,
        })?;

        let path = self.dir.join(filename);
        match tokio::fs::write(&path, &json).await {
            Ok(()) => Ok(path),
            Err(e) => {
                self.errlog
                    .append("record write failed", &format!("{}: {}", filename, e))
                    .await;
                Err(StoreError::Write {
                    name: filename.to_string(),
                    source: e,
                })
            }
        }
    }

    /// Reads and parses every file in the record directory.
    ///
    /// Files that cannot be read or parsed are logged (error log plus a
    /// console warning) and excluded; only an unreadable directory fails the
    /// whole listing. Order is directory order, not guaranteed chronological.
    pub async fn read_all<T: DeserializeOwned>(&self) -> Result<Vec<T>, StoreError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) => return Err(self.read_error(e).await),
        };
        let mut records = Vec::new();

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => return Err(self.read_error(e).await),
            };
            let filename = entry.file_name().to_string_lossy().into_owned();

            let content = match tokio::fs::read_to_string(entry.path()).await {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!("Unreadable record file {}: {}", filename, e);
                    self.errlog
                        .append("unreadable record file", &format!("{}: {}", filename, e))
                        .await;
                    continue;
                }
            };

            match serde_json::from_str::<T>(&content) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!("Invalid JSON in file {}: {}", filename, e);
                    self.errlog
                        .append("invalid record file", &format!("{}: {}", filename, e))
                        .await;
                }
            }
        }

        Ok(records)
    }

    /// Journals a directory-level read failure and builds the error for it.
    async fn read_error(&self, source: std::io::Error) -> StoreError {
        let dir = self.dir.display().to_string();
        self.errlog
            .append("record directory unreadable", &format!("{}: {}", dir, source))
            .await;
        StoreError::Read { dir, source }
    }
}

/// Collapses whitespace runs to `_` and drops anything outside
/// `[A-Za-z0-9_-]`, so a submitted name can never influence the target path.
pub fn sanitize_name(name: &str) -> String {
    WHITESPACE
        .replace_all(name.trim(), "_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

/// Current system time in milliseconds.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_millis() as u64
}
