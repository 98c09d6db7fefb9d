use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::repository::{AttemptLog, AttemptRecord, StorageError};

/// Appends solved statements to a plain-text file next to the quiz.
///
/// Each entry reads `*** <question number> <timestamp>` followed by the
/// statement, separated from the previous entry by a blank line.
#[derive(Debug, Clone)]
pub struct FileAttemptLog {
    path: PathBuf,
}

impl FileAttemptLog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The conventional log path for a quiz file: `<quiz file>.log`.
    #[must_use]
    pub fn beside(quiz_file: &Path) -> Self {
        let mut name = quiz_file.as_os_str().to_owned();
        name.push(".log");
        Self::new(PathBuf::from(name))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

pub(crate) fn format_entry(record: &AttemptRecord) -> String {
    format!(
        "\n\n*** {} {}\n\n{}",
        record.position + 1,
        record.at.to_rfc3339(),
        record.statement
    )
}

#[async_trait]
impl AttemptLog for FileAttemptLog {
    async fn append(&self, record: &AttemptRecord) -> Result<(), StorageError> {
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(format_entry(record).as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}
