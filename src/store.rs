use std::io::ErrorKind;
use std::path::PathBuf;

use crate::document::Document;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no document with title \"{0}\" could be found")]
    NotFound(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

/// File-backed persistence, one file per document, filename = title.
/// Cheap to clone; the filesystem is the only state.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    pub async fn read(&self, title: &str) -> Result<Vec<u8>, StoreError> {
        match tokio::fs::read(self.root.join(title)).await {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(StoreError::NotFound(title.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn write(&self, document: &Document) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(document)?;
        tokio::fs::write(self.root.join(&document.title), bytes).await?;
        Ok(())
    }

    pub async fn remove(&self, title: &str) -> Result<(), StoreError> {
        tokio::fs::remove_file(self.root.join(title)).await?;
        Ok(())
    }

    pub async fn titles(&self) -> Result<Vec<String>, StoreError> {
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        let mut titles = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            titles.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(titles)
    }
}
