use std::path::Path;

use crate::error::{Error, Result};

/// A file read from disk and ready to be sent as multipart form data.
///
/// The bytes are opaque to the client; the backend does all parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// File name sent in the multipart part.
    pub filename: String,

    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl FileUpload {
    /// Creates an upload from in-memory bytes.
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    /// Reads `path` into memory.
    pub async fn read(path: &Path) -> Result<Self> {
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                Error::validation(
                    format!("{} has no usable file name", path.display()),
                    Some("file".to_string()),
                )
            })?
            .to_string();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|err| Error::io(format!("failed to read {}: {err}", path.display()), err))?;
        Ok(Self { filename, bytes })
    }

    /// Returns the number of bytes to upload.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the file is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"hello")
            .unwrap();

        let upload = FileUpload::read(&path).await.unwrap();
        assert_eq!(upload.filename, "notes.txt");
        assert_eq!(upload.bytes, b"hello");
        assert_eq!(upload.len(), 5);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileUpload::read(&dir.path().join("absent.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
