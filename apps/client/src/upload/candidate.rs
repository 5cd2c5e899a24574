use std::path::{Path, PathBuf};

use bytes::Bytes;

/// Where the file's bytes come from.
/// On-disk payloads are read only at submission time, so an oversized file
/// is rejected from its metadata without ever being loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Payload {
    #[cfg(test)]
    InMemory(Bytes),
    OnDisk(PathBuf),
}

/// A file the user has chosen but not yet submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    file_name: String,
    mime_type: String,
    size_bytes: u64,
    payload: Payload,
}

impl CandidateFile {
    #[cfg(test)]
    pub fn from_bytes(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Bytes,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            size_bytes: bytes.len() as u64,
            payload: Payload::InMemory(bytes),
        }
    }

    /// Describes a file on disk. The MIME type is guessed from the extension,
    /// the same way a browser fills in `File.type`.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Ok(Self {
            file_name,
            mime_type,
            size_bytes: metadata.len(),
            payload: Payload::OnDisk(path.to_path_buf()),
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Returns the file contents, reading from disk if needed.
    pub async fn load(&self) -> std::io::Result<Bytes> {
        match &self.payload {
            #[cfg(test)]
            Payload::InMemory(bytes) => Ok(bytes.clone()),
            Payload::OnDisk(path) => Ok(Bytes::from(tokio::fs::read(path).await?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_from_path_guesses_pdf_mime_type() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(b"%PDF-1.7 minimal").unwrap();

        let candidate = CandidateFile::from_path(file.path()).await.unwrap();
        assert_eq!(candidate.mime_type(), "application/pdf");
        assert_eq!(candidate.size_bytes(), 16);
        assert!(candidate.file_name().ends_with(".pdf"));
        assert_eq!(candidate.load().await.unwrap(), Bytes::from_static(b"%PDF-1.7 minimal"));
    }

    #[tokio::test]
    async fn test_from_path_unknown_extension_is_octet_stream() {
        let file = tempfile::Builder::new().suffix(".resume").tempfile().unwrap();
        let candidate = CandidateFile::from_path(file.path()).await.unwrap();
        assert_eq!(candidate.mime_type(), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_from_path_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = CandidateFile::from_path(dir.path()).await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CandidateFile::from_path(dir.path().join("gone.pdf"))
            .await
            .is_err());
    }

    #[test]
    fn test_from_bytes_records_size() {
        let candidate =
            CandidateFile::from_bytes("cv.pdf", "application/pdf", Bytes::from_static(b"abc"));
        assert_eq!(candidate.size_bytes(), 3);
        assert_eq!(candidate.file_name(), "cv.pdf");
    }
}
