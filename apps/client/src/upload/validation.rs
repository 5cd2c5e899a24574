use thiserror::Error;

use crate::upload::candidate::CandidateFile;

pub const PDF_MIME_TYPE: &str = "application/pdf";
/// 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Why a candidate file was refused before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Please upload a PDF file.")]
    NotPdf { mime_type: String },

    #[error("File is too large. Max size is {}MB.", whole_megabytes(*.limit_bytes))]
    TooLarge { size_bytes: u64, limit_bytes: u64 },
}

impl Rejection {
    /// Short machine-friendly reason, used in logs.
    pub fn reason(&self) -> &'static str {
        match self {
            Rejection::NotPdf { .. } => "not a PDF",
            Rejection::TooLarge { .. } => "exceeds size limit",
        }
    }
}

/// Client-side gate applied to every selected file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationPolicy {
    pub max_size_bytes: u64,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            max_size_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl ValidationPolicy {
    pub fn new(max_size_bytes: u64) -> Self {
        Self { max_size_bytes }
    }

    /// Checks the MIME type first, then the size.
    /// The size limit is inclusive: a file of exactly `max_size_bytes` passes.
    pub fn validate(&self, candidate: &CandidateFile) -> Result<(), Rejection> {
        if candidate.mime_type() != PDF_MIME_TYPE {
            return Err(Rejection::NotPdf {
                mime_type: candidate.mime_type().to_string(),
            });
        }
        if candidate.size_bytes() > self.max_size_bytes {
            return Err(Rejection::TooLarge {
                size_bytes: candidate.size_bytes(),
                limit_bytes: self.max_size_bytes,
            });
        }
        Ok(())
    }
}

pub fn whole_megabytes(bytes: u64) -> String {
    format!("{:.0}", bytes as f64 / BYTES_PER_MB)
}

pub fn megabytes_2dp(bytes: u64) -> String {
    format!("{:.2}", bytes as f64 / BYTES_PER_MB)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn file(mime: &str, size: usize) -> CandidateFile {
        CandidateFile::from_bytes("resume.pdf", mime, Bytes::from(vec![0u8; size]))
    }

    #[test]
    fn test_accepts_small_pdf() {
        assert!(ValidationPolicy::default()
            .validate(&file(PDF_MIME_TYPE, 2048))
            .is_ok());
    }

    #[test]
    fn test_accepts_pdf_exactly_at_limit() {
        let policy = ValidationPolicy::new(1024);
        assert!(policy.validate(&file(PDF_MIME_TYPE, 1024)).is_ok());
    }

    #[test]
    fn test_rejects_one_byte_over_limit() {
        let policy = ValidationPolicy::new(1024);
        let err = policy.validate(&file(PDF_MIME_TYPE, 1025)).unwrap_err();
        assert_eq!(err.reason(), "exceeds size limit");
    }

    #[test]
    fn test_rejects_word_document() {
        let err = ValidationPolicy::default()
            .validate(&file(
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
                10,
            ))
            .unwrap_err();
        assert_eq!(err.reason(), "not a PDF");
        assert_eq!(err.to_string(), "Please upload a PDF file.");
    }

    #[test]
    fn test_type_checked_before_size() {
        let policy = ValidationPolicy::new(4);
        let err = policy.validate(&file("image/png", 64)).unwrap_err();
        assert!(matches!(err, Rejection::NotPdf { .. }));
    }

    #[test]
    fn test_too_large_message_names_limit_in_mb() {
        let err = Rejection::TooLarge {
            size_bytes: 11 * 1024 * 1024,
            limit_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        };
        assert_eq!(err.to_string(), "File is too large. Max size is 10MB.");
    }

    #[test]
    fn test_megabyte_formatting() {
        assert_eq!(megabytes_2dp(1_572_864), "1.50");
        assert_eq!(whole_megabytes(DEFAULT_MAX_UPLOAD_BYTES), "10");
    }
}
