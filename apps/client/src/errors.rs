use thiserror::Error;

/// Shown when the server rejects a submission without a usable `detail`.
pub const FALLBACK_SERVER_MESSAGE: &str = "Failed to process resume";
/// Shown when a network fault carries no description of its own.
pub const FALLBACK_UNEXPECTED_MESSAGE: &str = "An unexpected error occurred.";

/// Errors raised while talking to the evaluation service.
/// Every variant is recoverable: the controller turns it into a `Failed` state.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Could not read resume file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Request cancelled")]
    Cancelled,
}

impl ClientError {
    /// The message surfaced to the user in the `Failed` state.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Http(e) => {
                tracing::warn!("Network error: {e}");
                let description = e.to_string();
                if description.trim().is_empty() {
                    FALLBACK_UNEXPECTED_MESSAGE.to_string()
                } else {
                    description
                }
            }
            ClientError::Parse(e) => {
                tracing::warn!("Malformed evaluation response: {e}");
                FALLBACK_SERVER_MESSAGE.to_string()
            }
            ClientError::Io(e) => format!("Could not read the selected file: {e}"),
            ClientError::InvalidBaseUrl(url) => format!("Invalid API base URL: {url}"),
            ClientError::Timeout => "The evaluation request timed out.".to_string(),
            ClientError::Cancelled => "Evaluation cancelled.".to_string(),
        }
    }
}
