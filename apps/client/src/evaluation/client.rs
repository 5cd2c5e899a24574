use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};
use tracing::{debug, info, warn};

use crate::errors::{ClientError, FALLBACK_SERVER_MESSAGE};
use crate::evaluation::model::{error_detail, EvaluateResponse, Evaluation, HealthStatus};
use crate::upload::candidate::CandidateFile;

const EVALUATE_PATH: &str = "/api/evaluate";
const HEALTH_PATH: &str = "/api/health";
/// Multipart field the service reads the resume from.
const FILE_FIELD: &str = "file";

/// Anything that can turn a candidate file into an evaluation.
/// The controller only sees this trait, so tests can script responses.
#[async_trait]
pub trait EvaluationTransport: Send + Sync {
    async fn evaluate(&self, file: &CandidateFile) -> Result<Evaluation, ClientError>;
}

/// HTTP client for the evaluation service. One request per call, no retries.
#[derive(Clone)]
pub struct HttpEvaluationClient {
    client: Client,
    base_url: String,
}

impl HttpEvaluationClient {
    /// `timeout: None` keeps reqwest's default of no overall request timeout.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| ClientError::InvalidBaseUrl(format!("{base_url}: {e}")))?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, EVALUATE_PATH)
    }

    /// Checks that the service is reachable and reports itself healthy.
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let url = format!("{}{}", self.base_url, HEALTH_PATH);
        let response = self.client.get(&url).send().await.map_err(classify)?;

        let status = response.status();
        let body = response.text().await.map_err(classify)?;
        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: error_detail(&body).unwrap_or_else(|| format!("Health check failed ({status})")),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl EvaluationTransport for HttpEvaluationClient {
    async fn evaluate(&self, file: &CandidateFile) -> Result<Evaluation, ClientError> {
        let payload = file.load().await?;
        let length = payload.len() as u64;

        let part = Part::stream_with_length(payload, length)
            .file_name(file.file_name().to_string())
            .mime_str(file.mime_type())?;
        let form = Form::new().part(FILE_FIELD, part);

        let url = self.endpoint();
        info!("Submitting {} ({} bytes) to {url}", file.file_name(), length);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        let body = response.text().await.map_err(classify)?;

        if !status.is_success() {
            let message = error_detail(&body).unwrap_or_else(|| FALLBACK_SERVER_MESSAGE.to_string());
            warn!("Evaluation service returned {status}: {message}");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: EvaluateResponse = serde_json::from_str(&body)?;
        debug!(
            "Evaluation received: score={}, success={:?}, record_id={:?}",
            parsed.evaluation.score, parsed.success, parsed.record_id
        );

        Ok(parsed.evaluation)
    }
}

fn classify(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::Timeout
    } else {
        ClientError::Http(err)
    }
}
