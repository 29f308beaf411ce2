//! Applications endpoint client

use std::time::Duration;

use async_trait::async_trait;
use prashiskshan_core::SubmissionForwarder;
use prashiskshan_domain::constants::{APPLICATIONS_ENDPOINT_PATH, DEFAULT_API_TIMEOUT_SECS};
use prashiskshan_domain::{ApiConfig, ApplicationSubmission, DeliveryError, SubmissionReceipt};
use reqwest::{Client as ReqwestClient, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::errors::delivery_error_from_http;

/// Configuration for [`ApplicationsApiClient`]
#[derive(Debug, Clone)]
pub struct ApplicationsApiConfig {
    /// Origin of the platform API, e.g. `https://prashiskshan.example`
    pub base_url: String,
    /// Upper bound for a single POST, connect included
    pub timeout: Duration,
}

impl Default for ApplicationsApiConfig {
    fn default() -> Self {
        Self {
            base_url: ApiConfig::default().base_url,
            timeout: Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
        }
    }
}

impl From<&ApiConfig> for ApplicationsApiConfig {
    fn from(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

/// Optional fields of a successful response body.
#[derive(Debug, Default, Deserialize)]
struct CreateApplicationResponse {
    #[serde(default)]
    id: Option<serde_json::Value>,
}

/// Posts applications to `<base_url>/api/applications`.
///
/// Each [`submit`](SubmissionForwarder::submit) sends exactly one request.
/// A POST that timed out or hit a 5xx may still have created the
/// application, so failures are reported to the caller instead of resent.
pub struct ApplicationsApiClient {
    client: ReqwestClient,
    timeout: Duration,
    endpoint: String,
}

impl ApplicationsApiClient {
    /// # Errors
    /// [`DeliveryError::Config`] when the HTTP client cannot be built.
    pub fn new(config: ApplicationsApiConfig) -> Result<Self, DeliveryError> {
        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .user_agent(concat!("prashiskshan/", env!("CARGO_PKG_VERSION")))
            .no_proxy()
            .build()
            .map_err(|err| DeliveryError::Config(format!("failed to build HTTP client: {err}")))?;

        let endpoint =
            format!("{}{}", config.base_url.trim_end_matches('/'), APPLICATIONS_ENDPOINT_PATH);
        Ok(Self { client, timeout: config.timeout, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn map_status_error(status: StatusCode, url: &str, body: &str) -> DeliveryError {
        let message = if body.is_empty() {
            format!("{url} returned status {status}")
        } else {
            format!("{url} returned status {status}: {body}")
        };

        if status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::SERVICE_UNAVAILABLE {
            DeliveryError::RateLimit(message)
        } else if status.is_server_error() {
            DeliveryError::Server(message)
        } else if status.is_client_error() {
            DeliveryError::Client(message)
        } else {
            DeliveryError::Server(format!("unexpected response: {message}"))
        }
    }
}

#[async_trait]
impl SubmissionForwarder for ApplicationsApiClient {
    #[instrument(skip(self, submission), fields(project_id = %submission.project_id, via = %submission.submitted_via))]
    async fn submit(
        &self,
        submission: &ApplicationSubmission,
    ) -> Result<SubmissionReceipt, DeliveryError> {
        debug!(url = %self.endpoint, "sending application");
        let response = self
            .client
            .post(&self.endpoint)
            .json(submission)
            .send()
            .await
            .map_err(|err| {
                warn!(error = %err, "applications endpoint unreachable");
                delivery_error_from_http(&err, self.timeout)
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            warn!(%status, "applications endpoint rejected submission");
            return Err(Self::map_status_error(status, &self.endpoint, &body));
        }

        let parsed = if body.trim().is_empty() {
            CreateApplicationResponse::default()
        } else {
            serde_json::from_str::<CreateApplicationResponse>(&body).unwrap_or_else(|err| {
                debug!(error = %err, "response body is not JSON, ignoring");
                CreateApplicationResponse::default()
            })
        };

        let remote_id = parsed.id.map(|id| match id {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        });
        debug!(%status, remote_id = remote_id.as_deref().unwrap_or("-"), "submission accepted");
        Ok(SubmissionReceipt { remote_id })
    }
}
