use faultline_config::DownstreamConfig;
use faultline_core::{Failure, IntoFailure};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

/// Errors from calls to a downstream service
#[derive(Debug, thiserror::Error)]
pub enum DownstreamError {
    /// Connection, timeout or body transfer failure
    #[error("downstream request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Downstream answered with a non-success status
    #[error("downstream returned {status} {status_text}")]
    Status {
        status: u16,
        status_text: String,
        /// Raw response body, possibly empty or not JSON
        body: String,
    },

    /// Request path could not be joined onto the base URL
    #[error("invalid downstream path '{path}': {source}")]
    Url {
        path: String,
        #[source]
        source: url::ParseError,
    },
}

impl IntoFailure for DownstreamError {
    fn into_failure(self) -> Failure {
        match self {
            Self::Status {
                status,
                status_text,
                body,
            } => Failure::DownstreamHttpError {
                status,
                status_text,
                body,
            },
            // A success body we cannot read is our bug, not the network's
            Self::Request(e) if e.is_decode() => Failure::unclassified(e.to_string()),
            Self::Request(e) => Failure::DownstreamIoError { message: e.to_string() },
            Self::Url { .. } => Failure::unclassified(self.to_string()),
        }
    }
}

/// JSON HTTP client for one downstream service
#[derive(Debug, Clone)]
pub struct DownstreamClient {
    http: reqwest::Client,
    base_url: Url,
}

impl DownstreamClient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is invalid or the HTTP client cannot be built
    pub fn new(config: &DownstreamConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout()?)
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build downstream HTTP client: {e}"))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// GET `path` and decode the JSON response
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service answers with a
    /// non-success status
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, DownstreamError> {
        let url = self.url(path)?;
        tracing::debug!(%url, "calling downstream service");

        let response = self.http.get(url).send().await?;
        Self::decode(response).await
    }

    /// POST `body` as JSON to `path` and decode the JSON response
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service answers with a
    /// non-success status
    pub async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, DownstreamError> {
        let url = self.url(path)?;
        tracing::debug!(%url, "calling downstream service");

        let response = self.http.post(url).json(body).send().await?;
        Self::decode(response).await
    }

    fn url(&self, path: &str) -> Result<Url, DownstreamError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|source| DownstreamError::Url {
                path: path.to_owned(),
                source,
            })
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, DownstreamError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await?;
        Err(DownstreamError::Status {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_owned(),
            body,
        })
    }
}
