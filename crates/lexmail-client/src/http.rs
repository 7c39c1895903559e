//! reqwest-backed client for the assistant service's `/api/*` endpoints.

use async_trait::async_trait;
use lexmail_core::{
    AnalysisResult, AnalyzeRequest, ClientConfig, DraftRequest, DraftResult, HealthStatus,
    ModelInfo, ProcessRequest, ProcessResult, ServerMessage,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::{AssistantApi, ClientError};

const ANALYZE_PATH: &str = "/api/analyze";
const DRAFT_PATH: &str = "/api/draft";
const PROCESS_PATH: &str = "/api/process";
const MODELS_PATH: &str = "/api/models";
const HEALTH_PATH: &str = "/health";

/// HTTP client for the analysis/drafting service.
///
/// No authentication, no retries. Each call is a single request.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the service described by `config`.
    ///
    /// The base URL should be like `http://localhost:8000`; a trailing slash
    /// is dropped.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List the model candidates the service is configured with.
    pub async fn models(&self) -> Result<ModelInfo, ClientError> {
        self.get_json(MODELS_PATH).await
    }

    /// Liveness probe.
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        self.get_json(HEALTH_PATH).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        info!(url = %url, "POST");
        let resp = self.client.post(&url).json(body).send().await?;
        read_json(resp).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.url(path);
        info!(url = %url, "GET");
        let resp = self.client.get(&url).send().await?;
        read_json(resp).await
    }
}

async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let message = ServerMessage::decode(&body);
        warn!(status = status.as_u16(), message = %message, "service returned failure status");
        return Err(ClientError::Server {
            status: status.as_u16(),
            message,
            body,
        });
    }

    let body = resp.text().await?;
    debug!(status = status.as_u16(), bytes = body.len(), "response received");
    Ok(serde_json::from_str(&body)?)
}

#[async_trait]
impl AssistantApi for ApiClient {
    async fn analyze(&self, req: &AnalyzeRequest) -> Result<AnalysisResult, ClientError> {
        let analysis: AnalysisResult = self.post_json(ANALYZE_PATH, req).await?;
        info!(fields = analysis.as_map().len(), "analysis received");
        Ok(analysis)
    }

    async fn draft(&self, req: &DraftRequest) -> Result<DraftResult, ClientError> {
        let draft: DraftResult = self.post_json(DRAFT_PATH, req).await?;
        info!(
            variant = req.variant.map(|v| v.as_str()).unwrap_or("-"),
            chars = draft.draft.len(),
            "draft received"
        );
        Ok(draft)
    }

    async fn process(&self, req: &ProcessRequest) -> Result<ProcessResult, ClientError> {
        let result: ProcessResult = self.post_json(PROCESS_PATH, req).await?;
        info!(chars = result.draft.len(), "analysis and draft received");
        Ok(result)
    }
}
