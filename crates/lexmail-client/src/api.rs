use async_trait::async_trait;
use lexmail_core::{
    AnalysisResult, AnalyzeRequest, DraftRequest, DraftResult, ProcessRequest, ProcessResult,
};

use crate::ClientError;

/// The three operations the assistant front-end needs from the service.
#[async_trait]
pub trait AssistantApi: Send + Sync {
    async fn analyze(&self, req: &AnalyzeRequest) -> Result<AnalysisResult, ClientError>;

    async fn draft(&self, req: &DraftRequest) -> Result<DraftResult, ClientError>;

    async fn process(&self, req: &ProcessRequest) -> Result<ProcessResult, ClientError>;
}
