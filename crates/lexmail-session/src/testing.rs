//! In-memory stand-in for the assistant service.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lexmail_client::{AssistantApi, ClientError};
use lexmail_core::{
    AnalysisResult, AnalyzeRequest, DraftRequest, DraftResult, ProcessRequest, ProcessResult,
    ServerMessage,
};
use serde_json::Value;
use tokio::sync::Barrier;

type Handler<Req, Res> = Box<dyn Fn(&Req) -> Result<Res, ClientError> + Send + Sync>;

#[derive(Default)]
pub struct FakeApi {
    analyze: Option<Handler<AnalyzeRequest, AnalysisResult>>,
    draft: Option<Handler<DraftRequest, DraftResult>>,
    process: Option<Handler<ProcessRequest, ProcessResult>>,
    analyze_seen: Mutex<Vec<AnalyzeRequest>>,
    draft_seen: Mutex<Vec<DraftRequest>>,
    process_seen: Mutex<Vec<ProcessRequest>>,
    draft_barrier: Option<Arc<Barrier>>,
}

impl FakeApi {
    pub fn on_analyze(
        mut self,
        f: impl Fn(&AnalyzeRequest) -> Result<AnalysisResult, ClientError> + Send + Sync + 'static,
    ) -> Self {
        self.analyze = Some(Box::new(f));
        self
    }

    pub fn on_draft(
        mut self,
        f: impl Fn(&DraftRequest) -> Result<DraftResult, ClientError> + Send + Sync + 'static,
    ) -> Self {
        self.draft = Some(Box::new(f));
        self
    }

    pub fn on_process(
        mut self,
        f: impl Fn(&ProcessRequest) -> Result<ProcessResult, ClientError> + Send + Sync + 'static,
    ) -> Self {
        self.process = Some(Box::new(f));
        self
    }

    /// Make each draft call wait until `n` draft calls are in flight.
    pub fn with_draft_barrier(mut self, n: usize) -> Self {
        self.draft_barrier = Some(Arc::new(Barrier::new(n)));
        self
    }

    pub fn analyze_requests(&self) -> Vec<AnalyzeRequest> {
        self.analyze_seen.lock().unwrap().clone()
    }

    pub fn draft_requests(&self) -> Vec<DraftRequest> {
        self.draft_seen.lock().unwrap().clone()
    }

    pub fn process_requests(&self) -> Vec<ProcessRequest> {
        self.process_seen.lock().unwrap().clone()
    }

    pub fn total_calls(&self) -> usize {
        self.analyze_seen.lock().unwrap().len()
            + self.draft_seen.lock().unwrap().len()
            + self.process_seen.lock().unwrap().len()
    }
}

#[async_trait]
impl AssistantApi for FakeApi {
    async fn analyze(&self, req: &AnalyzeRequest) -> Result<AnalysisResult, ClientError> {
        self.analyze_seen.lock().unwrap().push(req.clone());
        let handler = self.analyze.as_ref().expect("unexpected analyze call");
        handler(req)
    }

    async fn draft(&self, req: &DraftRequest) -> Result<DraftResult, ClientError> {
        self.draft_seen.lock().unwrap().push(req.clone());
        if let Some(barrier) = &self.draft_barrier {
            barrier.wait().await;
        }
        let handler = self.draft.as_ref().expect("unexpected draft call");
        handler(req)
    }

    async fn process(&self, req: &ProcessRequest) -> Result<ProcessResult, ClientError> {
        self.process_seen.lock().unwrap().push(req.clone());
        let handler = self.process.as_ref().expect("unexpected process call");
        handler(req)
    }
}

pub fn analysis(value: Value) -> AnalysisResult {
    match value {
        Value::Object(map) => AnalysisResult::new(map),
        other => panic!("analysis fixture must be an object, got {other}"),
    }
}

pub fn server_error(status: u16, body: &str) -> ClientError {
    ClientError::Server {
        status,
        message: ServerMessage::decode(body),
        body: body.to_string(),
    }
}

pub fn parse_error() -> ClientError {
    serde_json::from_str::<Value>("<html>").unwrap_err().into()
}
