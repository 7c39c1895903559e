pub mod config;
pub mod message;
pub mod samples;
pub mod theme;
pub mod validate;
pub mod wire;

pub use config::ClientConfig;
pub use message::ServerMessage;
pub use theme::ThemeMode;
pub use validate::{ValidationError, validate_email_text};
pub use wire::{
    AnalysisResult, AnalyzeRequest, DraftRequest, DraftResult, HealthStatus, ModelInfo,
    ProcessRequest, ProcessResult, Variant,
};
