//! Turns user intents (analyze, draft, process, compare) into service calls
//! and folds the outcomes into state owned by a single [`Session`].

mod error;
pub mod fanout;
mod notice;
pub mod orchestrator;
pub mod session;
mod state;

#[cfg(test)]
mod testing;

pub use error::OrchestratorError;
pub use fanout::settle_all;
pub use notice::{Notice, NoticeLevel};
pub use orchestrator::{DraftPair, RequestOrchestrator};
pub use session::Session;
pub use state::{AppState, CompareDrafts};
