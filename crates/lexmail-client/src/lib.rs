//! Client side of the analysis/drafting service: JSON over HTTP.

mod api;
mod error;
pub mod http;

pub use api::AssistantApi;
pub use error::ClientError;
pub use http::ApiClient;
