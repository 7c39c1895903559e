use lexmail_core::ServerMessage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Server {
        status: u16,
        message: ServerMessage,
        /// Body as received, for callers that read it leniently.
        body: String,
    },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// True for failures where no usable HTTP reply was obtained: network
    /// errors and success replies whose body did not decode.
    pub fn is_transport(&self) -> bool {
        !matches!(self, ClientError::Server { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Server { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            ClientError::Json(_) => None,
        }
    }
}
