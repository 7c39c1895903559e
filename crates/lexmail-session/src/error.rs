use lexmail_client::ClientError;
use lexmail_core::{ServerMessage, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// A precondition failed; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The service answered with a failure status.
    #[error("{message}")]
    Http { status: u16, message: ServerMessage },

    /// No usable reply: network failure or an undecodable body.
    #[error("{0}")]
    Transport(String),
}

impl From<ClientError> for OrchestratorError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Server {
                status, message, ..
            } => OrchestratorError::Http { status, message },
            other => OrchestratorError::Transport(other.to_string()),
        }
    }
}

impl OrchestratorError {
    pub fn is_validation(&self) -> bool {
        matches!(self, OrchestratorError::Validation(_))
    }
}
