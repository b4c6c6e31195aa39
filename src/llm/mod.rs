pub mod ollama;

pub use ollama::OllamaClient;

use thiserror::Error;

/// Outcome of model discovery. Discovery never fails: a backend that cannot
/// be reached, answers with an error, or lists no models resolves to the
/// configured fallback id instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModelDiscovery {
    /// First model name reported by the backend's tag listing.
    Live(String),
    /// Configured fallback id.
    Fallback(String),
}

impl ModelDiscovery {
    pub fn name(&self) -> &str {
        match self {
            ModelDiscovery::Live(name) | ModelDiscovery::Fallback(name) => name,
        }
    }

    pub fn into_name(self) -> String {
        match self {
            ModelDiscovery::Live(name) | ModelDiscovery::Fallback(name) => name,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, ModelDiscovery::Live(_))
    }
}

#[derive(Debug, Error)]
pub enum BackendError {
    /// Non-success status from the backend, with the raw response body.
    #[error("Ollama error: {status}")]
    Status { status: u16, body: String },
    /// Transport-level failure: timeout, connection refused, malformed body.
    #[error("{0}")]
    Transport(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        BackendError::Transport(err.to_string())
    }
}

/// One completed generation. Built per request and returned to the caller;
/// nothing is retained server-side.
#[derive(Clone, Debug)]
pub struct GenerationResult {
    pub response_text: String,
    pub model_name: String,
    pub processing_time_seconds: f64,
    pub timestamp: String,
}
