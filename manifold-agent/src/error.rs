use thiserror::Error;

/// Error surface for tool handlers.
///
/// Never crosses [`crate::Dispatcher::execute`]; the dispatcher turns every
/// variant into an `{"error": "<message>"}` object.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("invalid parameters: {0}")]
    InvalidParams(#[from] serde_json::Error),

    #[error("render error: {0}")]
    Render(#[from] manifold_renderer::RenderError),

    #[error("detect error: {0}")]
    Detect(#[from] manifold_detector::DetectError),

    #[error("failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid namespace name '{0}'")]
    InvalidName(String),

    #[error("invalid filter pattern: {0}")]
    Glob(#[from] globset::Error),
}
