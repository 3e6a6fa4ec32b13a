use minic_error::ErrorCode;

/// Error raised by engine operations outside stage execution
/// (context mutations, pipeline construction).
#[derive(Debug, Clone, thiserror::Error)]
#[error("{code} {message}")]
pub struct EngineError {
    /// The structured error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
}

impl EngineError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}
