use crate::error_codes::ErrorCode;

/// An error produced by one of the compiler stages, carrying the stable
/// error code and the 1-based source position it refers to.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Error at line {line}, column {column}: {message}")]
pub struct CompilerError {
    /// The structured error code for this error
    pub code: ErrorCode,
    /// Error message describing the problem
    pub message: String,
    /// Line where the error occurred (1-based)
    pub line: usize,
    /// Column where the error occurred (1-based)
    pub column: usize,
}

impl CompilerError {
    pub fn new(code: ErrorCode, message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            code,
            message: message.into(),
            line,
            column,
        }
    }

    pub fn format(&self) -> String {
        self.to_string()
    }
}

pub type CompileResult<T> = Result<T, CompilerError>;

/// Replaces control characters in embedded text with `'?'` so that raw
/// source fragments cannot corrupt diagnostic output.
pub fn sanitize_message(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { '?' } else { c })
        .collect()
}
