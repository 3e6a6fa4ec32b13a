/// Error codes shared by every stage of the minic pipeline.
///
/// The same taxonomy is used by the execution engine, the compiler stages
/// and the command line front end. Each variant maps to a stable numeric
/// code; the minimal error-detail mode reports nothing but that number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// A required context entry was absent or held the wrong payload
    NullInput = 1,
    /// The input was present but ill-formed (lex, parse or type error)
    InvalidInput = 2,
    /// An allocation failed
    OutOfMemory = 3,
    /// A structural bound was hit (tokens, stages, middleware, entries)
    CapacityExceeded = 4,
    /// A context key exceeded the key-length bound
    KeyTooLong = 5,
    /// A name exceeded its length bound
    NameTooLong = 6,
    /// A looked-up context key was absent
    NotFound = 7,
    /// Arithmetic overflow in a size computation
    Overflow = 8,
    /// Mutation or execution was attempted during an active execution
    Reentrancy = 9,
    /// The context memory budget would be exceeded
    MemoryLimitExceeded = 10,
}

impl ErrorCode {
    /// Get the numeric error code as a u16
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get a short description of the error
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::NullInput => "Required input was absent",
            ErrorCode::InvalidInput => "Input was ill-formed",
            ErrorCode::OutOfMemory => "Allocation failed",
            ErrorCode::CapacityExceeded => "Structural bound exceeded",
            ErrorCode::KeyTooLong => "Context key too long",
            ErrorCode::NameTooLong => "Name too long",
            ErrorCode::NotFound => "Context key not found",
            ErrorCode::Overflow => "Arithmetic overflow in size computation",
            ErrorCode::Reentrancy => "Pipeline is already executing",
            ErrorCode::MemoryLimitExceeded => "Context memory budget exceeded",
        }
    }

    /// The message substituted for the real one in minimal error-detail mode
    pub fn minimal_message(&self) -> String {
        format!("Error code: {}", self.code())
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[E{:04}]", self.code())
    }
}
