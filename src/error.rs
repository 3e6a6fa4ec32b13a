use crate::exit;

/// Errors surfaced by the command line front end
#[derive(Debug)]
pub enum CliError {
    /// Reading the input or writing the output failed
    Io { message: String },
    /// The command line was malformed (unknown target, missing file)
    Usage { message: String },
    /// Compilation failed; diagnostics were already reported
    Compile { errors: usize },
}

impl CliError {
    pub fn exit_code(&self) -> exit::Code {
        match self {
            CliError::Io { .. } => exit::Code::IoErr,
            CliError::Usage { .. } => exit::Code::Usage,
            CliError::Compile { .. } => exit::Code::DataErr,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Io { message } => write!(f, "I/O error: {}", message),
            CliError::Usage { message } => write!(f, "{}", message),
            CliError::Compile { errors } => {
                let noun = if *errors == 1 { "error" } else { "errors" };
                write!(f, "compilation failed with {} {}", errors, noun)
            }
        }
    }
}

impl std::error::Error for CliError {}

pub type CliResult<T> = Result<T, CliError>;
