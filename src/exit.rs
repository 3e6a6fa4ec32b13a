/// Process exit codes following the BSD sysexits convention
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Code {
    /// Successful termination
    Ok = 0,
    /// Command line usage error
    Usage = 64,
    /// Input data was incorrect
    DataErr = 65,
    /// Internal software error
    Software = 70,
    /// An I/O operation failed
    IoErr = 74,
}

/// Terminates the process with the given code
pub fn exit(code: Code) -> ! {
    std::process::exit(code as i32)
}
