pub mod cli;
pub mod compiler;
pub mod error;
pub mod exit;
pub mod stages;
