pub mod diagnostic_engine;
pub mod symbol_table;

pub use diagnostic_engine::{Diagnostic, DiagnosticEngine};
pub use symbol_table::{FunctionSignature, Symbol, SymbolKind, SymbolTable};
