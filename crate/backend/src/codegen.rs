use crate::c_emitter;
use crate::ir_emitter;
use minic_ir::ast::Program;

/// Output language selected for code generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// C99 source
    C,
    /// Human-readable SSA-like textual IR
    Ir,
}

/// Configuration record for the code generator
#[derive(Debug, Clone, Copy)]
pub struct CodegenOptions {
    /// Which emitter to run
    pub target: Target,
    /// Emit a header comment line at the top of the output
    pub emit_comments: bool,
    /// 4-space indentation; minimal output otherwise
    pub pretty_print: bool,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            target: Target::C,
            emit_comments: false,
            pretty_print: true,
        }
    }
}

/// Generates output code for a type-checked program.
///
/// Type violations are the checker's responsibility; the emitters assume
/// every expression carries its final type.
pub fn generate(program: &Program, options: &CodegenOptions) -> String {
    match options.target {
        Target::C => c_emitter::emit(program, options),
        Target::Ir => ir_emitter::emit(program, options),
    }
}
