//! Well-known context keys used by the compiler pipeline.

/// Input source text consumed by the lexer
pub const SOURCE_TEXT: &str = "source_text";
/// Token stream produced by the lexer
pub const TOKENS: &str = "tokens";
/// AST produced by the parser, annotated in place by the type checker
pub const AST: &str = "ast";
/// Flag raised by the type checker once the AST carries types
pub const AST_TYPED: &str = "ast_typed";
/// Generated output produced by the code generator
pub const OUTPUT_CODE: &str = "output_code";
/// Advisory flag; when raised, execution stops before the next stage
pub const INTERRUPTED: &str = "interrupted";
