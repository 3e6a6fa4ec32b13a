//! The four compiler stages, expressed against the execution engine.
//!
//! Each stage consumes and produces data only through well-known context
//! keys; the stages never call each other directly.

use minic_backend::CodegenOptions;
use minic_engine::{Context, Stage, StageOutcome, Value, keys};
use minic_error::ErrorCode;
use minic_frontend::{TokenKind, lexer, parser, type_checker};

/// Turns `source_text` into `tokens`
pub struct LexStage;

impl Stage for LexStage {
    fn name(&self) -> &str {
        "lexer"
    }

    fn run(&self, context: &Context) -> StageOutcome {
        let Ok(entry) = context.get(keys::SOURCE_TEXT) else {
            return StageOutcome::failure(
                ErrorCode::NullInput,
                "missing 'source_text' context entry",
            );
        };
        let Some(source) = entry.as_source() else {
            return StageOutcome::failure(
                ErrorCode::NullInput,
                "'source_text' does not hold source text",
            );
        };

        let tokens = lexer::tokenize(source);

        if tokens.len() > lexer::MAX_TOKENS {
            return StageOutcome::failure(
                ErrorCode::CapacityExceeded,
                format!(
                    "input produced {} tokens, the limit is {}",
                    tokens.len(),
                    lexer::MAX_TOKENS
                ),
            );
        }

        if let Some(bad) = tokens.iter().find(|token| token.kind == TokenKind::Error) {
            let message = if bad.lexeme.chars().count() == 1 {
                format!("Unexpected character '{}'", bad.lexeme)
            } else {
                format!("Invalid integer literal '{}'", bad.lexeme)
            };
            return StageOutcome::failure(ErrorCode::InvalidInput, message)
                .with_location(bad.location());
        }

        match context.set(keys::TOKENS, Value::Tokens(tokens)) {
            Ok(()) => StageOutcome::success(),
            Err(error) => error.into(),
        }
    }
}

/// Turns `tokens` into `ast`
pub struct ParseStage;

impl Stage for ParseStage {
    fn name(&self) -> &str {
        "parser"
    }

    fn run(&self, context: &Context) -> StageOutcome {
        let Ok(entry) = context.get(keys::TOKENS) else {
            return StageOutcome::failure(ErrorCode::NullInput, "missing 'tokens' context entry");
        };
        let Some(tokens) = entry.as_tokens() else {
            return StageOutcome::failure(
                ErrorCode::NullInput,
                "'tokens' does not hold a token stream",
            );
        };

        match parser::parse(tokens) {
            Ok(program) => match context.set(keys::AST, Value::Ast(program)) {
                Ok(()) => StageOutcome::success(),
                Err(error) => error.into(),
            },
            Err(error) => error.into(),
        }
    }
}

/// Annotates `ast` in place and raises the `ast_typed` flag
pub struct TypeCheckStage;

impl Stage for TypeCheckStage {
    fn name(&self) -> &str {
        "type_checker"
    }

    fn run(&self, context: &Context) -> StageOutcome {
        let checked = context.update(keys::AST, |value| match value.as_ast_mut() {
            Some(program) => Some(type_checker::check(program)),
            None => None,
        });

        match checked {
            Err(_) => StageOutcome::failure(ErrorCode::NullInput, "missing 'ast' context entry"),
            Ok(None) => {
                StageOutcome::failure(ErrorCode::NullInput, "'ast' does not hold a program")
            }
            Ok(Some(Err(error))) => error.into(),
            Ok(Some(Ok(()))) => match context.set(keys::AST_TYPED, Value::Flag(true)) {
                Ok(()) => StageOutcome::success(),
                Err(error) => error.into(),
            },
        }
    }
}

/// Turns the typed `ast` into `output_code`
pub struct CodegenStage {
    options: CodegenOptions,
}

impl CodegenStage {
    pub fn new(options: CodegenOptions) -> Self {
        Self { options }
    }
}

impl Stage for CodegenStage {
    fn name(&self) -> &str {
        "codegen"
    }

    fn run(&self, context: &Context) -> StageOutcome {
        if !context.is_flag_set(keys::AST_TYPED) {
            return StageOutcome::failure(
                ErrorCode::NullInput,
                "the AST has not been type checked",
            );
        }
        let Ok(entry) = context.get(keys::AST) else {
            return StageOutcome::failure(ErrorCode::NullInput, "missing 'ast' context entry");
        };
        let Some(program) = entry.as_ast() else {
            return StageOutcome::failure(ErrorCode::NullInput, "'ast' does not hold a program");
        };

        let output = minic_backend::generate(program, &self.options);

        match context.set(keys::OUTPUT_CODE, Value::Output(output)) {
            Ok(()) => StageOutcome::success(),
            Err(error) => error.into(),
        }
    }
}
