use crate::token::{Token, TokenKind};

/// Hard bound on the number of tokens a single input may produce
pub const MAX_TOKENS: usize = 1 << 20;

/// Lexer state for tracking position during tokenization
struct LexerState<'a> {
    /// Iterator over source characters
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    /// Current line number (1-based)
    line: usize,
    /// Current column number (1-based), reset on newline
    column: usize,
    /// Tokens generated so far
    tokens: Vec<Token>,
}

impl<'a> LexerState<'a> {
    fn new(input: &'a str) -> Self {
        LexerState {
            chars: input.chars().peekable(),
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    /// Advances to the next character, updating line and column counters
    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next();
        match c {
            Some('\n') => {
                self.line += 1;
                self.column = 1;
            }
            Some(_) => self.column += 1,
            None => {}
        }
        c
    }

    /// Peeks at the next character without consuming it
    fn peek(&mut self) -> Option<&char> {
        self.chars.peek()
    }

    /// Adds a token whose first character sits at (line, column)
    fn add_token(&mut self, kind: TokenKind, lexeme: String, line: usize, column: usize) {
        self.tokens.push(Token::new(kind, lexeme, line, column));
    }

    /// Finishes tokenization, appending the final EOF token at the input tail
    fn finish(mut self) -> Vec<Token> {
        let (line, column) = (self.line, self.column);
        self.tokens
            .push(Token::new(TokenKind::Eof, String::new(), line, column));
        self.tokens
    }
}

/// Converts source text into a sequence of tokens ending in exactly one EOF
///
/// Unknown characters and out-of-range integer literals become `Error`
/// tokens; classifying them as a stage failure is the caller's concern.
///
/// ### Arguments
/// * `input` - The source code to tokenize
///
/// ### Returns
/// The token stream, terminated by a single EOF token
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut state = LexerState::new(input);

    while let Some(&c) = state.peek() {
        let (line, column) = (state.line, state.column);

        match c {
            c if c.is_whitespace() => {
                state.advance();
            }
            c if c.is_ascii_alphabetic() || c == '_' => handle_identifier(&mut state, line, column),
            c if c.is_ascii_digit() => handle_number(&mut state, line, column),
            '/' => handle_slash(&mut state, line, column),
            '=' => handle_two_char(&mut state, '=', TokenKind::Eq, TokenKind::Assign, line, column),
            '<' => handle_two_char(&mut state, '=', TokenKind::Le, TokenKind::Lt, line, column),
            '>' => handle_two_char(&mut state, '=', TokenKind::Ge, TokenKind::Gt, line, column),
            '!' => handle_two_char(&mut state, '=', TokenKind::Ne, TokenKind::Not, line, column),
            '&' => handle_pair_or_error(&mut state, '&', TokenKind::And, line, column),
            '|' => handle_pair_or_error(&mut state, '|', TokenKind::Or, line, column),
            '+' => handle_simple_token(&mut state, TokenKind::Plus, "+", line, column),
            '-' => handle_simple_token(&mut state, TokenKind::Minus, "-", line, column),
            '*' => handle_simple_token(&mut state, TokenKind::Star, "*", line, column),
            '%' => handle_simple_token(&mut state, TokenKind::Percent, "%", line, column),
            ';' => handle_simple_token(&mut state, TokenKind::Semicolon, ";", line, column),
            ':' => handle_simple_token(&mut state, TokenKind::Colon, ":", line, column),
            ',' => handle_simple_token(&mut state, TokenKind::Comma, ",", line, column),
            '(' => handle_simple_token(&mut state, TokenKind::LParen, "(", line, column),
            ')' => handle_simple_token(&mut state, TokenKind::RParen, ")", line, column),
            '{' => handle_simple_token(&mut state, TokenKind::LBrace, "{", line, column),
            '}' => handle_simple_token(&mut state, TokenKind::RBrace, "}", line, column),
            _ => handle_invalid_char(&mut state, line, column),
        }
    }

    state.finish()
}

/// Handles identifiers and keywords
fn handle_identifier(state: &mut LexerState, line: usize, column: usize) {
    let mut identifier = String::new();

    while let Some(&c) = state.peek() {
        if c.is_ascii_alphanumeric() || c == '_' {
            identifier.push(c);
            state.advance();
        } else {
            break;
        }
    }

    let kind = match identifier.as_str() {
        "func" => TokenKind::Func,
        "var" => TokenKind::Var,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "while" => TokenKind::While,
        "return" => TokenKind::Return,
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "int" => TokenKind::IntKw,
        "bool" => TokenKind::BoolKw,
        _ => TokenKind::Identifier,
    };

    state.add_token(kind, identifier, line, column);
}

/// Handles integer literals
///
/// A literal that does not fit a signed 64-bit value becomes an `Error`
/// token carrying the digit run as its lexeme.
fn handle_number(state: &mut LexerState, line: usize, column: usize) {
    let mut number = String::new();

    while let Some(&c) = state.peek() {
        if c.is_ascii_digit() {
            number.push(c);
            state.advance();
        } else {
            break;
        }
    }

    match number.parse::<i64>() {
        Ok(value) => state
            .tokens
            .push(Token::with_value(number, value, line, column)),
        Err(_) => state.add_token(TokenKind::Error, number, line, column),
    }
}

/// Handles simple one-character tokens
fn handle_simple_token(
    state: &mut LexerState,
    kind: TokenKind,
    lexeme: &str,
    line: usize,
    column: usize,
) {
    state.advance();
    state.add_token(kind, lexeme.to_string(), line, column);
}

/// Handles operators that form a longer token when followed by `=`
/// (or, generally, by `second`)
fn handle_two_char(
    state: &mut LexerState,
    second: char,
    double: TokenKind,
    single: TokenKind,
    line: usize,
    column: usize,
) {
    let first = state.advance().unwrap_or_default();
    if state.peek() == Some(&second) {
        state.advance();
        state.add_token(double, format!("{first}{second}"), line, column);
    } else {
        state.add_token(single, first.to_string(), line, column);
    }
}

/// Handles `&&` and `||`, whose single-character forms are not operators
fn handle_pair_or_error(
    state: &mut LexerState,
    expected: char,
    kind: TokenKind,
    line: usize,
    column: usize,
) {
    state.advance();
    if state.peek() == Some(&expected) {
        state.advance();
        state.add_token(kind, format!("{expected}{expected}"), line, column);
    } else {
        state.add_token(TokenKind::Error, expected.to_string(), line, column);
    }
}

/// Handles slash (divide or comment start)
fn handle_slash(state: &mut LexerState, line: usize, column: usize) {
    state.advance();

    if state.peek() == Some(&'/') {
        handle_line_comment(state);
    } else if state.peek() == Some(&'*') {
        handle_block_comment(state);
    } else {
        state.add_token(TokenKind::Slash, "/".to_string(), line, column);
    }
}

/// Skips a `//` comment up to and including the end of the line
fn handle_line_comment(state: &mut LexerState) {
    while let Some(&c) = state.peek() {
        state.advance();
        if c == '\n' {
            break;
        }
    }
}

/// Skips a `/* ... */` comment. Block comments do not nest: the first
/// `*/` terminates the comment. An unterminated comment runs to the end
/// of input.
fn handle_block_comment(state: &mut LexerState) {
    state.advance(); // consume the '*'

    while state.peek().is_some() {
        if state.peek() == Some(&'*') {
            state.advance();
            if state.peek() == Some(&'/') {
                state.advance();
                return;
            }
        } else {
            state.advance();
        }
    }
}

/// Handles characters with no meaning in the language
fn handle_invalid_char(state: &mut LexerState, line: usize, column: usize) {
    let invalid = state.advance().unwrap_or_default();
    state.add_token(TokenKind::Error, invalid.to_string(), line, column);
}
