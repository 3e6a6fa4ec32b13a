use minic_frontend::TokenKind;
use minic_frontend::lexer::tokenize;

#[test]
fn comments_are_equivalent_to_whitespace_modulo_positions() {
    let with_comment = tokenize("a  b /*c*/  d");
    let without = tokenize("a b d");

    let left: Vec<_> = with_comment
        .iter()
        .map(|token| (token.kind, token.lexeme.clone()))
        .collect();
    let right: Vec<_> = without
        .iter()
        .map(|token| (token.kind, token.lexeme.clone()))
        .collect();
    assert_eq!(left, right);
}

#[test]
fn line_comments_run_to_end_of_line() {
    let tokens = tokenize("var x = 1; // trailing words ; { }\nvar y = 2;");
    let identifiers: Vec<_> = tokens
        .iter()
        .filter(|token| token.kind == TokenKind::Identifier)
        .map(|token| token.lexeme.as_str())
        .collect();
    assert_eq!(identifiers, vec!["x", "y"]);
}

#[test]
fn block_comments_may_span_lines() {
    let tokens = tokenize("a /* one\n   two\n   three */ b");
    assert_eq!(tokens[0].lexeme, "a");
    assert_eq!(tokens[1].lexeme, "b");
    // Line counting continues inside the comment.
    assert_eq!(tokens[1].line, 3);
}

#[test]
fn block_comments_do_not_nest() {
    // The first `*/` closes the comment; the rest is ordinary input.
    let tokens = tokenize("/* a /* b */ c */");
    let kinds: Vec<_> = tokens.iter().map(|token| token.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Eof,
        ]
    );
    assert_eq!(tokens[0].lexeme, "c");
}

#[test]
fn unterminated_block_comment_swallows_the_rest() {
    let tokens = tokenize("a /* never closed");
    assert_eq!(tokens[0].lexeme, "a");
    assert_eq!(tokens[1].kind, TokenKind::Eof);
}

#[test]
fn slash_alone_is_division() {
    let tokens = tokenize("a / b");
    assert_eq!(tokens[1].kind, TokenKind::Slash);
}
