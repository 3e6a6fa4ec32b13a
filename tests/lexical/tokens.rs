use minic_frontend::lexer::tokenize;
use minic_frontend::{Token, TokenKind};
use rstest::rstest;

fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|token| token.kind).collect()
}

#[test]
fn tokenizes_a_function_header() {
    let tokens = tokenize("func main() : int { }");
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Func,
            TokenKind::Identifier,
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::Colon,
            TokenKind::IntKw,
            TokenKind::LBrace,
            TokenKind::RBrace,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn stream_ends_with_exactly_one_eof() {
    let tokens = tokenize("var x = 1;");
    let eof_count = tokens
        .iter()
        .filter(|token| token.kind == TokenKind::Eof)
        .count();
    assert_eq!(eof_count, 1);
    assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
}

#[test]
fn empty_input_yields_only_eof() {
    let tokens = tokenize("");
    assert_eq!(kinds(&tokens), vec![TokenKind::Eof]);
    assert_eq!(tokens[0].line, 1);
    assert_eq!(tokens[0].column, 1);
}

#[rstest]
#[case("func", TokenKind::Func)]
#[case("var", TokenKind::Var)]
#[case("if", TokenKind::If)]
#[case("else", TokenKind::Else)]
#[case("while", TokenKind::While)]
#[case("return", TokenKind::Return)]
#[case("true", TokenKind::True)]
#[case("false", TokenKind::False)]
#[case("int", TokenKind::IntKw)]
#[case("bool", TokenKind::BoolKw)]
fn keywords_classify(#[case] lexeme: &str, #[case] expected: TokenKind) {
    let tokens = tokenize(lexeme);
    assert_eq!(tokens[0].kind, expected);
    assert_eq!(tokens[0].lexeme, lexeme);
}

#[rstest]
#[case("funcs")]
#[case("iff")]
#[case("_tmp")]
#[case("x")]
#[case("Return")]
#[case("int32")]
fn near_keywords_are_identifiers(#[case] lexeme: &str) {
    let tokens = tokenize(lexeme);
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
}

#[test]
fn identifiers_match_the_lexical_shape() {
    let tokens = tokenize("alpha _beta g4mma x_1");
    for token in tokens
        .iter()
        .filter(|token| token.kind == TokenKind::Identifier)
    {
        let mut chars = token.lexeme.chars();
        let first = chars.next().unwrap();
        assert!(first.is_ascii_alphabetic() || first == '_');
        assert!(chars.all(|c| c.is_ascii_alphanumeric() || c == '_'));
    }
}

#[rstest]
#[case("==", TokenKind::Eq)]
#[case("!=", TokenKind::Ne)]
#[case("<=", TokenKind::Le)]
#[case(">=", TokenKind::Ge)]
#[case("&&", TokenKind::And)]
#[case("||", TokenKind::Or)]
#[case("+", TokenKind::Plus)]
#[case("-", TokenKind::Minus)]
#[case("*", TokenKind::Star)]
#[case("/", TokenKind::Slash)]
#[case("%", TokenKind::Percent)]
#[case("<", TokenKind::Lt)]
#[case(">", TokenKind::Gt)]
#[case("!", TokenKind::Not)]
#[case("=", TokenKind::Assign)]
#[case(";", TokenKind::Semicolon)]
#[case(":", TokenKind::Colon)]
#[case(",", TokenKind::Comma)]
#[case("(", TokenKind::LParen)]
#[case(")", TokenKind::RParen)]
#[case("{", TokenKind::LBrace)]
#[case("}", TokenKind::RBrace)]
fn symbols_tokenize(#[case] lexeme: &str, #[case] expected: TokenKind) {
    let tokens = tokenize(lexeme);
    assert_eq!(tokens[0].kind, expected);
}

#[test]
fn two_char_operators_win_over_singles() {
    let tokens = tokenize("a<=b==c");
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Identifier,
            TokenKind::Le,
            TokenKind::Identifier,
            TokenKind::Eq,
            TokenKind::Identifier,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn integer_literals_carry_their_value() {
    let tokens = tokenize("42 0 1234567890");
    let values: Vec<i64> = tokens
        .iter()
        .filter(|token| token.kind == TokenKind::IntLiteral)
        .map(|token| token.value)
        .collect();
    assert_eq!(values, vec![42, 0, 1234567890]);
}

#[test]
fn positions_are_one_based_lines_and_columns() {
    let tokens = tokenize("var x\n  = 1;");
    assert_eq!((tokens[0].line, tokens[0].column), (1, 1)); // var
    assert_eq!((tokens[1].line, tokens[1].column), (1, 5)); // x
    assert_eq!((tokens[2].line, tokens[2].column), (2, 3)); // =
    assert_eq!((tokens[3].line, tokens[3].column), (2, 5)); // 1
    assert_eq!((tokens[4].line, tokens[4].column), (2, 6)); // ;
}

#[test]
fn eof_sits_at_the_input_tail() {
    let tokens = tokenize("a\nbb");
    let eof = tokens.last().unwrap();
    assert_eq!((eof.line, eof.column), (2, 3));
}
