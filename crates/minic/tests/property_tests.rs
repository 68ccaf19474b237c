//! Property tests: the driver must stay total and bounded on arbitrary
//! token soup.

use minic::parser::Lr1Parser;
use minic::token::{SourcePos, Token, TokenKind};
use proptest::prelude::*;
use std::sync::OnceLock;

fn parser() -> &'static Lr1Parser {
    static PARSER: OnceLock<Lr1Parser> = OnceLock::new();
    PARSER.get_or_init(Lr1Parser::new)
}

const KINDS: &[(TokenKind, &str)] = &[
    (TokenKind::Integer, "1"),
    (TokenKind::Float, "1.5"),
    (TokenKind::StringLit, "\"s\""),
    (TokenKind::Identifier, "x"),
    (TokenKind::IntKw, "int"),
    (TokenKind::VoidKw, "void"),
    (TokenKind::Var, "var"),
    (TokenKind::Const, "const"),
    (TokenKind::If, "if"),
    (TokenKind::Else, "else"),
    (TokenKind::While, "while"),
    (TokenKind::For, "for"),
    (TokenKind::Return, "return"),
    (TokenKind::True, "true"),
    (TokenKind::Assign, "="),
    (TokenKind::Equal, "=="),
    (TokenKind::Less, "<"),
    (TokenKind::AndAnd, "&&"),
    (TokenKind::Bang, "!"),
    (TokenKind::Plus, "+"),
    (TokenKind::Minus, "-"),
    (TokenKind::Star, "*"),
    (TokenKind::LParen, "("),
    (TokenKind::RParen, ")"),
    (TokenKind::LBrace, "{"),
    (TokenKind::RBrace, "}"),
    (TokenKind::Semicolon, ";"),
    (TokenKind::Comma, ","),
    (TokenKind::Dot, "."),
    (TokenKind::Newline, "\n"),
    (TokenKind::Eof, "$"),
    (TokenKind::Error, "@"),
];

fn arb_tokens() -> impl Strategy<Value = Vec<Token>> {
    proptest::collection::vec(proptest::sample::select(KINDS), 0..120).prop_map(|picks| {
        picks
            .into_iter()
            .enumerate()
            .map(|(i, (kind, text))| {
                let column = u32::try_from(i).unwrap_or(0) + 1;
                Token::new(kind, text, SourcePos::new(1, column))
            })
            .collect()
    })
}

proptest! {
    /// Arbitrary input never panics, and the error list is bounded by the
    /// pre-pass (one per token at worst), the recovery cap, and the two
    /// terminal diagnostics.
    #[test]
    fn driver_is_total_and_bounded(tokens in arb_tokens()) {
        let result = parser().parse(&tokens);
        prop_assert!(result.errors.len() <= tokens.len() + 52);
        prop_assert_eq!(result.success, result.errors.is_empty());
    }

    /// Parsing is a pure function of the input.
    #[test]
    fn parsing_is_deterministic(tokens in arb_tokens()) {
        let first = parser().parse(&tokens);
        let second = parser().parse(&tokens);
        prop_assert_eq!(first.errors, second.errors);
        prop_assert_eq!(first.ast, second.ast);
        prop_assert_eq!(first.success, second.success);
    }

    /// A clean parse implies a tree, and every error carries a 1-based
    /// position.
    #[test]
    fn positions_stay_one_based(tokens in arb_tokens()) {
        let result = parser().parse(&tokens);
        if result.success && !tokens.is_empty() {
            prop_assert!(result.ast.is_some());
        }
        for error in &result.errors {
            prop_assert!(error.line() >= 1);
            prop_assert!(error.column() >= 1);
        }
    }
}
