//! # minic
//!
//! Syntax analysis core for a small C-like language: a grammar engine with
//! FIRST/FOLLOW computation, a canonical LR(1) automaton builder, and a
//! resilient shift-reduce parser that synthesizes a typed AST while
//! collecting line-accurate errors.
//!
//! The crate consumes a token sequence from an external scanner and exposes
//! the parsed tree plus a structured error list; lexing, symbol tables, and
//! repair suggestions live elsewhere.
//!
//! ## Quick start
//!
//! ```
//! use minic::{Lr1Parser, SourcePos, Token, TokenKind};
//!
//! let parser = Lr1Parser::new();
//! let tokens = [
//!     Token::new(TokenKind::IntKw, "int", SourcePos::new(1, 1)),
//!     Token::new(TokenKind::Identifier, "x", SourcePos::new(1, 5)),
//!     Token::new(TokenKind::Semicolon, ";", SourcePos::new(1, 6)),
//!     Token::eof(SourcePos::new(1, 7)),
//! ];
//!
//! let result = parser.parse(&tokens);
//! assert!(result.success);
//! assert!(result.errors.is_empty());
//!
//! let ast = result.ast.expect("accepted parse produces a tree");
//! assert_eq!(ast.children.len(), 1);
//! ```
//!
//! ## Error recovery
//!
//! The driver never aborts. Unexpected tokens are reported and skipped one
//! at a time (panic-mode recovery) up to a configurable cap, lexically
//! erroneous tokens are surfaced before the automaton runs, and a missing
//! end-of-input token is reported and synthesized. The result always carries
//! whatever tree and errors were accumulated.
//!
//! ## Modules
//!
//! - [`grammar`]: symbols, productions, FIRST/FOLLOW analysis, and the
//!   built-in language grammar
//! - [`parser`]: LR(1) table construction and the shift-reduce driver
//! - [`ast`]: the synthesized syntax tree
//! - [`token`]: the token interface consumed from the scanner
//! - [`error`]: structured parse errors and the parse result

pub mod ast;
pub mod error;
pub mod grammar;
pub mod parser;
pub mod token;

pub use ast::{AstKind, AstNode};
pub use error::{ParseError, ParseResult, Severity};
pub use grammar::{FirstSet, Grammar, GrammarError, GrammarSymbol, Production, SymbolKind};
pub use parser::{Action, Automaton, Conflict, Lr1Parser, ParserConfig};
pub use token::{SourcePos, Token, TokenKind};
