//! The shift-reduce driver.
//!
//! Runs the LR(1) algorithm over a token sequence with panic-mode recovery:
//! whenever no action is defined, exactly one input token is discarded and
//! scanning continues, up to the configured error cap. The driver always
//! returns a best-effort [`ParseResult`], never a panic.

use super::config::ParserConfig;
use super::symbols::SymbolMap;
use super::synth;
use super::table::{Action, Automaton};
use crate::ast::AstNode;
use crate::error::{ParseError, ParseResult};
use crate::grammar::Grammar;
use crate::token::Token;

pub(crate) fn run(
    grammar: &Grammar,
    automaton: &Automaton,
    symbols: &SymbolMap,
    config: &ParserConfig,
    tokens: &[Token],
) -> ParseResult {
    let mut errors = Vec::new();

    // Pre-pass: surface scanner-flagged tokens and withhold them from the
    // automaton, then make sure the sequence ends with end-of-input.
    let mut input: Vec<Token> = Vec::with_capacity(tokens.len() + 1);
    for token in tokens {
        if token.is_error() {
            errors.push(ParseError::InvalidToken {
                lexeme: token.text.clone(),
                pos: token.pos,
            });
        } else {
            input.push(token.clone());
        }
    }

    let missing_eof = tokens.last().is_some_and(|t| !t.is_eof());
    if missing_eof && config.require_eof {
        let pos = tokens.last().map(|t| t.pos).unwrap_or_default();
        errors.push(ParseError::MissingEof { pos });
    }
    if input.last().map_or(true, |t| !t.is_eof()) {
        let pos = input.last().map(|t| t.pos).unwrap_or_default();
        input.push(Token::eof(pos));
    }

    if automaton.is_empty() {
        let success = errors.is_empty();
        return ParseResult {
            ast: None,
            errors,
            success,
        };
    }

    let max_errors = config.max_errors.max(1);
    let mut state_stack: Vec<usize> = vec![0];
    let mut node_stack: Vec<AstNode> = Vec::new();
    let mut ast = None;
    let mut idx = 0usize;
    let mut error_count = 0usize;

    while idx < input.len() && error_count < max_errors {
        let state = state_stack.last().copied().unwrap_or(0);
        let token = &input[idx];
        let symbol = symbols.symbol_for(token);

        match automaton.action(state, symbol) {
            None => {
                errors.push(ParseError::UnexpectedToken {
                    lexeme: token.text.clone(),
                    pos: token.pos,
                });
                tracing::trace!(lexeme = %token.text, pos = %token.pos, "skipping token");
                idx += 1;
                error_count += 1;
            }

            Some(Action::Shift(next)) => {
                state_stack.push(next);
                node_stack.push(AstNode::leaf(token));
                idx += 1;
            }

            Some(Action::Reduce(production_id)) => {
                let Some(production) = grammar.production(production_id) else {
                    errors.push(ParseError::TableInconsistency {
                        detail: format!("invalid production id {production_id}").into(),
                        pos: token.pos,
                    });
                    idx += 1;
                    error_count += 1;
                    continue;
                };

                let arity = production.arity();
                let mut children = Vec::with_capacity(arity);
                for _ in 0..arity {
                    if let Some(node) = node_stack.pop() {
                        children.push(node);
                    }
                    if state_stack.len() > 1 {
                        state_stack.pop();
                    }
                }
                children.reverse();
                let node = synth::synthesize(production, children);

                let top = state_stack.last().copied().unwrap_or(0);
                match automaton.goto_target(top, &production.lhs) {
                    Some(next) => {
                        state_stack.push(next);
                        node_stack.push(node);
                    }
                    None => {
                        errors.push(ParseError::TableInconsistency {
                            detail: format!(
                                "missing GOTO entry for `{}` during reduce",
                                production.lhs.name()
                            )
                            .into(),
                            pos: token.pos,
                        });
                        node_stack.push(node);
                        idx += 1;
                        error_count += 1;
                    }
                }
            }

            Some(Action::Accept) => {
                ast = node_stack.pop();
                break;
            }
        }
    }

    if error_count >= max_errors {
        let pos = input.get(idx).map(|t| t.pos).unwrap_or_default();
        errors.push(ParseError::TooManyErrors { pos });
    }

    let success = errors.is_empty();
    ParseResult {
        ast,
        errors,
        success,
    }
}
