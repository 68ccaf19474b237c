//! The LR(1) parser: table construction plus the shift-reduce driver.
//!
//! [`Lr1Parser`] bundles the grammar, the automaton built from it, the
//! token-to-terminal map, and the driver configuration. Construction is
//! eager and runs once; [`Lr1Parser::parse`] takes `&self` and owns no
//! mutable state, so one parser can serve any number of parses, concurrent
//! ones included.
//!
//! Construction never fails outright. A grammar that cannot produce usable
//! tables yields an empty automaton, and parsing degrades to pre-pass
//! validation only.

mod config;
mod driver;
mod symbols;
mod synth;
mod table;

pub use config::ParserConfig;
pub use table::{Action, Automaton, Conflict, ItemSet, Lr1Item};

use crate::error::ParseResult;
use crate::grammar::{Grammar, GrammarSymbol};
use crate::token::{Token, TokenKind};
use symbols::SymbolMap;

/// A ready-to-use parser for the built-in C-like language grammar.
pub struct Lr1Parser {
    grammar: Grammar,
    automaton: Automaton,
    symbols: SymbolMap,
    config: ParserConfig,
}

impl Lr1Parser {
    /// Parser for the built-in language grammar with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Parser for the built-in language grammar with a custom configuration.
    #[must_use]
    pub fn with_config(config: ParserConfig) -> Self {
        match Grammar::mini_c() {
            Ok(grammar) => Self::from_grammar(grammar, config),
            Err(error) => {
                tracing::error!(%error, "grammar construction failed; syntax analysis disabled");
                let grammar = Grammar::new(
                    GrammarSymbol::non_terminal("Program'"),
                    GrammarSymbol::terminal("$", TokenKind::Eof),
                );
                Self::from_grammar(grammar, config)
            }
        }
    }

    /// Build a parser from an explicit grammar. The grammar must already have
    /// its FIRST/FOLLOW tables derived (see [`Grammar::compute_sets`]).
    #[must_use]
    pub fn from_grammar(grammar: Grammar, config: ParserConfig) -> Self {
        let automaton = Automaton::build(&grammar);
        for conflict in automaton.conflicts() {
            tracing::warn!(%conflict, "parse table conflict");
        }
        if automaton.is_empty() {
            tracing::warn!("parse tables are empty; syntax analysis will be skipped");
        } else {
            tracing::debug!(
                states = automaton.state_count(),
                productions = grammar.production_count(),
                "parse tables ready"
            );
        }
        let symbols = SymbolMap::new(&grammar);
        Self {
            grammar,
            automaton,
            symbols,
            config,
        }
    }

    /// Run the shift-reduce algorithm over a token sequence.
    ///
    /// Always returns a result: errors are collected, recovery skips one
    /// token at a time, and an empty automaton reduces the call to pre-pass
    /// validation.
    pub fn parse(&self, tokens: &[Token]) -> ParseResult {
        driver::run(
            &self.grammar,
            &self.automaton,
            &self.symbols,
            &self.config,
            tokens,
        )
    }

    #[must_use]
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    #[must_use]
    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    /// Conflicts recorded while the tables were built.
    #[must_use]
    pub fn conflicts(&self) -> &[Conflict] {
        self.automaton.conflicts()
    }
}

impl Default for Lr1Parser {
    fn default() -> Self {
        Self::new()
    }
}
