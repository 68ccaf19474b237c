//! Token-to-terminal mapping.
//!
//! One immutable map, built from the grammar's terminal set when the parser
//! is constructed and threaded into the driver as a value. Any lexical
//! category the grammar does not cover maps to a distinguished ERROR symbol
//! that no state has an action for, which routes such tokens into the
//! driver's recovery path.

use crate::grammar::{Grammar, GrammarSymbol};
use crate::token::{Token, TokenKind};
use hashbrown::HashMap;

#[derive(Debug, Clone)]
pub(crate) struct SymbolMap {
    by_category: HashMap<TokenKind, GrammarSymbol, ahash::RandomState>,
    error: GrammarSymbol,
}

impl SymbolMap {
    pub(crate) fn new(grammar: &Grammar) -> Self {
        let mut by_category: HashMap<TokenKind, GrammarSymbol, ahash::RandomState> =
            HashMap::default();
        for terminal in grammar.terminals() {
            if let Some(category) = terminal.token_kind() {
                by_category.entry(category).or_insert_with(|| terminal.clone());
            }
        }
        Self {
            by_category,
            error: GrammarSymbol::terminal("ERROR", TokenKind::Error),
        }
    }

    /// The terminal a token shifts as, or the ERROR symbol when its category
    /// has no grammar mapping.
    pub(crate) fn symbol_for(&self, token: &Token) -> &GrammarSymbol {
        self.by_category.get(&token.kind).unwrap_or(&self.error)
    }
}
