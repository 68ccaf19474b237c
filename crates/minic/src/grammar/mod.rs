//! Grammar definition: symbols, productions, and derived set queries.
//!
//! A [`Grammar`] owns the production list, the augmented start symbol, the
//! terminal and non-terminal sets, and the FIRST/FOLLOW tables derived from
//! them. Construction is eager and happens once; after [`Grammar::compute_sets`]
//! the grammar is read-only and can be shared freely across parses.
//!
//! Symbol sets and derived tables live in ordered collections so that every
//! iteration downstream (closure expansion, transition discovery, table
//! population) is deterministic regardless of hasher seeds.

pub mod analysis;
mod lang;

pub use analysis::FirstSet;

use crate::token::TokenKind;
use compact_str::CompactString;
use smallvec::SmallVec;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use thiserror::Error;

/// Whether a symbol is matched by the scanner or expanded by productions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SymbolKind {
    /// Matched by exactly one lexical category.
    Terminal(TokenKind),
    /// Expanded via productions.
    NonTerminal,
}

/// A grammar symbol. Identity and ordering cover both the name and the kind,
/// including a terminal's lexical category, so two symbols that merely share
/// a name never collapse into one.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GrammarSymbol {
    name: CompactString,
    kind: SymbolKind,
}

impl GrammarSymbol {
    #[must_use]
    pub fn terminal(name: impl Into<CompactString>, category: TokenKind) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::Terminal(category),
        }
    }

    #[must_use]
    pub fn non_terminal(name: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::NonTerminal,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> SymbolKind {
        self.kind
    }

    /// The lexical category a terminal matches; `None` for non-terminals.
    #[must_use]
    pub const fn token_kind(&self) -> Option<TokenKind> {
        match self.kind {
            SymbolKind::Terminal(category) => Some(category),
            SymbolKind::NonTerminal => None,
        }
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self.kind, SymbolKind::Terminal(_))
    }

    #[must_use]
    pub const fn is_non_terminal(&self) -> bool {
        matches!(self.kind, SymbolKind::NonTerminal)
    }
}

impl fmt::Display for GrammarSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A production rule `lhs → rhs`, with a dense id assigned at registration.
///
/// The id is the sole encoding used by reduce actions, so productions are
/// immutable once the grammar is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    pub lhs: GrammarSymbol,
    pub rhs: SmallVec<[GrammarSymbol; 4]>,
    pub id: usize,
}

impl Production {
    /// Number of symbols on the right-hand side (zero for an ε production).
    #[must_use]
    pub fn arity(&self) -> usize {
        self.rhs.len()
    }
}

/// Failures while deriving FIRST/FOLLOW tables. These indicate a malformed
/// grammar rather than bad input, and callers degrade to skipping syntax
/// analysis instead of propagating a panic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("FIRST sets failed to converge after {passes} passes")]
    FirstDiverged { passes: usize },

    #[error("FOLLOW sets failed to converge after {passes} passes")]
    FollowDiverged { passes: usize },
}

/// A context-free grammar plus its derived FIRST/FOLLOW tables.
#[derive(Debug, Clone)]
pub struct Grammar {
    productions: Vec<Production>,
    start: GrammarSymbol,
    eof: GrammarSymbol,
    terminals: BTreeSet<GrammarSymbol>,
    non_terminals: BTreeSet<GrammarSymbol>,
    pub(crate) first: BTreeMap<GrammarSymbol, FirstSet>,
    pub(crate) follow: BTreeMap<GrammarSymbol, BTreeSet<GrammarSymbol>>,
}

impl Grammar {
    /// Create an empty grammar with the given (augmented) start symbol and
    /// end-of-input terminal. Both are registered immediately.
    #[must_use]
    pub fn new(start: GrammarSymbol, eof: GrammarSymbol) -> Self {
        let mut terminals = BTreeSet::new();
        terminals.insert(eof.clone());
        let mut non_terminals = BTreeSet::new();
        non_terminals.insert(start.clone());
        Self {
            productions: Vec::new(),
            start,
            eof,
            terminals,
            non_terminals,
            first: BTreeMap::new(),
            follow: BTreeMap::new(),
        }
    }

    /// Register a terminal and hand back its symbol.
    pub fn add_terminal(&mut self, name: &str, category: TokenKind) -> GrammarSymbol {
        let symbol = GrammarSymbol::terminal(name, category);
        self.terminals.insert(symbol.clone());
        symbol
    }

    /// Register a non-terminal and hand back its symbol.
    pub fn add_non_terminal(&mut self, name: &str) -> GrammarSymbol {
        let symbol = GrammarSymbol::non_terminal(name);
        self.non_terminals.insert(symbol.clone());
        symbol
    }

    /// Append a production and assign it the next dense id.
    ///
    /// Right-hand-side symbols are expected to be registered terminals or
    /// non-terminals; nothing enforces that here.
    pub fn add_production(
        &mut self,
        lhs: GrammarSymbol,
        rhs: impl IntoIterator<Item = GrammarSymbol>,
    ) -> usize {
        let id = self.productions.len();
        self.productions.push(Production {
            lhs,
            rhs: rhs.into_iter().collect(),
            id,
        });
        id
    }

    /// Derive the FIRST and FOLLOW tables. Idempotent: calling it again on a
    /// converged grammar recomputes identical sets.
    pub fn compute_sets(&mut self) -> Result<(), GrammarError> {
        self.compute_first_sets()?;
        self.compute_follow_sets()
    }

    #[must_use]
    pub fn production(&self, id: usize) -> Option<&Production> {
        self.productions.get(id)
    }

    #[must_use]
    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    #[must_use]
    pub fn production_count(&self) -> usize {
        self.productions.len()
    }

    /// The augmented start symbol.
    #[must_use]
    pub fn start_symbol(&self) -> &GrammarSymbol {
        &self.start
    }

    /// The end-of-input terminal.
    #[must_use]
    pub fn eof_symbol(&self) -> &GrammarSymbol {
        &self.eof
    }

    #[must_use]
    pub fn is_terminal(&self, symbol: &GrammarSymbol) -> bool {
        self.terminals.contains(symbol)
    }

    #[must_use]
    pub fn is_non_terminal(&self, symbol: &GrammarSymbol) -> bool {
        self.non_terminals.contains(symbol)
    }

    pub fn terminals(&self) -> impl Iterator<Item = &GrammarSymbol> {
        self.terminals.iter()
    }

    pub fn non_terminals(&self) -> impl Iterator<Item = &GrammarSymbol> {
        self.non_terminals.iter()
    }

    /// All registered symbols, terminals first, in deterministic order.
    pub fn symbols(&self) -> impl Iterator<Item = &GrammarSymbol> {
        self.terminals.iter().chain(self.non_terminals.iter())
    }

    /// FIRST set of a single symbol. Populated after [`Self::compute_sets`].
    #[must_use]
    pub fn first_of(&self, symbol: &GrammarSymbol) -> Option<&FirstSet> {
        self.first.get(symbol)
    }

    /// FOLLOW set of a non-terminal. Populated after [`Self::compute_sets`].
    #[must_use]
    pub fn follow_of(&self, symbol: &GrammarSymbol) -> Option<&BTreeSet<GrammarSymbol>> {
        self.follow.get(symbol)
    }
}
