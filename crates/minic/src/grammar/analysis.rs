//! FIRST and FOLLOW set computation.
//!
//! Both computations are plain fixed-point iterations: keep re-walking the
//! productions until no set grows. A pass cap proportional to the grammar
//! size guards against a malformed grammar looping forever; hitting it is
//! surfaced as a [`GrammarError`](super::GrammarError), never a panic.

use super::{Grammar, GrammarError, GrammarSymbol};
use std::collections::{BTreeMap, BTreeSet};

/// FIRST set of a symbol or symbol sequence: the terminals that can begin a
/// derived string, plus an explicit nullability marker standing in for ε.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FirstSet {
    terminals: BTreeSet<GrammarSymbol>,
    nullable: bool,
}

impl FirstSet {
    #[must_use]
    pub(crate) fn singleton(symbol: GrammarSymbol) -> Self {
        let mut terminals = BTreeSet::new();
        terminals.insert(symbol);
        Self {
            terminals,
            nullable: false,
        }
    }

    /// Terminals in the set, in deterministic order.
    pub fn terminals(&self) -> impl Iterator<Item = &GrammarSymbol> {
        self.terminals.iter()
    }

    #[must_use]
    pub fn contains(&self, symbol: &GrammarSymbol) -> bool {
        self.terminals.contains(symbol)
    }

    /// Whether the symbol (or sequence) can derive the empty string.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.terminals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terminals.is_empty()
    }

    /// Add every terminal of `other` (ε excluded by construction). Returns
    /// whether the set grew.
    fn absorb_terminals(&mut self, other: &Self) -> bool {
        let before = self.terminals.len();
        self.terminals
            .extend(other.terminals.iter().cloned());
        self.terminals.len() != before
    }

    fn mark_nullable(&mut self) -> bool {
        let grew = !self.nullable;
        self.nullable = true;
        grew
    }
}

impl Grammar {
    /// Upper bound on fixed-point passes before the computation is declared
    /// divergent. Each productive pass grows at least one set, and total set
    /// content is bounded by |productions| × |symbols|.
    fn pass_limit(&self) -> usize {
        let symbols = self.terminals().count() + self.non_terminals().count();
        self.production_count() * symbols + 8
    }

    /// Fixed-point FIRST computation.
    ///
    /// FIRST(terminal) = {terminal}. For `A → X1 … Xn`, FIRST(A) absorbs
    /// FIRST(Xi) \ {ε} left to right, stopping at the first non-nullable Xi;
    /// if every Xi is nullable (or the rhs is empty), FIRST(A) is nullable.
    pub(crate) fn compute_first_sets(&mut self) -> Result<(), GrammarError> {
        let mut first: BTreeMap<GrammarSymbol, FirstSet> = BTreeMap::new();
        for terminal in self.terminals() {
            first.insert(terminal.clone(), FirstSet::singleton(terminal.clone()));
        }
        for non_terminal in self.non_terminals() {
            first.entry(non_terminal.clone()).or_default();
        }

        let limit = self.pass_limit();
        let mut passes = 0usize;
        loop {
            let mut changed = false;
            for production in self.productions() {
                let mut update = FirstSet::default();
                let mut all_nullable = true;
                for symbol in &production.rhs {
                    match first.get(symbol) {
                        Some(symbol_first) => {
                            update.absorb_terminals(symbol_first);
                            if !symbol_first.is_nullable() {
                                all_nullable = false;
                                break;
                            }
                        }
                        // Unregistered symbol: treat as opaque and stop.
                        None => {
                            all_nullable = false;
                            break;
                        }
                    }
                }
                if all_nullable {
                    update.mark_nullable();
                }

                if let Some(lhs_first) = first.get_mut(&production.lhs) {
                    let mut grew = lhs_first.absorb_terminals(&update);
                    if update.is_nullable() {
                        grew |= lhs_first.mark_nullable();
                    }
                    changed |= grew;
                }
            }

            if !changed {
                break;
            }
            passes += 1;
            if passes > limit {
                return Err(GrammarError::FirstDiverged { passes });
            }
        }

        self.first = first;
        Ok(())
    }

    /// Fixed-point FOLLOW computation. Requires FIRST sets to be in place.
    ///
    /// FOLLOW(start) contains end-of-input. For every `A → α B β`, FOLLOW(B)
    /// absorbs FIRST(β) \ {ε}; when β is empty or nullable it also absorbs
    /// FOLLOW(A).
    pub(crate) fn compute_follow_sets(&mut self) -> Result<(), GrammarError> {
        let mut follow: BTreeMap<GrammarSymbol, BTreeSet<GrammarSymbol>> = BTreeMap::new();
        for non_terminal in self.non_terminals() {
            follow.entry(non_terminal.clone()).or_default();
        }
        if let Some(start_follow) = follow.get_mut(self.start_symbol()) {
            start_follow.insert(self.eof_symbol().clone());
        }

        let limit = self.pass_limit();
        let mut passes = 0usize;
        loop {
            let mut changed = false;
            for production in self.productions() {
                for (i, symbol) in production.rhs.iter().enumerate() {
                    if !self.is_non_terminal(symbol) {
                        continue;
                    }
                    let beta = &production.rhs[i + 1..];
                    let first_beta = self.first_of_sequence(beta);

                    let mut additions: BTreeSet<GrammarSymbol> =
                        first_beta.terminals().cloned().collect();
                    if first_beta.is_nullable() {
                        if let Some(lhs_follow) = follow.get(&production.lhs) {
                            additions.extend(lhs_follow.iter().cloned());
                        }
                    }

                    if let Some(symbol_follow) = follow.get_mut(symbol) {
                        let before = symbol_follow.len();
                        symbol_follow.extend(additions);
                        changed |= symbol_follow.len() != before;
                    }
                }
            }

            if !changed {
                break;
            }
            passes += 1;
            if passes > limit {
                return Err(GrammarError::FollowDiverged { passes });
            }
        }

        self.follow = follow;
        Ok(())
    }

    /// Concatenated FIRST of a symbol sequence, short-circuiting on the first
    /// non-nullable symbol. The result is nullable only when the whole
    /// sequence (including the empty sequence) is nullable.
    #[must_use]
    pub fn first_of_sequence(&self, symbols: &[GrammarSymbol]) -> FirstSet {
        let mut result = FirstSet::default();
        for symbol in symbols {
            match self.first.get(symbol) {
                Some(symbol_first) => {
                    result.absorb_terminals(symbol_first);
                    if !symbol_first.is_nullable() {
                        return result;
                    }
                }
                None => return result,
            }
        }
        result.mark_nullable();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    /// S → A B; A → a | ε; B → b
    fn toy_grammar() -> Grammar {
        let start = GrammarSymbol::non_terminal("S'");
        let eof = GrammarSymbol::terminal("$", TokenKind::Eof);
        let mut grammar = Grammar::new(start.clone(), eof);

        let a = grammar.add_terminal("a", TokenKind::Identifier);
        let b = grammar.add_terminal("b", TokenKind::Integer);
        let s = grammar.add_non_terminal("S");
        let nt_a = grammar.add_non_terminal("A");
        let nt_b = grammar.add_non_terminal("B");

        grammar.add_production(start, [s.clone()]);
        grammar.add_production(s, [nt_a.clone(), nt_b.clone()]);
        grammar.add_production(nt_a.clone(), [a]);
        grammar.add_production(nt_a, []);
        grammar.add_production(nt_b, [b]);
        grammar
    }

    #[test]
    fn first_sets_cover_nullable_prefixes() {
        let mut grammar = toy_grammar();
        grammar.compute_sets().expect("toy grammar converges");

        let a = GrammarSymbol::terminal("a", TokenKind::Identifier);
        let b = GrammarSymbol::terminal("b", TokenKind::Integer);

        let first_s = grammar
            .first_of(&GrammarSymbol::non_terminal("S"))
            .expect("S has a FIRST set");
        assert!(first_s.contains(&a));
        assert!(first_s.contains(&b));
        assert!(!first_s.is_nullable());

        let first_a = grammar
            .first_of(&GrammarSymbol::non_terminal("A"))
            .expect("A has a FIRST set");
        assert!(first_a.contains(&a));
        assert!(first_a.is_nullable());
    }

    #[test]
    fn follow_sets_respect_nullability() {
        let mut grammar = toy_grammar();
        grammar.compute_sets().expect("toy grammar converges");

        let b = GrammarSymbol::terminal("b", TokenKind::Integer);
        let eof = GrammarSymbol::terminal("$", TokenKind::Eof);

        let follow_a = grammar
            .follow_of(&GrammarSymbol::non_terminal("A"))
            .expect("A has a FOLLOW set");
        assert!(follow_a.contains(&b));

        // FOLLOW(start) always contains end-of-input.
        let follow_start = grammar
            .follow_of(grammar.start_symbol())
            .expect("start has a FOLLOW set");
        assert!(follow_start.contains(&eof));

        let follow_b = grammar
            .follow_of(&GrammarSymbol::non_terminal("B"))
            .expect("B has a FOLLOW set");
        assert!(follow_b.contains(&eof));
    }

    #[test]
    fn recomputation_is_idempotent() {
        let mut grammar = toy_grammar();
        grammar.compute_sets().expect("first run converges");
        let first = grammar.first.clone();
        let follow = grammar.follow.clone();

        grammar.compute_sets().expect("second run converges");
        assert_eq!(grammar.first, first);
        assert_eq!(grammar.follow, follow);
    }

    #[test]
    fn sequence_first_short_circuits() {
        let mut grammar = toy_grammar();
        grammar.compute_sets().expect("toy grammar converges");

        let a = GrammarSymbol::terminal("a", TokenKind::Identifier);
        let b = GrammarSymbol::terminal("b", TokenKind::Integer);
        let nt_a = GrammarSymbol::non_terminal("A");
        let nt_b = GrammarSymbol::non_terminal("B");

        // A B: A is nullable, so b leaks through; B is not, so the sequence
        // is not nullable.
        let seq = grammar.first_of_sequence(&[nt_a.clone(), nt_b]);
        assert!(seq.contains(&a));
        assert!(seq.contains(&b));
        assert!(!seq.is_nullable());

        // A alone is nullable.
        let seq = grammar.first_of_sequence(&[nt_a]);
        assert!(seq.is_nullable());

        // The empty sequence is nullable and empty.
        let seq = grammar.first_of_sequence(&[]);
        assert!(seq.is_nullable());
        assert!(seq.is_empty());
    }

    #[test]
    fn empty_grammar_converges_immediately() {
        let mut grammar = Grammar::new(
            GrammarSymbol::non_terminal("S'"),
            GrammarSymbol::terminal("$", TokenKind::Eof),
        );
        grammar.compute_sets().expect("nothing to iterate");
        assert_eq!(grammar.production_count(), 0);
    }
}
