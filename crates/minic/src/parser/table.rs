//! Canonical LR(1) automaton and ACTION/GOTO table construction.
//!
//! States are item sets compared for structural equality: two states with
//! identical items (production, dot, full lookahead symbol) are the same
//! state. This is canonical LR(1) identification, not LALR core merging.
//! Lookaheads always compare as full symbols, name and terminal category
//! both, so same-named symbols from different categories never merge.
//!
//! Conflicts do not abort construction. A shift/reduce collision keeps the
//! shift, a reduce/reduce collision keeps the first-assigned production, and
//! both are recorded as warnings for the caller.

use crate::grammar::{Grammar, GrammarSymbol, Production};
use compact_str::CompactString;
use hashbrown::HashMap;
use smallvec::SmallVec;
use std::collections::BTreeSet;
use thiserror::Error;

/// One parse action. Absence of an entry in the ACTION table is the error
/// case, handled by the driver's recovery path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Consume the token and move to the given state.
    Shift(usize),
    /// Collapse a completed right-hand side of the given production.
    Reduce(usize),
    /// Parse finished successfully.
    Accept,
}

/// An LR(1) item: a production with a dot marking progress plus one
/// lookahead terminal. Ordering covers all three fields.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Lr1Item {
    pub production: usize,
    pub dot: usize,
    pub lookahead: GrammarSymbol,
}

/// A deduplicated, deterministically ordered set of items.
pub type ItemSet = BTreeSet<Lr1Item>;

/// Table construction conflict, surfaced as a warning rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Conflict {
    #[error("shift/reduce conflict in state {state} on `{symbol}` (preferring shift)")]
    ShiftReduce { state: usize, symbol: CompactString },

    #[error(
        "reduce/reduce conflict in state {state} on `{lookahead}` \
         (keeping production {kept}, dropping {dropped})"
    )]
    ReduceReduce {
        state: usize,
        lookahead: CompactString,
        kept: usize,
        dropped: usize,
    },
}

type ActionTable = HashMap<(usize, GrammarSymbol), Action, ahash::RandomState>;
type GotoTable = HashMap<(usize, GrammarSymbol), usize, ahash::RandomState>;

/// The canonical LR(1) collection with its derived ACTION/GOTO tables.
/// Built once, read-only during parsing.
#[derive(Debug, Default)]
pub struct Automaton {
    states: Vec<ItemSet>,
    actions: ActionTable,
    gotos: GotoTable,
    conflicts: Vec<Conflict>,
}

impl Automaton {
    /// Build the canonical collection and tables for a grammar.
    ///
    /// A grammar with no productions, or one whose initial closure comes out
    /// empty, yields an automaton with zero states; callers treat that as
    /// "skip syntax analysis".
    #[must_use]
    pub fn build(grammar: &Grammar) -> Self {
        TableBuilder::new(grammar).build()
    }

    /// Number of states in the canonical collection.
    #[must_use]
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// True when construction produced no usable states.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// ACTION lookup; `None` means no action is defined.
    #[must_use]
    pub fn action(&self, state: usize, symbol: &GrammarSymbol) -> Option<Action> {
        self.actions.get(&(state, symbol.clone())).copied()
    }

    /// GOTO lookup for a non-terminal.
    #[must_use]
    pub fn goto_target(&self, state: usize, symbol: &GrammarSymbol) -> Option<usize> {
        self.gotos.get(&(state, symbol.clone())).copied()
    }

    /// Conflicts recorded during construction, in discovery order.
    #[must_use]
    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    fn record_shift(&mut self, state: usize, symbol: &GrammarSymbol, target: usize) {
        let key = (state, symbol.clone());
        match self.actions.get(&key).copied() {
            Some(Action::Reduce(_)) => {
                self.conflicts.push(Conflict::ShiftReduce {
                    state,
                    symbol: symbol.name().into(),
                });
                self.actions.insert(key, Action::Shift(target));
            }
            Some(_) => {}
            None => {
                self.actions.insert(key, Action::Shift(target));
            }
        }
    }

    fn record_reduce(&mut self, state: usize, lookahead: &GrammarSymbol, production: usize) {
        let key = (state, lookahead.clone());
        match self.actions.get(&key).copied() {
            Some(Action::Shift(_)) => {
                // Existing shift wins over a new reduce.
                self.conflicts.push(Conflict::ShiftReduce {
                    state,
                    symbol: lookahead.name().into(),
                });
            }
            Some(Action::Reduce(kept)) if kept != production => {
                // First-assigned production wins.
                self.conflicts.push(Conflict::ReduceReduce {
                    state,
                    lookahead: lookahead.name().into(),
                    kept,
                    dropped: production,
                });
            }
            Some(_) => {}
            None => {
                self.actions.insert(key, Action::Reduce(production));
            }
        }
    }
}

/// Construction context: the grammar plus a productions-by-lhs index so the
/// closure loop does not rescan the whole production list per item.
struct TableBuilder<'g> {
    grammar: &'g Grammar,
    by_lhs: HashMap<GrammarSymbol, SmallVec<[usize; 8]>, ahash::RandomState>,
}

impl<'g> TableBuilder<'g> {
    fn new(grammar: &'g Grammar) -> Self {
        let mut by_lhs: HashMap<GrammarSymbol, SmallVec<[usize; 8]>, ahash::RandomState> =
            HashMap::default();
        for production in grammar.productions() {
            by_lhs
                .entry(production.lhs.clone())
                .or_default()
                .push(production.id);
        }
        Self { grammar, by_lhs }
    }

    fn build(self) -> Automaton {
        let mut automaton = Automaton::default();
        if self.grammar.production_count() == 0 {
            return automaton;
        }

        let start_item = Lr1Item {
            production: 0,
            dot: 0,
            lookahead: self.grammar.eof_symbol().clone(),
        };
        let mut initial = ItemSet::new();
        initial.insert(start_item);
        let state0 = self.closure(initial);
        if state0.is_empty() {
            return automaton;
        }

        let mut index: HashMap<ItemSet, usize, ahash::RandomState> = HashMap::default();
        index.insert(state0.clone(), 0);
        automaton.states.push(state0);

        // Discovery-order worklist: states appended to the list drive
        // further iteration.
        let mut state_id = 0;
        while state_id < automaton.states.len() {
            let state = automaton.states[state_id].clone();

            // Distinct symbols right of a dot, in deterministic order.
            let mut after_dot: BTreeSet<&GrammarSymbol> = BTreeSet::new();
            for item in &state {
                if let Some(symbol) = self.symbol_after_dot(item) {
                    after_dot.insert(symbol);
                }
            }

            for symbol in after_dot {
                let target = self.goto_state(&state, symbol);
                if target.is_empty() {
                    continue;
                }
                let target_id = match index.get(&target) {
                    Some(&existing) => existing,
                    None => {
                        let fresh = automaton.states.len();
                        index.insert(target.clone(), fresh);
                        automaton.states.push(target);
                        fresh
                    }
                };
                if self.grammar.is_terminal(symbol) {
                    automaton.record_shift(state_id, symbol, target_id);
                } else {
                    automaton
                        .gotos
                        .insert((state_id, symbol.clone()), target_id);
                }
            }

            for item in &state {
                let Some(production) = self.grammar.production(item.production) else {
                    continue;
                };
                if item.dot < production.rhs.len() {
                    continue;
                }
                if production.lhs == *self.grammar.start_symbol() {
                    automaton
                        .actions
                        .insert((state_id, item.lookahead.clone()), Action::Accept);
                } else {
                    automaton.record_reduce(state_id, &item.lookahead, item.production);
                }
            }

            state_id += 1;
        }

        automaton
    }

    /// Expand an item set to its closure.
    ///
    /// For each `[A → α · B β, a]` with B a non-terminal and each production
    /// `B → γ`, add `[B → · γ, b]` for every terminal b in FIRST(β a). Each
    /// item is processed exactly once off a pending queue; derived items
    /// depend only on the item itself, so one visit per item reaches the
    /// fixed point.
    fn closure(&self, items: ItemSet) -> ItemSet {
        let mut result = items.clone();
        let mut pending: Vec<Lr1Item> = items.into_iter().collect();

        while let Some(item) = pending.pop() {
            let Some(production) = self.grammar.production(item.production) else {
                continue;
            };
            let Some(next_symbol) = production.rhs.get(item.dot) else {
                continue;
            };
            if !self.grammar.is_non_terminal(next_symbol) {
                continue;
            }

            // FIRST(β a): β strictly after the dot symbol, then the item's
            // own lookahead when β is nullable. The lookahead is a terminal,
            // so ε never appears here.
            let beta = &production.rhs[item.dot + 1..];
            let first_beta = self.grammar.first_of_sequence(beta);

            let Some(candidates) = self.by_lhs.get(next_symbol) else {
                continue;
            };
            for &candidate in candidates {
                let mut push = |lookahead: &GrammarSymbol| {
                    let derived = Lr1Item {
                        production: candidate,
                        dot: 0,
                        lookahead: lookahead.clone(),
                    };
                    if result.insert(derived.clone()) {
                        pending.push(derived);
                    }
                };
                for lookahead in first_beta.terminals() {
                    push(lookahead);
                }
                if first_beta.is_nullable() {
                    push(&item.lookahead);
                }
            }
        }

        result
    }

    /// Items reachable from `state` by moving the dot over `symbol`,
    /// closed. An empty result means no transition.
    fn goto_state(&self, state: &ItemSet, symbol: &GrammarSymbol) -> ItemSet {
        let mut moved = ItemSet::new();
        for item in state {
            if self.symbol_after_dot(item) == Some(symbol) {
                moved.insert(Lr1Item {
                    production: item.production,
                    dot: item.dot + 1,
                    lookahead: item.lookahead.clone(),
                });
            }
        }
        if moved.is_empty() {
            moved
        } else {
            self.closure(moved)
        }
    }

    fn symbol_after_dot(&self, item: &Lr1Item) -> Option<&'g GrammarSymbol> {
        let grammar: &'g Grammar = self.grammar;
        let production: &'g Production = grammar.production(item.production)?;
        production.rhs.get(item.dot)
    }
}
