//! Tests for the grammar engine: FIRST/FOLLOW fixed points and symbol
//! classification on the built-in language grammar.

use minic::grammar::{Grammar, GrammarSymbol};
use minic::token::TokenKind;

fn eof() -> GrammarSymbol {
    GrammarSymbol::terminal("$", TokenKind::Eof)
}

#[test]
fn follow_of_start_contains_end_of_input() {
    let grammar = Grammar::mini_c().expect("language grammar converges");

    let follow_start = grammar
        .follow_of(grammar.start_symbol())
        .expect("start has a FOLLOW set");
    assert!(follow_start.contains(&eof()));

    let follow_program = grammar
        .follow_of(&GrammarSymbol::non_terminal("Program"))
        .expect("Program has a FOLLOW set");
    assert!(follow_program.contains(&eof()));
}

#[test]
fn recomputation_reproduces_identical_sets() {
    let converged = Grammar::mini_c().expect("language grammar converges");
    let mut recomputed = converged.clone();
    recomputed.compute_sets().expect("second run converges");

    for symbol in converged.symbols() {
        assert_eq!(
            converged.first_of(symbol),
            recomputed.first_of(symbol),
            "FIRST({symbol}) changed on recomputation"
        );
        assert_eq!(
            converged.follow_of(symbol),
            recomputed.follow_of(symbol),
            "FOLLOW({symbol}) changed on recomputation"
        );
    }
}

#[test]
fn explicit_empty_alternative_makes_first_nullable() {
    let start = GrammarSymbol::non_terminal("S'");
    let mut grammar = Grammar::new(start.clone(), eof());
    let a = grammar.add_terminal("a", TokenKind::Identifier);
    let n = grammar.add_non_terminal("N");

    grammar.add_production(start, [n.clone()]);
    grammar.add_production(n.clone(), [a]);
    grammar.add_production(n.clone(), []);
    grammar.compute_sets().expect("small grammar converges");

    let first_n = grammar.first_of(&n).expect("N has a FIRST set");
    assert!(first_n.is_nullable());
    assert!(first_n.contains(&GrammarSymbol::terminal("a", TokenKind::Identifier)));
}

#[test]
fn expression_ladder_first_sets_agree() {
    let grammar = Grammar::mini_c().expect("language grammar converges");

    // Every level of the precedence ladder starts with the same primary
    // tokens.
    let factor_first = grammar
        .first_of(&GrammarSymbol::non_terminal("Factor"))
        .expect("Factor has a FIRST set");
    let expr_first = grammar
        .first_of(&GrammarSymbol::non_terminal("Expr"))
        .expect("Expr has a FIRST set");

    for terminal in factor_first.terminals() {
        assert!(
            expr_first.contains(terminal),
            "FIRST(Expr) misses {terminal}"
        );
    }
    assert_eq!(expr_first.len(), factor_first.len());
}

#[test]
fn production_ids_are_dense_and_stable() {
    let grammar = Grammar::mini_c().expect("language grammar converges");
    for (expected, production) in grammar.productions().iter().enumerate() {
        assert_eq!(production.id, expected);
        assert_eq!(grammar.production(expected).map(|p| p.id), Some(expected));
    }
    assert!(grammar.production(grammar.production_count()).is_none());
}

#[test]
fn symbol_ordering_is_total_over_name_and_kind() {
    // Two terminals sharing a name but not a category are distinct symbols.
    let a = GrammarSymbol::terminal("X", TokenKind::Identifier);
    let b = GrammarSymbol::terminal("X", TokenKind::Integer);
    let c = GrammarSymbol::non_terminal("X");
    assert_ne!(a, b);
    assert_ne!(a, c);

    let mut sorted = vec![c.clone(), b.clone(), a.clone()];
    sorted.sort();
    let resorted = {
        let mut again = sorted.clone();
        again.sort();
        again
    };
    assert_eq!(sorted, resorted);
    assert!(sorted.contains(&a) && sorted.contains(&b) && sorted.contains(&c));
}
