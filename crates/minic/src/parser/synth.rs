//! AST synthesis for completed productions.
//!
//! [`synthesize`] is a pure function of the production and its child nodes.
//! Pass-through productions hand their sole child up unchanged, operator
//! productions collapse into labelled operation nodes, list productions
//! splice so statements, parameters, and arguments stay flat and in source
//! order, and pure punctuation/keyword leaves are dropped from composite
//! nodes.
//!
//! The trailing fallback (first child, else an empty placeholder) exists for
//! resilience during error recovery; the only grammar productions that reach
//! it on a clean parse are single-child pass-throughs, which want exactly
//! that behavior.

use crate::ast::{AstKind, AstNode};
use crate::grammar::Production;
use crate::token::SourcePos;

/// Build the parent node for a completed production.
pub(crate) fn synthesize(production: &Production, children: Vec<AstNode>) -> AstNode {
    let pos = children.first().map_or_else(SourcePos::default, |c| c.pos);
    match production.lhs.name() {
        "Program" => program(children, pos),
        "StmtList" => statement_list(children, pos),
        "Stmt" => statement(production, children, pos),
        "VarDecl" => variable_declaration(production, children, pos),
        "FuncDecl" => function_declaration(children, pos),
        "ParamList" => parameter_list(children, pos),
        "ArgList" => argument_list(children, pos),
        "Type" => type_specifier(children, pos),
        "Block" => block(children, pos),
        "Expr" | "AndExpr" | "RelExpr" | "AddExpr" | "Term" => {
            binary_or_passthrough(children, pos)
        }
        "Factor" => factor(production, children, pos),
        _ => fallback(children, pos),
    }
}

/// Default policy: propagate the first child, else an empty placeholder.
fn fallback(children: Vec<AstNode>, pos: SourcePos) -> AstNode {
    children
        .into_iter()
        .next()
        .unwrap_or_else(|| AstNode::new(AstKind::Empty, pos))
}

/// Keep the children at the given indices, in order, discarding the rest.
fn pick(children: Vec<AstNode>, keep: &[usize]) -> Vec<AstNode> {
    children
        .into_iter()
        .enumerate()
        .filter(|(i, _)| keep.contains(i))
        .map(|(_, node)| node)
        .collect()
}

/// If the node is a list of the given kind, take its children; otherwise
/// keep the node itself. Used to keep recursive list productions flat.
fn splice(node: AstNode, kind: &AstKind) -> Vec<AstNode> {
    if node.kind == *kind {
        node.children
    } else {
        vec![node]
    }
}

fn program(children: Vec<AstNode>, pos: SourcePos) -> AstNode {
    let mut it = children.into_iter();
    match (it.next(), it.next()) {
        (Some(list), None) => {
            AstNode::with_children(AstKind::Program, pos, splice(list, &AstKind::StatementList))
        }
        _ => AstNode::new(AstKind::Program, pos),
    }
}

fn statement_list(children: Vec<AstNode>, pos: SourcePos) -> AstNode {
    let mut it = children.into_iter();
    match (it.next(), it.next(), it.next()) {
        // StmtList → ε
        (None, ..) => AstNode::new(AstKind::StatementList, pos),
        // StmtList → Stmt StmtList: keep the nested list flat.
        (Some(stmt), Some(rest), None) => {
            let mut statements = vec![stmt];
            statements.extend(splice(rest, &AstKind::StatementList));
            AstNode::with_children(AstKind::StatementList, pos, statements)
        }
        (Some(stmt), None, _) => {
            AstNode::with_children(AstKind::StatementList, pos, vec![stmt])
        }
        _ => AstNode::new(AstKind::StatementList, pos),
    }
}

fn statement(production: &Production, children: Vec<AstNode>, pos: SourcePos) -> AstNode {
    let leading = production.rhs.first().map(|s| s.name());
    match leading {
        // return Expr ; | return ;
        Some("RETURN") => {
            let kept = if children.len() == 3 {
                pick(children, &[1])
            } else {
                Vec::new()
            };
            AstNode::with_children(AstKind::ReturnStatement, pos, kept)
        }
        // if ( Expr ) Block [ else Block ]
        Some("IF") if children.len() >= 5 => {
            let keep: &[usize] = if children.len() == 7 { &[2, 4, 6] } else { &[2, 4] };
            AstNode::with_children(AstKind::IfStatement, pos, pick(children, keep))
        }
        // while ( Expr ) Block
        Some("WHILE") if children.len() == 5 => {
            AstNode::with_children(AstKind::WhileStatement, pos, pick(children, &[2, 4]))
        }
        // IDENTIFIER = Expr ;
        Some("IDENTIFIER") if children.len() == 4 => {
            AstNode::with_children(AstKind::Assignment, pos, pick(children, &[0, 2]))
        }
        // Expr ;
        Some("Expr") if children.len() == 2 => {
            AstNode::with_children(AstKind::ExpressionStatement, pos, pick(children, &[0]))
        }
        // Stmt → VarDecl | FuncDecl | Block
        _ => fallback(children, pos),
    }
}

fn variable_declaration(
    production: &Production,
    children: Vec<AstNode>,
    pos: SourcePos,
) -> AstNode {
    let leading = production.rhs.first().map(|s| s.name());
    let keep: &[usize] = match (leading, children.len()) {
        // var IDENTIFIER Type [ = Expr ] ;
        (Some("VAR"), 4) => &[1, 2],
        (Some("VAR"), 6) => &[1, 2, 4],
        // const Type IDENTIFIER = Expr ;
        (Some("CONST"), 6) => &[1, 2, 4],
        // Type IDENTIFIER [ = Expr ] ;
        (_, 3) => &[0, 1],
        (_, 5) => &[0, 1, 3],
        _ => return fallback(children, pos),
    };
    AstNode::with_children(AstKind::VariableDeclaration, pos, pick(children, keep))
}

fn function_declaration(children: Vec<AstNode>, pos: SourcePos) -> AstNode {
    // Children are always [return type, name, parameters, body] so tree
    // walkers never have to count.
    match children.len() {
        // Type IDENTIFIER ( ) Block
        5 => {
            let mut kept = pick(children, &[0, 1, 4]);
            let body = kept.pop();
            kept.push(AstNode::new(AstKind::ParameterList, pos));
            kept.extend(body);
            AstNode::with_children(AstKind::FunctionDeclaration, pos, kept)
        }
        // Type IDENTIFIER ( ParamList ) Block
        6 => AstNode::with_children(
            AstKind::FunctionDeclaration,
            pos,
            pick(children, &[0, 1, 3, 5]),
        ),
        _ => fallback(children, pos),
    }
}

fn parameter_list(children: Vec<AstNode>, pos: SourcePos) -> AstNode {
    match children.len() {
        // Type IDENTIFIER
        2 => AstNode::with_children(AstKind::ParameterList, pos, children),
        // ParamList , Type IDENTIFIER
        4 => {
            let mut it = children.into_iter();
            let mut params = match it.next() {
                Some(list) => splice(list, &AstKind::ParameterList),
                None => Vec::new(),
            };
            params.extend(it.skip(1));
            AstNode::with_children(AstKind::ParameterList, pos, params)
        }
        _ => fallback(children, pos),
    }
}

fn argument_list(children: Vec<AstNode>, pos: SourcePos) -> AstNode {
    match children.len() {
        // Expr
        1 => AstNode::with_children(AstKind::ArgumentList, pos, children),
        // ArgList , Expr
        3 => {
            let mut it = children.into_iter();
            let mut args = match it.next() {
                Some(list) => splice(list, &AstKind::ArgumentList),
                None => Vec::new(),
            };
            args.extend(it.skip(1));
            AstNode::with_children(AstKind::ArgumentList, pos, args)
        }
        _ => fallback(children, pos),
    }
}

fn type_specifier(children: Vec<AstNode>, pos: SourcePos) -> AstNode {
    let mut it = children.into_iter();
    match (it.next(), it.next()) {
        (Some(keyword), None) => {
            let name = keyword.text().unwrap_or_default().into();
            AstNode::new(AstKind::TypeSpecifier { name }, keyword.pos)
        }
        _ => AstNode::new(AstKind::Empty, pos),
    }
}

fn block(children: Vec<AstNode>, pos: SourcePos) -> AstNode {
    // { StmtList }: braces dropped, statements spliced flat.
    if children.len() == 3 {
        let mut it = children.into_iter();
        let inner = it.nth(1);
        let statements = match inner {
            Some(list) => splice(list, &AstKind::StatementList),
            None => Vec::new(),
        };
        AstNode::with_children(AstKind::Block, pos, statements)
    } else {
        fallback(children, pos)
    }
}

fn binary_or_passthrough(children: Vec<AstNode>, pos: SourcePos) -> AstNode {
    if children.len() == 3 {
        let mut it = children.into_iter();
        let (left, op, right) = (it.next(), it.next(), it.next());
        if let (Some(left), Some(op), Some(right)) = (left, op, right) {
            let operator = op.text().unwrap_or_default().into();
            return AstNode::with_children(
                AstKind::BinaryOperation { operator },
                pos,
                vec![left, right],
            );
        }
        AstNode::new(AstKind::Empty, pos)
    } else {
        fallback(children, pos)
    }
}

fn factor(production: &Production, children: Vec<AstNode>, pos: SourcePos) -> AstNode {
    let leading = production.rhs.first().map(|s| s.name());
    match (leading, children.len()) {
        // ( Expr )
        (Some("LPAREN"), 3) => fallback(pick(children, &[1]), pos),
        // - Factor | ! Factor
        (Some("MINUS") | Some("NOT"), 2) => {
            let mut it = children.into_iter();
            let (op, operand) = (it.next(), it.next());
            match (op, operand) {
                (Some(op), Some(operand)) => {
                    let operator = op.text().unwrap_or_default().into();
                    AstNode::with_children(
                        AstKind::UnaryOperation { operator },
                        pos,
                        vec![operand],
                    )
                }
                _ => AstNode::new(AstKind::Empty, pos),
            }
        }
        // IDENTIFIER ( ): call with no arguments.
        (Some("IDENTIFIER"), 3) => {
            let mut kept = pick(children, &[0]);
            kept.push(AstNode::new(AstKind::ArgumentList, pos));
            AstNode::with_children(AstKind::FunctionCall, pos, kept)
        }
        // IDENTIFIER ( ArgList )
        (Some("IDENTIFIER"), 4) => {
            AstNode::with_children(AstKind::FunctionCall, pos, pick(children, &[0, 2]))
        }
        // Literal and identifier leaves pass through.
        _ => fallback(children, pos),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Grammar;

    fn production_for<'g>(
        grammar: &'g Grammar,
        lhs: &str,
        arity: usize,
        first_rhs: Option<&str>,
    ) -> &'g Production {
        grammar
            .productions()
            .iter()
            .find(|p| {
                p.lhs.name() == lhs
                    && p.arity() == arity
                    && first_rhs.map_or(true, |name| {
                        p.rhs.first().map(|s| s.name()) == Some(name)
                    })
            })
            .expect("production exists")
    }

    fn leaf(kind: AstKind) -> AstNode {
        AstNode::new(kind, SourcePos::default())
    }

    fn lit(text: &str) -> AstNode {
        leaf(AstKind::Literal { value: text.into() })
    }

    #[test]
    fn binary_production_discards_operator_leaf() {
        let grammar = Grammar::mini_c().expect("language grammar converges");
        let production = production_for(&grammar, "AddExpr", 3, None);
        let node = synthesize(production, vec![lit("1"), lit("+"), lit("2")]);
        assert_eq!(
            node.kind,
            AstKind::BinaryOperation { operator: "+".into() }
        );
        assert_eq!(node.children.len(), 2);
        assert_eq!(node.children[0].text(), Some("1"));
        assert_eq!(node.children[1].text(), Some("2"));
    }

    #[test]
    fn parenthesized_expression_unwraps() {
        let grammar = Grammar::mini_c().expect("language grammar converges");
        let production = production_for(&grammar, "Factor", 3, Some("LPAREN"));
        let inner = lit("42");
        let node = synthesize(production, vec![lit("("), inner.clone(), lit(")")]);
        assert_eq!(node, inner);
    }

    #[test]
    fn pass_through_keeps_sole_child() {
        let grammar = Grammar::mini_c().expect("language grammar converges");
        let production = production_for(&grammar, "Expr", 1, None);
        let child = lit("7");
        assert_eq!(synthesize(production, vec![child.clone()]), child);
    }

    #[test]
    fn empty_production_synthesizes_empty_list() {
        let grammar = Grammar::mini_c().expect("language grammar converges");
        let production = production_for(&grammar, "StmtList", 0, None);
        let node = synthesize(production, Vec::new());
        assert_eq!(node.kind, AstKind::StatementList);
        assert!(node.children.is_empty());
    }

    #[test]
    fn statement_lists_stay_flat() {
        let grammar = Grammar::mini_c().expect("language grammar converges");
        let production = production_for(&grammar, "StmtList", 2, None);
        let nested = AstNode::with_children(
            AstKind::StatementList,
            SourcePos::default(),
            vec![lit("b"), lit("c")],
        );
        let node = synthesize(production, vec![lit("a"), nested]);
        assert_eq!(node.children.len(), 3);
    }

    #[test]
    fn type_production_becomes_specifier_leaf() {
        let grammar = Grammar::mini_c().expect("language grammar converges");
        let production = production_for(&grammar, "Type", 1, Some("INT"));
        let node = synthesize(production, vec![lit("int")]);
        assert_eq!(node.kind, AstKind::TypeSpecifier { name: "int".into() });
        assert!(node.children.is_empty());
    }
}
