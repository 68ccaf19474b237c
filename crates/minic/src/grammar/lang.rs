//! The built-in grammar for the analyzed C-like language.
//!
//! Statements cover declarations, functions, blocks, `if`/`else`, `while`,
//! `return`, assignment, and expression statements. Expressions follow the
//! usual C precedence ladder (`||` < `&&` < comparison < additive <
//! multiplicative < unary/primary) expressed with left-recursive productions,
//! which LR handles natively.
//!
//! `if`/`else` bodies are mandatory blocks, so the grammar has no dangling
//! else and stays conflict-free under canonical LR(1).

use super::{Grammar, GrammarError, GrammarSymbol};
use crate::token::TokenKind;

impl Grammar {
    /// Build the full language grammar and derive its FIRST/FOLLOW tables.
    ///
    /// Production 0 is the augmented start rule `Program' → Program`.
    #[allow(clippy::too_many_lines)]
    pub fn mini_c() -> Result<Self, GrammarError> {
        let start = GrammarSymbol::non_terminal("Program'");
        let eof = GrammarSymbol::terminal("$", TokenKind::Eof);
        let mut g = Self::new(start.clone(), eof.clone());

        // Keywords and type keywords.
        let kw_var = g.add_terminal("VAR", TokenKind::Var);
        let kw_const = g.add_terminal("CONST", TokenKind::Const);
        let kw_int = g.add_terminal("INT", TokenKind::IntKw);
        let kw_float = g.add_terminal("FLOAT", TokenKind::FloatKw);
        let kw_string = g.add_terminal("STRING", TokenKind::StringKw);
        let kw_bool = g.add_terminal("BOOL", TokenKind::BoolKw);
        let kw_void = g.add_terminal("VOID", TokenKind::VoidKw);
        let kw_if = g.add_terminal("IF", TokenKind::If);
        let kw_else = g.add_terminal("ELSE", TokenKind::Else);
        let kw_while = g.add_terminal("WHILE", TokenKind::While);
        let kw_return = g.add_terminal("RETURN", TokenKind::Return);
        let lit_true = g.add_terminal("TRUE", TokenKind::True);
        let lit_false = g.add_terminal("FALSE", TokenKind::False);

        // Registered but never produced: tokens in these categories surface
        // as recoverable unexpected-token errors.
        g.add_terminal("FOR", TokenKind::For);
        g.add_terminal("FUNCTION", TokenKind::Function);
        g.add_terminal("BOOLEAN", TokenKind::Boolean);
        g.add_terminal("DOT", TokenKind::Dot);
        g.add_terminal("LBRACKET", TokenKind::LBracket);
        g.add_terminal("RBRACKET", TokenKind::RBracket);

        // Identifiers and literals.
        let ident = g.add_terminal("IDENTIFIER", TokenKind::Identifier);
        let integer = g.add_terminal("INTEGER", TokenKind::Integer);
        let float_val = g.add_terminal("FLOAT_VAL", TokenKind::Float);
        let string_val = g.add_terminal("STRING_VAL", TokenKind::StringLit);

        // Operators.
        let assign = g.add_terminal("ASSIGN", TokenKind::Assign);
        let plus = g.add_terminal("PLUS", TokenKind::Plus);
        let minus = g.add_terminal("MINUS", TokenKind::Minus);
        let star = g.add_terminal("MULTIPLY", TokenKind::Star);
        let slash = g.add_terminal("DIVIDE", TokenKind::Slash);
        let percent = g.add_terminal("MODULO", TokenKind::Percent);
        let eq = g.add_terminal("EQUAL", TokenKind::Equal);
        let ne = g.add_terminal("NOT_EQUAL", TokenKind::NotEqual);
        let lt = g.add_terminal("LESS", TokenKind::Less);
        let le = g.add_terminal("LESS_EQUAL", TokenKind::LessEqual);
        let gt = g.add_terminal("GREATER", TokenKind::Greater);
        let ge = g.add_terminal("GREATER_EQUAL", TokenKind::GreaterEqual);
        let and = g.add_terminal("AND", TokenKind::AndAnd);
        let or = g.add_terminal("OR", TokenKind::OrOr);
        let not = g.add_terminal("NOT", TokenKind::Bang);

        // Punctuation.
        let semi = g.add_terminal("SEMICOLON", TokenKind::Semicolon);
        let comma = g.add_terminal("COMMA", TokenKind::Comma);
        let lparen = g.add_terminal("LPAREN", TokenKind::LParen);
        let rparen = g.add_terminal("RPAREN", TokenKind::RParen);
        let lbrace = g.add_terminal("LBRACE", TokenKind::LBrace);
        let rbrace = g.add_terminal("RBRACE", TokenKind::RBrace);

        // Non-terminals.
        let program = g.add_non_terminal("Program");
        let stmt_list = g.add_non_terminal("StmtList");
        let stmt = g.add_non_terminal("Stmt");
        let var_decl = g.add_non_terminal("VarDecl");
        let func_decl = g.add_non_terminal("FuncDecl");
        let param_list = g.add_non_terminal("ParamList");
        let ty = g.add_non_terminal("Type");
        let block = g.add_non_terminal("Block");
        let expr = g.add_non_terminal("Expr");
        let and_expr = g.add_non_terminal("AndExpr");
        let rel_expr = g.add_non_terminal("RelExpr");
        let add_expr = g.add_non_terminal("AddExpr");
        let term = g.add_non_terminal("Term");
        let factor = g.add_non_terminal("Factor");
        let arg_list = g.add_non_terminal("ArgList");

        // Program structure.
        g.add_production(start, [program.clone()]);
        g.add_production(program, [stmt_list.clone()]);
        g.add_production(stmt_list.clone(), [stmt.clone(), stmt_list.clone()]);
        g.add_production(stmt_list.clone(), []);

        // Statements.
        g.add_production(stmt.clone(), [var_decl.clone()]);
        g.add_production(stmt.clone(), [func_decl.clone()]);
        g.add_production(stmt.clone(), [block.clone()]);
        g.add_production(
            stmt.clone(),
            [
                kw_if.clone(),
                lparen.clone(),
                expr.clone(),
                rparen.clone(),
                block.clone(),
            ],
        );
        g.add_production(
            stmt.clone(),
            [
                kw_if,
                lparen.clone(),
                expr.clone(),
                rparen.clone(),
                block.clone(),
                kw_else,
                block.clone(),
            ],
        );
        g.add_production(
            stmt.clone(),
            [
                kw_while,
                lparen.clone(),
                expr.clone(),
                rparen.clone(),
                block.clone(),
            ],
        );
        g.add_production(stmt.clone(), [kw_return.clone(), expr.clone(), semi.clone()]);
        g.add_production(stmt.clone(), [kw_return, semi.clone()]);
        g.add_production(
            stmt.clone(),
            [ident.clone(), assign.clone(), expr.clone(), semi.clone()],
        );
        g.add_production(stmt, [expr.clone(), semi.clone()]);

        // Variable declarations: `int x;`, `int x = 5;`, `var x int;`,
        // `var x int = 5;`, `const int x = 5;`.
        g.add_production(var_decl.clone(), [ty.clone(), ident.clone(), semi.clone()]);
        g.add_production(
            var_decl.clone(),
            [
                ty.clone(),
                ident.clone(),
                assign.clone(),
                expr.clone(),
                semi.clone(),
            ],
        );
        g.add_production(
            var_decl.clone(),
            [kw_var.clone(), ident.clone(), ty.clone(), semi.clone()],
        );
        g.add_production(
            var_decl.clone(),
            [
                kw_var,
                ident.clone(),
                ty.clone(),
                assign.clone(),
                expr.clone(),
                semi.clone(),
            ],
        );
        g.add_production(
            var_decl,
            [
                kw_const,
                ty.clone(),
                ident.clone(),
                assign.clone(),
                expr.clone(),
                semi.clone(),
            ],
        );

        // Function declarations: `int main() { }`, `int add(int a, int b) { }`.
        g.add_production(
            func_decl.clone(),
            [
                ty.clone(),
                ident.clone(),
                lparen.clone(),
                rparen.clone(),
                block.clone(),
            ],
        );
        g.add_production(
            func_decl,
            [
                ty.clone(),
                ident.clone(),
                lparen.clone(),
                param_list.clone(),
                rparen.clone(),
                block.clone(),
            ],
        );
        g.add_production(param_list.clone(), [ty.clone(), ident.clone()]);
        g.add_production(
            param_list.clone(),
            [param_list, comma.clone(), ty.clone(), ident.clone()],
        );

        // Types.
        g.add_production(ty.clone(), [kw_int]);
        g.add_production(ty.clone(), [kw_float]);
        g.add_production(ty.clone(), [kw_string]);
        g.add_production(ty.clone(), [kw_bool]);
        g.add_production(ty, [kw_void]);

        // Blocks.
        g.add_production(block, [lbrace, stmt_list, rbrace]);

        // Expression precedence ladder.
        g.add_production(expr.clone(), [expr.clone(), or, and_expr.clone()]);
        g.add_production(expr.clone(), [and_expr.clone()]);

        g.add_production(and_expr.clone(), [and_expr.clone(), and, rel_expr.clone()]);
        g.add_production(and_expr, [rel_expr.clone()]);

        for relop in [eq, ne, lt, le, gt, ge] {
            g.add_production(rel_expr.clone(), [rel_expr.clone(), relop, add_expr.clone()]);
        }
        g.add_production(rel_expr, [add_expr.clone()]);

        g.add_production(add_expr.clone(), [add_expr.clone(), plus, term.clone()]);
        g.add_production(add_expr.clone(), [add_expr.clone(), minus.clone(), term.clone()]);
        g.add_production(add_expr, [term.clone()]);

        g.add_production(term.clone(), [term.clone(), star, factor.clone()]);
        g.add_production(term.clone(), [term.clone(), slash, factor.clone()]);
        g.add_production(term.clone(), [term.clone(), percent, factor.clone()]);
        g.add_production(term, [factor.clone()]);

        g.add_production(factor.clone(), [integer]);
        g.add_production(factor.clone(), [float_val]);
        g.add_production(factor.clone(), [string_val]);
        g.add_production(factor.clone(), [lit_true]);
        g.add_production(factor.clone(), [lit_false]);
        g.add_production(factor.clone(), [ident.clone()]);
        g.add_production(
            factor.clone(),
            [lparen.clone(), expr.clone(), rparen.clone()],
        );
        g.add_production(factor.clone(), [minus, factor.clone()]);
        g.add_production(factor.clone(), [not, factor.clone()]);
        g.add_production(
            factor.clone(),
            [ident.clone(), lparen.clone(), rparen.clone()],
        );
        g.add_production(
            factor,
            [ident, lparen, arg_list.clone(), rparen],
        );
        g.add_production(arg_list.clone(), [expr.clone()]);
        g.add_production(arg_list.clone(), [arg_list, comma, expr]);

        g.compute_sets()?;
        Ok(g)
    }
}
