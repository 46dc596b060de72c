//! RBX022: lua-truthiness
//!
//! Lua truthiness differs from JS only for 0, NaN and "": those are
//! truthy in Lua. A boolean context whose type could hold one of them is
//! a porting hazard. `undefined`/`false` behave identically on both
//! sides and are out of scope.
//!
//! Boolean contexts: if/while/do-while/for tests, ternary conditions,
//! `!` operands, and logical operands (`??` exempts its left side, which
//! is a presence check, not a truthiness check). A test that is itself a
//! logical expression is checked through its operands, not as a whole,
//! so each risky operand reports once at its own location.

use crate::{LintContext, Rule, RuleCode, SemanticModel};
use rbxts_diagnostics::{Category, Diagnostic};
use rbxts_parser::{Expr, LogicalOp, Stmt, UnaryOp};
use rbxts_semantic::{infer, query, TypeEnv};

pub struct LuaTruthiness;

const MESSAGE: &str = "0, NaN, and \"\" are falsy in TS. If intentional, disable this rule with `--ignore RBX022`.";

fn check_truthy(ctx: &LintContext, env: &TypeEnv, expr: &Expr, diagnostics: &mut Vec<Diagnostic>) {
    let ty = infer::type_of(ctx.db(), env, expr);

    let possibly_zero = query::is_possibly(ctx.db(), &ty, &mut query::is_falsy_number);
    let possibly_empty_string = query::is_possibly(ctx.db(), &ty, &mut query::is_falsy_string);

    if possibly_zero || possibly_empty_string {
        diagnostics.push(Diagnostic::warning(
            "RBX022",
            MESSAGE,
            ctx.location(expr.span()),
        ));
    }
}

/// Check a test-position expression. Logical tests descend their right
/// spine; left operands are covered by the expression-level handler.
fn check_test(ctx: &LintContext, env: &TypeEnv, expr: &Expr, diagnostics: &mut Vec<Diagnostic>) {
    match expr.unwrap_grouping() {
        Expr::Logical { right, .. } => check_test(ctx, env, right, diagnostics),
        other => check_truthy(ctx, env, other, diagnostics),
    }
}

impl Rule for LuaTruthiness {
    fn code(&self) -> RuleCode {
        RuleCode("RBX022")
    }

    fn category(&self) -> Category {
        Category::Correctness
    }

    fn name(&self) -> &'static str {
        "lua-truthiness"
    }

    fn description(&self) -> &'static str {
        "Warns against falsy strings and numbers"
    }

    fn check_stmt<'a>(
        &self,
        ctx: &LintContext<'a>,
        _model: &SemanticModel<'a>,
        env: &TypeEnv,
        stmt: &Stmt<'a>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let test = match stmt {
            Stmt::If { condition, .. }
            | Stmt::While { condition, .. }
            | Stmt::DoWhile { condition, .. } => Some(condition),
            Stmt::For { condition, .. } => condition.as_ref(),
            _ => None,
        };
        if let Some(test) = test {
            check_test(ctx, env, test, diagnostics);
        }
    }

    fn check_expr<'a>(
        &self,
        ctx: &LintContext<'a>,
        _model: &SemanticModel<'a>,
        env: &TypeEnv,
        expr: &Expr<'a>,
        _parent: Option<&Expr<'a>>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        match expr {
            // `??` tests presence, not truthiness
            Expr::Logical { op, left, .. } if *op != LogicalOp::NullishCoalescing => {
                if !matches!(left.unwrap_grouping(), Expr::Logical { .. }) {
                    check_truthy(ctx, env, left, diagnostics);
                }
            }
            Expr::Unary {
                op: UnaryOp::Not,
                operand,
                ..
            } => {
                if !matches!(operand.unwrap_grouping(), Expr::Logical { .. }) {
                    check_truthy(ctx, env, operand, diagnostics);
                }
            }
            Expr::Ternary { condition, .. } => {
                if !matches!(condition.unwrap_grouping(), Expr::Logical { .. }) {
                    check_truthy(ctx, env, condition, diagnostics);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_lint, assert_lint_count, lint_one};

    #[test]
    fn negated_zero_reports_exactly_once_without_fix() {
        let diagnostics = lint_one(Box::new(LuaTruthiness), "if (!0) {}");
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].fix.is_none());
        assert!(diagnostics[0].message.contains("0, NaN"));
    }

    #[test]
    fn flags_falsy_sentinels_in_tests() {
        assert_lint_count(Box::new(LuaTruthiness), "if (0) {}", 1);
        assert_lint_count(Box::new(LuaTruthiness), "if (\"\") {}", 1);
        assert_lint_count(Box::new(LuaTruthiness), "if (-0) {}", 1);
        assert_lint_count(Box::new(LuaTruthiness), "if (!NaN) {}", 1);
        assert_lint_count(Box::new(LuaTruthiness), "if (``) {}", 1);
    }

    #[test]
    fn truthy_literals_are_fine() {
        assert_lint(Box::new(LuaTruthiness), "if (true) {}", "");
        assert_lint(Box::new(LuaTruthiness), "if (1) {}", "");
        assert_lint(Box::new(LuaTruthiness), "if (false) {}", "");
        assert_lint(Box::new(LuaTruthiness), "if (undefined) {}", "");
        assert_lint(Box::new(LuaTruthiness), "if (\"hello\") {}", "");
    }

    #[test]
    fn widened_let_string_is_flagged() {
        assert_lint_count(Box::new(LuaTruthiness), "let a = \"hello\"; if (a) {}", 1);
    }

    #[test]
    fn const_literal_keeps_its_narrow_type() {
        assert_lint(Box::new(LuaTruthiness), "const a = \"hello\"; if (a) {}", "");
    }

    #[test]
    fn unconstrained_generic_never_triggers() {
        assert_lint_count(
            Box::new(LuaTruthiness),
            "function check<T>(a: T) { if (a) {} }",
            0,
        );
        assert_lint_count(
            Box::new(LuaTruthiness),
            "function check<T>(a: T) { if (!a) {} }",
            0,
        );
    }

    #[test]
    fn constrained_generic_uses_its_constraint() {
        assert_lint_count(
            Box::new(LuaTruthiness),
            "function check<T extends number>(a: T) { if (a) {} }",
            1,
        );
    }

    #[test]
    fn union_with_zero_is_flagged() {
        assert_lint_count(
            Box::new(LuaTruthiness),
            "declare function f(): string | 0; if (f()) {}",
            1,
        );
    }

    #[test]
    fn literal_union_of_numbers_is_flagged() {
        assert_lint_count(
            Box::new(LuaTruthiness),
            "function y(x: 0 | 1 | 2 | 3) { if (x) {} }",
            1,
        );
    }

    #[test]
    fn nullish_left_is_exempt() {
        assert_lint(
            Box::new(LuaTruthiness),
            "declare const x: number | undefined; const y = x ?? 0;",
            "",
        );
    }

    #[test]
    fn nullish_right_in_test_position_is_checked() {
        assert_lint_count(Box::new(LuaTruthiness), "if (a ?? 0) {}", 1);
    }

    #[test]
    fn logical_right_operand_in_test_is_checked() {
        assert_lint_count(Box::new(LuaTruthiness), "if (a && 0) {}", 1);
    }

    #[test]
    fn for_conditions_are_boolean_contexts() {
        assert_lint_count(Box::new(LuaTruthiness), "for (let i = 5; i; i--) {}", 1);
        assert_lint_count(Box::new(LuaTruthiness), "for (;;) {}", 0);
    }

    #[test]
    fn ternary_condition_is_a_boolean_context() {
        assert_lint_count(Box::new(LuaTruthiness), "const r = 0 ? 1 : 2;", 1);
    }

    #[test]
    fn array_size_call_is_flagged() {
        assert_lint_count(
            Box::new(LuaTruthiness),
            "const xs = [1]; if (xs.size()) {}",
            1,
        );
    }
}
