//! RBX023: misleading-lua-tuple-checks
//!
//! A `LuaTuple` value in a conditional tests the *table*, which is always
//! truthy; the author almost certainly meant its first element. In a
//! declaration binding a tuple to a single name, the value wants array
//! destructuring instead.

use crate::fixer;
use crate::{LintContext, Rule, RuleCode, SemanticModel};
use rbxts_diagnostics::{Category, Diagnostic, Fix};
use rbxts_lexer::Span;
use rbxts_parser::{Expr, Pattern, Stmt, TypeAnn, UnaryOp};
use rbxts_semantic::{infer, query, TypeEnv};

pub struct MisleadingLuaTupleChecks;

const TUPLE_CHECK: &str = "Unexpected LuaTuple in conditional expression. Add [0].";
const TUPLE_DECLARATION: &str =
    "Unexpected LuaTuple in variable declaration. Destructure the value with [ ].";

fn check_tuple_usage(
    ctx: &LintContext,
    env: &TypeEnv,
    expr: &Expr,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let ty = infer::type_of(ctx.db(), env, expr);
    if !query::is_lua_tuple(&ty) {
        return;
    }

    let span = expr.span();
    diagnostics.push(
        Diagnostic::warning("RBX023", TUPLE_CHECK, ctx.location(span)).with_fix(Fix {
            message: "Test the first element".to_string(),
            edits: vec![rbxts_diagnostics::Edit::insert(span.end, "[0]")],
        }),
    );
}

impl Rule for MisleadingLuaTupleChecks {
    fn code(&self) -> RuleCode {
        RuleCode("RBX023")
    }

    fn category(&self) -> Category {
        Category::Correctness
    }

    fn name(&self) -> &'static str {
        "misleading-lua-tuple-checks"
    }

    fn description(&self) -> &'static str {
        "Disallow the use of LuaTuple in conditional expressions"
    }

    fn check_stmt<'a>(
        &self,
        ctx: &LintContext<'a>,
        _model: &SemanticModel<'a>,
        env: &TypeEnv,
        stmt: &Stmt<'a>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        match stmt {
            Stmt::If { condition, .. }
            | Stmt::While { condition, .. }
            | Stmt::DoWhile { condition, .. } => {
                if !matches!(condition.unwrap_grouping(), Expr::Logical { .. }) {
                    check_tuple_usage(ctx, env, condition, diagnostics);
                }
            }
            Stmt::For {
                condition: Some(condition),
                ..
            } => {
                if !matches!(condition.unwrap_grouping(), Expr::Logical { .. }) {
                    check_tuple_usage(ctx, env, condition, diagnostics);
                }
            }

            // `const x = signal.Wait()` binds the whole tuple to one name
            Stmt::VarDecl { declarations, .. } => {
                for decl in declarations {
                    let Pattern::Identifier {
                        name,
                        type_ann,
                        span,
                        ..
                    } = &decl.pattern
                    else {
                        continue;
                    };
                    let Some(init) = &decl.init else {
                        continue;
                    };

                    let annotated_tuple = matches!(
                        type_ann,
                        Some(TypeAnn::Reference {
                            name: "LuaTuple",
                            ..
                        })
                    );
                    let inferred_tuple =
                        query::is_lua_tuple(&infer::type_of(ctx.db(), env, init));
                    if !annotated_tuple && !inferred_tuple {
                        continue;
                    }

                    let name_span = Span::new(span.start, span.start + name.len() as u32);
                    diagnostics.push(
                        Diagnostic::warning("RBX023", TUPLE_DECLARATION, ctx.location(name_span))
                            .with_fix(Fix {
                                message: "Destructure the first element".to_string(),
                                edits: fixer::destructure_identifier_fix(name_span),
                            }),
                    );
                }
            }
            _ => {}
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
            // Both operands, `??` included: a tuple on either side of a
            // logical operator is equally misleading
            Expr::Logical { left, right, .. } => {
                if !matches!(left.unwrap_grouping(), Expr::Logical { .. }) {
                    check_tuple_usage(ctx, env, left, diagnostics);
                }
                check_tuple_usage(ctx, env, right, diagnostics);
            }
            Expr::Unary {
                op: UnaryOp::Not,
                operand,
                ..
            } => {
                check_tuple_usage(ctx, env, operand, diagnostics);
            }
            Expr::Ternary { condition, .. } => {
                if !matches!(condition.unwrap_grouping(), Expr::Logical { .. }) {
                    check_tuple_usage(ctx, env, condition, diagnostics);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_lint, assert_lint_count, assert_lint_fix};

    #[test]
    fn adds_index_in_if_condition() {
        assert_lint_fix(
            Box::new(MisleadingLuaTupleChecks),
            "if (game.Loaded.Wait()) {}",
            "if (game.Loaded.Wait()[0]) {}",
        );
    }

    #[test]
    fn adds_index_in_loops() {
        assert_lint_fix(
            Box::new(MisleadingLuaTupleChecks),
            "while (game.Loaded.Wait()) {}",
            "while (game.Loaded.Wait()[0]) {}",
        );
        assert_lint_fix(
            Box::new(MisleadingLuaTupleChecks),
            "do {} while (game.Loaded.Wait());",
            "do {} while (game.Loaded.Wait()[0]);",
        );
        assert_lint_fix(
            Box::new(MisleadingLuaTupleChecks),
            "for (let i = 0; game.Loaded.Wait(); i++) {}",
            "for (let i = 0; game.Loaded.Wait()[0]; i++) {}",
        );
    }

    #[test]
    fn adds_index_under_negation_and_logical_operands() {
        assert_lint_fix(
            Box::new(MisleadingLuaTupleChecks),
            "if (!game.Loaded.Wait()) {}",
            "if (!game.Loaded.Wait()[0]) {}",
        );
        assert_lint_fix(
            Box::new(MisleadingLuaTupleChecks),
            "if (a && game.Loaded.Wait()) {}",
            "if (a && game.Loaded.Wait()[0]) {}",
        );
        assert_lint_fix(
            Box::new(MisleadingLuaTupleChecks),
            "if (game.Loaded.Wait() || b) {}",
            "if (game.Loaded.Wait()[0] || b) {}",
        );
    }

    #[test]
    fn both_logical_operands_report() {
        assert_lint_count(
            Box::new(MisleadingLuaTupleChecks),
            "if (game.Loaded.Wait() && game.Loaded.Wait()) {}",
            2,
        );
    }

    #[test]
    fn ternary_condition_is_checked() {
        assert_lint_fix(
            Box::new(MisleadingLuaTupleChecks),
            "const r = game.Loaded.Wait() ? 1 : 0;",
            "const r = game.Loaded.Wait()[0] ? 1 : 0;",
        );
    }

    #[test]
    fn destructures_declaration_without_annotation() {
        assert_lint_fix(
            Box::new(MisleadingLuaTupleChecks),
            "const player = game.GetService(\"Players\").PlayerAdded.Wait();",
            "const [player] = game.GetService(\"Players\").PlayerAdded.Wait();",
        );
    }

    #[test]
    fn destructures_declaration_preserving_annotation() {
        assert_lint_fix(
            Box::new(MisleadingLuaTupleChecks),
            "const player: LuaTuple<[Player]> = game.GetService(\"Players\").PlayerAdded.Wait();",
            "const [player]: LuaTuple<[Player]> = game.GetService(\"Players\").PlayerAdded.Wait();",
        );
    }

    #[test]
    fn indexed_and_destructured_forms_are_fine() {
        assert_lint(
            Box::new(MisleadingLuaTupleChecks),
            "if (game.Loaded.Wait()[0]) {}",
            "",
        );
        assert_lint(
            Box::new(MisleadingLuaTupleChecks),
            "const [player] = game.GetService(\"Players\").PlayerAdded.Wait();",
            "",
        );
        assert_lint(
            Box::new(MisleadingLuaTupleChecks),
            "const first = game.Loaded.Wait()[0];",
            "",
        );
    }

    #[test]
    fn user_declared_tuple_returns_are_detected() {
        assert_lint_fix(
            Box::new(MisleadingLuaTupleChecks),
            "declare function roll(): LuaTuple<[boolean, number]>; if (roll()) {}",
            "declare function roll(): LuaTuple<[boolean, number]>; if (roll()[0]) {}",
        );
    }
}
