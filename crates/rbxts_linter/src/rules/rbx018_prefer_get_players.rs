//! RBX018: prefer-get-players
//!
//! `Players.GetChildren()` types as `Instance[]`; `GetPlayers()` gives
//! `Player[]`. By default the receiver is matched by name; the
//! `validateType` option resolves its type instead (for aliased services).

use crate::{LintContext, PreferGetPlayersOptions, Rule, RuleCode, SemanticModel};
use rbxts_diagnostics::{Category, Diagnostic, Edit, Fix};
use rbxts_lexer::Span;
use rbxts_parser::Expr;
use rbxts_semantic::{infer, query, TypeEnv};

pub struct PreferGetPlayers {
    options: PreferGetPlayersOptions,
}

const MESSAGE: &str =
    "Use Players.GetPlayers() instead of Players.GetChildren() for more accurate types.";

impl PreferGetPlayers {
    pub fn new(options: PreferGetPlayersOptions) -> Self {
        Self { options }
    }
}

impl Default for PreferGetPlayers {
    fn default() -> Self {
        Self::new(PreferGetPlayersOptions::default())
    }
}

fn report(ctx: &LintContext, call_span: Span, property_span: Span, diagnostics: &mut Vec<Diagnostic>) {
    diagnostics.push(
        Diagnostic::warning("RBX018", MESSAGE, ctx.location(call_span)).with_fix(Fix {
            message: "Use GetPlayers()".to_string(),
            edits: vec![Edit::new(property_span.start, property_span.end, "GetPlayers")],
        }),
    );
}

impl Rule for PreferGetPlayers {
    fn code(&self) -> RuleCode {
        RuleCode("RBX018")
    }

    fn category(&self) -> Category {
        Category::Correctness
    }

    fn name(&self) -> &'static str {
        "prefer-get-players"
    }

    fn description(&self) -> &'static str {
        "Enforces the use of Players.GetPlayers() instead of Players.GetChildren()"
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
        let Expr::Call { callee, span, .. } = expr else {
            return;
        };
        let Expr::Member {
            object,
            property,
            property_span,
            ..
        } = callee.unwrap_grouping()
        else {
            return;
        };
        if *property != "GetChildren" {
            return;
        }

        if self.options.validate_type {
            let ty = infer::type_of(ctx.db(), env, object);
            if query::is_builtin_like(&ty, &["Players"]) {
                report(ctx, *span, *property_span, diagnostics);
            }
        } else if matches!(
            object.unwrap_grouping(),
            Expr::Identifier { name: "Players", .. }
        ) {
            report(ctx, *span, *property_span, diagnostics);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_lint, assert_lint_fix};

    #[test]
    fn rewrites_get_children_on_players() {
        assert_lint_fix(
            Box::new(PreferGetPlayers::default()),
            "const Players = game.GetService(\"Players\"); Players.GetChildren();",
            "const Players = game.GetService(\"Players\"); Players.GetPlayers();",
        );
    }

    #[test]
    fn other_receivers_are_fine_by_default() {
        assert_lint(
            Box::new(PreferGetPlayers::default()),
            "const svc = game.GetService(\"Players\"); svc.GetChildren();",
            "",
        );
    }

    #[test]
    fn validate_type_follows_aliases() {
        let rule = PreferGetPlayers::new(crate::PreferGetPlayersOptions {
            validate_type: true,
        });
        assert_lint_fix(
            Box::new(rule),
            "const svc = game.GetService(\"Players\"); svc.GetChildren();",
            "const svc = game.GetService(\"Players\"); svc.GetPlayers();",
        );
    }

    #[test]
    fn workspace_children_are_fine_with_type_validation() {
        let rule = PreferGetPlayers::new(crate::PreferGetPlayersOptions {
            validate_type: true,
        });
        assert_lint(Box::new(rule), "workspace.GetChildren();", "");
    }
}
