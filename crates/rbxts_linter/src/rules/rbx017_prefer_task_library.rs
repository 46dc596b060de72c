//! RBX017: prefer-task-library

use crate::{LintContext, Rule, RuleCode, SemanticModel};
use rbxts_diagnostics::{render_template, Category, Diagnostic, Edit, Fix};
use rbxts_parser::Expr;
use rbxts_semantic::TypeEnv;

pub struct PreferTaskLibrary;

const MESSAGE: &str = "Use task.{{fn}}() instead of {{fn}}() for better performance.";

const FN_NAMES: &[&str] = &["delay", "spawn", "wait"];

impl Rule for PreferTaskLibrary {
    fn code(&self) -> RuleCode {
        RuleCode("RBX017")
    }

    fn category(&self) -> Category {
        Category::Performance
    }

    fn name(&self) -> &'static str {
        "prefer-task-library"
    }

    fn description(&self) -> &'static str {
        "Enforces use of task.wait(), task.delay(), and task.spawn() instead of global wait(), delay(), and spawn()"
    }

    fn check_expr<'a>(
        &self,
        ctx: &LintContext<'a>,
        _model: &SemanticModel<'a>,
        _env: &TypeEnv,
        expr: &Expr<'a>,
        _parent: Option<&Expr<'a>>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let Expr::Call { callee, .. } = expr else {
            return;
        };
        let Expr::Identifier { name, span } = callee.unwrap_grouping() else {
            return;
        };
        if !FN_NAMES.contains(name) {
            return;
        }

        let message = render_template(MESSAGE, &[("fn", name)]);
        diagnostics.push(
            Diagnostic::warning("RBX017", message, ctx.location(*span)).with_fix(Fix {
                message: format!("Use task.{name}()"),
                edits: vec![Edit::new(span.start, span.end, format!("task.{name}"))],
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_lint, assert_lint_fix};

    #[test]
    fn prefixes_wait() {
        assert_lint_fix(Box::new(PreferTaskLibrary), "wait(1);", "task.wait(1);");
    }

    #[test]
    fn prefixes_spawn_and_delay() {
        assert_lint_fix(
            Box::new(PreferTaskLibrary),
            "spawn(() => wake()); delay(5, cleanup);",
            "task.spawn(() => wake()); task.delay(5, cleanup);",
        );
    }

    #[test]
    fn task_calls_are_fine() {
        assert_lint(Box::new(PreferTaskLibrary), "task.wait(1);", "");
    }

    #[test]
    fn unrelated_calls_are_fine() {
        assert_lint(Box::new(PreferTaskLibrary), "update(1);", "");
    }
}
