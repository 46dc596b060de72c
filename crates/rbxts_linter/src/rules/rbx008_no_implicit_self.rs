//! RBX008: no-implicit-self
//!
//! `obj:method()` is Lua's implicit-self call sugar. In TypeScript it
//! parses as a labeled statement and does something entirely different.
//! Rewritten to a `.` call unless the label is followed by whitespace
//! (which reads as a genuine label).

use crate::{LintContext, Rule, RuleCode, SemanticModel};
use rbxts_diagnostics::{Category, Diagnostic, Fix};
use rbxts_parser::{Expr, Stmt};
use rbxts_semantic::TypeEnv;

pub struct NoImplicitSelf;

const MESSAGE: &str = "Enforce the use of `.` instead of `:` for method calls";

impl Rule for NoImplicitSelf {
    fn code(&self) -> RuleCode {
        RuleCode("RBX008")
    }

    fn category(&self) -> Category {
        Category::Correctness
    }

    fn name(&self) -> &'static str {
        "no-implicit-self"
    }

    fn description(&self) -> &'static str {
        "Enforce the use of `.` instead of `:` for method calls"
    }

    fn check_stmt<'a>(
        &self,
        ctx: &LintContext<'a>,
        _model: &SemanticModel<'a>,
        _env: &TypeEnv,
        stmt: &Stmt<'a>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let Stmt::Labeled {
            label_span,
            body,
            span,
            ..
        } = stmt
        else {
            return;
        };

        let Stmt::Expr { expr, .. } = &**body else {
            return;
        };
        if !matches!(
            expr.unwrap_grouping(),
            Expr::Call { .. } | Expr::Member { .. }
        ) {
            return;
        }

        // `label: statement` with space after the colon reads as a label
        let between = &ctx.source()[label_span.end as usize..body.span().start as usize];
        let mut chars = between.chars();
        if chars.next() == Some(':') && chars.next().is_some_and(|c| c.is_whitespace()) {
            return;
        }

        let label_text = ctx.text(*label_span);
        let body_text = ctx.text(body.span());
        diagnostics.push(
            Diagnostic::warning("RBX008", MESSAGE, ctx.location(*span)).with_fix(Fix {
                message: "Use `.` for the method call".to_string(),
                edits: crate::fixer::replace_node(*span, format!("{label_text}.{body_text}")),
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_lint, assert_lint_fix};

    #[test]
    fn rewrites_colon_call() {
        assert_lint_fix(Box::new(NoImplicitSelf), "obj:method();", "obj.method();");
    }

    #[test]
    fn rewrites_chained_colon_call() {
        assert_lint_fix(
            Box::new(NoImplicitSelf),
            "part:FindFirstChild(\"Handle\");",
            "part.FindFirstChild(\"Handle\");",
        );
    }

    #[test]
    fn spaced_label_is_left_alone() {
        assert_lint(Box::new(NoImplicitSelf), "loop: while (true) { break; }", "");
    }
}
