//! RBX004: no-for-in
//!
//! A for-in loop always types the iterator variable as `string`, which is
//! wrong over Luau tables. for-of iterates real values.

use crate::{LintContext, Rule, RuleCode, SemanticModel};
use rbxts_diagnostics::{Category, Diagnostic, Edit, Fix};
use rbxts_parser::Stmt;
use rbxts_semantic::TypeEnv;

pub struct NoForIn;

const MESSAGE: &str =
    "For-in loops are forbidden because it always types the iterator variable as `string`. Use for-of or array.forEach instead.";

impl Rule for NoForIn {
    fn code(&self) -> RuleCode {
        RuleCode("RBX004")
    }

    fn category(&self) -> Category {
        Category::Correctness
    }

    fn name(&self) -> &'static str {
        "no-for-in"
    }

    fn description(&self) -> &'static str {
        "Disallows iterating with a for-in loop"
    }

    fn check_stmt<'a>(
        &self,
        ctx: &LintContext<'a>,
        _model: &SemanticModel<'a>,
        _env: &TypeEnv,
        stmt: &Stmt<'a>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let Stmt::ForIn {
            left, right, span, ..
        } = stmt
        else {
            return;
        };

        diagnostics.push(
            Diagnostic::error("RBX004", MESSAGE, ctx.location(*span)).with_fix(Fix {
                message: "Convert to for-of".to_string(),
                edits: vec![Edit::new(left.span().end, right.span().start, " of ")],
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_lint, assert_lint_fix};

    #[test]
    fn rewrites_for_in_to_for_of() {
        assert_lint_fix(
            Box::new(NoForIn),
            "for (const key in obj) {}",
            "for (const key of obj) {}",
        );
    }

    #[test]
    fn rewrites_bare_head() {
        assert_lint_fix(
            Box::new(NoForIn),
            "for (k in obj) {}",
            "for (k of obj) {}",
        );
    }

    #[test]
    fn for_of_is_fine() {
        assert_lint(Box::new(NoForIn), "for (const item of items) {}", "");
    }
}
