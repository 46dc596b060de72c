//! RBX005: no-function-expression-name
//!
//! Named function expressions are emitted as plain anonymous functions;
//! the inner name would silently vanish. The name is deleted when nothing
//! references it, otherwise the diagnostic is report-only.

use crate::semantic_model::BindingKind;
use crate::{LintContext, Rule, RuleCode, SemanticModel};
use rbxts_diagnostics::{Category, Diagnostic, Edit, Fix};

pub struct NoFunctionExpressionName;

const MESSAGE: &str = "Function expression names are not supported!";

impl Rule for NoFunctionExpressionName {
    fn code(&self) -> RuleCode {
        RuleCode("RBX005")
    }

    fn category(&self) -> Category {
        Category::Unsupported
    }

    fn name(&self) -> &'static str {
        "no-function-expression-name"
    }

    fn description(&self) -> &'static str {
        "Disallow the use of function expression names"
    }

    fn check_post<'a>(
        &self,
        ctx: &LintContext<'a>,
        model: &SemanticModel<'a>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        for binding in model.bindings() {
            if binding.kind != BindingKind::FunctionExprName {
                continue;
            }

            let mut diagnostic =
                Diagnostic::error("RBX005", MESSAGE, ctx.location(binding.name_span));

            // Deleting a referenced name would break recursion inside the
            // body; degrade to report-only.
            if binding.references == 0 {
                diagnostic = diagnostic.with_fix(Fix {
                    message: "Remove the function expression name".to_string(),
                    edits: vec![Edit::delete(
                        binding.name_span.start.saturating_sub(1),
                        binding.name_span.end,
                    )],
                });
            }

            diagnostics.push(diagnostic);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_lint, assert_lint_count, assert_lint_fix, lint_one};

    #[test]
    fn removes_unreferenced_name() {
        assert_lint_fix(
            Box::new(NoFunctionExpressionName),
            "const f = function foo() {};",
            "const f = function() {};",
        );
    }

    #[test]
    fn referenced_name_reports_without_fix() {
        let diagnostics = lint_one(
            Box::new(NoFunctionExpressionName),
            "const f = function again() { return again(); };",
        );
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].fix.is_none());
    }

    #[test]
    fn anonymous_function_expression_is_fine() {
        assert_lint(
            Box::new(NoFunctionExpressionName),
            "const f = function() {};",
            "",
        );
    }

    #[test]
    fn function_declarations_are_fine() {
        assert_lint_count(Box::new(NoFunctionExpressionName), "function foo() {}", 0);
    }
}
