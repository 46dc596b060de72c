//! RBX001: no-null
//!
//! Luau has no `null`; the transpiler only models `undefined` (Lua nil).

use crate::{LintContext, Rule, RuleCode, SemanticModel};
use rbxts_diagnostics::{Category, Diagnostic, Edit, Fix};
use rbxts_lexer::Span;
use rbxts_parser::{Expr, Literal, TypeAnn};
use rbxts_semantic::TypeEnv;

pub struct NoNull;

const MESSAGE: &str = "Usage of 'null' is not allowed. Use 'undefined' instead.";

fn report_null(ctx: &LintContext, span: Span, diagnostics: &mut Vec<Diagnostic>) {
    diagnostics.push(
        Diagnostic::error("RBX001", MESSAGE, ctx.location(span)).with_fix(Fix {
            message: "Replace with `undefined`".to_string(),
            edits: vec![Edit::new(span.start, span.end, "undefined")],
        }),
    );
}

impl Rule for NoNull {
    fn code(&self) -> RuleCode {
        RuleCode("RBX001")
    }

    fn category(&self) -> Category {
        Category::Unsupported
    }

    fn name(&self) -> &'static str {
        "no-null"
    }

    fn description(&self) -> &'static str {
        "Disallow usage of the `null` keyword"
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
        if let Expr::Literal {
            value: Literal::Null,
            span,
        } = expr
        {
            report_null(ctx, *span, diagnostics);
        }
    }

    fn check_type<'a>(
        &self,
        ctx: &LintContext<'a>,
        ty: &TypeAnn<'a>,
        _parent: Option<&TypeAnn<'a>>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        if let TypeAnn::Null { span } = ty {
            report_null(ctx, *span, diagnostics);
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_lint, assert_lint_count, assert_lint_fix};

    #[test]
    fn fixes_null_literal() {
        assert_lint_fix(
            Box::new(NoNull),
            "const x = null;",
            "const x = undefined;",
        );
    }

    #[test]
    fn fixes_null_in_type_position() {
        assert_lint_fix(
            Box::new(NoNull),
            "let x: string | null = undefined;",
            "let x: string | undefined = undefined;",
        );
    }

    #[test]
    fn fixes_null_in_comparison() {
        assert_lint_fix(
            Box::new(NoNull),
            "if (value === null) {}",
            "if (value === undefined) {}",
        );
    }

    #[test]
    fn undefined_is_fine() {
        assert_lint(Box::new(NoNull), "const x = undefined;", "");
    }

    #[test]
    fn each_null_reports_once() {
        assert_lint_count(Box::new(NoNull), "const a = null; let b: null = null;", 3);
    }
}
