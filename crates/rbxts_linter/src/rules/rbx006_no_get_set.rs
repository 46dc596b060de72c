//! RBX006: no-get-set
//!
//! Accessor properties need a metatable `__index`/`__newindex` dance the
//! transpiler refuses to emit. The fix joins the accessor keyword with
//! the key, turning `get foo()` into a normal method `getfoo()`.

use crate::{LintContext, Rule, RuleCode, SemanticModel};
use rbxts_diagnostics::{Category, Diagnostic, Edit, Fix};
use rbxts_lexer::Span;
use rbxts_parser::{ClassMember, Expr, MethodKind, ObjectProperty, Stmt};
use rbxts_semantic::TypeEnv;

pub struct NoGetSet;

const MESSAGE: &str =
    "Getters and Setters are not supported for performance reasons. Please use a normal method instead.";

fn report_accessor(
    ctx: &LintContext,
    member_span: Span,
    key_span: Span,
    diagnostics: &mut Vec<Diagnostic>,
) {
    diagnostics.push(
        Diagnostic::error("RBX006", MESSAGE, ctx.location(member_span)).with_fix(Fix {
            message: "Convert accessor to a method".to_string(),
            edits: vec![Edit::delete(key_span.start.saturating_sub(1), key_span.start)],
        }),
    );
}

impl Rule for NoGetSet {
    fn code(&self) -> RuleCode {
        RuleCode("RBX006")
    }

    fn category(&self) -> Category {
        Category::Unsupported
    }

    fn name(&self) -> &'static str {
        "no-get-set"
    }

    fn description(&self) -> &'static str {
        "Disallows getters and setters"
    }

    fn check_stmt<'a>(
        &self,
        ctx: &LintContext<'a>,
        _model: &SemanticModel<'a>,
        _env: &TypeEnv,
        stmt: &Stmt<'a>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        if let Stmt::ClassDecl { members, .. } = stmt {
            check_class_members(ctx, members, diagnostics);
        }
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
        match expr {
            Expr::Object { properties, .. } => {
                for prop in properties {
                    if let ObjectProperty::Method {
                        key,
                        kind: MethodKind::Get | MethodKind::Set,
                        span,
                        ..
                    } = prop
                    {
                        report_accessor(ctx, *span, key.span(), diagnostics);
                    }
                }
            }
            Expr::ClassExpr { members, .. } => {
                check_class_members(ctx, members, diagnostics);
            }
            _ => {}
        }
    }
}

fn check_class_members(
    ctx: &LintContext,
    members: &[ClassMember],
    diagnostics: &mut Vec<Diagnostic>,
) {
    for member in members {
        if let ClassMember::Method {
            key,
            kind: MethodKind::Get | MethodKind::Set,
            span,
            ..
        } = member
        {
            report_accessor(ctx, *span, key.span(), diagnostics);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_lint, assert_lint_count, assert_lint_fix};

    #[test]
    fn joins_getter_keyword_with_key() {
        assert_lint_fix(
            Box::new(NoGetSet),
            "class A { get foo() { return 1; } }",
            "class A { getfoo() { return 1; } }",
        );
    }

    #[test]
    fn joins_setter_keyword_with_key() {
        assert_lint_fix(
            Box::new(NoGetSet),
            "class A { set foo(v: number) {} }",
            "class A { setfoo(v: number) {} }",
        );
    }

    #[test]
    fn flags_object_literal_accessors() {
        assert_lint_fix(
            Box::new(NoGetSet),
            "const o = { get foo() { return 1; } };",
            "const o = { getfoo() { return 1; } };",
        );
    }

    #[test]
    fn plain_methods_are_fine() {
        assert_lint(Box::new(NoGetSet), "class A { getFoo() { return 1; } }", "");
        assert_lint_count(Box::new(NoGetSet), "const o = { foo() { return 1; } };", 0);
    }
}
