//! RBX011: no-post-fix-new
//!
//! `.new()` is Lua constructor style. Unless the receiver really declares
//! a callable `new` member, the call is a mistake for `new X()`.

use crate::{LintContext, Rule, RuleCode, SemanticModel};
use rbxts_diagnostics::{Category, Diagnostic, Fix};
use rbxts_lexer::Span;
use rbxts_parser::Expr;
use rbxts_semantic::{infer, query, Db, Type, TypeEnv};

pub struct NoPostFixNew;

const MESSAGE: &str =
    "Calling .new() on objects without a .new() method is probably a mistake. Use `new X()` instead.";

impl Rule for NoPostFixNew {
    fn code(&self) -> RuleCode {
        RuleCode("RBX011")
    }

    fn category(&self) -> Category {
        Category::Correctness
    }

    fn name(&self) -> &'static str {
        "no-post-fix-new"
    }

    fn description(&self) -> &'static str {
        "Disallow .new() on objects without a .new() method"
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
            object, property, ..
        } = callee.unwrap_grouping()
        else {
            return;
        };
        if *property != "new" {
            return;
        }

        // A receiver that provably declares a callable `new` member is fine
        let object_ty = infer::type_of(ctx.db(), env, object);
        if let Type::Object(id) = &object_ty {
            if ctx
                .db()
                .lookup_member(*id, "new")
                .is_some_and(|member| query::is_function_like(&member))
            {
                return;
            }
        }

        let object_text = ctx.text(object.span());
        let args_text = ctx.text(Span::new(callee.span().end, span.end));
        let should_wrap = !matches!(
            object.unwrap_grouping(),
            Expr::Identifier { .. } | Expr::Member { .. }
        );
        let replaced = if should_wrap {
            format!("new ({object_text}){args_text}")
        } else {
            format!("new {object_text}{args_text}")
        };

        diagnostics.push(
            Diagnostic::warning("RBX011", MESSAGE, ctx.location(*span)).with_fix(Fix {
                message: "Use a `new` expression".to_string(),
                edits: crate::fixer::replace_node(*span, replaced),
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_lint, assert_lint_fix};

    #[test]
    fn rewrites_data_type_constructor() {
        assert_lint_fix(
            Box::new(NoPostFixNew),
            "const v = Vector3.new(1, 2, 3);",
            "const v = new Vector3(1, 2, 3);",
        );
    }

    #[test]
    fn rewrites_qualified_receiver() {
        assert_lint_fix(
            Box::new(NoPostFixNew),
            "const c = Lib.Thing.new();",
            "const c = new Lib.Thing();",
        );
    }

    #[test]
    fn wraps_complex_receivers() {
        assert_lint_fix(
            Box::new(NoPostFixNew),
            "const c = factories[0].new();",
            "const c = new (factories[0])();",
        );
    }

    #[test]
    fn declared_new_method_is_fine() {
        assert_lint(
            Box::new(NoPostFixNew),
            "const obj = { new: () => 1 }; obj.new();",
            "",
        );
        assert_lint(
            Box::new(NoPostFixNew),
            "class Pool { static new() { return new Pool(); } } Pool.new();",
            "",
        );
    }
}
