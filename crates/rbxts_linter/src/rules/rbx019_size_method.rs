//! RBX019: size-method
//!
//! roblox-ts containers expose `.size()`; the `.length` / `.size`
//! properties do not exist at Luau runtime.

use crate::{LintContext, Rule, RuleCode, SemanticModel};
use rbxts_diagnostics::{Category, Diagnostic, Fix};
use rbxts_parser::Expr;
use rbxts_semantic::{infer, query, TypeEnv};

pub struct SizeMethod;

const MESSAGE: &str = "Use .size() instead of .length or .size property for Roblox compatibility.";

impl Rule for SizeMethod {
    fn code(&self) -> RuleCode {
        RuleCode("RBX019")
    }

    fn category(&self) -> Category {
        Category::Correctness
    }

    fn name(&self) -> &'static str {
        "size-method"
    }

    fn description(&self) -> &'static str {
        "Enforces use of the .size() method instead of .length or .size properties"
    }

    fn check_expr<'a>(
        &self,
        ctx: &LintContext<'a>,
        _model: &SemanticModel<'a>,
        env: &TypeEnv,
        expr: &Expr<'a>,
        parent: Option<&Expr<'a>>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let Expr::Member {
            object,
            property,
            property_span,
            span,
            ..
        } = expr
        else {
            return;
        };
        if *property != "length" && *property != "size" {
            return;
        }

        // Already a method call: `xs.size()`
        if let Some(Expr::Call { callee, .. }) = parent {
            if std::ptr::eq(callee.as_ref() as *const Expr, expr as *const Expr) {
                return;
            }
        }

        let ty = infer::type_of(ctx.db(), env, object);
        let is_target = if *property == "length" {
            query::is_string_like(&ty) || query::is_array_like(&ty)
        } else {
            query::is_map_like(&ty) || query::is_set_like(&ty)
        };
        if !is_target {
            return;
        }

        let object_text = ctx.text(object.span());
        diagnostics.push(
            Diagnostic::warning("RBX019", MESSAGE, ctx.location(*property_span)).with_fix(Fix {
                message: "Use .size()".to_string(),
                edits: crate::fixer::replace_node(*span, format!("{object_text}.size()")),
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_lint, assert_lint_fix};

    #[test]
    fn rewrites_array_length() {
        assert_lint_fix(
            Box::new(SizeMethod),
            "const xs = [1, 2, 3]; const n = xs.length;",
            "const xs = [1, 2, 3]; const n = xs.size();",
        );
    }

    #[test]
    fn rewrites_string_length() {
        assert_lint_fix(
            Box::new(SizeMethod),
            "const s = \"abc\"; const n = s.length;",
            "const s = \"abc\"; const n = s.size();",
        );
    }

    #[test]
    fn rewrites_map_size_property() {
        assert_lint_fix(
            Box::new(SizeMethod),
            "const m = new Map<string, number>(); const n = m.size;",
            "const m = new Map<string, number>(); const n = m.size();",
        );
    }

    #[test]
    fn size_method_call_is_fine() {
        assert_lint(
            Box::new(SizeMethod),
            "const xs = [1, 2, 3]; const n = xs.size();",
            "",
        );
    }

    #[test]
    fn unknown_receiver_is_ignored() {
        assert_lint(Box::new(SizeMethod), "const n = mystery.length;", "");
    }
}
