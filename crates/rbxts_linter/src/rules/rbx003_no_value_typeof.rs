//! RBX003: no-value-typeof
//!
//! Value-level `typeof` returns JS type tags that do not exist at Luau
//! runtime. Type-level `typeof` queries are fine.

use crate::{LintContext, Rule, RuleCode, SemanticModel};
use rbxts_diagnostics::{Category, Diagnostic};
use rbxts_parser::{Expr, UnaryOp};
use rbxts_semantic::TypeEnv;

pub struct NoValueTypeof;

const MESSAGE: &str =
    "'typeof' operator is not supported! Use `typeIs(value, type)` or `typeOf(value)` instead.";

impl Rule for NoValueTypeof {
    fn code(&self) -> RuleCode {
        RuleCode("RBX003")
    }

    fn category(&self) -> Category {
        Category::Unsupported
    }

    fn name(&self) -> &'static str {
        "no-value-typeof"
    }

    fn description(&self) -> &'static str {
        "Disallow using `typeof` to check for value types"
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
        if let Expr::Unary {
            op: UnaryOp::Typeof,
            span,
            ..
        } = expr
        {
            diagnostics.push(Diagnostic::error("RBX003", MESSAGE, ctx.location(*span)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_lint, assert_lint_count};

    #[test]
    fn flags_value_level_typeof() {
        assert_lint_count(Box::new(NoValueTypeof), "const t = typeof value;", 1);
    }

    #[test]
    fn flags_typeof_in_comparison() {
        assert_lint(
            Box::new(NoValueTypeof),
            "if (typeof x === \"string\") {}",
            "RBX003",
        );
    }

    #[test]
    fn type_level_typeof_is_fine() {
        assert_lint(Box::new(NoValueTypeof), "let v: typeof other;", "");
    }
}
