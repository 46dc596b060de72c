//! RBX012: no-preceding-spread-element
//!
//! Lua varargs only expand in the final argument position; earlier
//! spreads would be truncated to one value.

use crate::{LintContext, Rule, RuleCode, SemanticModel};
use rbxts_diagnostics::{Category, Diagnostic};
use rbxts_parser::Expr;
use rbxts_semantic::TypeEnv;

pub struct NoPrecedingSpreadElement;

const MESSAGE: &str = "Spread element must come last in a list of arguments!";

impl Rule for NoPrecedingSpreadElement {
    fn code(&self) -> RuleCode {
        RuleCode("RBX012")
    }

    fn category(&self) -> Category {
        Category::Correctness
    }

    fn name(&self) -> &'static str {
        "no-preceding-spread-element"
    }

    fn description(&self) -> &'static str {
        "Disallow spread elements not last in a list of arguments"
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
        let args = match expr {
            Expr::Call { args, .. } | Expr::New { args, .. } => args,
            _ => return,
        };
        if args.len() < 2 {
            return;
        }

        for arg in &args[..args.len() - 1] {
            if let Expr::Spread { span, .. } = arg {
                diagnostics.push(Diagnostic::error("RBX012", MESSAGE, ctx.location(*span)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_lint, assert_lint_count};

    #[test]
    fn flags_spread_before_other_arguments() {
        assert_lint_count(Box::new(NoPrecedingSpreadElement), "f(...rest, 1);", 1);
    }

    #[test]
    fn flags_spread_in_new_arguments() {
        assert_lint_count(
            Box::new(NoPrecedingSpreadElement),
            "new Thing(...parts, tail);",
            1,
        );
    }

    #[test]
    fn trailing_spread_is_fine() {
        assert_lint(Box::new(NoPrecedingSpreadElement), "f(1, ...rest);", "");
    }

    #[test]
    fn array_literal_spread_is_fine() {
        assert_lint(
            Box::new(NoPrecedingSpreadElement),
            "const xs = [...head, 1];",
            "",
        );
    }
}
