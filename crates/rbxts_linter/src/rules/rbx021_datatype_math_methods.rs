//! RBX021: datatype-math-methods
//!
//! The style-level companion to no-object-math: whenever the left
//! operand is a Roblox data type, suggest the macro method without
//! consulting the operation constraint tables.

use crate::fixer;
use crate::{LintContext, Rule, RuleCode, SemanticModel};
use rbxts_diagnostics::{render_template, Category, Diagnostic, Fix};
use rbxts_parser::{BinaryOp, Expr};
use rbxts_semantic::{builtins, infer, Type, TypeEnv};

pub struct DatatypeMathMethods;

const MESSAGE: &str =
    "'{{operator}}' is not supported for Roblox DataType math operations. Use .{{method}}() instead.";

fn macro_name(op: BinaryOp) -> Option<&'static str> {
    match op {
        BinaryOp::Mul => Some("mul"),
        BinaryOp::Add => Some("add"),
        BinaryOp::Sub => Some("sub"),
        BinaryOp::Div => Some("div"),
        _ => None,
    }
}

impl Rule for DatatypeMathMethods {
    fn code(&self) -> RuleCode {
        RuleCode("RBX021")
    }

    fn category(&self) -> Category {
        Category::Style
    }

    fn name(&self) -> &'static str {
        "datatype-math-methods"
    }

    fn description(&self) -> &'static str {
        "Enforce using DataType math methods (.add(), .sub(), .mul(), .div()) instead of operators"
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
        let Expr::Binary {
            left, op, right, span,
        } = expr
        else {
            return;
        };
        let Some(method) = macro_name(*op) else {
            return;
        };

        // Only the declared symbol of the left operand, no union search
        let left_ty = infer::type_of(ctx.db(), env, left.unwrap_grouping());
        let Type::Named { name, .. } = &left_ty else {
            return;
        };
        if !builtins::DATA_TYPES.contains(&name.as_str()) {
            return;
        }

        let operator = op.as_str();
        let message = render_template(MESSAGE, &[("operator", operator), ("method", method)]);
        diagnostics.push(
            Diagnostic::style("RBX021", message, ctx.location(*span)).with_fix(Fix {
                message: format!("Use .{method}()"),
                edits: fixer::method_call_fix(
                    ctx.source(),
                    left.span(),
                    operator,
                    right.span(),
                    method,
                ),
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_lint, assert_lint_fix};

    #[test]
    fn rewrites_operator_to_method() {
        assert_lint_fix(
            Box::new(DatatypeMathMethods),
            "const u1 = new UDim2(); const u2 = new UDim2(); const r = u1 - u2;",
            "const u1 = new UDim2(); const u2 = new UDim2(); const r = u1.sub(u2);",
        );
    }

    #[test]
    fn plain_math_is_fine() {
        assert_lint(Box::new(DatatypeMathMethods), "const a = 5 * 3;", "");
    }

    #[test]
    fn comparison_operators_are_fine() {
        assert_lint(
            Box::new(DatatypeMathMethods),
            "const v1 = new Vector3(); const v2 = new Vector3(); const c = v1 === v2;",
            "",
        );
    }
}
