//! RBX020: no-object-math
//!
//! Roblox data types overload Lua operators, but TypeScript cannot type
//! them; roblox-ts exposes macro methods (.add/.sub/.mul/.div) instead.
//! The constraint tables below mirror the macro signatures: which
//! operand types each operation accepts and whether the operands may be
//! swapped (`2 * vector` -> `vector.mul(2)`).

use crate::fixer;
use crate::{LintContext, Rule, RuleCode, SemanticModel};
use rbxts_diagnostics::{render_template, Category, Diagnostic, Fix};
use rbxts_parser::{BinaryOp, Expr, UnaryOp};
use rbxts_semantic::{infer, query, TypeEnv};

pub struct NoObjectMath;

const OBJECT_MATH_VIOLATION: &str =
    "'{{operator}}' is not supported for Roblox DataType math operations. Use .{{method}}() instead.";
const OTHER_VIOLATION: &str = "Cannot use {{operator}} on this Roblox Datatype.";

/// What operand types an operation accepts
#[derive(Clone, Copy)]
enum Accepted {
    /// Only the same data type
    Same,
    /// Any of the listed names; "number" admits numeric operands
    List(&'static [&'static str]),
}

struct Constraint {
    accepted: Accepted,
    allow_swapped: bool,
}

fn operation_constraints(data_type: &str, method: &str) -> Option<Constraint> {
    let (accepted, allow_swapped): (Accepted, bool) = match (data_type, method) {
        ("CFrame", "add") => (Accepted::List(&["Vector3"]), false),
        ("CFrame", "mul") => (Accepted::List(&["CFrame", "Vector3"]), false),
        ("CFrame", "sub") => (Accepted::List(&["Vector3"]), false),

        ("UDim2", "add") | ("UDim2", "sub") => (Accepted::Same, false),
        ("UDim", "add") | ("UDim", "sub") => (Accepted::Same, false),

        ("Vector2", "add") | ("Vector2", "sub") => (Accepted::Same, false),
        ("Vector2", "div") => (Accepted::List(&["Vector2", "number"]), false),
        ("Vector2", "mul") => (Accepted::List(&["Vector2", "number"]), true),

        ("Vector3", "add") | ("Vector3", "sub") => (Accepted::Same, false),
        ("Vector3", "div") => (Accepted::List(&["Vector3", "number"]), false),
        ("Vector3", "mul") => (Accepted::List(&["Vector3", "number"]), true),

        ("Vector2int16", "add") | ("Vector2int16", "sub") | ("Vector2int16", "mul")
        | ("Vector2int16", "div") => (Accepted::Same, false),
        ("Vector3int16", "add") | ("Vector3int16", "sub") | ("Vector3int16", "mul")
        | ("Vector3int16", "div") => (Accepted::Same, false),

        _ => return None,
    };
    Some(Constraint {
        accepted,
        allow_swapped,
    })
}

/// Leak-free lookup of the method name for a math operator
fn macro_name(op: BinaryOp) -> Option<&'static str> {
    match op {
        BinaryOp::Mul => Some("mul"),
        BinaryOp::Add => Some("add"),
        BinaryOp::Sub => Some("sub"),
        BinaryOp::Div => Some("div"),
        _ => None,
    }
}

fn unary_negation_supported(data_type: &str) -> bool {
    // CFrame is the only data type without `unm`
    data_type != "CFrame"
}

/// The Roblox data type of an operand, looking through method-call
/// chains (`v.mul(2)`) and nested math expressions (`v1 + v2`).
fn roblox_type_name<'a>(ctx: &LintContext<'a>, env: &TypeEnv, node: &Expr<'a>) -> Option<String> {
    let node = node.unwrap_grouping();

    let simple = infer::type_of(ctx.db(), env, node);
    if let Some(name) = query::roblox_data_type_name(&simple) {
        return Some(name.to_string());
    }

    match node {
        Expr::Call { callee, .. } => {
            let Expr::Member {
                object, property, ..
            } = callee.unwrap_grouping()
            else {
                return None;
            };
            let object_ty = infer::type_of(ctx.db(), env, object);
            let object_name = query::roblox_data_type_name(&object_ty)?;
            if operation_constraints(object_name, property).is_some() {
                Some(object_name.to_string())
            } else {
                None
            }
        }
        Expr::Binary { left, op, right, .. } => {
            let method = macro_name(*op)?;
            let left_name = roblox_type_name_shallow(ctx, env, left);
            let right_name = roblox_type_name_shallow(ctx, env, right);
            validate_operation(
                method,
                left_name.as_deref(),
                right_name.as_deref(),
            )
            .map(|validation| validation.data_type)
        }
        _ => None,
    }
}

/// Non-recursive variant used inside nested binary validation
fn roblox_type_name_shallow<'a>(
    ctx: &LintContext<'a>,
    env: &TypeEnv,
    node: &Expr<'a>,
) -> Option<String> {
    let ty = infer::type_of(ctx.db(), env, node.unwrap_grouping());
    query::roblox_data_type_name(&ty).map(|s| s.to_string())
}

struct Validation {
    data_type: String,
    should_swap: bool,
}

fn accepts(constraint: &Constraint, this_type: &str, other: Option<&str>) -> bool {
    match constraint.accepted {
        Accepted::Same => other == Some(this_type),
        Accepted::List(names) => {
            if names.contains(&"number") && other.is_none() {
                return true;
            }
            other.is_some_and(|name| names.contains(&name))
        }
    }
}

fn validate_operation(
    method: &'static str,
    left: Option<&str>,
    right: Option<&str>,
) -> Option<Validation> {
    if let Some(left_name) = left {
        if let Some(constraint) = operation_constraints(left_name, method) {
            if accepts(&constraint, left_name, right) {
                return Some(Validation {
                    data_type: left_name.to_string(),
                    should_swap: false,
                });
            }
        }
    }

    if let Some(right_name) = right {
        if let Some(constraint) = operation_constraints(right_name, method) {
            if constraint.allow_swapped && accepts(&constraint, right_name, left) {
                return Some(Validation {
                    data_type: right_name.to_string(),
                    should_swap: true,
                });
            }
        }
    }

    None
}

impl Rule for NoObjectMath {
    fn code(&self) -> RuleCode {
        RuleCode("RBX020")
    }

    fn category(&self) -> Category {
        Category::Correctness
    }

    fn name(&self) -> &'static str {
        "no-object-math"
    }

    fn description(&self) -> &'static str {
        "Enforce DataType math methods over operators"
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
        match expr {
            Expr::Binary {
                left, op, right, span,
            } => {
                // Equality comparisons are legal on data types
                if matches!(op, BinaryOp::StrictEqual | BinaryOp::StrictNotEqual) {
                    return;
                }

                let left_name = roblox_type_name(ctx, env, left);
                let right_name = roblox_type_name(ctx, env, right);
                if left_name.is_none() && right_name.is_none() {
                    return;
                }

                let operator = op.as_str();
                let Some(method) = macro_name(*op) else {
                    let message = render_template(OTHER_VIOLATION, &[("operator", operator)]);
                    diagnostics.push(Diagnostic::error("RBX020", message, ctx.location(*span)));
                    return;
                };

                match validate_operation(method, left_name.as_deref(), right_name.as_deref()) {
                    Some(validation) => {
                        let message = render_template(
                            OBJECT_MATH_VIOLATION,
                            &[("operator", operator), ("method", method)],
                        );
                        let edits = if validation.should_swap {
                            fixer::swapped_method_call_fix(
                                ctx.source(),
                                left.span(),
                                right.span(),
                                method,
                            )
                        } else {
                            fixer::method_call_fix(
                                ctx.source(),
                                left.span(),
                                operator,
                                right.span(),
                                method,
                            )
                        };
                        diagnostics.push(
                            Diagnostic::error("RBX020", message, ctx.location(*span)).with_fix(
                                Fix {
                                    message: format!("Use .{method}()"),
                                    edits,
                                },
                            ),
                        );
                    }
                    None => {
                        let message = render_template(OTHER_VIOLATION, &[("operator", operator)]);
                        diagnostics.push(Diagnostic::error("RBX020", message, ctx.location(*span)));
                    }
                }
            }

            Expr::Unary {
                op: UnaryOp::Neg,
                operand,
                span,
            } => {
                let Some(data_type) = roblox_type_name(ctx, env, operand) else {
                    return;
                };
                if unary_negation_supported(&data_type) {
                    let message = render_template(
                        OBJECT_MATH_VIOLATION,
                        &[("operator", "-"), ("method", "mul")],
                    );
                    diagnostics.push(
                        Diagnostic::error("RBX020", message, ctx.location(*span)).with_fix(Fix {
                            message: "Use .mul(-1)".to_string(),
                            edits: fixer::unary_negation_fix(ctx.source(), *span, operand.span()),
                        }),
                    );
                } else {
                    let message = render_template(OTHER_VIOLATION, &[("operator", "-")]);
                    diagnostics.push(Diagnostic::error("RBX020", message, ctx.location(*span)));
                }
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_lint, assert_lint_count, assert_lint_fix, lint_one};

    #[test]
    fn rewrites_vector_addition() {
        assert_lint_fix(
            Box::new(NoObjectMath),
            "const v1 = new Vector3(); const v2 = new Vector3(); const r = v1 + v2;",
            "const v1 = new Vector3(); const v2 = new Vector3(); const r = v1.add(v2);",
        );
    }

    #[test]
    fn rewrites_cframe_vector_multiplication() {
        assert_lint_fix(
            Box::new(NoObjectMath),
            "const c = new CFrame(); const v = new Vector3(); const r = c * v;",
            "const c = new CFrame(); const v = new Vector3(); const r = c.mul(v);",
        );
    }

    #[test]
    fn rewrites_division_by_number() {
        assert_lint_fix(
            Box::new(NoObjectMath),
            "const v = new Vector2(); const r = v / 2;",
            "const v = new Vector2(); const r = v.div(2);",
        );
    }

    #[test]
    fn swaps_number_times_vector() {
        assert_lint_fix(
            Box::new(NoObjectMath),
            "const v = new Vector3(); const r = 2 * v;",
            "const v = new Vector3(); const r = v.mul(2);",
        );
    }

    #[test]
    fn existing_method_chain_is_untouched() {
        assert_lint_count(
            Box::new(NoObjectMath),
            "const v = new Vector3(); const w = new Vector3(); const r = v.mul(2).add(w);",
            0,
        );
    }

    #[test]
    fn rewrites_unary_negation() {
        assert_lint_fix(
            Box::new(NoObjectMath),
            "const u = new UDim(); const r = -u;",
            "const u = new UDim(); const r = u.mul(-1);",
        );
    }

    #[test]
    fn cframe_negation_has_no_fix() {
        let diagnostics = lint_one(
            Box::new(NoObjectMath),
            "const c = new CFrame(); const r = -c;",
        );
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].fix.is_none());
    }

    #[test]
    fn unsupported_combination_has_no_fix() {
        let diagnostics = lint_one(
            Box::new(NoObjectMath),
            "const c1 = new CFrame(); const c2 = new CFrame(); const r = c1 + c2;",
        );
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].fix.is_none());
    }

    #[test]
    fn strict_equality_is_fine() {
        assert_lint(
            Box::new(NoObjectMath),
            "const v1 = new Vector3(); const v2 = new Vector3(); const eq = v1 === v2;",
            "",
        );
    }

    #[test]
    fn plain_number_math_is_fine() {
        assert_lint(Box::new(NoObjectMath), "const a = 1 + 2 * 3;", "");
    }

    #[test]
    fn preserves_user_parentheses_on_operands() {
        assert_lint_fix(
            Box::new(NoObjectMath),
            "const v1 = new Vector3(); const v2 = new Vector3(); const r = (v1) + v2;",
            "const v1 = new Vector3(); const v2 = new Vector3(); const r = (v1).add(v2);",
        );
    }

    #[test]
    fn modulo_on_data_type_reports_without_fix() {
        let diagnostics = lint_one(
            Box::new(NoObjectMath),
            "const v = new Vector3(); const r = v % 2;",
        );
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].fix.is_none());
        assert!(diagnostics[0].message.contains('%'));
    }
}
