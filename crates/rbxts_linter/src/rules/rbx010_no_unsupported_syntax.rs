//! RBX010: no-unsupported-syntax
//!
//! A grab bag of syntax the transpiler cannot emit: `globalThis`,
//! labeled statements, `.prototype`, regex literals, and rest elements
//! in destructuring patterns.

use crate::{LintContext, Rule, RuleCode, SemanticModel};
use rbxts_diagnostics::{Category, Diagnostic};
use rbxts_parser::{Expr, ForHead, Literal, ObjectPatternProp, ObjectProperty, Pattern, Stmt};
use rbxts_semantic::TypeEnv;

pub struct NoUnsupportedSyntax;

const GLOBAL_THIS_VIOLATION: &str = "`globalThis` is not supported in roblox-ts.";
const LABEL_VIOLATION: &str = "`label` is not supported in roblox-ts.";
const PROTOTYPE_VIOLATION: &str = "`.prototype` is not supported in roblox-ts.";
const REGEX_LITERAL_VIOLATION: &str = "Regex literals are not supported in roblox-ts";
const SPREAD_DESTRUCTURING_VIOLATION: &str = "Operator `...` is not supported for destructuring!";

fn check_pattern(ctx: &LintContext, pattern: &Pattern, diagnostics: &mut Vec<Diagnostic>) {
    match pattern {
        Pattern::Array { elements, .. } => {
            for element in elements.iter().flatten() {
                if let Pattern::Rest { span, .. } = element {
                    diagnostics.push(Diagnostic::error(
                        "RBX010",
                        SPREAD_DESTRUCTURING_VIOLATION,
                        ctx.location(*span),
                    ));
                } else {
                    check_pattern(ctx, element, diagnostics);
                }
            }
        }
        Pattern::Object { properties, .. } => {
            for prop in properties {
                match prop {
                    ObjectPatternProp::Rest { span, .. } => {
                        diagnostics.push(Diagnostic::error(
                            "RBX010",
                            SPREAD_DESTRUCTURING_VIOLATION,
                            ctx.location(*span),
                        ));
                    }
                    ObjectPatternProp::KeyValue { value, .. } => {
                        check_pattern(ctx, value, diagnostics);
                    }
                    ObjectPatternProp::Shorthand { .. } => {}
                }
            }
        }
        Pattern::Assign { target, .. } => check_pattern(ctx, target, diagnostics),
        _ => {}
    }
}

impl Rule for NoUnsupportedSyntax {
    fn code(&self) -> RuleCode {
        RuleCode("RBX010")
    }

    fn category(&self) -> Category {
        Category::Unsupported
    }

    fn name(&self) -> &'static str {
        "no-unsupported-syntax"
    }

    fn description(&self) -> &'static str {
        "Disallow unsupported syntax in roblox-ts"
    }

    fn check_stmt<'a>(
        &self,
        ctx: &LintContext<'a>,
        _model: &SemanticModel<'a>,
        _env: &TypeEnv,
        stmt: &Stmt<'a>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        match stmt {
            Stmt::Labeled { span, .. } => {
                diagnostics.push(Diagnostic::error(
                    "RBX010",
                    LABEL_VIOLATION,
                    ctx.location(*span),
                ));
            }
            Stmt::VarDecl { declarations, .. } => {
                for decl in declarations {
                    check_pattern(ctx, &decl.pattern, diagnostics);
                }
            }
            Stmt::ForIn { left, .. } | Stmt::ForOf { left, .. } => {
                if let ForHead::VarDecl { pattern, .. } = left {
                    check_pattern(ctx, pattern, diagnostics);
                }
            }
            Stmt::TryCatch {
                catch_param: Some(param),
                ..
            } => {
                check_pattern(ctx, param, diagnostics);
            }
            _ => {}
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
            Expr::Identifier { name, span } if *name == "globalThis" => {
                diagnostics.push(Diagnostic::error(
                    "RBX010",
                    GLOBAL_THIS_VIOLATION,
                    ctx.location(*span),
                ));
            }
            Expr::Member {
                property,
                property_span,
                ..
            } if *property == "prototype" => {
                diagnostics.push(Diagnostic::error(
                    "RBX010",
                    PROTOTYPE_VIOLATION,
                    ctx.location(*property_span),
                ));
            }
            Expr::Literal {
                value: Literal::Regex(_),
                span,
            } => {
                diagnostics.push(Diagnostic::error(
                    "RBX010",
                    REGEX_LITERAL_VIOLATION,
                    ctx.location(*span),
                ));
            }
            // Destructuring assignment targets: `[a, ...rest] = xs`
            Expr::Assignment { target, .. } => match target.unwrap_grouping() {
                Expr::Array { elements, .. } => {
                    for element in elements {
                        if let Expr::Spread { span, .. } = element {
                            diagnostics.push(Diagnostic::error(
                                "RBX010",
                                SPREAD_DESTRUCTURING_VIOLATION,
                                ctx.location(*span),
                            ));
                        }
                    }
                }
                Expr::Object { properties, .. } => {
                    for prop in properties {
                        if let ObjectProperty::Spread { span, .. } = prop {
                            diagnostics.push(Diagnostic::error(
                                "RBX010",
                                SPREAD_DESTRUCTURING_VIOLATION,
                                ctx.location(*span),
                            ));
                        }
                    }
                }
                _ => {}
            },
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_lint, assert_lint_count, lint_one};

    #[test]
    fn flags_global_this() {
        assert_lint(Box::new(NoUnsupportedSyntax), "print(globalThis);", "RBX010");
    }

    #[test]
    fn flags_labeled_statement() {
        let diagnostics = lint_one(
            Box::new(NoUnsupportedSyntax),
            "outer: for (const x of xs) { break; }",
        );
        assert!(diagnostics.iter().any(|d| d.message.contains("label")));
    }

    #[test]
    fn flags_prototype_access() {
        assert_lint(
            Box::new(NoUnsupportedSyntax),
            "const p = Enemy.prototype;",
            "RBX010",
        );
    }

    #[test]
    fn flags_regex_literal() {
        let diagnostics = lint_one(Box::new(NoUnsupportedSyntax), "const re = /ab+c/g;");
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("Regex"));
    }

    #[test]
    fn flags_rest_in_destructuring() {
        assert_lint_count(
            Box::new(NoUnsupportedSyntax),
            "const [a, ...rest] = list;",
            1,
        );
        assert_lint_count(
            Box::new(NoUnsupportedSyntax),
            "const { x, ...others } = obj;",
            1,
        );
    }

    #[test]
    fn rest_parameters_are_fine() {
        assert_lint(
            Box::new(NoUnsupportedSyntax),
            "function f(...args: Array<string>) {}",
            "",
        );
    }
}
