//! RBX007: no-private-identifier
//!
//! `#field` names have no Luau encoding. Declarations become `private`
//! members; access sites drop the sigil to match.

use crate::{LintContext, Rule, RuleCode, SemanticModel};
use rbxts_diagnostics::{Category, Diagnostic, Edit, Fix};
use rbxts_parser::{ClassMember, Expr, PropertyKey, Stmt};
use rbxts_semantic::TypeEnv;

pub struct NoPrivateIdentifier;

const MESSAGE: &str =
    "Private identifiers (`#`) are not supported in roblox-ts. Use the 'private' access modifier instead.";

impl Rule for NoPrivateIdentifier {
    fn code(&self) -> RuleCode {
        RuleCode("RBX007")
    }

    fn category(&self) -> Category {
        Category::Unsupported
    }

    fn name(&self) -> &'static str {
        "no-private-identifier"
    }

    fn description(&self) -> &'static str {
        "Disallow the use of private identifiers (`#`)"
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
            check_members(ctx, members, diagnostics);
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
            Expr::ClassExpr { members, .. } => check_members(ctx, members, diagnostics),
            // `obj.#field` access: drop the sigil to follow the renamed field
            Expr::Member {
                property,
                property_span,
                ..
            } if property.starts_with('#') => {
                diagnostics.push(
                    Diagnostic::error("RBX007", MESSAGE, ctx.location(*property_span)).with_fix(
                        Fix {
                            message: "Remove the `#` sigil".to_string(),
                            edits: vec![Edit::delete(
                                property_span.start,
                                property_span.start + 1,
                            )],
                        },
                    ),
                );
            }
            _ => {}
        }
    }
}

fn check_members(ctx: &LintContext, members: &[ClassMember], diagnostics: &mut Vec<Diagnostic>) {
    for member in members {
        if let PropertyKey::Private { name, span } = member.key() {
            diagnostics.push(
                Diagnostic::error("RBX007", MESSAGE, ctx.location(*span)).with_fix(Fix {
                    message: "Use the `private` access modifier".to_string(),
                    edits: vec![Edit::new(span.start, span.end, format!("private {name}"))],
                }),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_lint, assert_lint_fix};

    #[test]
    fn converts_private_field_declaration() {
        assert_lint_fix(
            Box::new(NoPrivateIdentifier),
            "class A { #count = 0; }",
            "class A { private count = 0; }",
        );
    }

    #[test]
    fn converts_private_method() {
        assert_lint_fix(
            Box::new(NoPrivateIdentifier),
            "class A { #hidden() { return 1; } }",
            "class A { private hidden() { return 1; } }",
        );
    }

    #[test]
    fn rewrites_declaration_and_access_together() {
        assert_lint_fix(
            Box::new(NoPrivateIdentifier),
            "class A { #n = 0; bump() { return this.#n; } }",
            "class A { private n = 0; bump() { return this.n; } }",
        );
    }

    #[test]
    fn private_modifier_is_fine() {
        assert_lint(
            Box::new(NoPrivateIdentifier),
            "class A { private count = 0; }",
            "",
        );
    }
}
