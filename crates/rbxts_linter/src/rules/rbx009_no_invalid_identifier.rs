//! RBX009: no-invalid-identifier
//!
//! Names must survive transpilation: no Luau keywords, no globals the
//! emitted runtime depends on, and only the Luau identifier charset.
//! Imported names are only flagged when the import clause aliases
//! (an un-aliased import cannot be renamed locally anyway).

use crate::keywords;
use crate::{LintContext, Rule, RuleCode, SemanticModel};
use rbxts_diagnostics::{render_template, Category, Diagnostic};
use rbxts_lexer::Span;
use rbxts_parser::{Expr, ImportSpecifier, ModuleName, Pattern, Stmt};
use rbxts_semantic::TypeEnv;

pub struct NoInvalidIdentifier;

const INVALID_IDENTIFIER: &str =
    "Avoid using '{{identifier}}' as an identifier, as it is a reserved keyword in Luau.";
const RESERVED_IDENTIFIER: &str =
    "Avoid using '{{identifier}}' as an identifier, as it is a reserved for usage by the roblox-ts compiler.";
const INVALID_CHARACTERS: &str =
    "Identifier '{{identifier}}' contains invalid characters. Only letters, digits, and underscores are allowed.";

fn message_for(name: &str) -> &'static str {
    if keywords::is_luau_keyword(name) {
        INVALID_IDENTIFIER
    } else if keywords::is_reserved_identifier(name) {
        RESERVED_IDENTIFIER
    } else {
        INVALID_CHARACTERS
    }
}

fn validate(ctx: &LintContext, name: &str, span: Span, diagnostics: &mut Vec<Diagnostic>) {
    if !keywords::is_restricted(name) {
        return;
    }
    let message = render_template(message_for(name), &[("identifier", name)]);
    diagnostics.push(Diagnostic::error("RBX009", message, ctx.location(span)));
}

fn validate_pattern(ctx: &LintContext, pattern: &Pattern, diagnostics: &mut Vec<Diagnostic>) {
    let mut names = Vec::new();
    pattern.bound_names(&mut names);
    for (name, span) in names {
        let name_span = Span::new(span.start, span.start + name.len() as u32);
        validate(ctx, name, name_span, diagnostics);
    }
}

impl Rule for NoInvalidIdentifier {
    fn code(&self) -> RuleCode {
        RuleCode("RBX009")
    }

    fn category(&self) -> Category {
        Category::Unsupported
    }

    fn name(&self) -> &'static str {
        "no-invalid-identifier"
    }

    fn description(&self) -> &'static str {
        "Disallow the use of Luau reserved keywords as identifiers"
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
            Stmt::VarDecl { declarations, .. } => {
                for decl in declarations {
                    validate_pattern(ctx, &decl.pattern, diagnostics);
                }
            }
            Stmt::FunctionDecl {
                name,
                name_span,
                params,
                ..
            } => {
                validate(ctx, name, *name_span, diagnostics);
                for param in params {
                    validate_pattern(ctx, &param.pattern, diagnostics);
                }
            }
            Stmt::ClassDecl {
                name: Some(name),
                name_span: Some(name_span),
                ..
            } => {
                validate(ctx, name, *name_span, diagnostics);
            }
            Stmt::EnumDecl {
                name, name_span, ..
            } => {
                validate(ctx, name, *name_span, diagnostics);
            }
            Stmt::ModuleDecl {
                name: ModuleName::Identifier(name),
                name_span,
                ..
            } => {
                validate(ctx, name, *name_span, diagnostics);
            }
            Stmt::TryCatch {
                catch_param: Some(param),
                ..
            } => {
                validate_pattern(ctx, param, diagnostics);
            }
            Stmt::ImportDecl { specifiers, .. } => {
                let has_alias = specifiers.iter().any(|s| {
                    matches!(s, ImportSpecifier::Named { imported, local, .. } if imported != local)
                });
                if !has_alias {
                    return;
                }
                for specifier in specifiers {
                    validate(ctx, specifier.local(), specifier.span(), diagnostics);
                }
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
            Expr::FunctionExpr { params, .. } | Expr::ArrowFunction { params, .. } => {
                for param in params {
                    validate_pattern(ctx, &param.pattern, diagnostics);
                }
            }
            Expr::ClassExpr {
                name: Some(name),
                name_span: Some(name_span),
                ..
            } => {
                validate(ctx, name, *name_span, diagnostics);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_lint, assert_lint_count, lint_one};

    #[test]
    fn flags_luau_keyword() {
        let diagnostics = lint_one(Box::new(NoInvalidIdentifier), "const repeat = 1;");
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("reserved keyword in Luau"));
    }

    #[test]
    fn flags_reserved_compiler_global() {
        let diagnostics = lint_one(Box::new(NoInvalidIdentifier), "function TS() {}");
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("roblox-ts compiler"));
    }

    #[test]
    fn flags_dollar_sign_names() {
        let diagnostics = lint_one(Box::new(NoInvalidIdentifier), "let $money = 1;");
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("invalid characters"));
    }

    #[test]
    fn flags_destructured_names() {
        assert_lint_count(
            Box::new(NoInvalidIdentifier),
            "const { a: nil, b } = obj;",
            1,
        );
    }

    #[test]
    fn plain_names_are_fine() {
        assert_lint(Box::new(NoInvalidIdentifier), "const fooBar_2 = 1;", "");
    }

    #[test]
    fn unaliased_import_is_exempt() {
        assert_lint(
            Box::new(NoInvalidIdentifier),
            "import { table } from \"@rbxts/services\";",
            "",
        );
    }

    #[test]
    fn aliased_import_is_checked() {
        assert_lint_count(
            Box::new(NoInvalidIdentifier),
            "import { goodName as nil } from \"@rbxts/services\";",
            1,
        );
    }
}
