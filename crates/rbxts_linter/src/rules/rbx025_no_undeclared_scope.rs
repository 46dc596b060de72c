//! RBX025: no-undeclared-scope
//!
//! Imports from npm scopes outside the project's typeRoots have no type
//! packages and will not resolve at runtime under Rojo mapping.

use crate::{LintContext, Rule, RuleCode, SemanticModel};
use rbxts_diagnostics::{Category, Diagnostic};
use rbxts_lexer::Span;
use rbxts_parser::{Expr, Literal, Stmt};
use rbxts_semantic::TypeEnv;

pub struct NoUndeclaredScope;

const MESSAGE: &str = "You can only use npm scopes that are listed in your typeRoots.";

fn strip_quotes(raw: &str) -> &str {
    if raw.len() >= 2 {
        &raw[1..raw.len() - 1]
    } else {
        raw
    }
}

/// `@scope/package` -> `@scope`
fn extract_scope(source: &str) -> Option<&str> {
    if !source.starts_with('@') {
        return None;
    }
    let slash = source.find('/')?;
    if slash <= 1 {
        return None;
    }
    Some(&source[..slash])
}

fn check_module_source(
    ctx: &LintContext,
    raw_source: &str,
    span: Span,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let Some(scope) = extract_scope(strip_quotes(raw_source)) else {
        return;
    };
    let allowed = ctx.host().allowed_scopes();
    if !allowed.iter().any(|s| s == scope) {
        diagnostics.push(Diagnostic::error("RBX025", MESSAGE, ctx.location(span)));
    }
}

impl Rule for NoUndeclaredScope {
    fn code(&self) -> RuleCode {
        RuleCode("RBX025")
    }

    fn category(&self) -> Category {
        Category::Correctness
    }

    fn name(&self) -> &'static str {
        "no-undeclared-scope"
    }

    fn description(&self) -> &'static str {
        "Enforce that only npm scopes listed in typeRoots can be imported"
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
            Stmt::ImportDecl { source, span, .. } | Stmt::ExportAll { source, span } => {
                check_module_source(ctx, source, *span, diagnostics);
            }
            Stmt::ExportNamed {
                source: Some(source),
                span,
                ..
            } => {
                check_module_source(ctx, source, *span, diagnostics);
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
        // Dynamic `import("...")`
        let Expr::Call { callee, args, span, .. } = expr else {
            return;
        };
        if !matches!(callee.unwrap_grouping(), Expr::Identifier { name: "import", .. }) {
            return;
        }
        if let Some(Expr::Literal {
            value: Literal::String(raw),
            ..
        }) = args.first().map(|a| a.unwrap_grouping())
        {
            check_module_source(ctx, raw, *span, diagnostics);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_lint, assert_lint_count};

    #[test]
    fn rbxts_scope_is_allowed_by_default() {
        assert_lint(
            Box::new(NoUndeclaredScope),
            "import { Workspace } from \"@rbxts/services\";",
            "",
        );
    }

    #[test]
    fn unknown_scope_is_flagged() {
        assert_lint_count(
            Box::new(NoUndeclaredScope),
            "import x from \"@mystery/pkg\";",
            1,
        );
    }

    #[test]
    fn unscoped_modules_are_fine() {
        assert_lint(
            Box::new(NoUndeclaredScope),
            "import { util } from \"shared/util\";",
            "",
        );
    }

    #[test]
    fn reexports_are_checked() {
        assert_lint_count(
            Box::new(NoUndeclaredScope),
            "export * from \"@mystery/pkg\";",
            1,
        );
        assert_lint_count(
            Box::new(NoUndeclaredScope),
            "export { a } from \"@mystery/pkg\";",
            1,
        );
    }

    #[test]
    fn dynamic_import_is_checked() {
        assert_lint_count(Box::new(NoUndeclaredScope), "import(\"@mystery/pkg\");", 1);
    }
}
