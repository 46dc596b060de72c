//! RBX016: no-user-defined-lua-tuple
//!
//! `LuaTuple` is a compiler intrinsic; declaring or referencing it in
//! user code collides with the transpiler's multi-return encoding.

use crate::{LintContext, Rule, RuleCode, SemanticModel};
use rbxts_diagnostics::{Category, Diagnostic};
use rbxts_parser::{Stmt, TypeAnn};
use rbxts_semantic::TypeEnv;

pub struct NoUserDefinedLuaTuple;

const MESSAGE: &str = "Disallow usage of the LuaTuple type keyword.";

impl Rule for NoUserDefinedLuaTuple {
    fn code(&self) -> RuleCode {
        RuleCode("RBX016")
    }

    fn category(&self) -> Category {
        Category::Correctness
    }

    fn name(&self) -> &'static str {
        "no-user-defined-lua-tuple"
    }

    fn description(&self) -> &'static str {
        "Disallow usage of the LuaTuple type keyword"
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
            Stmt::InterfaceDecl {
                name: "LuaTuple",
                name_span,
                ..
            }
            | Stmt::TypeAliasDecl {
                name: "LuaTuple",
                name_span,
                ..
            } => {
                diagnostics.push(Diagnostic::error(
                    "RBX016",
                    MESSAGE,
                    ctx.location(*name_span),
                ));
            }
            _ => {}
        }
    }

    fn check_type<'a>(
        &self,
        ctx: &LintContext<'a>,
        ty: &TypeAnn<'a>,
        _parent: Option<&TypeAnn<'a>>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        if let TypeAnn::Reference {
            name: "LuaTuple",
            name_span,
            ..
        } = ty
        {
            diagnostics.push(Diagnostic::error(
                "RBX016",
                MESSAGE,
                ctx.location(*name_span),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_lint, assert_lint_count};

    #[test]
    fn flags_interface_declaration() {
        assert_lint_count(
            Box::new(NoUserDefinedLuaTuple),
            "interface LuaTuple { first: number; }",
            1,
        );
    }

    #[test]
    fn flags_type_alias_declaration() {
        assert_lint_count(
            Box::new(NoUserDefinedLuaTuple),
            "type LuaTuple = [number, number];",
            1,
        );
    }

    #[test]
    fn flags_type_reference() {
        assert_lint_count(
            Box::new(NoUserDefinedLuaTuple),
            "declare function w(): LuaTuple<[boolean]>;",
            1,
        );
    }

    #[test]
    fn other_names_are_fine() {
        assert_lint(
            Box::new(NoUserDefinedLuaTuple),
            "type Pair = [number, number];",
            "",
        );
    }
}
