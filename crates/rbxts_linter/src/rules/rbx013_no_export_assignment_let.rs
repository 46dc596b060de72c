//! RBX013: no-export-assignment-let
//!
//! `export =` snapshots the value once; reassigning a `let` afterwards
//! would not update the export at Luau runtime.

use crate::semantic_model::BindingKind;
use crate::{LintContext, Rule, RuleCode, SemanticModel};
use rbxts_diagnostics::{Category, Diagnostic};
use rbxts_parser::VarKind;

pub struct NoExportAssignmentLet;

const MESSAGE: &str = "Cannot use `export =` on a `let` variable!";

impl Rule for NoExportAssignmentLet {
    fn code(&self) -> RuleCode {
        RuleCode("RBX013")
    }

    fn category(&self) -> Category {
        Category::Correctness
    }

    fn name(&self) -> &'static str {
        "no-export-assignment-let"
    }

    fn description(&self) -> &'static str {
        "Disallow using `export =` on a let variable"
    }

    fn check_post<'a>(
        &self,
        ctx: &LintContext<'a>,
        model: &SemanticModel<'a>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        for site in model.export_assignments() {
            let Some(binding_id) = model.resolve_from(site.scope, site.name) else {
                continue;
            };
            let binding = model.binding(binding_id);
            if binding.kind == BindingKind::Variable && binding.var_kind == Some(VarKind::Let) {
                diagnostics.push(Diagnostic::error("RBX013", MESSAGE, ctx.location(site.span)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_lint, assert_lint_count};

    #[test]
    fn flags_export_of_let() {
        assert_lint_count(
            Box::new(NoExportAssignmentLet),
            "let value = 1; export = value;",
            1,
        );
    }

    #[test]
    fn const_export_is_fine() {
        assert_lint(
            Box::new(NoExportAssignmentLet),
            "const value = 1; export = value;",
            "",
        );
    }

    #[test]
    fn function_export_is_fine() {
        assert_lint(
            Box::new(NoExportAssignmentLet),
            "function main() {} export = main;",
            "",
        );
    }

    #[test]
    fn unresolved_name_is_ignored() {
        assert_lint(Box::new(NoExportAssignmentLet), "export = mystery;", "");
    }
}
