//! RBX014 / RBX015: declaration merging
//!
//! Luau emits one table per enum/namespace declaration; a second
//! declaration with the same name overwrites the first instead of
//! merging. Each declaration site of a merged name is reported.
//! Namespace merges where every site is type-only never reach the
//! emitted output and are exempt.

use crate::semantic_model::DeclKind;
use crate::{LintContext, Rule, RuleCode, SemanticModel};
use rbxts_diagnostics::{Category, Diagnostic};

pub struct NoEnumMerging;

const ENUM_MESSAGE: &str =
    "Enum merging is not supported in roblox-ts. Declare all members in a single enum.";

impl Rule for NoEnumMerging {
    fn code(&self) -> RuleCode {
        RuleCode("RBX014")
    }

    fn category(&self) -> Category {
        Category::Unsupported
    }

    fn name(&self) -> &'static str {
        "no-enum-merging"
    }

    fn description(&self) -> &'static str {
        "Disallow merging enum declarations"
    }

    fn check_post<'a>(
        &self,
        ctx: &LintContext<'a>,
        model: &SemanticModel<'a>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        for site in model.decl_sites() {
            if !matches!(site.kind, DeclKind::Enum) {
                continue;
            }
            if model.merge_group(site).len() > 1 {
                diagnostics.push(Diagnostic::error(
                    "RBX014",
                    ENUM_MESSAGE,
                    ctx.location(site.name_span),
                ));
            }
        }
    }
}

pub struct NoNamespaceMerging;

const NAMESPACE_MESSAGE: &str =
    "Namespace merging is not supported in roblox-ts. Declare all members in a single namespace.";

impl Rule for NoNamespaceMerging {
    fn code(&self) -> RuleCode {
        RuleCode("RBX015")
    }

    fn category(&self) -> Category {
        Category::Unsupported
    }

    fn name(&self) -> &'static str {
        "no-namespace-merging"
    }

    fn description(&self) -> &'static str {
        "Disallow merging namespace declarations"
    }

    fn check_post<'a>(
        &self,
        ctx: &LintContext<'a>,
        model: &SemanticModel<'a>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        for site in model.decl_sites() {
            if !matches!(site.kind, DeclKind::Namespace { .. }) {
                continue;
            }
            let group = model.merge_group(site);
            if group.len() <= 1 {
                continue;
            }
            let all_type_only = group
                .iter()
                .all(|s| matches!(s.kind, DeclKind::Namespace { type_only: true }));
            if !all_type_only {
                diagnostics.push(Diagnostic::error(
                    "RBX015",
                    NAMESPACE_MESSAGE,
                    ctx.location(site.name_span),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_lint, assert_lint_count};

    #[test]
    fn three_merged_enums_report_three_times() {
        assert_lint_count(
            Box::new(NoEnumMerging),
            "enum Ability { Dash } enum Ability { Roll } enum Ability { Slide }",
            3,
        );
    }

    #[test]
    fn same_name_in_disjoint_scopes_is_fine() {
        assert_lint_count(
            Box::new(NoEnumMerging),
            "enum Kind { A } namespace Inner { enum Kind { B } }",
            0,
        );
    }

    #[test]
    fn single_enum_is_fine() {
        assert_lint(Box::new(NoEnumMerging), "enum Kind { A, B, C }", "");
    }

    #[test]
    fn merged_value_namespaces_report_each_site() {
        assert_lint_count(
            Box::new(NoNamespaceMerging),
            "namespace Util { export const a = 1; } namespace Util { export const b = 2; }",
            2,
        );
    }

    #[test]
    fn type_only_namespace_merging_is_exempt() {
        assert_lint_count(
            Box::new(NoNamespaceMerging),
            "namespace Types { export type A = number; } namespace Types { export interface B { x: number; } }",
            0,
        );
    }

    #[test]
    fn mixed_type_only_and_value_reports() {
        assert_lint_count(
            Box::new(NoNamespaceMerging),
            "namespace M { export type A = number; } namespace M { export const b = 2; }",
            2,
        );
    }
}
