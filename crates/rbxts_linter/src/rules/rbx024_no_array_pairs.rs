//! RBX024: no-array-pairs
//!
//! `pairs()`/`ipairs()` iterate Lua tables with 1-based keys; handing
//! them an `Array<T>` leaks the off-by-one to the caller. There is no
//! mechanical fix - the loop wants a rewrite over values or indices.

use crate::{LintContext, Rule, RuleCode, SemanticModel};
use rbxts_diagnostics::{Category, Diagnostic};
use rbxts_parser::Expr;
use rbxts_semantic::{infer, query, TypeEnv};

pub struct NoArrayPairs;

const PAIRS_MESSAGE: &str =
    "Do not use Array<T> with pairs(). Key values will not be shifted from 1-indexed to 0-indexed.";
const IPAIRS_MESSAGE: &str =
    "Do not use Array<T> with ipairs(). Key values will not be shifted from 1-indexed to 0-indexed.";

impl Rule for NoArrayPairs {
    fn code(&self) -> RuleCode {
        RuleCode("RBX024")
    }

    fn category(&self) -> Category {
        Category::Correctness
    }

    fn name(&self) -> &'static str {
        "no-array-pairs"
    }

    fn description(&self) -> &'static str {
        "Disallows usage of pairs() and ipairs() with Array<T>"
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
        let Expr::Call { callee, args, span, .. } = expr else {
            return;
        };
        let Expr::Identifier { name, .. } = callee.unwrap_grouping() else {
            return;
        };
        let message = match *name {
            "pairs" => PAIRS_MESSAGE,
            "ipairs" => IPAIRS_MESSAGE,
            _ => return,
        };
        let Some(argument) = args.first() else {
            return;
        };

        let ty = infer::type_of(ctx.db(), env, argument);
        if query::is_possibly(ctx.db(), &ty, &mut query::is_array_like) {
            diagnostics.push(Diagnostic::warning("RBX024", message, ctx.location(*span)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_lint, assert_lint_count, lint_one};

    #[test]
    fn flags_pairs_over_array_literal() {
        let diagnostics = lint_one(
            Box::new(NoArrayPairs),
            "const arr = [1, 2, 3]; for (const i of pairs(arr)) {}",
        );
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].fix.is_none());
        assert!(diagnostics[0].message.contains("pairs()"));
    }

    #[test]
    fn ipairs_gets_its_own_message() {
        let diagnostics = lint_one(
            Box::new(NoArrayPairs),
            "const arr = [1]; for (const i of ipairs(arr)) {}",
        );
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("ipairs()"));
    }

    #[test]
    fn flags_annotated_arrays() {
        assert_lint_count(
            Box::new(NoArrayPairs),
            "const arr: number[] = []; for (const i of pairs(arr)) {}",
            1,
        );
        assert_lint_count(
            Box::new(NoArrayPairs),
            "const arr: Array<string> = []; for (const i of ipairs(arr)) {}",
            1,
        );
        assert_lint_count(
            Box::new(NoArrayPairs),
            "const arr = new Array<number>(); for (const i of pairs(arr)) {}",
            1,
        );
    }

    #[test]
    fn maps_are_fine() {
        assert_lint(
            Box::new(NoArrayPairs),
            "const map = new Map<string, string>(); for (const [k] of pairs(map)) {}",
            "",
        );
    }

    #[test]
    fn empty_object_and_any_are_exempt() {
        assert_lint(
            Box::new(NoArrayPairs),
            "const x = {}; for (const [i] of pairs(x)) {}",
            "",
        );
        assert_lint(
            Box::new(NoArrayPairs),
            "declare const x: any; for (const i of pairs(x)) {}",
            "",
        );
    }
}
