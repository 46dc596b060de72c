//! RBX002: no-any
//!
//! `any` defeats the transpiler's type-directed emit. `keyof any` is the
//! one legitimate use (it means `string | number | symbol`).

use crate::{LintContext, NoAnyOptions, Rule, RuleCode};
use rbxts_diagnostics::{Category, Diagnostic, Edit, Fix, Suggestion};
use rbxts_parser::TypeAnn;

pub struct NoAny {
    options: NoAnyOptions,
}

const ANY_VIOLATION: &str = "Type 'any' is not supported in roblox-ts.";
const SUGGEST_UNKNOWN: &str =
    "Use `unknown` instead, this will force you to explicitly, and safely assert the type is correct.";

impl NoAny {
    pub fn new(options: NoAnyOptions) -> Self {
        Self { options }
    }
}

impl Default for NoAny {
    fn default() -> Self {
        Self::new(NoAnyOptions::default())
    }
}

impl Rule for NoAny {
    fn code(&self) -> RuleCode {
        RuleCode("RBX002")
    }

    fn category(&self) -> Category {
        Category::Unsupported
    }

    fn name(&self) -> &'static str {
        "no-any"
    }

    fn description(&self) -> &'static str {
        "Disallow values of type `any`. Use `unknown` instead"
    }

    fn check_type<'a>(
        &self,
        ctx: &LintContext<'a>,
        ty: &TypeAnn<'a>,
        parent: Option<&TypeAnn<'a>>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let TypeAnn::Any { span } = ty else {
            return;
        };
        if matches!(parent, Some(TypeAnn::Keyof { .. })) {
            return;
        }

        let edits = vec![Edit::new(span.start, span.end, "unknown")];
        let mut diagnostic = Diagnostic::error("RBX002", ANY_VIOLATION, ctx.location(*span))
            .with_suggestion(Suggestion {
                label: SUGGEST_UNKNOWN.to_string(),
                edits: edits.clone(),
            });

        if self.options.fix_to_unknown {
            diagnostic = diagnostic.with_fix(Fix {
                message: "Replace `any` with `unknown`".to_string(),
                edits,
            });
        }

        diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_lint, assert_lint_fix, lint_one};

    #[test]
    fn fixes_any_to_unknown() {
        assert_lint_fix(
            Box::new(NoAny::default()),
            "function f(x: any) {}",
            "function f(x: unknown) {}",
        );
    }

    #[test]
    fn fixes_any_in_generic_argument() {
        assert_lint_fix(
            Box::new(NoAny::default()),
            "let xs: Array<any> = [];",
            "let xs: Array<unknown> = [];",
        );
    }

    #[test]
    fn keyof_any_is_exempt() {
        assert_lint(Box::new(NoAny::default()), "type K = keyof any;", "");
    }

    #[test]
    fn without_fix_option_only_suggests() {
        let rule = NoAny::new(crate::NoAnyOptions {
            fix_to_unknown: false,
        });
        let diagnostics = lint_one(Box::new(rule), "let x: any;");
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].fix.is_none());
        assert_eq!(diagnostics[0].suggestions.len(), 1);
    }
}
